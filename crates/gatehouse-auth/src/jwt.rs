//! JWT token issuance and validation
//!
//! This module provides signed-token operations using the jsonwebtoken
//! crate. Tokens are compact three-part strings (header.payload.signature)
//! signed with HS256 over a shared secret.

use crate::claims::AccessClaims;
use crate::error::{AuthError, AuthResult};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation};
use uuid::Uuid;

/// Authentication configuration for token issuance and validation.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared secret for HMAC signing
    pub secret: Option<String>,

    /// Token issuer
    pub issuer: String,

    /// Access token duration
    pub access_token_duration: Duration,

    /// Refresh token duration (the refresh flow is handled by a separate
    /// service; the duration lives here so deployments configure both
    /// lifetimes in one place)
    pub refresh_token_duration: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: None,
            issuer: "gatehouse".to_string(),
            access_token_duration: Duration::minutes(5),
            refresh_token_duration: Duration::days(7),
        }
    }
}

/// A freshly issued token together with its decoded claims.
///
/// Callers binding the token to a server-side session need the claims'
/// lifetime without re-parsing the string they just produced.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT string
    pub token: String,

    /// The claims that were signed
    pub claims: AccessClaims,
}

/// Token issuer and verifier.
///
/// Holds prebuilt encoding and decoding keys; construction fails if the
/// configured secret is unusable, and issuance never fails on valid
/// input shapes afterwards.
pub struct TokenIssuer {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("config", &self.config)
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .finish()
    }
}

impl TokenIssuer {
    /// Create a new token issuer with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Authentication configuration
    ///
    /// # Returns
    ///
    /// Token issuer or configuration error
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        let secret = config
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AuthError::ConfigError("Secret required for signing".to_string()))?;

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
        })
    }

    /// Create with a simple secret and default lifetimes.
    ///
    /// # Arguments
    ///
    /// * `secret` - The shared signing secret
    pub fn with_secret(secret: impl Into<String>) -> AuthResult<Self> {
        let config = AuthConfig {
            secret: Some(secret.into()),
            ..Default::default()
        };
        Self::new(config)
    }

    /// Issue an access token for a subject.
    ///
    /// Deterministic given identical inputs and clock, except for the
    /// timestamps stamped at issuance.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The subject's unique identifier
    /// * `permissions` - Snapshot of the subject's permission codes
    /// * `is_super_user` - Super-user flag at issuance time
    ///
    /// # Returns
    ///
    /// The encoded token and its claims
    pub fn issue(
        &self,
        user_id: Uuid,
        permissions: Vec<String>,
        is_super_user: bool,
    ) -> AuthResult<IssuedToken> {
        let claims = AccessClaims::new(
            user_id,
            self.config.issuer.clone(),
            permissions,
            is_super_user,
            self.config.access_token_duration,
        );
        let token = self.encode_claims(&claims)?;

        Ok(IssuedToken { token, claims })
    }

    /// Encode existing claims into a signed token string.
    ///
    /// # Arguments
    ///
    /// * `claims` - Claims to encode
    pub fn encode_claims(&self, claims: &AccessClaims) -> AuthResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate and decode a token.
    ///
    /// Verifies the signature, expiry, and issuer. Expired tokens are
    /// reported distinctly from malformed or tampered ones.
    ///
    /// # Arguments
    ///
    /// * `token` - The JWT token string
    ///
    /// # Returns
    ///
    /// Decoded claims if valid
    pub fn decode(&self, token: &str) -> AuthResult<AccessClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data: TokenData<AccessClaims> = decode(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidToken => {
                    AuthError::InvalidToken("Malformed token".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AuthError::InvalidToken("Invalid signature".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                    AuthError::InvalidToken("Invalid issuer".to_string())
                }
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Access-token lifetime as configured.
    pub fn access_token_duration(&self) -> Duration {
        self.config.access_token_duration
    }

    /// Get the configuration.
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }
}
