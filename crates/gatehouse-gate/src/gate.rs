//! Authorization gate
//!
//! The per-request check sequence: extract the bearer token, verify its
//! signature and expiry, confirm it is the subject's single active
//! session, and enforce the endpoint's required permissions. The gate is
//! read-only and terminal on first failure; it performs no retries and
//! every rejection surfaces to the caller as HTTP 401.

use std::sync::Arc;

use gatehouse_auth::{AccessClaims, AuthError, TokenIssuer};
use gatehouse_rbac::PermissionCode;
use gatehouse_session::{SessionError, SessionStore};
use thiserror::Error;

/// Gate rejection reasons.
///
/// Every variant maps to HTTP 401: the distinctions exist for logs and
/// clients' error bodies, not for status codes. A failing session store
/// also rejects the request rather than letting an unverifiable token
/// through.
#[derive(Debug, Error)]
pub enum GateError {
    /// The Authorization header is missing or lacks the `Bearer ` prefix
    #[error("missing bearer token")]
    MissingBearer,

    /// The token failed signature or shape verification
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token's expiry has passed
    #[error("token has expired")]
    TokenExpired,

    /// No session binding exists for the subject
    #[error("key does not exist")]
    NoActiveSession,

    /// A binding exists but holds a different token
    #[error("token does not match active session")]
    SessionMismatch,

    /// The token grants none of the required permissions
    #[error("insufficient permissions")]
    InsufficientPermissions,

    /// The session store could not answer
    #[error("session store unavailable: {0}")]
    StoreUnavailable(String),
}

impl GateError {
    /// Get HTTP status code for this error. Always 401.
    pub fn status_code(&self) -> u16 {
        401
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            GateError::MissingBearer => "MISSING_BEARER",
            GateError::InvalidToken(_) => "INVALID_TOKEN",
            GateError::TokenExpired => "TOKEN_EXPIRED",
            GateError::NoActiveSession => "NO_ACTIVE_SESSION",
            GateError::SessionMismatch => "SESSION_MISMATCH",
            GateError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            GateError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

impl From<AuthError> for GateError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => GateError::TokenExpired,
            other => GateError::InvalidToken(other.to_string()),
        }
    }
}

impl From<SessionError> for GateError {
    fn from(err: SessionError) -> Self {
        GateError::StoreUnavailable(err.to_string())
    }
}

/// Result type for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Strip the mandatory `Bearer ` prefix from an Authorization header.
fn strip_bearer(header: &str) -> Option<&str> {
    header.strip_prefix("Bearer ").filter(|token| !token.is_empty())
}

/// Per-request token verifier and permission enforcer.
///
/// One gate is constructed at startup and shared across requests;
/// requests are independent and may run it concurrently, since all
/// shared state lives in the session store.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use gatehouse_auth::TokenIssuer;
/// use gatehouse_gate::AuthorizationGate;
/// use gatehouse_rbac::PermissionCode;
/// use gatehouse_session::MemorySessionStore;
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let gate = AuthorizationGate::new(
///         Arc::new(TokenIssuer::with_secret("a-shared-secret-of-reasonable-length")?),
///         Arc::new(MemorySessionStore::new()),
///     );
///
///     let guard = gate.require(&[PermissionCode::CreateUser]);
///     let claims = guard.check(Some("Bearer eyJ...")).await?;
///     println!("authorized: {}", claims.sub);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AuthorizationGate {
    issuer: Arc<TokenIssuer>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthorizationGate {
    /// Create a new gate.
    ///
    /// # Arguments
    ///
    /// * `issuer` - Verifier holding the shared signing secret
    /// * `sessions` - The session store bindings are checked against
    pub fn new(issuer: Arc<TokenIssuer>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { issuer, sessions }
    }

    /// Run the full check sequence for one request.
    ///
    /// Terminal on first failure:
    /// 1. extract the bearer token from the Authorization header;
    /// 2. verify signature, expiry, and issuer;
    /// 3. confirm the token is the subject's single active session,
    ///    byte-for-byte;
    /// 4. allow if the subject is a super-user or `required` is empty,
    ///    otherwise require at least one of `required` (logical OR).
    ///
    /// # Arguments
    ///
    /// * `authorization` - The Authorization header, if present
    /// * `required` - Permission codes the endpoint accepts
    ///
    /// # Returns
    ///
    /// The verified claims for the downstream handler
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &[PermissionCode],
    ) -> GateResult<AccessClaims> {
        let token = authorization
            .and_then(strip_bearer)
            .ok_or(GateError::MissingBearer)?;

        let claims = self.issuer.decode(token)?;
        let user_id = claims
            .user_id()
            .ok_or_else(|| GateError::InvalidToken("malformed subject".to_string()))?;

        let Some(bound) = self.sessions.active_token(user_id).await? else {
            tracing::debug!(user_id = %user_id, "Rejected token without session binding");
            return Err(GateError::NoActiveSession);
        };
        if bound != token {
            tracing::debug!(user_id = %user_id, "Rejected token superseded by a newer session");
            return Err(GateError::SessionMismatch);
        }

        if claims.is_super_user || required.is_empty() {
            return Ok(claims);
        }

        if claims.permission_set().contains_any(required) {
            Ok(claims)
        } else {
            tracing::debug!(user_id = %user_id, "Rejected token lacking required permissions");
            Err(GateError::InsufficientPermissions)
        }
    }

    /// Build a reusable guard for an endpoint's required permissions.
    ///
    /// The routing layer attaches one guard per route; each request then
    /// costs one `check` call.
    ///
    /// # Arguments
    ///
    /// * `required` - Permission codes the endpoint accepts (logical OR);
    ///   empty means any authenticated session
    pub fn require(&self, required: &[PermissionCode]) -> RouteGuard {
        RouteGuard {
            gate: self.clone(),
            required: required.to_vec(),
        }
    }
}

impl std::fmt::Debug for AuthorizationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthorizationGate")
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}

/// A gate bound to one endpoint's permission requirements.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    gate: AuthorizationGate,
    required: Vec<PermissionCode>,
}

impl RouteGuard {
    /// Check one request's Authorization header.
    ///
    /// # Arguments
    ///
    /// * `authorization` - The Authorization header, if present
    pub async fn check(&self, authorization: Option<&str>) -> GateResult<AccessClaims> {
        self.gate.authorize(authorization, &self.required).await
    }

    /// The permission codes this guard enforces.
    pub fn required(&self) -> &[PermissionCode] {
        &self.required
    }
}
