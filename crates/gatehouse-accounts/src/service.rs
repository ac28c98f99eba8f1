//! Account service
//!
//! Business logic for login, account and role management, and startup
//! seeding. The service consults the credential store for identity and
//! role membership, the password hasher for verification, the token
//! issuer for claims, and the session store for the single-active-token
//! binding.

use std::sync::Arc;

use gatehouse_auth::{password, TokenIssuer};
use gatehouse_rbac::PermissionCode;
use gatehouse_session::SessionStore;
use uuid::Uuid;

use crate::authority::{update_authority, UpdateAuthority};
use crate::entities::{Permission, Role, User};
use crate::error::{AccountError, AccountResult};
use crate::requests::{CreateRoleRequest, CreateUserRequest, LoginRequest, UpdateUserRequest};
use crate::store::{CredentialStore, StoreError};

/// The one message every login failure collapses into.
///
/// Unknown account, wrong password, and inactive account are
/// indistinguishable to the caller, which prevents account enumeration.
const LOGIN_FAILED: &str = "username or password is incorrect";

/// Bootstrap super-user credentials, seeded idempotently at startup.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Given name of the bootstrap account
    pub first_name: String,

    /// Login name of the bootstrap account
    pub username: String,

    /// Initial password of the bootstrap account
    pub password: String,

    /// Email of the bootstrap account
    pub email: String,

    /// Contact number of the bootstrap account
    pub phone: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            first_name: "Admin".to_string(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            email: "admin@example.com".to_string(),
            phone: String::new(),
        }
    }
}

/// A successful login: the authenticated user, its bearer token, and the
/// token lifetime in seconds.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// The authenticated account, role graph included
    pub user: User,

    /// Signed bearer token
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Account service: login, user and role management, startup seeding.
///
/// Constructed once at startup from explicit collaborators; the service
/// holds no ambient global state and every request flows through the
/// same instance.
pub struct AccountService {
    store: Arc<dyn CredentialStore>,
    sessions: Arc<dyn SessionStore>,
    issuer: TokenIssuer,
    bootstrap: BootstrapConfig,
}

impl AccountService {
    /// Create a new account service.
    ///
    /// # Arguments
    ///
    /// * `store` - Credential store (relational collaborator)
    /// * `sessions` - Session store (key-value collaborator)
    /// * `issuer` - Token issuer with the shared signing secret
    /// * `bootstrap` - Bootstrap super-user credentials
    pub fn new(
        store: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
        issuer: TokenIssuer,
        bootstrap: BootstrapConfig,
    ) -> Self {
        Self {
            store,
            sessions,
            issuer,
            bootstrap,
        }
    }

    /// Seed the bootstrap super-user and the permission catalog.
    ///
    /// Safe to run on every process start: existing rows are success,
    /// not failure.
    pub async fn seed(&self) -> AccountResult<()> {
        self.seed_super_user().await?;
        self.seed_permissions().await
    }

    /// Create the bootstrap super-user if absent.
    pub async fn seed_super_user(&self) -> AccountResult<()> {
        if self
            .store
            .find_user_by_login(&self.bootstrap.username)
            .await?
            .is_some()
        {
            tracing::debug!(username = %self.bootstrap.username, "Bootstrap super-user already present");
            return Ok(());
        }

        let digest = password::hash_password(&self.bootstrap.password)
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        let admin = User::new(
            self.bootstrap.first_name.clone(),
            "Admin",
            self.bootstrap.username.clone(),
            self.bootstrap.email.clone(),
            digest,
        )
        .with_super_user(true)
        .with_phones(self.bootstrap.phone.clone(), None);

        match self.store.insert_user(&admin).await {
            Ok(()) => {
                tracing::info!(username = %admin.username, "Bootstrap super-user created");
                Ok(())
            }
            // A concurrent seeder won the race; the account exists either way.
            Err(StoreError::Conflict { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Seed the fixed permission catalog.
    pub async fn seed_permissions(&self) -> AccountResult<()> {
        let mut created = 0usize;
        for code in PermissionCode::all() {
            if self.store.find_permission_by_code(*code).await?.is_some() {
                continue;
            }
            self.store
                .insert_permission(&Permission::from_code(*code))
                .await?;
            created += 1;
        }

        tracing::info!(created, total = PermissionCode::all().len(), "Permission catalog seeded");
        Ok(())
    }

    /// Authenticate a user and issue its single active token.
    ///
    /// Looks the account up by username or email, verifies the password
    /// digest, and requires the account to be active. Any failure yields
    /// the same generic `Unauthorized`. On success the issued token
    /// replaces whatever binding the user had, invalidating older tokens
    /// even if they have not expired.
    ///
    /// # Arguments
    ///
    /// * `req` - Login credentials
    pub async fn login(&self, req: &LoginRequest) -> AccountResult<LoginGrant> {
        let Some(user) = self.store.find_user_by_login(&req.username).await? else {
            return Err(AccountError::Unauthorized(LOGIN_FAILED.to_string()));
        };
        if !password::verify_password(&user.password_hash, &req.password) {
            return Err(AccountError::Unauthorized(LOGIN_FAILED.to_string()));
        }
        if !user.is_active {
            return Err(AccountError::Unauthorized(LOGIN_FAILED.to_string()));
        }

        let permissions = user.permission_codes().to_vec();
        let issued = self.issuer.issue(user.id, permissions, user.is_super_user)?;

        let ttl = self
            .issuer
            .access_token_duration()
            .to_std()
            .map_err(|e| AccountError::Internal(format!("Invalid token lifetime: {}", e)))?;
        self.sessions.bind(user.id, &issued.token, ttl).await?;

        tracing::debug!(user_id = %user.id, "Login succeeded, session bound");
        Ok(LoginGrant {
            expires_in: issued.claims.lifetime_seconds(),
            token: issued.token,
            user,
        })
    }

    /// Create a user on behalf of `creator_id`.
    ///
    /// The creator must be a super-user or already hold every role being
    /// assigned (role-containment); creating a super-user additionally
    /// requires a super-user creator.
    ///
    /// # Arguments
    ///
    /// * `creator_id` - The acting account
    /// * `req` - The account to create
    pub async fn create_user(&self, creator_id: Uuid, req: &CreateUserRequest) -> AccountResult<User> {
        req.validate().map_err(AccountError::Validation)?;

        let creator = self.user_by_id_required(creator_id, "creator").await?;
        let roles = self.roles_by_ids_checked(&req.role_ids).await?;

        if req.is_super_user && !creator.is_super_user {
            return Err(AccountError::Forbidden(
                "only super-users may create super-users".to_string(),
            ));
        }
        if !creator.is_super_user && !creator.holds_all_roles(&roles) {
            return Err(AccountError::Forbidden(
                "creator does not hold all roles being assigned".to_string(),
            ));
        }

        let digest = password::hash_password(&req.password)
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        let user = User::new(
            req.first_name.clone(),
            req.last_name.clone(),
            req.username.clone(),
            req.email.clone(),
            digest,
        )
        .with_active(req.is_active)
        .with_super_user(req.is_super_user)
        .with_phones(req.phone_primary.clone(), req.phone_secondary.clone());

        self.store.insert_user(&user).await?;
        self.store.replace_user_roles(user.id, &roles).await?;

        tracing::info!(user_id = %user.id, creator_id = %creator.id, "User created");
        Ok(user.with_roles(roles))
    }

    /// Update a user on behalf of `editor_id`.
    ///
    /// Editors with full authority (super-user or `update_user`
    /// permission) may change any account, including roles, username,
    /// email, and super-user elevation. Everyone else may change only
    /// their own name, active flag, and contact fields; the privileged
    /// fields of the request are ignored for them.
    ///
    /// # Arguments
    ///
    /// * `editor_id` - The acting account
    /// * `target_id` - The account being changed
    /// * `req` - The changes
    pub async fn update_user(
        &self,
        editor_id: Uuid,
        target_id: Uuid,
        req: &UpdateUserRequest,
    ) -> AccountResult<User> {
        req.validate().map_err(AccountError::Validation)?;

        let target = self.user_by_id_required(target_id, "target user").await?;
        let editor = self.user_by_id_required(editor_id, "editor").await?;

        match update_authority(&editor) {
            UpdateAuthority::SelfOnly if editor.id != target.id => Err(AccountError::Forbidden(
                format!(
                    "editor '{}' does not have permission to update user '{}'",
                    editor.id, target.id
                ),
            )),
            UpdateAuthority::SelfOnly => self.apply_simple_update(target, req).await,
            UpdateAuthority::Full => self.apply_full_update(&editor, target, req).await,
        }
    }

    /// Apply the fields any account may change about itself.
    async fn apply_simple_update(&self, mut target: User, req: &UpdateUserRequest) -> AccountResult<User> {
        target.first_name = req.first_name.clone();
        target.last_name = req.last_name.clone();
        target.is_active = req.is_active;
        target.phone_primary = req.phone_primary.clone();
        target.phone_secondary = req.phone_secondary.clone();
        target.updated_at = chrono::Utc::now();

        self.store.update_user(&target).await?;
        Ok(target)
    }

    /// Apply a full update, including the privileged fields.
    async fn apply_full_update(
        &self,
        editor: &User,
        mut target: User,
        req: &UpdateUserRequest,
    ) -> AccountResult<User> {
        let new_roles = match &req.role_ids {
            Some(ids) => {
                let roles = self.roles_by_ids_checked(ids).await?;
                if !editor.is_super_user && !editor.holds_all_roles(&roles) {
                    return Err(AccountError::Forbidden(
                        "editor does not hold all roles being assigned".to_string(),
                    ));
                }
                Some(roles)
            }
            None => None,
        };

        if req.is_super_user && !target.is_super_user {
            if !editor.is_super_user {
                return Err(AccountError::Forbidden(
                    "only super-users may elevate accounts to super-user".to_string(),
                ));
            }
            target.is_super_user = true;
        }

        target.first_name = req.first_name.clone();
        target.last_name = req.last_name.clone();
        target.is_active = req.is_active;
        target.phone_primary = req.phone_primary.clone();
        target.phone_secondary = req.phone_secondary.clone();
        if let Some(username) = &req.username {
            target.username = username.clone();
        }
        if let Some(email) = &req.email {
            target.email = email.clone();
        }
        target.updated_at = chrono::Utc::now();

        self.store.update_user(&target).await?;
        if let Some(roles) = new_roles {
            self.store.replace_user_roles(target.id, &roles).await?;
            target.roles = roles;
        }

        tracing::info!(user_id = %target.id, editor_id = %editor.id, "User updated");
        Ok(target)
    }

    /// Create a role with the given permission grants.
    ///
    /// # Arguments
    ///
    /// * `req` - The role to create
    pub async fn create_role(&self, req: &CreateRoleRequest) -> AccountResult<Role> {
        req.validate().map_err(AccountError::Validation)?;

        let permissions = self.permissions_by_ids_checked(&req.permission_ids).await?;
        let role = Role::new(req.name.clone(), req.description.clone()).with_permissions(permissions);

        self.store.insert_role(&role).await?;

        tracing::info!(role_id = %role.id, name = %role.name, "Role created");
        Ok(role)
    }

    /// List all users with their role graphs.
    pub async fn list_users(&self) -> AccountResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    /// List all roles with their permission grants.
    pub async fn list_roles(&self) -> AccountResult<Vec<Role>> {
        Ok(self.store.list_roles().await?)
    }

    /// List the seeded permission catalog.
    pub async fn list_permissions(&self) -> AccountResult<Vec<Permission>> {
        Ok(self.store.list_permissions().await?)
    }

    async fn user_by_id_required(&self, id: Uuid, what: &str) -> AccountResult<User> {
        self.store
            .find_user_by_id(id)
            .await?
            .ok_or_else(|| AccountError::NotFound(format!("{} with id '{}' does not exist", what, id)))
    }

    /// Resolve roles by id, failing if any id does not resolve.
    async fn roles_by_ids_checked(&self, ids: &[Uuid]) -> AccountResult<Vec<Role>> {
        let roles = self.store.find_roles_by_ids(ids).await?;
        if roles.len() != ids.len() {
            return Err(AccountError::NotFound(
                "one or more of the requested roles do not exist".to_string(),
            ));
        }
        Ok(roles)
    }

    /// Resolve permissions by id, failing if any id does not resolve.
    async fn permissions_by_ids_checked(&self, ids: &[Uuid]) -> AccountResult<Vec<Permission>> {
        let permissions = self.store.find_permissions_by_ids(ids).await?;
        if permissions.len() != ids.len() {
            return Err(AccountError::NotFound(
                "one or more of the requested permissions do not exist".to_string(),
            ));
        }
        Ok(permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;
    use gatehouse_session::MemorySessionStore;

    fn test_service() -> (AccountService, Arc<MemoryCredentialStore>, Arc<MemorySessionStore>) {
        let store = Arc::new(MemoryCredentialStore::new());
        let sessions = Arc::new(MemorySessionStore::new());
        let issuer =
            TokenIssuer::with_secret("test-secret-key-for-jwt-signing-minimum-32-chars").unwrap();
        let service = AccountService::new(
            store.clone(),
            sessions.clone(),
            issuer,
            BootstrapConfig::default(),
        );
        (service, store, sessions)
    }

    fn create_request(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Test".into(),
            last_name: "User".into(),
            username: username.into(),
            email: format!("{}@example.com", username),
            password: "Sufficient-1!".into(),
            is_active: true,
            is_super_user: false,
            role_ids: vec![],
            phone_primary: String::new(),
            phone_secondary: None,
        }
    }

    fn update_request(first_name: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            first_name: first_name.into(),
            last_name: "User".into(),
            is_active: true,
            phone_primary: "555-0100".into(),
            phone_secondary: None,
            username: None,
            email: None,
            role_ids: None,
            is_super_user: false,
        }
    }

    async fn seeded_admin(service: &AccountService) -> User {
        service.seed().await.unwrap();
        service
            .store
            .find_user_by_login("admin")
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let (service, store, _) = test_service();

        service.seed().await.unwrap();
        service.seed().await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 1);
        assert!(users[0].is_super_user);

        let permissions = store.list_permissions().await.unwrap();
        assert_eq!(permissions.len(), PermissionCode::all().len());
    }

    #[tokio::test]
    async fn test_login_succeeds_for_active_account() {
        let (service, _, sessions) = test_service();
        let admin = seeded_admin(&service).await;

        let grant = service
            .login(&LoginRequest {
                username: "admin".into(),
                password: "admin".into(),
            })
            .await
            .unwrap();

        assert_eq!(grant.user.id, admin.id);
        assert!(grant.expires_in > 0);
        assert_eq!(
            sessions.active_token(admin.id).await.unwrap().as_deref(),
            Some(grant.token.as_str())
        );
    }

    #[tokio::test]
    async fn test_login_failures_share_one_message() {
        let (service, store, _) = test_service();
        let admin = seeded_admin(&service).await;

        let unknown = service
            .login(&LoginRequest {
                username: "nobody".into(),
                password: "admin".into(),
            })
            .await
            .unwrap_err();
        let wrong_password = service
            .login(&LoginRequest {
                username: "admin".into(),
                password: "not-admin".into(),
            })
            .await
            .unwrap_err();

        let mut inactive_admin = admin;
        inactive_admin.is_active = false;
        store.update_user(&inactive_admin).await.unwrap();
        let inactive = service
            .login(&LoginRequest {
                username: "admin".into(),
                password: "admin".into(),
            })
            .await
            .unwrap_err();

        for err in [unknown, wrong_password, inactive] {
            match err {
                AccountError::Unauthorized(msg) => assert_eq!(msg, LOGIN_FAILED),
                other => panic!("expected Unauthorized, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_relogin_rebinds_the_session() {
        let (service, _, sessions) = test_service();
        let admin = seeded_admin(&service).await;
        let login = LoginRequest {
            username: "admin".into(),
            password: "admin".into(),
        };

        let first = service.login(&login).await.unwrap();
        let second = service.login(&login).await.unwrap();

        let bound = sessions.active_token(admin.id).await.unwrap().unwrap();
        assert_eq!(bound, second.token);
        assert_ne!(bound, first.token);
    }

    #[tokio::test]
    async fn test_create_user_by_super_user() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let user = service
            .create_user(admin.id, &create_request("ada"))
            .await
            .unwrap();
        assert_eq!(user.username, "ada");
        assert!(!user.is_super_user);
    }

    #[tokio::test]
    async fn test_only_super_users_create_super_users() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let plain = service
            .create_user(admin.id, &create_request("plain"))
            .await
            .unwrap();

        let mut req = create_request("elevated");
        req.is_super_user = true;

        let err = service.create_user(plain.id, &req).await.unwrap_err();
        assert!(matches!(err, AccountError::Forbidden(_)));

        let created = service.create_user(admin.id, &req).await.unwrap();
        assert!(created.is_super_user);
    }

    #[tokio::test]
    async fn test_role_containment_on_create() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let role = service
            .create_role(&CreateRoleRequest {
                name: "support".into(),
                description: "support staff".into(),
                permission_ids: vec![],
            })
            .await
            .unwrap();

        let plain = service
            .create_user(admin.id, &create_request("plain"))
            .await
            .unwrap();

        let mut req = create_request("newcomer");
        req.role_ids = vec![role.id];

        // plain does not hold the role it is trying to assign
        let err = service.create_user(plain.id, &req).await.unwrap_err();
        assert!(matches!(err, AccountError::Forbidden(_)));

        // the super-user may assign any role
        let created = service.create_user(admin.id, &req).await.unwrap();
        assert_eq!(created.roles.len(), 1);
        assert_eq!(created.roles[0].id, role.id);
    }

    #[tokio::test]
    async fn test_create_user_with_unresolvable_role_id() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let mut req = create_request("ada");
        req.role_ids = vec![Uuid::now_v7()];

        let err = service.create_user(admin.id, &req).await.unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_simple_editor_cannot_update_others() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let plain = service
            .create_user(admin.id, &create_request("plain"))
            .await
            .unwrap();

        let err = service
            .update_user(plain.id, admin.id, &update_request("Renamed"))
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_simple_self_update_ignores_privileged_fields() {
        let (service, store, _) = test_service();
        let admin = seeded_admin(&service).await;

        let role = service
            .create_role(&CreateRoleRequest {
                name: "support".into(),
                description: String::new(),
                permission_ids: vec![],
            })
            .await
            .unwrap();
        let plain = service
            .create_user(admin.id, &create_request("plain"))
            .await
            .unwrap();

        let mut req = update_request("Renamed");
        req.role_ids = Some(vec![role.id]);
        req.is_super_user = true;
        req.username = Some("hijacked".into());

        let updated = service.update_user(plain.id, plain.id, &req).await.unwrap();

        assert_eq!(updated.first_name, "Renamed");
        assert_eq!(updated.phone_primary, "555-0100");
        // privileged fields are ignored for self-only editors
        assert_eq!(updated.username, "plain");
        assert!(!updated.is_super_user);
        assert!(store
            .find_user_by_id(plain.id)
            .await
            .unwrap()
            .unwrap()
            .roles
            .is_empty());
    }

    #[tokio::test]
    async fn test_full_update_requires_role_containment() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let support = service
            .create_role(&CreateRoleRequest {
                name: "support".into(),
                description: String::new(),
                permission_ids: vec![],
            })
            .await
            .unwrap();

        // an editor holding update_user but not the support role
        let manager_role = {
            let permissions = service.list_permissions().await.unwrap();
            let update_user_perm = permissions
                .iter()
                .find(|p| p.code == PermissionCode::UpdateUser)
                .unwrap();
            service
                .create_role(&CreateRoleRequest {
                    name: "managers".into(),
                    description: String::new(),
                    permission_ids: vec![update_user_perm.id],
                })
                .await
                .unwrap()
        };

        let mut manager_req = create_request("manager");
        manager_req.role_ids = vec![manager_role.id];
        let manager = service.create_user(admin.id, &manager_req).await.unwrap();

        let target = service
            .create_user(admin.id, &create_request("target"))
            .await
            .unwrap();

        let mut req = update_request("Target");
        req.role_ids = Some(vec![support.id]);

        let err = service
            .update_user(manager.id, target.id, &req)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Forbidden(_)));

        // the same update from the super-user succeeds
        let updated = service.update_user(admin.id, target.id, &req).await.unwrap();
        assert_eq!(updated.roles.len(), 1);
    }

    #[tokio::test]
    async fn test_elevation_requires_super_user_editor() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let manager_role = {
            let permissions = service.list_permissions().await.unwrap();
            let update_user_perm = permissions
                .iter()
                .find(|p| p.code == PermissionCode::UpdateUser)
                .unwrap();
            service
                .create_role(&CreateRoleRequest {
                    name: "managers".into(),
                    description: String::new(),
                    permission_ids: vec![update_user_perm.id],
                })
                .await
                .unwrap()
        };

        let mut manager_req = create_request("manager");
        manager_req.role_ids = vec![manager_role.id];
        let manager = service.create_user(admin.id, &manager_req).await.unwrap();

        let target = service
            .create_user(admin.id, &create_request("target"))
            .await
            .unwrap();

        let mut req = update_request("Target");
        req.is_super_user = true;

        let err = service
            .update_user(manager.id, target.id, &req)
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::Forbidden(_)));

        let updated = service.update_user(admin.id, target.id, &req).await.unwrap();
        assert!(updated.is_super_user);
    }

    #[tokio::test]
    async fn test_create_role_with_unresolvable_permission_id() {
        let (service, _, _) = test_service();
        seeded_admin(&service).await;

        let err = service
            .create_role(&CreateRoleRequest {
                name: "broken".into(),
                description: String::new(),
                permission_ids: vec![Uuid::now_v7()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccountError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_weak_password_reports_field_violations() {
        let (service, _, _) = test_service();
        let admin = seeded_admin(&service).await;

        let mut req = create_request("ada");
        req.password = "weak".into();

        let err = service.create_user(admin.id, &req).await.unwrap_err();
        let fields = err.validation_fields().unwrap();
        assert!(fields.contains_key("uppercase"));
        assert!(fields.contains_key("symbol"));
    }
}
