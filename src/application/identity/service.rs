//! Identity service: signup, login and per-request authentication
//!
//! HTTP handlers and the auth middleware are thin wrappers around this
//! service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::access::Principal;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{NewUser, Role, RoleName, User};
use crate::infrastructure::crypto::jwt::TokenService;
use crate::infrastructure::crypto::password::{hash_password, verify_password, DEFAULT_COST};
use crate::shared::{DomainError, DomainResult};

pub const INVALID_CREDENTIALS: &str = "Invalid username/email or password";
pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Account details submitted at signup
#[derive(Debug, Clone)]
pub struct SignUp {
    pub first_name: String,
    pub last_name: String,
    pub other_names: Option<String>,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Credentials of the administrator created at startup when none exists
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Authentication result returned after signup or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in milliseconds
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    tokens: TokenService,
    password_cost: u32,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, tokens: TokenService) -> Self {
        Self {
            repos,
            tokens,
            password_cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    pub fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    // ── Registration ────────────────────────────────────────────

    /// Create an account holding `ROLE_USER` and issue a token for it.
    pub async fn signup(&self, request: SignUp) -> DomainResult<AuthResult> {
        let role = self.required_role(RoleName::User).await?;
        let new_user = NewUser {
            first_name: request.first_name,
            last_name: request.last_name,
            other_names: request.other_names,
            username: request.username,
            email: request.email,
            password_hash: self.hash(&request.password)?,
        };

        let user = self.repos.users().create(new_user, &[role]).await?;
        info!("User {} signed up (id={})", user.username, user.id);
        self.issue_for(user)
    }

    // ── Authentication ──────────────────────────────────────────

    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(user) = self
            .repos
            .users()
            .find_by_username_or_email(username_or_email)
            .await?
        else {
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        let valid = match verify_password(password, &user.password_hash) {
            Ok(valid) => valid,
            Err(e) => {
                warn!("Stored password hash for user {} is unusable: {}", user.id, e);
                false
            }
        };
        if !valid {
            warn!("Failed login for {}", username_or_email);
            return Err(DomainError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        self.issue_for(user)
    }

    /// Resolve a bearer token to the caller it was issued for.
    pub async fn authenticate(&self, token: &str) -> DomainResult<Principal> {
        let user_id = self
            .tokens
            .verify(token)
            .map_err(|_| DomainError::Unauthorized(INVALID_TOKEN.into()))?;

        let user = self
            .repos
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| {
                warn!("Token subject {} does not match any user", user_id);
                DomainError::Unauthorized(INVALID_TOKEN.into())
            })?;

        Ok(Principal::from(&user))
    }

    // ── Bootstrap ───────────────────────────────────────────────

    /// Create the configured administrator unless some user already holds
    /// `ROLE_ADMIN`. Returns the created user.
    pub async fn ensure_admin(&self, admin: AdminBootstrap) -> DomainResult<Option<User>> {
        if self.repos.users().any_with_role(RoleName::Admin).await? {
            return Ok(None);
        }

        let roles = [
            self.required_role(RoleName::User).await?,
            self.required_role(RoleName::Admin).await?,
        ];
        let new_user = NewUser {
            first_name: admin.first_name,
            last_name: admin.last_name,
            other_names: None,
            username: admin.username,
            email: admin.email,
            password_hash: self.hash(&admin.password)?,
        };

        let user = self.repos.users().create(new_user, &roles).await?;
        Ok(Some(user))
    }

    // ── Helpers ─────────────────────────────────────────────────

    async fn required_role(&self, name: RoleName) -> DomainResult<Role> {
        self.repos
            .roles()
            .find_by_name(name)
            .await?
            .ok_or_else(|| DomainError::Configuration(format!("{} has not been set", name)))
    }

    fn hash(&self, password: &str) -> DomainResult<String> {
        hash_password(password, self.password_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn issue_for(&self, user: User) -> DomainResult<AuthResult> {
        let token = self
            .tokens
            .issue(user.id)
            .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.tokens.expiration_ms(),
            user,
        })
    }
}
