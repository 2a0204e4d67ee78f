use async_trait::async_trait;

use super::{NewUser, Role, RoleName, User};
use crate::shared::DomainResult;

/// Conflict message for a duplicate username or email
pub const USER_TAKEN: &str = "email or user name is taken";

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert the user and its role grants in one transaction.
    ///
    /// A unique violation on username or email yields `DomainError::Conflict`.
    async fn create(&self, user: NewUser, roles: &[Role]) -> DomainResult<User>;

    /// Match `value` against both username and email.
    async fn find_by_username_or_email(&self, value: &str) -> DomainResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Whether at least one user holds `role`.
    async fn any_with_role(&self, role: RoleName) -> DomainResult<bool>;
}

#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>>;
}
