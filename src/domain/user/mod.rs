//! User aggregate
//!
//! Contains the User entity, its roles, and repository interfaces.

pub mod model;
pub mod repository;

pub use model::{NewUser, Role, RoleName, User};
pub use repository::{RoleRepository, UserRepository, USER_TAKEN};
