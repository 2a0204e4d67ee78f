//! User DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// User API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_names: Option<String>,
    pub username: String,
    pub email: String,
    /// Signup time
    pub registered: DateTime<Utc>,
    pub is_admin: bool,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        let is_admin = u.is_admin();
        Self {
            id: u.id,
            first_name: u.first_name,
            last_name: u.last_name,
            other_names: u.other_names,
            username: u.username,
            email: u.email,
            registered: u.created_at,
            is_admin,
        }
    }
}
