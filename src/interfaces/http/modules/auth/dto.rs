//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{AuthResult, SignUp};
use crate::interfaces::http::modules::users::UserDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignUpRequest {
    #[validate(
        custom(function = "crate::interfaces::http::common::validators::not_blank"),
        length(max = 40, message = "size must be at most 40")
    )]
    pub first_name: String,
    #[validate(
        custom(function = "crate::interfaces::http::common::validators::not_blank"),
        length(max = 40, message = "size must be at most 40")
    )]
    pub last_name: String,
    #[validate(length(max = 40, message = "size must be at most 40"))]
    pub other_names: Option<String>,
    #[validate(
        custom(function = "crate::interfaces::http::common::validators::not_blank"),
        email(message = "must be a well-formed email address"),
        length(max = 40, message = "size must be at most 40")
    )]
    pub email: String,
    #[validate(
        custom(function = "crate::interfaces::http::common::validators::not_blank"),
        length(min = 3, max = 15, message = "size must be between 3 and 15")
    )]
    pub username: String,
    #[validate(
        custom(function = "crate::interfaces::http::common::validators::not_blank"),
        length(min = 5, max = 20, message = "size must be between 5 and 20")
    )]
    pub password: String,
}

impl From<SignUpRequest> for SignUp {
    fn from(r: SignUpRequest) -> Self {
        Self {
            first_name: r.first_name.trim().to_string(),
            last_name: r.last_name.trim().to_string(),
            other_names: r.other_names.filter(|n| !n.trim().is_empty()),
            username: r.username,
            email: r.email,
            password: r.password,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[serde(alias = "username")]
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub username_or_email: String,
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in milliseconds
    pub expires_in: i64,
    pub user: UserDto,
}

impl From<AuthResult> for AuthResponse {
    fn from(r: AuthResult) -> Self {
        Self {
            token: r.token,
            token_type: r.token_type,
            expires_in: r.expires_in,
            user: UserDto::from(r.user),
        }
    }
}
