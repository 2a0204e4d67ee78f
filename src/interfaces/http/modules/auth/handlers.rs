//! Authentication API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use super::dto::{AuthResponse, LoginRequest, SignUpRequest};
use crate::application::AuthService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson};

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub auth_service: Arc<AuthService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid input, or email/username already taken")
    )
)]
pub async fn signup(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<SignUpRequest>,
) -> ApiResult<impl IntoResponse> {
    let result = state.auth_service.signup(request.into()).await?;
    let location = format!("/api/v1/users/{}", result.user.username);

    Ok((
        [(header::LOCATION, location)],
        ApiResponse::created(vec![AuthResponse::from(result)]),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<ApiResponse<AuthResponse>> {
    let result = state
        .auth_service
        .login(&request.username_or_email, &request.password)
        .await?;

    Ok(ApiResponse::ok(vec![AuthResponse::from(result)]))
}
