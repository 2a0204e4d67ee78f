//! User-scoped parcel listing

use axum::extract::State;
use axum::Extension;

use crate::domain::Principal;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedPath};
use crate::interfaces::http::modules::parcels::{ParcelDto, ParcelHandlerState};

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/parcels",
    tag = "Users",
    params(("id" = i64, Path, description = "Owner user id")),
    responses(
        (status = 200, description = "Parcels placed by the user", body = ApiResponse<ParcelDto>),
        (status = 401, description = "Caller is neither the user nor an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_user_parcels(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(user_id): ValidatedPath<i64>,
) -> ApiResult<ApiResponse<ParcelDto>> {
    let parcels = state.parcel_service.list_for_user(&caller, user_id).await?;
    Ok(ApiResponse::ok(parcels.into_iter().map(ParcelDto::from).collect()))
}
