//! Parcel API handlers

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;

use super::dto::{
    AddressDto, ParcelDeliveryRequest, ParcelDto, ParcelModifiedDto, ParcelStatusRequest,
};
use crate::application::ParcelService;
use crate::domain::Principal;
use crate::interfaces::http::common::{ApiResponse, ApiResult, ValidatedJson, ValidatedPath};

#[derive(Clone)]
pub struct ParcelHandlerState {
    pub parcel_service: Arc<ParcelService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/parcels",
    tag = "Parcels",
    request_body = ParcelDeliveryRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<ParcelModifiedDto>),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_parcel(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedJson(request): ValidatedJson<ParcelDeliveryRequest>,
) -> ApiResult<impl IntoResponse> {
    let created = state.parcel_service.create(&caller, request.into()).await?;
    let location = format!("/api/v1/parcels/{}", created.id);

    Ok((
        [(header::LOCATION, location)],
        ApiResponse::created(vec![ParcelModifiedDto::from(created)]),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/parcels",
    tag = "Parcels",
    responses(
        (status = 200, description = "All parcels", body = ApiResponse<ParcelDto>),
        (status = 401, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_parcels(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
) -> ApiResult<ApiResponse<ParcelDto>> {
    let parcels = state.parcel_service.list_all(&caller).await?;
    Ok(ApiResponse::ok(parcels.into_iter().map(ParcelDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/parcels/{id}",
    tag = "Parcels",
    params(("id" = i64, Path, description = "Parcel id")),
    responses(
        (status = 200, description = "Parcel found", body = ApiResponse<ParcelDto>),
        (status = 404, description = "No such parcel visible to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_parcel(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> ApiResult<ApiResponse<ParcelDto>> {
    let parcel = state.parcel_service.get(&caller, id).await?;
    Ok(ApiResponse::ok(vec![ParcelDto::from(parcel)]))
}

#[utoipa::path(
    patch,
    path = "/api/v1/parcels/{id}/cancel",
    tag = "Parcels",
    params(("id" = i64, Path, description = "Parcel id")),
    responses(
        (status = 200, description = "Order cancelled", body = ApiResponse<ParcelModifiedDto>),
        (status = 404, description = "No cancellable parcel with this id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_parcel(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(id): ValidatedPath<i64>,
) -> ApiResult<ApiResponse<ParcelModifiedDto>> {
    let modified = state.parcel_service.cancel(&caller, id).await?;
    Ok(ApiResponse::ok(vec![modified.into()]))
}

#[utoipa::path(
    patch,
    path = "/api/v1/parcels/{id}/destination",
    tag = "Parcels",
    params(("id" = i64, Path, description = "Parcel id")),
    request_body = AddressDto,
    responses(
        (status = 200, description = "Destination changed", body = ApiResponse<ParcelModifiedDto>),
        (status = 404, description = "No undelivered parcel with this id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_destination(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(destination): ValidatedJson<AddressDto>,
) -> ApiResult<ApiResponse<ParcelModifiedDto>> {
    let modified = state
        .parcel_service
        .change_destination(&caller, id, destination.into())
        .await?;
    Ok(ApiResponse::ok(vec![modified.into()]))
}

#[utoipa::path(
    patch,
    path = "/api/v1/parcels/{id}/status",
    tag = "Parcels",
    params(("id" = i64, Path, description = "Parcel id")),
    request_body = ParcelStatusRequest,
    responses(
        (status = 200, description = "Status changed", body = ApiResponse<ParcelModifiedDto>),
        (status = 401, description = "Caller is not an admin"),
        (status = 404, description = "No parcel with this id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_status(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(request): ValidatedJson<ParcelStatusRequest>,
) -> ApiResult<ApiResponse<ParcelModifiedDto>> {
    let modified = state
        .parcel_service
        .change_status(&caller, id, request.new_status)
        .await?;
    Ok(ApiResponse::ok(vec![modified.into()]))
}

#[utoipa::path(
    patch,
    path = "/api/v1/parcels/{id}/currentLocation",
    tag = "Parcels",
    params(("id" = i64, Path, description = "Parcel id")),
    request_body = AddressDto,
    responses(
        (status = 200, description = "Current location changed", body = ApiResponse<ParcelModifiedDto>),
        (status = 401, description = "Caller is not an admin"),
        (status = 404, description = "No parcel with this id")
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_current_location(
    State(state): State<ParcelHandlerState>,
    Extension(caller): Extension<Principal>,
    ValidatedPath(id): ValidatedPath<i64>,
    ValidatedJson(location): ValidatedJson<AddressDto>,
) -> ApiResult<ApiResponse<ParcelModifiedDto>> {
    let modified = state
        .parcel_service
        .change_current_location(&caller, id, location.into())
        .await?;
    Ok(ApiResponse::ok(vec![modified.into()]))
}
