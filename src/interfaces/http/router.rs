//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::StatusCode,
    middleware,
    response::Redirect,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::middleware::{auth_middleware, AuthState};
use super::modules::{auth, health, metrics, parcels, request_id, users};
use crate::application::{AuthService, ParcelService};
use crate::domain::{ParcelStatus, WeightMetric};

/// Everything the HTTP layer needs from the running service
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub auth_service: Arc<AuthService>,
    pub parcel_service: Arc<ParcelService>,
    /// `GET /metrics` is only mounted when a recorder handle is available
    pub metrics: Option<PrometheusHandle>,
    pub started_at: Arc<Instant>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by /api/v1/auth/signup or /login"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::signup,
        auth::login,
        parcels::create_parcel,
        parcels::list_parcels,
        parcels::get_parcel,
        parcels::cancel_parcel,
        parcels::change_destination,
        parcels::change_status,
        parcels::change_current_location,
        users::list_user_parcels,
    ),
    components(
        schemas(
            ApiResponse<String>,
            auth::SignUpRequest,
            auth::LoginRequest,
            auth::AuthResponse,
            users::UserDto,
            parcels::AddressDto,
            parcels::ParcelDeliveryRequest,
            parcels::ParcelStatusRequest,
            parcels::ParcelDto,
            parcels::ParcelModifiedDto,
            ParcelStatus,
            WeightMetric,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service and database health"),
        (name = "Authentication", description = "Signup and login (JWT)"),
        (name = "Parcels", description = "Parcel delivery orders and their lifecycle"),
        (name = "Users", description = "Per-user parcel listings"),
    ),
    info(
        title = "SendIT API",
        version = "1.0.0",
        description = "Parcel delivery tracking: place orders, follow them, and manage deliveries",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

async fn not_found() -> ApiResponse<()> {
    ApiResponse::error(StatusCode::NOT_FOUND, "Resource not found")
}

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let middleware_state = AuthState {
        auth_service: ctx.auth_service.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        auth_service: ctx.auth_service.clone(),
    };
    let parcel_state = parcels::ParcelHandlerState {
        parcel_service: ctx.parcel_service.clone(),
    };
    let health_state = health::HealthState {
        db: ctx.db.clone(),
        started_at: ctx.started_at.clone(),
    };

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .with_state(auth_state);

    // Parcel routes (protected)
    let parcel_routes = Router::new()
        .route("/", get(parcels::list_parcels).post(parcels::create_parcel))
        .route("/{id}", get(parcels::get_parcel))
        .route("/{id}/cancel", patch(parcels::cancel_parcel))
        .route("/{id}/destination", patch(parcels::change_destination))
        .route("/{id}/status", patch(parcels::change_status))
        .route("/{id}/currentLocation", patch(parcels::change_current_location))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(parcel_state.clone());

    // User routes (protected)
    let user_routes = Router::new()
        .route("/{id}/parcels", get(users::list_user_parcels))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ))
        .with_state(parcel_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(swagger_routes)
        .route("/", get(|| async { Redirect::temporary("/docs/") }))
        .merge(health_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/parcels", parcel_routes)
        .nest("/api/v1/users", user_routes);

    if let Some(handle) = ctx.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(metrics::MetricsState { handle }),
        );
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
