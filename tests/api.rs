//! End-to-end tests: the full router over an in-memory, migrated SQLite
//! database.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use sendit::application::{AdminBootstrap, AuthService, ParcelService};
use sendit::domain::RepositoryProvider;
use sendit::infrastructure::crypto::jwt::{JwtConfig, TokenService};
use sendit::infrastructure::database::repositories::SeaOrmRepositoryProvider;
use sendit::{create_api_router, init_database, run_migrations, ApiContext, DatabaseConfig};

const ADMIN_PASSWORD: &str = "admin-pass";

async fn app() -> Router {
    let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&db).await.unwrap();

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let tokens = TokenService::new(JwtConfig::new("integration-secret", 60_000));
    let auth_service = Arc::new(AuthService::new(repos.clone(), tokens).with_password_cost(4));
    auth_service
        .ensure_admin(AdminBootstrap {
            first_name: "Root".into(),
            last_name: "Admin".into(),
            username: "admin".into(),
            email: "admin@sendit.test".into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();

    create_api_router(ApiContext {
        db,
        auth_service,
        parcel_service: Arc::new(ParcelService::new(repos)),
        metrics: None,
        started_at: Arc::new(Instant::now()),
    })
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().call(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        location,
        body,
    }
}

fn signup_body(username: &str) -> Value {
    json!({
        "first_name": "Ada",
        "last_name": "Obi",
        "email": format!("{}@example.com", username),
        "username": username,
        "password": "secret1"
    })
}

fn address(city: &str) -> Value {
    json!({
        "street_number": 12,
        "street_name": "Marina Road",
        "city": city,
        "state": "Lagos",
        "country": "Nigeria"
    })
}

fn parcel_body() -> Value {
    json!({
        "weight": 2.5,
        "weight_metric": "KG",
        "from": address("Ikeja"),
        "to": address("Lekki"),
        "current_location": address("Ikeja")
    })
}

/// Sign up `username` and return (user id, token).
async fn signup(app: &Router, username: &str) -> (i64, String) {
    let reply = send(app, Method::POST, "/api/v1/auth/signup", None, Some(signup_body(username))).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    let data = &reply.body["data"][0];
    (
        data["user"]["id"].as_i64().unwrap(),
        data["token"].as_str().unwrap().to_string(),
    )
}

async fn admin_token(app: &Router) -> String {
    let reply = send(
        app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username_or_email": "admin", "password": ADMIN_PASSWORD })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK, "{}", reply.body);
    reply.body["data"][0]["token"].as_str().unwrap().to_string()
}

async fn place_parcel(app: &Router, token: &str) -> i64 {
    let reply = send(app, Method::POST, "/api/v1/parcels", Some(token), Some(parcel_body())).await;
    assert_eq!(reply.status, StatusCode::CREATED, "{}", reply.body);
    reply.body["data"][0]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn signup_returns_token_and_location() {
    let app = app().await;
    let reply = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(signup_body("ada"))).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.location.as_deref(), Some("/api/v1/users/ada"));
    assert_eq!(reply.body["status"], 201);
    let data = &reply.body["data"][0];
    assert!(data["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(data["user"]["username"], "ada");
    assert_eq!(data["user"]["is_admin"], false);
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let app = app().await;
    signup(&app, "ada").await;

    let mut same_username = signup_body("ada");
    same_username["email"] = json!("other@example.com");
    let reply = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(same_username)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["status"], 400);
    assert_eq!(reply.body["error"], "email or user name is taken");

    // the rejected account was never stored
    let login = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username_or_email": "other@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_signup_lists_fields() {
    let app = app().await;
    let mut body = signup_body("ada");
    body["username"] = json!("ab");

    let reply = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(body)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body["error"].as_str().unwrap().contains("username"));
}

#[tokio::test]
async fn whitespace_credentials_are_rejected() {
    let app = app().await;
    let mut body = signup_body("ada");
    body["username"] = json!("   ");
    body["password"] = json!("     ");

    let reply = send(&app, Method::POST, "/api/v1/auth/signup", None, Some(body)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    let error = reply.body["error"].as_str().unwrap();
    assert!(error.contains("username must not be blank"), "{}", error);
    assert!(error.contains("password must not be blank"), "{}", error);
}

#[tokio::test]
async fn login_by_email_and_bad_password() {
    let app = app().await;
    signup(&app, "ada").await;

    let ok = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username_or_email": "ada@example.com", "password": "secret1" })),
    )
    .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"][0]["user"]["username"], "ada");

    let bad = send(
        &app,
        Method::POST,
        "/api/v1/auth/login",
        None,
        Some(json!({ "username_or_email": "ada", "password": "wrong-pass" })),
    )
    .await;
    assert_eq!(bad.status, StatusCode::UNAUTHORIZED);
    assert_eq!(bad.body["status"], 401);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = app().await;

    let missing = send(&app, Method::GET, "/api/v1/parcels/1", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        missing.body["error"],
        "Full authentication is required to access this resource"
    );

    let garbage = send(&app, Method::GET, "/api/v1/parcels/1", Some("not.a.jwt"), None).await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn non_numeric_ids_are_enveloped() {
    let app = app().await;
    let (_, token) = signup(&app, "ada").await;

    for uri in ["/api/v1/parcels/abc", "/api/v1/users/abc/parcels"] {
        let reply = send(&app, Method::GET, uri, Some(&token), None).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(reply.body["status"], 400);
        assert!(reply.body["error"].as_str().unwrap().contains("abc"));
    }

    let cancel = send(&app, Method::PATCH, "/api/v1/parcels/abc/cancel", Some(&token), None).await;
    assert_eq!(cancel.status, StatusCode::BAD_REQUEST);
    assert_eq!(cancel.body["status"], 400);
}

#[tokio::test]
async fn create_and_view_own_parcel() {
    let app = app().await;
    let (user_id, token) = signup(&app, "ada").await;

    let reply = send(&app, Method::POST, "/api/v1/parcels", Some(&token), Some(parcel_body())).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let id = reply.body["data"][0]["id"].as_i64().unwrap();
    assert_eq!(reply.body["data"][0]["message"], "order created");
    assert_eq!(reply.location, Some(format!("/api/v1/parcels/{}", id)));

    let view = send(&app, Method::GET, &format!("/api/v1/parcels/{}", id), Some(&token), None).await;
    assert_eq!(view.status, StatusCode::OK);
    let parcel = &view.body["data"][0];
    assert_eq!(parcel["placed_by"], user_id);
    assert_eq!(parcel["status"], "PLACED");
    assert_eq!(parcel["to"], "12 Marina Road, Lekki, Lagos, Nigeria");

    let mine = send(&app, Method::GET, &format!("/api/v1/users/{}/parcels", user_id), Some(&token), None).await;
    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn cancel_succeeds_once() {
    let app = app().await;
    let (_, token) = signup(&app, "ada").await;
    let id = place_parcel(&app, &token).await;
    let uri = format!("/api/v1/parcels/{}/cancel", id);

    let first = send(&app, Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"][0]["message"], "order cancelled");

    let second = send(&app, Method::PATCH, &uri, Some(&token), None).await;
    assert_eq!(second.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delivered_parcel_cannot_be_cancelled_or_redirected() {
    let app = app().await;
    let (_, token) = signup(&app, "ada").await;
    let admin = admin_token(&app).await;
    let id = place_parcel(&app, &token).await;

    let delivered = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/status", id),
        Some(&admin),
        Some(json!({ "new_status": "DELIVERED" })),
    )
    .await;
    assert_eq!(delivered.status, StatusCode::OK);

    let cancel = send(&app, Method::PATCH, &format!("/api/v1/parcels/{}/cancel", id), Some(&token), None).await;
    assert_eq!(cancel.status, StatusCode::NOT_FOUND);

    let redirect = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/destination", id),
        Some(&token),
        Some(address("Yaba")),
    )
    .await;
    assert_eq!(redirect.status, StatusCode::NOT_FOUND);

    let view = send(&app, Method::GET, &format!("/api/v1/parcels/{}", id), Some(&token), None).await;
    assert_eq!(view.body["data"][0]["status"], "DELIVERED");
    assert!(view.body["data"][0]["delivered_on"].is_string());
}

#[tokio::test]
async fn owner_changes_destination() {
    let app = app().await;
    let (_, token) = signup(&app, "ada").await;
    let id = place_parcel(&app, &token).await;

    let reply = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/destination", id),
        Some(&token),
        Some(address("Yaba")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["data"][0]["message"], "Parcel destination updated");
    assert_eq!(reply.body["data"][0]["to"], "12 Marina Road, Yaba, Lagos, Nigeria");
}

#[tokio::test]
async fn other_users_parcels_are_hidden() {
    let app = app().await;
    let (owner_id, owner) = signup(&app, "ada").await;
    let (_, other) = signup(&app, "bayo").await;
    let id = place_parcel(&app, &owner).await;

    let view = send(&app, Method::GET, &format!("/api/v1/parcels/{}", id), Some(&other), None).await;
    assert_eq!(view.status, StatusCode::NOT_FOUND);

    let redirect = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/destination", id),
        Some(&other),
        Some(address("Yaba")),
    )
    .await;
    assert_eq!(redirect.status, StatusCode::NOT_FOUND);

    let cancel = send(&app, Method::PATCH, &format!("/api/v1/parcels/{}/cancel", id), Some(&other), None).await;
    assert_eq!(cancel.status, StatusCode::NOT_FOUND);

    let list = send(&app, Method::GET, &format!("/api/v1/users/{}/parcels", owner_id), Some(&other), None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);
    assert_eq!(list.body["error"], "You can only view your parcel delivery orders");
}

#[tokio::test]
async fn admin_moves_parcel_through_lifecycle() {
    let app = app().await;
    let (user_id, token) = signup(&app, "ada").await;
    let admin = admin_token(&app).await;
    let id = place_parcel(&app, &token).await;

    let status = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/status", id),
        Some(&admin),
        Some(json!({ "new_status": "TRANSITING" })),
    )
    .await;
    assert_eq!(status.status, StatusCode::OK);
    let data = &status.body["data"][0];
    assert_eq!(data["id"], id);
    assert_eq!(data["message"], "Parcel status updated");
    assert_eq!(data["status"], "TRANSITING");

    let location = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/currentLocation", id),
        Some(&admin),
        Some(address("Surulere")),
    )
    .await;
    assert_eq!(location.status, StatusCode::OK);
    assert_eq!(location.body["data"][0]["message"], "Parcel location updated");

    let all = send(&app, Method::GET, "/api/v1/parcels", Some(&admin), None).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body["data"].as_array().unwrap().len(), 1);

    let theirs = send(&app, Method::GET, &format!("/api/v1/users/{}/parcels", user_id), Some(&admin), None).await;
    assert_eq!(theirs.status, StatusCode::OK);
    assert!(theirs.body["data"][0]["sent_on"].is_string());
}

#[tokio::test]
async fn admin_operations_on_missing_parcel_are_not_found() {
    let app = app().await;
    let admin = admin_token(&app).await;

    let reply = send(
        &app,
        Method::PATCH,
        "/api/v1/parcels/999/status",
        Some(&admin),
        Some(json!({ "new_status": "TRANSITING" })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["error"], "Couldn't change status of parcel with id 999");
}

#[tokio::test]
async fn users_cannot_use_admin_operations() {
    let app = app().await;
    let (_, token) = signup(&app, "ada").await;
    let id = place_parcel(&app, &token).await;

    let list = send(&app, Method::GET, "/api/v1/parcels", Some(&token), None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);

    let status = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/parcels/{}/status", id),
        Some(&token),
        Some(json!({ "new_status": "DELIVERED" })),
    )
    .await;
    assert_eq!(status.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_fallback() {
    let app = app().await;

    let health = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["database"]["status"], "ok");

    let missing = send(&app, Method::GET, "/nope", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["status"], 404);
}
