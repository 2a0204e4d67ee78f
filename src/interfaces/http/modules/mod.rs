pub mod auth;
pub mod health;
pub mod metrics;
pub mod parcels;
pub mod request_id;
pub mod users;
