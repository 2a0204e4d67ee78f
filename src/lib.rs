//! # SendIT
//!
//! Parcel delivery tracking REST API: users place delivery orders and follow
//! them; administrators move parcels through their lifecycle.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Users, parcels, the parcel lifecycle and access rules
//! - **application**: Identity and parcel use cases
//! - **infrastructure**: JWT/bcrypt, SeaORM persistence, in-memory storage
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: Startup wiring and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext};
