//! Users module: profile DTO and per-user parcel listing

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
