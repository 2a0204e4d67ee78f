//! Parcels module: delivery orders and their lifecycle

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
