//! Application layer: use-case orchestration over the domain

pub mod identity;
pub mod parcels;

pub use identity::{AdminBootstrap, AuthResult, AuthService, SignUp};
pub use parcels::{ParcelModified, ParcelService, PlaceParcel};
