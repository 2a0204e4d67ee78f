//! Parcel aggregate
//!
//! Contains the Parcel entity, its lifecycle rules, and repository interface.

pub mod lifecycle;
pub mod model;
pub mod repository;

pub use lifecycle::{LifecycleOperation, ParcelChange, ParcelUpdate};
pub use model::{Address, NewParcel, Parcel, ParcelStatus, WeightMetric};
pub use repository::ParcelRepository;
