pub mod service;

pub use service::{ParcelModified, ParcelService, PlaceParcel};
