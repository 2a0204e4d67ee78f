pub mod access;
pub mod parcel;
pub mod repositories;
pub mod user;

pub use access::{AccessDecision, ParcelAction, Principal, RowScope};
pub use parcel::{Address, NewParcel, Parcel, ParcelStatus, ParcelUpdate, WeightMetric};
pub use repositories::RepositoryProvider;
pub use user::{NewUser, Role, RoleName, User};

pub use crate::shared::errors::{DomainError, DomainResult};
