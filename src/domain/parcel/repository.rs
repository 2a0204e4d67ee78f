//! Parcel repository interface

use async_trait::async_trait;

use super::lifecycle::ParcelUpdate;
use super::model::{NewParcel, Parcel};
use crate::domain::access::RowScope;
use crate::shared::DomainResult;

#[async_trait]
pub trait ParcelRepository: Send + Sync {
    /// Persist a new parcel in `PLACED` state
    async fn create(&self, parcel: NewParcel) -> DomainResult<Parcel>;

    async fn find_all(&self) -> DomainResult<Vec<Parcel>>;

    /// Find a parcel by id, restricted to rows admitted by `scope`
    async fn find_one(&self, id: i64, scope: RowScope) -> DomainResult<Option<Parcel>>;

    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Parcel>>;

    /// Execute `update` as a single conditioned write.
    /// Returns the number of rows changed (0 or 1).
    async fn apply(&self, update: &ParcelUpdate) -> DomainResult<u64>;
}
