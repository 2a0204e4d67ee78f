//! Repository access for the domain layer

use super::parcel::ParcelRepository;
use super::user::{RoleRepository, UserRepository};

/// Provides access to all domain repositories.
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let user = repos.users().find_by_id(1).await?;
///     let parcels = repos.parcels().find_by_owner(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn roles(&self) -> &dyn RoleRepository;
    fn parcels(&self) -> &dyn ParcelRepository;
}
