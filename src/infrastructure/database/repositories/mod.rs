//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod parcel_repository;
pub mod repository_provider;
pub mod user_repository;

pub use parcel_repository::SeaOrmParcelRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use user_repository::{SeaOrmRoleRepository, SeaOrmUserRepository};
