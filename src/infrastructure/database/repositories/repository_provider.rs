//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::parcel::ParcelRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{RoleRepository, UserRepository};

use super::parcel_repository::SeaOrmParcelRepository;
use super::user_repository::{SeaOrmRoleRepository, SeaOrmUserRepository};

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    roles: SeaOrmRoleRepository,
    parcels: SeaOrmParcelRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            roles: SeaOrmRoleRepository::new(db.clone()),
            parcels: SeaOrmParcelRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn roles(&self) -> &dyn RoleRepository {
        &self.roles
    }

    fn parcels(&self) -> &dyn ParcelRepository {
        &self.parcels
    }
}
