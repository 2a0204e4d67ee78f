//! In-memory repositories
//!
//! Backed by `DashMap`; used by service tests and for running without a
//! database. Conditioned parcel updates hold the row's shard lock for the
//! whole check-and-write.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::access::RowScope;
use crate::domain::parcel::{NewParcel, Parcel, ParcelRepository, ParcelStatus, ParcelUpdate};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::{
    NewUser, Role, RoleName, RoleRepository, User, UserRepository, USER_TAKEN,
};
use crate::shared::{DomainError, DomainResult};

pub struct InMemoryUserRepository {
    users: DashMap<i64, User>,
    counter: AtomicI64,
    create_lock: Mutex<()>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            counter: AtomicI64::new(1),
            create_lock: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser, roles: &[Role]) -> DomainResult<User> {
        let _guard = self
            .create_lock
            .lock()
            .map_err(|_| DomainError::Internal("user store lock poisoned".to_string()))?;

        let taken = self
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email);
        if taken {
            return Err(DomainError::Conflict(USER_TAKEN.to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: self.counter.fetch_add(1, Ordering::SeqCst),
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            other_names: new_user.other_names,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            roles: roles.iter().map(|r| r.name).collect(),
            created_at: now,
            updated_at: now,
        };
        self.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_username_or_email(&self, value: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.username == value || u.email == value)
            .map(|u| u.clone()))
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn any_with_role(&self, role: RoleName) -> DomainResult<bool> {
        Ok(self.users.iter().any(|u| u.has_role(role)))
    }
}

pub struct InMemoryRoleRepository {
    roles: DashMap<RoleName, Role>,
}

impl InMemoryRoleRepository {
    /// Seeded with `ROLE_USER` (id 1) and `ROLE_ADMIN` (id 2)
    pub fn seeded() -> Self {
        let roles = DashMap::new();
        roles.insert(RoleName::User, Role { id: 1, name: RoleName::User });
        roles.insert(RoleName::Admin, Role { id: 2, name: RoleName::Admin });
        Self { roles }
    }

    pub fn empty() -> Self {
        Self {
            roles: DashMap::new(),
        }
    }
}

#[async_trait]
impl RoleRepository for InMemoryRoleRepository {
    async fn find_by_name(&self, name: RoleName) -> DomainResult<Option<Role>> {
        Ok(self.roles.get(&name).map(|r| r.clone()))
    }
}

pub struct InMemoryParcelRepository {
    parcels: DashMap<i64, Parcel>,
    counter: AtomicI64,
}

impl InMemoryParcelRepository {
    pub fn new() -> Self {
        Self {
            parcels: DashMap::new(),
            counter: AtomicI64::new(1),
        }
    }

    fn sorted(&self, mut parcels: Vec<Parcel>) -> Vec<Parcel> {
        parcels.sort_by_key(|p| p.id);
        parcels
    }
}

impl Default for InMemoryParcelRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParcelRepository for InMemoryParcelRepository {
    async fn create(&self, p: NewParcel) -> DomainResult<Parcel> {
        let now = Utc::now();
        let parcel = Parcel {
            id: self.counter.fetch_add(1, Ordering::SeqCst),
            created_by: p.created_by,
            updated_by: p.created_by,
            weight: p.weight,
            weight_metric: p.weight_metric,
            status: ParcelStatus::Placed,
            from: p.from,
            to: p.to,
            current_location: p.current_location,
            sent_on: None,
            delivered_on: None,
            created_at: now,
            updated_at: now,
        };
        self.parcels.insert(parcel.id, parcel.clone());
        Ok(parcel)
    }

    async fn find_all(&self) -> DomainResult<Vec<Parcel>> {
        Ok(self.sorted(self.parcels.iter().map(|p| p.clone()).collect()))
    }

    async fn find_one(&self, id: i64, scope: RowScope) -> DomainResult<Option<Parcel>> {
        Ok(self
            .parcels
            .get(&id)
            .filter(|p| scope.admits(p))
            .map(|p| p.clone()))
    }

    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Parcel>> {
        Ok(self.sorted(
            self.parcels
                .iter()
                .filter(|p| p.is_owned_by(owner_id))
                .map(|p| p.clone())
                .collect(),
        ))
    }

    async fn apply(&self, update: &ParcelUpdate) -> DomainResult<u64> {
        match self.parcels.get_mut(&update.parcel_id) {
            Some(mut parcel) if update.matches(&parcel) => {
                update.apply_to(&mut parcel, Utc::now());
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// RepositoryProvider over the in-memory repositories
pub struct InMemoryRepositoryProvider {
    users: InMemoryUserRepository,
    roles: InMemoryRoleRepository,
    parcels: InMemoryParcelRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::with_roles(InMemoryRoleRepository::seeded())
    }

    pub fn with_roles(roles: InMemoryRoleRepository) -> Self {
        Self {
            users: InMemoryUserRepository::new(),
            roles,
            parcels: InMemoryParcelRepository::new(),
        }
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parcel::{Address, WeightMetric};

    fn address() -> Address {
        Address {
            street_number: 1,
            street_name: "Main St".into(),
            city: "Lagos".into(),
            state: "Lagos".into(),
            country: "Nigeria".into(),
            zip_code: None,
        }
    }

    fn new_parcel(owner: i64) -> NewParcel {
        NewParcel {
            created_by: owner,
            weight: 1.0,
            weight_metric: WeightMetric::Kg,
            from: address(),
            to: address(),
            current_location: address(),
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            first_name: "Ada".into(),
            last_name: "Obi".into(),
            other_names: None,
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_or_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        let role = Role { id: 1, name: RoleName::User };
        repo.create(new_user("ada", "ada@example.com"), &[role.clone()])
            .await
            .unwrap();

        let err = repo
            .create(new_user("ada", "other@example.com"), &[role.clone()])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict(USER_TAKEN.into()));

        let err = repo
            .create(new_user("other", "ada@example.com"), &[role])
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::Conflict(USER_TAKEN.into()));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn user_lookup_matches_username_or_email() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .create(new_user("ada", "ada@example.com"), &[])
            .await
            .unwrap();

        let by_name = repo.find_by_username_or_email("ada").await.unwrap().unwrap();
        let by_email = repo
            .find_by_username_or_email("ada@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_email.id, user.id);
        assert!(repo.find_by_username_or_email("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn conditioned_update_applies_once() {
        let repo = InMemoryParcelRepository::new();
        let parcel = repo.create(new_parcel(1)).await.unwrap();

        let cancel = ParcelUpdate::cancel(parcel.id, RowScope::OwnedBy(1), 1);
        assert_eq!(repo.apply(&cancel).await.unwrap(), 1);
        assert_eq!(repo.apply(&cancel).await.unwrap(), 0);

        let stored = repo.find_one(parcel.id, RowScope::Any).await.unwrap().unwrap();
        assert_eq!(stored.status, ParcelStatus::Cancelled);
    }

    #[tokio::test]
    async fn scoped_lookup_hides_foreign_parcels() {
        let repo = InMemoryParcelRepository::new();
        let parcel = repo.create(new_parcel(1)).await.unwrap();

        assert!(repo.find_one(parcel.id, RowScope::OwnedBy(2)).await.unwrap().is_none());
        assert!(repo.find_one(parcel.id, RowScope::OwnedBy(1)).await.unwrap().is_some());
        assert_eq!(repo.find_by_owner(2).await.unwrap().len(), 0);
    }
}
