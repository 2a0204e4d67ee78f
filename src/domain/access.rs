//! Access rules for parcel operations
//!
//! Decisions are pure functions of the calling [`Principal`] and, where
//! relevant, the target parcel. Callers turn an [`AccessDecision`] into a
//! result with [`AccessDecision::into_result`].

use super::parcel::Parcel;
use super::user::{RoleName, User};
use crate::shared::{DomainError, DomainResult};

pub const ACCESS_DENIED: &str = "access denied";
pub const FOREIGN_PARCEL_LIST: &str = "You can only view your parcel delivery orders";

/// Authenticated caller, resolved once per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
    pub roles: Vec<RoleName>,
}

impl Principal {
    pub fn new(user_id: i64, username: impl Into<String>, roles: Vec<RoleName>) -> Self {
        Self {
            user_id,
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: RoleName) -> bool {
        self.roles.contains(&role)
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.username.clone(), user.roles.clone())
    }
}

/// Which parcel rows a caller may address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowScope {
    Any,
    OwnedBy(i64),
}

impl RowScope {
    pub fn admits(&self, parcel: &Parcel) -> bool {
        match self {
            Self::Any => true,
            Self::OwnedBy(owner) => parcel.is_owned_by(*owner),
        }
    }
}

/// Admins address any row; everyone else only their own
pub fn scope_for(principal: &Principal) -> RowScope {
    if is_admin(principal) {
        RowScope::Any
    } else {
        RowScope::OwnedBy(principal.user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    /// Rejected as unauthorized with the given message
    DenyAsForbidden(String),
    /// Rejected as if the resource did not exist
    DenyAsNotFound,
}

impl AccessDecision {
    /// `not_found` builds the error used for [`AccessDecision::DenyAsNotFound`],
    /// which must match the error for a resource that really is missing.
    pub fn into_result<F>(self, not_found: F) -> DomainResult<()>
    where
        F: FnOnce() -> DomainError,
    {
        match self {
            Self::Allow => Ok(()),
            Self::DenyAsForbidden(message) => Err(DomainError::Forbidden(message)),
            Self::DenyAsNotFound => Err(not_found()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ParcelAction<'a> {
    Create,
    ListAll,
    View(&'a Parcel),
    ListForUser(i64),
    Cancel,
    ChangeDestination,
    ChangeStatus,
    ChangeCurrentLocation,
}

impl ParcelAction<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::ListAll => "list_all",
            Self::View(_) => "view",
            Self::ListForUser(_) => "list_for_user",
            Self::Cancel => "cancel",
            Self::ChangeDestination => "change_destination",
            Self::ChangeStatus => "change_status",
            Self::ChangeCurrentLocation => "change_current_location",
        }
    }
}

pub fn is_admin(principal: &Principal) -> bool {
    principal.has_role(RoleName::Admin)
}

pub fn is_owner(principal: &Principal, parcel: &Parcel) -> bool {
    parcel.is_owned_by(principal.user_id)
}

pub fn can_view_parcel(principal: &Principal, parcel: &Parcel) -> bool {
    is_admin(principal) || is_owner(principal, parcel)
}

pub fn can_list_user_parcels(principal: &Principal, target_user_id: i64) -> bool {
    is_admin(principal) || principal.user_id == target_user_id
}

/// Cancel and redirect are row-scoped rather than denied here: the
/// conditioned update only matches rows inside [`scope_for`].
pub fn authorize(principal: &Principal, action: ParcelAction<'_>) -> AccessDecision {
    match action {
        ParcelAction::Create => {
            if principal.has_role(RoleName::User) || is_admin(principal) {
                AccessDecision::Allow
            } else {
                AccessDecision::DenyAsForbidden(ACCESS_DENIED.to_string())
            }
        }
        ParcelAction::ListAll | ParcelAction::ChangeStatus | ParcelAction::ChangeCurrentLocation => {
            if is_admin(principal) {
                AccessDecision::Allow
            } else {
                AccessDecision::DenyAsForbidden(ACCESS_DENIED.to_string())
            }
        }
        ParcelAction::View(parcel) => {
            if can_view_parcel(principal, parcel) {
                AccessDecision::Allow
            } else {
                AccessDecision::DenyAsNotFound
            }
        }
        ParcelAction::ListForUser(target) => {
            if can_list_user_parcels(principal, target) {
                AccessDecision::Allow
            } else {
                AccessDecision::DenyAsForbidden(FOREIGN_PARCEL_LIST.to_string())
            }
        }
        ParcelAction::Cancel | ParcelAction::ChangeDestination => AccessDecision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parcel::{Address, ParcelStatus, WeightMetric};
    use chrono::Utc;

    fn user(id: i64) -> Principal {
        Principal::new(id, format!("user{id}"), vec![RoleName::User])
    }

    fn admin(id: i64) -> Principal {
        Principal::new(id, "admin", vec![RoleName::User, RoleName::Admin])
    }

    fn parcel_owned_by(owner: i64) -> Parcel {
        let address = Address {
            street_number: 1,
            street_name: "Main St".into(),
            city: "Lagos".into(),
            state: "Lagos".into(),
            country: "Nigeria".into(),
            zip_code: None,
        };
        let now = Utc::now();
        Parcel {
            id: 10,
            created_by: owner,
            updated_by: owner,
            weight: 1.0,
            weight_metric: WeightMetric::Kg,
            status: ParcelStatus::Placed,
            from: address.clone(),
            to: address.clone(),
            current_location: address,
            sent_on: None,
            delivered_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn owner_and_admin_can_view() {
        let parcel = parcel_owned_by(1);
        assert_eq!(authorize(&user(1), ParcelAction::View(&parcel)), AccessDecision::Allow);
        assert_eq!(authorize(&admin(9), ParcelAction::View(&parcel)), AccessDecision::Allow);
    }

    #[test]
    fn stranger_view_looks_like_missing_parcel() {
        let parcel = parcel_owned_by(1);
        let decision = authorize(&user(2), ParcelAction::View(&parcel));
        assert_eq!(decision, AccessDecision::DenyAsNotFound);

        let err = decision
            .into_result(|| DomainError::not_found("Parcel", "id", 10))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("Parcel", "id", 10));
    }

    #[test]
    fn listing_someone_elses_parcels_is_forbidden() {
        assert_eq!(
            authorize(&user(2), ParcelAction::ListForUser(1)),
            AccessDecision::DenyAsForbidden(FOREIGN_PARCEL_LIST.into())
        );
        assert_eq!(authorize(&user(1), ParcelAction::ListForUser(1)), AccessDecision::Allow);
        assert_eq!(authorize(&admin(9), ParcelAction::ListForUser(1)), AccessDecision::Allow);
    }

    #[test]
    fn admin_only_actions() {
        for action in [
            ParcelAction::ListAll,
            ParcelAction::ChangeStatus,
            ParcelAction::ChangeCurrentLocation,
        ] {
            assert_eq!(
                authorize(&user(1), action),
                AccessDecision::DenyAsForbidden(ACCESS_DENIED.into()),
                "{}",
                action.name()
            );
            assert_eq!(authorize(&admin(9), action), AccessDecision::Allow);
        }
    }

    #[test]
    fn scope_depends_on_role() {
        assert_eq!(scope_for(&user(3)), RowScope::OwnedBy(3));
        assert_eq!(scope_for(&admin(9)), RowScope::Any);

        let parcel = parcel_owned_by(1);
        assert!(RowScope::OwnedBy(1).admits(&parcel));
        assert!(!RowScope::OwnedBy(2).admits(&parcel));
        assert!(RowScope::Any.admits(&parcel));
    }

    #[test]
    fn principal_without_roles_cannot_create() {
        let nobody = Principal::new(5, "ghost", vec![]);
        assert_eq!(
            authorize(&nobody, ParcelAction::Create),
            AccessDecision::DenyAsForbidden(ACCESS_DENIED.into())
        );
        assert_eq!(authorize(&user(5), ParcelAction::Create), AccessDecision::Allow);
    }
}
