//! Parcel lifecycle
//!
//! Every mutation is described as a [`ParcelUpdate`]: a row predicate plus
//! the change to write. Repositories execute it as one conditioned update,
//! so guards and writes cannot interleave with a concurrent request.

use chrono::{DateTime, Utc};

use super::model::{Address, Parcel, ParcelStatus};
use crate::domain::access::RowScope;
use crate::shared::DomainError;

/// Field change carried by an update
#[derive(Debug, Clone, PartialEq)]
pub enum ParcelChange {
    Status(ParcelStatus),
    Destination(Address),
    CurrentLocation(Address),
}

impl ParcelChange {
    /// Write the change into `parcel`.
    ///
    /// `sent_on` and `delivered_on` are stamped the first time the parcel
    /// enters `TRANSITING` or `DELIVERED` and kept afterwards.
    pub fn apply(&self, parcel: &mut Parcel, now: DateTime<Utc>) {
        match self {
            Self::Status(status) => {
                parcel.status = *status;
                match status {
                    ParcelStatus::Transiting if parcel.sent_on.is_none() => {
                        parcel.sent_on = Some(now)
                    }
                    ParcelStatus::Delivered if parcel.delivered_on.is_none() => {
                        parcel.delivered_on = Some(now)
                    }
                    _ => {}
                }
            }
            Self::Destination(address) => parcel.to = address.clone(),
            Self::CurrentLocation(address) => parcel.current_location = address.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOperation {
    Cancel,
    ChangeDestination,
    ChangeStatus,
    ChangeCurrentLocation,
}

impl LifecycleOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cancel => "cancel",
            Self::ChangeDestination => "change_destination",
            Self::ChangeStatus => "change_status",
            Self::ChangeCurrentLocation => "change_current_location",
        }
    }
}

/// Conditioned single-row update
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelUpdate {
    pub operation: LifecycleOperation,
    pub parcel_id: i64,
    pub rows: RowScope,
    /// The row must not currently be in any of these statuses
    pub excluded_statuses: Vec<ParcelStatus>,
    pub change: ParcelChange,
    /// Recorded as `updated_by`
    pub actor_id: i64,
}

impl ParcelUpdate {
    /// `status = CANCELLED` unless already delivered or cancelled
    pub fn cancel(parcel_id: i64, rows: RowScope, actor_id: i64) -> Self {
        Self {
            operation: LifecycleOperation::Cancel,
            parcel_id,
            rows,
            excluded_statuses: vec![ParcelStatus::Delivered, ParcelStatus::Cancelled],
            change: ParcelChange::Status(ParcelStatus::Cancelled),
            actor_id,
        }
    }

    /// Redirect an undelivered parcel
    pub fn change_destination(parcel_id: i64, rows: RowScope, to: Address, actor_id: i64) -> Self {
        Self {
            operation: LifecycleOperation::ChangeDestination,
            parcel_id,
            rows,
            excluded_statuses: vec![ParcelStatus::Delivered],
            change: ParcelChange::Destination(to),
            actor_id,
        }
    }

    /// Unconditional status write (admins may move a delivered parcel back)
    pub fn change_status(parcel_id: i64, status: ParcelStatus, actor_id: i64) -> Self {
        Self {
            operation: LifecycleOperation::ChangeStatus,
            parcel_id,
            rows: RowScope::Any,
            excluded_statuses: Vec::new(),
            change: ParcelChange::Status(status),
            actor_id,
        }
    }

    pub fn change_current_location(parcel_id: i64, location: Address, actor_id: i64) -> Self {
        Self {
            operation: LifecycleOperation::ChangeCurrentLocation,
            parcel_id,
            rows: RowScope::Any,
            excluded_statuses: Vec::new(),
            change: ParcelChange::CurrentLocation(location),
            actor_id,
        }
    }

    /// Whether `parcel` satisfies the row predicate
    pub fn matches(&self, parcel: &Parcel) -> bool {
        parcel.id == self.parcel_id
            && self.rows.admits(parcel)
            && !self.excluded_statuses.contains(&parcel.status)
    }

    /// Apply the change and the audit columns to a matching row
    pub fn apply_to(&self, parcel: &mut Parcel, now: DateTime<Utc>) {
        self.change.apply(parcel, now);
        parcel.updated_by = self.actor_id;
        parcel.updated_at = now;
    }

    /// Error for an update that matched no row. Wrong owner, wrong status and
    /// missing id are deliberately indistinguishable.
    pub fn not_applied(&self) -> DomainError {
        let id = self.parcel_id;
        let message = match (self.operation, self.rows) {
            (LifecycleOperation::Cancel, RowScope::OwnedBy(owner)) => format!(
                "Parcel with id {id} belonging to user with id {owner} does not exist in undelivered state"
            ),
            (LifecycleOperation::Cancel, RowScope::Any) => {
                format!("Parcel with id {id} does not exist in undelivered state")
            }
            (LifecycleOperation::ChangeDestination, RowScope::OwnedBy(owner)) => format!(
                "Couldn't change destination of parcel with id {id} for user with id {owner}"
            ),
            (LifecycleOperation::ChangeDestination, RowScope::Any) => {
                format!("Couldn't change destination of parcel with id {id}")
            }
            (LifecycleOperation::ChangeStatus, _) => {
                format!("Couldn't change status of parcel with id {id}")
            }
            (LifecycleOperation::ChangeCurrentLocation, _) => {
                format!("Couldn't change current location of parcel with id {id}")
            }
        };
        DomainError::NotFound(message)
    }
}
