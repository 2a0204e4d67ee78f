//! Parcel orchestration
//!
//! Each operation takes the calling [`Principal`], consults the access rules,
//! and runs the matching lifecycle update against the repository.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::access::{self, ParcelAction, Principal};
use crate::domain::parcel::{Address, NewParcel, Parcel, ParcelStatus, ParcelUpdate, WeightMetric};
use crate::domain::repositories::RepositoryProvider;
use crate::shared::{DomainError, DomainResult};

pub const PARCEL_CREATED_MESSAGE: &str = "order created";
pub const PARCEL_CANCELLED_MESSAGE: &str = "order cancelled";
pub const PARCEL_DESTINATION_MESSAGE: &str = "Parcel destination updated";
pub const PARCEL_STATUS_MESSAGE: &str = "Parcel status updated";
pub const PARCEL_LOCATION_MESSAGE: &str = "Parcel location updated";

/// Order details supplied by the caller; the owner is never client-supplied
#[derive(Debug, Clone)]
pub struct PlaceParcel {
    pub weight: f32,
    pub weight_metric: WeightMetric,
    pub from: Address,
    pub to: Address,
    pub current_location: Address,
}

/// Outcome of a successful create or modification
#[derive(Debug, Clone, PartialEq)]
pub struct ParcelModified {
    pub id: i64,
    pub message: &'static str,
    pub to: Option<Address>,
    pub status: Option<ParcelStatus>,
    pub current_location: Option<Address>,
}

impl ParcelModified {
    fn new(id: i64, message: &'static str) -> Self {
        Self {
            id,
            message,
            to: None,
            status: None,
            current_location: None,
        }
    }
}

pub struct ParcelService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ParcelService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create(&self, caller: &Principal, order: PlaceParcel) -> DomainResult<ParcelModified> {
        self.authorize(caller, ParcelAction::Create)?;

        let parcel = self
            .repos
            .parcels()
            .create(NewParcel {
                created_by: caller.user_id,
                weight: order.weight,
                weight_metric: order.weight_metric,
                from: order.from,
                to: order.to,
                current_location: order.current_location,
            })
            .await?;

        metrics::counter!("parcels_created_total").increment(1);
        Ok(ParcelModified::new(parcel.id, PARCEL_CREATED_MESSAGE))
    }

    pub async fn list_all(&self, caller: &Principal) -> DomainResult<Vec<Parcel>> {
        self.authorize(caller, ParcelAction::ListAll)?;
        self.repos.parcels().find_all().await
    }

    /// Non-admins only see their own parcels; anyone else's is reported as
    /// missing.
    pub async fn get(&self, caller: &Principal, parcel_id: i64) -> DomainResult<Parcel> {
        let missing = || DomainError::not_found("Parcel", "parcelId", parcel_id);

        let parcel = self
            .repos
            .parcels()
            .find_one(parcel_id, access::scope_for(caller))
            .await?
            .ok_or_else(missing)?;

        access::authorize(caller, ParcelAction::View(&parcel)).into_result(missing)?;
        Ok(parcel)
    }

    pub async fn list_for_user(&self, caller: &Principal, user_id: i64) -> DomainResult<Vec<Parcel>> {
        self.authorize(caller, ParcelAction::ListForUser(user_id))?;
        self.repos.parcels().find_by_owner(user_id).await
    }

    pub async fn cancel(&self, caller: &Principal, parcel_id: i64) -> DomainResult<ParcelModified> {
        self.authorize(caller, ParcelAction::Cancel)?;

        let update = ParcelUpdate::cancel(parcel_id, access::scope_for(caller), caller.user_id);
        self.execute(&update).await?;
        Ok(ParcelModified::new(parcel_id, PARCEL_CANCELLED_MESSAGE))
    }

    pub async fn change_destination(
        &self,
        caller: &Principal,
        parcel_id: i64,
        to: Address,
    ) -> DomainResult<ParcelModified> {
        self.authorize(caller, ParcelAction::ChangeDestination)?;

        let update = ParcelUpdate::change_destination(
            parcel_id,
            access::scope_for(caller),
            to.clone(),
            caller.user_id,
        );
        self.execute(&update).await?;
        Ok(ParcelModified {
            to: Some(to),
            ..ParcelModified::new(parcel_id, PARCEL_DESTINATION_MESSAGE)
        })
    }

    pub async fn change_status(
        &self,
        caller: &Principal,
        parcel_id: i64,
        status: ParcelStatus,
    ) -> DomainResult<ParcelModified> {
        self.authorize(caller, ParcelAction::ChangeStatus)?;

        let update = ParcelUpdate::change_status(parcel_id, status, caller.user_id);
        self.execute(&update).await?;
        Ok(ParcelModified {
            status: Some(status),
            ..ParcelModified::new(parcel_id, PARCEL_STATUS_MESSAGE)
        })
    }

    pub async fn change_current_location(
        &self,
        caller: &Principal,
        parcel_id: i64,
        location: Address,
    ) -> DomainResult<ParcelModified> {
        self.authorize(caller, ParcelAction::ChangeCurrentLocation)?;

        let update =
            ParcelUpdate::change_current_location(parcel_id, location.clone(), caller.user_id);
        self.execute(&update).await?;
        Ok(ParcelModified {
            current_location: Some(location),
            ..ParcelModified::new(parcel_id, PARCEL_LOCATION_MESSAGE)
        })
    }

    // ── Helpers ─────────────────────────────────────────────────

    fn authorize(&self, caller: &Principal, action: ParcelAction<'_>) -> DomainResult<()> {
        let decision = access::authorize(caller, action);
        debug!(
            "user {} {}: {:?}",
            caller.user_id,
            action.name(),
            decision
        );
        decision.into_result(|| DomainError::NotFound("Parcel not found".to_string()))
    }

    async fn execute(&self, update: &ParcelUpdate) -> DomainResult<()> {
        let rows = self.repos.parcels().apply(update).await?;
        let outcome = if rows == 0 { "rejected" } else { "applied" };
        metrics::counter!(
            "parcel_transitions_total",
            "operation" => update.operation.as_str(),
            "outcome" => outcome
        )
        .increment(1);

        if rows == 0 {
            return Err(update.not_applied());
        }

        info!(
            "{} applied to parcel {} by user {}",
            update.operation.as_str(),
            update.parcel_id,
            update.actor_id
        );
        Ok(())
    }
}
