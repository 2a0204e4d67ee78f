use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    UpdateResult,
};

use super::user_repository::db_err;
use crate::domain::access::RowScope;
use crate::domain::parcel::{
    Address, NewParcel, Parcel, ParcelChange, ParcelRepository, ParcelStatus, ParcelUpdate,
    WeightMetric,
};
use crate::infrastructure::database::entities::parcel;
use crate::shared::DomainResult;

pub struct SeaOrmParcelRepository {
    db: DatabaseConnection,
}

impl SeaOrmParcelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: parcel::Status) -> ParcelStatus {
    match status {
        parcel::Status::Placed => ParcelStatus::Placed,
        parcel::Status::Transiting => ParcelStatus::Transiting,
        parcel::Status::Delivered => ParcelStatus::Delivered,
        parcel::Status::Cancelled => ParcelStatus::Cancelled,
    }
}

fn status_to_entity(status: ParcelStatus) -> parcel::Status {
    match status {
        ParcelStatus::Placed => parcel::Status::Placed,
        ParcelStatus::Transiting => parcel::Status::Transiting,
        ParcelStatus::Delivered => parcel::Status::Delivered,
        ParcelStatus::Cancelled => parcel::Status::Cancelled,
    }
}

fn metric_to_domain(metric: parcel::WeightMetric) -> WeightMetric {
    match metric {
        parcel::WeightMetric::Kg => WeightMetric::Kg,
        parcel::WeightMetric::Pound => WeightMetric::Pound,
    }
}

fn metric_to_entity(metric: WeightMetric) -> parcel::WeightMetric {
    match metric {
        WeightMetric::Kg => parcel::WeightMetric::Kg,
        WeightMetric::Pound => parcel::WeightMetric::Pound,
    }
}

fn parcel_model_to_domain(m: parcel::Model) -> Parcel {
    Parcel {
        id: m.id,
        created_by: m.created_by,
        updated_by: m.updated_by,
        weight: m.weight,
        weight_metric: metric_to_domain(m.weight_metric),
        status: status_to_domain(m.status),
        from: Address {
            street_number: m.from_street_number,
            street_name: m.from_street_name,
            city: m.from_city,
            state: m.from_state,
            country: m.from_country,
            zip_code: m.from_zip_code,
        },
        to: Address {
            street_number: m.to_street_number,
            street_name: m.to_street_name,
            city: m.to_city,
            state: m.to_state,
            country: m.to_country,
            zip_code: m.to_zip_code,
        },
        current_location: Address {
            street_number: m.current_location_street_number,
            street_name: m.current_location_street_name,
            city: m.current_location_city,
            state: m.current_location_state,
            country: m.current_location_country,
            zip_code: m.current_location_zip_code,
        },
        sent_on: m.sent_on,
        delivered_on: m.delivered_on,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

/// Column group an address is flattened into
struct AddressColumns {
    street_number: parcel::Column,
    street_name: parcel::Column,
    city: parcel::Column,
    state: parcel::Column,
    country: parcel::Column,
    zip_code: parcel::Column,
}

const TO_COLUMNS: AddressColumns = AddressColumns {
    street_number: parcel::Column::ToStreetNumber,
    street_name: parcel::Column::ToStreetName,
    city: parcel::Column::ToCity,
    state: parcel::Column::ToState,
    country: parcel::Column::ToCountry,
    zip_code: parcel::Column::ToZipCode,
};

const CURRENT_LOCATION_COLUMNS: AddressColumns = AddressColumns {
    street_number: parcel::Column::CurrentLocationStreetNumber,
    street_name: parcel::Column::CurrentLocationStreetName,
    city: parcel::Column::CurrentLocationCity,
    state: parcel::Column::CurrentLocationState,
    country: parcel::Column::CurrentLocationCountry,
    zip_code: parcel::Column::CurrentLocationZipCode,
};

fn address_assignments(columns: &AddressColumns, address: &Address) -> Vec<(parcel::Column, SimpleExpr)> {
    vec![
        (columns.street_number, Expr::value(address.street_number)),
        (columns.street_name, Expr::value(address.street_name.clone())),
        (columns.city, Expr::value(address.city.clone())),
        (columns.state, Expr::value(address.state.clone())),
        (columns.country, Expr::value(address.country.clone())),
        (columns.zip_code, Expr::value(address.zip_code.clone())),
    ]
}

/// `column = COALESCE(column, now)`
fn stamp_once(column: parcel::Column, now: DateTime<Utc>) -> SimpleExpr {
    Func::coalesce([Expr::col(column).into(), Expr::value(now)]).into()
}

fn change_assignments(change: &ParcelChange, now: DateTime<Utc>) -> Vec<(parcel::Column, SimpleExpr)> {
    match change {
        ParcelChange::Status(status) => {
            let mut sets = vec![(
                parcel::Column::Status,
                Expr::value(status_to_entity(*status)),
            )];
            match status {
                ParcelStatus::Transiting => {
                    sets.push((parcel::Column::SentOn, stamp_once(parcel::Column::SentOn, now)))
                }
                ParcelStatus::Delivered => sets.push((
                    parcel::Column::DeliveredOn,
                    stamp_once(parcel::Column::DeliveredOn, now),
                )),
                _ => {}
            }
            sets
        }
        ParcelChange::Destination(address) => address_assignments(&TO_COLUMNS, address),
        ParcelChange::CurrentLocation(address) => {
            address_assignments(&CURRENT_LOCATION_COLUMNS, address)
        }
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ParcelRepository for SeaOrmParcelRepository {
    async fn create(&self, p: NewParcel) -> DomainResult<Parcel> {
        let now = Utc::now();

        let model = parcel::ActiveModel {
            created_by: Set(p.created_by),
            updated_by: Set(p.created_by),
            weight: Set(p.weight),
            weight_metric: Set(metric_to_entity(p.weight_metric)),
            status: Set(parcel::Status::Placed),
            from_street_number: Set(p.from.street_number),
            from_street_name: Set(p.from.street_name),
            from_city: Set(p.from.city),
            from_state: Set(p.from.state),
            from_country: Set(p.from.country),
            from_zip_code: Set(p.from.zip_code),
            to_street_number: Set(p.to.street_number),
            to_street_name: Set(p.to.street_name),
            to_city: Set(p.to.city),
            to_state: Set(p.to.state),
            to_country: Set(p.to.country),
            to_zip_code: Set(p.to.zip_code),
            current_location_street_number: Set(p.current_location.street_number),
            current_location_street_name: Set(p.current_location.street_name),
            current_location_city: Set(p.current_location.city),
            current_location_state: Set(p.current_location.state),
            current_location_country: Set(p.current_location.country),
            current_location_zip_code: Set(p.current_location.zip_code),
            sent_on: Set(None),
            delivered_on: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;

        info!("Parcel {} placed by user {}", model.id, model.created_by);
        Ok(parcel_model_to_domain(model))
    }

    async fn find_all(&self) -> DomainResult<Vec<Parcel>> {
        let models = parcel::Entity::find()
            .order_by_asc(parcel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(parcel_model_to_domain).collect())
    }

    async fn find_one(&self, id: i64, scope: RowScope) -> DomainResult<Option<Parcel>> {
        let mut query = parcel::Entity::find().filter(parcel::Column::Id.eq(id));
        if let RowScope::OwnedBy(owner) = scope {
            query = query.filter(parcel::Column::CreatedBy.eq(owner));
        }

        let model = query.one(&self.db).await.map_err(db_err)?;
        Ok(model.map(parcel_model_to_domain))
    }

    async fn find_by_owner(&self, owner_id: i64) -> DomainResult<Vec<Parcel>> {
        let models = parcel::Entity::find()
            .filter(parcel::Column::CreatedBy.eq(owner_id))
            .order_by_asc(parcel::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(parcel_model_to_domain).collect())
    }

    async fn apply(&self, update: &ParcelUpdate) -> DomainResult<u64> {
        let now = Utc::now();

        let mut stmt = parcel::Entity::update_many()
            .col_expr(parcel::Column::UpdatedBy, Expr::value(update.actor_id))
            .col_expr(parcel::Column::UpdatedAt, Expr::value(now));
        for (column, value) in change_assignments(&update.change, now) {
            stmt = stmt.col_expr(column, value);
        }

        stmt = stmt.filter(parcel::Column::Id.eq(update.parcel_id));
        if let RowScope::OwnedBy(owner) = update.rows {
            stmt = stmt.filter(parcel::Column::CreatedBy.eq(owner));
        }
        if !update.excluded_statuses.is_empty() {
            let excluded: Vec<parcel::Status> = update
                .excluded_statuses
                .iter()
                .map(|s| status_to_entity(*s))
                .collect();
            stmt = stmt.filter(parcel::Column::Status.is_not_in(excluded));
        }

        let result: UpdateResult = stmt.exec(&self.db).await.map_err(db_err)?;
        debug!(
            "{} on parcel {} affected {} row(s)",
            update.operation.as_str(),
            update.parcel_id,
            result.rows_affected
        );

        Ok(result.rows_affected)
    }
}
