//! Parcel entity
//!
//! Addresses are flattened into `from_*`, `to_*` and `current_location_*`
//! column groups.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "PLACED")]
    Placed,
    #[sea_orm(string_value = "TRANSITING")]
    Transiting,
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(8))")]
pub enum WeightMetric {
    #[sea_orm(string_value = "KG")]
    Kg,
    #[sea_orm(string_value = "POUND")]
    Pound,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parcels")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_by: i64,
    pub updated_by: i64,

    pub weight: f32,
    pub weight_metric: WeightMetric,
    pub status: Status,

    pub from_street_number: i32,
    pub from_street_name: String,
    pub from_city: String,
    pub from_state: String,
    pub from_country: String,
    #[sea_orm(nullable)]
    pub from_zip_code: Option<String>,

    pub to_street_number: i32,
    pub to_street_name: String,
    pub to_city: String,
    pub to_state: String,
    pub to_country: String,
    #[sea_orm(nullable)]
    pub to_zip_code: Option<String>,

    pub current_location_street_number: i32,
    pub current_location_street_name: String,
    pub current_location_city: String,
    pub current_location_state: String,
    pub current_location_country: String,
    #[sea_orm(nullable)]
    pub current_location_zip_code: Option<String>,

    #[sea_orm(nullable)]
    pub sent_on: Option<DateTimeUtc>,
    #[sea_orm(nullable)]
    pub delivered_on: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Owner,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
