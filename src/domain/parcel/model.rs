//! Parcel domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unit the parcel weight is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum WeightMetric {
    Kg,
    Pound,
}

/// Delivery status.
///
/// `PLACED -> TRANSITING -> DELIVERED`, with `CANCELLED` reachable from any
/// non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParcelStatus {
    Placed,
    Transiting,
    Delivered,
    Cancelled,
}

impl ParcelStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placed => "PLACED",
            Self::Transiting => "TRANSITING",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl std::fmt::Display for ParcelStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Postal address embedded in a parcel (origin, destination, current location)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub street_number: i32,
    pub street_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: Option<String>,
}

impl Address {
    /// `"{street_number} {street_name}, {city}, {state}, {country}"`
    pub fn display(&self) -> String {
        format!(
            "{} {}, {}, {}, {}",
            self.street_number, self.street_name, self.city, self.state, self.country
        )
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Delivery order
#[derive(Debug, Clone)]
pub struct Parcel {
    pub id: i64,
    /// Owner, always the authenticated user that placed the order
    pub created_by: i64,
    pub updated_by: i64,
    pub weight: f32,
    pub weight_metric: WeightMetric,
    pub status: ParcelStatus,
    pub from: Address,
    pub to: Address,
    pub current_location: Address,
    /// Set the first time the parcel enters `TRANSITING`
    pub sent_on: Option<DateTime<Utc>>,
    /// Set the first time the parcel enters `DELIVERED`
    pub delivered_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Parcel {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.created_by == user_id
    }
}

/// Parcel about to be placed; status starts at `PLACED`
#[derive(Debug, Clone)]
pub struct NewParcel {
    pub created_by: i64,
    pub weight: f32,
    pub weight_metric: WeightMetric,
    pub from: Address,
    pub to: Address,
    pub current_location: Address,
}
