//! Parcel DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::{ParcelModified, PlaceParcel};
use crate::domain::{Address, Parcel, ParcelStatus, WeightMetric};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddressDto {
    #[validate(range(min = 1, message = "must be greater than 0"))]
    pub street_number: i32,
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub street_name: String,
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub city: String,
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub state: String,
    #[validate(custom(function = "crate::interfaces::http::common::validators::not_blank"))]
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Self {
            street_number: a.street_number,
            street_name: a.street_name,
            city: a.city,
            state: a.state,
            country: a.country,
            zip_code: a.zip_code,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ParcelDeliveryRequest {
    #[validate(range(exclusive_min = 0.0, message = "must be greater than 0"))]
    pub weight: f32,
    #[serde(alias = "weightMetric")]
    pub weight_metric: WeightMetric,
    #[validate(nested)]
    pub from: AddressDto,
    #[validate(nested)]
    pub to: AddressDto,
    #[validate(nested)]
    pub current_location: AddressDto,
}

impl From<ParcelDeliveryRequest> for PlaceParcel {
    fn from(r: ParcelDeliveryRequest) -> Self {
        Self {
            weight: r.weight,
            weight_metric: r.weight_metric,
            from: r.from.into(),
            to: r.to.into(),
            current_location: r.current_location.into(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ParcelStatusRequest {
    pub new_status: ParcelStatus,
}

/// Parcel API representation; addresses are rendered as display strings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParcelDto {
    pub id: i64,
    /// Owner user id
    pub placed_by: i64,
    pub weight: f32,
    pub weight_metric: WeightMetric,
    pub sent_on: Option<DateTime<Utc>>,
    pub delivered_on: Option<DateTime<Utc>>,
    pub status: ParcelStatus,
    pub from: String,
    pub to: String,
    pub current_location: String,
}

impl From<Parcel> for ParcelDto {
    fn from(p: Parcel) -> Self {
        Self {
            id: p.id,
            placed_by: p.created_by,
            weight: p.weight,
            weight_metric: p.weight_metric,
            sent_on: p.sent_on,
            delivered_on: p.delivered_on,
            status: p.status,
            from: p.from.display(),
            to: p.to.display(),
            current_location: p.current_location.display(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ParcelModifiedDto {
    pub id: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ParcelStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
}

impl From<ParcelModified> for ParcelModifiedDto {
    fn from(m: ParcelModified) -> Self {
        Self {
            id: m.id,
            message: m.message.to_string(),
            to: m.to.map(|a| a.display()),
            status: m.status,
            current_location: m.current_location.map(|a| a.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn address_json() -> serde_json::Value {
        json!({
            "street_number": 1,
            "street_name": "Main St",
            "city": "Lagos",
            "state": "Lagos",
            "country": "Nigeria"
        })
    }

    #[test]
    fn delivery_request_accepts_camel_case_metric() {
        let body = json!({
            "weight": 1.0,
            "weightMetric": "KG",
            "from": address_json(),
            "to": address_json(),
            "current_location": address_json()
        });
        let request: ParcelDeliveryRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.weight_metric, WeightMetric::Kg);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn non_positive_weight_and_blank_city_fail() {
        let mut bad_address = address_json();
        bad_address["city"] = json!(" ");
        let body = json!({
            "weight": 0.0,
            "weight_metric": "POUND",
            "from": address_json(),
            "to": bad_address,
            "current_location": address_json()
        });
        let request: ParcelDeliveryRequest = serde_json::from_value(body).unwrap();
        let errors = request.validate().unwrap_err();
        let described = crate::interfaces::http::common::validated_json::describe_errors(&errors);
        assert_eq!(
            described,
            vec![
                "to.city must not be blank".to_string(),
                "weight must be greater than 0".to_string()
            ]
        );
    }

    #[test]
    fn modified_dto_skips_absent_fields() {
        let dto = ParcelModifiedDto::from(ParcelModified {
            id: 5,
            message: "Parcel status updated",
            to: None,
            status: Some(ParcelStatus::Transiting),
            current_location: None,
        });
        let json = serde_json::to_value(dto).unwrap();
        assert_eq!(
            json,
            json!({"id": 5, "message": "Parcel status updated", "status": "TRANSITING"})
        );
    }
}
