use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    DriverPaymentType, LegLocation, LocationType, ManifestStatus, ManifestType, OrderType,
};
use crate::utils::validation::validate_positive_amount;

// Request para crear o editar un manifiesto
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ManifestRequest {
    pub manifest_type: ManifestType,
    pub order_type: OrderType,
    #[validate(required(message = "Driver is required"))]
    pub driver_id: Option<Uuid>,
    #[validate(required(message = "Vehicle is required"))]
    pub vehicle_id: Option<Uuid>,
    pub trailer_id: Option<Uuid>,
    pub driver_payment_type: DriverPaymentType,
    #[validate(
        required(message = "Valid driver rate is required"),
        custom(function = "validate_positive_amount", message = "Valid driver rate is required")
    )]
    pub driver_rate: Option<Decimal>,
    pub status: ManifestStatus,
    /// Confirmación explícita para asignar un recurso ya ocupado
    pub confirm: bool,
}

// Filtros del listado de manifiestos
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManifestFilters {
    pub status: Option<ManifestStatus>,
    pub search: Option<String>,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// Parada de un manifiesto tal como llega del formulario
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ManifestStopInput {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    pub city_id: Uuid,
    pub date: String,
    pub time: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub terminal_id: Option<Uuid>,
    pub special_instructions: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveStopsRequest {
    pub stops: Vec<ManifestStopInput>,
}

#[derive(Debug, Serialize)]
pub struct ManifestStopsResponse {
    pub manifest_id: Uuid,
    pub stops: Vec<LegLocation>,
}
