use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    AuditLog, City, Currency, Location, LocationType, LocationWithAddress, Order,
    OrderLegWithManifest, State,
};
use crate::utils::validation::{validate_positive_amount, PHONE_REGEX};

// Ubicación tal como llega del formulario de orden
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LocationInput {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    #[validate(required(message = "Country is required"))]
    pub country_id: Option<Uuid>,
    #[validate(required(message = "State/Province is required"))]
    pub state_id: Option<Uuid>,
    #[validate(required(message = "City is required"))]
    pub city_id: Option<Uuid>,
    #[validate(length(min = 1, message = "Date is required"))]
    pub date: String,
    #[validate(length(min = 1, message = "Time is required"))]
    pub time: String,
    pub special_instructions: Option<String>,
}

// Request para crear una orden con sus ubicaciones
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateOrderRequest {
    #[validate(length(min = 2, message = "Customer name must be at least 2 characters"))]
    pub customer_name: String,
    #[validate(length(min = 5, message = "Customer address must be at least 5 characters"))]
    pub customer_address: String,
    #[validate(length(min = 2, message = "Contact person must be at least 2 characters"))]
    pub contact_person: String,
    #[validate(regex(
        path = "PHONE_REGEX",
        message = "Invalid phone number format. Please enter a valid phone number"
    ))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Load tender number is required"))]
    pub load_tender_number: String,
    #[validate(custom(function = "validate_positive_amount", message = "Rate must be greater than 0"))]
    pub rate: Decimal,
    pub currency: Currency,
    #[validate(length(min = 2, message = "Commodity must be at least 2 characters"))]
    pub commodity: String,
    #[validate(custom(function = "validate_positive_amount", message = "Weight must be greater than 0"))]
    pub weight: Decimal,
    pub reference_number: Option<String>,
    pub pickup_locations: Vec<LocationInput>,
    pub delivery_locations: Vec<LocationInput>,
}

// Pasos del asistente de creación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFormStep {
    CustomerInfo,
    LoadDetails,
    Locations,
}

impl OrderFormStep {
    pub fn from_number(step: u8) -> Option<Self> {
        match step {
            1 => Some(OrderFormStep::CustomerInfo),
            2 => Some(OrderFormStep::LoadDetails),
            3 => Some(OrderFormStep::Locations),
            _ => None,
        }
    }

    /// Campos escalares que valida cada paso
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            OrderFormStep::CustomerInfo => {
                &["customer_name", "customer_address", "contact_person", "phone_number"]
            }
            OrderFormStep::LoadDetails => {
                &["load_tender_number", "rate", "currency", "commodity", "weight"]
            }
            OrderFormStep::Locations => &[],
        }
    }
}

// Request para validar un paso sin escribir nada
#[derive(Debug, Deserialize)]
pub struct ValidateStepRequest {
    pub step: u8,
    #[serde(default)]
    pub order: CreateOrderRequest,
}

#[derive(Debug, Serialize)]
pub struct ValidateStepResponse {
    pub step: u8,
    pub valid: bool,
}

// Ubicación editada desde el detalle de la orden
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationUpdate {
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub street_address: String,
    pub city_id: Option<Uuid>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub special_instructions: Option<String>,
}

// Request para actualizar una orden
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateOrderRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_address: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub load_tender_number: String,
    pub rate: Decimal,
    pub currency: Currency,
    #[serde(default)]
    pub commodity: String,
    pub weight: Decimal,
    pub reference_number: Option<String>,
    #[serde(default)]
    pub locations: Vec<LocationUpdate>,
}

// Ubicación lista para insertar, ya normalizada
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLocation {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub date: DateTime<Utc>,
    pub time: String,
    pub special_instructions: Option<String>,
    pub sequence_number: i32,
}

// Response de orden creada
#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub order: Order,
    pub locations: Vec<Location>,
    pub leg_id: Uuid,
}

// Orden con sus ubicaciones para el listado
#[derive(Debug, Serialize)]
pub struct OrderSummaryResponse {
    #[serde(flatten)]
    pub order: Order,
    pub locations: Vec<Location>,
}

// Detalle completo de una orden
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    #[serde(flatten)]
    pub order: Order,
    pub locations: Vec<LocationWithAddress>,
    pub legs: Vec<OrderLegWithManifest>,
}

// Datos precargados para el editor de detalle
#[derive(Debug, Serialize)]
pub struct OrderEditContext {
    pub order: OrderDetailResponse,
    pub states_by_country: std::collections::BTreeMap<Uuid, Vec<State>>,
    pub cities_by_state: std::collections::BTreeMap<Uuid, Vec<City>>,
}

#[derive(Debug, Serialize)]
pub struct AuditLogListResponse {
    pub order_id: Uuid,
    pub entries: Vec<AuditLog>,
}

// Request para asignar un manifiesto existente a la orden
#[derive(Debug, Deserialize)]
pub struct AssignManifestRequest {
    pub manifest_id: Uuid,
}
