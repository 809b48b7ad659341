use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::DriverPaymentType;

// Datos estimados del viaje
#[derive(Debug, Clone, Deserialize)]
pub struct TripEstimateQuery {
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
}

// Request de vista previa sin manifiesto
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPreviewRequest {
    pub driver_payment_type: DriverPaymentType,
    pub driver_rate: Decimal,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub distance: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AdditionalCharge {
    pub id: u32,
    #[serde(rename = "type")]
    pub charge_type: String,
    pub total: Decimal,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentSummaryResponse {
    pub manifest_id: Option<Uuid>,
    pub driver_payment_type: DriverPaymentType,
    pub driver_rate: Decimal,
    pub hours: Decimal,
    pub miles: Decimal,
    pub base_pay: Decimal,
    pub additional_charges: Vec<AdditionalCharge>,
    pub additional_total: Decimal,
    pub grand_total: Decimal,
    /// Importes con dos decimales para mostrar
    pub display: PaymentDisplay,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentDisplay {
    pub base_pay: String,
    pub additional_total: String,
    pub grand_total: String,
}
