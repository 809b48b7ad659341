//! Modelo de Order
//!
//! Una orden es la solicitud de envío de un cliente. Posee sus ubicaciones
//! de recogida/entrega y sus tramos (`OrderLeg`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Moneda de la tarifa - mapea al ENUM currency_code
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "currency_code")]
pub enum Currency {
    #[default]
    #[serde(rename = "CAD")]
    #[sqlx(rename = "CAD")]
    Cad,
    #[serde(rename = "USD")]
    #[sqlx(rename = "USD")]
    Usd,
}

/// Order principal - mapea a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub order_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub contact_person: String,
    pub phone_number: String,
    pub load_tender_number: String,
    pub rate: Decimal,
    pub currency: Currency,
    pub commodity: String,
    pub weight: Decimal,
    pub reference_number: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
