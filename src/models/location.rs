//! Modelos de ubicación
//!
//! Ubicaciones de orden (`locations`), paradas de manifiesto o de tramo
//! (`leg_locations`) y la jerarquía país → estado → ciudad.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Tipo de ubicación - mapea al ENUM location_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "location_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Pickup,
    Delivery,
    DropOff,
}

impl LocationType {
    /// Solo las paradas de tipo drop_off referencian un terminal
    pub fn requires_terminal(&self) -> bool {
        matches!(self, LocationType::DropOff)
    }
}

/// Ubicación de una orden - mapea a la tabla locations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Location {
    pub id: Uuid,
    pub order_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub date: DateTime<Utc>,
    pub time: String,
    pub special_instructions: Option<String>,
    pub sequence_number: i32,
    pub created_at: DateTime<Utc>,
}

/// Ubicación con su cadena ciudad → estado → país resuelta
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LocationWithAddress {
    pub id: Uuid,
    pub order_id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub state_id: Uuid,
    pub state_name: String,
    pub country_id: Uuid,
    pub country_name: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub special_instructions: Option<String>,
    pub sequence_number: i32,
}

/// Parada de un manifiesto o de un tramo dividido - mapea a leg_locations
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LegLocation {
    pub id: Uuid,
    pub manifest_id: Option<Uuid>,
    pub order_leg_id: Option<Uuid>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub date: DateTime<Utc>,
    pub time: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub terminal_id: Option<Uuid>,
    pub special_instructions: Option<String>,
    pub sequence_number: i32,
}

/// Parada pendiente de insertar en leg_locations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewLegLocation {
    #[serde(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub date: DateTime<Utc>,
    pub time: String,
    pub contact_name: Option<String>,
    pub contact_phone: Option<String>,
    pub terminal_id: Option<Uuid>,
    pub special_instructions: Option<String>,
    pub sequence_number: i32,
}

/// Parada con dirección legible, usada por el resumen de ruta
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StopWithAddress {
    pub id: Uuid,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub location_type: LocationType,
    pub name: String,
    pub street_address: String,
    pub city_name: String,
    pub state_name: String,
    pub country_name: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub sequence_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct State {
    pub id: Uuid,
    pub country_id: Uuid,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct City {
    pub id: Uuid,
    pub state_id: Uuid,
    pub name: String,
}

/// Terminal con su ciudad resuelta
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Terminal {
    pub id: Uuid,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub city_name: String,
    pub state_name: String,
    pub country_name: String,
}
