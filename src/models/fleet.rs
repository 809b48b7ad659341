//! Recursos de flota
//!
//! Conductores, vehículos y remolques pertenecen a la gestión de flota;
//! aquí solo se leen. `VehicleLocation` es la posición que entrega el
//! proveedor de telemetría.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del recurso - mapea al ENUM resource_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "resource_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    Active,
    Inactive,
    Maintenance,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Driver {
    pub id: Uuid,
    pub name: String,
    pub status: ResourceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub number: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub vehicle_type: String,
    pub status: ResourceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Trailer {
    pub id: Uuid,
    pub number: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub trailer_type: String,
    pub status: ResourceStatus,
}

/// Estado reportado por la telemetría
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TelemetryStatus {
    Active,
    Inactive,
}

/// Posición de un vehículo según el proveedor de telemetría
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleLocation {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub heading: f64,
    pub speed: f64,
    pub last_location: DateTime<Utc>,
    pub status: TelemetryStatus,
}
