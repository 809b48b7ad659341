//! Modelo de SplitPoint
//!
//! Punto geográfico o lógico donde se divide un tramo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "split_point_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SplitPointType {
    Gps,
    Location,
    Terminal,
}

/// Fila de split_points; solo las columnas del discriminante van rellenas
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SplitPoint {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub point_type: SplitPointType,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub street_address: Option<String>,
    pub city_id: Option<Uuid>,
    pub terminal_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
