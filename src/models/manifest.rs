//! Modelo de Manifest
//!
//! Un manifiesto asigna conductor, vehículo y remolque a uno o más tramos.
//! El estado sigue un grafo de transiciones validado.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use std::fmt;
use uuid::Uuid;

/// Estado del manifiesto - mapea al ENUM manifest_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash, Default)]
#[sqlx(type_name = "manifest_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ManifestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ManifestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestStatus::Pending => "pending",
            ManifestStatus::InProgress => "in_progress",
            ManifestStatus::Completed => "completed",
            ManifestStatus::Cancelled => "cancelled",
        }
    }

    /// Estados que ocupan al conductor y al vehículo
    pub fn is_active(&self) -> bool {
        matches!(self, ManifestStatus::Pending | ManifestStatus::InProgress)
    }

    /// pending → in_progress → completed; cancelled desde pending o in_progress.
    /// Mantener el mismo estado siempre es válido.
    pub fn can_transition_to(&self, next: ManifestStatus) -> bool {
        use ManifestStatus::*;
        *self == next
            || matches!(
                (self, next),
                (Pending, InProgress) | (InProgress, Completed) | (Pending, Cancelled) | (InProgress, Cancelled)
            )
    }
}

impl fmt::Display for ManifestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forma de pago del conductor - mapea al ENUM driver_payment_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "driver_payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DriverPaymentType {
    #[default]
    Hourly,
    Mileage,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "manifest_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ManifestType {
    #[default]
    Pickup,
    Delivery,
    Dropoff,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "order_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    #[default]
    Ftl,
    Ltl,
}

/// Manifest principal - mapea a la tabla manifests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Manifest {
    pub id: Uuid,
    pub number: String,
    pub manifest_type: ManifestType,
    pub order_type: OrderType,
    pub status: ManifestStatus,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub trailer_id: Option<Uuid>,
    pub driver_payment_type: DriverPaymentType,
    pub driver_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Manifest con los nombres de sus recursos, para listados
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ManifestWithResources {
    pub id: Uuid,
    pub number: String,
    pub manifest_type: ManifestType,
    pub order_type: OrderType,
    pub status: ManifestStatus,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_number: Option<String>,
    pub trailer_id: Option<Uuid>,
    pub trailer_number: Option<String>,
    pub driver_payment_type: DriverPaymentType,
    pub driver_rate: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Vista mínima de un manifiesto activo para detectar dobles asignaciones
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ManifestAssignment {
    pub id: Uuid,
    pub number: String,
    pub status: ManifestStatus,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
}

/// Entrada del historial de un manifiesto (solo inserción)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ManifestHistory {
    pub id: Uuid,
    pub manifest_id: Uuid,
    pub manifest_number: String,
    pub previous_status: Option<ManifestStatus>,
    pub new_status: ManifestStatus,
    pub driver_id: Option<Uuid>,
    pub driver_name: Option<String>,
    pub vehicle_id: Option<Uuid>,
    pub vehicle_number: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub changed_by: String,
}

/// Datos para insertar una entrada de historial
#[derive(Debug, Clone)]
pub struct NewManifestHistory {
    pub manifest_id: Uuid,
    pub manifest_number: String,
    pub previous_status: Option<ManifestStatus>,
    pub new_status: ManifestStatus,
    pub driver_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub changed_by: String,
}

impl ManifestHistory {
    /// Entrada sintética para manifiestos sin historial registrado
    pub fn synthetic_from(manifest: &ManifestWithResources) -> Self {
        Self {
            id: manifest.id,
            manifest_id: manifest.id,
            manifest_number: manifest.number.clone(),
            previous_status: None,
            new_status: manifest.status,
            driver_id: manifest.driver_id,
            driver_name: manifest.driver_name.clone(),
            vehicle_id: manifest.vehicle_id,
            vehicle_number: manifest.vehicle_number.clone(),
            changed_at: manifest.updated_at.unwrap_or(manifest.created_at),
            changed_by: "System".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ManifestStatus::*;

    #[test]
    fn test_active_statuses() {
        assert!(Pending.is_active());
        assert!(InProgress.is_active());
        assert!(!Completed.is_active());
        assert!(!Cancelled.is_active());
    }

    #[test]
    fn test_allowed_transitions() {
        assert!(Pending.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(InProgress.can_transition_to(Cancelled));
        assert!(Completed.can_transition_to(Completed));
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(InProgress));
        assert!(!InProgress.can_transition_to(Pending));
    }

    #[test]
    fn test_status_serde_matches_database_labels() {
        assert_eq!(serde_json::to_string(&InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(InProgress.to_string(), "in_progress");
    }
}
