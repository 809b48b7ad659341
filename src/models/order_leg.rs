//! Modelo de OrderLeg
//!
//! Un tramo es un segmento del cumplimiento de una orden. Los tramos hijos
//! de una división referencian al tramo original mediante `parent_leg_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::manifest::ManifestStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLeg {
    pub id: Uuid,
    pub order_id: Uuid,
    pub manifest_id: Option<Uuid>,
    pub sequence_number: i32,
    pub status: ManifestStatus,
    pub parent_leg_id: Option<Uuid>,
    pub split_point_id: Option<Uuid>,
    pub split_sequence: Option<i32>,
    pub split_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Tramo con el resumen del manifiesto enlazado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLegWithManifest {
    pub id: Uuid,
    pub order_id: Uuid,
    pub sequence_number: i32,
    pub status: ManifestStatus,
    pub parent_leg_id: Option<Uuid>,
    pub split_point_id: Option<Uuid>,
    pub split_sequence: Option<i32>,
    pub split_reason: Option<String>,
    pub manifest_id: Option<Uuid>,
    pub manifest_number: Option<String>,
    pub manifest_status: Option<ManifestStatus>,
    pub created_at: DateTime<Utc>,
}

/// Tramo pendiente de insertar
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLeg {
    pub order_id: Uuid,
    pub manifest_id: Option<Uuid>,
    pub sequence_number: i32,
    pub status: ManifestStatus,
    pub parent_leg_id: Option<Uuid>,
    pub split_point_id: Option<Uuid>,
    pub split_sequence: Option<i32>,
    pub split_reason: Option<String>,
}

impl NewOrderLeg {
    /// Tramo inicial de una orden recién creada
    pub fn initial(order_id: Uuid) -> Self {
        Self {
            order_id,
            manifest_id: None,
            sequence_number: 1,
            status: ManifestStatus::Pending,
            parent_leg_id: None,
            split_point_id: None,
            split_sequence: None,
            split_reason: None,
        }
    }
    /// Tramo creado junto con un manifiesto; hereda su estado
    pub fn for_manifest(order_id: Uuid, manifest_id: Uuid, status: ManifestStatus) -> Self {
        Self {
            manifest_id: Some(manifest_id),
            status,
            ..Self::initial(order_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_leg_is_pending_top_level() {
        let order_id = Uuid::new_v4();
        let leg = NewOrderLeg::initial(order_id);
        assert_eq!(leg.sequence_number, 1);
        assert_eq!(leg.status, ManifestStatus::Pending);
        assert!(leg.manifest_id.is_none());
        assert!(leg.parent_leg_id.is_none());
    }

    #[test]
    fn test_manifest_leg_carries_manifest_status() {
        let order_id = Uuid::new_v4();
        let manifest_id = Uuid::new_v4();
        let leg = NewOrderLeg::for_manifest(order_id, manifest_id, ManifestStatus::InProgress);

        assert_eq!(leg.order_id, order_id);
        assert_eq!(leg.manifest_id, Some(manifest_id));
        assert_eq!(leg.status, ManifestStatus::InProgress);
        assert_eq!(leg.sequence_number, 1);
        assert!(leg.parent_leg_id.is_none());
    }
}
