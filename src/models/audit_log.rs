//! Modelo de AuditLog
//!
//! Foto antes/después de una orden, añadida en cada creación o edición.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "audit_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Update,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub order_id: Uuid,
    pub action: AuditAction,
    pub table_name: String,
    pub record_id: Uuid,
    pub previous_data: Option<serde_json::Value>,
    pub new_data: serde_json::Value,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Entrada de auditoría pendiente de insertar
#[derive(Debug, Clone)]
pub struct NewAuditLog {
    pub order_id: Uuid,
    pub action: AuditAction,
    pub previous_data: Option<serde_json::Value>,
    pub new_data: serde_json::Value,
    pub created_by: String,
}
