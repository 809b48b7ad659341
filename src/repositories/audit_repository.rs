use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{AuditLog, NewAuditLog};
use crate::utils::errors::AppError;

pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<AuditLog>, AppError> {
        let entries = sqlx::query_as::<_, AuditLog>(
            "SELECT * FROM audit_logs WHERE order_id = $1 ORDER BY created_at DESC",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn insert(conn: &mut PgConnection, entry: &NewAuditLog) -> Result<AuditLog, AppError> {
        let log = sqlx::query_as::<_, AuditLog>(
            r#"
            INSERT INTO audit_logs (order_id, action, table_name, record_id, previous_data, new_data, created_by)
            VALUES ($1, $2, 'orders', $1, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(entry.order_id)
        .bind(entry.action)
        .bind(&entry.previous_data)
        .bind(&entry.new_data)
        .bind(&entry.created_by)
        .fetch_one(&mut *conn)
        .await?;
        Ok(log)
    }
}
