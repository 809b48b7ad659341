use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::split_dto::SplitPointInput;
use crate::models::{NewOrderLeg, OrderLeg, OrderLegWithManifest, SplitPoint, SplitPointType};
use crate::utils::errors::AppError;

pub struct OrderLegRepository {
    pool: PgPool,
}

impl OrderLegRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn legs_with_manifest(&self, order_id: Uuid) -> Result<Vec<OrderLegWithManifest>, AppError> {
        let legs = sqlx::query_as::<_, OrderLegWithManifest>(
            r#"
            SELECT ol.id, ol.order_id, ol.sequence_number, ol.status, ol.parent_leg_id,
                   ol.split_point_id, ol.split_sequence, ol.split_reason,
                   ol.manifest_id, m.number AS manifest_number, m.status AS manifest_status,
                   ol.created_at
            FROM order_legs ol
            LEFT JOIN manifests m ON m.id = ol.manifest_id
            WHERE ol.order_id = $1
            ORDER BY ol.sequence_number, ol.split_sequence NULLS FIRST, ol.created_at
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(legs)
    }

    pub async fn insert(conn: &mut PgConnection, leg: &NewOrderLeg) -> Result<OrderLeg, AppError> {
        let leg = sqlx::query_as::<_, OrderLeg>(
            r#"
            INSERT INTO order_legs (order_id, manifest_id, sequence_number, status, parent_leg_id,
                                    split_point_id, split_sequence, split_reason)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(leg.order_id)
        .bind(leg.manifest_id)
        .bind(leg.sequence_number)
        .bind(leg.status)
        .bind(leg.parent_leg_id)
        .bind(leg.split_point_id)
        .bind(leg.split_sequence)
        .bind(&leg.split_reason)
        .fetch_one(&mut *conn)
        .await?;
        Ok(leg)
    }

    /// Primer tramo sin padre de la orden, bloqueado para la transacción
    pub async fn top_level_leg(conn: &mut PgConnection, order_id: Uuid) -> Result<Option<OrderLeg>, AppError> {
        let leg = sqlx::query_as::<_, OrderLeg>(
            r#"
            SELECT * FROM order_legs
            WHERE order_id = $1 AND parent_leg_id IS NULL
            ORDER BY sequence_number, created_at
            LIMIT 1
            FOR UPDATE
            "#,
        )
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(leg)
    }

    /// Enlaza el manifiesto con los tramos sin padre de la orden
    pub async fn assign_manifest_to_top_level(
        conn: &mut PgConnection,
        order_id: Uuid,
        manifest_id: Uuid,
    ) -> Result<u64, AppError> {
        let result = sqlx::query(
            "UPDATE order_legs SET manifest_id = $2 WHERE order_id = $1 AND parent_leg_id IS NULL",
        )
        .bind(order_id)
        .bind(manifest_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert_split_point(
        conn: &mut PgConnection,
        split_point: &SplitPointInput,
    ) -> Result<SplitPoint, AppError> {
        let (point_type, latitude, longitude, street_address, city_id, terminal_id) = match split_point {
            SplitPointInput::Gps { latitude, longitude, .. } => {
                (SplitPointType::Gps, Some(*latitude), Some(*longitude), None, None, None)
            }
            SplitPointInput::Location { street_address, city_id, .. } => (
                SplitPointType::Location,
                None,
                None,
                Some(street_address.trim().to_string()),
                Some(*city_id),
                None,
            ),
            SplitPointInput::Terminal { terminal_id, .. } => {
                (SplitPointType::Terminal, None, None, None, None, Some(*terminal_id))
            }
        };

        let row = sqlx::query_as::<_, SplitPoint>(
            r#"
            INSERT INTO split_points (name, type, latitude, longitude, street_address, city_id, terminal_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(split_point.name().trim())
        .bind(point_type)
        .bind(latitude)
        .bind(longitude)
        .bind(street_address)
        .bind(city_id)
        .bind(terminal_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(row)
    }
}
