use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::dto::manifest_dto::{ManifestFilters, ManifestRequest};
use crate::models::{
    LegLocation, Manifest, ManifestAssignment, ManifestHistory, ManifestWithResources,
    NewLegLocation, NewManifestHistory, StopWithAddress,
};
use crate::utils::errors::{bad_request_error, map_write_error, AppError};

const MANIFEST_WITH_RESOURCES: &str = r#"
    SELECT m.id, m.number, m.manifest_type, m.order_type, m.status,
           m.driver_id, d.name AS driver_name,
           m.vehicle_id, v.number AS vehicle_number,
           m.trailer_id, t.number AS trailer_number,
           m.driver_payment_type, m.driver_rate, m.created_at, m.updated_at
    FROM manifests m
    LEFT JOIN drivers d ON d.id = m.driver_id
    LEFT JOIN vehicles v ON v.id = m.vehicle_id
    LEFT JOIN trailers t ON t.id = m.trailer_id
"#;

/// Dueño de una fila de leg_locations
#[derive(Debug, Clone, Copy)]
pub enum StopOwner {
    Manifest(Uuid),
    OrderLeg(Uuid),
}

pub struct ManifestRepository {
    pool: PgPool,
}

impl ManifestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_with_resources(&self, id: Uuid) -> Result<Option<ManifestWithResources>, AppError> {
        let sql = format!("{} WHERE m.id = $1", MANIFEST_WITH_RESOURCES);
        let manifest = sqlx::query_as::<_, ManifestWithResources>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(manifest)
    }

    pub async fn list(&self, filters: &ManifestFilters) -> Result<Vec<ManifestWithResources>, AppError> {
        let direction = filters.sort.unwrap_or_default().as_sql();
        let sql = format!(
            r#"{}
            WHERE ($1::manifest_status IS NULL OR m.status = $1)
              AND ($2::text IS NULL OR m.number ILIKE $2 OR d.name ILIKE $2 OR v.number ILIKE $2)
            ORDER BY m.created_at {}"#,
            MANIFEST_WITH_RESOURCES, direction
        );
        let search = filters
            .search
            .as_ref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", s));

        let manifests = sqlx::query_as::<_, ManifestWithResources>(&sql)
            .bind(filters.status)
            .bind(search)
            .fetch_all(&self.pool)
            .await?;
        Ok(manifests)
    }

    pub async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<ManifestWithResources>, AppError> {
        let sql = format!(
            "{} WHERE m.id IN (SELECT manifest_id FROM order_legs WHERE order_id = $1 AND manifest_id IS NOT NULL) ORDER BY m.created_at DESC",
            MANIFEST_WITH_RESOURCES
        );
        let manifests = sqlx::query_as::<_, ManifestWithResources>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(manifests)
    }

    pub async fn history(&self, manifest_id: Uuid) -> Result<Vec<ManifestHistory>, AppError> {
        let entries = sqlx::query_as::<_, ManifestHistory>(
            "SELECT * FROM manifest_history WHERE manifest_id = $1 ORDER BY changed_at DESC",
        )
        .bind(manifest_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn stops_with_address(&self, manifest_id: Uuid) -> Result<Vec<StopWithAddress>, AppError> {
        let stops = sqlx::query_as::<_, StopWithAddress>(
            r#"
            SELECT ll.id, ll.type, ll.name, ll.street_address,
                   c.name AS city_name, s.name AS state_name, co.name AS country_name,
                   ll.date, ll.time, ll.sequence_number
            FROM leg_locations ll
            JOIN cities c ON c.id = ll.city_id
            JOIN states s ON s.id = c.state_id
            JOIN countries co ON co.id = s.country_id
            WHERE ll.manifest_id = $1
            ORDER BY ll.sequence_number
            "#,
        )
        .bind(manifest_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(stops)
    }

    // Operaciones dentro de una transacción

    /// Manifiestos activos que usan el conductor o el vehículo
    pub async fn active_assignments(
        conn: &mut PgConnection,
        driver_id: Option<Uuid>,
        vehicle_id: Option<Uuid>,
    ) -> Result<Vec<ManifestAssignment>, AppError> {
        let manifests = sqlx::query_as::<_, ManifestAssignment>(
            r#"
            SELECT id, number, status, driver_id, vehicle_id
            FROM manifests
            WHERE status IN ('pending', 'in_progress')
              AND (driver_id = $1 OR vehicle_id = $2)
            ORDER BY created_at
            "#,
        )
        .bind(driver_id)
        .bind(vehicle_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(manifests)
    }

    pub async fn insert(conn: &mut PgConnection, request: &ManifestRequest) -> Result<Manifest, AppError> {
        let manifest = sqlx::query_as::<_, Manifest>(
            r#"
            INSERT INTO manifests (manifest_type, order_type, status, driver_id, vehicle_id, trailer_id,
                                   driver_payment_type, driver_rate)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(request.manifest_type)
        .bind(request.order_type)
        .bind(request.status)
        .bind(request.driver_id)
        .bind(request.vehicle_id)
        .bind(request.trailer_id)
        .bind(request.driver_payment_type)
        .bind(rate_of(request)?)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_write_error)?;
        Ok(manifest)
    }

    pub async fn find_for_update(conn: &mut PgConnection, id: Uuid) -> Result<Option<Manifest>, AppError> {
        let manifest = sqlx::query_as::<_, Manifest>("SELECT * FROM manifests WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(manifest)
    }

    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        request: &ManifestRequest,
    ) -> Result<Manifest, AppError> {
        let manifest = sqlx::query_as::<_, Manifest>(
            r#"
            UPDATE manifests
            SET manifest_type = $2, order_type = $3, status = $4, driver_id = $5, vehicle_id = $6,
                trailer_id = $7, driver_payment_type = $8, driver_rate = $9, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.manifest_type)
        .bind(request.order_type)
        .bind(request.status)
        .bind(request.driver_id)
        .bind(request.vehicle_id)
        .bind(request.trailer_id)
        .bind(request.driver_payment_type)
        .bind(rate_of(request)?)
        .fetch_one(&mut *conn)
        .await
        .map_err(map_write_error)?;
        Ok(manifest)
    }

    /// Historial con los nombres de conductor y vehículo del momento
    pub async fn insert_history(
        conn: &mut PgConnection,
        entry: &NewManifestHistory,
    ) -> Result<ManifestHistory, AppError> {
        let history = sqlx::query_as::<_, ManifestHistory>(
            r#"
            INSERT INTO manifest_history (manifest_id, manifest_number, previous_status, new_status,
                                          driver_id, driver_name, vehicle_id, vehicle_number, changed_by)
            VALUES ($1, $2, $3, $4,
                    $5, (SELECT name FROM drivers WHERE id = $5),
                    $6, (SELECT number FROM vehicles WHERE id = $6),
                    $7)
            RETURNING *
            "#,
        )
        .bind(entry.manifest_id)
        .bind(&entry.manifest_number)
        .bind(entry.previous_status)
        .bind(entry.new_status)
        .bind(entry.driver_id)
        .bind(entry.vehicle_id)
        .bind(&entry.changed_by)
        .fetch_one(&mut *conn)
        .await?;
        Ok(history)
    }

    pub async fn delete_stops(conn: &mut PgConnection, manifest_id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM leg_locations WHERE manifest_id = $1")
            .bind(manifest_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn insert_stops(
        conn: &mut PgConnection,
        owner: StopOwner,
        stops: &[NewLegLocation],
    ) -> Result<Vec<LegLocation>, AppError> {
        let (manifest_id, order_leg_id) = match owner {
            StopOwner::Manifest(id) => (Some(id), None),
            StopOwner::OrderLeg(id) => (None, Some(id)),
        };

        let mut inserted = Vec::with_capacity(stops.len());
        for stop in stops {
            let row = sqlx::query_as::<_, LegLocation>(
                r#"
                INSERT INTO leg_locations (manifest_id, order_leg_id, type, name, street_address, city_id,
                                           date, time, contact_name, contact_phone, terminal_id,
                                           special_instructions, sequence_number)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING *
                "#,
            )
            .bind(manifest_id)
            .bind(order_leg_id)
            .bind(stop.location_type)
            .bind(&stop.name)
            .bind(&stop.street_address)
            .bind(stop.city_id)
            .bind(stop.date)
            .bind(&stop.time)
            .bind(&stop.contact_name)
            .bind(&stop.contact_phone)
            .bind(stop.terminal_id)
            .bind(&stop.special_instructions)
            .bind(stop.sequence_number)
            .fetch_one(&mut *conn)
            .await
            .map_err(map_write_error)?;
            inserted.push(row);
        }
        Ok(inserted)
    }
}

fn rate_of(request: &ManifestRequest) -> Result<Decimal, AppError> {
    request
        .driver_rate
        .ok_or_else(|| bad_request_error("Valid driver rate is required"))
}
