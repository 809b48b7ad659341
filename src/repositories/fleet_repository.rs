use sqlx::PgPool;

use crate::models::{Driver, ResourceStatus, Trailer, Vehicle};
use crate::utils::errors::AppError;

pub struct FleetRepository {
    pool: PgPool,
}

impl FleetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn drivers(&self, status: Option<ResourceStatus>) -> Result<Vec<Driver>, AppError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT id, name, status FROM drivers WHERE ($1::resource_status IS NULL OR status = $1) ORDER BY name",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(drivers)
    }

    pub async fn vehicles(&self, status: Option<ResourceStatus>) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = sqlx::query_as::<_, Vehicle>(
            "SELECT id, number, type, status FROM vehicles WHERE ($1::resource_status IS NULL OR status = $1) ORDER BY number",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(vehicles)
    }

    pub async fn trailers(&self, status: Option<ResourceStatus>) -> Result<Vec<Trailer>, AppError> {
        let trailers = sqlx::query_as::<_, Trailer>(
            "SELECT id, number, type, status FROM trailers WHERE ($1::resource_status IS NULL OR status = $1) ORDER BY number",
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(trailers)
    }
}
