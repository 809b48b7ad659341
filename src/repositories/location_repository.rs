use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{City, Country, State, Terminal};
use crate::services::location_resolver::LocationLookup;
use crate::utils::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct LocationRepository {
    pool: PgPool,
}

impl LocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        let countries = sqlx::query_as::<_, Country>("SELECT id, name, code FROM countries ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(countries)
    }

    pub async fn states(&self, country_id: Uuid) -> Result<Vec<State>, AppError> {
        let states = sqlx::query_as::<_, State>(
            "SELECT id, country_id, name, code FROM states WHERE country_id = $1 ORDER BY name",
        )
        .bind(country_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(states)
    }

    pub async fn cities(&self, state_id: Uuid) -> Result<Vec<City>, AppError> {
        let cities = sqlx::query_as::<_, City>(
            "SELECT id, state_id, name FROM cities WHERE state_id = $1 ORDER BY name",
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cities)
    }

    pub async fn terminals(&self) -> Result<Vec<Terminal>, AppError> {
        let terminals = sqlx::query_as::<_, Terminal>(
            r#"
            SELECT t.id, t.name, t.street_address, t.city_id,
                   c.name AS city_name, s.name AS state_name, co.name AS country_name
            FROM terminals t
            JOIN cities c ON c.id = t.city_id
            JOIN states s ON s.id = c.state_id
            JOIN countries co ON co.id = s.country_id
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(terminals)
    }
}

#[async_trait]
impl LocationLookup for LocationRepository {
    async fn states_by_country(&self, country_id: Uuid) -> AppResult<Vec<State>> {
        self.states(country_id).await
    }

    async fn cities_by_state(&self, state_id: Uuid) -> AppResult<Vec<City>> {
        self.cities(state_id).await
    }
}
