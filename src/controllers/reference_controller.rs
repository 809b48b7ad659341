use serde::Serialize;
use sqlx::PgPool;

use crate::models::{City, Country, Driver, ResourceStatus, State, Terminal, Trailer, Vehicle};
use crate::repositories::fleet_repository::FleetRepository;
use crate::repositories::location_repository::LocationRepository;
use crate::services::location_resolver::LocationResolver;
use crate::utils::errors::AppError;
use uuid::Uuid;

/// Recursos disponibles para el formulario de manifiesto
#[derive(Debug, Serialize)]
pub struct AvailableResources {
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub trailers: Vec<Trailer>,
}

pub struct ReferenceController {
    locations: LocationRepository,
    fleet: FleetRepository,
}

impl ReferenceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            locations: LocationRepository::new(pool.clone()),
            fleet: FleetRepository::new(pool),
        }
    }

    pub async fn countries(&self) -> Result<Vec<Country>, AppError> {
        self.locations.countries().await
    }

    pub async fn states(&self, country_id: Uuid) -> Vec<State> {
        LocationResolver::new(self.locations.clone()).states(country_id).await
    }

    pub async fn cities(&self, state_id: Uuid) -> Vec<City> {
        LocationResolver::new(self.locations.clone()).cities(state_id).await
    }

    pub async fn terminals(&self) -> Result<Vec<Terminal>, AppError> {
        self.locations.terminals().await
    }

    pub async fn drivers(&self, status: Option<ResourceStatus>) -> Result<Vec<Driver>, AppError> {
        self.fleet.drivers(status).await
    }

    pub async fn vehicles(&self, status: Option<ResourceStatus>) -> Result<Vec<Vehicle>, AppError> {
        self.fleet.vehicles(status).await
    }

    pub async fn trailers(&self, status: Option<ResourceStatus>) -> Result<Vec<Trailer>, AppError> {
        self.fleet.trailers(status).await
    }

    /// Conductores, vehículos y remolques activos en paralelo
    pub async fn available_resources(&self) -> Result<AvailableResources, AppError> {
        let active = Some(ResourceStatus::Active);
        let (drivers, vehicles, trailers) = futures::try_join!(
            self.fleet.drivers(active),
            self.fleet.vehicles(active),
            self.fleet.trailers(active),
        )?;

        Ok(AvailableResources {
            drivers,
            vehicles,
            trailers,
        })
    }
}
