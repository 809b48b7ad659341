//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::fleet_tracker::FleetTracker;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub fleet: FleetTracker,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, fleet: FleetTracker) -> Self {
        Self { pool, config, fleet }
    }
}
