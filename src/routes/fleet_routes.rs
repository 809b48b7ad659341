use axum::{extract::State, routing::get, Json, Router};

use crate::services::fleet_tracker::FleetSnapshot;
use crate::state::AppState;

pub fn create_fleet_router() -> Router<AppState> {
    Router::new().route("/vehicles", get(list_vehicle_locations))
}

/// Última foto de la telemetría
async fn list_vehicle_locations(State(state): State<AppState>) -> Json<FleetSnapshot> {
    Json(state.fleet.snapshot().await)
}
