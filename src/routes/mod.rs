//! Rutas HTTP
//!
//! Cada grupo expone su `create_*_router`; `create_router` los monta bajo
//! `/api` junto con el health check.

pub mod fleet_routes;
pub mod manifest_routes;
pub mod order_routes;
pub mod payment_routes;
pub mod reference_routes;

use axum::{routing::get, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la aplicación
pub fn create_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/orders", order_routes::create_order_router(state.clone()))
        .nest("/api/manifests", manifest_routes::create_manifest_router(state.clone()))
        .nest("/api/locations", reference_routes::create_location_router())
        .nest("/api/resources", reference_routes::create_resource_router())
        .nest("/api/payments", payment_routes::create_payment_router())
        .nest("/api/fleet", fleet_routes::create_fleet_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "freight-dispatch",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
