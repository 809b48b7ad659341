use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::reference_controller::{AvailableResources, ReferenceController};
use crate::dto::reference_dto::ResourceQuery;
use crate::models::{City, Country, Driver, State as Province, Terminal, Trailer, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_location_router() -> Router<AppState> {
    Router::new()
        .route("/countries", get(list_countries))
        .route("/countries/:id/states", get(list_states))
        .route("/states/:id/cities", get(list_cities))
        .route("/terminals", get(list_terminals))
}

pub fn create_resource_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_available))
        .route("/drivers", get(list_drivers))
        .route("/vehicles", get(list_vehicles))
        .route("/trailers", get(list_trailers))
}

async fn list_countries(State(state): State<AppState>) -> Result<Json<Vec<Country>>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.countries().await?))
}

async fn list_states(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<Vec<Province>> {
    let controller = ReferenceController::new(state.pool.clone());
    Json(controller.states(id).await)
}

async fn list_cities(State(state): State<AppState>, Path(id): Path<Uuid>) -> Json<Vec<City>> {
    let controller = ReferenceController::new(state.pool.clone());
    Json(controller.cities(id).await)
}

async fn list_terminals(State(state): State<AppState>) -> Result<Json<Vec<Terminal>>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.terminals().await?))
}

async fn list_available(State(state): State<AppState>) -> Result<Json<AvailableResources>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.available_resources().await?))
}

async fn list_drivers(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<Driver>>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.drivers(query.status).await?))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.vehicles(query.status).await?))
}

async fn list_trailers(
    State(state): State<AppState>,
    Query(query): Query<ResourceQuery>,
) -> Result<Json<Vec<Trailer>>, AppError> {
    let controller = ReferenceController::new(state.pool.clone());
    Ok(Json(controller.trailers(query.status).await?))
}
