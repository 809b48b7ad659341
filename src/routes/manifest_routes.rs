use axum::{
    extract::{Path, Query, State},
    middleware,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::manifest_controller::ManifestController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::manifest_dto::{ManifestFilters, ManifestRequest, ManifestStopsResponse, SaveStopsRequest};
use crate::dto::reference_dto::RouteSummaryResponse;
use crate::middleware::auth::{require_session, AuthenticatedUser};
use crate::models::{Manifest, ManifestHistory, ManifestWithResources};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_manifest_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/:id", put(update_manifest))
        .route("/:id/stops", put(save_stops))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/", get(list_manifests))
        .route("/:id", get(get_manifest))
        .route("/:id/history", get(get_history))
        .route("/:id/route", get(get_route_summary))
        .merge(protected)
}

async fn list_manifests(
    State(state): State<AppState>,
    Query(filters): Query<ManifestFilters>,
) -> Result<Json<Vec<ManifestWithResources>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.list(&filters).await?;
    Ok(Json(response))
}

async fn get_manifest(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ManifestWithResources>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn update_manifest(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ManifestRequest>,
) -> Result<Json<ApiResponse<Manifest>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn get_history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ManifestHistory>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.history(id).await?;
    Ok(Json(response))
}

async fn save_stops(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<SaveStopsRequest>,
) -> Result<Json<ApiResponse<ManifestStopsResponse>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.save_stops(&user, id, request.stops).await?;
    Ok(Json(response))
}

async fn get_route_summary(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RouteSummaryResponse>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller
        .route_summary(id, state.config.static_map_api_key.as_deref())
        .await?;
    Ok(Json(response))
}
