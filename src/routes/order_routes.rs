use axum::{
    extract::{Path, State},
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::manifest_controller::ManifestController;
use crate::controllers::order_controller::OrderController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::manifest_dto::ManifestRequest;
use crate::dto::order_dto::{
    AssignManifestRequest, AuditLogListResponse, CreateOrderRequest, OrderCreatedResponse,
    OrderDetailResponse, OrderEditContext, OrderSummaryResponse, UpdateOrderRequest,
    ValidateStepRequest, ValidateStepResponse,
};
use crate::dto::split_dto::{SplitOrderRequest, SplitOrderResponse};
use crate::middleware::auth::{require_session, AuthenticatedUser};
use crate::models::{Manifest, ManifestWithResources};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_order))
        .route("/:id", put(update_order))
        .route("/:id/split", post(split_order))
        .route("/:id/manifests", post(create_manifest_for_order))
        .route("/:id/manifest", put(assign_manifest))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/", get(list_orders))
        .route("/validate-step", post(validate_step))
        .route("/:id", get(get_order))
        .route("/:id/edit-context", get(get_edit_context))
        .route("/:id/audit-logs", get(list_audit_logs))
        .route("/:id/manifests", get(list_order_manifests))
        .merge(protected)
}

async fn create_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<ApiResponse<OrderCreatedResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.create(&user, request).await?;
    Ok(Json(response))
}

async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderSummaryResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.list().await?;
    Ok(Json(response))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderDetailResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.get(id).await?;
    Ok(Json(response))
}

async fn get_edit_context(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderEditContext>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.edit_context(id).await?;
    Ok(Json(response))
}

async fn update_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateOrderRequest>,
) -> Result<Json<ApiResponse<OrderSummaryResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.update(&user, id, request).await?;
    Ok(Json(response))
}

async fn list_audit_logs(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AuditLogListResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.audit_logs(id).await?;
    Ok(Json(response))
}

async fn validate_step(
    State(state): State<AppState>,
    Json(request): Json<ValidateStepRequest>,
) -> Result<Json<ValidateStepResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.validate_step(&request)?;
    Ok(Json(response))
}

async fn split_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<SplitOrderRequest>,
) -> Result<Json<ApiResponse<SplitOrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.split(&user, id, request).await?;
    Ok(Json(response))
}

async fn create_manifest_for_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<ManifestRequest>,
) -> Result<Json<ApiResponse<Manifest>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.create_for_order(&user, id, request).await?;
    Ok(Json(response))
}

async fn list_order_manifests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ManifestWithResources>>, AppError> {
    let controller = ManifestController::new(state.pool.clone());
    let response = controller.list_for_order(id).await?;
    Ok(Json(response))
}

async fn assign_manifest(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<AssignManifestRequest>,
) -> Result<Json<ApiResponse<OrderDetailResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.assign_manifest(&user, id, request.manifest_id).await?;
    Ok(Json(response))
}
