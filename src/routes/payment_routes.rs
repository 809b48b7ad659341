use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::payment_controller::PaymentController;
use crate::dto::payment_dto::{PaymentPreviewRequest, PaymentSummaryResponse, TripEstimateQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_payment_router() -> Router<AppState> {
    Router::new()
        .route("/preview", post(preview_payment))
        .route("/manifests/:id", get(manifest_payment))
}

async fn preview_payment(
    State(state): State<AppState>,
    Json(request): Json<PaymentPreviewRequest>,
) -> Result<Json<PaymentSummaryResponse>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.preview(&request)?))
}

async fn manifest_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(trip): Query<TripEstimateQuery>,
) -> Result<Json<PaymentSummaryResponse>, AppError> {
    let controller = PaymentController::new(state.pool.clone());
    Ok(Json(controller.summary(id, &trip).await?))
}
