use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::payment_dto::{PaymentPreviewRequest, PaymentSummaryResponse, TripEstimateQuery};
use crate::repositories::manifest_repository::ManifestRepository;
use crate::services::payment_calculator::summarize;
use crate::utils::errors::{bad_request_error, not_found_error, AppError};

pub struct PaymentController {
    manifests: ManifestRepository,
}

impl PaymentController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            manifests: ManifestRepository::new(pool),
        }
    }

    /// Resumen de pago de un manifiesto guardado
    pub async fn summary(
        &self,
        manifest_id: Uuid,
        trip: &TripEstimateQuery,
    ) -> Result<PaymentSummaryResponse, AppError> {
        let manifest = self
            .manifests
            .find_with_resources(manifest_id)
            .await?
            .ok_or_else(|| not_found_error("Manifest", &manifest_id.to_string()))?;

        summarize(
            Some(manifest.id),
            manifest.driver_payment_type,
            manifest.driver_rate,
            &trip.duration,
            &trip.distance,
        )
    }

    /// Misma aritmética sin manifiesto
    pub fn preview(&self, request: &PaymentPreviewRequest) -> Result<PaymentSummaryResponse, AppError> {
        if request.driver_rate <= Decimal::ZERO {
            return Err(bad_request_error("Valid driver rate is required"));
        }

        summarize(
            None,
            request.driver_payment_type,
            request.driver_rate,
            &request.duration,
            &request.distance,
        )
    }
}
