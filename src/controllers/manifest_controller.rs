use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::common_dto::ApiResponse;
use crate::dto::manifest_dto::{ManifestFilters, ManifestRequest, ManifestStopInput, ManifestStopsResponse};
use crate::dto::reference_dto::RouteSummaryResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{
    Manifest, ManifestHistory, ManifestStatus, ManifestWithResources, NewManifestHistory, NewOrderLeg,
};
use crate::repositories::manifest_repository::{ManifestRepository, StopOwner};
use crate::repositories::order_leg_repository::OrderLegRepository;
use crate::repositories::order_repository::OrderRepository;
use crate::services::assignment_validator::check_assignment;
use crate::services::route_summary;
use crate::services::stop_planner::plan_stops;
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::validate_request;

pub struct ManifestController {
    pool: PgPool,
    manifests: ManifestRepository,
}

impl ManifestController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            manifests: ManifestRepository::new(pool.clone()),
            pool,
        }
    }

    /// Crear un manifiesto enlazado a la orden, con su entrada de historial
    pub async fn create_for_order(
        &self,
        actor: &AuthenticatedUser,
        order_id: Uuid,
        request: ManifestRequest,
    ) -> Result<ApiResponse<Manifest>, AppError> {
        validate_request(&request)?;

        let mut tx = self.pool.begin().await?;

        if OrderRepository::find_for_update(&mut tx, order_id).await?.is_none() {
            return Err(not_found_error("Order", &order_id.to_string()));
        }

        let active =
            ManifestRepository::active_assignments(&mut tx, request.driver_id, request.vehicle_id).await?;
        check_assignment(&active, request.driver_id, request.vehicle_id, None, request.confirm)?;

        let manifest = ManifestRepository::insert(&mut tx, &request).await?;
        OrderLegRepository::insert(
            &mut tx,
            &NewOrderLeg::for_manifest(order_id, manifest.id, manifest.status),
        )
        .await?;
        ManifestRepository::insert_history(&mut tx, &history_entry(&manifest, None, actor)).await?;

        tx.commit().await?;

        info!(
            "🚛 Manifiesto {} creado para la orden {} por {}",
            manifest.number,
            order_id,
            actor.actor_label()
        );

        Ok(ApiResponse::success_with_message(manifest, "Manifest created successfully"))
    }

    /// Editar un manifiesto validando la transición de estado
    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: ManifestRequest,
    ) -> Result<ApiResponse<Manifest>, AppError> {
        validate_request(&request)?;

        let mut tx = self.pool.begin().await?;

        let current = ManifestRepository::find_for_update(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_error("Manifest", &id.to_string()))?;
        ensure_transition(current.status, request.status)?;

        let active =
            ManifestRepository::active_assignments(&mut tx, request.driver_id, request.vehicle_id).await?;
        check_assignment(&active, request.driver_id, request.vehicle_id, Some(id), request.confirm)?;

        let manifest = ManifestRepository::update(&mut tx, id, &request).await?;
        ManifestRepository::insert_history(
            &mut tx,
            &history_entry(&manifest, Some(current.status), actor),
        )
        .await?;

        tx.commit().await?;

        info!(
            "✏️ Manifiesto {} actualizado ({} → {}) por {}",
            manifest.number,
            current.status,
            manifest.status,
            actor.actor_label()
        );

        Ok(ApiResponse::success_with_message(manifest, "Manifest updated successfully"))
    }

    pub async fn list(&self, filters: &ManifestFilters) -> Result<Vec<ManifestWithResources>, AppError> {
        self.manifests.list(filters).await
    }

    pub async fn list_for_order(&self, order_id: Uuid) -> Result<Vec<ManifestWithResources>, AppError> {
        self.manifests.list_for_order(order_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<ManifestWithResources, AppError> {
        self.manifests
            .find_with_resources(id)
            .await?
            .ok_or_else(|| not_found_error("Manifest", &id.to_string()))
    }

    /// Historial más reciente primero; sin filas se deriva una entrada del propio manifiesto
    pub async fn history(&self, id: Uuid) -> Result<Vec<ManifestHistory>, AppError> {
        let manifest = self.get(id).await?;
        let entries = self.manifests.history(id).await?;
        if entries.is_empty() {
            return Ok(vec![ManifestHistory::synthetic_from(&manifest)]);
        }
        Ok(entries)
    }

    /// Reemplazar las paradas del manifiesto
    pub async fn save_stops(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        stops: Vec<ManifestStopInput>,
    ) -> Result<ApiResponse<ManifestStopsResponse>, AppError> {
        let planned = plan_stops("stops", &stops).map_err(AppError::FormValidation)?;

        let mut tx = self.pool.begin().await?;

        if ManifestRepository::find_for_update(&mut tx, id).await?.is_none() {
            return Err(not_found_error("Manifest", &id.to_string()));
        }
        ManifestRepository::delete_stops(&mut tx, id).await?;
        let saved = ManifestRepository::insert_stops(&mut tx, StopOwner::Manifest(id), &planned).await?;

        tx.commit().await?;

        info!(
            "📍 {} paradas guardadas en el manifiesto {} por {}",
            saved.len(),
            id,
            actor.actor_label()
        );

        Ok(ApiResponse::success_with_message(
            ManifestStopsResponse {
                manifest_id: id,
                stops: saved,
            },
            "Manifest saved successfully",
        ))
    }

    pub async fn route_summary(&self, id: Uuid, api_key: Option<&str>) -> Result<RouteSummaryResponse, AppError> {
        self.get(id).await?;
        let stops = self.manifests.stops_with_address(id).await?;
        let (stops, map_url) = route_summary::summarize(stops, api_key);

        Ok(RouteSummaryResponse {
            manifest_id: id,
            stops,
            map_url,
        })
    }
}

pub fn ensure_transition(from: ManifestStatus, to: ManifestStatus) -> Result<(), AppError> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::InvalidStatusTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }
}

fn history_entry(
    manifest: &Manifest,
    previous_status: Option<ManifestStatus>,
    actor: &AuthenticatedUser,
) -> NewManifestHistory {
    NewManifestHistory {
        manifest_id: manifest.id,
        manifest_number: manifest.number.clone(),
        previous_status,
        new_status: manifest.status,
        driver_id: manifest.driver_id,
        vehicle_id: manifest.vehicle_id,
        changed_by: actor.actor_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_transition() {
        assert!(ensure_transition(ManifestStatus::Pending, ManifestStatus::InProgress).is_ok());
        let error = ensure_transition(ManifestStatus::Completed, ManifestStatus::Pending).unwrap_err();
        assert_eq!(error.to_string(), "Invalid status transition from completed to pending");
    }
}
