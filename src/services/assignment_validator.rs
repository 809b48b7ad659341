//! Validador de asignaciones
//!
//! Detecta si un conductor o vehículo ya está ocupado por otro manifiesto
//! activo (pending o in_progress). Es solo una advertencia: el llamador
//! puede confirmar y continuar.

use tracing::warn;
use uuid::Uuid;

use crate::models::ManifestAssignment;
use crate::utils::errors::{AppError, AssignmentConflict, BookedResource};

/// ¿Otro manifiesto activo usa ya este recurso?
pub fn is_resource_double_booked(
    manifests: &[ManifestAssignment],
    resource_id: Uuid,
    resource: BookedResource,
    exclude_manifest_id: Option<Uuid>,
) -> bool {
    conflicting_manifest(manifests, resource_id, resource, exclude_manifest_id).is_some()
}

fn conflicting_manifest(
    manifests: &[ManifestAssignment],
    resource_id: Uuid,
    resource: BookedResource,
    exclude_manifest_id: Option<Uuid>,
) -> Option<&ManifestAssignment> {
    manifests.iter().find(|manifest| {
        let assigned = match resource {
            BookedResource::Driver => manifest.driver_id,
            BookedResource::Vehicle => manifest.vehicle_id,
        };
        Some(manifest.id) != exclude_manifest_id
            && assigned == Some(resource_id)
            && manifest.status.is_active()
    })
}

/// Conflictos de conductor y vehículo, en ese orden
pub fn find_conflicts(
    manifests: &[ManifestAssignment],
    driver_id: Option<Uuid>,
    vehicle_id: Option<Uuid>,
    exclude_manifest_id: Option<Uuid>,
) -> Vec<AssignmentConflict> {
    [
        (BookedResource::Driver, driver_id),
        (BookedResource::Vehicle, vehicle_id),
    ]
    .into_iter()
    .filter_map(|(resource, id)| {
        let id = id?;
        conflicting_manifest(manifests, id, resource, exclude_manifest_id).map(|manifest| {
            AssignmentConflict {
                resource,
                resource_id: id,
                manifest_id: manifest.id,
                manifest_number: manifest.number.clone(),
            }
        })
    })
    .collect()
}

/// Sin confirmación, cualquier conflicto detiene la escritura
pub fn check_assignment(
    manifests: &[ManifestAssignment],
    driver_id: Option<Uuid>,
    vehicle_id: Option<Uuid>,
    exclude_manifest_id: Option<Uuid>,
    confirmed: bool,
) -> Result<(), AppError> {
    let conflicts = find_conflicts(manifests, driver_id, vehicle_id, exclude_manifest_id);
    if conflicts.is_empty() {
        return Ok(());
    }
    if !confirmed {
        return Err(AppError::AssignmentConflict(conflicts));
    }
    for conflict in &conflicts {
        warn!("⚠️ Doble asignación confirmada: {}", conflict.message());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ManifestStatus;

    fn manifest(number: &str, status: ManifestStatus, driver: Uuid, vehicle: Uuid) -> ManifestAssignment {
        ManifestAssignment {
            id: Uuid::new_v4(),
            number: number.to_string(),
            status,
            driver_id: Some(driver),
            vehicle_id: Some(vehicle),
        }
    }

    #[test]
    fn test_active_manifest_books_resource() {
        let driver = Uuid::new_v4();
        let vehicle = Uuid::new_v4();
        let manifests = vec![manifest("MAN-000001", ManifestStatus::InProgress, driver, vehicle)];

        assert!(is_resource_double_booked(&manifests, driver, BookedResource::Driver, None));
        assert!(is_resource_double_booked(&manifests, vehicle, BookedResource::Vehicle, None));
        assert!(!is_resource_double_booked(&manifests, vehicle, BookedResource::Driver, None));
    }

    #[test]
    fn test_edited_manifest_is_excluded() {
        let driver = Uuid::new_v4();
        let existing = manifest("MAN-000001", ManifestStatus::Pending, driver, Uuid::new_v4());
        let id = existing.id;

        assert!(!is_resource_double_booked(&[existing], driver, BookedResource::Driver, Some(id)));
    }

    #[test]
    fn test_finished_manifests_release_resources() {
        let driver = Uuid::new_v4();
        for status in [ManifestStatus::Completed, ManifestStatus::Cancelled] {
            let manifests = vec![manifest("MAN-000001", status, driver, Uuid::new_v4())];
            assert!(!is_resource_double_booked(&manifests, driver, BookedResource::Driver, None));
        }
    }

    #[test]
    fn test_conflict_requires_confirmation() {
        let driver = Uuid::new_v4();
        let manifests = vec![manifest("MAN-000007", ManifestStatus::InProgress, driver, Uuid::new_v4())];

        let error = check_assignment(&manifests, Some(driver), Some(Uuid::new_v4()), None, false)
            .unwrap_err();
        match error {
            AppError::AssignmentConflict(conflicts) => {
                assert_eq!(conflicts.len(), 1);
                assert_eq!(conflicts[0].manifest_number, "MAN-000007");
                assert_eq!(conflicts[0].resource, BookedResource::Driver);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(check_assignment(&manifests, Some(driver), None, None, true).is_ok());
    }
}
