//! Planificación de la división de un tramo
//!
//! Dividir un tramo produce siempre exactamente dos tramos hijos que
//! comparten el mismo punto de división y referencian al tramo original.
//! El tramo original y su manifiesto no se modifican.

use uuid::Uuid;

use crate::dto::split_dto::{SplitLegInput, SplitPointInput};
use crate::models::{ManifestStatus, NewLegLocation, NewOrderLeg, OrderLeg};
use crate::services::stop_planner::plan_stops;
use crate::utils::validation::{validate_coordinates, validation_message, FormErrors};

/// Número de tramos que produce una división
pub const SPLIT_CHILDREN: usize = 2;

/// Validar el punto de división y la razón
pub fn validate_split(split_point: &SplitPointInput, reason: &str) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    if split_point.name().trim().is_empty() {
        errors.field("split_point.name", "Split point name is required");
    }
    if reason.trim().is_empty() {
        errors.field("reason", "Split reason is required");
    }

    match split_point {
        SplitPointInput::Gps { latitude, longitude, .. } => {
            if let Err(error) = validate_coordinates(*latitude, *longitude) {
                errors.field(format!("split_point.{}", error.code), validation_message(&error));
            }
        }
        SplitPointInput::Location { street_address, .. } => {
            if street_address.trim().is_empty() {
                errors.field("split_point.street_address", "Street address is required");
            }
        }
        SplitPointInput::Terminal { .. } => {}
    }

    errors.into_result()
}

/// Los dos tramos hijos del tramo `parent`
pub fn plan_child_legs(parent: &OrderLeg, split_point_id: Uuid, reason: &str) -> Vec<NewOrderLeg> {
    (1..=SPLIT_CHILDREN as i32)
        .map(|split_sequence| NewOrderLeg {
            order_id: parent.order_id,
            manifest_id: None,
            sequence_number: parent.sequence_number,
            status: ManifestStatus::Pending,
            parent_leg_id: Some(parent.id),
            split_point_id: Some(split_point_id),
            split_sequence: Some(split_sequence),
            split_reason: Some(reason.trim().to_string()),
        })
        .collect()
}

/// Paradas opcionales de cada tramo hijo, como mucho dos tramos
pub fn plan_leg_stops(legs: &[SplitLegInput]) -> Result<Vec<Vec<NewLegLocation>>, FormErrors> {
    let mut errors = FormErrors::new();
    if legs.len() > SPLIT_CHILDREN {
        errors.field("legs", "A split produces exactly two legs");
        return Err(errors);
    }

    let mut planned = Vec::with_capacity(legs.len());
    for (index, leg) in legs.iter().enumerate() {
        match plan_stops(&format!("legs[{}].stops", index), &leg.stops) {
            Ok(stops) => planned.push(stops),
            Err(stop_errors) => errors.merge(stop_errors),
        }
    }

    errors.into_result().map(|_| planned)
}
