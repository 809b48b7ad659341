//! Validación de formularios de orden
//!
//! Valida el asistente de creación paso a paso (datos del cliente, detalles
//! de carga, ubicaciones) y el formulario de edición del detalle. Ninguna
//! función escribe en la base de datos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::dto::order_dto::{CreateOrderRequest, NewLocation, OrderFormStep, UpdateOrderRequest};
use crate::models::LocationType;
use crate::services::order_planner::plan_locations;
use crate::utils::validation::{combine_date_time, validation_message, FormErrors};

pub const PICKUP_BEFORE_DELIVERY: &str = "Pickup dates must be earlier than delivery dates";

/// Ubicación existente editada, ya normalizada
#[derive(Debug, Clone, PartialEq)]
pub struct LocationChange {
    pub id: Uuid,
    pub name: String,
    pub street_address: String,
    pub city_id: Uuid,
    pub date: DateTime<Utc>,
    pub time: String,
    pub special_instructions: Option<String>,
}

/// Validar un paso del asistente
pub fn validate_step(step: OrderFormStep, request: &CreateOrderRequest) -> FormErrors {
    match step {
        OrderFormStep::Locations => match validate_locations(request) {
            Ok(_) => FormErrors::new(),
            Err(errors) => errors,
        },
        _ => scalar_errors(request, step.fields()),
    }
}

/// Validar la orden completa y devolver las ubicaciones planificadas
pub fn validate_create_order(request: &CreateOrderRequest) -> Result<Vec<NewLocation>, FormErrors> {
    let mut errors = scalar_errors(request, OrderFormStep::CustomerInfo.fields());
    errors.merge(scalar_errors(request, OrderFormStep::LoadDetails.fields()));

    match validate_locations(request) {
        Ok(planned) if errors.is_empty() => Ok(planned),
        Ok(_) => Err(errors),
        Err(location_errors) => {
            errors.merge(location_errors);
            Err(errors)
        }
    }
}

fn scalar_errors(request: &CreateOrderRequest, fields: &[&str]) -> FormErrors {
    let mut errors = FormErrors::new();
    if let Err(validation) = request.validate() {
        absorb_selected(&mut errors, &validation, fields);
    }
    errors
}

fn absorb_selected(errors: &mut FormErrors, validation: &ValidationErrors, fields: &[&str]) {
    for (field, field_errors) in validation.field_errors() {
        if !fields.contains(&field) {
            continue;
        }
        if let Some(first) = field_errors.first() {
            errors.field(field, validation_message(first));
        }
    }
}

/// Paso 3: ubicaciones completas y recogidas estrictamente antes que entregas
fn validate_locations(request: &CreateOrderRequest) -> Result<Vec<NewLocation>, FormErrors> {
    let mut errors = FormErrors::new();
    if request.pickup_locations.is_empty() {
        errors.field("pickup_locations", "At least one pickup location is required");
    }
    if request.delivery_locations.is_empty() {
        errors.field("delivery_locations", "At least one delivery location is required");
    }

    let planned = match plan_locations(&request.pickup_locations, &request.delivery_locations) {
        Ok(planned) => planned,
        Err(location_errors) => {
            errors.merge(location_errors);
            return Err(errors);
        }
    };
    errors.into_result()?;

    if !pickups_precede_deliveries(&planned) {
        let mut errors = FormErrors::new();
        errors.form_error(PICKUP_BEFORE_DELIVERY);
        return Err(errors);
    }

    Ok(planned)
}

/// max(recogidas) < min(entregas)
pub fn pickups_precede_deliveries(locations: &[NewLocation]) -> bool {
    let latest_pickup = locations
        .iter()
        .filter(|l| l.location_type == LocationType::Pickup)
        .map(|l| l.date)
        .max();
    let earliest_delivery = locations
        .iter()
        .filter(|l| l.location_type == LocationType::Delivery)
        .map(|l| l.date)
        .min();

    match (latest_pickup, earliest_delivery) {
        (Some(pickup), Some(delivery)) => pickup < delivery,
        _ => true,
    }
}

/// Validar la edición desde el detalle de la orden
pub fn validate_order_update(request: &UpdateOrderRequest) -> Result<Vec<LocationChange>, FormErrors> {
    let mut errors = FormErrors::new();

    if request.customer_name.trim().is_empty() || request.customer_address.trim().is_empty() {
        errors.form_error("Customer name and address are required");
    }
    if request.load_tender_number.trim().is_empty() {
        errors.field("load_tender_number", "Load tender number is required");
    }
    if request.rate <= Decimal::ZERO {
        errors.field("rate", "Rate must be greater than 0");
    }
    if request.weight <= Decimal::ZERO {
        errors.field("weight", "Weight must be greater than 0");
    }

    let mut changes = Vec::with_capacity(request.locations.len());
    let mut incomplete = false;

    for (index, location) in request.locations.iter().enumerate() {
        let complete = !location.name.trim().is_empty()
            && !location.street_address.trim().is_empty()
            && location.city_id.is_some()
            && !location.date.trim().is_empty()
            && !location.time.trim().is_empty();
        let (true, Some(city_id)) = (complete, location.city_id) else {
            incomplete = true;
            continue;
        };

        match combine_date_time(&location.date, &location.time) {
            Ok(date) => changes.push(LocationChange {
                id: location.id,
                name: location.name.trim().to_string(),
                street_address: location.street_address.trim().to_string(),
                city_id,
                date,
                time: location.time.trim().to_string(),
                special_instructions: location
                    .special_instructions
                    .as_ref()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty()),
            }),
            Err(error) => {
                let field = if error.code == "time" { "time" } else { "date" };
                errors.field(format!("locations[{}].{}", index, field), validation_message(&error));
            }
        }
    }

    if incomplete {
        errors.form_error("All location fields are required");
    }

    errors.into_result().map(|_| changes)
}
