//! Planificación de filas de una orden
//!
//! Convierte las ubicaciones del formulario en filas listas para insertar:
//! cada ubicación recibe como `sequence_number` su índice dentro de su tipo
//! y su fecha+hora combinadas en un instante UTC.

use serde_json::json;
use validator::Validate;

use crate::dto::order_dto::{LocationInput, NewLocation};
use crate::models::{Location, LocationType, Order};
use crate::utils::validation::{combine_date_time, validation_message, FormErrors};

/// Planificar las filas de ubicación de una orden nueva
pub fn plan_locations(
    pickups: &[LocationInput],
    deliveries: &[LocationInput],
) -> Result<Vec<NewLocation>, FormErrors> {
    let mut errors = FormErrors::new();
    let mut planned = Vec::with_capacity(pickups.len() + deliveries.len());

    plan_group(LocationType::Pickup, "pickup_locations", pickups, &mut errors, &mut planned);
    plan_group(
        LocationType::Delivery,
        "delivery_locations",
        deliveries,
        &mut errors,
        &mut planned,
    );

    errors.into_result().map(|_| planned)
}

fn plan_group(
    location_type: LocationType,
    prefix: &str,
    inputs: &[LocationInput],
    errors: &mut FormErrors,
    planned: &mut Vec<NewLocation>,
) {
    for (index, input) in inputs.iter().enumerate() {
        let path = format!("{}[{}]", prefix, index);

        if let Err(validation) = input.validate() {
            errors.absorb(Some(&path), &validation);
            continue;
        }

        let date = match combine_date_time(&input.date, &input.time) {
            Ok(date) => date,
            Err(error) => {
                let field = if error.code == "time" { "time" } else { "date" };
                errors.field(format!("{}.{}", path, field), validation_message(&error));
                continue;
            }
        };

        // `validate()` ya garantiza la ciudad
        let Some(city_id) = input.city_id else {
            continue;
        };

        planned.push(NewLocation {
            location_type,
            name: input.name.trim().to_string(),
            street_address: input.street_address.trim().to_string(),
            city_id,
            date,
            time: input.time.trim().to_string(),
            special_instructions: input
                .special_instructions
                .as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            sequence_number: index as i32,
        });
    }
}

/// Foto JSON de una orden y sus ubicaciones para la auditoría
pub fn order_snapshot(order: &Order, locations: &[Location]) -> serde_json::Value {
    json!({
        "order": order,
        "locations": locations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn location(name: &str, date: &str, time: &str) -> LocationInput {
        LocationInput {
            name: name.to_string(),
            street_address: "100 King St W".to_string(),
            country_id: Some(Uuid::new_v4()),
            state_id: Some(Uuid::new_v4()),
            city_id: Some(Uuid::new_v4()),
            date: date.to_string(),
            time: time.to_string(),
            special_instructions: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_sequence_number_is_index_within_type() {
        let pickups = vec![
            location("Dock A", "2024-05-01", "08:00"),
            location("Dock B", "2024-05-01", "09:00"),
        ];
        let deliveries = vec![location("Store", "2024-05-02", "10:00")];

        let planned = plan_locations(&pickups, &deliveries).unwrap();
        assert_eq!(planned.len(), 3);

        let pickup_seq: Vec<i32> = planned
            .iter()
            .filter(|l| l.location_type == LocationType::Pickup)
            .map(|l| l.sequence_number)
            .collect();
        assert_eq!(pickup_seq, vec![0, 1]);

        let delivery = planned
            .iter()
            .find(|l| l.location_type == LocationType::Delivery)
            .unwrap();
        assert_eq!(delivery.sequence_number, 0);
        assert_eq!(delivery.special_instructions, None);
    }

    #[test]
    fn test_invalid_locations_report_indexed_paths() {
        let mut broken = location("", "2024-05-01", "08:00");
        broken.city_id = None;
        let bad_time = location("Store", "2024-05-02", "noon");

        let errors = plan_locations(&[broken], &[bad_time]).unwrap_err();
        assert_eq!(errors.fields["pickup_locations[0].name"], "Name is required");
        assert_eq!(errors.fields["pickup_locations[0].city_id"], "City is required");
        assert!(errors.fields.contains_key("delivery_locations[0].time"));
    }
}
