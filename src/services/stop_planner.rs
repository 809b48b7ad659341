//! Planificación de paradas de manifiesto y de tramo
//!
//! `sequence_number` es la posición en la lista enviada. El terminal solo
//! se conserva en paradas drop_off, donde es obligatorio.

use validator::Validate;

use crate::dto::manifest_dto::ManifestStopInput;
use crate::models::NewLegLocation;
use crate::utils::validation::{combine_date_time, validation_message, FormErrors};

pub fn plan_stops(prefix: &str, stops: &[ManifestStopInput]) -> Result<Vec<NewLegLocation>, FormErrors> {
    let mut errors = FormErrors::new();
    let mut planned = Vec::with_capacity(stops.len());

    for (index, stop) in stops.iter().enumerate() {
        let path = format!("{}[{}]", prefix, index);

        if let Err(validation) = stop.validate() {
            errors.absorb(Some(&path), &validation);
            continue;
        }

        let terminal_id = if stop.location_type.requires_terminal() {
            match stop.terminal_id {
                Some(id) => Some(id),
                None => {
                    errors.field(format!("{}.terminal_id", path), "Terminal is required");
                    continue;
                }
            }
        } else {
            None
        };

        let date = match combine_date_time(&stop.date, &stop.time) {
            Ok(date) => date,
            Err(error) => {
                let field = if error.code == "time" { "time" } else { "date" };
                errors.field(format!("{}.{}", path, field), validation_message(&error));
                continue;
            }
        };

        planned.push(NewLegLocation {
            location_type: stop.location_type,
            name: stop.name.trim().to_string(),
            street_address: stop.street_address.trim().to_string(),
            city_id: stop.city_id,
            date,
            time: stop.time.trim().to_string(),
            contact_name: non_blank(&stop.contact_name),
            contact_phone: non_blank(&stop.contact_phone),
            terminal_id,
            special_instructions: non_blank(&stop.special_instructions),
            sequence_number: index as i32,
        });
    }

    errors.into_result().map(|_| planned)
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
