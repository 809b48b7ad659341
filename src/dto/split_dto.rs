use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dto::manifest_dto::ManifestStopInput;
use crate::models::{OrderLeg, SplitPoint};

// Punto de división, discriminado por `type`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SplitPointInput {
    Gps {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    Location {
        name: String,
        street_address: String,
        city_id: Uuid,
    },
    Terminal {
        name: String,
        terminal_id: Uuid,
    },
}

impl SplitPointInput {
    pub fn name(&self) -> &str {
        match self {
            SplitPointInput::Gps { name, .. }
            | SplitPointInput::Location { name, .. }
            | SplitPointInput::Terminal { name, .. } => name,
        }
    }
}

// Paradas opcionales de un tramo hijo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitLegInput {
    #[serde(default)]
    pub stops: Vec<ManifestStopInput>,
}

// Request para dividir el tramo principal de una orden
#[derive(Debug, Deserialize)]
pub struct SplitOrderRequest {
    pub split_point: SplitPointInput,
    pub reason: String,
    #[serde(default)]
    pub legs: Vec<SplitLegInput>,
}

#[derive(Debug, Serialize)]
pub struct SplitOrderResponse {
    pub split_point: SplitPoint,
    pub parent_leg_id: Uuid,
    pub legs: Vec<OrderLeg>,
}
