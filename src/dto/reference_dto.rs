use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ResourceStatus, StopWithAddress};

// Filtro de recursos de flota
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceQuery {
    pub status: Option<ResourceStatus>,
}

#[derive(Debug, Serialize)]
pub struct RouteStop {
    #[serde(flatten)]
    pub stop: StopWithAddress,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct RouteSummaryResponse {
    pub manifest_id: Uuid,
    pub stops: Vec<RouteStop>,
    pub map_url: String,
}
