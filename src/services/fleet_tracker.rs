//! Seguimiento de la flota
//!
//! Un poller en segundo plano consulta al proveedor de telemetría cada
//! `FLEET_POLL_INTERVAL_SECS` segundos y guarda la última foto en memoria.
//! Un fallo del proveedor se registra y conserva la foto anterior.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::models::{TelemetryStatus, VehicleLocation};
use crate::utils::errors::AppResult;

/// Proveedor de posiciones de vehículos
#[async_trait]
pub trait TelemetryProvider: Send + Sync {
    async fn vehicle_locations(&self) -> AppResult<Vec<VehicleLocation>>;
}

/// Generador simulado de tres camiones
#[derive(Debug, Clone, Default)]
pub struct MockTelemetryProvider;

const MOCK_TRUCKS: [(&str, &str, f64, f64, f64, TelemetryStatus); 3] = [
    ("1", "Truck 001", 43.6532, -79.3832, 90.0, TelemetryStatus::Active),
    ("2", "Truck 002", 45.5017, -73.5673, 180.0, TelemetryStatus::Inactive),
    ("3", "Truck 003", 49.2827, -123.1207, 270.0, TelemetryStatus::Active),
];

#[async_trait]
impl TelemetryProvider for MockTelemetryProvider {
    async fn vehicle_locations(&self) -> AppResult<Vec<VehicleLocation>> {
        let mut rng = rand::thread_rng();
        let now = Utc::now();

        Ok(MOCK_TRUCKS
            .iter()
            .map(|&(id, name, latitude, longitude, heading, status)| VehicleLocation {
                id: id.to_string(),
                name: name.to_string(),
                latitude,
                longitude,
                heading,
                speed: match status {
                    TelemetryStatus::Active => rng.gen_range(25.0..90.0),
                    TelemetryStatus::Inactive => 0.0,
                },
                last_location: now,
                status,
            })
            .collect())
    }
}

/// Última foto de la flota
#[derive(Debug, Clone, Default, Serialize)]
pub struct FleetSnapshot {
    pub vehicles: Vec<VehicleLocation>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct FleetTracker {
    provider: Arc<dyn TelemetryProvider>,
    snapshot: Arc<RwLock<FleetSnapshot>>,
    interval: Duration,
}

impl FleetTracker {
    pub fn new(provider: Arc<dyn TelemetryProvider>, interval: Duration) -> Self {
        Self {
            provider,
            snapshot: Arc::new(RwLock::new(FleetSnapshot::default())),
            interval,
        }
    }

    /// Consultar al proveedor y reemplazar la foto
    pub async fn refresh(&self) -> AppResult<usize> {
        let vehicles = self.provider.vehicle_locations().await?;
        let count = vehicles.len();
        let mut snapshot = self.snapshot.write().await;
        *snapshot = FleetSnapshot {
            vehicles,
            refreshed_at: Some(Utc::now()),
        };
        Ok(count)
    }

    pub async fn snapshot(&self) -> FleetSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Lanzar el poller; termina cuando `shutdown` cambia a true
    pub fn spawn(&self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            info!("🛰️ Poller de flota iniciado (cada {:?})", tracker.interval);
            let mut ticker = tokio::time::interval(tracker.interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        match tracker.refresh().await {
                            Ok(count) => debug!("🛰️ Flota actualizada: {} vehículos", count),
                            Err(e) => error!("❌ Error consultando telemetría: {}", e),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break;
                        }
                    }
                }
            }

            info!("🛑 Poller de flota detenido");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FailingProvider;

    #[async_trait]
    impl TelemetryProvider for FailingProvider {
        async fn vehicle_locations(&self) -> AppResult<Vec<VehicleLocation>> {
            Err(AppError::ExternalApi("telemetry offline".to_string()))
        }
    }

    struct CountingProvider(AtomicUsize);

    #[async_trait]
    impl TelemetryProvider for CountingProvider {
        async fn vehicle_locations(&self) -> AppResult<Vec<VehicleLocation>> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_mock_provider_speeds() {
        let vehicles = MockTelemetryProvider.vehicle_locations().await.unwrap();
        assert_eq!(vehicles.len(), 3);
        for vehicle in vehicles {
            match vehicle.status {
                TelemetryStatus::Active => assert!((25.0..90.0).contains(&vehicle.speed)),
                TelemetryStatus::Inactive => assert_eq!(vehicle.speed, 0.0),
            }
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let tracker = FleetTracker::new(Arc::new(MockTelemetryProvider), Duration::from_secs(30));
        assert!(tracker.snapshot().await.refreshed_at.is_none());

        assert_eq!(tracker.refresh().await.unwrap(), 3);
        let snapshot = tracker.snapshot().await;
        assert_eq!(snapshot.vehicles[1].name, "Truck 002");
        assert!(snapshot.refreshed_at.is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let tracker = FleetTracker::new(Arc::new(FailingProvider), Duration::from_secs(30));
        assert!(tracker.refresh().await.is_err());
        assert!(tracker.snapshot().await.vehicles.is_empty());
    }

    #[tokio::test]
    async fn test_poller_stops_on_shutdown() {
        let provider = Arc::new(CountingProvider(AtomicUsize::new(0)));
        let tracker = FleetTracker::new(provider.clone(), Duration::from_millis(10));
        let (tx, rx) = watch::channel(false);

        let handle = tracker.spawn(rx);
        tokio::time::sleep(Duration::from_millis(35)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(provider.0.load(Ordering::SeqCst) >= 1);
    }
}
