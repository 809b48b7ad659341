use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use freight_dispatch::config::environment::EnvironmentConfig;
use freight_dispatch::database::{create_pool, run_migrations};
use freight_dispatch::services::fleet_tracker::{FleetTracker, MockTelemetryProvider};
use freight_dispatch::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚚 Freight Dispatch - Back-office de despacho");
    info!("================================================");

    let config = EnvironmentConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Configuración inválida: {}", e))?;

    // Inicializar base de datos
    let pool = match create_pool(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(e);
        }
    };

    if config.run_migrations {
        run_migrations(&pool).await?;
    }

    // Poller de flota
    let fleet = FleetTracker::new(
        Arc::new(MockTelemetryProvider),
        Duration::from_secs(config.fleet_poll_interval_secs.max(1)),
    );
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = fleet.spawn(shutdown_rx);

    let addr: SocketAddr = config.bind_address().parse()?;
    let app = create_router(AppState::new(pool, config, fleet));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📦 Órdenes:");
    info!("   GET  /api/orders - Listar órdenes");
    info!("   POST /api/orders - Crear orden");
    info!("   POST /api/orders/validate-step - Validar paso del formulario");
    info!("   GET  /api/orders/:id - Detalle de orden");
    info!("   PUT  /api/orders/:id - Actualizar orden");
    info!("   GET  /api/orders/:id/edit-context - Datos para editar");
    info!("   GET  /api/orders/:id/audit-logs - Auditoría");
    info!("   POST /api/orders/:id/split - Dividir orden");
    info!("   GET  /api/orders/:id/manifests - Manifiestos de la orden");
    info!("   POST /api/orders/:id/manifests - Crear manifiesto");
    info!("   PUT  /api/orders/:id/manifest - Asignar manifiesto");
    info!("📋 Manifiestos:");
    info!("   GET  /api/manifests - Listar manifiestos");
    info!("   GET  /api/manifests/:id - Detalle de manifiesto");
    info!("   PUT  /api/manifests/:id - Actualizar manifiesto");
    info!("   GET  /api/manifests/:id/history - Historial");
    info!("   PUT  /api/manifests/:id/stops - Guardar paradas");
    info!("   GET  /api/manifests/:id/route - Resumen de ruta");
    info!("💵 Pagos:");
    info!("   GET  /api/payments/manifests/:id - Pago del conductor");
    info!("   POST /api/payments/preview - Vista previa de pago");
    info!("📍 Referencia:");
    info!("   GET  /api/locations/countries - Países");
    info!("   GET  /api/locations/countries/:id/states - Provincias");
    info!("   GET  /api/locations/states/:id/cities - Ciudades");
    info!("   GET  /api/locations/terminals - Terminales");
    info!("   GET  /api/resources - Conductores, vehículos y remolques activos");
    info!("🛰️ Flota:");
    info!("   GET  /api/fleet/vehicles - Posiciones de vehículos");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
    }

    // Detener el poller
    if shutdown_tx.send(true).is_err() {
        warn!("⚠️ El poller de flota ya estaba detenido");
    }
    if let Err(e) = poller.await {
        error!("❌ Error deteniendo el poller de flota: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
