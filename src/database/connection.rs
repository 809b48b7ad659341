//! Configuración de conexión a PostgreSQL
//!
//! Este módulo crea el pool de conexiones y aplica las migraciones del esquema.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use crate::config::database::DatabaseConfig;

/// Crear un pool de conexiones a la base de datos
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("🗄️ Conectando a {}", mask_database_url(database_url));

    let pool = DatabaseConfig::new(database_url)
        .create_pool()
        .await
        .context("No se pudo conectar a PostgreSQL")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("La base de datos no responde")?;

    Ok(pool)
}

/// Ejecutar migraciones de la base de datos
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("📦 Aplicando migraciones...");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Fallo al aplicar migraciones")?;
    info!("✅ Migraciones aplicadas");
    Ok(())
}

/// Función helper para enmascarar la URL de la base de datos en logs
pub fn mask_database_url(url: &str) -> String {
    let Some(at_pos) = url.rfind('@') else {
        return url.to_string();
    };
    let scheme_end = url.find("://").map(|pos| pos + 3).unwrap_or(0);
    if scheme_end > at_pos {
        return url.to_string();
    }
    format!("{}***:***@{}", &url[..scheme_end], &url[at_pos + 1..])
}
