//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Las variables obligatorias se validan al arrancar; las opcionales tienen
//! valores por defecto razonables para desarrollo local.

use std::env;

use crate::utils::errors::{AppError, AppResult};

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub database_url: String,
    pub auth_jwt_secret: String,
    pub auth_jwt_audience: Option<String>,
    pub cors_origins: Vec<String>,
    pub fleet_poll_interval_secs: u64,
    pub run_migrations: bool,
    pub static_map_api_key: Option<String>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración desde una fuente arbitraria de claves
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| AppError::Internal(format!("{} must be set", key)))
        };

        let port = match optional("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Internal("PORT must be a valid number".to_string()))?,
            None => 3000,
        };

        let fleet_poll_interval_secs = match optional("FLEET_POLL_INTERVAL_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::Internal("FLEET_POLL_INTERVAL_SECS must be a valid number".to_string())
            })?,
            None => 30,
        };

        Ok(Self {
            environment: optional("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: optional("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            database_url: required("DATABASE_URL")?,
            auth_jwt_secret: required("AUTH_JWT_SECRET")?,
            auth_jwt_audience: optional("AUTH_JWT_AUDIENCE"),
            cors_origins: optional("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            fleet_poll_interval_secs,
            run_migrations: optional("RUN_MIGRATIONS")
                .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            static_map_api_key: optional("STATIC_MAP_API_KEY"),
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Dirección de escucha del servidor
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_required_only() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://localhost/dispatch"),
            ("AUTH_JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert!(config.is_development());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
        assert_eq!(config.fleet_poll_interval_secs, 30);
        assert!(config.cors_origins.is_empty());
        assert!(!config.run_migrations);
        assert!(config.static_map_api_key.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("ENVIRONMENT", "production"),
            ("PORT", "8080"),
            ("DATABASE_URL", "postgresql://db/dispatch"),
            ("AUTH_JWT_SECRET", "secret"),
            ("CORS_ORIGINS", "https://a.example.com, https://b.example.com"),
            ("FLEET_POLL_INTERVAL_SECS", "5"),
            ("RUN_MIGRATIONS", "true"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins.len(), 2);
        assert_eq!(config.fleet_poll_interval_secs, 5);
        assert!(config.run_migrations);
    }

    #[test]
    fn test_missing_required_or_bad_port() {
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[("AUTH_JWT_SECRET", "s")])).is_err());
        assert!(EnvironmentConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgresql://db/dispatch"),
            ("AUTH_JWT_SECRET", "s"),
            ("PORT", "eighty"),
        ]))
        .is_err());
    }
}
