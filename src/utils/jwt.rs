//! Utilidades JWT
//!
//! Las sesiones las emite el proveedor de autenticación alojado (HS256 con
//! secreto compartido); aquí solo se verifican.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{config::environment::EnvironmentConfig, utils::errors::AppError};

/// Claims del JWT de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user_id
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    pub exp: usize, // expiration timestamp
    #[serde(default)]
    pub iat: Option<usize>,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AppError::Unauthorized("ID de usuario inválido en el token".to_string()))
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub audience: Option<String>,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.auth_jwt_secret.clone(),
            audience: config.auth_jwt_audience.clone(),
        }
    }
}

/// Verificar y decodificar JWT token
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<JwtClaims, AppError> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let mut validation = Validation::default();
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience.as_str()]),
        None => validation.validate_aud = false,
    }

    let token_data = decode::<JwtClaims>(token, &decoding_key, &validation)
        .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> Result<&str, AppError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Jwt("Header Authorization debe comenzar con 'Bearer '".to_string()))?;

    if token.trim().is_empty() {
        return Err(AppError::Jwt("Token no puede estar vacío".to_string()));
    }

    Ok(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            audience: None,
        }
    }

    fn token_for(sub: &str, exp_offset: i64, secret: &str) -> String {
        let claims = JwtClaims {
            sub: sub.to_string(),
            email: Some("dispatcher@example.com".to_string()),
            role: Some("authenticated".to_string()),
            exp: (chrono::Utc::now().timestamp() + exp_offset) as usize,
            iat: Some(chrono::Utc::now().timestamp() as usize),
        };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
    }

    #[test]
    fn test_verify_valid_token() {
        let user_id = Uuid::new_v4();
        let token = token_for(&user_id.to_string(), 3600, "test-secret");

        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.email.as_deref(), Some("dispatcher@example.com"));
    }

    #[test]
    fn test_reject_wrong_secret_and_expired() {
        let user_id = Uuid::new_v4().to_string();
        assert!(verify_token(&token_for(&user_id, 3600, "other"), &config()).is_err());
        assert!(verify_token(&token_for(&user_id, -3600, "test-secret"), &config()).is_err());
    }

    #[test]
    fn test_extract_token_from_header() {
        assert_eq!(extract_token_from_header("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert!(extract_token_from_header("Basic abc").is_err());
        assert!(extract_token_from_header("Bearer   ").is_err());
    }
}
