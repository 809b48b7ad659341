//! Middleware de autenticación JWT
//!
//! Verifica la sesión emitida por el proveedor de autenticación alojado e
//! inyecta el usuario autenticado en las extensions. Las rutas que escriben
//! reciben así un actor explícito en lugar de leer una sesión global.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    state::AppState,
    utils::{
        errors::AppError,
        jwt::{extract_token_from_header, verify_token, JwtConfig},
    },
};

pub const LOGIN_REQUIRED: &str = "You must be logged in to perform this action";

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Identificador legible para auditoría e historial
    pub fn actor_label(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

/// Middleware que exige una sesión válida
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(&request, &JwtConfig::from(&state.config)).map_err(|e| {
        tracing::debug!("Sesión rechazada: {}", e);
        AppError::Unauthorized(LOGIN_REQUIRED.to_string())
    })?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn authenticate(request: &Request, config: &JwtConfig) -> Result<AuthenticatedUser, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, config)?;

    Ok(AuthenticatedUser {
        user_id: claims.user_id()?,
        email: claims.email,
    })
}
