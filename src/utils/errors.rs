//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::utils::validation::FormErrors;

/// SQLSTATE de Postgres para violación de restricción única
pub const UNIQUE_VIOLATION: &str = "23505";

/// Recurso que provoca una doble asignación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookedResource {
    Driver,
    Vehicle,
}

impl BookedResource {
    pub fn label(&self) -> &'static str {
        match self {
            BookedResource::Driver => "Driver",
            BookedResource::Vehicle => "Vehicle",
        }
    }
}

/// Conflicto de asignación detectado antes de escribir
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentConflict {
    pub resource: BookedResource,
    pub resource_id: uuid::Uuid,
    pub manifest_id: uuid::Uuid,
    pub manifest_number: String,
}

impl AssignmentConflict {
    pub fn message(&self) -> String {
        format!(
            "{} is already assigned to manifest #{}",
            self.resource.label(),
            self.manifest_number
        )
    }
}

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Form validation failed: {0}")]
    FormValidation(FormErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("This load tender number already exists")]
    DuplicateLoadTender,

    #[error("A duplicate entry was found. Please check your data and try again.")]
    DuplicateEntry,

    #[error("Failed to find original leg for order {0}")]
    OriginalLegNotFound(uuid::Uuid),

    #[error("Assignment conflict: {}", .0.iter().map(|c| c.message()).collect::<Vec<_>>().join("; "))]
    AssignmentConflict(Vec<AssignmentConflict>),

    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    /// Código HTTP asociado a cada variante
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::FormValidation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) | AppError::OriginalLegNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateLoadTender
            | AppError::DuplicateEntry
            | AppError::AssignmentConflict(_) => StatusCode::CONFLICT,
            AppError::InvalidStatusTransition { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let error_response = match self {
            AppError::Database(e) => {
                tracing::error!("❌ Database error: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    "DB_ERROR",
                )
            }

            AppError::FormValidation(errors) => {
                tracing::warn!("⚠️ Form validation error: {}", errors);
                let message = errors
                    .form
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "The provided data is invalid".to_string());
                ErrorResponse::new("Validation Error", message, "VALIDATION_ERROR")
                    .with_details(json!(errors))
            }

            AppError::Unauthorized(msg) => {
                tracing::warn!("🔒 Unauthorized access: {}", msg);
                ErrorResponse::new("Unauthorized", msg, "UNAUTHORIZED")
            }

            AppError::NotFound(msg) => {
                tracing::warn!("🔍 Resource not found: {}", msg);
                ErrorResponse::new("Not Found", msg, "NOT_FOUND")
            }

            e @ AppError::DuplicateLoadTender => {
                tracing::warn!("⚠️ {}", e);
                ErrorResponse::new("Conflict", e.to_string(), "DUPLICATE_LOAD_TENDER")
            }

            e @ AppError::DuplicateEntry => {
                tracing::warn!("⚠️ {}", e);
                ErrorResponse::new("Conflict", e.to_string(), "DUPLICATE_ENTRY")
            }

            AppError::OriginalLegNotFound(order_id) => {
                tracing::error!("❌ No top-level leg for order {}", order_id);
                ErrorResponse::new(
                    "Not Found",
                    "Failed to find original leg".to_string(),
                    "ORIGINAL_LEG_NOT_FOUND",
                )
                .with_details(json!({ "order_id": order_id }))
            }

            AppError::AssignmentConflict(conflicts) => {
                tracing::warn!("⚠️ Assignment conflict: {:?}", conflicts);
                let message = conflicts
                    .first()
                    .map(|c| c.message())
                    .unwrap_or_else(|| "Resource is already assigned".to_string());
                ErrorResponse::new("Conflict", message, "ASSIGNMENT_CONFLICT").with_details(json!({
                    "requires_confirmation": true,
                    "conflicts": conflicts,
                }))
            }

            AppError::InvalidStatusTransition { from, to } => {
                tracing::warn!("⚠️ Invalid status transition {} -> {}", from, to);
                ErrorResponse::new(
                    "Invalid Status Transition",
                    format!("Cannot move a manifest from {} to {}", from, to),
                    "INVALID_STATUS_TRANSITION",
                )
            }

            AppError::BadRequest(msg) => {
                tracing::warn!("⚠️ Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }

            AppError::Internal(msg) => {
                tracing::error!("❌ Internal error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    "INTERNAL_ERROR",
                )
            }

            AppError::Jwt(msg) => {
                tracing::warn!("🔒 JWT error: {}", msg);
                ErrorResponse::new("JWT Error", msg, "JWT_ERROR")
            }

            AppError::ExternalApi(msg) => {
                tracing::error!("❌ External API error: {}", msg);
                ErrorResponse::new(
                    "External API Error",
                    "An error occurred while communicating with external service".to_string(),
                    "EXTERNAL_API_ERROR",
                )
                .with_details(json!({ "external_api_error": msg }))
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Clasificar una violación de unicidad según la restricción o el mensaje de Postgres
pub fn classify_unique_violation(constraint: Option<&str>, message: &str) -> AppError {
    let mentions_tender = constraint
        .map(|c| c.contains("load_tender_number"))
        .unwrap_or(false)
        || message.contains("load_tender_number");

    if mentions_tender {
        AppError::DuplicateLoadTender
    } else {
        AppError::DuplicateEntry
    }
}

/// Convertir errores de escritura: las violaciones de unicidad se vuelven errores de dominio
pub fn map_write_error(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_error) = &error {
        let is_unique = db_error.code().as_deref() == Some(UNIQUE_VIOLATION)
            || db_error.message().contains("duplicate key");
        if is_unique {
            return classify_unique_violation(db_error.constraint(), db_error.message());
        }
    }
    AppError::Database(error)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de solicitud incorrecta
pub fn bad_request_error(message: &str) -> AppError {
    AppError::BadRequest(message.to_string())
}
