//! Utilidades del sistema
//!
//! Errores, validación de formularios y verificación de sesiones.

pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
