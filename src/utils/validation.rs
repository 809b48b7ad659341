//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y conversión de tipos compartidas por los formularios.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::utils::errors::AppError;

lazy_static! {
    /// Teléfono permisivo: dígitos, espacios, guiones y paréntesis
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9\-\(\)\s]{7,20}$").unwrap();
}

/// Errores de formulario: mensajes por campo y mensajes generales
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    pub fields: BTreeMap<String, String>,
    pub form: Vec<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    /// Registrar un error de campo (se conserva el primero)
    pub fn field(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(path.into()).or_insert_with(|| message.into());
    }

    pub fn form_error(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Volcar errores de `validator`, prefijando la ruta del campo
    pub fn absorb(&mut self, prefix: Option<&str>, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            let path = match prefix {
                Some(prefix) => format!("{}.{}", prefix, field),
                None => field.to_string(),
            };
            if let Some(first) = field_errors.first() {
                self.field(path, validation_message(first));
            }
        }
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (path, message) in other.fields {
            self.field(path, message);
        }
        self.form.extend(other.form);
    }

    /// Ok si no hay errores
    pub fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .fields
            .iter()
            .map(|(path, message)| format!("{}: {}", path, message))
            .collect();
        parts.extend(self.form.iter().cloned());
        write!(f, "{}", parts.join("; "))
    }
}

/// Validar un request derivado con `Validate` y devolver errores por campo
pub fn validate_request<T: Validate>(request: &T) -> Result<(), AppError> {
    request.validate().map_err(|errors| {
        let mut form = FormErrors::new();
        form.absorb(None, &errors);
        AppError::FormValidation(form)
    })
}

/// Mensaje legible de un `ValidationError`
pub fn validation_message(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("Invalid value ({})", error.code))
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.message = Some("Must be greater than 0".into());
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.message = Some("Latitude must be between -90 and 90".into());
        error.add_param("value".into(), &lat);
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.message = Some("Longitude must be between -180 and 180".into());
        error.add_param("value".into(), &lng);
        return Err(error);
    }

    Ok(())
}

/// Validar y convertir string a fecha
pub fn validate_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("date");
        error.message = Some("Date must use the YYYY-MM-DD format".into());
        error.add_param("value".into(), &value.to_string());
        error
    })
}

/// Validar y convertir string a hora (HH:MM o HH:MM:SS)
pub fn validate_time(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| {
            let mut error = ValidationError::new("time");
            error.message = Some("Time must use the HH:MM format".into());
            error.add_param("value".into(), &value.to_string());
            error
        })
}

/// Combinar fecha y hora de un formulario en un instante UTC
pub fn combine_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, ValidationError> {
    let date = validate_date(date)?;
    let time = validate_time(time)?;
    Ok(Utc.from_utc_datetime(&NaiveDateTime::new(date, time)))
}
