//! Servicios de dominio
//!
//! Lógica pura de negocio (validación, planificación, pagos, rutas) y los
//! servicios de fondo (flota). No hablan directamente con la base de datos.

pub mod assignment_validator;
pub mod fleet_tracker;
pub mod location_resolver;
pub mod order_planner;
pub mod order_validation;
pub mod payment_calculator;
pub mod route_summary;
pub mod split_planner;
pub mod stop_planner;
