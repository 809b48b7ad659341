//! Modelos de datos
//!
//! Estructuras que mapean las tablas y enums de PostgreSQL.

pub mod audit_log;
pub mod fleet;
pub mod location;
pub mod manifest;
pub mod order;
pub mod order_leg;
pub mod split_point;

pub use audit_log::*;
pub use fleet::*;
pub use location::*;
pub use manifest::*;
pub use order::*;
pub use order_leg::*;
pub use split_point::*;
