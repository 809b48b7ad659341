pub mod audit_repository;
pub mod fleet_repository;
pub mod location_repository;
pub mod manifest_repository;
pub mod order_leg_repository;
pub mod order_repository;
