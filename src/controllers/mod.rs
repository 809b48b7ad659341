pub mod manifest_controller;
pub mod order_controller;
pub mod payment_controller;
pub mod reference_controller;
