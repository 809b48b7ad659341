pub mod common_dto;
pub mod manifest_dto;
pub mod order_dto;
pub mod payment_dto;
pub mod reference_dto;
pub mod split_dto;

pub use common_dto::*;
