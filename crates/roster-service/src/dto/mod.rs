//! Data Transfer Objects (DTOs).

mod role_dto;
mod user_dto;

pub use role_dto::*;
pub use user_dto::*;
