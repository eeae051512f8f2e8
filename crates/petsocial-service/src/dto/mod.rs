//! Data Transfer Objects (DTOs).

mod admin_dto;
mod lookup_dto;

pub use admin_dto::*;
pub use lookup_dto::*;
