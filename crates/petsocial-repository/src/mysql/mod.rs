//! MySQL repository implementations.

mod lookup_repository;

pub use lookup_repository::*;
