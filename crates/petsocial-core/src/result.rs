//! Result type aliases for the Petsocial API.

use crate::PetsocialError;

/// A specialized `Result` type for Petsocial operations.
pub type PetsocialResult<T> = Result<T, PetsocialError>;
