//! # Petsocial Core
//!
//! Core types, traits, and error definitions for the Petsocial API.
//! This crate provides the lookup entities, the change-set model published
//! after each unit-of-work commit, and the error type shared by every layer.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::{module, HasComponent, Interface};
