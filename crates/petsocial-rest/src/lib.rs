//! # Petsocial REST
//!
//! Axum HTTP surface: cached lookup lists under `/api/lookup`, lookup
//! maintenance under `/api/admin`, and health probes.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
