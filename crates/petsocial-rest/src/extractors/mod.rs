//! Custom Axum extractors.

mod params;
mod validated;

pub use params::*;
pub use validated::*;
