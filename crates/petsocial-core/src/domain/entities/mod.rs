//! Domain entities.

mod lookups;

pub use lookups::*;
