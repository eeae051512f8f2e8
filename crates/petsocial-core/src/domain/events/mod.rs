//! Domain events.

mod change_set;

pub use change_set::*;
