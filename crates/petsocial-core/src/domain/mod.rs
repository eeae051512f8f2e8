//! # Petsocial Domain
//!
//! Lookup entities and the change-set events published after a commit.

pub mod entities;
pub mod events;

pub use entities::*;
pub use events::*;
