//! Service implementations.
//!
//! Trait definitions live in the parent module (`lookup_service.rs`,
//! `admin_service.rs`).

pub mod admin_service_impl;
pub mod lookup_service_impl;

pub use admin_service_impl::AdminServiceImpl;
pub use lookup_service_impl::{CacheTtl, LookupServiceImpl, LookupServiceImplParameters};
