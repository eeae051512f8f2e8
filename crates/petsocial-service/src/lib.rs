//! # Petsocial Service
//!
//! Lookup read path and admin write path.
//!
//! Reads go through the cache-aside [`LookupService`]; writes go through the
//! [`AdminService`], which commits via a unit of work whose save
//! interceptor ([`LookupCacheInvalidator`]) drops the cached lists a commit
//! made stale.

pub mod admin_service;
pub mod cache;
pub mod dto;
pub mod health;
pub mod r#impl;
pub mod lookup_service;

#[cfg(test)]
mod test_support;

pub use admin_service::*;
pub use cache::*;
pub use dto::*;
pub use health::*;
pub use lookup_service::*;
pub use r#impl::*;
