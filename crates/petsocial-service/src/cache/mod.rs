//! Caching infrastructure for the lookup read path.
//!
//! Two interchangeable backends sit behind [`CacheInterface`]: Redis, shared
//! by every instance, and a per-process moka cache. One is chosen at
//! startup. Values cross the interface as JSON so the trait stays
//! object-safe.

mod cache_interface;
pub mod cache_keys;
mod invalidation;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use invalidation::{affected_keys, LookupCacheInvalidator, LookupCacheInvalidatorParameters};
pub use memory_cache::MemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};

use std::time::Duration;

/// Lifetime of a cached lookup list.
pub const LOOKUP_TTL: Duration = Duration::from_secs(60 * 60);
