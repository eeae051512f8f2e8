//! Post-commit cache invalidation.

use super::{cache_keys, CacheInterface};
use async_trait::async_trait;
use petsocial_core::{ChangeSet, LookupKind};
use petsocial_repository::SaveChangesInterceptor;
use shaku::Component;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returns every cache key made stale by a committed change set.
///
/// Each touched unpartitioned collection contributes its fixed key; each
/// distinct breed partition contributes `breeds-{id}`.
#[must_use]
pub fn affected_keys(changes: &ChangeSet) -> BTreeSet<String> {
    let mut keys: BTreeSet<String> = LookupKind::ALL
        .into_iter()
        .filter(|kind| changes.touches(*kind))
        .filter_map(cache_keys::for_kind)
        .map(str::to_string)
        .collect();

    keys.extend(changes.breed_partitions().into_iter().map(cache_keys::breeds));
    keys
}

/// Removes stale lookup lists after a unit of work commits.
///
/// Removal failures are logged and swallowed. The next read after a failed
/// removal may serve the stale list until its TTL runs out.
#[derive(Component)]
#[shaku(interface = SaveChangesInterceptor)]
pub struct LookupCacheInvalidator {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl LookupCacheInvalidator {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl SaveChangesInterceptor for LookupCacheInvalidator {
    async fn saved_changes(&self, changes: &ChangeSet) {
        for key in affected_keys(changes) {
            match self.cache.remove(&key).await {
                Ok(existed) => debug!(key = %key, existed, "Invalidated lookup cache entry"),
                Err(e) => {
                    warn!(key = %key, "Failed to invalidate lookup cache entry: {}", e);
                    metrics::counter!(
                        "lookup_cache_errors_total",
                        "backend" => self.cache.backend_name(),
                        "op" => "remove"
                    )
                    .increment(1);
                }
            }
        }
    }
}

impl std::fmt::Debug for LookupCacheInvalidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupCacheInvalidator")
            .field("backend", &self.cache.backend_name())
            .finish()
    }
}
