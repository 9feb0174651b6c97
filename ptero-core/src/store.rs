//! Per-manager entity state.

use crate::cache::KeyedCache;
use crate::entity::Entity;
use crate::pagination::PaginationMeta;

/// The state a resource manager owns: its cache, the pagination metadata of
/// its last collection fetch, and whether normalized entities are cached.
///
/// A store belongs to exactly one manager. The engine's functions borrow it
/// mutably for the duration of a call, so a manager cannot be used
/// re-entrantly.
#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    pub(crate) cache: KeyedCache<E>,
    pub(crate) meta: PaginationMeta,
    caching: bool,
}

impl<E: Entity> EntityStore<E> {
    /// Create an empty store.
    ///
    /// With `caching` off, normalization still returns typed entities but
    /// never writes them into the cache.
    pub fn new(caching: bool) -> Self {
        Self {
            cache: KeyedCache::new(),
            meta: PaginationMeta::default(),
            caching,
        }
    }

    /// The cached entities.
    pub fn cache(&self) -> &KeyedCache<E> {
        &self.cache
    }

    /// Mutable access to the cached entities.
    pub fn cache_mut(&mut self) -> &mut KeyedCache<E> {
        &mut self.cache
    }

    /// Pagination metadata from the last collection fetch. Stale between
    /// fetches.
    pub fn meta(&self) -> &PaginationMeta {
        &self.meta
    }

    /// Whether normalized entities are written to the cache.
    pub fn caching(&self) -> bool {
        self.caching
    }
}
