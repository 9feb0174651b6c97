//! Location manager.

use ptero_core::{fetch, EntityStore, FetchOptions, KeyedCache, PaginationMeta, QueryOptions, Resolvable, Result};

use super::ManagerContext;
use crate::endpoints;
use crate::models::{CreateLocationParams, Location, LocationUpdate};

/// Manages node locations.
#[derive(Debug)]
pub struct LocationManager {
    ctx: ManagerContext,
    store: EntityStore<Location>,
}

impl LocationManager {
    /// Create a manager; `caching` controls whether fetched locations are
    /// kept.
    pub fn new(ctx: ManagerContext, caching: bool) -> Self {
        Self {
            ctx,
            store: EntityStore::new(caching),
        }
    }

    /// Cached locations, in insertion order.
    pub fn cache(&self) -> &KeyedCache<Location> {
        self.store.cache()
    }

    /// Mutable access to the cache.
    pub fn cache_mut(&mut self) -> &mut KeyedCache<Location> {
        self.store.cache_mut()
    }

    /// Pagination metadata of the last collection fetch.
    pub fn meta(&self) -> &PaginationMeta {
        self.store.meta()
    }

    /// Resolve a location locally by id, short or long name, or from an
    /// object embedding it under `relationships.location`.
    pub fn resolve<'a>(&mut self, obj: impl Into<Resolvable<'a>>) -> Option<Location> {
        ptero_core::resolve(&mut self.store, obj)
    }

    /// Admin panel link for a location.
    pub fn admin_url_for(&self, id: u64) -> String {
        format!("{}/admin/locations/view/{}", self.ctx.domain, id)
    }

    /// Fetch a location, from the cache unless `options.force` is set.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn example(app: &mut ptero_app::PteroApp) -> ptero_core::Result<()> {
    /// use ptero_core::FetchOptions;
    ///
    /// let location = app.locations.fetch(8, &FetchOptions::new()).await?;
    /// println!("{} ({})", location.long, location.short);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch(&mut self, id: u64, options: &FetchOptions) -> Result<Location> {
        let path = endpoints::locations::get(id);
        fetch::fetch_one(self.ctx.transport.as_ref(), &mut self.store, &path, id, options).await
    }

    /// Fetch one page of locations.
    pub async fn fetch_many(&mut self, options: &FetchOptions) -> Result<KeyedCache<Location>> {
        fetch::fetch_many(self.ctx.transport.as_ref(), &mut self.store, endpoints::locations::MAIN, options).await
    }

    /// Fetch every location, walking all pages.
    pub async fn fetch_all(&mut self, options: &FetchOptions) -> Result<KeyedCache<Location>> {
        fetch::fetch_all(
            self.ctx.transport.as_ref(),
            &mut self.store,
            endpoints::locations::MAIN,
            options,
            self.ctx.page_size,
        )
        .await
    }

    /// Query locations by `short` or `long`. Never reads the cache.
    pub async fn query(&mut self, entity: &str, options: &QueryOptions) -> Result<KeyedCache<Location>> {
        fetch::query(
            self.ctx.transport.as_ref(),
            &mut self.store,
            endpoints::locations::MAIN,
            entity,
            options,
        )
        .await
    }

    /// Create a location.
    pub async fn create(&mut self, short: impl Into<String>, long: impl Into<String>) -> Result<Location> {
        let params = CreateLocationParams {
            short: short.into(),
            long: long.into(),
        };
        fetch::create(self.ctx.transport.as_ref(), &mut self.store, endpoints::locations::MAIN, &params).await
    }

    /// Update a location's short and/or long name.
    pub async fn update(&mut self, id: u64, changes: &LocationUpdate) -> Result<Location> {
        let path = endpoints::locations::get(id);
        fetch::update(self.ctx.transport.as_ref(), &mut self.store, &path, changes).await
    }

    /// Delete a location.
    pub async fn delete(&mut self, id: u64) -> Result<()> {
        let path = endpoints::locations::get(id);
        fetch::delete(self.ctx.transport.as_ref(), &mut self.store, &path, id).await
    }
}
