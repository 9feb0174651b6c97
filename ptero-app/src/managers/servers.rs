//! Server manager.

use ptero_core::{fetch, EntityStore, FetchOptions, KeyedCache, PaginationMeta, QueryOptions, Resolvable, Result};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::ManagerContext;
use crate::endpoints;
use crate::models::{ApplicationServer, ServerDetailsUpdate};

/// Manages servers through the application API.
#[derive(Debug)]
pub struct ServerManager {
    ctx: ManagerContext,
    store: EntityStore<ApplicationServer>,
}

impl ServerManager {
    /// Create a manager; `caching` controls whether fetched servers are
    /// kept.
    pub fn new(ctx: ManagerContext, caching: bool) -> Self {
        Self {
            ctx,
            store: EntityStore::new(caching),
        }
    }

    /// Cached servers, in insertion order.
    pub fn cache(&self) -> &KeyedCache<ApplicationServer> {
        self.store.cache()
    }

    /// Mutable access to the cache.
    pub fn cache_mut(&mut self) -> &mut KeyedCache<ApplicationServer> {
        self.store.cache_mut()
    }

    /// Pagination metadata of the last collection fetch.
    pub fn meta(&self) -> &PaginationMeta {
        self.store.meta()
    }

    /// Resolve a server locally by id, identifier, uuid or external id, or
    /// from an object embedding it under `relationships.server`.
    pub fn resolve<'a>(&mut self, obj: impl Into<Resolvable<'a>>) -> Option<ApplicationServer> {
        ptero_core::resolve(&mut self.store, obj)
    }

    /// Admin panel link for a server.
    pub fn admin_url_for(&self, id: u64) -> String {
        format!("{}/admin/servers/view/{}", self.ctx.domain, id)
    }

    /// Client panel link for a server.
    pub fn panel_url_for(&self, identifier: &str) -> String {
        format!("{}/server/{}", self.ctx.domain, identifier)
    }

    /// Fetch a server, from the cache unless `options.force` is set.
    pub async fn fetch(&mut self, id: u64, options: &FetchOptions) -> Result<ApplicationServer> {
        let path = endpoints::servers::get(id);
        fetch::fetch_one(self.ctx.transport.as_ref(), &mut self.store, &path, id, options).await
    }

    /// Fetch one page of servers.
    pub async fn fetch_many(&mut self, options: &FetchOptions) -> Result<KeyedCache<ApplicationServer>> {
        fetch::fetch_many(self.ctx.transport.as_ref(), &mut self.store, endpoints::servers::MAIN, options).await
    }

    /// Fetch every server, walking all pages.
    pub async fn fetch_all(&mut self, options: &FetchOptions) -> Result<KeyedCache<ApplicationServer>> {
        fetch::fetch_all(
            self.ctx.transport.as_ref(),
            &mut self.store,
            endpoints::servers::MAIN,
            options,
            self.ctx.page_size,
        )
        .await
    }

    /// Query servers.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn example(app: &mut ptero_app::PteroApp) -> ptero_core::Result<()> {
    /// use ptero_core::QueryOptions;
    ///
    /// let found = app
    ///     .servers
    ///     .query("survival", &QueryOptions::new().filter("name").sort("-id"))
    ///     .await?;
    /// for server in found.values() {
    ///     println!("{} {}", server.identifier, server.name);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn query(&mut self, entity: &str, options: &QueryOptions) -> Result<KeyedCache<ApplicationServer>> {
        fetch::query(
            self.ctx.transport.as_ref(),
            &mut self.store,
            endpoints::servers::MAIN,
            entity,
            options,
        )
        .await
    }

    /// Update a server's name, owner, external id or description.
    pub async fn update_details(&mut self, id: u64, changes: &ServerDetailsUpdate) -> Result<ApplicationServer> {
        let path = endpoints::servers::details(id);
        fetch::update(self.ctx.transport.as_ref(), &mut self.store, &path, changes).await
    }

    /// Suspend a server. The cached entity is not refreshed.
    #[instrument(skip(self))]
    pub async fn suspend(&mut self, id: u64) -> Result<()> {
        self.ctx
            .transport
            .post(&endpoints::servers::suspend(id), &Value::Null)
            .await?;
        info!("Suspended server {}", id);
        Ok(())
    }

    /// Lift a server's suspension. The cached entity is not refreshed.
    #[instrument(skip(self))]
    pub async fn unsuspend(&mut self, id: u64) -> Result<()> {
        self.ctx
            .transport
            .post(&endpoints::servers::unsuspend(id), &Value::Null)
            .await?;
        info!("Unsuspended server {}", id);
        Ok(())
    }

    /// Delete a server. With `force`, the panel skips the node's cleanup
    /// checks.
    pub async fn delete(&mut self, id: u64, force: bool) -> Result<()> {
        let path = if force {
            endpoints::servers::force(id)
        } else {
            endpoints::servers::get(id)
        };
        debug!(force, "Deleting server {}", id);
        fetch::delete(self.ctx.transport.as_ref(), &mut self.store, &path, id).await
    }
}
