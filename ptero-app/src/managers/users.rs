//! User manager.

use ptero_core::{
    fetch, normalize, EntityStore, FetchOptions, KeyedCache, PaginationMeta, QueryOptions, Resolvable, Result,
};
use tracing::{debug, instrument, trace};

use super::ManagerContext;
use crate::endpoints;
use crate::models::{CreateUserParams, User, UserUpdate};

/// Manages panel users.
#[derive(Debug)]
pub struct UserManager {
    ctx: ManagerContext,
    store: EntityStore<User>,
}

impl UserManager {
    /// Create a manager; `caching` controls whether fetched users are kept.
    pub fn new(ctx: ManagerContext, caching: bool) -> Self {
        Self {
            ctx,
            store: EntityStore::new(caching),
        }
    }

    /// Cached users, in insertion order.
    pub fn cache(&self) -> &KeyedCache<User> {
        self.store.cache()
    }

    /// Mutable access to the cache.
    pub fn cache_mut(&mut self) -> &mut KeyedCache<User> {
        self.store.cache_mut()
    }

    /// Pagination metadata of the last collection fetch.
    pub fn meta(&self) -> &PaginationMeta {
        self.store.meta()
    }

    /// Resolve a user locally by id, username, email or external id, or
    /// from an object embedding it under `relationships.user`.
    pub fn resolve<'a>(&mut self, obj: impl Into<Resolvable<'a>>) -> Option<User> {
        ptero_core::resolve(&mut self.store, obj)
    }

    /// Admin panel link for a user.
    pub fn admin_url_for(&self, id: u64) -> String {
        format!("{}/admin/users/view/{}", self.ctx.domain, id)
    }

    /// Fetch a user, from the cache unless `options.force` is set.
    pub async fn fetch(&mut self, id: u64, options: &FetchOptions) -> Result<User> {
        let path = endpoints::users::get(id);
        fetch::fetch_one(self.ctx.transport.as_ref(), &mut self.store, &path, id, options).await
    }

    /// Fetch a user by external id.
    ///
    /// A cached user with that external id is returned unless
    /// `options.force` is set.
    #[instrument(skip(self, options))]
    pub async fn fetch_external(&mut self, external_id: &str, options: &FetchOptions) -> Result<User> {
        options.validate::<User>()?;

        if !options.force {
            if let Some(user) = self
                .store
                .cache()
                .find(|u| u.external_id.as_deref() == Some(external_id))
            {
                trace!("cache hit");
                return Ok(user.clone());
            }
        }

        debug!("Fetching user by external id {}", external_id);
        let path = endpoints::users::external(external_id);
        let data = self.ctx.transport.get(&path, &options.to_query()).await?;
        normalize::patch_one(&mut self.store, &data)
    }

    /// Fetch one page of users.
    pub async fn fetch_many(&mut self, options: &FetchOptions) -> Result<KeyedCache<User>> {
        fetch::fetch_many(self.ctx.transport.as_ref(), &mut self.store, endpoints::users::MAIN, options).await
    }

    /// Fetch every user, walking all pages.
    pub async fn fetch_all(&mut self, options: &FetchOptions) -> Result<KeyedCache<User>> {
        fetch::fetch_all(
            self.ctx.transport.as_ref(),
            &mut self.store,
            endpoints::users::MAIN,
            options,
            self.ctx.page_size,
        )
        .await
    }

    /// Query users by email, uuid, username or external id, optionally
    /// sorted by id or uuid.
    pub async fn query(&mut self, entity: &str, options: &QueryOptions) -> Result<KeyedCache<User>> {
        fetch::query(self.ctx.transport.as_ref(), &mut self.store, endpoints::users::MAIN, entity, options).await
    }

    /// Create a user.
    pub async fn create(&mut self, params: &CreateUserParams) -> Result<User> {
        fetch::create(self.ctx.transport.as_ref(), &mut self.store, endpoints::users::MAIN, params).await
    }

    /// Update a user.
    pub async fn update(&mut self, id: u64, changes: &UserUpdate) -> Result<User> {
        let path = endpoints::users::get(id);
        fetch::update(self.ctx.transport.as_ref(), &mut self.store, &path, changes).await
    }

    /// Delete a user.
    pub async fn delete(&mut self, id: u64) -> Result<()> {
        let path = endpoints::users::get(id);
        fetch::delete(self.ctx.transport.as_ref(), &mut self.store, &path, id).await
    }
}
