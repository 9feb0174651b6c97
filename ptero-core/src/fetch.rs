//! # Fetch Control
//!
//! Decides when a read can be served from the cache and when it must go to
//! the panel, and runs the write paths.
//!
//! - A read by id is served from the cache unless `force` is set.
//! - A collection read always goes to the panel.
//! - Writes are never applied speculatively: the cache changes only after
//!   the transport call succeeds.
//!
//! Every function validates its local input first, so a validation error
//! means no request was sent. Transport errors are returned unchanged and
//! never retried here.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, trace};

use crate::cache::KeyedCache;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::normalize;
use crate::options::{FetchOptions, QueryOptions};
use crate::store::EntityStore;
use crate::transport::Transport;

/// Fetch one entity by id.
///
/// Returns the cached entity without any request unless `options.force`
/// is set or the id is not cached.
#[instrument(skip(transport, store, options), fields(kind = E::KIND))]
pub async fn fetch_one<E: Entity>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    id: u64,
    options: &FetchOptions,
) -> Result<E> {
    options.validate::<E>()?;

    if !options.force {
        if let Some(cached) = store.cache().get(id) {
            trace!("cache hit");
            return Ok(cached.clone());
        }
    }

    debug!("Fetching {} {} from {}", E::KIND, id, path);
    let data = transport.get(path, &options.to_query()).await?;
    normalize::patch_one(store, &data)
}

/// Fetch one page of entities.
///
/// The page is merged into the cache (when caching is on) and returned as
/// fetched.
#[instrument(skip(transport, store, options), fields(kind = E::KIND))]
pub async fn fetch_many<E: Entity>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    options: &FetchOptions,
) -> Result<KeyedCache<E>> {
    options.validate::<E>()?;

    let data = transport.get(path, &options.to_query()).await?;
    let page = normalize::patch_many(store, &data)?;
    debug!(count = page.len(), "Fetched {} page", E::KIND);
    Ok(page)
}

/// Fetch every entity by walking all pages.
///
/// Paging options in `options` are ignored; pages of `page_size` are read
/// from page 1 until the panel reports the last page, returns an empty
/// page, or stops sending pagination metadata. The walk never requests
/// more pages than the panel's reported `total_pages`, even if the panel
/// keeps answering with the same page. Each page is normalized
/// exactly as [`fetch_many`] would.
#[instrument(skip(transport, store, options), fields(kind = E::KIND))]
pub async fn fetch_all<E: Entity>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    options: &FetchOptions,
    page_size: u32,
) -> Result<KeyedCache<E>> {
    let base = options.without_paging();
    base.validate::<E>()?;

    let mut all = KeyedCache::new();
    let mut page = 1;
    loop {
        let query = base.clone().page(page).per_page(page_size).to_query();
        let data = transport.get(path, &query).await?;
        let batch = normalize::patch_many(store, &data)?;

        let exhausted = batch.is_empty()
            || data.pointer("/meta/pagination").is_none()
            || store.meta().is_last_page()
            || page >= store.meta().total_pages;
        all.extend(batch);

        if exhausted {
            break;
        }
        page += 1;
    }

    debug!(count = all.len(), pages = page, "Fetched all {} entities", E::KIND);
    Ok(all)
}

/// Query the panel for entities matching a filter and/or sort.
///
/// The cache is never consulted; results are normalized as a collection.
#[instrument(skip(transport, store, options), fields(kind = E::KIND))]
pub async fn query<E: Entity>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    entity: &str,
    options: &QueryOptions,
) -> Result<KeyedCache<E>> {
    options.validate::<E>()?;

    let data = transport.get(path, &options.to_query(entity)).await?;
    normalize::patch_many(store, &data)
}

/// Create an entity from an attribute payload.
#[instrument(skip(transport, store, body), fields(kind = E::KIND))]
pub async fn create<E: Entity, B: Serialize + ?Sized>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    body: &B,
) -> Result<E> {
    let body = to_body(body)?;
    let data = transport.post(path, &body).await?;
    let created = normalize::patch_one(store, &data)?;
    debug!(id = created.id(), "Created {}", E::KIND);
    Ok(created)
}

/// Update an entity with the supplied fields.
///
/// Fields that are `null` count as not supplied and are left out of the
/// request. An empty string is sent as is, which clears the field.
///
/// # Errors
///
/// `Validation` if no field is supplied.
#[instrument(skip(transport, store, changes), fields(kind = E::KIND))]
pub async fn update<E: Entity, B: Serialize + ?Sized>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    changes: &B,
) -> Result<E> {
    let body = match to_body(changes)? {
        Value::Object(fields) => fields
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .collect::<serde_json::Map<_, _>>(),
        _ => serde_json::Map::new(),
    };
    if body.is_empty() {
        return Err(Error::validation(format!(
            "At least one field is required to update the {}.",
            E::KIND
        )));
    }

    let data = transport.patch(path, &Value::Object(body)).await?;
    normalize::patch_one(store, &data)
}

/// Delete an entity, evicting it from the cache once the panel confirms.
#[instrument(skip(transport, store), fields(kind = E::KIND))]
pub async fn delete<E: Entity>(
    transport: &dyn Transport,
    store: &mut EntityStore<E>,
    path: &str,
    id: u64,
) -> Result<()> {
    transport.delete(path).await?;
    if store.cache_mut().delete(id).is_some() {
        debug!("Evicted {} {} from cache", E::KIND, id);
    }
    Ok(())
}

fn to_body<B: Serialize + ?Sized>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| Error::InvalidPayload(format!("request body: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::resolve::resolve;
    use crate::testing::{region_fragment, region_page, RecordingTransport, Region};
    use serde_json::json;

    fn cached_store() -> EntityStore<Region> {
        let mut store = EntityStore::<Region>::new(true);
        normalize::patch(&mut store, &region_fragment(1, "us", "united states")).unwrap();
        store
    }

    #[tokio::test]
    async fn test_fetch_one_cache_hit_makes_no_call() {
        let transport = RecordingTransport::new();
        let mut store = cached_store();
        let before = store.cache().get(1).cloned();

        let region = fetch_one(&transport, &mut store, "/locations/1", 1, &FetchOptions::new())
            .await
            .unwrap();

        assert_eq!(Some(region), before);
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_one_force_refreshes_cache() {
        let transport = RecordingTransport::new().respond(region_fragment(1, "us", "usa"));
        let mut store = cached_store();

        let region = fetch_one(&transport, &mut store, "/locations/1", 1, &FetchOptions::new().force())
            .await
            .unwrap();

        assert_eq!(region.long, "usa");
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.calls()[0].path, "/locations/1");
        assert_eq!(store.cache().get(1).map(|r| r.long.as_str()), Some("usa"));
    }

    #[tokio::test]
    async fn test_fetch_one_miss_goes_to_network() {
        let transport = RecordingTransport::new().respond(region_fragment(5, "jp", "japan"));
        let mut store = cached_store();

        let region = fetch_one(&transport, &mut store, "/locations/5", 5, &FetchOptions::new())
            .await
            .unwrap();
        assert_eq!(region.id, 5);
        assert_eq!(transport.calls().len(), 1);
        assert!(store.cache().has(5));
    }

    #[tokio::test]
    async fn test_fetch_one_propagates_transport_error() {
        let transport = RecordingTransport::new().fail(TransportError::NotFound("/locations/9".into()));
        let mut store = cached_store();

        let err = fetch_one(&transport, &mut store, "/locations/9", 9, &FetchOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::NotFound(_))));
        assert_eq!(store.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_one_invalid_include_makes_no_call() {
        let transport = RecordingTransport::new();
        let mut store = EntityStore::<Region>::new(true);

        let err = fetch_one(&transport, &mut store, "/locations/1", 1, &FetchOptions::new().include("eggs"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_many_always_hits_network() {
        let transport = RecordingTransport::new().respond(region_page(
            vec![region_fragment(1, "us", "united states"), region_fragment(2, "ca", "canada")],
            1,
            1,
        ));
        let mut store = cached_store();

        let page = fetch_many(&transport, &mut store, "/locations", &FetchOptions::new().include("nodes"))
            .await
            .unwrap();

        assert_eq!(page.keys().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(store.cache().len(), 2);
        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].query.as_ref().unwrap().include, vec!["nodes".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_all_walks_pages() {
        let transport = RecordingTransport::new()
            .respond(region_page(vec![region_fragment(1, "us", "united states")], 1, 3))
            .respond(region_page(vec![region_fragment(2, "ca", "canada")], 2, 3))
            .respond(region_page(vec![region_fragment(3, "de", "germany")], 3, 3));
        let mut store = EntityStore::<Region>::new(true);

        let opts = FetchOptions::new().page(7).per_page(2);
        let all = fetch_all(&transport, &mut store, "/locations", &opts, 1).await.unwrap();

        assert_eq!(all.keys().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(store.cache().len(), 3);

        let pages: Vec<_> = transport
            .calls()
            .into_iter()
            .map(|c| {
                let q = c.query.unwrap();
                (q.page, q.per_page)
            })
            .collect();
        assert_eq!(pages, vec![(Some(1), Some(1)), (Some(2), Some(1)), (Some(3), Some(1))]);
    }

    #[tokio::test]
    async fn test_fetch_all_stops_on_empty_page() {
        let transport = RecordingTransport::new()
            .respond(region_page(vec![region_fragment(1, "us", "united states")], 1, 5))
            .respond(region_page(vec![], 2, 5));
        let mut store = EntityStore::<Region>::new(false);

        let all = fetch_all(&transport, &mut store, "/locations", &FetchOptions::new(), 50)
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(transport.calls().len(), 2);
        assert!(store.cache().is_empty());
    }

    #[tokio::test]
    async fn test_query_requires_filter_or_sort() {
        let transport = RecordingTransport::new();
        let mut store = EntityStore::<Region>::new(true);

        let err = query(&transport, &mut store, "/locations", "us", &QueryOptions::new())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_query_sends_filter() {
        let transport = RecordingTransport::new()
            .respond(region_page(vec![region_fragment(1, "us", "united states")], 1, 1));
        let mut store = EntityStore::<Region>::new(true);

        let found = query(&transport, &mut store, "/locations", "us", &QueryOptions::new().filter("short"))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            transport.calls()[0].query.as_ref().unwrap().filter,
            Some(("short".to_string(), "us".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_caches_result() {
        let transport = RecordingTransport::new().respond(region_fragment(8, "ca", "canada"));
        let mut store = EntityStore::<Region>::new(true);

        let created = create(&transport, &mut store, "/locations", &json!({ "short": "ca", "long": "canada" }))
            .await
            .unwrap();
        assert_eq!(created.id, 8);
        assert_eq!(resolve(&mut store, "ca"), Some(created));
        assert_eq!(transport.calls()[0].method, "POST");
    }

    #[tokio::test]
    async fn test_update_without_fields_makes_no_call() {
        let transport = RecordingTransport::new();
        let mut store = cached_store();

        let err = update(&transport, &mut store, "/locations/1", &json!({ "short": null, "long": null }))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_update_sends_only_supplied_fields() {
        let transport = RecordingTransport::new().respond(region_fragment(1, "us", "america"));
        let mut store = cached_store();

        let updated = update(&transport, &mut store, "/locations/1", &json!({ "short": null, "long": "america" }))
            .await
            .unwrap();
        assert_eq!(updated.long, "america");
        assert_eq!(transport.calls()[0].body, Some(json!({ "long": "america" })));
        assert_eq!(store.cache().get(1).map(|r| r.long.as_str()), Some("america"));
    }

    #[tokio::test]
    async fn test_update_sends_empty_string_to_clear() {
        let transport = RecordingTransport::new().respond(region_fragment(1, "us", ""));
        let mut store = cached_store();

        let updated = update(&transport, &mut store, "/locations/1", &json!({ "short": null, "long": "" }))
            .await
            .unwrap();
        assert_eq!(updated.long, "");
        assert_eq!(transport.calls()[0].body, Some(json!({ "long": "" })));
    }

    #[tokio::test]
    async fn test_fetch_all_stops_when_panel_repeats_a_page() {
        let mut transport = RecordingTransport::new();
        for _ in 0..20 {
            transport = transport.respond(region_page(vec![region_fragment(1, "us", "united states")], 1, 3));
        }
        let mut store = EntityStore::<Region>::new(true);

        let all = fetch_all(&transport, &mut store, "/locations", &FetchOptions::new(), 50)
            .await
            .unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(transport.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_one_list_response_leaves_store_untouched() {
        let transport = RecordingTransport::new()
            .respond(region_page(vec![region_fragment(2, "ca", "canada")], 1, 1));
        let mut store = EntityStore::<Region>::new(true);

        let err = fetch_one(&transport, &mut store, "/locations/1", 1, &FetchOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidPayload(_)));
        assert!(store.cache().is_empty());
        assert_eq!(store.meta().current, 0);
    }

    #[tokio::test]
    async fn test_delete_evicts_after_success() {
        let transport = RecordingTransport::new();
        let mut store = cached_store();

        delete(&transport, &mut store, "/locations/1", 1).await.unwrap();
        assert!(!store.cache().has(1));
        assert_eq!(transport.calls()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_cache() {
        let transport = RecordingTransport::new().fail(TransportError::Api {
            status: 500,
            message: "boom".into(),
        });
        let mut store = cached_store();

        let err = delete(&transport, &mut store, "/locations/1", 1).await.unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Api { status: 500, .. })));
        assert!(store.cache().has(1));
    }
}
