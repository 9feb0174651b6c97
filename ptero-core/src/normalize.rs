//! # Normalization
//!
//! Turns raw API payloads into typed entities and, when the store has
//! caching enabled, writes them into its cache.
//!
//! Two payload shapes are understood:
//!
//! ```text
//! collection  { "data": [ { "attributes": {...} }, ... ], "meta": { "pagination": {...} } }
//! single      { "attributes": {...} }
//! ```
//!
//! The input is never mutated. The only side effects are the cache write
//! and the replacement of the store's pagination metadata, and both happen
//! only after the whole payload has been parsed.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::cache::KeyedCache;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::pagination::PaginationMeta;
use crate::store::EntityStore;

/// The result of normalizing a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Patched<E> {
    /// A single-object payload.
    One(E),
    /// A collection payload, in response order. This is always the fresh
    /// page, never the store's persistent cache.
    Many(KeyedCache<E>),
}

impl<E: Entity> Patched<E> {
    /// Expect a single entity.
    pub fn into_one(self) -> Result<E> {
        match self {
            Patched::One(entity) => Ok(entity),
            Patched::Many(_) => Err(Error::InvalidPayload(format!(
                "expected a single {}, got a list",
                E::KIND
            ))),
        }
    }

    /// Expect a collection.
    pub fn into_many(self) -> Result<KeyedCache<E>> {
        match self {
            Patched::Many(page) => Ok(page),
            Patched::One(_) => Err(Error::InvalidPayload(format!(
                "expected a list of {}, got a single object",
                E::KIND
            ))),
        }
    }
}

/// Normalize a payload into the store.
///
/// Pagination metadata, when present, replaces the store's metadata even
/// if the page holds no entities. A payload carrying only `meta` is an
/// empty collection.
///
/// # Errors
///
/// `InvalidPayload` if the payload matches neither shape or an entity's
/// attributes do not deserialize. The store is untouched in that case.
pub fn patch<E: Entity>(store: &mut EntityStore<E>, payload: &Value) -> Result<Patched<E>> {
    let (meta, patched) = parse::<E>(payload)?;
    commit(store, meta, &patched);
    Ok(patched)
}

/// Normalize a payload that must be a single object.
///
/// # Errors
///
/// `InvalidPayload` if the payload is a collection or does not parse. The
/// store is untouched in either case.
pub fn patch_one<E: Entity>(store: &mut EntityStore<E>, payload: &Value) -> Result<E> {
    let (meta, patched) = parse::<E>(payload)?;
    if matches!(patched, Patched::Many(_)) {
        return patched.into_one();
    }
    commit(store, meta, &patched);
    patched.into_one()
}

/// Normalize a payload that must be a collection.
///
/// # Errors
///
/// `InvalidPayload` if the payload is a single object or does not parse.
/// The store is untouched in either case.
pub fn patch_many<E: Entity>(store: &mut EntityStore<E>, payload: &Value) -> Result<KeyedCache<E>> {
    let (meta, patched) = parse::<E>(payload)?;
    if matches!(patched, Patched::One(_)) {
        return patched.into_many();
    }
    commit(store, meta, &patched);
    patched.into_many()
}

fn parse<E: Entity>(payload: &Value) -> Result<(Option<PaginationMeta>, Patched<E>)> {
    let meta = match payload.pointer("/meta/pagination") {
        Some(pagination) => Some(
            PaginationMeta::deserialize(pagination)
                .map_err(|e| Error::InvalidPayload(format!("pagination: {}", e)))?,
        ),
        None => None,
    };

    let patched = match payload.get("data") {
        Some(Value::Array(items)) => {
            let mut page = KeyedCache::new();
            for item in items {
                let entity = from_fragment::<E>(item)?;
                page.set(entity.id(), entity);
            }
            Patched::Many(page)
        }
        Some(_) => {
            return Err(Error::InvalidPayload(format!(
                "`data` of a {} list is not an array",
                E::KIND
            )))
        }
        None if payload.get("attributes").is_some() => Patched::One(from_fragment::<E>(payload)?),
        None if meta.is_some() => Patched::Many(KeyedCache::new()),
        None => {
            return Err(Error::InvalidPayload(format!(
                "expected a {} object or list",
                E::KIND
            )))
        }
    };

    Ok((meta, patched))
}

fn commit<E: Entity>(store: &mut EntityStore<E>, meta: Option<PaginationMeta>, patched: &Patched<E>) {
    if let Some(meta) = meta {
        store.meta = meta;
    }

    if store.caching() {
        match patched {
            Patched::One(entity) => {
                trace!(kind = E::KIND, id = entity.id(), "caching entity");
                store.cache.set(entity.id(), entity.clone());
            }
            Patched::Many(page) => {
                trace!(kind = E::KIND, count = page.len(), "caching page");
                store.cache.update(page);
            }
        }
    }
}

/// Deserialize one `{ "attributes": {...} }` fragment without touching any
/// store.
pub fn from_fragment<E: Entity>(fragment: &Value) -> Result<E> {
    let attributes = fragment
        .get("attributes")
        .ok_or_else(|| Error::InvalidPayload(format!("{} fragment has no attributes", E::KIND)))?;

    E::deserialize(attributes).map_err(|e| Error::InvalidPayload(format!("{}: {}", E::KIND, e)))
}
