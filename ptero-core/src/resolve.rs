//! # Resolution
//!
//! Local lookup of an entity from whatever a call site has at hand: an id,
//! an alias, or a raw API object that embeds the entity as a relationship.
//! Resolution never touches the network and never fails; a miss is `None`.

use serde_json::Value;

use crate::entity::Entity;
use crate::normalize;
use crate::store::EntityStore;

/// Something an entity can be resolved from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolvable<'a> {
    /// A numeric id, looked up directly in the cache.
    Id(u64),
    /// An alias string, matched exactly against each entity's alias fields.
    Alias(&'a str),
    /// A raw API object that may embed the entity under
    /// `relationships.<kind>`.
    Object(&'a Value),
}

impl From<u64> for Resolvable<'_> {
    fn from(id: u64) -> Self {
        Resolvable::Id(id)
    }
}

impl<'a> From<&'a str> for Resolvable<'a> {
    fn from(alias: &'a str) -> Self {
        Resolvable::Alias(alias)
    }
}

impl<'a> From<&'a String> for Resolvable<'a> {
    fn from(alias: &'a String) -> Self {
        Resolvable::Alias(alias.as_str())
    }
}

impl<'a> From<&'a Value> for Resolvable<'a> {
    fn from(object: &'a Value) -> Self {
        Resolvable::Object(object)
    }
}

/// Resolve an entity from the store.
///
/// - `Id`: cache lookup by id.
/// - `Alias`: the first cached entity, in insertion order, with a matching
///   alias.
/// - `Object`: if `relationships.<kind>` carries `attributes`, that fragment
///   is normalized (and cached, when caching is on) and returned.
///
/// # Example
///
/// ```
/// # use ptero_core::{resolve, EntityStore, Entity};
/// # #[derive(Debug, Clone, serde::Deserialize)]
/// # struct Location { id: u64, short: String }
/// # impl Entity for Location {
/// #     const KIND: &'static str = "location";
/// #     fn id(&self) -> u64 { self.id }
/// #     fn matches_alias(&self, alias: &str) -> bool { self.short == alias }
/// # }
/// let mut store = EntityStore::<Location>::new(true);
/// store.cache_mut().set(1, Location { id: 1, short: "us".into() });
///
/// assert!(resolve(&mut store, "us").is_some());
/// assert!(resolve(&mut store, "ca").is_none());
/// assert!(resolve(&mut store, 2u64).is_none());
/// ```
pub fn resolve<'a, E: Entity>(
    store: &mut EntityStore<E>,
    obj: impl Into<Resolvable<'a>>,
) -> Option<E> {
    match obj.into() {
        Resolvable::Id(id) => store.cache().get(id).cloned(),
        Resolvable::Alias(alias) => store.cache().find(|e| e.matches_alias(alias)).cloned(),
        Resolvable::Object(object) => {
            let fragment = object.get("relationships")?.get(E::KIND)?;
            fragment.get("attributes")?;
            normalize::patch_one(store, fragment).ok()
        }
    }
}
