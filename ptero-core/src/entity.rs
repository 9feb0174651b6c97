//! # Entities
//!
//! The contract a typed resource must satisfy to be cached, normalized and
//! resolved by the engine. Concrete entity types live with the client that
//! knows the panel's resources.

use serde::de::DeserializeOwned;
use std::fmt::Debug;

/// A typed, id-bearing record mirroring one remote resource.
///
/// Implementors deserialize from the `attributes` object of an API
/// fragment. The id never changes across re-fetches; every other field
/// may.
pub trait Entity: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// Resource name, also used as the relationship key when another
    /// resource embeds this one (e.g. `"location"`).
    const KIND: &'static str;

    /// Field names accepted by `filter[...]` queries.
    const FILTERS: &'static [&'static str] = &[];

    /// Relationship names accepted by `include`.
    const INCLUDES: &'static [&'static str] = &[];

    /// Field names accepted by `sort` (optionally prefixed with `-`).
    const SORTS: &'static [&'static str] = &[];

    /// The stable numeric identifier.
    fn id(&self) -> u64;

    /// Check whether `alias` exactly equals one of the entity's alias
    /// fields. Matching is case-sensitive and never partial.
    fn matches_alias(&self, alias: &str) -> bool;
}
