//! # Ptero Core
//!
//! The transport-agnostic engine behind every resource manager of a
//! Pterodactyl API client.
//!
//! ## Overview
//!
//! - **KeyedCache**: insertion-ordered id → entity map, one per manager
//! - **Normalization**: raw `data` / `attributes` / `meta.pagination`
//!   payloads into typed entities, cached when the manager allows it
//! - **Resolution**: local lookup by id, alias, or embedded relationship
//! - **Fetch control**: cache-or-network reads, paged walks, queries, and
//!   non-speculative writes
//!
//! ## Flow
//!
//! ```text
//! manager ── fetch::* ──▶ Transport ──▶ panel
//!    │           │
//!    │           └──▶ normalize::patch ──▶ EntityStore { cache, meta }
//!    │                                         ▲
//!    └──────────── resolve ────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ptero_core::{fetch, Entity, EntityStore, FetchOptions, Transport};
//!
//! async fn first_page<E: Entity>(transport: &dyn Transport) -> ptero_core::Result<()> {
//!     let mut store = EntityStore::<E>::new(true);
//!     let page = fetch::fetch_many(transport, &mut store, "/locations", &FetchOptions::new()).await?;
//!     println!("{} entities, {} pages", page.len(), store.meta().total_pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Engine functions borrow the store mutably across their single await
//! point, so one manager serves one caller at a time. Concurrent reads of
//! the same id through different stores are not de-duplicated.

pub mod cache;
pub mod entity;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod options;
pub mod pagination;
pub mod resolve;
pub mod store;
pub mod timestamp;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::KeyedCache;
pub use entity::Entity;
pub use error::{Error, Result, TransportError};
pub use normalize::{patch, patch_many, patch_one, Patched};
pub use options::{FetchOptions, Query, QueryOptions};
pub use pagination::PaginationMeta;
pub use resolve::{resolve, Resolvable};
pub use store::EntityStore;
pub use transport::Transport;
