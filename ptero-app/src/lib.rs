//! # Ptero App
//!
//! A caching client for the application API of a Pterodactyl panel.
//!
//! ## Overview
//!
//! - **Managers**: one per resource (locations, servers, users), each with
//!   its own cache, pagination metadata and local resolution
//! - **Transport**: reqwest over HTTPS with bearer authentication and
//!   retries for transient failures
//! - **Configuration**: environment driven, with per-manager caching
//!   toggles
//! - **Permissions**: the panel's sub-user permission model, re-exported
//!   from `ptero-permissions`
//!
//! ## Caching
//!
//! A fetch by id is served from the manager's cache unless forced. Page,
//! full-walk and query fetches always go to the panel and merge what they
//! read into the cache. Writes touch the cache only after the panel
//! accepts them.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ptero_app::{AppConfig, PteroApp};
//! use ptero_core::{FetchOptions, QueryOptions};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut app = PteroApp::from_env()?;
//!
//! // Network on first read, cache afterwards
//! let location = app.locations.fetch(1, &FetchOptions::new()).await?;
//! let again = app.locations.fetch(1, &FetchOptions::new()).await?;
//! assert_eq!(location, again);
//!
//! // Local lookup by alias
//! assert!(app.locations.resolve(location.short.as_str()).is_some());
//!
//! // Filtered query
//! let admins = app.users.query("admin@example.com", &QueryOptions::new().filter("email")).await?;
//! println!("{} matching users", admins.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod endpoints;
pub mod http;
pub mod managers;
pub mod models;
pub mod retry;

pub use client::PteroApp;
pub use config::{AppConfig, CacheOptions, ConfigError};
pub use http::HttpTransport;
pub use managers::{LocationManager, ManagerContext, ServerManager, UserManager};
pub use models::{
    ApplicationServer, CreateLocationParams, CreateUserParams, FeatureLimits, Limits, Location, LocationUpdate,
    ServerDetailsUpdate, User, UserUpdate,
};

pub use ptero_core::{Error, FetchOptions, KeyedCache, PaginationMeta, QueryOptions, Resolvable, Result, TransportError};
pub use ptero_permissions as permissions;
pub use ptero_permissions::{Flag, Permissions};
