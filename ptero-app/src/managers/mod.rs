//! Resource managers.
//!
//! A manager owns the cache and pagination metadata for one resource type
//! and exposes the panel's operations on it. All managers of one client
//! share a single transport.

use ptero_core::Transport;
use std::sync::Arc;

pub mod locations;
pub mod servers;
pub mod users;

pub use locations::LocationManager;
pub use servers::ServerManager;
pub use users::UserManager;

/// What every manager needs from its client.
#[derive(Clone)]
pub struct ManagerContext {
    /// Shared transport.
    pub transport: Arc<dyn Transport>,

    /// Panel URL without a trailing slash, used for browser links.
    pub domain: String,

    /// Page size for full collection walks.
    pub page_size: u32,
}

impl ManagerContext {
    /// Create a context.
    pub fn new(transport: Arc<dyn Transport>, domain: impl Into<String>, page_size: u32) -> Self {
        Self {
            transport,
            domain: domain.into(),
            page_size,
        }
    }
}

impl std::fmt::Debug for ManagerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerContext")
            .field("domain", &self.domain)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}
