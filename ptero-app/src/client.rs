//! The application-API client facade.

use ptero_core::Transport;
use std::sync::Arc;
use tracing::info;

use crate::config::{AppConfig, ConfigError};
use crate::http::HttpTransport;
use crate::managers::{LocationManager, ManagerContext, ServerManager, UserManager};

/// Client for a panel's application API.
///
/// Owns one transport, shared by every manager, and one manager per
/// resource type. Each manager keeps its own cache.
///
/// # Example
///
/// ```rust,no_run
/// use ptero_app::{AppConfig, PteroApp};
/// use ptero_core::FetchOptions;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut app = PteroApp::new(AppConfig::new("https://panel.example.com", "ptla_key"))?;
///
/// let servers = app.servers.fetch_all(&FetchOptions::new()).await?;
/// for server in servers.values() {
///     println!("{} -> {}", server.name, app.servers.panel_url_for(&server.identifier));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PteroApp {
    domain: String,

    /// Node locations.
    pub locations: LocationManager,

    /// Servers.
    pub servers: ServerManager,

    /// Users.
    pub users: UserManager,
}

impl PteroApp {
    /// Create a client that talks to the panel over HTTP.
    ///
    /// # Errors
    ///
    /// `ConfigError` if the configuration fails validation.
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config)?;
        info!("Created application client for {}", config.domain());
        Ok(Self::with_transport(&config, Arc::new(transport)))
    }

    /// Create a client over any transport.
    pub fn with_transport(config: &AppConfig, transport: Arc<dyn Transport>) -> Self {
        let ctx = ManagerContext::new(transport, config.domain(), config.page_size);

        Self {
            domain: config.domain().to_string(),
            locations: LocationManager::new(ctx.clone(), config.cache.locations),
            servers: ServerManager::new(ctx.clone(), config.cache.servers),
            users: UserManager::new(ctx, config.cache.users),
        }
    }

    /// Load configuration from the environment and create a client.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(AppConfig::from_env())
    }

    /// The panel URL without a trailing slash.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}
