//! Dealership Rust Client Library
//!
//! A Rust client for a dealership website's gateway, providing a typed local
//! store of vehicles, bookings, FAQs and settings, theme resolution, admin
//! sessions and image uploads.

pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod models;
pub mod storage;
pub mod store;
pub mod theme;

use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;

use crate::auth::AdminAuth;
use crate::config::{ClientOptions, DealershipConfig};
use crate::error::Error;
use crate::gateway::HttpGateway;
use crate::storage::ImageUploader;
use crate::store::Store;
use crate::theme::{FilePreferences, MemoryPreferences, PreferenceStore, ThemeResolver};

/// The main entry point for the dealership client
#[derive(Debug, Clone)]
pub struct Dealership {
    /// The base URL of the deployment, without a trailing slash
    pub url: String,
    /// HTTP client used for requests; its cookie jar carries the admin session
    pub http_client: Client,
    /// Client options
    pub options: ClientOptions,
    gateway: Arc<HttpGateway>,
    auth: AdminAuth,
}

impl Dealership {
    /// Create a new client
    ///
    /// # Example
    ///
    /// ```
    /// use dealership_rust::Dealership;
    ///
    /// let dealership = Dealership::new("https://cars.example.com").unwrap();
    /// ```
    pub fn new(url: &str) -> Result<Self, Error> {
        Self::new_with_options(url, ClientOptions::default())
    }

    /// Create a new client with custom options
    ///
    /// # Example
    ///
    /// ```
    /// use dealership_rust::{Dealership, config::ClientOptions};
    /// use std::time::Duration;
    ///
    /// let options = ClientOptions::default().with_request_timeout(Some(Duration::from_secs(5)));
    /// let dealership = Dealership::new_with_options("https://cars.example.com", options).unwrap();
    /// ```
    pub fn new_with_options(url: &str, options: ClientOptions) -> Result<Self, Error> {
        Self::from_config(DealershipConfig::new(url, options)?)
    }

    /// Create a client from `DEALERSHIP_URL` and friends
    pub fn from_env() -> Result<Self, Error> {
        Self::from_config(DealershipConfig::from_env()?)
    }

    pub fn from_config(config: DealershipConfig) -> Result<Self, Error> {
        let url = config.base_url();
        let options = config.options;

        let mut builder = Client::builder().cookie_provider(Arc::new(Jar::default()));
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        let gateway = Arc::new(HttpGateway::new(&url, http_client.clone(), options.clone()));
        let auth = AdminAuth::new(&url, http_client.clone(), options.clone());

        Ok(Self {
            url,
            http_client,
            options,
            gateway,
            auth,
        })
    }

    /// Admin login, verification and setup
    pub fn auth(&self) -> &AdminAuth {
        &self.auth
    }

    /// The HTTP gateway the stores talk to
    pub fn gateway(&self) -> Arc<HttpGateway> {
        self.gateway.clone()
    }

    /// Create an empty store backed by this deployment; call `hydrate` to load it
    pub fn create_store(&self) -> Store {
        Store::new(self.gateway.clone())
    }

    /// Image uploads for vehicle listings
    pub fn images(&self) -> ImageUploader {
        ImageUploader::new(&self.url, self.http_client.clone(), self.options.clone())
    }

    /// Where the dark mode flag lives, as configured in the options
    pub fn preferences(&self) -> Arc<dyn PreferenceStore> {
        match self.options.resolved_preferences_path() {
            Some(path) if self.options.persist_preferences => Arc::new(FilePreferences::new(path)),
            _ => Arc::new(MemoryPreferences::new()),
        }
    }

    /// A theme resolver reading from `store`
    pub async fn theme_resolver(&self, store: &Store) -> ThemeResolver {
        ThemeResolver::new(
            store.clone(),
            self.preferences(),
            self.options.default_dark_mode,
        )
        .await
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::models::*;
    pub use crate::store::{HydrateOutcome, SearchFilters, Store};
    pub use crate::theme::{resolve_tokens, ThemeResolver, TokenSet};
    pub use crate::Dealership;
}
