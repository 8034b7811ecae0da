//! Configuration options for the dealership client

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

/// Value sent in the `X-Client-Info` header
pub const CLIENT_INFO: &str = concat!("dealership-rust/", env!("CARGO_PKG_VERSION"));

/// Configuration options for the dealership client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout, left to the transport when `None`
    pub request_timeout: Option<Duration>,

    /// Value of the `X-Client-Info` header
    pub client_info: String,

    /// Whether the dark mode flag is written to disk
    pub persist_preferences: bool,

    /// Where the dark mode flag is stored, defaults to the user config dir
    pub preferences_path: Option<PathBuf>,

    /// Dark mode value used when nothing has been persisted yet
    pub default_dark_mode: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            client_info: CLIENT_INFO.to_string(),
            persist_preferences: true,
            preferences_path: None,
            default_dark_mode: false,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set the client info header value
    pub fn with_client_info(mut self, value: &str) -> Self {
        self.client_info = value.to_string();
        self
    }

    /// Set whether preferences are persisted
    pub fn with_persist_preferences(mut self, value: bool) -> Self {
        self.persist_preferences = value;
        self
    }

    /// Set the preferences file path
    pub fn with_preferences_path(mut self, value: impl Into<PathBuf>) -> Self {
        self.preferences_path = Some(value.into());
        self
    }

    /// Set the dark mode fallback
    pub fn with_default_dark_mode(mut self, value: bool) -> Self {
        self.default_dark_mode = value;
        self
    }

    /// Resolve the preferences file, falling back to `<config dir>/dealership/preferences.json`
    pub fn resolved_preferences_path(&self) -> Option<PathBuf> {
        self.preferences_path.clone().or_else(|| {
            dirs::config_dir().map(|dir| dir.join("dealership").join("preferences.json"))
        })
    }
}

/// Connection settings for a dealership deployment.
#[derive(Debug, Clone)]
pub struct DealershipConfig {
    pub url: Url,
    pub options: ClientOptions,
}

impl DealershipConfig {
    /// Creates a new configuration, validating the URL.
    pub fn new(url_str: &str, options: ClientOptions) -> Result<Self, Error> {
        let url = Url::parse(url_str)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!("{} cannot be used as a base URL", url_str)));
        }
        Ok(Self { url, options })
    }

    /// Reads `DEALERSHIP_URL` and the optional `DEALERSHIP_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, Error> {
        let url_str = std::env::var("DEALERSHIP_URL")
            .map_err(|_| Error::config("DEALERSHIP_URL environment variable not found"))?;

        let mut options = ClientOptions::default();
        if let Ok(raw) = std::env::var("DEALERSHIP_TIMEOUT_SECS") {
            let secs: u64 = raw
                .parse()
                .map_err(|_| Error::config(format!("DEALERSHIP_TIMEOUT_SECS is not a number: {}", raw)))?;
            options = options.with_request_timeout(Some(Duration::from_secs(secs)));
        }

        Self::new(&url_str, options)
    }

    /// Base URL as a string without a trailing slash
    pub fn base_url(&self) -> String {
        self.url.as_str().trim_end_matches('/').to_string()
    }
}
