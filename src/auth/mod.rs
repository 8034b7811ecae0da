//! Admin authentication against the gateway
//!
//! The gateway issues the session as an `auth-token` cookie. The shared HTTP
//! client's cookie jar sends it back on every later request; this module only
//! tracks who is signed in and until when.

mod session;
mod types;

use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{ensure_success, Fetch, FetchBuilder};
use crate::models::SettingsPatch;

pub use session::*;
pub use types::*;

/// Client for the admin endpoints
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// The base URL of the deployment
    url: String,

    /// HTTP client used for requests; must share the cookie jar with the gateway
    client: Client,

    /// The current session
    session: Arc<RwLock<Option<AdminSession>>>,

    /// Client options
    options: ClientOptions,
}

impl AdminAuth {
    /// Create a new AdminAuth client
    pub(crate) fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            session: Arc::new(RwLock::new(None)),
            options,
        }
    }

    fn get_admin_url(&self, path: &str) -> String {
        format!("{}/api/admin{}", self.url, path)
    }

    fn prepare<'a>(&self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
    }

    /// Sign in with a username and password
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, Error> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("Username and password are required"));
        }

        let url = self.get_admin_url("/login");
        let response = self
            .prepare(Fetch::post(&self.client, &url))
            .json(&Credentials { username, password })?
            .execute_raw()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            let message = ensure_success(response)
                .await
                .err()
                .map(|e| e.user_message())
                .unwrap_or_else(|| "Invalid credentials".to_string());
            return Err(Error::auth(message));
        }
        let response = ensure_success(response).await?;

        let cookie = response
            .cookies()
            .find(|cookie| cookie.name() == AUTH_COOKIE)
            .map(|cookie| (cookie.value().to_string(), cookie.max_age()));
        let result = response.json::<LoginResponse>().await?;
        if !result.success {
            return Err(Error::auth("Login was not accepted"));
        }

        let (token, max_age) = match cookie {
            Some((token, max_age)) => (Some(token), max_age),
            None => (None, None),
        };
        let session = AdminSession::new(result.user.clone(), token, max_age);
        *self.session.write().await = Some(session);

        tracing::info!(username = %result.user.username, "admin signed in");
        Ok(result.user)
    }

    /// Ask the gateway whether the session cookie is still valid.
    ///
    /// Returns `None` and clears the local session when it is not.
    pub async fn verify(&self) -> Result<Option<AdminUser>, Error> {
        let url = self.get_admin_url("/verify");
        let response = self
            .prepare(Fetch::get(&self.client, &url))
            .execute_raw()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            *self.session.write().await = None;
            return Ok(None);
        }
        let result = ensure_success(response).await?.json::<VerifyResponse>().await?;

        let mut session = self.session.write().await;
        match session.as_mut() {
            Some(current) if current.user.id == result.user.id => current.user = result.user.clone(),
            _ => *session = Some(AdminSession::new(result.user.clone(), None, None)),
        }
        Ok(Some(result.user))
    }

    /// Sign out.
    ///
    /// The local session is dropped even when the gateway call fails.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.get_admin_url("/logout");
        let result = self
            .prepare(Fetch::post(&self.client, &url))
            .execute_checked()
            .await;

        *self.session.write().await = None;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "logout request failed");
        }
        result.map(|_| ())
    }

    /// Whether an unexpired admin session is active
    pub async fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .await
            .as_ref()
            .map_or(false, |session| !session.is_expired())
    }

    /// The signed-in username, for display
    pub async fn username(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .filter(|session| !session.is_expired())
            .map(|session| session.user.username.clone())
    }

    /// Get the current session
    pub async fn session(&self) -> Option<AdminSession> {
        self.session.read().await.clone()
    }

    /// Whether the deployment already has an administrator
    pub async fn setup_status(&self) -> Result<SetupStatus, Error> {
        let url = self.get_admin_url("/setup");
        self.prepare(Fetch::get(&self.client, &url))
            .execute::<SetupStatus>()
            .await
    }

    /// Create the first administrator, optionally saving initial settings
    pub async fn setup(
        &self,
        username: &str,
        password: &str,
        settings: Option<SettingsPatch>,
    ) -> Result<(), Error> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("Username and password are required"));
        }
        if let Some(colors) = settings.as_ref().and_then(|s| s.custom_colors.as_ref()) {
            colors.validate()?;
        }

        let url = self.get_admin_url("/setup");
        self.prepare(Fetch::post(&self.client, &url))
            .json(&SetupRequest {
                username,
                password,
                settings,
            })?
            .execute_checked()
            .await?;

        tracing::info!(%username, "admin account created");
        Ok(())
    }
}
