//! HTTP implementation of the gateway

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{Created, EntityKind, Gateway, InitStatus, ListEnvelope, SettingsEnvelope};
use crate::config::ClientOptions;
use crate::error::Error;
use crate::fetch::{Fetch, FetchBuilder};
use crate::models::{SettingsPatch, Vehicle};

/// Client for the dealership's `/api` endpoints
#[derive(Debug, Clone)]
pub struct HttpGateway {
    /// The base URL of the deployment
    url: String,

    /// HTTP client used for requests
    client: Client,

    /// Client options
    options: ClientOptions,
}

impl HttpGateway {
    /// Create a new HttpGateway
    pub fn new(url: &str, client: Client, options: ClientOptions) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            client,
            options,
        }
    }

    fn get_url(&self, path: &str) -> String {
        format!("{}/api{}", self.url, path)
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        self.get_url(&format!("/{}", kind.path()))
    }

    fn resource_url(&self, kind: EntityKind, id: &str) -> String {
        self.get_url(&format!("/{}/{}", kind.path(), id))
    }

    fn prepare<'a>(&self, builder: FetchBuilder<'a>) -> FetchBuilder<'a> {
        builder
            .header("X-Client-Info", &self.options.client_info)
            .timeout(self.options.request_timeout)
    }

    /// Fetch a single vehicle by id
    pub async fn get_vehicle(&self, id: &str) -> Result<Vehicle, Error> {
        let url = self.resource_url(EntityKind::Vehicle, id);
        self.prepare(Fetch::get(&self.client, &url))
            .execute::<Vehicle>()
            .await
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn is_initialized(&self) -> Result<bool, Error> {
        let url = self.get_url("/init");
        let status = self
            .prepare(Fetch::get(&self.client, &url))
            .execute::<InitStatus>()
            .await?;
        Ok(status.initialized)
    }

    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, Error> {
        let url = self.collection_url(kind);
        let envelope = self
            .prepare(Fetch::get(&self.client, &url))
            .execute::<ListEnvelope>()
            .await?;
        tracing::debug!(%kind, rows = envelope.data.len(), "listed collection");
        Ok(envelope.data)
    }

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Created, Error> {
        let url = self.collection_url(kind);
        let created = self
            .prepare(Fetch::post(&self.client, &url))
            .json(&body)?
            .execute::<Created>()
            .await?;
        tracing::info!(%kind, id = %created.id, "created entity");
        Ok(created)
    }

    async fn update(&self, kind: EntityKind, id: &str, body: Value) -> Result<(), Error> {
        let url = self.resource_url(kind, id);
        self.prepare(Fetch::put(&self.client, &url))
            .json(&body)?
            .execute_checked()
            .await?;
        tracing::info!(%kind, %id, "updated entity");
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), Error> {
        let url = self.resource_url(kind, id);
        self.prepare(Fetch::delete(&self.client, &url))
            .execute_checked()
            .await?;
        tracing::info!(%kind, %id, "deleted entity");
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<SettingsPatch, Error> {
        let url = self.get_url("/settings");
        let envelope = self
            .prepare(Fetch::get(&self.client, &url))
            .execute::<SettingsEnvelope>()
            .await?;
        match envelope.data {
            Some(data) => SettingsPatch::from_gateway(data),
            None => Ok(SettingsPatch::default()),
        }
    }

    async fn save_settings(&self, patch: &SettingsPatch) -> Result<(), Error> {
        let url = self.get_url("/settings");
        self.prepare(Fetch::post(&self.client, &url))
            .json(patch)?
            .execute_checked()
            .await?;
        tracing::info!(keys = ?patch.keys(), "saved settings");
        Ok(())
    }
}
