//! The remote data gateway: the HTTP boundary that owns persistence

mod http;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;
use crate::models::SettingsPatch;

pub use http::HttpGateway;

/// Collections the gateway exposes CRUD endpoints for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Vehicle,
    Booking,
    Faq,
}

impl EntityKind {
    /// Path segment under `/api`
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Vehicle => "cars",
            EntityKind::Booking => "bookings",
            EntityKind::Faq => "faqs",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EntityKind::Vehicle => "vehicle",
            EntityKind::Booking => "booking",
            EntityKind::Faq => "FAQ",
        };
        f.write_str(name)
    }
}

/// Answer to a create request
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Created {
    #[serde(deserialize_with = "crate::models::string_or_number")]
    pub id: String,
    /// Final primary image after staged uploads were moved
    #[serde(default)]
    pub image: Option<String>,
    /// Final image list after staged uploads were moved
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl Created {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: None,
            images: None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    #[serde(default)]
    pub data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InitStatus {
    pub initialized: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SettingsEnvelope {
    #[serde(default)]
    pub data: Option<Value>,
}

/// Operations the client data store needs from the gateway.
///
/// Bodies and rows travel as JSON values; the store owns the typed view.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Whether the backing store has been set up
    async fn is_initialized(&self) -> Result<bool, Error>;

    /// Every row of a collection
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>, Error>;

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Created, Error>;

    async fn update(&self, kind: EntityKind, id: &str, body: Value) -> Result<(), Error>;

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), Error>;

    async fn fetch_settings(&self) -> Result<SettingsPatch, Error>;

    async fn save_settings(&self, patch: &SettingsPatch) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_accepts_numeric_ids_and_final_images() {
        let created: Created = serde_json::from_value(json!({
            "success": true,
            "id": 42,
            "image": "/cars/42/a.jpg",
            "images": ["/cars/42/a.jpg"]
        }))
        .unwrap();
        assert_eq!(created.id, "42");
        assert_eq!(created.images.unwrap().len(), 1);

        let bare: Created = serde_json::from_value(json!({ "success": true, "id": "9" })).unwrap();
        assert_eq!(bare, Created::new("9"));
    }

    #[test]
    fn list_envelope_tolerates_missing_data() {
        let envelope: ListEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.data.is_empty());
    }
}
