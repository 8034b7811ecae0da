//! Client data store: a typed local mirror of the gateway's collections
//!
//! Every mutation goes to the gateway first. Local state changes only after
//! the gateway confirms, so a failed call leaves the store exactly as it was.

mod entity;
mod selectors;

pub use entity::{Draft, Entity};
pub use selectors::{SearchFilters, SearchOptions};

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Error;
use crate::gateway::{EntityKind, Gateway};
use crate::models::{Booking, BookingStatus, Faq, Settings, SettingsPatch, Theme, Vehicle};

/// Everything the presentation layer reads
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub vehicles: Vec<Vehicle>,
    pub bookings: Vec<Booking>,
    pub faqs: Vec<Faq>,
    pub settings: Settings,
    /// True while a hydrate is in flight
    pub loading: bool,
    /// Whether the gateway reported an initialized backing store
    pub initialized: bool,
}

/// Result of [`Store::hydrate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrateOutcome {
    Loaded,
    /// The gateway has not been set up yet; the store holds defaults
    NotInitialized,
    /// A fetch failed; the store fell back to defaults
    Failed(String),
}

/// Shared handle to the store; clones see the same state
#[derive(Clone)]
pub struct Store {
    gateway: Arc<dyn Gateway>,
    state: Arc<RwLock<StoreState>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// An empty store holding default settings
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self {
            gateway,
            state: Arc::new(RwLock::new(StoreState::default())),
        }
    }

    /// Replace local state with the gateway's collections.
    ///
    /// Never fails: any error is logged and the store falls back to defaults.
    pub async fn hydrate(&self) -> HydrateOutcome {
        self.state.write().await.loading = true;

        let fetched = self.fetch_all().await;
        let mut state = self.state.write().await;
        let outcome = match fetched {
            Ok(Some(loaded)) => {
                tracing::info!(
                    vehicles = loaded.vehicles.len(),
                    bookings = loaded.bookings.len(),
                    faqs = loaded.faqs.len(),
                    "store hydrated"
                );
                *state = loaded;
                HydrateOutcome::Loaded
            }
            Ok(None) => {
                tracing::info!("gateway is not initialized, using defaults");
                *state = StoreState::default();
                HydrateOutcome::NotInitialized
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load data, using defaults");
                *state = StoreState::default();
                HydrateOutcome::Failed(e.user_message())
            }
        };
        state.loading = false;
        outcome
    }

    async fn fetch_all(&self) -> Result<Option<StoreState>, Error> {
        if !self.gateway.is_initialized().await? {
            return Ok(None);
        }

        let gateway = &self.gateway;
        let (vehicles, bookings, faqs, patch) = tokio::try_join!(
            gateway.list(EntityKind::Vehicle),
            gateway.list(EntityKind::Booking),
            gateway.list(EntityKind::Faq),
            gateway.fetch_settings(),
        )?;

        let mut settings = Settings::default();
        settings.apply(&patch);

        Ok(Some(StoreState {
            vehicles: decode_rows(EntityKind::Vehicle, vehicles),
            bookings: decode_rows(EntityKind::Booking, bookings),
            faqs: decode_rows(EntityKind::Faq, faqs),
            settings,
            loading: false,
            initialized: true,
        }))
    }

    /// Create an entity; appended locally with the gateway-assigned id
    pub async fn add<D: Draft>(&self, mut draft: D) -> Result<D::Entity, Error> {
        draft.prepare();
        draft.check(&*self.state.read().await)?;

        let body = serde_json::to_value(&draft)?;
        let created = self.gateway.create(D::Entity::KIND, body).await?;
        let entity = draft.into_entity(created);

        let mut state = self.state.write().await;
        D::Entity::collection_mut(&mut state).push(entity.clone());
        Ok(entity)
    }

    /// Replace an entity by id once the gateway accepts the update
    pub async fn update<E: Entity>(&self, mut entity: E) -> Result<(), Error> {
        entity.prepare();
        entity.check(&*self.state.read().await)?;

        let body = serde_json::to_value(&entity)?;
        self.gateway.update(E::KIND, entity.id(), body).await?;

        let mut state = self.state.write().await;
        if let Some(slot) = E::collection_mut(&mut state)
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
        {
            *slot = entity;
        }
        Ok(())
    }

    /// Delete by id; an id that is not mirrored locally is fine
    pub async fn delete<E: Entity>(&self, id: &str) -> Result<(), Error> {
        self.gateway.delete(E::KIND, id).await?;

        let mut state = self.state.write().await;
        E::collection_mut(&mut state).retain(|existing| existing.id() != id);
        Ok(())
    }

    /// Merge a partial settings object, locally and through the gateway
    pub async fn update_settings(&self, patch: SettingsPatch) -> Result<(), Error> {
        if patch.is_empty() {
            return Ok(());
        }
        if let Some(colors) = &patch.custom_colors {
            colors.validate()?;
        }
        if patch.theme == Some(Theme::Custom) {
            let has_palette = patch.custom_colors.is_some()
                || self.state.read().await.settings.custom_colors.is_some();
            if !has_palette {
                return Err(Error::validation("The custom theme requires a colour palette"));
            }
        }

        self.gateway.save_settings(&patch).await?;
        self.state.write().await.settings.apply(&patch);
        Ok(())
    }

    /// Flip a vehicle's in-stock flag, returning the new value
    pub async fn toggle_in_stock(&self, id: &str) -> Result<bool, Error> {
        let mut vehicle = self.require_vehicle(id).await?;
        vehicle.details.in_stock = !vehicle.details.in_stock;
        let value = vehicle.details.in_stock;
        self.update(vehicle).await?;
        Ok(value)
    }

    /// Flip a vehicle's hot deal flag, returning the new value
    pub async fn toggle_hot_deal(&self, id: &str) -> Result<bool, Error> {
        let mut vehicle = self.require_vehicle(id).await?;
        vehicle.details.selling = !vehicle.details.selling;
        let value = vehicle.details.selling;
        self.update(vehicle).await?;
        Ok(value)
    }

    pub async fn set_booking_status(&self, id: &str, status: BookingStatus) -> Result<(), Error> {
        let mut booking = self
            .read(|state| state.bookings.iter().find(|b| b.id == id).cloned())
            .await
            .ok_or_else(|| Error::validation(format!("Booking not found: {}", id)))?;
        booking.details.status = status;
        self.update(booking).await
    }

    async fn require_vehicle(&self, id: &str) -> Result<Vehicle, Error> {
        self.read(|state| state.find_vehicle(id).cloned())
            .await
            .ok_or_else(|| Error::validation(format!("Vehicle not found: {}", id)))
    }

    /// Run a closure against the current state
    pub async fn read<R>(&self, f: impl FnOnce(&StoreState) -> R) -> R {
        f(&*self.state.read().await)
    }

    /// A copy of the whole state
    pub async fn snapshot(&self) -> StoreState {
        self.state.read().await.clone()
    }

    pub async fn vehicles(&self) -> Vec<Vehicle> {
        self.read(|state| state.vehicles.clone()).await
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.read(|state| state.bookings.clone()).await
    }

    pub async fn settings(&self) -> Settings {
        self.read(|state| state.settings.clone()).await
    }

    pub async fn find_vehicle(&self, id: &str) -> Option<Vehicle> {
        self.read(|state| state.find_vehicle(id).cloned()).await
    }

    pub async fn visible_faqs(&self) -> Vec<Faq> {
        self.read(|state| state.visible_faqs().into_iter().cloned().collect())
            .await
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.read().await.initialized
    }
}

/// Rows that do not match the model are logged and skipped
fn decode_rows<T: DeserializeOwned>(kind: EntityKind, rows: Vec<Value>) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(%kind, error = %e, "skipping malformed row");
                None
            }
        })
        .collect()
}
