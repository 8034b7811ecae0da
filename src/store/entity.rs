//! How each collection plugs into the store

use serde::{de::DeserializeOwned, Serialize};

use super::StoreState;
use crate::error::Error;
use crate::gateway::{Created, EntityKind};
use crate::models::{Booking, BookingDraft, BookingKind, Faq, FaqDraft, Vehicle, VehicleDraft};

/// A row type mirrored in one of the store's collections
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self>;

    /// Normalise before sending
    fn prepare(&mut self) {}

    /// Local preconditions checked before an update is sent
    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        Ok(())
    }
}

/// The body of a create request, turned into an entity once the gateway assigns an id
pub trait Draft: Serialize + Send + Sync + 'static {
    type Entity: Entity;

    fn prepare(&mut self) {}

    fn check(&self, state: &StoreState) -> Result<(), Error>;

    fn into_entity(self, created: Created) -> Self::Entity;
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl Entity for Vehicle {
    const KIND: EntityKind = EntityKind::Vehicle;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.vehicles
    }

    fn prepare(&mut self) {
        self.details.normalize_images();
    }

    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        self.details.validate().map_err(Error::validation)
    }
}

impl Draft for VehicleDraft {
    type Entity = Vehicle;

    fn prepare(&mut self) {
        self.normalize_images();
    }

    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        self.validate().map_err(Error::validation)
    }

    /// Staged uploads are moved on creation; adopt the final URLs when the gateway reports them
    fn into_entity(mut self, created: Created) -> Vehicle {
        if let Some(images) = created.images {
            self.images = images;
        }
        if let Some(image) = created.image {
            self.image = image;
        }
        self.normalize_images();
        Vehicle::new(created.id, self)
    }
}

impl Entity for Booking {
    const KIND: EntityKind = EntityKind::Booking;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.bookings
    }

    /// Contact details are only checked on creation; stored rows may predate those checks
    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        if self.details.kind == BookingKind::Rental && self.details.car_id.is_none() {
            return Err(Error::validation("Rental bookings must reference a vehicle"));
        }
        Ok(())
    }
}

impl Draft for BookingDraft {
    type Entity = Booking;

    fn check(&self, state: &StoreState) -> Result<(), Error> {
        self.validate().map_err(Error::validation)?;

        if let (BookingKind::Rental, Some(car_id)) = (self.kind, &self.car_id) {
            let vehicle = state
                .find_vehicle(car_id)
                .ok_or_else(|| Error::validation(format!("Vehicle not found: {}", car_id)))?;
            if !vehicle.is_bookable() {
                return Err(Error::validation(format!(
                    "{} is not available for booking",
                    vehicle.title()
                )));
            }
        }
        Ok(())
    }

    fn into_entity(self, created: Created) -> Booking {
        Booking {
            id: created.id,
            details: self,
            created_at: now(),
        }
    }
}

impl Entity for Faq {
    const KIND: EntityKind = EntityKind::Faq;

    fn id(&self) -> &str {
        &self.id
    }

    fn collection_mut(state: &mut StoreState) -> &mut Vec<Self> {
        &mut state.faqs
    }

    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        self.details.validate().map_err(Error::validation)
    }
}

impl Draft for FaqDraft {
    type Entity = Faq;

    fn check(&self, _state: &StoreState) -> Result<(), Error> {
        self.validate().map_err(Error::validation)
    }

    fn into_entity(self, created: Created) -> Faq {
        Faq {
            id: created.id,
            details: self,
            created_at: Some(now()),
        }
    }
}
