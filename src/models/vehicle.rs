//! Vehicle listings

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a listing is offered for sale or for rent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    #[default]
    Sale,
    Rental,
}

/// Feature lists grouped the way the listing page shows them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleFeatures {
    #[serde(deserialize_with = "super::null_as_default")]
    pub interior: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub exterior: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub comfort: Vec<String>,
    #[serde(deserialize_with = "super::null_as_default")]
    pub safety: Vec<String>,
}

impl VehicleFeatures {
    pub fn is_empty(&self) -> bool {
        self.interior.is_empty()
            && self.exterior.is_empty()
            && self.comfort.is_empty()
            && self.safety.is_empty()
    }
}

/// Everything about a vehicle except the gateway-assigned identifier.
///
/// This is also the body sent when creating a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: Decimal,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub mileage: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub fuel: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub seats: u32,
    #[serde(default = "default_true", deserialize_with = "super::null_as_true")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub featured: bool,
    /// Listed under hot deals
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub selling: bool,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub image: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cylinders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drive_type: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub features: VehicleFeatures,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub payment_options: Vec<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub warranty: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl VehicleDraft {
    /// A minimal listing; everything else takes the admin form's defaults.
    pub fn new(make: &str, model: &str, year: i32, price: Decimal, kind: ListingKind) -> Self {
        Self {
            make: make.to_string(),
            model: model.to_string(),
            year,
            price,
            kind,
            mileage: String::new(),
            fuel: "Gasoline".to_string(),
            seats: 5,
            in_stock: true,
            featured: false,
            selling: false,
            image: String::new(),
            images: Vec::new(),
            description: String::new(),
            daily_rate: None,
            weekly_rate: None,
            monthly_rate: None,
            available: None,
            body_type: None,
            condition: None,
            engine_size: None,
            doors: None,
            cylinders: None,
            color: None,
            vin: None,
            transmission: None,
            drive_type: None,
            features: VehicleFeatures::default(),
            payment_options: Vec::new(),
            warranty: Vec::new(),
        }
    }

    /// Set the ordered image list; the first entry becomes the primary image
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self.normalize_images();
        self
    }

    /// Set the rental rates
    pub fn with_rates(
        mut self,
        daily: Option<Decimal>,
        weekly: Option<Decimal>,
        monthly: Option<Decimal>,
    ) -> Self {
        self.daily_rate = daily;
        self.weekly_rate = weekly;
        self.monthly_rate = monthly;
        self
    }

    /// Keep `image` equal to `images[0]` whenever any image exists
    pub fn normalize_images(&mut self) {
        if let Some(first) = self.images.first() {
            if self.image != *first {
                self.image = first.clone();
            }
        }
    }

    /// `available` is true unless explicitly set to false
    pub fn is_available(&self) -> bool {
        self.available != Some(false)
    }

    /// Out-of-stock sale vehicles and unavailable vehicles cannot be booked
    pub fn is_bookable(&self) -> bool {
        if !self.is_available() {
            return false;
        }
        !(self.kind == ListingKind::Sale && !self.in_stock)
    }

    /// Checks made before anything is sent to the gateway
    pub fn validate(&self) -> Result<(), String> {
        if self.make.trim().is_empty() {
            return Err("Make is required".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("Model is required".to_string());
        }
        if self.year <= 0 {
            return Err(format!("Invalid year: {}", self.year));
        }
        if self.price.is_sign_negative() {
            return Err("Price cannot be negative".to_string());
        }
        let rates = [self.daily_rate, self.weekly_rate, self.monthly_rate];
        if rates.iter().flatten().any(|rate| rate.is_sign_negative()) {
            return Err("Rental rates cannot be negative".to_string());
        }
        Ok(())
    }
}

/// A vehicle listing as mirrored from the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub details: VehicleDraft,
}

impl Vehicle {
    pub fn new(id: impl Into<String>, details: VehicleDraft) -> Self {
        Self {
            id: id.into(),
            details,
        }
    }

    /// `images[0]` when there are images, otherwise the stored primary image
    pub fn primary_image(&self) -> Option<&str> {
        self.details
            .images
            .first()
            .map(String::as_str)
            .or_else(|| Some(self.details.image.as_str()).filter(|image| !image.is_empty()))
    }

    pub fn is_bookable(&self) -> bool {
        self.details.is_bookable()
    }

    /// "2020 Toyota Corolla"
    pub fn title(&self) -> String {
        format!("{} {} {}", self.details.year, self.details.make, self.details.model)
    }
}
