//! Site settings singleton and its typed partial

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Error;
use crate::theme::parse_hex_color;

/// Site theme selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Modern,
    Classic,
    Bold,
    #[default]
    RedBlack,
    Custom,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Modern,
        Theme::Classic,
        Theme::Bold,
        Theme::RedBlack,
        Theme::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Modern => "modern",
            Theme::Classic => "classic",
            Theme::Bold => "bold",
            Theme::RedBlack => "red-black",
            Theme::Custom => "custom",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Unknown theme: {}", s)))
    }
}

/// Palette used by the `custom` theme, as hex colours
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl ThemeColors {
    pub fn new(primary: &str, secondary: &str, accent: &str, background: &str, text: &str) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
            text: text.to_string(),
        }
    }

    /// Every colour must be `#rgb` or `#rrggbb`
    pub fn validate(&self) -> Result<(), Error> {
        let named = [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("background", &self.background),
            ("text", &self.text),
        ];
        for (name, value) in named {
            if parse_hex_color(value).is_none() {
                return Err(Error::validation(format!(
                    "Invalid {} colour: {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Home page layout selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HomeLayout {
    #[default]
    Layout1,
    Layout2,
    Layout3,
}

/// The settings singleton
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub dealership_name: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub address: String,
    pub rental_enabled: bool,
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<ThemeColors>,
    pub home_layout: HomeLayout,
    pub business_hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dealership_name: "Combe's Car Center".to_string(),
            contact_email: "combecarcenternv@gmail.com".to_string(),
            contact_phone: "(597) 520-385".to_string(),
            address: "Grote Combeweg, Paramaribo, Suriname".to_string(),
            rental_enabled: true,
            theme: Theme::RedBlack,
            custom_colors: None,
            home_layout: HomeLayout::Layout1,
            business_hours:
                "Mon-Fri: 8:00 AM - 4:30 PM, Saturday: 8:00 AM - 4:30 PM, Sunday: Closed"
                    .to_string(),
            logo: None,
        }
    }
}

impl Settings {
    /// Merge a partial into the singleton; absent fields are untouched
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(value) = &patch.dealership_name {
            self.dealership_name = value.clone();
        }
        if let Some(value) = &patch.contact_email {
            self.contact_email = value.clone();
        }
        if let Some(value) = &patch.contact_phone {
            self.contact_phone = value.clone();
        }
        if let Some(value) = &patch.address {
            self.address = value.clone();
        }
        if let Some(value) = patch.rental_enabled {
            self.rental_enabled = value;
        }
        if let Some(value) = patch.theme {
            self.theme = value;
        }
        if let Some(value) = &patch.custom_colors {
            self.custom_colors = Some(value.clone());
        }
        if let Some(value) = patch.home_layout {
            self.home_layout = value;
        }
        if let Some(value) = &patch.business_hours {
            self.business_hours = value.clone();
        }
        if let Some(value) = &patch.logo {
            self.logo = Some(value.clone());
        }
    }

    /// A patch carrying every field, used for first-run setup
    pub fn to_patch(&self) -> SettingsPatch {
        SettingsPatch {
            dealership_name: Some(self.dealership_name.clone()),
            contact_email: Some(self.contact_email.clone()),
            contact_phone: Some(self.contact_phone.clone()),
            address: Some(self.address.clone()),
            rental_enabled: Some(self.rental_enabled),
            theme: Some(self.theme),
            custom_colors: self.custom_colors.clone(),
            home_layout: Some(self.home_layout),
            business_hours: Some(self.business_hours.clone()),
            logo: self.logo.clone(),
        }
    }
}

/// Encode an uploaded logo the way the settings panel stores it
pub fn logo_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

/// Every settings field, with its wire (camelCase) and storage (snake_case) names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKey {
    DealershipName,
    ContactEmail,
    ContactPhone,
    Address,
    RentalEnabled,
    Theme,
    CustomColors,
    HomeLayout,
    BusinessHours,
    Logo,
}

impl SettingKey {
    pub const ALL: [SettingKey; 10] = [
        SettingKey::DealershipName,
        SettingKey::ContactEmail,
        SettingKey::ContactPhone,
        SettingKey::Address,
        SettingKey::RentalEnabled,
        SettingKey::Theme,
        SettingKey::CustomColors,
        SettingKey::HomeLayout,
        SettingKey::BusinessHours,
        SettingKey::Logo,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            SettingKey::DealershipName => "dealershipName",
            SettingKey::ContactEmail => "contactEmail",
            SettingKey::ContactPhone => "contactPhone",
            SettingKey::Address => "address",
            SettingKey::RentalEnabled => "rentalEnabled",
            SettingKey::Theme => "theme",
            SettingKey::CustomColors => "customColors",
            SettingKey::HomeLayout => "homeLayout",
            SettingKey::BusinessHours => "businessHours",
            SettingKey::Logo => "logo",
        }
    }

    pub fn storage_key(&self) -> &'static str {
        match self {
            SettingKey::DealershipName => "dealership_name",
            SettingKey::ContactEmail => "contact_email",
            SettingKey::ContactPhone => "contact_phone",
            SettingKey::Address => "address",
            SettingKey::RentalEnabled => "rental_enabled",
            SettingKey::Theme => "theme",
            SettingKey::CustomColors => "custom_colors",
            SettingKey::HomeLayout => "home_layout",
            SettingKey::BusinessHours => "business_hours",
            SettingKey::Logo => "logo",
        }
    }

    /// Look a key up by either of its names
    pub fn from_name(name: &str) -> Option<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.wire_name() == name || key.storage_key() == name)
    }
}

/// A typed partial settings object; `None` means "leave unchanged"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dealership_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rental_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_colors: Option<ThemeColors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_layout: Option<HomeLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn custom_colors(mut self, colors: ThemeColors) -> Self {
        self.custom_colors = Some(colors);
        self
    }

    pub fn rental_enabled(mut self, value: bool) -> Self {
        self.rental_enabled = Some(value);
        self
    }

    pub fn dealership_name(mut self, value: &str) -> Self {
        self.dealership_name = Some(value.to_string());
        self
    }

    pub fn home_layout(mut self, value: HomeLayout) -> Self {
        self.home_layout = Some(value);
        self
    }

    pub fn logo(mut self, value: String) -> Self {
        self.logo = Some(value);
        self
    }

    /// Keys carried by this patch
    pub fn keys(&self) -> Vec<SettingKey> {
        SettingKey::ALL
            .into_iter()
            .filter(|key| match key {
                SettingKey::DealershipName => self.dealership_name.is_some(),
                SettingKey::ContactEmail => self.contact_email.is_some(),
                SettingKey::ContactPhone => self.contact_phone.is_some(),
                SettingKey::Address => self.address.is_some(),
                SettingKey::RentalEnabled => self.rental_enabled.is_some(),
                SettingKey::Theme => self.theme.is_some(),
                SettingKey::CustomColors => self.custom_colors.is_some(),
                SettingKey::HomeLayout => self.home_layout.is_some(),
                SettingKey::BusinessHours => self.business_hours.is_some(),
                SettingKey::Logo => self.logo.is_some(),
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }

    /// Set one field from a raw JSON value.
    ///
    /// Booleans may arrive as `"true"`/`"false"` and the palette as a JSON string,
    /// which is how the gateway stores them.
    pub fn set(&mut self, key: SettingKey, value: Value) -> Result<(), Error> {
        match key {
            SettingKey::DealershipName => self.dealership_name = Some(serde_json::from_value(value)?),
            SettingKey::ContactEmail => self.contact_email = Some(serde_json::from_value(value)?),
            SettingKey::ContactPhone => self.contact_phone = Some(serde_json::from_value(value)?),
            SettingKey::Address => self.address = Some(serde_json::from_value(value)?),
            SettingKey::RentalEnabled => self.rental_enabled = Some(coerce_bool(value)?),
            SettingKey::Theme => self.theme = Some(serde_json::from_value(value)?),
            SettingKey::CustomColors => {
                let value = match value {
                    Value::String(raw) => serde_json::from_str(&raw)?,
                    other => other,
                };
                self.custom_colors = Some(serde_json::from_value(value)?);
            }
            SettingKey::HomeLayout => self.home_layout = Some(serde_json::from_value(value)?),
            SettingKey::BusinessHours => self.business_hours = Some(serde_json::from_value(value)?),
            SettingKey::Logo => self.logo = Some(serde_json::from_value(value)?),
        }
        Ok(())
    }

    /// Build a patch from the gateway's settings object.
    ///
    /// Unknown keys, nulls and values of the wrong type are logged and dropped.
    pub fn from_gateway(value: Value) -> Result<Self, Error> {
        let Value::Object(entries) = value else {
            return Err(Error::validation("Settings payload must be a JSON object"));
        };

        let mut patch = SettingsPatch::default();
        for (name, value) in entries {
            if value.is_null() {
                continue;
            }
            let Some(key) = SettingKey::from_name(&name) else {
                tracing::warn!(key = %name, "ignoring unknown setting");
                continue;
            };
            if let Err(e) = patch.set(key, value) {
                tracing::warn!(key = key.wire_name(), error = %e, "ignoring malformed setting");
            }
        }
        Ok(patch)
    }
}

fn coerce_bool(value: Value) -> Result<bool, Error> {
    match value {
        Value::Bool(flag) => Ok(flag),
        Value::String(raw) if raw == "true" => Ok(true),
        Value::String(raw) if raw == "false" => Ok(false),
        other => Err(Error::validation(format!("Expected a boolean, got {}", other))),
    }
}
