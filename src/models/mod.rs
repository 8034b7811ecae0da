//! Entities mirrored from the dealership gateway

mod booking;
mod faq;
mod settings;
mod vehicle;

use serde::{Deserialize, Deserializer};

pub use booking::*;
pub use faq::*;
pub use settings::*;
pub use vehicle::*;

/// Identifiers arrive as text from list endpoints and as numbers from create endpoints
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

pub(crate) fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

/// Nullable gateway columns decode as the type's default instead of failing the row
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn null_as_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "optional_string_or_number")]
        other: Option<String>,
    }

    #[derive(Deserialize)]
    struct Nullable {
        #[serde(default, deserialize_with = "null_as_default")]
        label: String,
        #[serde(default, deserialize_with = "null_as_default")]
        count: u32,
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
        #[serde(default = "yes", deserialize_with = "null_as_true")]
        flag: bool,
    }

    fn yes() -> bool {
        true
    }

    #[test]
    fn ids_accept_text_and_numbers() {
        let text: Holder = serde_json::from_value(json!({ "id": "12" })).unwrap();
        assert_eq!(text.id, "12");
        assert_eq!(text.other, None);

        let number: Holder = serde_json::from_value(json!({ "id": 12, "other": 7 })).unwrap();
        assert_eq!(number.id, "12");
        assert_eq!(number.other.as_deref(), Some("7"));

        let null: Holder = serde_json::from_value(json!({ "id": 1, "other": null })).unwrap();
        assert_eq!(null.other, None);
    }

    #[test]
    fn null_columns_take_defaults() {
        let nulls: Nullable = serde_json::from_value(json!({
            "label": null,
            "count": null,
            "tags": null,
            "flag": null
        }))
        .unwrap();
        assert_eq!(nulls.label, "");
        assert_eq!(nulls.count, 0);
        assert!(nulls.tags.is_empty());
        assert!(nulls.flag);

        let missing: Nullable = serde_json::from_value(json!({})).unwrap();
        assert!(missing.flag);

        let set: Nullable = serde_json::from_value(json!({ "label": "x", "count": 2, "flag": false })).unwrap();
        assert_eq!(set.label, "x");
        assert_eq!(set.count, 2);
        assert!(!set.flag);
    }
}
