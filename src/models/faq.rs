//! Frequently asked questions

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub display_order: i32,
    #[serde(default = "default_active", deserialize_with = "super::null_as_true")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl FaqDraft {
    pub fn new(question: &str, answer: &str, display_order: i32) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            display_order,
            active: true,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.question.trim().is_empty() {
            return Err("Question is required".to_string());
        }
        if self.answer.trim().is_empty() {
            return Err("Answer is required".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub details: FaqDraft,
    /// Only used to break display order ties
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Active FAQs by display order.
///
/// Ties go to the more recently created entry, then to collection order.
/// Entries without a creation time sort after timed ones.
pub fn visible_faqs(faqs: &[Faq]) -> Vec<&Faq> {
    let mut visible: Vec<&Faq> = faqs.iter().filter(|faq| faq.details.active).collect();
    visible.sort_by(|a, b| {
        a.details.display_order.cmp(&b.details.display_order).then_with(|| {
            match (&a.created_at, &b.created_at) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
    });
    visible
}
