//! Customer bookings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A showroom meeting or a rental reservation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Meeting,
    Rental,
}

/// Booking status, changed only by the admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// What the customer-facing form submits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    #[serde(rename = "type")]
    pub kind: BookingKind,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub booking_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::optional_string_or_number"
    )]
    pub car_id: Option<String>,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingDraft {
    pub fn meeting(customer_name: &str, customer_email: &str, booking_date: NaiveDate) -> Self {
        Self {
            kind: BookingKind::Meeting,
            customer_name: customer_name.to_string(),
            customer_email: customer_email.to_string(),
            customer_phone: None,
            booking_date,
            booking_time: None,
            purpose: None,
            car_id: None,
            status: BookingStatus::Pending,
            notes: None,
        }
    }

    pub fn rental(
        customer_name: &str,
        customer_email: &str,
        booking_date: NaiveDate,
        car_id: &str,
    ) -> Self {
        Self {
            kind: BookingKind::Rental,
            car_id: Some(car_id.to_string()),
            ..Self::meeting(customer_name, customer_email, booking_date)
        }
    }

    /// Field-level checks; vehicle references are checked against the store
    pub fn validate(&self) -> Result<(), String> {
        if self.customer_name.trim().is_empty() {
            return Err("Customer name is required".to_string());
        }
        let email = self.customer_email.trim();
        if email.is_empty() {
            return Err("Customer email is required".to_string());
        }
        if !email.contains('@') {
            return Err(format!("Invalid email address: {}", email));
        }
        if self.kind == BookingKind::Rental && self.car_id.is_none() {
            return Err("Rental bookings must reference a vehicle".to_string());
        }
        Ok(())
    }
}

/// A booking as mirrored from the gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(deserialize_with = "super::string_or_number")]
    pub id: String,
    #[serde(flatten)]
    pub details: BookingDraft,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub created_at: String,
}

impl Booking {
    pub fn status(&self) -> BookingStatus {
        self.details.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gateway_row_deserializes() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "3",
            "type": "rental",
            "customerName": "Ana",
            "customerEmail": "ana@example.com",
            "customerPhone": null,
            "bookingDate": "2024-06-01",
            "bookingTime": "10:00:00",
            "purpose": null,
            "carId": "12",
            "status": "confirmed",
            "notes": null,
            "createdAt": "2024-05-20 09:00:00+00"
        }))
        .unwrap();

        assert_eq!(booking.id, "3");
        assert_eq!(booking.details.kind, BookingKind::Rental);
        assert_eq!(booking.details.car_id.as_deref(), Some("12"));
        assert_eq!(booking.status(), BookingStatus::Confirmed);
        assert_eq!(booking.details.booking_date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn new_bookings_are_pending() {
        let draft: BookingDraft = serde_json::from_value(json!({
            "type": "meeting",
            "customerName": "Bo",
            "customerEmail": "bo@example.com",
            "bookingDate": "2024-06-02"
        }))
        .unwrap();
        assert_eq!(draft.status, BookingStatus::Pending);
    }

    #[test]
    fn rental_without_vehicle_is_rejected() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut draft = BookingDraft::rental("Ana", "ana@example.com", date, "1");
        assert!(draft.validate().is_ok());
        draft.car_id = None;
        assert!(draft.validate().is_err());

        let meeting = BookingDraft::meeting("Ana", "not-an-email", date);
        assert!(meeting.validate().is_err());
    }
}
