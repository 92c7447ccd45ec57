use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub card_last_four: String,
    pub card_name: String,
    pub payment_method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

// POST /api/bookings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub event_id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_seats: u32,
    pub price_per_seat: f64,
    pub total_amount: f64,
    pub payment_details: PaymentDetails,
    pub payment_status: String,
    pub booking_status: String,
}

/// Бронирование в том виде, в каком его вернул сервер.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub event_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_seats: u32,
    pub price_per_seat: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub payment_details: Option<PaymentDetails>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub booking_status: Option<String>,
    #[serde(default)]
    pub booking_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub booking_reference: Option<String>,
}

impl Booking {
    /// Референс брони, если сервер его не выдал - id.
    pub fn reference(&self) -> &str {
        self.booking_reference.as_deref().unwrap_or(&self.id)
    }
}
