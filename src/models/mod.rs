pub mod booking;
pub mod event;

pub use booking::{Booking, NewBooking, PaymentDetails};
pub use event::{Event, EventDraft};

use serde::Deserialize;

// Конверт всех ответов API: { success, data, message }
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}
