use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "EventRecord")]
pub struct Event {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub venue: Option<String>,
    pub price_per_seat: f64,
    pub total_seats: Option<u32>,
    pub available_seats: Option<u32>,
    pub bookings: Option<u32>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub organizer: Option<String>,
    pub status: Option<String>,
}

// Событие как его отдает API: у части полей два написания,
// и сервер может прислать оба сразу
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventRecord {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
    title: String,
    description: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    venue: Option<String>,
    price_per_seat: Option<f64>,
    price: Option<f64>,
    total_seats: Option<u32>,
    capacity: Option<u32>,
    available_seats: Option<u32>,
    bookings: Option<u32>,
    category: Option<String>,
    image: Option<String>,
    image_url: Option<String>,
    organizer: Option<String>,
    status: Option<String>,
}

impl TryFrom<EventRecord> for Event {
    type Error = String;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let id = record
            .mongo_id
            .or(record.id)
            .ok_or_else(|| "event without _id".to_string())?;

        Ok(Event {
            id,
            title: record.title,
            description: record.description,
            date: record.date,
            time: record.time,
            location: record.location,
            venue: record.venue,
            price_per_seat: record.price_per_seat.or(record.price).unwrap_or_default(),
            total_seats: record.total_seats.or(record.capacity),
            available_seats: record.available_seats,
            bookings: record.bookings,
            category: record.category,
            image: record.image.or(record.image_url),
            organizer: record.organizer,
            status: record.status,
        })
    }
}

impl Event {
    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

/// Тело запроса на создание/изменение события.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub venue: String,
    pub price: f64,
    pub capacity: u32,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub organizer: String,
}
