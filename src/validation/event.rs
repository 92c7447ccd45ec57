use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidateUrl, ValidationError};

use super::FieldErrors;
use crate::models::{Event, EventDraft};

/// Популярные города для быстрого выбора локации.
pub const POPULAR_LOCATIONS: [(&str, &str); 6] = [
    ("New York", "NY"),
    ("Los Angeles", "CA"),
    ("Chicago", "IL"),
    ("San Francisco", "CA"),
    ("Miami", "FL"),
    ("Austin", "TX"),
];

/// Форма создания/редактирования события в админке.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct EventForm {
    #[validate(custom(function = "required", message = "Title is required"))]
    pub title: String,
    pub description: String,
    #[validate(custom(function = "iso_date", message = "Date must be YYYY-MM-DD"))]
    pub date: String,
    #[validate(custom(function = "clock_time", message = "Time must be HH:MM"))]
    pub time: String,
    #[validate(custom(function = "required", message = "Location is required"))]
    pub location: String,
    #[validate(custom(function = "required", message = "Venue is required"))]
    pub venue: String,
    #[validate(custom(function = "price", message = "Price must be a number of at least 0"))]
    pub price: String,
    #[validate(custom(function = "required", message = "Category is required"))]
    pub category: String,
    #[validate(custom(function = "capacity", message = "Capacity must be a whole number of at least 1"))]
    pub capacity: String,
    #[validate(custom(function = "optional_url", message = "Image URL must be a valid URL"))]
    pub image_url: String,
    #[validate(custom(function = "required", message = "Organizer is required"))]
    pub organizer: String,
    /// Пикер времени: час 1..=12, минуты и AM/PM. Заполненный пикер перекрывает `time`.
    #[serde(skip_serializing)]
    pub hour: String,
    #[serde(skip_serializing)]
    pub minute: String,
    #[serde(skip_serializing)]
    pub period: String,
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

fn iso_date(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("date"))
}

fn clock_time(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map(|_| ())
        .map_err(|_| ValidationError::new("time"))
}

fn price(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p >= 0.0 => Ok(()),
        _ => Err(ValidationError::new("price")),
    }
}

fn capacity(value: &str) -> Result<(), ValidationError> {
    match value.trim().parse::<u32>() {
        Ok(c) if c >= 1 => Ok(()),
        _ => Err(ValidationError::new("capacity")),
    }
}

fn optional_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url"))
    }
}

impl EventForm {
    /// Заполнить форму из события (страница редактирования).
    pub fn from_event(event: &Event) -> Self {
        EventForm {
            title: event.title.clone(),
            description: event.description.clone().unwrap_or_default(),
            date: event.date.clone().unwrap_or_default(),
            time: event.time.clone().unwrap_or_default(),
            location: event.location.clone().unwrap_or_default(),
            venue: event.venue.clone().unwrap_or_default(),
            price: event.price_per_seat.to_string(),
            category: event.category.clone().unwrap_or_default(),
            capacity: event.total_seats.map(|c| c.to_string()).unwrap_or_default(),
            image_url: event.image.clone().unwrap_or_default(),
            organizer: event.organizer.clone().unwrap_or_default(),
            ..Default::default()
        }
    }

    /// Переносит выбор из пикера в `time` ("HH:MM").
    pub fn with_picked_time(mut self) -> Self {
        let hour = self.hour.trim().parse::<u32>();
        let minute = self.minute.trim().parse::<u32>();
        if let (Ok(hour @ 1..=12), Ok(minute @ 0..=59), Ok(period)) = (hour, minute, self.period.parse()) {
            self.time = to_24_hour(hour, minute, period);
        }
        self
    }

    pub fn check(&self) -> FieldErrors {
        match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => errors.into(),
        }
    }

    pub fn into_draft(self) -> Result<EventDraft, FieldErrors> {
        self.check().into_result(())?;

        let image_url = Some(self.image_url.trim().to_string()).filter(|url| !url.is_empty());
        Ok(EventDraft {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            date: self.date.trim().to_string(),
            time: self.time.trim().to_string(),
            location: self.location.trim().to_string(),
            venue: self.venue.trim().to_string(),
            price: self.price.trim().parse().unwrap_or_default(),
            capacity: self.capacity.trim().parse().unwrap_or_default(),
            category: self.category.trim().to_string(),
            image_url,
            organizer: self.organizer.trim().to_string(),
        })
    }

    fn fields(&self) -> [(&'static str, &str); 11] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("date", self.date.as_str()),
            ("time", self.time.as_str()),
            ("location", self.location.as_str()),
            ("venue", self.venue.as_str()),
            ("price", self.price.as_str()),
            ("category", self.category.as_str()),
            ("capacity", self.capacity.as_str()),
            ("imageUrl", self.image_url.as_str()),
            ("organizer", self.organizer.as_str()),
        ]
    }
}

/// Поля, которые админ поменял относительно исходного события.
pub fn changed_fields(original: &EventForm, edited: &EventForm) -> Vec<&'static str> {
    original
        .fields()
        .iter()
        .zip(edited.fields().iter())
        .filter(|((_, before), (_, after))| before != after)
        .map(|((name, _), _)| *name)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Am,
    Pm,
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Period::Am),
            "PM" => Ok(Period::Pm),
            other => Err(format!("unknown period: {other}")),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Am => f.write_str("AM"),
            Period::Pm => f.write_str("PM"),
        }
    }
}

/// 12-часовой формат пикера -> "HH:MM".
pub fn to_24_hour(hour: u32, minute: u32, period: Period) -> String {
    let hour = match (period, hour % 12) {
        (Period::Am, h) => h,
        (Period::Pm, h) => h + 12,
    };
    format!("{:02}:{:02}", hour, minute)
}

/// "HH:MM" -> (час 1..=12, минуты, AM/PM).
pub fn from_24_hour(time: &str) -> Option<(u32, u32, Period)> {
    use chrono::Timelike;

    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    let period = if parsed.hour() >= 12 { Period::Pm } else { Period::Am };
    let hour = match parsed.hour() % 12 {
        0 => 12,
        h => h,
    };
    Some((hour, parsed.minute(), period))
}
