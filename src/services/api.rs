//! api.rs
//!
//! Клиент удаленного REST API TicketHub (события и бронирования).
//!
//! Все ответы приходят в конверте `{ success, data, message }`. Повторов,
//! бэкоффа и дедупликации запросов нет: ошибка сети сразу уходит наверх,
//! страница показывает общее сообщение.

use reqwest::{Method, StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::ApiConfig;
use crate::models::{ApiEnvelope, Booking, Event, EventDraft, NewBooking};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Сервер недоступен, таймаут, обрыв соединения.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("not found")]
    NotFound,
    /// Сервер ответил `success: false`.
    #[error("rejected by server: {message}")]
    Rejected { message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("invalid API url: {0}")]
    BadUrl(String),
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Decode("response has no data".to_string())),
            (false, _) => Err(ApiError::Rejected {
                message: self.message.unwrap_or_else(|| "Unknown error".to_string()),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: Url,
    http_client: reqwest::Client,
}

/// id из пути страницы должен быть одним сегментом URL API.
fn is_plain_segment(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains(['/', '\\'])
}

impl ApiClient {
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::BadUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::BadUrl(config.base_url.clone()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { base_url, http_client })
    }

    // base_url + сегменты; каждый сегмент экранируется отдельно
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::BadUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn event_endpoint(&self, id: &str) -> Result<Url, ApiError> {
        if !is_plain_segment(id) {
            debug!(event_id = %id, "Rejected event id");
            return Err(ApiError::NotFound);
        }
        self.endpoint(&["api", "events", id])
    }

    // GET /api/events
    pub async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let url = self.endpoint(&["api", "events"])?;
        let events: Vec<Event> = self.call(Method::GET, url, None::<&()>).await?;
        debug!(count = events.len(), "Fetched events");
        Ok(events)
    }

    // GET /api/events/:id
    pub async fn get_event(&self, id: &str) -> Result<Event, ApiError> {
        let url = self.event_endpoint(id)?;
        self.call(Method::GET, url, None::<&()>)
            .await
            .map_err(|e| match e {
                // сервер отвечает success:false, если события нет
                ApiError::Rejected { .. } => ApiError::NotFound,
                other => other,
            })
    }

    // POST /api/bookings
    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        let url = self.endpoint(&["api", "bookings"])?;
        let created: Booking = self.call(Method::POST, url, Some(booking)).await?;
        info!(
            event_id = %booking.event_id,
            seats = booking.number_of_seats,
            reference = created.reference(),
            "Booking created"
        );
        Ok(created)
    }

    // POST /api/events
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        let url = self.endpoint(&["api", "events"])?;
        let created: Event = self.call(Method::POST, url, Some(draft)).await?;
        info!(event_id = %created.id, title = %created.title, "Event created");
        Ok(created)
    }

    // PUT /api/events/:id
    pub async fn update_event(&self, id: &str, draft: &EventDraft) -> Result<Event, ApiError> {
        let url = self.event_endpoint(id)?;
        let updated: Event = self.call(Method::PUT, url, Some(draft)).await?;
        info!(event_id = %id, "Event updated");
        Ok(updated)
    }

    // DELETE /api/events/:id
    pub async fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        let url = self.event_endpoint(id)?;
        let _: serde_json::Value = self
            .call(Method::DELETE, url, None::<&()>)
            .await
            .or_else(|e| match e {
                // тело удаления может быть пустым
                ApiError::Decode(_) => Ok(serde_json::Value::Null),
                other => Err(other),
            })?;
        info!(event_id = %id, "Event deleted");
        Ok(())
    }

    async fn call<B, T>(&self, method: Method, url: Url, body: Option<&B>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http_client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!("{} {} failed: {:?}", method, url, e);
            ApiError::Network(e)
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }

        let text = response.text().await?;
        let envelope: ApiEnvelope<T> = serde_json::from_str(&text).map_err(|e| {
            error!("{} {} returned {} with unreadable body: {}", method, url, status, e);
            ApiError::Decode(e.to_string())
        })?;
        envelope.into_result()
    }
}
