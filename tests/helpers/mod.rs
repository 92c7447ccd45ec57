//! Общие хелперы для HTTP-тестов: конфиг, роутер и фейковый API.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use ticket_hub::config::{AdminConfig, ApiConfig, AppConfig, Config};
use ticket_hub::theme::Theme;
use ticket_hub::AppState;

pub fn test_config(base_url: &str) -> Config {
    Config {
        app: AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: "test".to_string(),
            rust_log: "ticket_hub=debug".to_string(),
            default_theme: Theme::Light,
            session_ttl_minutes: 60,
        },
        api: ApiConfig {
            base_url: base_url.to_string(),
            timeout_seconds: 2,
        },
        admin: AdminConfig {
            email: "admin@tickethub.com".to_string(),
            password: "admin123".to_string(),
        },
    }
}

pub fn test_state(base_url: &str) -> Arc<AppState> {
    AppState::new(test_config(base_url)).expect("state")
}

pub fn test_app(base_url: &str) -> Router {
    ticket_hub::app(test_state(base_url))
}

pub fn sample_events() -> Value {
    json!([
        {
            "_id": "evt-1",
            "title": "Summer Music Festival 2025",
            "date": "2025-07-15",
            "time": "18:30",
            "location": "Los Angeles, CA",
            "venue": "Hollywood Bowl",
            "pricePerSeat": 149.99,
            "totalSeats": 5000,
            "availableSeats": 4523,
            "bookings": 477,
            "category": "Festival",
            "organizer": "Live Nation",
            "status": "active"
        },
        {
            "_id": "evt-2",
            "title": "Tech Conference 2025",
            "date": "2025-08-20",
            "time": "09:00",
            "location": "San Francisco, CA",
            "venue": "Moscone Center",
            "pricePerSeat": 299.0,
            "bookings": 144,
            "category": "Conference",
            "status": "active"
        },
        {
            "_id": "evt-3",
            "title": "Jazz Night Live",
            "date": "2025-06-25",
            "time": "20:00",
            "location": "Chicago, IL",
            "venue": "Blue Note Jazz Club",
            "pricePerSeat": 65.0,
            "bookings": 88,
            "category": "Concert",
            "status": "draft"
        }
    ])
}

pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(app: &Router, uri: &str, fields: &[(&str, &str)], cookie: Option<&str>) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn has_session_cookie(response: &Response<Body>) -> bool {
    response.headers().contains_key(header::SET_COOKIE)
}

/// `tickethub_sid=<uuid>` из Set-Cookie.
pub fn session_cookie(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub fn is_redirect(response: &Response<Body>) -> bool {
    response.status() == StatusCode::SEE_OTHER
}
