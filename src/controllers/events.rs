use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;

use super::{api_error_page, render};
use crate::filter::{categories, EventFilter};
use crate::middleware::Visitor;
use crate::routes::Page;
use crate::services::ApiError;
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/{id}", get(event_details))
}

// GET /events?q=&category=
async fn list_events(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Query(filter): Query<EventFilter>,
) -> Response {
    let (events, error) = match state.api.list_events().await {
        Ok(events) => (events, None),
        Err(ApiError::Rejected { message }) => {
            tracing::warn!("Events request rejected: {}", message);
            (Vec::new(), Some("Failed to fetch events"))
        }
        Err(e) => {
            tracing::error!("Error fetching events: {}", e);
            (Vec::new(), Some("Failed to connect to server"))
        }
    };

    let visible = filter.apply(&events);
    let body = views::events::list(&visitor.theme, &filter, &categories(&events), &visible, error);
    render(&visitor, &Page::Events, "Events", &body).into_response()
}

// GET /events/:id
async fn event_details(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(id): Path<String>,
) -> Response {
    let page = Page::EventDetails(id.clone());
    match state.api.get_event(&id).await {
        Ok(event) => {
            let body = views::events::details(&visitor.theme, &event);
            render(&visitor, &page, &event.title, &body).into_response()
        }
        Err(e) => {
            tracing::error!(event_id = %id, "Error fetching event: {}", e);
            api_error_page(&visitor, &page, &e, "Event not found", "Failed to load event")
        }
    }
}
