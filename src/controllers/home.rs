use axum::{extract::State, response::Html, routing::get, Router};
use std::sync::Arc;

use super::render;
use crate::middleware::Visitor;
use crate::routes::Page;
use crate::{views, AppState};

const FEATURED_COUNT: usize = 3;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(home))
}

async fn home(State(state): State<Arc<AppState>>, visitor: Visitor) -> Html<String> {
    let (featured, error) = match state.api.list_events().await {
        Ok(events) => (events.into_iter().take(FEATURED_COUNT).collect::<Vec<_>>(), None),
        Err(e) => {
            tracing::error!("Failed to load featured events: {}", e);
            (Vec::new(), Some("Failed to connect to server"))
        }
    };

    let body = views::events::home(&visitor.theme, &featured, error);
    render(&visitor, &Page::Home, "Home", &body)
}
