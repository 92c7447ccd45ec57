pub mod config;
pub mod controllers;
pub mod filter;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod stats;
pub mod theme;
pub mod ticket;
pub mod validation;
pub mod views;

use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: services::ApiClient,
    pub sessions: session::SessionStore,
}

impl AppState {
    pub fn new(config: config::Config) -> Result<Arc<Self>, services::ApiError> {
        let api = services::ApiClient::from_config(&config.api)?;
        let sessions = session::SessionStore::new(
            config.app.default_theme,
            Duration::from_secs(config.app.session_ttl_minutes * 60),
        );
        Ok(Arc::new(Self { config, api, sessions }))
    }
}

/// Роутер со всеми страницами, сессиями и трейсингом.
pub fn app(state: Arc<AppState>) -> Router {
    controllers::routes()
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::track_session,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
