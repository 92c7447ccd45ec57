use axum::{
    response::Redirect,
    routing::post,
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::redirect_to;
use crate::middleware::Visitor;
use crate::routes::{Page, FALLBACK_PATH};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/theme", post(toggle_theme))
}

#[derive(Debug, Default, Deserialize)]
pub struct ThemeToggle {
    #[serde(default)]
    pub back: String,
}

/// Куда вернуться после смены темы: только своя страница, query
/// пересобирается заново.
pub fn return_path(back: &str) -> String {
    let (path, query) = back.split_once('?').unwrap_or((back, ""));
    let Some(page) = Page::resolve(path) else {
        return FALLBACK_PATH.to_string();
    };

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).unwrap_or_default();
    match serde_urlencoded::to_string(&pairs) {
        Ok(query) if !query.is_empty() => format!("{}?{}", page.path(), query),
        _ => page.path(),
    }
}

// POST /theme - переключить тему и вернуться на ту же страницу
async fn toggle_theme(mut visitor: Visitor, Form(form): Form<ThemeToggle>) -> Redirect {
    let theme = visitor.theme.toggle();
    tracing::debug!(session = ?visitor.handle.id(), %theme, "Theme toggled");
    redirect_to(&return_path(&form.back))
}
