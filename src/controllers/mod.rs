pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod home;
pub mod theme;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Router,
};
use std::sync::Arc;

use crate::middleware::Visitor;
use crate::routes::{Page, FALLBACK_PATH};
use crate::services::ApiError;
use crate::views;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(home::routes())
        .merge(events::routes())
        .merge(bookings::routes())
        .merge(auth::routes())
        .merge(admin::routes())
        .merge(theme::routes())
        .fallback(fallback)
}

// Неизвестный путь -> на главную
async fn fallback() -> Redirect {
    Redirect::to(FALLBACK_PATH)
}

/// Редирект на путь, собранный из пользовательского ввода.
/// Если путь не годится в заголовок Location - на главную.
pub(crate) fn redirect_to(path: &str) -> Redirect {
    if HeaderValue::from_str(path).is_ok() {
        Redirect::to(path)
    } else {
        Redirect::to(FALLBACK_PATH)
    }
}

/// Страница в общем каркасе с темой посетителя.
pub(crate) fn render(visitor: &Visitor, page: &Page, title: &str, body: &str) -> Html<String> {
    Html(views::layout(&visitor.theme, page, &visitor.return_to, visitor.is_admin(), title, body))
}

pub(crate) fn render_with_status(
    status: StatusCode,
    visitor: &Visitor,
    page: &Page,
    title: &str,
    body: &str,
) -> Response {
    (status, render(visitor, page, title, body)).into_response()
}

/// Ошибка загрузки данных с API -> страница с сообщением.
pub(crate) fn api_error_page(visitor: &Visitor, page: &Page, err: &ApiError, not_found: &str, failed: &str) -> Response {
    let (status, message) = match err {
        ApiError::NotFound => (StatusCode::NOT_FOUND, not_found),
        _ => (StatusCode::BAD_GATEWAY, failed),
    };
    render_with_status(
        status,
        visitor,
        page,
        message,
        &views::events::not_found(&visitor.theme, message),
    )
}
