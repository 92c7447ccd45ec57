use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::routes::{self, Page};
use crate::session::{SessionData, SessionHandle, SessionStore, SESSION_COOKIE};
use crate::theme::ThemeContext;
use crate::AppState;

pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

// Живая сессия из cookie, если есть
fn existing_session(headers: &HeaderMap, state: &AppState) -> Option<Uuid> {
    cookie_value(headers, SESSION_COOKIE)
        .and_then(|value| Uuid::parse_str(value).ok())
        .filter(|id| state.sessions.exists(*id))
}

// Кладет в запрос SessionHandle; если обработчик завел новую сессию,
// отдает ее через Set-Cookie
pub async fn track_session(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let existing = existing_session(request.headers(), &state);
    let handle = SessionHandle::new(existing);
    request.extensions_mut().insert(handle.clone());

    let mut response = next.run(request).await;
    if let Some(id) = handle.id().filter(|id| Some(*id) != existing) {
        let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Любой посетитель: снимок сессии и контекст темы.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub handle: SessionHandle,
    /// Путь текущей страницы вместе с query.
    pub return_to: String,
    pub session: SessionData,
    pub theme: ThemeContext,
}

impl Visitor {
    pub fn is_admin(&self) -> bool {
        self.session.admin_token().is_some()
    }

    /// id сессии для записи; заводит сессию, если ее еще нет.
    pub fn claim_session(&self, store: &SessionStore) -> Uuid {
        self.handle.get_or_create(store)
    }
}

impl FromRequestParts<Arc<AppState>> for Visitor {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        // Без middleware (например, в юнит-тестах роутера) берем cookie напрямую
        let handle = match parts.extensions.get::<SessionHandle>() {
            Some(handle) => handle.clone(),
            None => SessionHandle::new(existing_session(&parts.headers, state)),
        };

        let session = match handle.id() {
            Some(id) => state.sessions.get(id),
            None => state.sessions.blank(),
        };
        let return_to = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());
        Ok(Visitor {
            theme: state.sessions.theme_context(&handle),
            return_to,
            handle,
            session,
        })
    }
}

/// Админ с токеном в сессии. Без токена - редирект на /login.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub visitor: Visitor,
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let visitor = Visitor::from_request_parts(parts, state).await?;

        let page = Page::resolve(parts.uri.path()).unwrap_or(Page::Admin);
        if let Err(redirect_to) = routes::guard(page, visitor.is_admin()) {
            tracing::debug!(path = %parts.uri.path(), "Admin page without token, redirecting");
            return Err(Redirect::to(redirect_to).into_response());
        }

        let token = visitor.session.admin_token().unwrap_or_default().to_string();
        Ok(AdminSession { visitor, token })
    }
}
