//! Таблица страниц приложения и гард админских страниц.

use std::fmt;

pub const LOGIN_PATH: &str = "/login";
pub const FALLBACK_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Events,
    EventDetails(String),
    Booking(String),
    Login,
    Admin,
    CreateEvent,
    EditEvent(String),
}

impl Page {
    /// Разобрать путь. Неизвестный путь -> `None`, вызывающий уводит на `/`.
    pub fn resolve(path: &str) -> Option<Page> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        let page = match segments.as_slice() {
            [] => Page::Home,
            ["events"] => Page::Events,
            ["events", id] if !id.is_empty() => Page::EventDetails(id.to_string()),
            ["booking", id] if !id.is_empty() => Page::Booking(id.to_string()),
            ["login"] => Page::Login,
            ["admin"] => Page::Admin,
            ["admin", "create-event"] => Page::CreateEvent,
            ["admin", "edit-event", id] if !id.is_empty() => Page::EditEvent(id.to_string()),
            _ => return None,
        };
        Some(page)
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Events => "/events".to_string(),
            Page::EventDetails(id) => format!("/events/{}", id),
            Page::Booking(id) => format!("/booking/{}", id),
            Page::Login => LOGIN_PATH.to_string(),
            Page::Admin => "/admin".to_string(),
            Page::CreateEvent => "/admin/create-event".to_string(),
            Page::EditEvent(id) => format!("/admin/edit-event/{}", id),
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Page::Admin | Page::CreateEvent | Page::EditEvent(_))
    }

    /// Пункт навбара, который подсвечивается на этой странице.
    pub fn nav_section(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Events | Page::EventDetails(_) | Page::Booking(_) => "/events",
            Page::Login | Page::Admin | Page::CreateEvent | Page::EditEvent(_) => "/admin",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Пускает на страницу или возвращает путь, куда перенаправить.
pub fn guard(page: Page, has_admin_token: bool) -> Result<Page, &'static str> {
    if page.requires_admin() && !has_admin_token {
        Err(LOGIN_PATH)
    } else {
        Ok(page)
    }
}
