use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{render, render_with_status};
use crate::middleware::Visitor;
use crate::routes::{Page, LOGIN_PATH};
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

async fn login_page(visitor: Visitor) -> Response {
    let body = views::admin::login(&visitor.theme, "", None);
    render(&visitor, &Page::Login, "Admin Login", &body).into_response()
}

// POST /login - мок-проверка по учетке из конфига
async fn login(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Form(form): Form<LoginForm>,
) -> Response {
    let admin = &state.config.admin;
    if form.email == admin.email && form.password == admin.password {
        state.sessions.sign_in(visitor.claim_session(&state.sessions));
        return Redirect::to(&Page::Admin.path()).into_response();
    }

    tracing::warn!(email = %form.email, "Failed admin login");
    let body = views::admin::login(
        &visitor.theme,
        &form.email,
        Some("Invalid email or password. Please check your credentials."),
    );
    render_with_status(StatusCode::UNAUTHORIZED, &visitor, &Page::Login, "Admin Login", &body)
}

async fn logout(State(state): State<Arc<AppState>>, visitor: Visitor) -> Redirect {
    if let Some(id) = visitor.handle.id() {
        state.sessions.sign_out(id);
    }
    Redirect::to(LOGIN_PATH)
}
