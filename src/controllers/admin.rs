use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{render, render_with_status};
use crate::middleware::AdminSession;
use crate::models::Event;
use crate::routes::Page;
use crate::stats::DashboardStats;
use crate::validation::{changed_fields, EventForm, FieldErrors};
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin", get(dashboard))
        .route("/admin/create-event", get(create_page).post(create_event))
        .route("/admin/edit-event/{id}", get(edit_page).post(update_event))
        .route("/admin/events/{id}/delete", post(delete_event))
}

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub notice: Option<String>,
}

// Коды уведомлений после редиректа на дашборд
fn notice_text(code: &str) -> (Option<&'static str>, Option<&'static str>) {
    match code {
        "created" => (Some("Event created successfully"), None),
        "updated" => (Some("Event updated successfully"), None),
        "deleted" => (Some("Event deleted"), None),
        "load-failed" => (None, Some("Failed to load event")),
        _ => (None, None),
    }
}

async fn load_dashboard(state: &AppState) -> (Vec<Event>, Option<&'static str>) {
    match state.api.list_events().await {
        Ok(events) => (events, None),
        Err(e) => {
            tracing::error!("Error fetching events: {}", e);
            (Vec::new(), Some("Failed to connect to server"))
        }
    }
}

// GET /admin
async fn dashboard(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let (notice, mut error) = notice_text(query.notice.as_deref().unwrap_or_default());
    let (events, load_error) = load_dashboard(&state).await;
    error = error.or(load_error);

    let stats = DashboardStats::from_events(&events);
    let body = views::admin::dashboard(&admin.visitor.theme, &events, &stats, notice, error);
    render(&admin.visitor, &Page::Admin, "Admin Dashboard", &body).into_response()
}

// POST /admin/events/:id/delete
async fn delete_event(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> Response {
    match state.api.delete_event(&id).await {
        Ok(()) => Redirect::to("/admin?notice=deleted").into_response(),
        Err(e) => {
            tracing::error!(event_id = %id, "Error deleting event: {}", e);
            let (events, _) = load_dashboard(&state).await;
            let stats = DashboardStats::from_events(&events);
            let body = views::admin::dashboard(
                &admin.visitor.theme,
                &events,
                &stats,
                None,
                Some("Failed to delete event"),
            );
            render_with_status(StatusCode::BAD_GATEWAY, &admin.visitor, &Page::Admin, "Admin Dashboard", &body)
        }
    }
}

fn event_form_page(
    status: StatusCode,
    admin: &AdminSession,
    page: &Page,
    form: &EventForm,
    errors: &FieldErrors,
    changed: &[&str],
    alert: Option<&str>,
) -> Response {
    let (heading, action) = match page {
        Page::EditEvent(_) => ("Edit Event", page.path()),
        _ => ("Create New Event", Page::CreateEvent.path()),
    };
    let body = views::admin::event_form(&admin.visitor.theme, heading, &action, form, errors, changed, alert);
    render_with_status(status, &admin.visitor, page, heading, &body)
}

// GET /admin/create-event
async fn create_page(admin: AdminSession) -> Response {
    event_form_page(
        StatusCode::OK,
        &admin,
        &Page::CreateEvent,
        &EventForm::default(),
        &FieldErrors::new(),
        &[],
        None,
    )
}

// POST /admin/create-event
async fn create_event(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Form(form): Form<EventForm>,
) -> Response {
    let form = form.with_picked_time();
    let draft = match form.clone().into_draft() {
        Ok(draft) => draft,
        Err(errors) => {
            return event_form_page(StatusCode::UNPROCESSABLE_ENTITY, &admin, &Page::CreateEvent, &form, &errors, &[], None);
        }
    };

    match state.api.create_event(&draft).await {
        Ok(_) => Redirect::to("/admin?notice=created").into_response(),
        Err(e) => {
            tracing::error!("Error creating event: {}", e);
            event_form_page(
                StatusCode::BAD_GATEWAY,
                &admin,
                &Page::CreateEvent,
                &form,
                &FieldErrors::new(),
                &[],
                Some("Failed to create event"),
            )
        }
    }
}

// GET /admin/edit-event/:id
async fn edit_page(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> Response {
    match state.api.get_event(&id).await {
        Ok(event) => event_form_page(
            StatusCode::OK,
            &admin,
            &Page::EditEvent(id),
            &EventForm::from_event(&event),
            &FieldErrors::new(),
            &[],
            None,
        ),
        Err(e) => {
            tracing::error!(event_id = %id, "Error fetching event: {}", e);
            Redirect::to("/admin?notice=load-failed").into_response()
        }
    }
}

// POST /admin/edit-event/:id
async fn update_event(
    State(state): State<Arc<AppState>>,
    admin: AdminSession,
    Path(id): Path<String>,
    Form(form): Form<EventForm>,
) -> Response {
    let form = form.with_picked_time();
    let page = Page::EditEvent(id.clone());
    let original = state
        .api
        .get_event(&id)
        .await
        .map(|event| EventForm::from_event(&event))
        .ok();
    let changed = original
        .as_ref()
        .map(|original| changed_fields(original, &form))
        .unwrap_or_default();

    let draft = match form.clone().into_draft() {
        Ok(draft) => draft,
        Err(errors) => {
            return event_form_page(StatusCode::UNPROCESSABLE_ENTITY, &admin, &page, &form, &errors, &changed, None);
        }
    };

    match state.api.update_event(&id, &draft).await {
        Ok(_) => Redirect::to("/admin?notice=updated").into_response(),
        Err(e) => {
            tracing::error!(event_id = %id, "Error updating event: {}", e);
            event_form_page(
                StatusCode::BAD_GATEWAY,
                &admin,
                &page,
                &form,
                &FieldErrors::new(),
                &changed,
                Some("Failed to update event"),
            )
        }
    }
}
