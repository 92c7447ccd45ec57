use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use std::sync::Arc;

use super::{api_error_page, redirect_to, render, render_with_status};
use crate::middleware::Visitor;
use crate::models::Event;
use crate::routes::Page;
use crate::services::ApiError;
use crate::ticket::Ticket;
use crate::validation::{BookingForm, FieldErrors};
use crate::{views, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/booking/{id}", get(booking_page).post(submit_booking))
        .route("/booking/{id}/ticket", get(download_ticket))
}

fn form_page(
    status: StatusCode,
    visitor: &Visitor,
    event: &Event,
    form: &BookingForm,
    errors: &FieldErrors,
    alert: Option<&str>,
) -> Response {
    let body = views::booking::form(&visitor.theme, event, form, errors, alert);
    render_with_status(status, visitor, &Page::Booking(event.id.clone()), "Book Tickets", &body)
}

// GET /booking/:id
async fn booking_page(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(id): Path<String>,
) -> Response {
    match state.api.get_event(&id).await {
        Ok(event) => {
            let form = BookingForm { number_of_seats: "1".to_string(), ..Default::default() };
            form_page(StatusCode::OK, &visitor, &event, &form, &FieldErrors::new(), None)
        }
        Err(e) => {
            tracing::error!(event_id = %id, "Error fetching event: {}", e);
            api_error_page(&visitor, &Page::Booking(id), &e, "Event not found", "Failed to load event")
        }
    }
}

// POST /booking/:id
async fn submit_booking(
    State(state): State<Arc<AppState>>,
    visitor: Visitor,
    Path(id): Path<String>,
    Form(form): Form<BookingForm>,
) -> Response {
    let event = match state.api.get_event(&id).await {
        Ok(event) => event,
        Err(e) => {
            tracing::error!(event_id = %id, "Error fetching event: {}", e);
            return api_error_page(&visitor, &Page::Booking(id), &e, "Event not found", "Failed to load event");
        }
    };

    let form = form.normalized();
    // ошибки валидации показываются у полей, запрос на сервер не уходит
    let payload = match form.clone().into_new_booking(&event) {
        Ok(payload) => payload,
        Err(errors) => {
            tracing::debug!(event_id = %id, fields = errors.len(), "Booking form rejected");
            return form_page(StatusCode::UNPROCESSABLE_ENTITY, &visitor, &event, &form, &errors, None);
        }
    };

    match state.api.create_booking(&payload).await {
        Ok(booking) => {
            let body = views::booking::confirmation(&visitor.theme, &booking, &event);
            let session_id = visitor.claim_session(&state.sessions);
            state
                .sessions
                .update(session_id, |data| data.last_booking = Some((booking, event.clone())));
            render(&visitor, &Page::Booking(event.id.clone()), "Booking Confirmed", &body).into_response()
        }
        Err(ApiError::Rejected { message }) => {
            let alert = format!("Booking failed: {}", message);
            form_page(StatusCode::BAD_REQUEST, &visitor, &event, &form, &FieldErrors::new(), Some(&alert))
        }
        Err(e) => {
            tracing::error!(event_id = %id, "Error creating booking: {}", e);
            form_page(
                StatusCode::BAD_GATEWAY,
                &visitor,
                &event,
                &form,
                &FieldErrors::new(),
                Some("Failed to process booking. Please try again."),
            )
        }
    }
}

// GET /booking/:id/ticket - билет последнего бронирования в этой сессии
async fn download_ticket(visitor: Visitor, Path(id): Path<String>) -> Response {
    let Some((booking, event)) = visitor.session.last_booking.as_ref().filter(|(_, e)| e.id == id) else {
        return redirect_to(&Page::Booking(id).path()).into_response();
    };

    let ticket = Ticket::new(booking, event);
    let disposition = format!("attachment; filename=\"{}\"", ticket.file_name());
    let mut response = ticket.as_str().to_string().into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response.headers_mut().insert(header::CONTENT_DISPOSITION, value);
    }
    response
}
