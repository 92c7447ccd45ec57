use std::fmt::Write;

use super::{error_banner, escape, input, money};
use crate::models::Event;
use crate::stats::DashboardStats;
use crate::theme::ThemeContext;
use crate::validation::event::{from_24_hour, Period, POPULAR_LOCATIONS};
use crate::validation::{EventForm, FieldErrors};

pub fn login(ctx: &ThemeContext, email: &str, error: Option<&str>) -> String {
    let mut body = format!(
        r#"<section class="login {card}"><h1 class="{text}">Admin Login</h1><p class="{muted}">Sign in to manage events</p>"#,
        card = ctx.card_bg(),
        text = ctx.text_primary(),
        muted = ctx.text_secondary(),
    );
    if let Some(message) = error {
        body.push_str(&error_banner(ctx, message));
    }
    let _ = write!(
        body,
        r#"<form method="post" action="/login">{email}{password}<button type="submit" class="btn-primary">Sign In</button></form></section>"#,
        email = input(ctx, "email", "Email Address", "email", email, &FieldErrors::new()),
        password = input(ctx, "password", "Password", "password", "", &FieldErrors::new()),
    );
    body
}

fn stat_card(ctx: &ThemeContext, label: &str, value: &str) -> String {
    format!(
        r#"<div class="stat {}"><h3>{}</h3><p>{}</p></div>"#,
        ctx.card_bg(),
        escape(label),
        escape(value)
    )
}

pub fn dashboard(ctx: &ThemeContext, events: &[Event], stats: &DashboardStats, notice: Option<&str>, error: Option<&str>) -> String {
    let mut body = format!(
        r#"<section class="admin"><header><h1 class="{text}">Admin Dashboard</h1><a class="btn-primary" href="/admin/create-event">Create Event</a> <a href="/admin">Refresh</a><form method="post" action="/logout"><button type="submit">Logout</button></form></header><div class="stats">{a}{b}{c}{d}</div>"#,
        text = ctx.text_primary(),
        a = stat_card(ctx, "Total Events", &stats.total_events.to_string()),
        b = stat_card(ctx, "Total Bookings", &stats.total_bookings.to_string()),
        c = stat_card(ctx, "Total Revenue", &money(stats.total_revenue)),
        d = stat_card(ctx, "Active Events", &stats.active_events.to_string()),
    );
    if let Some(message) = notice {
        let _ = write!(body, r#"<div class="alert success" role="status">{}</div>"#, escape(message));
    }
    if let Some(message) = error {
        body.push_str(&error_banner(ctx, message));
    }

    body.push_str(r#"<table><thead><tr><th>Event</th><th>Date</th><th>Location</th><th>Price</th><th>Bookings</th><th>Status</th><th></th></tr></thead><tbody>"#);
    for event in events {
        let id = escape(&event.id);
        let _ = write!(
            body,
            r#"<tr><td>{title}</td><td>{date}</td><td>{location}</td><td>{price}</td><td>{bookings}</td><td>{status}</td><td><a href="/admin/edit-event/{id}">Edit</a><form method="post" action="/admin/events/{id}/delete" onsubmit="return confirm('Delete this event?')"><button type="submit">Delete</button></form></td></tr>"#,
            title = escape(&event.title),
            date = escape(event.date.as_deref().unwrap_or("")),
            location = escape(event.location.as_deref().unwrap_or("")),
            price = money(event.price_per_seat),
            bookings = event.bookings.unwrap_or(0),
            status = escape(event.status.as_deref().unwrap_or("")),
            id = id,
        );
    }
    body.push_str("</tbody></table></section>");
    body
}

const PICKER_MINUTES: [u32; 4] = [0, 15, 30, 45];

// Пикер времени в 12-часовом формате; без времени - 12:00 PM
fn time_picker(ctx: &ThemeContext, time: &str, errors: &FieldErrors) -> String {
    let (hour, minute, period) = from_24_hour(time).unwrap_or((12, 0, Period::Pm));
    let selected = |on: bool| if on { " selected" } else { "" };

    let mut hours = String::new();
    for h in 1..=12 {
        let _ = write!(hours, r#"<option value="{h}"{}>{h}</option>"#, selected(h == hour));
    }
    let mut minutes = String::new();
    let mut choices = PICKER_MINUTES.to_vec();
    if !choices.contains(&minute) {
        choices.push(minute);
        choices.sort_unstable();
    }
    for m in choices {
        let _ = write!(minutes, r#"<option value="{m}"{}>{m:02}</option>"#, selected(m == minute));
    }
    let mut periods = String::new();
    for p in [Period::Am, Period::Pm] {
        let _ = write!(periods, r#"<option value="{p}"{}>{p}</option>"#, selected(p == period));
    }

    let error = errors
        .get("time")
        .map(|m| format!(r#"<p class="field-error text-red-500">{}</p>"#, escape(m)))
        .unwrap_or_default();
    format!(
        r#"<fieldset class="time-picker"><legend>Time</legend><select name="hour" aria-label="Hour" class="{input}">{hours}</select><select name="minute" aria-label="Minute" class="{input}">{minutes}</select><select name="period" aria-label="Period" class="{input}">{periods}</select></fieldset>{error}"#,
        input = ctx.input(),
    )
}

/// Форма события. `action` - куда POST-ить, `changed` - подсвеченные поля на странице редактирования.
pub fn event_form(
    ctx: &ThemeContext,
    heading: &str,
    action: &str,
    form: &EventForm,
    errors: &FieldErrors,
    changed: &[&str],
    alert: Option<&str>,
) -> String {
    let mut locations = String::new();
    for (city, state) in POPULAR_LOCATIONS {
        let _ = write!(locations, r#"<option value="{}, {}">"#, city, state);
    }

    let mut body = format!(
        r#"<section class="event-form {card}"><a href="/admin">Back to Dashboard</a><h1 class="{text}">{heading}</h1>"#,
        card = ctx.card_bg(),
        text = ctx.text_primary(),
        heading = escape(heading),
    );
    if !changed.is_empty() {
        let _ = write!(
            body,
            r#"<p class="changed {}">Unsaved changes: {}</p>"#,
            ctx.pick("border-orange-400", "border-yellow-500"),
            escape(&changed.join(", "))
        );
    }
    if let Some(message) = alert {
        body.push_str(&error_banner(ctx, message));
    }

    let _ = write!(
        body,
        r#"<form method="post" action="{action}">{title}<label for="description">Description</label><textarea id="description" name="description" class="{input_class}">{description}</textarea>{date}{time}{location}<datalist id="popular-locations">{locations}</datalist>{venue}{price}{capacity}{category}{organizer}{image}<button type="submit" class="btn-primary">Save Event</button> <a href="/admin">Cancel</a></form></section>"#,
        action = escape(action),
        title = input(ctx, "title", "Event Title", "text", &form.title, errors),
        input_class = ctx.input(),
        description = escape(&form.description),
        date = input(ctx, "date", "Date", "date", &form.date, errors),
        time = time_picker(ctx, &form.time, errors),
        location = input(ctx, "location", "Location", "text", &form.location, errors)
            .replacen("<input ", r#"<input list="popular-locations" "#, 1),
        locations = locations,
        venue = input(ctx, "venue", "Venue", "text", &form.venue, errors),
        price = input(ctx, "price", "Price per Seat", "number", &form.price, errors),
        capacity = input(ctx, "capacity", "Capacity", "number", &form.capacity, errors),
        category = input(ctx, "category", "Category", "text", &form.category, errors),
        organizer = input(ctx, "organizer", "Organizer", "text", &form.organizer, errors),
        image = input(ctx, "imageUrl", "Image URL", "url", &form.image_url, errors),
    );
    body
}
