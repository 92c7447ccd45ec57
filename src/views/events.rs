use std::fmt::Write;

use super::{error_banner, escape, money};
use crate::filter::EventFilter;
use crate::models::Event;
use crate::theme::ThemeContext;

fn event_card(ctx: &ThemeContext, event: &Event) -> String {
    let id = escape(&event.id);
    format!(
        r#"<article class="event-card {card}"><h3 class="{text}">{title}</h3><p class="{muted}">{date} {time}</p><p class="{muted}">{location}</p><p class="category">{category}</p><p class="price">{price}</p><a href="/events/{id}">View Details</a> <a class="btn-primary" href="/booking/{id}">Book Now</a></article>"#,
        card = ctx.card_bg(),
        text = ctx.text_primary(),
        muted = ctx.text_secondary(),
        title = escape(&event.title),
        date = escape(event.date.as_deref().unwrap_or("")),
        time = escape(event.time.as_deref().unwrap_or("")),
        location = escape(event.location.as_deref().unwrap_or("")),
        category = escape(event.category.as_deref().unwrap_or("")),
        price = money(event.price_per_seat),
        id = id,
    )
}

pub fn home(ctx: &ThemeContext, featured: &[Event], error: Option<&str>) -> String {
    let mut body = format!(
        r#"<section class="hero"><h1 class="{}">Discover &amp; Book Amazing Events</h1><p class="{}">Concerts, festivals, conferences and more.</p><a class="btn-primary" href="/events">Explore Events</a></section><section id="featured"><h2>Featured Events</h2>"#,
        ctx.text_primary(),
        ctx.text_secondary()
    );
    if let Some(message) = error {
        body.push_str(&error_banner(ctx, message));
    }
    for event in featured {
        body.push_str(&event_card(ctx, event));
    }
    body.push_str("</section>");
    body
}

pub fn list(
    ctx: &ThemeContext,
    filter: &EventFilter,
    categories: &[String],
    visible: &[&Event],
    error: Option<&str>,
) -> String {
    let mut options = String::new();
    for category in categories {
        let selected = if *category == filter.category
            || (filter.category.is_empty() && category == crate::filter::ALL_CATEGORIES)
        {
            " selected"
        } else {
            ""
        };
        let _ = write!(options, r#"<option value="{0}"{1}>{0}</option>"#, escape(category), selected);
    }

    let mut body = format!(
        r#"<section class="events"><h1 class="{text}">Upcoming Events</h1><form method="get" action="/events" class="filters"><input type="search" name="q" value="{q}" placeholder="Search events, locations, categories" class="{input}"><select name="category" class="{input}">{options}</select><button type="submit">Filter</button></form>"#,
        text = ctx.text_primary(),
        q = escape(&filter.search),
        input = ctx.input(),
        options = options,
    );

    match error {
        Some(message) => body.push_str(&error_banner(ctx, message)),
        None if visible.is_empty() => {
            let _ = write!(
                body,
                r#"<p class="empty {}">No events found. Try a different search or category.</p>"#,
                ctx.text_secondary()
            );
        }
        None => {
            let _ = write!(body, r#"<p class="count">{} events</p><div class="grid">"#, visible.len());
            for event in visible {
                body.push_str(&event_card(ctx, event));
            }
            body.push_str("</div>");
        }
    }
    body.push_str("</section>");
    body
}

pub fn details(ctx: &ThemeContext, event: &Event) -> String {
    let seats = event
        .available_seats
        .map(|n| n.to_string())
        .unwrap_or_else(|| "Limited".to_string());
    let image = event
        .image
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, escape(src), escape(&event.title)))
        .unwrap_or_default();

    format!(
        r#"<section class="event-details {card}">{image}<a href="/events">Back to Events</a><h1 class="{text}">{title}</h1><p class="category">{category}</p><p class="{muted}">{description}</p><dl><dt>Date</dt><dd>{date}</dd><dt>Time</dt><dd>{time}</dd><dt>Location</dt><dd>{location}</dd><dt>Venue</dt><dd>{venue}</dd><dt>Organizer</dt><dd>{organizer}</dd></dl><p class="price">{price} per seat</p><p class="seats">{seats} seats remaining</p><a class="btn-primary" href="/booking/{id}">Book Now</a></section>"#,
        card = ctx.card_bg(),
        image = image,
        text = ctx.text_primary(),
        muted = ctx.text_secondary(),
        title = escape(&event.title),
        category = escape(event.category.as_deref().unwrap_or("")),
        description = escape(event.description.as_deref().unwrap_or("")),
        date = escape(event.date.as_deref().unwrap_or("")),
        time = escape(event.time.as_deref().unwrap_or("")),
        location = escape(event.location.as_deref().unwrap_or("")),
        venue = escape(event.venue.as_deref().unwrap_or("")),
        organizer = escape(event.organizer.as_deref().unwrap_or("")),
        price = money(event.price_per_seat),
        seats = seats,
        id = escape(&event.id),
    )
}

pub fn not_found(ctx: &ThemeContext, message: &str) -> String {
    format!(
        r#"<section class="not-found">{}<a href="/events">Back to Events</a></section>"#,
        error_banner(ctx, message)
    )
}
