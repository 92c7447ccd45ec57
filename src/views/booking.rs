use std::fmt::Write;

use super::{error_banner, escape, input, money};
use crate::models::{Booking, Event};
use crate::theme::ThemeContext;
use crate::validation::booking::MAX_SEATS;
use crate::validation::{total_amount, BookingForm, FieldErrors};

pub fn form(
    ctx: &ThemeContext,
    event: &Event,
    form: &BookingForm,
    errors: &FieldErrors,
    alert: Option<&str>,
) -> String {
    // итог пересчитывается при каждом рендере; для кривого числа мест - цена одного
    let seats = form
        .seat_count()
        .filter(|n| (1..=MAX_SEATS as i64).contains(n))
        .unwrap_or(1) as u32;
    let total = total_amount(event.price_per_seat, seats).unwrap_or_default();

    let mut seat_options = String::new();
    for n in 1..=MAX_SEATS {
        let selected = if n == seats { " selected" } else { "" };
        let plural = if n > 1 { "s" } else { "" };
        let _ = write!(seat_options, r#"<option value="{n}"{selected}>{n} Seat{plural}</option>"#);
    }
    let seat_error = errors
        .get("numberOfSeats")
        .map(|m| format!(r#"<p class="field-error text-red-500">{}</p>"#, escape(m)))
        .unwrap_or_default();

    let mut body = format!(
        r#"<section class="booking"><h1 class="{text}">Book Your Tickets</h1><aside class="summary {card}"><h2>{title}</h2><p>{date} {time}</p><p>{location}</p><p>Price per seat: {price}</p><p>Seats: {seats}</p><p class="total">Total: {total}</p></aside>"#,
        text = ctx.text_primary(),
        card = ctx.card_bg(),
        title = escape(&event.title),
        date = escape(event.date.as_deref().unwrap_or("")),
        time = escape(event.time.as_deref().unwrap_or("")),
        location = escape(event.location.as_deref().unwrap_or("")),
        price = money(event.price_per_seat),
        seats = seats,
        total = money(total),
    );
    if let Some(message) = alert {
        body.push_str(&error_banner(ctx, message));
    }

    let _ = write!(
        body,
        r#"<form method="post" action="/booking/{id}" novalidate><fieldset><legend>Personal Information</legend>{full_name}{email}{phone}<label for="numberOfSeats">Number of Seats</label><select id="numberOfSeats" name="numberOfSeats" class="{input_class}">{seat_options}</select>{seat_error}</fieldset><fieldset><legend>Payment Details</legend>{card_number}{card_name}{expiry}{cvv}</fieldset><button type="submit" class="btn-primary">Pay {total}</button></form></section>"#,
        id = escape(&event.id),
        full_name = input(ctx, "fullName", "Full Name", "text", &form.full_name, errors),
        email = input(ctx, "email", "Email", "email", &form.email, errors),
        phone = input(ctx, "phone", "Phone Number", "tel", &form.phone, errors),
        input_class = ctx.input(),
        seat_options = seat_options,
        seat_error = seat_error,
        card_number = input(ctx, "cardNumber", "Card Number", "text", &form.card_number, errors),
        card_name = input(ctx, "cardName", "Cardholder Name", "text", &form.card_name, errors),
        expiry = input(ctx, "expiryDate", "Expiry Date (MM/YY)", "text", &form.expiry_date, errors),
        // CVV обратно в разметку не попадает
        cvv = input(ctx, "cvv", "CVV", "password", "", errors),
        total = money(total),
    );
    body
}

pub fn confirmation(ctx: &ThemeContext, booking: &Booking, event: &Event) -> String {
    format!(
        r#"<section class="booking-success {card}"><h1 class="{text}">Booking Confirmed!</h1><p>Reference: <strong>{reference}</strong></p><p><strong>Event:</strong> {title}</p><p><strong>Name:</strong> {name}</p><p><strong>Email:</strong> {email}</p><p><strong>Seats:</strong> {seats}</p><p><strong>Total Paid:</strong> {total}</p><a class="btn-primary" href="/booking/{event_id}/ticket">Download Ticket</a> <a href="/events">Browse More Events</a></section>"#,
        card = ctx.card_bg(),
        text = ctx.text_primary(),
        reference = escape(booking.reference()),
        title = escape(&event.title),
        name = escape(&booking.full_name),
        email = escape(&booking.email),
        seats = booking.number_of_seats,
        total = money(booking.total_amount),
        event_id = escape(&event.id),
    )
}
