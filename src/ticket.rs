//! Текстовый билет, который отдается после успешного бронирования.

use std::fmt::Write;

use crate::models::{Booking, Event};
use crate::views::money;

const WIDTH: usize = 56;

const IMPORTANT: [&str; 3] = [
    "Please arrive 30 minutes early",
    "Carry a valid ID proof",
    "Present this ticket at entrance",
];

#[derive(Debug, Clone)]
pub struct Ticket {
    reference: String,
    body: String,
}

impl Ticket {
    pub fn new(booking: &Booking, event: &Event) -> Self {
        let reference = booking.reference().to_string();
        let mut out = String::new();
        let rule = "=".repeat(WIDTH);

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{:^WIDTH$}", "TicketHub");
        let _ = writeln!(out, "{:^WIDTH$}", "YOUR EVENT TICKET");
        let _ = writeln!(out, "{:^WIDTH$}", format!("Ref: {}", reference));
        let _ = writeln!(out, "{}", rule);

        let status = booking.booking_status.as_deref().unwrap_or("Confirmed").to_uppercase();
        let booked = booking
            .booking_date
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default();
        let _ = writeln!(out, "[{}]{:>width$}", status, format!("Booked: {}", booked), width = WIDTH.saturating_sub(status.len() + 2));

        section(&mut out, "EVENT INFORMATION");
        let _ = writeln!(out, "{}", event.title);
        line(&mut out, "Date & Time", &format!(
            "{} {}",
            event.date.as_deref().unwrap_or(""),
            event.time.as_deref().unwrap_or("")
        ));
        line(&mut out, "Venue", &venue(event));
        line(&mut out, "Category", event.category.as_deref().unwrap_or(""));

        section(&mut out, "ATTENDEE INFORMATION");
        line(&mut out, "Name", &booking.full_name);
        line(&mut out, "Email", &booking.email);
        line(&mut out, "Phone", &booking.phone);

        section(&mut out, "BOOKING SUMMARY");
        line(&mut out, "Number of Seats", &booking.number_of_seats.to_string());
        line(&mut out, "Price per Seat", &money(booking.price_per_seat));
        line(&mut out, "Total Amount Paid", &money(booking.total_amount));
        let payment = booking.payment_status.as_deref().unwrap_or("Completed");
        let _ = writeln!(out, "Payment {}", payment);
        if let Some(txn) = booking.payment_details.as_ref().and_then(|p| p.transaction_id.as_deref()) {
            line(&mut out, "TXN", txn);
        }

        section(&mut out, "IMPORTANT");
        for notice in IMPORTANT {
            let _ = writeln!(out, "* {}", notice);
        }
        let _ = writeln!(out, "Ticket id: {}", booking.id.chars().take(12).collect::<String>());

        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "{:^WIDTH$}", "Thank you for choosing TicketHub!");
        let _ = writeln!(out, "{:^WIDTH$}", "Please present this ticket at the venue entrance");
        let _ = writeln!(out, "{:^WIDTH$}", "For support: support@tickethub.com");
        let _ = writeln!(out, "{}", rule);

        Ticket { reference, body: out }
    }

    pub fn file_name(&self) -> String {
        format!("TicketHub_{}.txt", self.reference)
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}

fn venue(event: &Event) -> String {
    match (event.venue.as_deref(), event.location.as_deref()) {
        (Some(venue), Some(location)) => format!("{}, {}", venue, location),
        (Some(one), None) | (None, Some(one)) => one.to_string(),
        (None, None) => String::new(),
    }
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n-- {} {}", title, "-".repeat(WIDTH.saturating_sub(title.len() + 4)));
}

fn line(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<20}{}", format!("{}:", label), value);
}
