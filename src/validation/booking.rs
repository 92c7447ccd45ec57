use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use super::FieldErrors;
use crate::models::{Event, NewBooking, PaymentDetails};

/// Сколько мест можно выбрать в форме.
pub const MAX_SEATS: u32 = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("expiry pattern"));
static CVV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{3,4}$").expect("cvv pattern"));

/// Сырые значения формы бронирования, как их прислал браузер.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub number_of_seats: String,
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl BookingForm {
    /// Применяет те же маски, что и поля ввода: номер карты группами по 4,
    /// срок действия как MM/YY.
    pub fn normalized(mut self) -> Self {
        self.card_number = format_card_number(&self.card_number);
        self.expiry_date = format_expiry(&self.expiry_date);
        self
    }

    /// Количество мест, если это целое число.
    pub fn seat_count(&self) -> Option<i64> {
        self.number_of_seats.trim().parse().ok()
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if self.full_name.trim().is_empty() {
            errors.add("fullName", "Full name is required");
        }

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.add("email", "Email is invalid");
        }

        if self.phone.trim().is_empty() {
            errors.add("phone", "Phone number is required");
        } else if digits(&self.phone).len() != 10 {
            errors.add("phone", "Phone number must be 10 digits");
        }

        match self.seat_count() {
            None => errors.add("numberOfSeats", "Number of seats must be a whole number"),
            Some(n) if n < 1 => errors.add("numberOfSeats", "Select at least 1 seat"),
            Some(n) if n > MAX_SEATS as i64 => {
                errors.add("numberOfSeats", format!("You can book at most {} seats", MAX_SEATS))
            }
            Some(_) => {}
        }

        if self.card_number.trim().is_empty() {
            errors.add("cardNumber", "Card number is required");
        } else {
            let stripped: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
            if stripped.len() != 16 || !stripped.chars().all(|c| c.is_ascii_digit()) {
                errors.add("cardNumber", "Card number must be 16 digits");
            }
        }

        if self.card_name.trim().is_empty() {
            errors.add("cardName", "Cardholder name is required");
        }

        // Только форма MM/YY: месяц и срок годности не проверяются
        if self.expiry_date.trim().is_empty() {
            errors.add("expiryDate", "Expiry date is required");
        } else if !EXPIRY_RE.is_match(&self.expiry_date) {
            errors.add("expiryDate", "Invalid expiry date (MM/YY)");
        }

        if self.cvv.trim().is_empty() {
            errors.add("cvv", "CVV is required");
        } else if !CVV_RE.is_match(&self.cvv) {
            errors.add("cvv", "CVV must be 3-4 digits");
        }

        errors
    }

    /// Валидирует форму и собирает тело POST /api/bookings.
    pub fn into_new_booking(self, event: &Event) -> Result<NewBooking, FieldErrors> {
        let mut errors = self.validate();
        let seats = self.seat_count().unwrap_or_default().max(0) as u32;
        let total = total_amount(event.price_per_seat, seats);
        if total.is_none() {
            errors.add("numberOfSeats", "Event price is not available");
        }

        let total = errors.into_result(total)?.unwrap_or_default();
        Ok(NewBooking {
            event_id: event.id.clone(),
            payment_details: PaymentDetails {
                card_last_four: card_last_four(&self.card_number),
                card_name: self.card_name,
                payment_method: "Credit Card".to_string(),
                transaction_id: None,
            },
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            number_of_seats: seats,
            price_per_seat: event.price_per_seat,
            total_amount: total,
            payment_status: "Completed".to_string(),
            booking_status: "Confirmed".to_string(),
        })
    }
}

fn digits(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Маска номера карты: первые 16 цифр группами по 4.
/// Если цифр меньше четырех, ввод возвращается как есть.
pub fn format_card_number(value: &str) -> String {
    let digits = digits(value);
    if digits.len() < 4 {
        return value.to_string();
    }

    digits
        .as_bytes()
        .chunks(4)
        .take(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Маска срока действия: "1226" -> "12/26".
pub fn format_expiry(value: &str) -> String {
    let digits = digits(value);
    if digits.len() < 2 {
        return digits;
    }
    let end = digits.len().min(4);
    format!("{}/{}", &digits[..2], &digits[2..end])
}

pub fn card_last_four(card_number: &str) -> String {
    let chars: Vec<char> = card_number.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// Итог к оплате, считается в центах и округляется до двух знаков.
/// Для отрицательной или нечисловой цены итога нет.
pub fn total_amount(price_per_seat: f64, seats: u32) -> Option<f64> {
    if !price_per_seat.is_finite() || price_per_seat < 0.0 {
        return None;
    }
    let cents = (price_per_seat * 100.0).round() * seats as f64;
    Some(cents / 100.0)
}
