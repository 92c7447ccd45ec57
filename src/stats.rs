use serde::Serialize;

use crate::models::Event;

/// Цифры для шапки админки.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_events: usize,
    pub total_bookings: u64,
    pub total_revenue: f64,
    pub active_events: usize,
}

impl DashboardStats {
    pub fn from_events(events: &[Event]) -> Self {
        let mut stats = DashboardStats { total_events: events.len(), ..Default::default() };
        let mut revenue_cents = 0.0;
        for event in events {
            let bookings = event.bookings.unwrap_or(0);
            stats.total_bookings += bookings as u64;
            revenue_cents += (event.price_per_seat * 100.0).round() * bookings as f64;
            if event.is_active() {
                stats.active_events += 1;
            }
        }
        stats.total_revenue = revenue_cents / 100.0;
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_bookings_and_revenue() {
        let events: Vec<Event> = serde_json::from_value(serde_json::json!([
            { "_id": "1", "title": "A", "price": 149.99, "bookings": 2, "status": "active" },
            { "_id": "2", "title": "B", "price": 65.0, "bookings": 10, "status": "cancelled" },
            { "_id": "3", "title": "C", "price": 20.0 }
        ]))
        .unwrap();

        let stats = DashboardStats::from_events(&events);
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.total_bookings, 12);
        assert_eq!(stats.total_revenue, 949.98);
        assert_eq!(stats.active_events, 1);
    }

    #[test]
    fn empty_dashboard() {
        assert_eq!(DashboardStats::from_events(&[]), DashboardStats::default());
    }
}
