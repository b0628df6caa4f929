use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::aggregate::{BookingResponse, BookingStatus};

/// Per-status counts of the loaded bookings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    pub completed: usize,
    /// Sum over bookings that were not cancelled.
    pub total_spent: f64,
}

impl BookingStats {
    pub fn from_bookings(bookings: &[BookingResponse]) -> Self {
        bookings.iter().fold(Self::default(), |mut stats, b| {
            stats.total += 1;
            match b.status {
                BookingStatus::Pending => stats.pending += 1,
                BookingStatus::Confirmed => stats.confirmed += 1,
                BookingStatus::Cancelled => stats.cancelled += 1,
                BookingStatus::Completed => stats.completed += 1,
            }
            if b.status != BookingStatus::Cancelled {
                stats.total_spent += b.total_price;
            }
            stats
        })
    }
}

/// Bookings on or after `today` that are not cancelled, soonest first.
pub fn upcoming(bookings: &[BookingResponse], today: NaiveDate) -> Vec<&BookingResponse> {
    let mut rows: Vec<&BookingResponse> = bookings
        .iter()
        .filter(|b| b.date >= today && b.status != BookingStatus::Cancelled)
        .collect();
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.start_time.cmp(&b.start_time)));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a004_booking::aggregate::fixtures::booking;

    #[test]
    fn test_stats_count_by_status() {
        let rows = vec![
            booking(10, "10:00", BookingStatus::Confirmed, 300.0),
            booking(11, "10:00", BookingStatus::Cancelled, 500.0),
            booking(12, "10:00", BookingStatus::Pending, 200.0),
            booking(13, "10:00", BookingStatus::Completed, 100.0),
        ];
        let stats = BookingStats::from_bookings(&rows);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.cancelled, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_spent, 600.0);
    }

    #[test]
    fn test_upcoming_skips_past_and_cancelled() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 11).unwrap();
        let rows = vec![
            booking(14, "10:00", BookingStatus::Confirmed, 1.0),
            booking(10, "10:00", BookingStatus::Confirmed, 1.0),
            booking(12, "10:00", BookingStatus::Cancelled, 1.0),
            booking(11, "08:00", BookingStatus::Pending, 1.0),
        ];
        let up = upcoming(&rows, today);
        assert_eq!(up.len(), 2);
        assert_eq!(up[0].date, today);
    }
}
