use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::query::sort::{cmp_f64, cmp_text};
use crate::shared::query::{Comparator, FilterSet, Record, Searchable};
use crate::shared::time::normalize_time;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn all() -> Vec<BookingStatus> {
        vec![
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::Completed => "Completed",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        BookingStatus::all()
            .into_iter()
            .find(|s| s.code().eq_ignore_ascii_case(code.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub court_id: Uuid,
    #[serde(default)]
    pub facility_id: Option<Uuid>,
    #[serde(default)]
    pub facility_name: String,
    #[serde(default)]
    pub court_name: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub total_price: f64,
    pub status: BookingStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub sport_type: Option<String>,
    #[serde(default)]
    pub facility_address: Option<String>,
    #[serde(default)]
    pub facility_phone: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

impl BookingResponse {
    pub fn time_range(&self) -> String {
        let start = normalize_time(&self.start_time).unwrap_or_else(|| self.start_time.clone());
        let end = normalize_time(&self.end_time).unwrap_or_else(|| self.end_time.clone());
        format!("{start} - {end}")
    }

    pub fn price_label(&self) -> String {
        if self.currency == "INR" {
            format!("₹{:.2}", self.total_price)
        } else {
            format!("{:.2} {}", self.total_price, self.currency)
        }
    }

    /// Only confirmed or pending bookings that have not started yet.
    pub fn can_cancel(&self, today: NaiveDate) -> bool {
        matches!(self.status, BookingStatus::Confirmed | BookingStatus::Pending) && self.date >= today
    }
}

impl Record for BookingResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Searchable for BookingResponse {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.facility_name.as_str(), self.court_name.as_str()];
        if let Some(sport) = self.sport_type.as_deref() {
            fields.push(sport);
        }
        fields
    }
}

/// Body of `POST /bookings` and `PUT /bookings/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub court_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    /// Whole rupees.
    pub amount: i64,
}

impl BookingRequest {
    pub fn validate(&self, today: NaiveDate) -> Result<(), String> {
        let start = normalize_time(&self.start_time).ok_or("Select a start time")?;
        let end = normalize_time(&self.end_time).ok_or("Select an end time")?;
        if end <= start {
            return Err("End time must be after start time".into());
        }
        if self.date < today {
            return Err("Cannot book a date in the past".into());
        }
        if self.amount < 0 {
            return Err("Amount cannot be negative".into());
        }
        Ok(())
    }
}

/// `GET /bookings/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub page: u32,
    pub size: u32,
}

/// `GET /bookings/date-range`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeParams {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub page: u32,
    pub size: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingFilters {
    pub status: Option<BookingStatus>,
}

impl FilterSet<BookingResponse> for BookingFilters {
    fn matches(&self, record: &BookingResponse) -> bool {
        self.status.map_or(true, |s| record.status == s)
    }

    fn active_count(&self) -> usize {
        usize::from(self.status.is_some())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingSort {
    /// Server order.
    #[default]
    AsReturned,
    DateAsc,
    DateDesc,
    PriceHigh,
    Facility,
}

impl BookingSort {
    pub fn all() -> Vec<BookingSort> {
        vec![
            BookingSort::AsReturned,
            BookingSort::DateAsc,
            BookingSort::DateDesc,
            BookingSort::PriceHigh,
            BookingSort::Facility,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingSort::AsReturned => "default",
            BookingSort::DateAsc => "date-asc",
            BookingSort::DateDesc => "date-desc",
            BookingSort::PriceHigh => "price-high",
            BookingSort::Facility => "facility",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingSort::AsReturned => "Default",
            BookingSort::DateAsc => "Date: oldest first",
            BookingSort::DateDesc => "Date: newest first",
            BookingSort::PriceHigh => "Price: high to low",
            BookingSort::Facility => "Facility name",
        }
    }

    pub fn parse(key: &str) -> Self {
        BookingSort::all()
            .into_iter()
            .find(|s| s.as_str() == key)
            .unwrap_or_default()
    }
}

impl Comparator<BookingResponse> for BookingSort {
    fn compare(&self, a: &BookingResponse, b: &BookingResponse) -> Ordering {
        let when = |r: &BookingResponse| (r.date, normalize_time(&r.start_time));
        match self {
            BookingSort::AsReturned => Ordering::Equal,
            BookingSort::DateAsc => when(a).cmp(&when(b)),
            BookingSort::DateDesc => when(b).cmp(&when(a)),
            BookingSort::PriceHigh => cmp_f64(Some(b.total_price), Some(a.total_price)),
            BookingSort::Facility => cmp_text(&a.facility_name, &b.facility_name),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn booking(day: u32, start: &str, status: BookingStatus, price: f64) -> BookingResponse {
        BookingResponse {
            id: Uuid::new_v4(),
            user_id: None,
            court_id: Uuid::nil(),
            facility_id: None,
            facility_name: format!("Facility {day}"),
            court_name: "Court 1".into(),
            date: NaiveDate::from_ymd_opt(2024, 8, day).unwrap(),
            start_time: start.into(),
            end_time: "23:00:00".into(),
            currency: "INR".into(),
            total_price: price,
            status,
            created_at: None,
            amenities: vec![],
            duration: 1,
            sport_type: Some("TENNIS".into()),
            facility_address: None,
            facility_phone: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::booking;
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_booking_defaults_currency() {
        let json = r#"{
            "id": "8d3c1a2b-3c4d-4e5f-8a9b-0c1d2e3f4a5b",
            "courtId": "0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01",
            "facilityName": "Elite Tennis Club",
            "courtName": "Court 2",
            "date": "2024-08-12",
            "startTime": "18:00:00",
            "endTime": "19:00:00",
            "totalPrice": 450.0,
            "status": "CONFIRMED"
        }"#;
        let b: BookingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(b.currency, "INR");
        assert_eq!(b.time_range(), "18:00 - 19:00");
        assert_eq!(b.price_label(), "₹450.00");
    }

    #[test]
    fn test_can_cancel() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
        assert!(booking(12, "10:00", BookingStatus::Confirmed, 1.0).can_cancel(today));
        assert!(!booking(9, "10:00", BookingStatus::Confirmed, 1.0).can_cancel(today));
        assert!(!booking(12, "10:00", BookingStatus::Cancelled, 1.0).can_cancel(today));
    }

    #[test]
    fn test_request_validation() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 10).unwrap();
        let mut req = BookingRequest {
            court_id: Uuid::nil(),
            date: today,
            start_time: "9:00".into(),
            end_time: "10:00".into(),
            amount: 400,
        };
        assert!(req.validate(today).is_ok());
        req.end_time = "09:00:00".into();
        assert!(req.validate(today).is_err());
    }

    #[test]
    fn test_status_filter_and_date_sort() {
        let rows = vec![
            booking(14, "10:00", BookingStatus::Confirmed, 300.0),
            booking(12, "18:00:00", BookingStatus::Cancelled, 500.0),
            booking(12, "09:00", BookingStatus::Confirmed, 200.0),
        ];
        let mut q = super::super::BookingQuery::new(10);
        q.set_sort(BookingSort::DateAsc);
        let out = q.run(&rows, |b| (b.date.day0() + 1, b.time_range()));
        assert_eq!(out.rows[0].1, "09:00 - 23:00");
        assert_eq!(out.rows[2].0, 14);

        q.set_filters(BookingFilters {
            status: Some(BookingStatus::Cancelled),
        });
        let out = q.run(&rows, |b| b.total_price);
        assert_eq!(out.rows, vec![500.0]);
    }
}
