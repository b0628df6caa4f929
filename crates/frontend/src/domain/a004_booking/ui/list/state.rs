use chrono::NaiveDate;
use contracts::domain::a004_booking::{
    BookingQuery, BookingResponse, BookingStatus, DateRangeParams, SearchParams,
};
use contracts::shared::page::PageEnvelope;
use leptos::prelude::*;
use uuid::Uuid;

use crate::shared::export::CsvExportable;

/// Which endpoint serves the list.
#[derive(Clone, Debug, PartialEq)]
pub enum FetchMode {
    All,
    Search(SearchParams),
    Range(DateRangeParams),
}

#[derive(Clone, Debug)]
pub struct BookingListState {
    /// Status filter and sort over the loaded page.
    pub query: BookingQuery,
    pub search: String,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Zero-based, as on the wire.
    pub server_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub rows: Vec<BookingResponse>,
    pub is_loaded: bool,
}

impl BookingListState {
    pub fn new(page_size: u32) -> Self {
        Self {
            query: BookingQuery::new(page_size as usize),
            search: String::new(),
            date_from: None,
            date_to: None,
            server_page: 0,
            page_size,
            total_pages: 0,
            total_count: 0,
            rows: Vec::new(),
            is_loaded: false,
        }
    }

    /// Search text wins over the date range; a half-set range is ignored.
    pub fn fetch_mode(&self) -> FetchMode {
        let q = self.search.trim();
        if !q.is_empty() {
            return FetchMode::Search(SearchParams {
                q: q.to_string(),
                page: self.server_page,
                size: self.page_size,
            });
        }
        match (self.date_from, self.date_to) {
            (Some(start_date), Some(end_date)) => FetchMode::Range(DateRangeParams {
                start_date,
                end_date,
                page: self.server_page,
                size: self.page_size,
            }),
            _ => FetchMode::All,
        }
    }

    /// New search or range: back to the first server page.
    pub fn restart(&mut self) {
        self.server_page = 0;
    }

    pub fn apply_page(&mut self, envelope: PageEnvelope<BookingResponse>) {
        self.server_page = envelope.number;
        self.total_pages = envelope.total_pages;
        self.total_count = envelope.total_elements;
        self.rows = envelope.content;
        self.is_loaded = true;
    }

    /// Cancelled bookings stay in the list with their new status.
    pub fn mark_cancelled(&mut self, id: &Uuid) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.id == *id) {
            row.status = BookingStatus::Cancelled;
        }
    }
}

pub fn create_state(page_size: u32) -> RwSignal<BookingListState> {
    RwSignal::new(BookingListState::new(page_size))
}

impl CsvExportable for BookingResponse {
    fn headers() -> Vec<&'static str> {
        vec!["Booking ID", "Facility", "Court", "Sport", "Date", "Time", "Status", "Amount", "Currency"]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.facility_name.clone(),
            self.court_name.clone(),
            self.sport_type.clone().unwrap_or_default(),
            self.date.format("%Y-%m-%d").to_string(),
            self.time_range(),
            self.status.display_name().to_string(),
            format!("{:.2}", self.total_price),
            self.currency.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    fn booking(status: BookingStatus) -> BookingResponse {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::from_u128(9).to_string(),
            "courtId": Uuid::from_u128(3).to_string(),
            "facilityName": "Smash, Arena",
            "courtName": "Court 1",
            "date": "2024-08-10",
            "startTime": "18:00:00",
            "endTime": "19:00:00",
            "totalPrice": 450.0,
            "status": status.code(),
        }))
        .unwrap()
    }

    #[test]
    fn test_fetch_mode_precedence() {
        let mut state = BookingListState::new(10);
        assert_eq!(state.fetch_mode(), FetchMode::All);

        state.date_from = Some(day(1));
        assert_eq!(state.fetch_mode(), FetchMode::All);
        state.date_to = Some(day(31));
        state.server_page = 2;
        match state.fetch_mode() {
            FetchMode::Range(p) => {
                assert_eq!((p.start_date, p.end_date, p.page, p.size), (day(1), day(31), 2, 10));
            }
            other => panic!("expected range, got {other:?}"),
        }

        state.search = "  smash ".into();
        state.restart();
        assert_eq!(
            state.fetch_mode(),
            FetchMode::Search(SearchParams {
                q: "smash".into(),
                page: 0,
                size: 10
            })
        );
    }

    #[test]
    fn test_apply_page_and_cancel() {
        let mut state = BookingListState::new(10);
        state.apply_page(PageEnvelope {
            content: vec![booking(BookingStatus::Confirmed)],
            total_pages: 3,
            total_elements: 21,
            number: 1,
            last: Some(false),
        });
        assert_eq!((state.server_page, state.total_pages, state.total_count), (1, 3, 21));
        state.mark_cancelled(&Uuid::from_u128(9));
        assert_eq!(state.rows[0].status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_csv_row() {
        let row = booking(BookingStatus::Pending).to_csv_row();
        assert_eq!(row.len(), BookingResponse::headers().len());
        assert_eq!(row[1], "Smash, Arena");
        assert_eq!(row[5], "18:00 - 19:00");
        assert_eq!(row[7], "450.00");
        assert_eq!(row[8], "INR");
    }
}
