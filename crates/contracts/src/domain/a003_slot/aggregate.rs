use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::time::{format_hm, parse_time};

/// A time window as reported by the slot endpoints. Times may carry seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindow {
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl SlotWindow {
    pub fn new(start: &str, end: &str) -> Self {
        Self {
            start_time: start.to_string(),
            end_time: Some(end.to_string()),
        }
    }

    /// Hourly start times covered by the window, as `HH:mm`.
    ///
    /// A window without a usable end covers only its start.
    pub fn hour_starts(&self) -> Vec<String> {
        let Some(start) = parse_time(&self.start_time) else {
            return Vec::new();
        };
        let end = self.end_time.as_deref().and_then(parse_time);
        let mut out = vec![format_hm(&start)];
        if let Some(end) = end {
            let mut next = start + chrono::Duration::hours(1);
            while next < end && next > start {
                out.push(format_hm(&next));
                next += chrono::Duration::hours(1);
            }
        }
        out
    }
}

/// `GET /api/courts/{courtId}/all-slots?date=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllSlotsResponse {
    #[serde(default)]
    pub available: Vec<SlotWindow>,
    #[serde(default)]
    pub blocked: Vec<SlotWindow>,
    #[serde(default)]
    pub booked: Vec<SlotWindow>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub court_id: Option<Uuid>,
}

/// Query string of the block/unblock endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSlotParams {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotDateParams {
    pub date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_slots() {
        let json = r#"{
            "available": [{"startTime": "09:00:00", "endTime": "10:00:00"}],
            "blocked": [{"startTime": "10:00", "endTime": "11:00"}],
            "date": "2024-08-10",
            "courtId": "0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01"
        }"#;
        let r: AllSlotsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.available.len(), 1);
        assert!(r.booked.is_empty());
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 8, 10));
    }

    #[test]
    fn test_hour_starts_expand_long_windows() {
        assert_eq!(SlotWindow::new("09:00:00", "12:00:00").hour_starts(), vec!["09:00", "10:00", "11:00"]);
        assert_eq!(SlotWindow::new("9:00", "10:00").hour_starts(), vec!["09:00"]);
        let open = SlotWindow {
            start_time: "18:00".into(),
            end_time: None,
        };
        assert_eq!(open.hour_starts(), vec!["18:00"]);
        assert!(SlotWindow::new("bad", "10:00").hour_starts().is_empty());
    }
}
