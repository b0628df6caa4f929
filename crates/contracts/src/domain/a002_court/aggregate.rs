use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::Sport;
use crate::shared::query::Record;
use crate::shared::time::{hour_of, normalize_time, parse_time};

/// A bookable court inside a facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
    pub id: Uuid,
    #[serde(default)]
    pub facility_id: Option<Uuid>,
    pub name: String,
    pub sport_type: Sport,
    #[serde(default)]
    pub price_per_hour: f64,
    #[serde(default)]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub closing_time: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl CourtResponse {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    /// Opening and closing hour, when both are known and well-formed.
    pub fn hours(&self) -> Option<(u32, u32)> {
        let open = hour_of(self.opening_time.as_deref()?)?;
        let close = hour_of(self.closing_time.as_deref()?)?;
        (open < close).then_some((open, close))
    }

    pub fn hours_label(&self) -> String {
        let open = self.opening_time.as_deref().and_then(normalize_time);
        let close = self.closing_time.as_deref().and_then(normalize_time);
        match (open, close) {
            (Some(o), Some(c)) => format!("{o} - {c}"),
            _ => "-".to_string(),
        }
    }
}

impl Record for CourtResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

/// Body of `POST /owner/facilities/{id}/courts` and `PUT /owner/courts/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtRequest {
    pub name: String,
    pub sport_type: Sport,
    pub price_per_hour: f64,
    pub opening_time: String,
    pub closing_time: String,
}

impl Default for CourtRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            sport_type: Sport::Badminton,
            price_per_hour: 0.0,
            opening_time: "06:00".to_string(),
            closing_time: "22:00".to_string(),
        }
    }
}

impl CourtRequest {
    /// Checks required fields and normalises both times to `HH:mm`.
    pub fn validated(mut self) -> Result<Self, String> {
        if self.name.trim().is_empty() {
            return Err("Court name is required".into());
        }
        if !(self.price_per_hour > 0.0) {
            return Err("Price per hour must be greater than zero".into());
        }
        let open = parse_time(&self.opening_time).ok_or("Invalid opening time")?;
        let close = parse_time(&self.closing_time).ok_or("Invalid closing time")?;
        if open >= close {
            return Err("Closing time must be after opening time".into());
        }
        self.name = self.name.trim().to_string();
        self.opening_time = normalize_time(&self.opening_time).unwrap_or_default();
        self.closing_time = normalize_time(&self.closing_time).unwrap_or_default();
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_court_hours_from_server_times() {
        let json = r#"{
            "id": "0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01",
            "facilityId": "6f1c1b3e-8e4a-4c1e-9a55-0d6c1f1b2a10",
            "name": "Court 1",
            "sportType": "BADMINTON",
            "pricePerHour": 400.0,
            "openingTime": "06:00:00",
            "closingTime": "22:00:00",
            "active": true
        }"#;
        let court: CourtResponse = serde_json::from_str(json).unwrap();
        assert_eq!(court.hours(), Some((6, 22)));
        assert_eq!(court.hours_label(), "06:00 - 22:00");
        assert!(court.is_active());
    }

    #[test]
    fn test_court_request_validation() {
        let ok = CourtRequest {
            name: " Court A ".into(),
            price_per_hour: 350.0,
            opening_time: "7:00".into(),
            closing_time: "21:00:00".into(),
            ..Default::default()
        }
        .validated()
        .unwrap();
        assert_eq!(ok.name, "Court A");
        assert_eq!(ok.opening_time, "07:00");
        assert_eq!(ok.closing_time, "21:00");

        let inverted = CourtRequest {
            name: "B".into(),
            price_per_hour: 100.0,
            opening_time: "22:00".into(),
            closing_time: "06:00".into(),
            ..Default::default()
        };
        assert!(inverted.validated().is_err());

        let free = CourtRequest {
            name: "C".into(),
            ..Default::default()
        };
        assert!(free.validated().is_err());
    }
}
