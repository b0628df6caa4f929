use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OwnerDashboardResponse {
    pub total_bookings: u64,
    pub active_courts: u64,
    pub total_earnings: f64,
    pub today_bookings: u64,
    pub booking_trends: Vec<BookingTrendData>,
    /// Hour label to booking count.
    pub peak_hours: BTreeMap<String, u64>,
    pub facilities_stats: Vec<FacilityStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingTrendData {
    pub date: NaiveDate,
    #[serde(default)]
    pub bookings: u64,
    #[serde(default)]
    pub earnings: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FacilityStats {
    pub facility_name: String,
    pub bookings: u64,
    pub earnings: f64,
    pub rating: Option<f64>,
}

impl OwnerDashboardResponse {
    /// Busiest hours first; ties keep hour order.
    pub fn top_peak_hours(&self, n: usize) -> Vec<(&str, u64)> {
        let mut hours: Vec<(&str, u64)> = self
            .peak_hours
            .iter()
            .map(|(h, c)| (h.as_str(), *c))
            .collect();
        hours.sort_by(|a, b| b.1.cmp(&a.1));
        hours.truncate(n);
        hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_peak_hours() {
        let d: OwnerDashboardResponse = serde_json::from_str(
            r#"{"totalEarnings": 12500.5, "peakHours": {"18:00": 9, "07:00": 4, "19:00": 9}}"#,
        )
        .unwrap();
        assert_eq!(d.top_peak_hours(2), vec![("18:00", 9), ("19:00", 9)]);
        assert_eq!(d.total_earnings, 12500.5);
    }
}
