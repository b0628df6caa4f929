use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::enums::DayOfWeek;
use crate::shared::query::Record;
use crate::shared::time::{normalize_time, parse_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    PeakHours,
    Weekend,
    Seasonal,
    Holiday,
    BulkBooking,
    EarlyBird,
    LateNight,
}

impl RuleType {
    pub fn all() -> Vec<RuleType> {
        vec![
            RuleType::PeakHours,
            RuleType::Weekend,
            RuleType::Seasonal,
            RuleType::Holiday,
            RuleType::BulkBooking,
            RuleType::EarlyBird,
            RuleType::LateNight,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            RuleType::PeakHours => "PEAK_HOURS",
            RuleType::Weekend => "WEEKEND",
            RuleType::Seasonal => "SEASONAL",
            RuleType::Holiday => "HOLIDAY",
            RuleType::BulkBooking => "BULK_BOOKING",
            RuleType::EarlyBird => "EARLY_BIRD",
            RuleType::LateNight => "LATE_NIGHT",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RuleType::PeakHours => "Peak Hours",
            RuleType::Weekend => "Weekend",
            RuleType::Seasonal => "Seasonal",
            RuleType::Holiday => "Holiday",
            RuleType::BulkBooking => "Bulk Booking",
            RuleType::EarlyBird => "Early Bird",
            RuleType::LateNight => "Late Night",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        RuleType::all().into_iter().find(|t| t.code() == code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdjustmentType {
    Percentage,
    FixedAmount,
}

impl AdjustmentType {
    pub fn code(&self) -> &'static str {
        match self {
            AdjustmentType::Percentage => "PERCENTAGE",
            AdjustmentType::FixedAmount => "FIXED_AMOUNT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PERCENTAGE" => Some(AdjustmentType::Percentage),
            "FIXED_AMOUNT" => Some(AdjustmentType::FixedAmount),
            _ => None,
        }
    }

    pub fn format_value(&self, value: f64) -> String {
        match self {
            AdjustmentType::Percentage => format!("{value:+}%"),
            AdjustmentType::FixedAmount if value < 0.0 => format!("-₹{:.0}", value.abs()),
            AdjustmentType::FixedAmount => format!("+₹{value:.0}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleResponse {
    pub id: Uuid,
    #[serde(default)]
    pub facility_id: Option<Uuid>,
    pub court_id: Uuid,
    #[serde(default)]
    pub court_name: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub adjustment_type: AdjustmentType,
    pub adjustment_value: f64,
    #[serde(default)]
    pub applicable_days: Vec<DayOfWeek>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl PricingRuleResponse {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }

    pub fn adjustment_label(&self) -> String {
        self.adjustment_type.format_value(self.adjustment_value)
    }

    /// Human summary of when the rule applies, e.g. `Sat, Sun 18:00-22:00`.
    pub fn schedule_label(&self) -> String {
        let mut parts = Vec::new();
        if !self.applicable_days.is_empty() && self.applicable_days.len() < 7 {
            parts.push(
                self.applicable_days
                    .iter()
                    .map(DayOfWeek::short_name)
                    .collect::<Vec<_>>()
                    .join(", "),
            );
        }
        let start = self.start_time.as_deref().and_then(normalize_time);
        let end = self.end_time.as_deref().and_then(normalize_time);
        if let (Some(s), Some(e)) = (start, end) {
            parts.push(format!("{s}-{e}"));
        }
        match (self.start_date, self.end_date) {
            (Some(s), Some(e)) => parts.push(format!("{} to {}", s.format("%d %b %Y"), e.format("%d %b %Y"))),
            (Some(s), None) => parts.push(format!("from {}", s.format("%d %b %Y"))),
            (None, Some(e)) => parts.push(format!("until {}", e.format("%d %b %Y"))),
            (None, None) => {}
        }
        if parts.is_empty() {
            "Always".to_string()
        } else {
            parts.join(" · ")
        }
    }

    /// Request body that recreates this rule, for editing.
    pub fn to_request(&self) -> PricingRuleRequest {
        PricingRuleRequest {
            court_id: self.court_id,
            name: self.name.clone(),
            rule_type: self.rule_type,
            adjustment_type: self.adjustment_type,
            adjustment_value: self.adjustment_value,
            applicable_days: self.applicable_days.clone(),
            start_time: self.start_time.as_deref().and_then(normalize_time),
            end_time: self.end_time.as_deref().and_then(normalize_time),
            start_date: self.start_date,
            end_date: self.end_date,
            active: self.is_active(),
            priority: self.priority,
        }
    }
}

impl Record for PricingRuleResponse {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

/// Body of `POST /owner/pricing-rules` and `PUT /owner/pricing-rules/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRuleRequest {
    pub court_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub adjustment_type: AdjustmentType,
    pub adjustment_value: f64,
    pub applicable_days: Vec<DayOfWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
}

impl PricingRuleRequest {
    pub fn new(court_id: Uuid) -> Self {
        Self {
            court_id,
            name: String::new(),
            rule_type: RuleType::PeakHours,
            adjustment_type: AdjustmentType::Percentage,
            adjustment_value: 0.0,
            applicable_days: Vec::new(),
            start_time: None,
            end_time: None,
            start_date: None,
            end_date: None,
            active: true,
            priority: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Rule name is required".into());
        }
        if !self.adjustment_value.is_finite() || self.adjustment_value == 0.0 {
            return Err("Adjustment value must be a non-zero number".into());
        }
        if self.adjustment_type == AdjustmentType::Percentage && self.adjustment_value <= -100.0 {
            return Err("A percentage discount must be above -100%".into());
        }
        match (self.start_time.as_deref(), self.end_time.as_deref()) {
            (Some(s), Some(e)) => {
                let s = parse_time(s).ok_or("Invalid start time")?;
                let e = parse_time(e).ok_or("Invalid end time")?;
                if e <= s {
                    return Err("End time must be after start time".into());
                }
            }
            (None, None) => {}
            _ => return Err("Set both start and end time, or neither".into()),
        }
        if let (Some(s), Some(e)) = (self.start_date, self.end_date) {
            if e < s {
                return Err("End date must not be before start date".into());
            }
        }
        Ok(())
    }
}

/// `GET /owner/pricing-rules/calculate-price`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuoteParams {
    pub court_id: Uuid,
    pub date: NaiveDate,
    pub time: String,
    pub duration_hours: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekend_rule() -> PricingRuleResponse {
        serde_json::from_str(
            r#"{
                "id": "1e2d3c4b-5a69-4788-9aab-bccddeeff001",
                "courtId": "0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01",
                "name": "Weekend evenings",
                "type": "WEEKEND",
                "adjustmentType": "PERCENTAGE",
                "adjustmentValue": 20,
                "applicableDays": ["SATURDAY", "SUNDAY"],
                "startTime": "18:00:00",
                "endTime": "22:00:00",
                "active": true,
                "priority": 1
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_rule_labels() {
        let rule = weekend_rule();
        assert_eq!(rule.rule_type, RuleType::Weekend);
        assert_eq!(rule.adjustment_label(), "+20%");
        assert_eq!(rule.schedule_label(), "Sat, Sun · 18:00-22:00");
    }

    #[test]
    fn test_to_request_round_trips_for_edit() {
        let req = weekend_rule().to_request();
        assert_eq!(req.start_time.as_deref(), Some("18:00"));
        assert!(req.active);
        assert!(req.validate().is_ok());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "WEEKEND");
        assert!(json.get("startDate").is_none());
    }

    #[test]
    fn test_validation() {
        let mut req = PricingRuleRequest::new(Uuid::nil());
        req.name = "Late".into();
        assert!(req.validate().is_err());
        req.adjustment_value = -10.0;
        assert!(req.validate().is_ok());
        req.start_time = Some("22:00".into());
        assert!(req.validate().is_err());
        req.end_time = Some("21:00".into());
        assert!(req.validate().is_err());
        req.end_time = Some("23:00".into());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_fixed_amount_label() {
        assert_eq!(AdjustmentType::FixedAmount.format_value(-50.0), "-₹50");
        assert_eq!(AdjustmentType::FixedAmount.format_value(75.0), "+₹75");
    }
}
