//! Slot-status derivation for the owner availability grid.
//!
//! The server reports `available`, `blocked` and (optionally) `booked`
//! windows per court and date. They are folded into one status per
//! `{courtId}-{date}-{HH:mm}` key with precedence booked > blocked >
//! available; keys nobody reported are `Unavailable`.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::aggregate::{AllSlotsResponse, BlockSlotParams, SlotWindow};
use crate::shared::time::{add_hours, normalize_time};

pub const DEFAULT_OPEN_HOUR: u32 = 6;
pub const DEFAULT_CLOSE_HOUR: u32 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey(String);

impl SlotKey {
    /// `None` when `time` is not a recognisable time of day.
    pub fn new(court_id: &Uuid, date: NaiveDate, time: &str) -> Option<Self> {
        let time = normalize_time(time)?;
        Some(Self(format!("{court_id}-{}-{time}", date.format("%Y-%m-%d"))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Booked,
    Blocked,
    Maintenance,
    Unavailable,
}

impl SlotStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SlotStatus::Available => "Available",
            SlotStatus::Booked => "Booked",
            SlotStatus::Blocked => "Blocked",
            SlotStatus::Maintenance => "Maintenance",
            SlotStatus::Unavailable => "Unavailable",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SlotStatus::Available => "slot slot--available",
            SlotStatus::Booked => "slot slot--booked",
            SlotStatus::Blocked => "slot slot--blocked",
            SlotStatus::Maintenance => "slot slot--maintenance",
            SlotStatus::Unavailable => "slot slot--unavailable",
        }
    }

    pub fn legend() -> Vec<SlotStatus> {
        vec![
            SlotStatus::Available,
            SlotStatus::Booked,
            SlotStatus::Blocked,
            SlotStatus::Maintenance,
            SlotStatus::Unavailable,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotStatusMap {
    statuses: HashMap<SlotKey, SlotStatus>,
}

impl SlotStatusMap {
    pub fn status(&self, key: &SlotKey) -> SlotStatus {
        self.statuses
            .get(key)
            .copied()
            .unwrap_or(SlotStatus::Unavailable)
    }

    pub fn status_at(&self, court_id: &Uuid, date: NaiveDate, time: &str) -> SlotStatus {
        SlotKey::new(court_id, date, time)
            .map(|key| self.status(&key))
            .unwrap_or(SlotStatus::Unavailable)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Merge another day's map; entries in `other` win.
    pub fn merge(&mut self, other: SlotStatusMap) {
        self.statuses.extend(other.statuses);
    }

    /// Drop every entry of one court and date, before merging a fresh fetch.
    pub fn clear_day(&mut self, court_id: &Uuid, date: NaiveDate) {
        let prefix = format!("{court_id}-{}-", date.format("%Y-%m-%d"));
        self.statuses.retain(|k, _| !k.as_str().starts_with(&prefix));
    }

    pub fn count(&self, status: SlotStatus) -> usize {
        self.statuses.values().filter(|s| **s == status).count()
    }

    fn mark(&mut self, court_id: &Uuid, date: NaiveDate, windows: &[SlotWindow], status: SlotStatus) {
        for window in windows {
            for start in window.hour_starts() {
                if let Some(key) = SlotKey::new(court_id, date, &start) {
                    self.statuses.insert(key, status);
                }
            }
        }
    }
}

/// Fold one court/date response plus an extra booking feed into a status map.
pub fn derive_status_map(
    court_id: &Uuid,
    date: NaiveDate,
    slots: &AllSlotsResponse,
    booked: &[SlotWindow],
) -> SlotStatusMap {
    let mut map = SlotStatusMap::default();
    map.mark(court_id, date, &slots.available, SlotStatus::Available);
    map.mark(court_id, date, &slots.blocked, SlotStatus::Blocked);
    map.mark(court_id, date, &slots.booked, SlotStatus::Booked);
    map.mark(court_id, date, booked, SlotStatus::Booked);
    map
}

/// Hourly row labels from `open_hour` (inclusive) to `close_hour` (exclusive).
pub fn grid_times(open_hour: u32, close_hour: u32) -> Vec<String> {
    (open_hour..close_hour.min(24))
        .map(|h| format!("{h:02}:00"))
        .collect()
}

/// The Sunday-first week containing `anchor`.
pub fn week_dates(anchor: NaiveDate) -> Vec<NaiveDate> {
    let back = anchor.weekday().num_days_from_sunday() as i64;
    let start = anchor - Duration::days(back);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToggleAction {
    Block,
    Unblock,
}

impl ToggleAction {
    pub fn verb(&self) -> &'static str {
        match self {
            ToggleAction::Block => "block",
            ToggleAction::Unblock => "unblock",
        }
    }

    pub fn target(&self) -> SlotStatus {
        match self {
            ToggleAction::Block => SlotStatus::Blocked,
            ToggleAction::Unblock => SlotStatus::Available,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToggleError {
    #[error("slot is booked and cannot be changed")]
    Booked,
    #[error("slot is under maintenance")]
    Maintenance,
    #[error("slot is outside the court's bookable hours")]
    Unavailable,
}

/// Which request a click on a slot in `status` should issue.
pub fn plan_toggle(status: SlotStatus) -> Result<ToggleAction, ToggleError> {
    match status {
        SlotStatus::Available => Ok(ToggleAction::Block),
        SlotStatus::Blocked => Ok(ToggleAction::Unblock),
        SlotStatus::Booked => Err(ToggleError::Booked),
        SlotStatus::Maintenance => Err(ToggleError::Maintenance),
        SlotStatus::Unavailable => Err(ToggleError::Unavailable),
    }
}

/// One hour-long slot addressed by court, date and start time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotRef {
    pub court_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
}

impl SlotRef {
    pub fn new(court_id: Uuid, date: NaiveDate, start_time: &str) -> Self {
        Self {
            court_id,
            date,
            start_time: normalize_time(start_time).unwrap_or_else(|| start_time.to_string()),
        }
    }

    pub fn key(&self) -> Option<SlotKey> {
        SlotKey::new(&self.court_id, self.date, &self.start_time)
    }

    pub fn end_time(&self) -> Option<String> {
        add_hours(&self.start_time, 1)
    }

    pub fn params(&self) -> Option<BlockSlotParams> {
        Some(BlockSlotParams {
            date: self.date,
            start_time: normalize_time(&self.start_time)?,
            end_time: self.end_time()?,
        })
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.date.format("%a %d %b"), self.start_time)
    }
}

/// Selected slots partitioned before any request is sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkPlan {
    pub requests: Vec<SlotRef>,
    /// Already in the target state.
    pub skipped: Vec<SlotRef>,
    pub rejected: Vec<(SlotRef, ToggleError)>,
}

pub fn plan_bulk(action: ToggleAction, slots: &[(SlotRef, SlotStatus)]) -> BulkPlan {
    let mut plan = BulkPlan::default();
    for (slot, status) in slots {
        match plan_toggle(*status) {
            Ok(a) if a == action => plan.requests.push(slot.clone()),
            Ok(_) => plan.skipped.push(slot.clone()),
            Err(e) => plan.rejected.push((slot.clone(), e)),
        }
    }
    plan
}

/// Per-slot result of a bulk block/unblock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: Vec<SlotRef>,
    pub failed: Vec<(SlotRef, String)>,
    pub skipped: usize,
    pub rejected: Vec<(SlotRef, ToggleError)>,
}

impl BulkOutcome {
    pub fn from_plan(plan: &BulkPlan) -> Self {
        Self {
            skipped: plan.skipped.len(),
            rejected: plan.rejected.clone(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, slot: SlotRef, result: Result<(), String>) {
        match result {
            Ok(()) => self.succeeded.push(slot),
            Err(e) => self.failed.push((slot, e)),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && self.rejected.is_empty()
    }

    pub fn summary(&self, action: ToggleAction) -> String {
        let mut parts = vec![format!("{} slot(s) {}ed", self.succeeded.len(), action.verb())];
        if !self.failed.is_empty() {
            parts.push(format!("{} failed", self.failed.len()));
        }
        if !self.rejected.is_empty() {
            parts.push(format!("{} not allowed", self.rejected.len()));
        }
        if self.skipped > 0 {
            parts.push(format!("{} unchanged", self.skipped));
        }
        parts.join(", ")
    }

    /// One line per slot that did not go through.
    pub fn problems(&self) -> Vec<String> {
        self.failed
            .iter()
            .map(|(slot, e)| format!("{}: {e}", slot.label()))
            .chain(
                self.rejected
                    .iter()
                    .map(|(slot, e)| format!("{}: {e}", slot.label())),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court() -> Uuid {
        Uuid::parse_str("0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01").unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()
    }

    #[test]
    fn test_key_ignores_seconds() {
        let a = SlotKey::new(&court(), day(), "09:00:00").unwrap();
        let b = SlotKey::new(&court(), day(), "09:00").unwrap();
        let c = SlotKey::new(&court(), day(), "9:00").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "0b7a6a0c-7f43-4a57-bb19-5f6b7f8c9d01-2024-08-10-09:00");
    }

    #[test]
    fn test_blocked_overrides_available() {
        let slots = AllSlotsResponse {
            available: vec![SlotWindow::new("09:00:00", "10:00:00"), SlotWindow::new("10:00:00", "11:00:00")],
            blocked: vec![SlotWindow::new("09:00", "10:00")],
            ..Default::default()
        };
        let map = derive_status_map(&court(), day(), &slots, &[]);
        assert_eq!(map.status_at(&court(), day(), "09:00"), SlotStatus::Blocked);
        assert_eq!(map.status_at(&court(), day(), "10:00"), SlotStatus::Available);
        assert_eq!(map.status_at(&court(), day(), "11:00"), SlotStatus::Unavailable);
    }

    #[test]
    fn test_booked_overrides_everything() {
        let slots = AllSlotsResponse {
            available: vec![SlotWindow::new("18:00", "19:00")],
            blocked: vec![SlotWindow::new("18:00", "19:00")],
            ..Default::default()
        };
        let map = derive_status_map(&court(), day(), &slots, &[SlotWindow::new("18:00:00", "19:00:00")]);
        assert_eq!(map.status_at(&court(), day(), "18:00"), SlotStatus::Booked);
        assert_eq!(map.count(SlotStatus::Booked), 1);
    }

    #[test]
    fn test_booked_slot_cannot_toggle() {
        assert_eq!(plan_toggle(SlotStatus::Booked), Err(ToggleError::Booked));
        assert_eq!(plan_toggle(SlotStatus::Available), Ok(ToggleAction::Block));
        assert_eq!(plan_toggle(SlotStatus::Blocked), Ok(ToggleAction::Unblock));
        assert_eq!(plan_toggle(SlotStatus::Maintenance), Err(ToggleError::Maintenance));

        let booked = SlotRef::new(court(), day(), "18:00");
        let plan = plan_bulk(ToggleAction::Unblock, &[(booked.clone(), SlotStatus::Booked)]);
        assert!(plan.requests.is_empty());
        assert_eq!(plan.rejected, vec![(booked, ToggleError::Booked)]);
    }

    #[test]
    fn test_plan_bulk_partitions_selection() {
        let a = SlotRef::new(court(), day(), "06:00");
        let b = SlotRef::new(court(), day(), "07:00");
        let c = SlotRef::new(court(), day(), "08:00");
        let plan = plan_bulk(
            ToggleAction::Block,
            &[
                (a.clone(), SlotStatus::Available),
                (b.clone(), SlotStatus::Blocked),
                (c.clone(), SlotStatus::Unavailable),
            ],
        );
        assert_eq!(plan.requests, vec![a.clone()]);
        assert_eq!(plan.skipped, vec![b]);
        assert_eq!(plan.rejected.len(), 1);

        let mut outcome = BulkOutcome::from_plan(&plan);
        outcome.record(a, Err("HTTP 500".into()));
        assert!(!outcome.is_clean());
        assert_eq!(outcome.summary(ToggleAction::Block), "0 slot(s) blocked, 1 failed, 1 not allowed, 1 unchanged");
        assert_eq!(outcome.problems().len(), 2);
    }

    #[test]
    fn test_slot_params_end_one_hour_later() {
        let slot = SlotRef::new(court(), day(), "9:00:00");
        let p = slot.params().unwrap();
        assert_eq!(p.start_time, "09:00");
        assert_eq!(p.end_time, "10:00");
    }

    #[test]
    fn test_grid_and_week() {
        let times = grid_times(DEFAULT_OPEN_HOUR, DEFAULT_CLOSE_HOUR);
        assert_eq!(times.len(), 16);
        assert_eq!(times.first().map(String::as_str), Some("06:00"));
        assert_eq!(times.last().map(String::as_str), Some("21:00"));

        // 2024-08-10 is a Saturday
        let week = week_dates(day());
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 8, 4).unwrap());
        assert_eq!(week[6], day());
    }

    #[test]
    fn test_clear_day_before_refetch() {
        let slots = AllSlotsResponse {
            available: vec![SlotWindow::new("06:00", "08:00")],
            ..Default::default()
        };
        let mut map = derive_status_map(&court(), day(), &slots, &[]);
        let next = day().succ_opt().unwrap();
        map.merge(derive_status_map(&court(), next, &slots, &[]));
        assert_eq!(map.len(), 4);
        map.clear_day(&court(), day());
        assert_eq!(map.len(), 2);
    }
}
