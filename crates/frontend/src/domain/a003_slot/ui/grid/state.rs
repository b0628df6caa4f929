use chrono::{Duration, NaiveDate};
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a003_slot::availability::{DEFAULT_CLOSE_HOUR, DEFAULT_OPEN_HOUR};
use contracts::domain::a003_slot::{grid_times, week_dates, SlotRef, SlotStatus, SlotStatusMap};
use leptos::prelude::*;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct GridState {
    pub court: Option<CourtResponse>,
    /// Any day inside the displayed week.
    pub anchor: NaiveDate,
    pub statuses: SlotStatusMap,
    /// Slots picked for a bulk action, in click order.
    pub selected: Vec<SlotRef>,
}

impl GridState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            court: None,
            anchor: today,
            statuses: SlotStatusMap::default(),
            selected: Vec::new(),
        }
    }

    pub fn court_id(&self) -> Option<Uuid> {
        self.court.as_ref().map(|c| c.id)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        week_dates(self.anchor)
    }

    /// Hour rows for the selected court, falling back to the default day.
    pub fn times(&self) -> Vec<String> {
        let (open, close) = self
            .court
            .as_ref()
            .and_then(CourtResponse::hours)
            .unwrap_or((DEFAULT_OPEN_HOUR, DEFAULT_CLOSE_HOUR));
        grid_times(open, close)
    }

    pub fn status_of(&self, slot: &SlotRef) -> SlotStatus {
        self.statuses.status_at(&slot.court_id, slot.date, &slot.start_time)
    }

    /// Switching court or week drops the loaded statuses and the selection.
    pub fn select_court(&mut self, court: Option<CourtResponse>) {
        self.court = court;
        self.reset();
    }

    pub fn shift_week(&mut self, weeks: i64) {
        self.anchor += Duration::weeks(weeks);
        self.reset();
    }

    pub fn is_selected(&self, slot: &SlotRef) -> bool {
        self.selected.contains(slot)
    }

    pub fn toggle_selected(&mut self, slot: SlotRef) {
        if let Some(pos) = self.selected.iter().position(|s| *s == slot) {
            self.selected.remove(pos);
        } else {
            self.selected.push(slot);
        }
    }

    /// The selection paired with each slot's current status.
    pub fn selection_with_status(&self) -> Vec<(SlotRef, SlotStatus)> {
        self.selected
            .iter()
            .map(|slot| (slot.clone(), self.status_of(slot)))
            .collect()
    }

    fn reset(&mut self) {
        self.statuses = SlotStatusMap::default();
        self.selected.clear();
    }
}

pub fn create_state(today: NaiveDate) -> RwSignal<GridState> {
    RwSignal::new(GridState::new(today))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a003_slot::{derive_status_map, AllSlotsResponse, SlotWindow};
    use contracts::enums::Sport;

    fn court(open: Option<&str>, close: Option<&str>) -> CourtResponse {
        CourtResponse {
            id: Uuid::from_u128(7),
            facility_id: None,
            name: "Court 1".into(),
            sport_type: Sport::Badminton,
            price_per_hour: 400.0,
            opening_time: open.map(str::to_string),
            closing_time: close.map(str::to_string),
            active: Some(true),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, d).unwrap()
    }

    #[test]
    fn test_times_follow_court_hours() {
        let mut state = GridState::new(day(7));
        assert_eq!(state.times().len(), 16);
        assert_eq!(state.times().first().map(String::as_str), Some("06:00"));

        state.select_court(Some(court(Some("08:00:00"), Some("12:00:00"))));
        assert_eq!(state.times(), vec!["08:00", "09:00", "10:00", "11:00"]);

        state.select_court(Some(court(None, Some("12:00"))));
        assert_eq!(state.times().len(), 16);
    }

    #[test]
    fn test_selection_toggles_and_resets() {
        let mut state = GridState::new(day(7));
        state.select_court(Some(court(None, None)));
        let id = Uuid::from_u128(7);
        let slot = SlotRef::new(id, day(7), "09:00:00");

        state.toggle_selected(slot.clone());
        assert!(state.is_selected(&SlotRef::new(id, day(7), "09:00")));
        state.toggle_selected(slot.clone());
        assert!(state.selected.is_empty());

        state.toggle_selected(slot);
        state.shift_week(1);
        assert!(state.selected.is_empty());
        assert_eq!(state.anchor, day(14));
    }

    #[test]
    fn test_selection_carries_status() {
        let id = Uuid::from_u128(7);
        let mut state = GridState::new(day(7));
        state.select_court(Some(court(None, None)));
        let slots = AllSlotsResponse {
            available: vec![SlotWindow::new("09:00:00", "10:00:00")],
            blocked: vec![SlotWindow::new("10:00:00", "11:00:00")],
            ..Default::default()
        };
        state.statuses.merge(derive_status_map(&id, day(7), &slots, &[]));

        state.toggle_selected(SlotRef::new(id, day(7), "09:00"));
        state.toggle_selected(SlotRef::new(id, day(7), "10:00"));
        state.toggle_selected(SlotRef::new(id, day(7), "20:00"));
        let statuses: Vec<SlotStatus> =
            state.selection_with_status().into_iter().map(|(_, s)| s).collect();
        assert_eq!(
            statuses,
            vec![SlotStatus::Available, SlotStatus::Blocked, SlotStatus::Unavailable]
        );
    }
}
