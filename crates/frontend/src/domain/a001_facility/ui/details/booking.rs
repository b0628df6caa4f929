use chrono::NaiveDate;
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a003_slot::SlotWindow;
use contracts::domain::a004_booking::BookingRequest;
use contracts::domain::a005_pricing_rule::PriceQuoteParams;
use contracts::shared::time::add_hours;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::view_model::FacilityDetailsViewModel;
use crate::domain::a003_slot::api as slot_api;
use crate::domain::a004_booking::api as booking_api;
use crate::domain::a005_pricing_rule::api as pricing_api;
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::date_utils::{parse_date_input, to_date_input, today};
use crate::shared::toast::{notify_api_error, use_notifications};

const MAX_DURATION_HOURS: u32 = 4;

/// What the player has picked so far.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingDraft {
    pub court: Option<CourtResponse>,
    pub date: NaiveDate,
    pub start_time: Option<String>,
    pub duration_hours: u32,
}

impl BookingDraft {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            court: None,
            date,
            start_time: None,
            duration_hours: 1,
        }
    }

    pub fn end_time(&self) -> Option<String> {
        add_hours(self.start_time.as_deref()?, self.duration_hours)
    }

    /// Base rate times hours, used when no quote is available.
    pub fn base_price(&self) -> Option<f64> {
        let court = self.court.as_ref()?;
        Some(court.price_per_hour * f64::from(self.duration_hours))
    }

    pub fn quote_params(&self) -> Option<PriceQuoteParams> {
        Some(PriceQuoteParams {
            court_id: self.court.as_ref()?.id,
            date: self.date,
            time: self.start_time.clone()?,
            duration_hours: self.duration_hours,
        })
    }

    pub fn request(&self, price: f64) -> Option<BookingRequest> {
        Some(BookingRequest {
            court_id: self.court.as_ref()?.id,
            date: self.date,
            start_time: self.start_time.clone()?,
            end_time: self.end_time()?,
            amount: price.round() as i64,
        })
    }

    /// A new court or date invalidates the picked time.
    pub fn reset_time(&mut self) {
        self.start_time = None;
        self.duration_hours = 1;
    }
}

/// Sorted, deduplicated hourly start times inside the available windows.
pub fn open_hours(windows: &[SlotWindow]) -> Vec<String> {
    let mut hours: Vec<String> = windows.iter().flat_map(SlotWindow::hour_starts).collect();
    hours.sort();
    hours.dedup();
    hours
}

/// How many back-to-back open hours start at `start`, capped at `cap`.
pub fn consecutive_hours(open: &[String], start: &str, cap: u32) -> u32 {
    let mut count = 0;
    let mut next = Some(start.to_string());
    while let Some(hour) = next {
        if count >= cap || !open.contains(&hour) {
            break;
        }
        count += 1;
        next = add_hours(&hour, 1);
    }
    count
}

#[component]
pub fn BookingWidget(vm: FacilityDetailsViewModel) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let slots_sequencer = RequestSequencer::new();
    let quote_sequencer = RequestSequencer::new();

    let draft = RwSignal::new(BookingDraft::new(today()));
    let open = RwSignal::new(Vec::<String>::new());
    let quote = RwSignal::new(Option::<f64>::None);
    let loading_slots = RwSignal::new(false);
    let submitting = RwSignal::new(false);

    let api_slots = api.clone();
    let load_slots = move || {
        let Some((court_id, date)) = draft.with_untracked(|d| d.court.as_ref().map(|c| (c.id, d.date))) else {
            open.set(Vec::new());
            return;
        };
        let api = api_slots.clone();
        let sequencer = slots_sequencer.clone();
        let ticket = sequencer.issue();
        loading_slots.set(true);
        spawn_local(async move {
            let result = slot_api::fetch_available_slots(&api, &court_id, date).await;
            if !sequencer.is_latest(ticket) {
                return;
            }
            match result {
                Ok(windows) => open.set(open_hours(&windows)),
                Err(e) => {
                    open.set(Vec::new());
                    notify_api_error(notifications, "Load available slots", &e);
                }
            }
            loading_slots.set(false);
        });
    };
    let load_slots = StoredValue::new(load_slots);

    // The quote follows the draft; a failed quote falls back to the base rate.
    let api_quote = api.clone();
    Effect::new(move |_| {
        let params = draft.with(BookingDraft::quote_params);
        let fallback = draft.with(BookingDraft::base_price);
        quote.set(None);
        let Some(params) = params else {
            return;
        };
        let api = api_quote.clone();
        let sequencer = quote_sequencer.clone();
        let ticket = sequencer.issue();
        spawn_local(async move {
            let result = pricing_api::quote_price(&api, &params).await;
            if !sequencer.is_latest(ticket) {
                return;
            }
            match result {
                Ok(price) if price.is_finite() && price >= 0.0 => quote.set(Some(price)),
                Ok(price) => {
                    log::warn!("ignoring price quote {price}");
                    quote.set(fallback);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    log::debug!("price quote failed, using base rate: {e}");
                    quote.set(fallback);
                }
            }
        });
    });

    let on_court = move |ev| {
        let value = event_target_value(&ev);
        let court = vm.courts.with_untracked(|c| c.iter().find(|c| c.id.to_string() == value).cloned());
        draft.update(|d| {
            d.court = court;
            d.reset_time();
        });
        load_slots.with_value(|f| f());
    };

    let on_date = move |ev| {
        let Some(date) = parse_date_input(&event_target_value(&ev)) else {
            return;
        };
        draft.update(|d| {
            d.date = date;
            d.reset_time();
        });
        load_slots.with_value(|f| f());
    };

    let max_duration = move || {
        draft.with(|d| match d.start_time.as_deref() {
            Some(start) => open.with(|o| consecutive_hours(o, start, MAX_DURATION_HOURS)),
            None => 1,
        })
    };

    let submit = move |_| {
        let Some(price) = quote.get_untracked() else {
            return;
        };
        let Some(request) = draft.with_untracked(|d| d.request(price)) else {
            notifications.error("Pick a court, date and start time");
            return;
        };
        let api = api.clone();
        submitting.set(true);
        spawn_local(async move {
            match booking_api::create_booking(&api, &request).await {
                Ok(booking) => {
                    notifications.success(format!(
                        "Booked {} on {} ({})",
                        booking.court_name,
                        booking.date.format("%d %b %Y"),
                        booking.time_range()
                    ));
                    draft.update(BookingDraft::reset_time);
                    load_slots.with_value(|f| f());
                }
                Err(e) => notify_api_error(notifications, "Booking", &e),
            }
            submitting.set(false);
        });
    };

    let can_book = Signal::derive(move || {
        !submitting.get() && quote.get().is_some() && draft.with(|d| d.end_time().is_some())
    });

    view! {
        <section class="details-section booking-widget">
            <h2 class="details-section__title">"Book a court"</h2>
            <div class="form-group">
                <label>"Court"</label>
                <select class="form-select" on:change=on_court>
                    <option value="" selected=move || draft.with(|d| d.court.is_none())>"Select a court"</option>
                    {move || vm.courts.get().into_iter().map(|c| {
                        let id = c.id;
                        view! {
                            <option value=id.to_string() selected=move || draft.with(|d| d.court.as_ref().map(|c| c.id) == Some(id))>
                                {format!("{} · {} · ₹{:.0}/hr", c.name, c.sport_type.display_name(), c.price_per_hour)}
                            </option>
                        }
                    }).collect_view()}
                </select>
            </div>
            <div class="form-group">
                <label>"Date"</label>
                <input
                    type="date"
                    min=to_date_input(&today())
                    prop:value=move || draft.with(|d| to_date_input(&d.date))
                    on:change=on_date
                />
            </div>
            <div class="form-group">
                <label>"Start time"</label>
                <div class="booking-widget__times">
                    {move || {
                        if draft.with(|d| d.court.is_none()) {
                            return view! { <span class="muted">"Select a court first"</span> }.into_any();
                        }
                        if loading_slots.get() {
                            return view! { <span class="muted">"Loading..."</span> }.into_any();
                        }
                        let hours = open.get();
                        if hours.is_empty() {
                            return view! { <span class="muted">"No free slots on this day"</span> }.into_any();
                        }
                        hours.into_iter().map(|hour| {
                            let value = hour.clone();
                            let is_picked = hour.clone();
                            view! {
                                <button
                                    class="time-chip"
                                    class:time-chip--active=move || draft.with(|d| d.start_time.as_deref() == Some(is_picked.as_str()))
                                    on:click=move |_| draft.update(|d| {
                                        d.start_time = Some(value.clone());
                                        d.duration_hours = 1;
                                    })
                                >
                                    {hour}
                                </button>
                            }
                        }).collect_view().into_any()
                    }}
                </div>
            </div>
            <div class="form-group">
                <label>"Duration"</label>
                <select
                    class="form-select"
                    on:change=move |ev| {
                        if let Ok(hours) = event_target_value(&ev).parse::<u32>() {
                            draft.update(|d| d.duration_hours = hours);
                        }
                    }
                >
                    {move || (1..=max_duration().max(1)).map(|h| view! {
                        <option value=h.to_string() selected=move || draft.with(|d| d.duration_hours == h)>
                            {format!("{h} hour(s)")}
                        </option>
                    }).collect_view()}
                </select>
            </div>
            <div class="booking-widget__total">
                <span>"Total"</span>
                <strong>
                    {move || match (quote.get(), draft.with(|d| d.end_time())) {
                        (Some(price), Some(_)) => format!("₹{:.0}", price.round()),
                        _ => "-".to_string(),
                    }}
                </strong>
            </div>
            <Button appearance=ButtonAppearance::Primary disabled=Signal::derive(move || !can_book.get()) on_click=submit>
                {move || if submitting.get() { "Booking..." } else { "Book now" }}
            </Button>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::enums::Sport;
    use uuid::Uuid;

    fn court() -> CourtResponse {
        CourtResponse {
            id: Uuid::from_u128(3),
            facility_id: None,
            name: "Court A".into(),
            sport_type: Sport::Tennis,
            price_per_hour: 450.0,
            opening_time: None,
            closing_time: None,
            active: Some(true),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 8, 10).unwrap()
    }

    #[test]
    fn test_draft_builds_request_only_when_complete() {
        let mut draft = BookingDraft::new(date());
        assert!(draft.request(450.0).is_none());
        draft.court = Some(court());
        assert!(draft.quote_params().is_none());
        draft.start_time = Some("18:00".into());
        draft.duration_hours = 2;

        assert_eq!(draft.base_price(), Some(900.0));
        let req = draft.request(1079.6).unwrap();
        assert_eq!(req.end_time, "20:00");
        assert_eq!(req.amount, 1080);
        assert!(req.validate(date()).is_ok());

        draft.reset_time();
        assert!(draft.end_time().is_none());
        assert_eq!(draft.duration_hours, 1);
    }

    #[test]
    fn test_booking_past_midnight_is_rejected() {
        let mut draft = BookingDraft::new(date());
        draft.court = Some(court());
        draft.start_time = Some("23:00".into());
        draft.duration_hours = 2;
        assert!(draft.request(900.0).is_none());
    }

    #[test]
    fn test_open_hours_and_run_length() {
        let windows = vec![
            SlotWindow::new("10:00:00", "12:00:00"),
            SlotWindow::new("09:00:00", "10:00:00"),
            SlotWindow::new("14:00", "15:00"),
            SlotWindow::new("10:00", "11:00"),
        ];
        let open = open_hours(&windows);
        assert_eq!(open, vec!["09:00", "10:00", "11:00", "14:00"]);
        assert_eq!(consecutive_hours(&open, "09:00", 4), 3);
        assert_eq!(consecutive_hours(&open, "09:00", 2), 2);
        assert_eq!(consecutive_hours(&open, "14:00", 4), 1);
        assert_eq!(consecutive_hours(&open, "13:00", 4), 0);
    }
}
