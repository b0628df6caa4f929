mod state;

use contracts::domain::a001_facility::FacilityResponse;
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a003_slot::{
    derive_status_map, plan_bulk, plan_toggle, BulkOutcome, SlotRef, SlotStatus, SlotStatusMap,
    ToggleAction,
};
use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a001_facility::api as facility_api;
use crate::domain::a002_court::api as court_api;
use crate::domain::a003_slot::api;
use crate::layout::{use_modal, ConfirmRequest};
use crate::shared::api_utils::{use_scoped_api, ApiClient, ApiError, RequestSequencer};
use crate::shared::date_utils::{format_day, today};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_PLANNER;
use crate::shared::toast::{notify_api_error, use_notifications};
use state::create_state;

async fn send(api: &ApiClient, action: ToggleAction, slot: &SlotRef) -> Result<(), ApiError> {
    match action {
        ToggleAction::Block => api::block_slot(api, slot).await,
        ToggleAction::Unblock => api::unblock_slot(api, slot).await,
    }
}

/// Owner view of one court's week: click a slot to block or unblock it,
/// or pick several and apply a bulk action.
#[component]
pub fn AvailabilityGrid() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let modal = use_modal();
    let sequencer = RequestSequencer::new();

    let state = create_state(today());
    let facilities = RwSignal::new(Vec::<FacilityResponse>::new());
    let facility_id = RwSignal::new(Option::<Uuid>::None);
    let courts = RwSignal::new(Vec::<CourtResponse>::new());
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);

    // Every day of the week is fetched and folded into one map; only the
    // newest load may replace the grid.
    let api_week = api.clone();
    let load_week = move || {
        let Some(court_id) = state.with_untracked(|s| s.court_id()) else {
            return;
        };
        let dates = state.with_untracked(|s| s.dates());
        let api = api_week.clone();
        let sequencer = sequencer.clone();
        let ticket = sequencer.issue();
        loading.set(true);
        spawn_local(async move {
            let mut merged = SlotStatusMap::default();
            let mut failure = None;
            for date in dates {
                match api::fetch_all_slots(&api, &court_id, date).await {
                    Ok(slots) => merged.merge(derive_status_map(&court_id, date, &slots, &[])),
                    Err(e) => {
                        failure = Some(e);
                        break;
                    }
                }
            }
            if !sequencer.is_latest(ticket) {
                log::debug!("dropping stale availability for court {court_id}");
                return;
            }
            match failure {
                Some(e) => notify_api_error(notifications, "Load availability", &e),
                None => state.update(|s| s.statuses = merged),
            }
            loading.set(false);
        });
    };
    let load_week = StoredValue::new(load_week);

    let api_courts = api.clone();
    let load_courts = move |facility: Uuid| {
        let api = api_courts.clone();
        spawn_local(async move {
            match court_api::fetch_facility_courts(&api, &facility).await {
                Ok(list) => {
                    let first = list.iter().find(|c| c.is_active()).cloned();
                    courts.set(list);
                    state.update(|s| s.select_court(first));
                    load_week.with_value(|f| f());
                }
                Err(e) => notify_api_error(notifications, "Load courts", &e),
            }
        });
    };
    let load_courts = StoredValue::new(load_courts);

    let api_facilities = api.clone();
    spawn_local(async move {
        match facility_api::fetch_owner_facilities(&api_facilities).await {
            Ok(list) => {
                let first = list.first().map(|f| f.id);
                facilities.set(list);
                if let Some(id) = first {
                    facility_id.set(Some(id));
                    load_courts.with_value(|f| f(id));
                }
            }
            Err(e) => notify_api_error(notifications, "Load facilities", &e),
        }
    });

    let on_facility_change = move |ev| {
        let Ok(id) = Uuid::parse_str(&event_target_value(&ev)) else {
            return;
        };
        facility_id.set(Some(id));
        courts.set(Vec::new());
        state.update(|s| s.select_court(None));
        load_courts.with_value(|f| f(id));
    };

    let on_court_change = move |ev| {
        let value = event_target_value(&ev);
        let court = courts.with_untracked(|list| list.iter().find(|c| c.id.to_string() == value).cloned());
        state.update(|s| s.select_court(court));
        load_week.with_value(|f| f());
    };

    let shift_week = move |weeks: i64| {
        state.update(|s| s.shift_week(weeks));
        load_week.with_value(|f| f());
    };

    let api_toggle = api.clone();
    let on_slot_click = move |slot: SlotRef, multi: bool| {
        if multi {
            state.update(|s| s.toggle_selected(slot));
            return;
        }
        let status = state.with_untracked(|s| s.status_of(&slot));
        let action = match plan_toggle(status) {
            Ok(action) => action,
            Err(e) => {
                notifications.error(format!("{}: {e}", slot.label()));
                return;
            }
        };
        let api = api_toggle.clone();
        let title = match action {
            ToggleAction::Block => "Block slot",
            ToggleAction::Unblock => "Unblock slot",
        };
        let mut request = ConfirmRequest::new(
            title,
            format!("{} the slot on {}?", capitalize(action.verb()), slot.label()),
            move |_| {
                let api = api.clone();
                let slot = slot.clone();
                busy.set(true);
                spawn_local(async move {
                    match send(&api, action, &slot).await {
                        Ok(()) => {
                            notifications.success(format!("Slot {}ed", action.verb()));
                        }
                        Err(e) => notify_api_error(notifications, "Update slot", &e),
                    }
                    busy.set(false);
                    load_week.with_value(|f| f());
                });
            },
        )
        .confirm_label(capitalize(action.verb()));
        if action == ToggleAction::Block {
            request = request.danger();
        }
        modal.confirm(request);
    };
    let on_slot_click = StoredValue::new(on_slot_click);

    let api_bulk = api.clone();
    let run_bulk = move |action: ToggleAction| {
        let selection = state.with_untracked(|s| s.selection_with_status());
        if selection.is_empty() {
            return;
        }
        let plan = plan_bulk(action, &selection);
        let api = api_bulk.clone();
        busy.set(true);
        spawn_local(async move {
            let mut outcome = BulkOutcome::from_plan(&plan);
            let results = join_all(plan.requests.iter().map(|slot| send(&api, action, slot))).await;
            for (slot, result) in plan.requests.into_iter().zip(results) {
                if matches!(result, Err(ApiError::Cancelled)) {
                    log::debug!("bulk {} cancelled", action.verb());
                    return;
                }
                outcome.record(slot, result.map_err(|e| e.to_string()));
            }
            if outcome.is_clean() {
                notifications.success(outcome.summary(action));
            } else {
                notifications.error_with_details(outcome.summary(action), outcome.problems());
            }
            state.update(|s| s.selected.clear());
            busy.set(false);
            load_week.with_value(|f| f());
        });
    };
    let run_bulk = StoredValue::new(run_bulk);

    let selected_count = Signal::derive(move || state.with(|s| s.selected.len()));

    view! {
        <PageFrame page_id="a003_slot--grid" category=PAGE_CAT_PLANNER>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Availability"</h1>
                    <Show when=move || loading.get()>
                        <Badge>"Loading..."</Badge>
                    </Show>
                </div>
                <div class="page__header-right">
                    <select class="form-select" on:change=on_facility_change>
                        {move || facilities.get().into_iter().map(|f| {
                            let id = f.id;
                            view! {
                                <option value=id.to_string() selected=move || facility_id.get() == Some(id)>
                                    {f.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                    <select class="form-select" on:change=on_court_change>
                        {move || courts.get().into_iter().map(|c| {
                            let id = c.id;
                            let label = format!("{} ({})", c.name, c.sport_type.display_name());
                            view! {
                                <option
                                    value=id.to_string()
                                    disabled=!c.is_active()
                                    selected=move || state.with(|s| s.court_id() == Some(id))
                                >
                                    {label}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="page__content">
                <div class="availability-toolbar">
                    <Flex gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| shift_week(-1)>
                            {icon("chevron-left")}
                        </Button>
                        <span class="availability-toolbar__week">
                            {move || state.with(|s| {
                                let dates = s.dates();
                                match (dates.first(), dates.last()) {
                                    (Some(first), Some(last)) => format!("{} - {}", format_day(first), format_day(last)),
                                    _ => String::new(),
                                }
                            })}
                        </span>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| shift_week(1)>
                            {icon("chevron-right")}
                        </Button>
                    </Flex>
                    <Flex gap=FlexGap::Small>
                        <span class="availability-toolbar__selection">
                            {move || format!("{} selected", selected_count.get())}
                        </span>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || busy.get() || selected_count.get() == 0)
                            on_click=move |_| run_bulk.with_value(|f| f(ToggleAction::Block))
                        >
                            "Block selected"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || busy.get() || selected_count.get() == 0)
                            on_click=move |_| run_bulk.with_value(|f| f(ToggleAction::Unblock))
                        >
                            "Unblock selected"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || selected_count.get() == 0)
                            on_click=move |_| state.update(|s| s.selected.clear())
                        >
                            "Clear"
                        </Button>
                    </Flex>
                </div>

                <div class="availability-legend">
                    {SlotStatus::legend().into_iter().map(|status| view! {
                        <span class="availability-legend__item">
                            <span class=status.css_class()></span>
                            {status.label()}
                        </span>
                    }).collect_view()}
                    <span class="availability-legend__hint">"Ctrl+click to select several slots"</span>
                </div>

                <Show
                    when=move || state.with(|s| s.court.is_some())
                    fallback=|| view! { <div class="empty-state">"Select a court to see its availability."</div> }
                >
                    <table class="availability-grid">
                        <thead>
                            <tr>
                                <th></th>
                                {move || state.with(|s| s.dates()).into_iter().map(|d| view! {
                                    <th>{format_day(&d)}</th>
                                }).collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                let (court_id, dates, times) = state.with(|s| (s.court_id(), s.dates(), s.times()));
                                let Some(court_id) = court_id else {
                                    return Vec::new();
                                };
                                times.into_iter().map(|time| {
                                    let cells = dates.iter().map(|date| {
                                        let slot = SlotRef::new(court_id, *date, &time);
                                        let slot_status = slot.clone();
                                        let slot_selected = slot.clone();
                                        let status = Memo::new(move |_| state.with(|s| s.status_of(&slot_status)));
                                        view! {
                                            <td
                                                class=move || cell_class(status.get(), state.with(|s| s.is_selected(&slot_selected)))
                                                title=move || status.get().label()
                                                on:click=move |ev| {
                                                    let multi = ev.ctrl_key() || ev.meta_key();
                                                    on_slot_click.with_value(|f| f(slot.clone(), multi))
                                                }
                                            ></td>
                                        }
                                    }).collect_view();
                                    view! {
                                        <tr>
                                            <th class="availability-grid__time">{time.clone()}</th>
                                            {cells}
                                        </tr>
                                    }
                                }).collect::<Vec<_>>()
                            }}
                        </tbody>
                    </table>
                    <div class="availability-summary">
                        {move || state.with(|s| {
                            format!(
                                "{} available, {} blocked, {} booked this week",
                                s.statuses.count(SlotStatus::Available),
                                s.statuses.count(SlotStatus::Blocked),
                                s.statuses.count(SlotStatus::Booked),
                            )
                        })}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn cell_class(status: SlotStatus, selected: bool) -> String {
    let css = status.css_class();
    if selected {
        format!("{css} slot--selected")
    } else {
        css.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("block"), "Block");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_cell_class_marks_selection() {
        assert_eq!(cell_class(SlotStatus::Available, false), "slot slot--available");
        assert_eq!(cell_class(SlotStatus::Available, true), "slot slot--available slot--selected");
        assert_eq!(cell_class(SlotStatus::Booked, true), "slot slot--booked slot--selected");
    }
}
