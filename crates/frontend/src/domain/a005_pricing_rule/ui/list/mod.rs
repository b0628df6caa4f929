mod rule_form;

use contracts::domain::a001_facility::FacilityResponse;
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a005_pricing_rule::PricingRuleResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a001_facility::api as facility_api;
use crate::domain::a002_court::api as court_api;
use crate::domain::a005_pricing_rule::api;
use crate::layout::{use_modal, ConfirmRequest, Modal};
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::{notify_api_error, use_notifications};
use rule_form::RuleForm;

/// Highest priority first, then by name.
fn sort_rules(rules: &mut [PricingRuleResponse]) {
    rules.sort_by(|a, b| {
        b.priority
            .unwrap_or(0)
            .cmp(&a.priority.unwrap_or(0))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn court_label(rule: &PricingRuleResponse, courts: &[CourtResponse]) -> String {
    rule.court_name
        .clone()
        .or_else(|| courts.iter().find(|c| c.id == rule.court_id).map(|c| c.name.clone()))
        .unwrap_or_else(|| "-".to_string())
}

/// Replaces a rule in place after a toggle or edit.
fn replace_rule(rules: &mut Vec<PricingRuleResponse>, updated: PricingRuleResponse) {
    match rules.iter_mut().find(|r| r.id == updated.id) {
        Some(slot) => *slot = updated,
        None => rules.push(updated),
    }
    sort_rules(rules);
}

#[component]
pub fn PricingRuleList() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let modal = use_modal();
    let rules_sequencer = RequestSequencer::new();

    let facilities = RwSignal::new(Vec::<FacilityResponse>::new());
    let facility_id = RwSignal::new(Option::<Uuid>::None);
    let courts = RwSignal::new(Vec::<CourtResponse>::new());
    let court_filter = RwSignal::new(Option::<Uuid>::None);
    let rules = RwSignal::new(Vec::<PricingRuleResponse>::new());
    let loading = RwSignal::new(false);
    let editor_open = RwSignal::new(false);
    let editing = RwSignal::new(Option::<PricingRuleResponse>::None);

    let api_rules = api.clone();
    let load_rules = move || {
        let Some(facility) = facility_id.get_untracked() else {
            rules.set(Vec::new());
            return;
        };
        let court = court_filter.get_untracked();
        let api = api_rules.clone();
        let sequencer = rules_sequencer.clone();
        let ticket = sequencer.issue();
        loading.set(true);
        spawn_local(async move {
            let result = match court {
                Some(court_id) => api::fetch_court_rules(&api, &court_id).await,
                None => api::fetch_facility_rules(&api, &facility).await,
            };
            if !sequencer.is_latest(ticket) {
                return;
            }
            match result {
                Ok(mut list) => {
                    sort_rules(&mut list);
                    rules.set(list);
                }
                Err(e) => notify_api_error(notifications, "Load pricing rules", &e),
            }
            loading.set(false);
        });
    };
    let load_rules = StoredValue::new(load_rules);

    let api_courts = api.clone();
    let select_facility = move |id: Uuid| {
        let api = api_courts.clone();
        facility_id.set(Some(id));
        court_filter.set(None);
        courts.set(Vec::new());
        load_rules.with_value(|f| f());
        spawn_local(async move {
            match court_api::fetch_facility_courts(&api, &id).await {
                Ok(list) if facility_id.get_untracked() == Some(id) => courts.set(list),
                Ok(_) => {}
                Err(e) => notify_api_error(notifications, "Load courts", &e),
            }
        });
    };
    let select_facility = StoredValue::new(select_facility);

    let api_facilities = api.clone();
    spawn_local(async move {
        match facility_api::fetch_owner_facilities(&api_facilities).await {
            Ok(list) => {
                let first = list.first().map(|f| f.id);
                facilities.set(list);
                if let Some(id) = first {
                    select_facility.with_value(|f| f(id));
                }
            }
            Err(e) => notify_api_error(notifications, "Load facilities", &e),
        }
    });

    let api_toggle = api.clone();
    let toggle = move |id: Uuid| {
        let api = api_toggle.clone();
        spawn_local(async move {
            match api::toggle_rule(&api, &id).await {
                Ok(updated) => {
                    let state = if updated.is_active() { "enabled" } else { "disabled" };
                    notifications.success(format!("{} {state}", updated.name));
                    rules.update(|list| replace_rule(list, updated));
                }
                Err(e) => notify_api_error(notifications, "Toggle rule", &e),
            }
        });
    };
    let toggle = StoredValue::new(toggle);

    let api_delete = api.clone();
    let delete = move |rule: PricingRuleResponse| {
        let api = api_delete.clone();
        let id = rule.id;
        modal.confirm(
            ConfirmRequest::new(
                "Delete pricing rule",
                format!("Delete \"{}\"? Existing bookings keep their price.", rule.name),
                move |_| {
                    let api = api.clone();
                    spawn_local(async move {
                        match api::delete_rule(&api, &id).await {
                            Ok(()) => {
                                rules.update(|list| list.retain(|r| r.id != id));
                                notifications.success("Pricing rule deleted");
                            }
                            Err(e) => notify_api_error(notifications, "Delete rule", &e),
                        }
                    });
                },
            )
            .confirm_label("Delete")
            .danger(),
        );
    };
    let delete = StoredValue::new(delete);

    let open_editor = move |rule: Option<PricingRuleResponse>| {
        editing.set(rule);
        editor_open.set(true);
    };
    let close_editor = move || {
        editor_open.set(false);
        editing.set(None);
    };
    let modal_title = Signal::derive(move || match editing.get() {
        Some(rule) => format!("Edit {}", rule.name),
        None => "New pricing rule".to_string(),
    });

    view! {
        <PageFrame page_id="a005_pricing_rule--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Pricing Rules"</h1>
                    <Badge>{move || rules.with(|r| r.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Ok(id) = Uuid::parse_str(&event_target_value(&ev)) {
                                select_facility.with_value(|f| f(id));
                            }
                        }
                    >
                        {move || facilities.get().into_iter().map(|f| {
                            let id = f.id;
                            view! {
                                <option value=id.to_string() selected=move || facility_id.get() == Some(id)>
                                    {f.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            court_filter.set(Uuid::parse_str(&event_target_value(&ev)).ok());
                            load_rules.with_value(|f| f());
                        }
                    >
                        <option value="">"All courts"</option>
                        {move || courts.get().into_iter().map(|c| {
                            let id = c.id;
                            view! {
                                <option value=id.to_string() selected=move || court_filter.get() == Some(id)>
                                    {c.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load_rules.with_value(|f| f())>
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || courts.with(Vec::is_empty))
                        on_click=move |_| open_editor(None)
                    >
                        {icon("plus")}
                        "New rule"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Rule"</TableHeaderCell>
                            <TableHeaderCell>"Court"</TableHeaderCell>
                            <TableHeaderCell>"Type"</TableHeaderCell>
                            <TableHeaderCell>"Adjustment"</TableHeaderCell>
                            <TableHeaderCell>"When"</TableHeaderCell>
                            <TableHeaderCell>"Priority"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let court_list = courts.get();
                            rules.get().into_iter().map(|rule| {
                                let id = rule.id;
                                let active = rule.is_active();
                                let row = StoredValue::new(rule.clone());
                                let rule_name = rule.name.clone();
                                let court_cell = court_label(&rule, &court_list);
                                let type_label = rule.rule_type.display_name();
                                let adjustment_label = rule.adjustment_label();
                                let schedule_label = rule.schedule_label();
                                let priority_label = rule.priority.map(|p| p.to_string()).unwrap_or_default();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{rule_name}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{court_cell}</TableCell>
                                        <TableCell>{type_label}</TableCell>
                                        <TableCell>{adjustment_label}</TableCell>
                                        <TableCell>{schedule_label}</TableCell>
                                        <TableCell>{priority_label}</TableCell>
                                        <TableCell>
                                            {if active {
                                                view! { <Badge color=BadgeColor::Success>"Active"</Badge> }.into_any()
                                            } else {
                                                view! { <Badge color=BadgeColor::Subtle>"Off"</Badge> }.into_any()
                                            }}
                                        </TableCell>
                                        <TableCell>
                                            <Flex gap=FlexGap::Small>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| toggle.with_value(|f| f(id))
                                                >
                                                    {if active { "Disable" } else { "Enable" }}
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| open_editor(Some(row.get_value()))
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete.with_value(|f| f(row.get_value()))
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </Flex>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>

                <Show when=move || !loading.get() && rules.with(Vec::is_empty)>
                    <div class="empty-state">
                        {move || if facilities.with(Vec::is_empty) {
                            "Add a facility before creating pricing rules."
                        } else {
                            "No pricing rules. Courts are billed at their hourly price."
                        }}
                    </div>
                </Show>
            </div>

            <Modal open=editor_open title=modal_title>
                {move || editor_open.get().then(|| {
                    let court_list = courts.get_untracked();
                    let on_saved = move |saved: PricingRuleResponse| {
                        close_editor();
                        rules.update(|list| replace_rule(list, saved));
                    };
                    match editing.get_untracked() {
                        Some(rule) => view! {
                            <RuleForm courts=court_list rule=rule on_saved=on_saved on_cancel=move |_| close_editor() />
                        }.into_any(),
                        None => view! {
                            <RuleForm courts=court_list on_saved=on_saved on_cancel=move |_| close_editor() />
                        }.into_any(),
                    }
                })}
            </Modal>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: u128, name: &str, priority: Option<i32>, active: bool) -> PricingRuleResponse {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::from_u128(id).to_string(),
            "courtId": Uuid::from_u128(7).to_string(),
            "name": name,
            "type": "PEAK_HOURS",
            "adjustmentType": "PERCENTAGE",
            "adjustmentValue": 10,
            "active": active,
            "priority": priority,
        }))
        .unwrap()
    }

    #[test]
    fn test_rules_sorted_by_priority_then_name() {
        let mut rules = vec![
            rule(1, "Morning", None, true),
            rule(2, "Weekend", Some(3), true),
            rule(3, "Evening", Some(3), true),
        ];
        sort_rules(&mut rules);
        let names: Vec<_> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Evening", "Weekend", "Morning"]);
    }

    #[test]
    fn test_replace_rule_updates_or_appends() {
        let mut rules = vec![rule(1, "Peak", Some(1), true)];
        replace_rule(&mut rules, rule(1, "Peak", Some(1), false));
        assert_eq!(rules.len(), 1);
        assert!(!rules[0].is_active());
        replace_rule(&mut rules, rule(2, "Holiday", Some(5), true));
        assert_eq!(rules[0].name, "Holiday");
    }

    #[test]
    fn test_court_label_falls_back_to_court_list() {
        let r = rule(1, "Peak", None, true);
        assert_eq!(court_label(&r, &[]), "-");
        let court = CourtResponse {
            id: Uuid::from_u128(7),
            facility_id: None,
            name: "Court A".into(),
            sport_type: contracts::enums::Sport::Badminton,
            price_per_hour: 500.0,
            opening_time: None,
            closing_time: None,
            active: Some(true),
        };
        assert_eq!(court_label(&r, &[court]), "Court A");
    }
}
