use chrono::NaiveDate;
use contracts::domain::a002_court::CourtResponse;
use contracts::domain::a005_pricing_rule::{AdjustmentType, PricingRuleRequest, PricingRuleResponse, RuleType};
use contracts::enums::DayOfWeek;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a005_pricing_rule::api;
use crate::shared::api_utils::use_scoped_api;
use crate::shared::date_utils::{parse_date_input, to_date_input};
use crate::shared::toast::use_notifications;

/// Raw form inputs; numbers and optional fields stay text until submit.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleFormState {
    pub request: PricingRuleRequest,
    pub value_text: String,
    pub priority_text: String,
    pub start_time: String,
    pub end_time: String,
    pub start_date: String,
    pub end_date: String,
}

fn non_empty(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

impl RuleFormState {
    pub fn new(court_id: Uuid) -> Self {
        Self::from_request(PricingRuleRequest::new(court_id))
    }

    pub fn from_rule(rule: &PricingRuleResponse) -> Self {
        Self::from_request(rule.to_request())
    }

    fn from_request(request: PricingRuleRequest) -> Self {
        let value_text = if request.adjustment_value == 0.0 {
            String::new()
        } else {
            request.adjustment_value.to_string()
        };
        Self {
            value_text,
            priority_text: request.priority.map(|p| p.to_string()).unwrap_or_default(),
            start_time: request.start_time.clone().unwrap_or_default(),
            end_time: request.end_time.clone().unwrap_or_default(),
            start_date: request.start_date.map(|d| to_date_input(&d)).unwrap_or_default(),
            end_date: request.end_date.map(|d| to_date_input(&d)).unwrap_or_default(),
            request,
        }
    }

    pub fn toggle_day(&mut self, day: DayOfWeek, on: bool) {
        let days = &mut self.request.applicable_days;
        days.retain(|d| *d != day);
        if on {
            days.push(day);
            days.sort();
        }
    }

    /// Parsed and validated request body.
    pub fn to_request(&self) -> Result<PricingRuleRequest, String> {
        let mut request = self.request.clone();
        request.name = request.name.trim().to_string();
        request.adjustment_value = self
            .value_text
            .trim()
            .parse()
            .map_err(|_| "Adjustment value must be a number".to_string())?;
        request.priority = match non_empty(&self.priority_text) {
            Some(p) => Some(p.parse().map_err(|_| "Priority must be a whole number".to_string())?),
            None => None,
        };
        request.start_time = non_empty(&self.start_time);
        request.end_time = non_empty(&self.end_time);
        request.start_date = Self::date(&self.start_date, "start")?;
        request.end_date = Self::date(&self.end_date, "end")?;
        request.validate()?;
        Ok(request)
    }

    fn date(raw: &str, which: &str) -> Result<Option<NaiveDate>, String> {
        match non_empty(raw) {
            Some(s) => parse_date_input(&s)
                .map(Some)
                .ok_or_else(|| format!("Invalid {which} date")),
            None => Ok(None),
        }
    }
}

/// Create or edit one pricing rule.
#[component]
pub fn RuleForm(
    courts: Vec<CourtResponse>,
    #[prop(optional)]
    rule: Option<PricingRuleResponse>,
    #[prop(into)]
    on_saved: Callback<PricingRuleResponse>,
    #[prop(into)]
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let editing = rule.as_ref().map(|r| r.id);
    let initial = match (&rule, courts.first()) {
        (Some(rule), _) => RuleFormState::from_rule(rule),
        (None, Some(court)) => RuleFormState::new(court.id),
        (None, None) => RuleFormState::new(Uuid::nil()),
    };
    let form = RwSignal::new(initial);
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    let save = move |_| {
        let request = match form.with_untracked(RuleFormState::to_request) {
            Ok(r) => r,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if request.court_id.is_nil() {
            error.set(Some("Select a court".into()));
            return;
        }
        let api = api.clone();
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            let result = match editing {
                Some(id) => api::update_rule(&api, &id, &request).await,
                None => api::create_rule(&api, &request).await,
            };
            match result {
                Ok(saved) => {
                    notifications.success(format!("Pricing rule \"{}\" saved", saved.name));
                    on_saved.run(saved);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    let text_input = move |input_type: &'static str, get: fn(&RuleFormState) -> String, set: fn(&mut RuleFormState, String)| {
        view! {
            <input
                type=input_type
                prop:value=move || form.with(get)
                on:input=move |ev| form.update(|f| set(f, event_target_value(&ev)))
            />
        }
    };

    view! {
        <div class="details-form rule-form">
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            <div class="form-row">
                <div class="form-group">
                    <label>"Name"</label>
                    {text_input("text", |f| f.request.name.clone(), |f, v| f.request.name = v)}
                </div>
                <div class="form-group">
                    <label>"Court"</label>
                    <select
                        class="form-select"
                        disabled=editing.is_some()
                        on:change=move |ev| {
                            if let Ok(id) = Uuid::parse_str(&event_target_value(&ev)) {
                                form.update(|f| f.request.court_id = id);
                            }
                        }
                    >
                        {courts.into_iter().map(|c| {
                            let id = c.id;
                            view! {
                                <option value=id.to_string() selected=move || form.with(|f| f.request.court_id == id)>
                                    {c.name}
                                </option>
                            }
                        }).collect_view()}
                    </select>
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Rule type"</label>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Some(t) = RuleType::from_code(&event_target_value(&ev)) {
                                form.update(|f| f.request.rule_type = t);
                            }
                        }
                    >
                        {RuleType::all().into_iter().map(|t| view! {
                            <option value=t.code() selected=move || form.with(|f| f.request.rule_type == t)>
                                {t.display_name()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Adjustment"</label>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Some(t) = AdjustmentType::from_code(&event_target_value(&ev)) {
                                form.update(|f| f.request.adjustment_type = t);
                            }
                        }
                    >
                        <option
                            value=AdjustmentType::Percentage.code()
                            selected=move || form.with(|f| f.request.adjustment_type == AdjustmentType::Percentage)
                        >
                            "Percentage (%)"
                        </option>
                        <option
                            value=AdjustmentType::FixedAmount.code()
                            selected=move || form.with(|f| f.request.adjustment_type == AdjustmentType::FixedAmount)
                        >
                            "Fixed amount (₹)"
                        </option>
                    </select>
                </div>
                <div class="form-group">
                    <label>"Value"</label>
                    {text_input("number", |f| f.value_text.clone(), |f, v| f.value_text = v)}
                </div>
            </div>
            <div class="form-group">
                <label>"Days (none = every day)"</label>
                <div class="checkbox-grid">
                    {DayOfWeek::all().into_iter().map(|day| view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.request.applicable_days.contains(&day))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    form.update(|f| f.toggle_day(day, on));
                                }
                            />
                            {day.short_name()}
                        </label>
                    }).collect_view()}
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"From time"</label>
                    {text_input("time", |f| f.start_time.clone(), |f, v| f.start_time = v)}
                </div>
                <div class="form-group">
                    <label>"To time"</label>
                    {text_input("time", |f| f.end_time.clone(), |f, v| f.end_time = v)}
                </div>
                <div class="form-group">
                    <label>"From date"</label>
                    {text_input("date", |f| f.start_date.clone(), |f, v| f.start_date = v)}
                </div>
                <div class="form-group">
                    <label>"To date"</label>
                    {text_input("date", |f| f.end_date.clone(), |f, v| f.end_date = v)}
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Priority"</label>
                    {text_input("number", |f| f.priority_text.clone(), |f, v| f.priority_text = v)}
                </div>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.request.active)
                        on:change=move |ev| {
                            let on = event_target_checked(&ev);
                            form.update(|f| f.request.active = on);
                        }
                    />
                    "Active"
                </label>
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save rule" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parses_optional_fields() {
        let mut form = RuleFormState::new(Uuid::from_u128(4));
        form.request.name = " Evening peak ".into();
        form.value_text = "15".into();
        assert_eq!(form.to_request().map(|r| r.start_time), Ok(None));

        form.start_time = "18:00".into();
        assert!(form.to_request().is_err());
        form.end_time = "22:00".into();
        form.priority_text = "2".into();
        form.start_date = "2024-12-01".into();
        let req = form.to_request().unwrap();
        assert_eq!(req.name, "Evening peak");
        assert_eq!(req.priority, Some(2));
        assert_eq!(req.start_date, NaiveDate::from_ymd_opt(2024, 12, 1));
        assert_eq!(req.end_date, None);
    }

    #[test]
    fn test_form_rejects_bad_numbers() {
        let mut form = RuleFormState::new(Uuid::from_u128(4));
        form.request.name = "Weekend".into();
        form.value_text = "abc".into();
        assert!(form.to_request().is_err());
        form.value_text = "-20".into();
        form.priority_text = "high".into();
        assert!(form.to_request().is_err());
        form.priority_text.clear();
        assert!(form.to_request().is_ok());
    }

    #[test]
    fn test_days_stay_sorted() {
        let mut form = RuleFormState::new(Uuid::nil());
        form.toggle_day(DayOfWeek::Sunday, true);
        form.toggle_day(DayOfWeek::Saturday, true);
        form.toggle_day(DayOfWeek::Saturday, true);
        assert_eq!(form.request.applicable_days, vec![DayOfWeek::Saturday, DayOfWeek::Sunday]);
        form.toggle_day(DayOfWeek::Sunday, false);
        assert_eq!(form.request.applicable_days, vec![DayOfWeek::Saturday]);
    }
}
