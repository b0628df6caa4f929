use contracts::domain::a002_court::{CourtRequest, CourtResponse};
use contracts::enums::Sport;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a002_court::api;
use crate::shared::api_utils::use_scoped_api;
use crate::shared::toast::use_notifications;

/// Request prefilled from an existing court, for editing.
pub fn request_from(court: &CourtResponse) -> CourtRequest {
    let defaults = CourtRequest::default();
    CourtRequest {
        name: court.name.clone(),
        sport_type: court.sport_type,
        price_per_hour: court.price_per_hour,
        opening_time: court.opening_time.clone().unwrap_or(defaults.opening_time),
        closing_time: court.closing_time.clone().unwrap_or(defaults.closing_time),
    }
}

/// Add-court form, or edit form when `court` is given.
#[component]
pub fn CourtForm(
    facility_id: Uuid,
    #[prop(optional)]
    court: Option<CourtResponse>,
    #[prop(into)]
    on_saved: Callback<CourtResponse>,
    #[prop(into)]
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let editing = court.as_ref().map(|c| c.id);
    let form = RwSignal::new(court.as_ref().map(request_from).unwrap_or_default());
    let price_text = RwSignal::new(form.with_untracked(|f| {
        if f.price_per_hour > 0.0 { format!("{:.0}", f.price_per_hour) } else { String::new() }
    }));
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    let save = move |_| {
        let mut request = form.get_untracked();
        request.price_per_hour = price_text.get_untracked().trim().parse().unwrap_or(0.0);
        if let Err(e) = request.clone().validated() {
            error.set(Some(e));
            return;
        }
        let api = api.clone();
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            let result = match editing {
                Some(court_id) => api::update_court(&api, &court_id, request).await,
                None => api::create_court(&api, &facility_id, request).await,
            };
            match result {
                Ok(saved) => {
                    notifications.success(format!("Court {} saved", saved.name));
                    on_saved.run(saved);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="details-form court-form">
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            <div class="form-group">
                <label>"Court name"</label>
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    placeholder="e.g. Court 1"
                />
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Sport"</label>
                    <select
                        class="form-select"
                        on:change=move |ev| {
                            if let Some(sport) = Sport::from_code(&event_target_value(&ev)) {
                                form.update(|f| f.sport_type = sport);
                            }
                        }
                    >
                        {Sport::all().into_iter().map(|s| view! {
                            <option value=s.code() selected=move || form.with(|f| f.sport_type == s)>
                                {s.display_name()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
                <div class="form-group">
                    <label>"Price per hour (₹)"</label>
                    <input
                        type="number"
                        min="0"
                        prop:value=move || price_text.get()
                        on:input=move |ev| price_text.set(event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="form-row">
                <div class="form-group">
                    <label>"Opens"</label>
                    <input
                        type="time"
                        prop:value=move || form.with(|f| f.opening_time.clone())
                        on:input=move |ev| form.update(|f| f.opening_time = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Closes"</label>
                    <input
                        type="time"
                        prop:value=move || form.with(|f| f.closing_time.clone())
                        on:input=move |ev| form.update(|f| f.closing_time = event_target_value(&ev))
                    />
                </div>
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=save
                >
                    {move || match (saving.get(), editing.is_some()) {
                        (true, _) => "Saving...",
                        (false, true) => "Save court",
                        (false, false) => "Add court",
                    }}
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
    fn test_request_from_court_keeps_defaults_for_missing_hours() {
        let court = CourtResponse {
            id: Uuid::from_u128(1),
            facility_id: None,
            name: "Court 2".into(),
            sport_type: Sport::Tennis,
            price_per_hour: 600.0,
            opening_time: Some("07:00:00".into()),
            closing_time: None,
            active: Some(true),
        };
        let req = request_from(&court);
        assert_eq!(req.sport_type, Sport::Tennis);
        assert_eq!(req.opening_time, "07:00:00");
        assert_eq!(req.closing_time, "22:00");
        let req = req.validated().unwrap();
        assert_eq!(req.opening_time, "07:00");
    }
}
