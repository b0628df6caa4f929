use contracts::domain::a001_facility::filters::AMENITY_OPTIONS;
use contracts::domain::a001_facility::{FacilityRequest, FacilityResponse, FacilityStatus};
use contracts::enums::Sport;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a001_facility::api;
use crate::shared::api_utils::use_scoped_api;
use crate::shared::toast::use_notifications;

/// Request prefilled from an existing facility. Unknown sport codes are dropped.
pub fn request_from(facility: &FacilityResponse) -> FacilityRequest {
    FacilityRequest {
        name: facility.name.clone(),
        description: facility.description.clone().unwrap_or_default(),
        address: facility.address.clone().unwrap_or_default(),
        sports: facility
            .sports
            .iter()
            .filter_map(|code| Sport::from_code(code))
            .collect(),
        amenities: facility.amenities.clone(),
        active: facility.status != FacilityStatus::Rejected,
    }
}

fn toggle<T: PartialEq>(values: &mut Vec<T>, value: T, on: bool) {
    let present = values.contains(&value);
    if on && !present {
        values.push(value);
    } else if !on && present {
        values.retain(|v| *v != value);
    }
}

#[component]
pub fn FacilityForm(
    #[prop(optional)]
    facility: Option<FacilityResponse>,
    #[prop(into)]
    on_saved: Callback<FacilityResponse>,
    #[prop(into)]
    on_cancel: Callback<()>,
) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let editing: Option<Uuid> = facility.as_ref().map(|f| f.id);
    let form = RwSignal::new(
        facility
            .as_ref()
            .map(request_from)
            .unwrap_or_else(|| FacilityRequest {
                active: true,
                ..Default::default()
            }),
    );
    let error = RwSignal::new(Option::<String>::None);
    let saving = RwSignal::new(false);

    let save = move |_| {
        let request = form.get_untracked();
        if let Err(e) = request.validate() {
            error.set(Some(e));
            return;
        }
        let api = api.clone();
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            let result = match editing {
                Some(id) => api::update_facility(&api, &id, &request).await,
                None => api::create_facility(&api, &request).await,
            };
            match result {
                Ok(saved) => {
                    let message = if editing.is_some() {
                        format!("{} updated", saved.name)
                    } else {
                        format!("{} submitted for approval", saved.name)
                    };
                    notifications.success(message);
                    on_saved.run(saved);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <div class="details-form facility-form">
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            <div class="form-group">
                <label>"Name"</label>
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.name.clone())
                    on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Address"</label>
                <input
                    type="text"
                    prop:value=move || form.with(|f| f.address.clone())
                    on:input=move |ev| form.update(|f| f.address = event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label>"Description"</label>
                <textarea
                    rows="3"
                    prop:value=move || form.with(|f| f.description.clone())
                    on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                ></textarea>
            </div>
            <div class="form-group">
                <label>"Sports"</label>
                <div class="checkbox-grid">
                    {Sport::all().into_iter().map(|sport| view! {
                        <label class="checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.sports.contains(&sport))
                                on:change=move |ev| {
                                    let on = event_target_checked(&ev);
                                    form.update(|f| toggle(&mut f.sports, sport, on));
                                }
                            />
                            {sport.display_name()}
                        </label>
                    }).collect_view()}
                </div>
            </div>
            <div class="form-group">
                <label>"Amenities"</label>
                <div class="checkbox-grid">
                    {AMENITY_OPTIONS.iter().map(|(_, label)| {
                        let label = *label;
                        view! {
                            <label class="checkbox">
                                <input
                                    type="checkbox"
                                    prop:checked=move || form.with(|f| f.amenities.iter().any(|a| a == label))
                                    on:change=move |ev| {
                                        let on = event_target_checked(&ev);
                                        form.update(|f| toggle(&mut f.amenities, label.to_string(), on));
                                    }
                                />
                                {label}
                            </label>
                        }
                    }).collect_view()}
                </div>
            </div>
            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=save
                >
                    {move || if saving.get() { "Saving..." } else { "Save facility" }}
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
    fn test_request_from_facility() {
        let facility: FacilityResponse = serde_json::from_str(
            r#"{
                "id": "6f1c1b3e-8e4a-4c1e-9a55-0d6c1f1b2a10",
                "name": "Smash Arena",
                "address": "12 MG Road",
                "sports": ["BADMINTON", "curling"],
                "amenities": ["Parking"],
                "status": "APPROVED"
            }"#,
        )
        .unwrap();
        let req = request_from(&facility);
        assert_eq!(req.sports, vec![Sport::Badminton]);
        assert_eq!(req.description, "");
        assert!(req.active);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_toggle_keeps_values_unique() {
        let mut values = vec!["Parking".to_string()];
        toggle(&mut values, "Parking".to_string(), true);
        assert_eq!(values.len(), 1);
        toggle(&mut values, "WiFi".to_string(), true);
        toggle(&mut values, "Parking".to_string(), false);
        assert_eq!(values, vec!["WiFi".to_string()]);
    }
}
