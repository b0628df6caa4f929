use contracts::domain::a001_facility::card::normalize_photo_url;
use leptos::prelude::*;
use thaw::*;
use uuid::Uuid;

use super::booking::BookingWidget;
use super::reviews::ReviewsSection;
use super::view_model::FacilityDetailsViewModel;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, facility_detail_key};
use crate::shared::api_utils::use_scoped_api;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::toast::use_notifications;

#[component]
pub fn FacilityDetails(id: Uuid, on_close: Callback<()>) -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    let vm = FacilityDetailsViewModel::new(id);
    vm.load(api.clone(), notifications);

    let tab_key = facility_detail_key(&id);
    Effect::new(move |_| {
        if let Some(name) = vm.title() {
            ctx.update_tab_title(&tab_key, &detail_tab_label("Venue", &name));
        }
    });

    let reload = move |_| vm.load(api.clone(), notifications);

    view! {
        <PageFrame page_id="a001_facility--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{move || vm.title().unwrap_or_else(|| "Venue".to_string())}</h1>
                    {move || vm.facility.with(|f| f.as_ref().map(|f| {
                        let status_label = f.status.display_name();
                        view! { <Badge>{status_label}</Badge> }
                    }))}
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=reload>
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_close.run(())>
                        {icon("x")}
                        "Close"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|e| view! {
                    <div class="alert alert--error">{icon("alert-circle")}<span>{e}</span></div>
                })}
                <Show when=move || vm.loading.get() && vm.facility.with(Option::is_none)>
                    <div class="loading">{icon("loader")}" Loading venue..."</div>
                </Show>

                {move || vm.facility.get().map(|f| {
                    let photo = normalize_photo_url(f.photos.first().map(String::as_str));
                    let rating = match (f.average_rating, f.total_reviews.unwrap_or(0)) {
                        (Some(avg), n) if n > 0 => format!("{avg:.1} ({n} reviews)"),
                        _ => "No ratings yet".to_string(),
                    };
                    view! {
                        <div class="facility-details">
                            <div class="facility-details__main">
                                <img class="facility-details__photo" src=photo alt=f.name.clone() />
                                <div class="facility-details__facts">
                                    <div class="facility-details__fact">
                                        {icon("map-pin")}
                                        <span>{f.address.clone().unwrap_or_else(|| "Address not provided".to_string())}</span>
                                    </div>
                                    <div class="facility-details__fact">
                                        {icon("star")}
                                        <span>{rating}</span>
                                    </div>
                                    <div class="facility-details__fact">
                                        {icon("grid")}
                                        <span>{f.sports_label()}</span>
                                    </div>
                                </div>
                                {f.description.clone().map(|d| view! {
                                    <p class="facility-details__description">{d}</p>
                                })}
                                <div class="facility-details__amenities">
                                    {f.amenities.iter().map(|a| view! {
                                        <span class="chip">{a.clone()}</span>
                                    }).collect_view()}
                                </div>
                                <ReviewsSection vm=vm />
                            </div>
                            <aside class="facility-details__side">
                                <BookingWidget vm=vm />
                            </aside>
                        </div>
                    }
                })}
            </div>
        </PageFrame>
    }
}
