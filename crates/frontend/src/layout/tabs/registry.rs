//! Tab content registry: tab key -> view.

use super::tab_labels::FACILITY_DETAIL_PREFIX;
use crate::dashboards::d400_owner_summary::OwnerSummaryDashboard;
use crate::domain::a001_facility::ui::details::FacilityDetails;
use crate::domain::a001_facility::ui::list::VenueSearch;
use crate::domain::a001_facility::ui::owner::OwnerFacilities;
use crate::domain::a003_slot::ui::grid::AvailabilityGrid;
use crate::domain::a004_booking::ui::list::BookingList;
use crate::domain::a005_pricing_rule::ui::list::PricingRuleList;
use crate::layout::global_context::AppGlobalContext;
use crate::system::admin::ui::{AdminDashboard, FacilityRequests, UserList};
use crate::system::auth::guard::RequireRole;
use contracts::system::auth::UserRole;
use leptos::prelude::*;

pub fn render_tab_content(key: &str, tabs_store: AppGlobalContext) -> AnyView {
    match key {
        "a001_facility" => view! { <VenueSearch /> }.into_any(),
        "a004_booking" => view! { <BookingList /> }.into_any(),

        "a001_facility_owner" => view! {
            <RequireRole role=UserRole::Owner><OwnerFacilities /></RequireRole>
        }
        .into_any(),
        "a003_slot_grid" => view! {
            <RequireRole role=UserRole::Owner><AvailabilityGrid /></RequireRole>
        }
        .into_any(),
        "a005_pricing_rule" => view! {
            <RequireRole role=UserRole::Owner><PricingRuleList /></RequireRole>
        }
        .into_any(),
        "d400_owner_summary" => view! {
            <RequireRole role=UserRole::Owner><OwnerSummaryDashboard /></RequireRole>
        }
        .into_any(),

        "sys_admin_dashboard" => view! {
            <RequireRole role=UserRole::Admin><AdminDashboard /></RequireRole>
        }
        .into_any(),
        "sys_facility_requests" => view! {
            <RequireRole role=UserRole::Admin><FacilityRequests /></RequireRole>
        }
        .into_any(),
        "sys_users" => view! {
            <RequireRole role=UserRole::Admin><UserList /></RequireRole>
        }
        .into_any(),

        k if k.starts_with(FACILITY_DETAIL_PREFIX) => {
            let key_for_close = k.to_string();
            match k[FACILITY_DETAIL_PREFIX.len()..].parse::<uuid::Uuid>() {
                Ok(id) => view! {
                    <FacilityDetails
                        id=id
                        on_close=Callback::new(move |_| tabs_store.close_tab(&key_for_close))
                    />
                }
                .into_any(),
                Err(_) => {
                    log::warn!("bad facility id in tab key: {k}");
                    view! { <div class="placeholder">"Unknown venue"</div> }.into_any()
                }
            }
        }

        _ => {
            log::warn!("unknown tab key: {key}");
            view! { <div class="placeholder">"Not implemented yet"</div> }.into_any()
        }
    }
}
