use contracts::dashboards::AdminDashboardResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api_utils::use_api;
use crate::shared::components::stat_card::{StatCard, StatFormat};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::toast::{notify_api_error, use_notifications};
use crate::system::admin::api;

/// Platform KPIs for administrators.
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let api = use_api();
    let notifications = use_notifications();
    let data = RwSignal::new(Option::<AdminDashboardResponse>::None);
    let loading = RwSignal::new(false);

    let load = move || {
        let api = api.clone();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_dashboard(&api).await {
                Ok(d) => data.set(Some(d)),
                Err(e) => notify_api_error(notifications, "Admin dashboard", &e),
            }
            loading.set(false);
        });
    };
    load();

    let metric = move |f: fn(&AdminDashboardResponse) -> u64| {
        Signal::derive(move || data.with(|d| d.as_ref().map(|d| f(d) as f64)))
    };

    view! {
        <PageFrame page_id="sys_admin_dashboard--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Admin Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load()
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Users" icon_name="users" value=metric(|d| d.total_users) format=StatFormat::Integer />
                    <StatCard label="Facility owners" icon_name="building" value=metric(|d| d.total_owners) format=StatFormat::Integer />
                    <StatCard label="Bookings" icon_name="calendar" value=metric(|d| d.total_bookings) format=StatFormat::Integer />
                    <StatCard label="Active courts" icon_name="grid" value=metric(|d| d.active_courts) format=StatFormat::Integer />
                    <StatCard label="Pending approvals" icon_name="alert-circle" value=metric(|d| d.pending_approvals) format=StatFormat::Integer />
                </div>

                <h2 class="section-title">"Popular sports"</h2>
                {move || {
                    let shares = data.with(|d| d.as_ref().map(|d| d.sport_shares()).unwrap_or_default());
                    if shares.is_empty() {
                        return view! { <div class="placeholder">"No bookings yet"</div> }.into_any();
                    }
                    view! {
                        <ul class="share-list">
                            {shares.into_iter().map(|(sport, share)| view! {
                                <li class="share-list__row">
                                    <span class="share-list__label">{sport}</span>
                                    <div class="share-list__bar">
                                        <div class="share-list__fill" style:width=format!("{share:.0}%")></div>
                                    </div>
                                    <span class="share-list__value">{format!("{share:.1}%")}</span>
                                </li>
                            }).collect_view()}
                        </ul>
                    }.into_any()
                }}
            </div>
        </PageFrame>
    }
}
