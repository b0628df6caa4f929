use contracts::dashboards::{BookingTrendData, OwnerDashboardResponse};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::api;
use crate::shared::api_utils::use_scoped_api;
use crate::shared::components::stat_card::{StatCard, StatFormat};
use crate::shared::date_utils::format_day;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::toast::{notify_api_error, use_notifications};

const PEAK_HOURS_SHOWN: usize = 5;

/// Bar width in percent of the largest value; an all-zero series stays empty.
fn bar_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).clamp(0.0, 100.0)
    }
}

fn max_of(trends: &[BookingTrendData], f: fn(&BookingTrendData) -> f64) -> f64 {
    trends.iter().map(f).fold(0.0, f64::max)
}

#[component]
pub fn OwnerSummaryDashboard() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let data = RwSignal::new(Option::<OwnerDashboardResponse>::None);
    let loading = RwSignal::new(false);

    let load = move || {
        let api = api.clone();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_owner_dashboard(&api).await {
                Ok(d) => {
                    log::debug!("owner dashboard: {} trend points", d.booking_trends.len());
                    data.set(Some(d));
                }
                Err(e) => notify_api_error(notifications, "Owner dashboard", &e),
            }
            loading.set(false);
        });
    };
    let load = StoredValue::new(load);
    load.with_value(|f| f());

    let metric = move |f: fn(&OwnerDashboardResponse) -> f64| {
        Signal::derive(move || data.with(|d| d.as_ref().map(f)))
    };

    view! {
        <PageFrame page_id="d400_owner_summary--dashboard" category=PAGE_CAT_DASHBOARD>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Owner Dashboard"</h1>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load.with_value(|f| f())
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-grid">
                    <StatCard label="Bookings" icon_name="calendar" value=metric(|d| d.total_bookings as f64) format=StatFormat::Integer />
                    <StatCard label="Today" icon_name="check" value=metric(|d| d.today_bookings as f64) format=StatFormat::Integer />
                    <StatCard label="Active courts" icon_name="grid" value=metric(|d| d.active_courts as f64) format=StatFormat::Integer />
                    <StatCard label="Earnings" icon_name="tag" value=metric(|d| d.total_earnings) format=StatFormat::Rupees />
                </div>

                <div class="dashboard-columns">
                    <section>
                        <h2 class="section-title">"Booking trend"</h2>
                        {move || {
                            let trends = data.with(|d| d.as_ref().map(|d| d.booking_trends.clone()).unwrap_or_default());
                            if trends.is_empty() {
                                return view! { <div class="placeholder">"No bookings in this period"</div> }.into_any();
                            }
                            let max_bookings = max_of(&trends, |t| t.bookings as f64);
                            view! {
                                <ul class="share-list">
                                    {trends.into_iter().map(|t| view! {
                                        <li class="share-list__row">
                                            <span class="share-list__label">{format_day(&t.date)}</span>
                                            <div class="share-list__bar">
                                                <div
                                                    class="share-list__fill"
                                                    style:width=format!("{:.0}%", bar_percent(t.bookings as f64, max_bookings))
                                                ></div>
                                            </div>
                                            <span class="share-list__value">
                                                {format!("{} · ₹{:.0}", t.bookings, t.earnings)}
                                            </span>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }.into_any()
                        }}
                    </section>

                    <section>
                        <h2 class="section-title">"Peak hours"</h2>
                        {move || {
                            let hours: Vec<(String, u64)> = data.with(|d| {
                                d.as_ref()
                                    .map(|d| {
                                        d.top_peak_hours(PEAK_HOURS_SHOWN)
                                            .into_iter()
                                            .map(|(h, c)| (h.to_string(), c))
                                            .collect()
                                    })
                                    .unwrap_or_default()
                            });
                            let max = hours.first().map(|(_, c)| *c as f64).unwrap_or(0.0);
                            view! {
                                <ul class="share-list">
                                    {hours.into_iter().map(|(hour, count)| view! {
                                        <li class="share-list__row">
                                            <span class="share-list__label">{hour}</span>
                                            <div class="share-list__bar">
                                                <div
                                                    class="share-list__fill"
                                                    style:width=format!("{:.0}%", bar_percent(count as f64, max))
                                                ></div>
                                            </div>
                                            <span class="share-list__value">{count}</span>
                                        </li>
                                    }).collect_view()}
                                </ul>
                            }
                        }}
                    </section>
                </div>

                <h2 class="section-title">"Facilities"</h2>
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Facility"</TableHeaderCell>
                            <TableHeaderCell>"Bookings"</TableHeaderCell>
                            <TableHeaderCell>"Earnings"</TableHeaderCell>
                            <TableHeaderCell>"Rating"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || data.with(|d| d.as_ref().map(|d| d.facilities_stats.clone()).unwrap_or_default())
                            .into_iter()
                            .map(|s| view! {
                                <TableRow>
                                    <TableCell>
                                        <TableCellLayout truncate=true>{s.facility_name}</TableCellLayout>
                                    </TableCell>
                                    <TableCell>{s.bookings}</TableCell>
                                    <TableCell>{format!("₹{:.0}", s.earnings)}</TableCell>
                                    <TableCell>
                                        {s.rating.map(|r| format!("{r:.1} ★")).unwrap_or_else(|| "-".to_string())}
                                    </TableCell>
                                </TableRow>
                            })
                            .collect_view()}
                    </TableBody>
                </Table>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(5.0, 10.0), 50.0);
        assert_eq!(bar_percent(3.0, 0.0), 0.0);
        assert_eq!(bar_percent(12.0, 10.0), 100.0);
    }

    #[test]
    fn test_max_of_trend() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let trends = vec![
            BookingTrendData { date: day(1), bookings: 4, earnings: 2000.0 },
            BookingTrendData { date: day(2), bookings: 9, earnings: 1500.0 },
        ];
        assert_eq!(max_of(&trends, |t| t.bookings as f64), 9.0);
        assert_eq!(max_of(&trends, |t| t.earnings), 2000.0);
        assert_eq!(max_of(&[], |t| t.earnings), 0.0);
    }
}
