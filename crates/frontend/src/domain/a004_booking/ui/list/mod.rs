mod state;

use contracts::domain::a004_booking::{upcoming, BookingResponse, BookingSort, BookingStats, BookingStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_booking::api;
use crate::layout::{use_modal, ConfirmRequest};
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::stat_card::{StatCard, StatFormat};
use crate::shared::date_utils::{format_date, parse_date_input, today};
use crate::shared::export::export_to_csv;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::{notify_api_error, use_notifications};
use state::{create_state, FetchMode};

/// Bookings per server page.
const PAGE_SIZE: u32 = 10;

fn status_color(status: BookingStatus) -> BadgeColor {
    match status {
        BookingStatus::Confirmed => BadgeColor::Success,
        BookingStatus::Pending => BadgeColor::Warning,
        BookingStatus::Cancelled => BadgeColor::Danger,
        BookingStatus::Completed => BadgeColor::Informative,
    }
}

#[component]
pub fn BookingList() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let modal = use_modal();
    let sequencer = RequestSequencer::new();

    let state = create_state(PAGE_SIZE);
    let loading = RwSignal::new(false);
    let search = RwSignal::new(String::new());

    let api_fetch = api.clone();
    let fetch = move || {
        let api = api_fetch.clone();
        let sequencer = sequencer.clone();
        let ticket = sequencer.issue();
        let mode = state.with_untracked(|s| s.fetch_mode());
        let page = state.with_untracked(|s| s.server_page);
        loading.set(true);
        spawn_local(async move {
            let result = match &mode {
                FetchMode::All => api::fetch_bookings(&api, page, PAGE_SIZE).await,
                FetchMode::Search(params) => api::search_bookings(&api, params).await,
                FetchMode::Range(params) => api::fetch_bookings_in_range(&api, params).await,
            };
            if !sequencer.is_latest(ticket) {
                log::debug!("dropping stale bookings page {page}");
                return;
            }
            match result {
                Ok(envelope) => state.update(|s| s.apply_page(envelope)),
                Err(e) => notify_api_error(notifications, "Load bookings", &e),
            }
            loading.set(false);
        });
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f());

    // Status filter and sort run over the loaded page only.
    let view_rows = Memo::new(move |_| {
        state.with(|s| {
            let mut query = s.query.clone();
            query.run(&s.rows, BookingResponse::clone).rows
        })
    });
    let stats = Memo::new(move |_| state.with(|s| BookingStats::from_bookings(&s.rows)));
    let next_booking = Memo::new(move |_| {
        state.with(|s| {
            upcoming(&s.rows, today())
                .first()
                .map(|b| format!("{} · {} {}", b.facility_name, format_date(&b.date), b.time_range()))
        })
    });

    let on_search = move |text: String| {
        search.set(text.clone());
        state.update(|s| {
            s.search = text;
            s.restart();
        });
        fetch.with_value(|f| f());
    };

    let on_date = move |from: bool, raw: String| {
        let date = parse_date_input(&raw);
        state.update(|s| {
            if from {
                s.date_from = date;
            } else {
                s.date_to = date;
            }
            s.restart();
        });
        let complete_or_cleared = state.with_untracked(|s| s.date_from.is_some() == s.date_to.is_some());
        if complete_or_cleared {
            fetch.with_value(|f| f());
        }
    };

    let go_to_page = move |page: usize| {
        state.update(|s| s.server_page = page.saturating_sub(1) as u32);
        fetch.with_value(|f| f());
    };

    let api_cancel = api.clone();
    let cancel = move |booking: BookingResponse| {
        let api = api_cancel.clone();
        let id = booking.id;
        modal.confirm(
            ConfirmRequest::new(
                "Cancel booking",
                format!(
                    "Cancel {} at {} on {} ({})?",
                    booking.court_name,
                    booking.facility_name,
                    format_date(&booking.date),
                    booking.time_range()
                ),
                move |_| {
                    let api = api.clone();
                    spawn_local(async move {
                        match api::cancel_booking(&api, &id).await {
                            Ok(()) => {
                                state.update(|s| s.mark_cancelled(&id));
                                notifications.success("Booking cancelled");
                            }
                            Err(e) => notify_api_error(notifications, "Cancel booking", &e),
                        }
                    });
                },
            )
            .confirm_label("Cancel booking")
            .danger(),
        );
    };
    let cancel = StoredValue::new(cancel);

    let export = move |_| {
        let rows = view_rows.get_untracked();
        let filename = format!("bookings_{}.csv", today().format("%Y%m%d"));
        match export_to_csv(&rows, &filename) {
            Ok(()) => notifications.success(format!("Exported {} booking(s)", rows.len())),
            Err(e) => notifications.error(e),
        };
    };

    let stat = move |f: fn(&BookingStats) -> f64| {
        Signal::derive(move || state.with(|s| s.is_loaded).then(|| stats.with(f)))
    };

    view! {
        <PageFrame page_id="a004_booking--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"My Bookings"</h1>
                    <Badge>{move || state.with(|s| s.total_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <SearchInput value=search on_change=Callback::new(on_search) placeholder="Facility or court..." />
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch.with_value(|f| f())>
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=export>
                        {icon("download")}
                        "Export CSV"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="stat-cards">
                    <StatCard label="Bookings" icon_name="calendar" value=stat(|s| s.total as f64) format=StatFormat::Integer />
                    <StatCard label="Confirmed" icon_name="check" value=stat(|s| s.confirmed as f64) format=StatFormat::Integer />
                    <StatCard label="Cancelled" icon_name="x" value=stat(|s| s.cancelled as f64) format=StatFormat::Integer />
                    <StatCard
                        label="Spent"
                        icon_name="tag"
                        value=stat(|s| s.total_spent)
                        format=StatFormat::Rupees
                        subtitle=Signal::derive(move || next_booking.get().map(|n| format!("Next: {n}")))
                    />
                </div>

                <div class="list-toolbar">
                    <Flex gap=FlexGap::Small>
                        <label class="list-toolbar__field">
                            "From"
                            <input type="date" on:change=move |ev| on_date(true, event_target_value(&ev)) />
                        </label>
                        <label class="list-toolbar__field">
                            "To"
                            <input type="date" on:change=move |ev| on_date(false, event_target_value(&ev)) />
                        </label>
                        <select
                            class="form-select"
                            on:change=move |ev| {
                                let status = BookingStatus::from_code(&event_target_value(&ev));
                                state.update(|s| s.query.update_filters(|f| f.status = status));
                            }
                        >
                            <option value="">"All statuses"</option>
                            {BookingStatus::all().into_iter().map(|s| view! {
                                <option value=s.code()>{s.display_name()}</option>
                            }).collect_view()}
                        </select>
                        <select
                            class="form-select"
                            on:change=move |ev| {
                                let sort = BookingSort::parse(&event_target_value(&ev));
                                state.update(|s| s.query.set_sort(sort));
                            }
                        >
                            {BookingSort::all().into_iter().map(|sort| view! {
                                <option value=sort.as_str()>{sort.label()}</option>
                            }).collect_view()}
                        </select>
                    </Flex>
                </div>

                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Facility"</TableHeaderCell>
                            <TableHeaderCell>"Court"</TableHeaderCell>
                            <TableHeaderCell>"Date"</TableHeaderCell>
                            <TableHeaderCell>"Time"</TableHeaderCell>
                            <TableHeaderCell>"Amount"</TableHeaderCell>
                            <TableHeaderCell>"Status"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || {
                            let filter = search.get();
                            let today = today();
                            view_rows.get().into_iter().map(|b| {
                                let cancellable = b.can_cancel(today);
                                let for_cancel = StoredValue::new(b.clone());
                                let facility_cell = highlight_matches(&b.facility_name, &filter);
                                let court_cell = highlight_matches(&b.court_name, &filter);
                                let date_label = format_date(&b.date);
                                let time_range = b.time_range();
                                let price_label = b.price_label();
                                let status_label = b.status.display_name();
                                view! {
                                    <TableRow>
                                        <TableCell>
                                            <TableCellLayout truncate=true>{facility_cell}</TableCellLayout>
                                        </TableCell>
                                        <TableCell>{court_cell}</TableCell>
                                        <TableCell>{date_label}</TableCell>
                                        <TableCell>{time_range}</TableCell>
                                        <TableCell>{price_label}</TableCell>
                                        <TableCell>
                                            <Badge color=status_color(b.status)>{status_label}</Badge>
                                        </TableCell>
                                        <TableCell>
                                            {cancellable.then(|| view! {
                                                <Button
                                                    size=ButtonSize::Small
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| cancel.with_value(|f| f(for_cancel.get_value()))
                                                >
                                                    "Cancel"
                                                </Button>
                                            })}
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()
                        }}
                    </TableBody>
                </Table>

                <Show when=move || state.with(|s| s.is_loaded && s.rows.is_empty())>
                    <div class="empty-state">"No bookings found."</div>
                </Show>

                <PaginationControls
                    current_page=Signal::derive(move || state.with(|s| s.server_page as usize + 1))
                    total_pages=Signal::derive(move || state.with(|s| s.total_pages.max(1) as usize))
                    total_count=Signal::derive(move || state.with(|s| s.total_count as usize))
                    page_size=Signal::derive(move || PAGE_SIZE as usize)
                    on_page_change=Callback::new(go_to_page)
                />
            </div>
        </PageFrame>
    }
}
