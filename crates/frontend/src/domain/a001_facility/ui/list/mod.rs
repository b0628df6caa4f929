mod state;

use contracts::domain::a001_facility::filters::{AMENITY_OPTIONS, RATING_OPTIONS};
use contracts::domain::a001_facility::{ActiveFilter, VenueCard, VenueSort};
use contracts::enums::Sport;
use contracts::shared::query::{FilterSet, NumericRange, Threshold};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_facility::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, facility_detail_key};
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::{notify_api_error, use_notifications};
use state::create_state;

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| *v >= 0.0)
}

/// Venue search: server fetch by sport, local search, filter, sort and paging.
#[component]
pub fn VenueSearch() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let sequencer = RequestSequencer::new();

    let state = create_state(api.config().ui.page_size);
    let loading = RwSignal::new(false);
    let filters_expanded = RwSignal::new(true);
    let search = RwSignal::new(String::new());

    let fetch = move |append: bool| {
        let api = api.clone();
        let sequencer = sequencer.clone();
        let ticket = sequencer.issue();
        let params = state.with_untracked(|s| s.server_params(if append { s.next_page } else { 0 }));
        loading.set(true);
        spawn_local(async move {
            let result = api::fetch_venues(&api, &params).await;
            if !sequencer.is_latest(ticket) {
                log::debug!("dropping stale venue page {}", params.page);
                return;
            }
            match result {
                Ok(envelope) => {
                    state.update(|s| {
                        s.apply_page(envelope, append);
                    });
                }
                Err(e) => notify_api_error(notifications, "Venue search", &e),
            }
            loading.set(false);
        });
    };
    let fetch = StoredValue::new(fetch);
    fetch.with_value(|f| f(false));

    let outcome = Memo::new(move |_| {
        state.with(|s| {
            let mut query = s.query.clone();
            query.run(s.source.items(), VenueCard::from_facility)
        })
    });

    // Search runs over the loaded venues; no refetch.
    let on_search = move |text: String| {
        search.set(text.clone());
        state.update(|s| s.query.set_search(text));
    };

    let toggle_sport = move |id: &'static str, on: bool| {
        state.update(|s| s.query.update_filters(|f| f.sports.toggle(id, on)));
        fetch.with_value(|f| f(false));
    };

    let toggle_amenity = move |id: &'static str, on: bool| {
        state.update(|s| s.query.update_filters(|f| f.amenities.toggle(id, on)));
    };

    let price_min = RwSignal::new(String::new());
    let price_max = RwSignal::new(String::new());
    let apply_price = move |_| {
        let range = NumericRange::new(
            parse_price(&price_min.get_untracked()),
            parse_price(&price_max.get_untracked()),
        );
        state.update(|s| s.query.update_filters(|f| f.price = range));
    };

    let clear_all = move |_: ()| {
        price_min.set(String::new());
        price_max.set(String::new());
        let had_sports = state.with_untracked(|s| !s.query.filters().sports.values.is_empty());
        state.update(|s| s.query.clear_filters());
        if had_sports {
            fetch.with_value(|f| f(false));
        }
    };

    let active_count = Signal::derive(move || state.with(|s| s.query.filters().active_count()));

    let open_venue = move |card: &VenueCard| {
        ctx.open_tab(&facility_detail_key(&card.id), &detail_tab_label("Venue", &card.name));
    };

    view! {
        <PageFrame page_id="a001_facility--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Find Venues"</h1>
                    <Badge>{move || outcome.with(|o| o.filtered_count.to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <SearchInput
                        value=search
                        on_change=Callback::new(on_search)
                        placeholder="Venue name or sport..."
                    />
                    <select
                        class="sort-select"
                        on:change=move |ev| {
                            let sort = VenueSort::parse(&event_target_value(&ev));
                            state.update(|s| s.query.set_sort(sort));
                        }
                    >
                        {VenueSort::all().into_iter().map(|sort| view! {
                            <option
                                value=sort.as_str()
                                selected=move || state.with(|s| *s.query.sort() == sort)
                            >
                                {sort.label()}
                            </option>
                        }).collect_view()}
                    </select>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=filters_expanded
                    active_filters_count=active_count
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || outcome.with(|o| o.current_page))
                            total_pages=Signal::derive(move || outcome.with(|o| o.page_count))
                            total_count=Signal::derive(move || outcome.with(|o| o.filtered_count))
                            page_size=Signal::derive(move || state.with(|s| s.query.pagination().page_size()))
                            on_page_change=Callback::new(move |p| state.update(|s| s.query.set_page(p)))
                            on_page_size_change=Callback::new(move |size| state.update(|s| s.query.set_page_size(size)))
                        />
                    }
                    filter_content=move || view! {
                        <div class="filter-grid">
                            <fieldset class="filter-group">
                                <legend>"Sports"</legend>
                                {Sport::all().into_iter().map(|sport| {
                                    let id = sport.filter_id();
                                    view! {
                                        <label class="filter-option">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || state.with(|s| s.query.filters().sports.contains_id(id))
                                                on:change=move |ev| toggle_sport(id, event_target_checked(&ev))
                                            />
                                            {sport.display_name()}
                                        </label>
                                    }
                                }).collect_view()}
                            </fieldset>

                            <fieldset class="filter-group">
                                <legend>"Price per hour (₹)"</legend>
                                <div class="form-row">
                                    <input
                                        type="number"
                                        min="0"
                                        placeholder="Min"
                                        prop:value=move || price_min.get()
                                        on:input=move |ev| price_min.set(event_target_value(&ev))
                                    />
                                    <input
                                        type="number"
                                        min="0"
                                        placeholder="Max"
                                        prop:value=move || price_max.get()
                                        on:input=move |ev| price_max.set(event_target_value(&ev))
                                    />
                                    <button class="btn" on:click=apply_price>"Apply"</button>
                                </div>
                            </fieldset>

                            <fieldset class="filter-group">
                                <legend>"Rating"</legend>
                                <label class="filter-option">
                                    <input
                                        type="radio"
                                        name="venue-rating"
                                        prop:checked=move || state.with(|s| !s.query.filters().min_rating.is_active())
                                        on:change=move |_| state.update(|s| s.query.update_filters(|f| f.min_rating = Threshold::default()))
                                    />
                                    "Any"
                                </label>
                                {RATING_OPTIONS.iter().copied().map(|min| view! {
                                    <label class="filter-option">
                                        <input
                                            type="radio"
                                            name="venue-rating"
                                            prop:checked=move || state.with(|s| s.query.filters().min_rating.min == min)
                                            on:change=move |_| state.update(|s| s.query.update_filters(|f| f.min_rating = Threshold::new(min)))
                                        />
                                        {format!("{min}+ stars")}
                                    </label>
                                }).collect_view()}
                            </fieldset>

                            <fieldset class="filter-group">
                                <legend>"Amenities"</legend>
                                {AMENITY_OPTIONS.iter().map(|&(id, label)| view! {
                                    <label class="filter-option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || state.with(|s| s.query.filters().amenities.contains_id(id))
                                            on:change=move |ev| toggle_amenity(id, event_target_checked(&ev))
                                        />
                                        {label}
                                    </label>
                                }).collect_view()}
                            </fieldset>
                        </div>
                    }
                    filter_tags=move || view! {
                        {move || state.with(|s| s.query.filters().active_filters()).into_iter().map(|chip| {
                            let label = chip.label();
                            let refetch = matches!(chip, ActiveFilter::Sport(_));
                            view! {
                                <FilterTag
                                    label=label
                                    on_remove=Callback::new(move |_| {
                                        state.update(|s| s.query.update_filters(|f| f.remove(&chip)));
                                        if refetch {
                                            fetch.with_value(|f| f(false));
                                        }
                                    })
                                />
                            }
                        }).collect_view()}
                    }
                    on_clear=Callback::new(clear_all)
                />

                {move || {
                    let outcome = outcome.get();
                    if outcome.is_empty() {
                        let message = if loading.get() || !state.with(|s| s.is_loaded) {
                            "Loading venues..."
                        } else {
                            "No venues match your filters."
                        };
                        return view! { <div class="placeholder">{message}</div> }.into_any();
                    }
                    let filter = search.get_untracked();
                    let summary = outcome
                        .visible_range()
                        .map(|(first, last)| format!("Showing {first}-{last} of {}", outcome.filtered_count));
                    view! {
                        <div class="venue-grid">
                            {outcome.rows.into_iter().map(|card| {
                                let card_for_open = card.clone();
                                view! {
                                    <article class="venue-card" on:click=move |_| open_venue(&card_for_open)>
                                        <img class="venue-card__photo" src=card.photo_url.clone() alt=card.name.clone() />
                                        <div class="venue-card__body">
                                            <h3 class="venue-card__name">{highlight_matches(&card.name, &filter)}</h3>
                                            <div class="venue-card__meta">
                                                {icon("map-pin")}
                                                <span>{card.address.clone()}</span>
                                            </div>
                                            <div class="venue-card__sports">{card.sports.clone()}</div>
                                            <div class="venue-card__footer">
                                                <span class="venue-card__rating">{icon("star")}{card.rating_label()}</span>
                                                <span class="venue-card__price">{card.price_label()}</span>
                                            </div>
                                            <div class="venue-card__amenities">
                                                {card.amenities.iter().map(|a| view! { <span class="chip">{a.clone()}</span> }).collect_view()}
                                            </div>
                                        </div>
                                    </article>
                                }
                            }).collect_view()}
                        </div>
                        {summary.map(|text| view! { <div class="list-summary">{text}</div> })}
                    }.into_any()
                }}

                <Show when=move || state.with(|s| s.has_more)>
                    <div class="load-more">
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| fetch.with_value(|f| f(true))
                            disabled=Signal::derive(move || loading.get())
                        >
                            {move || if loading.get() { "Loading..." } else { "Load more venues" }}
                        </Button>
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 500 "), Some(500.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("abc"), None);
    }
}
