use crate::shared::icons::icon;
use leptos::prelude::*;

/// First/previous/next/last buttons plus an optional page-size select.
#[component]
pub fn PaginationControls(
    /// Current page (1-based)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    page_size: Signal<usize>,

    /// Receives the requested 1-based page
    on_page_change: Callback<usize>,

    #[prop(optional)]
    on_page_size_change: Option<Callback<usize>>,

    #[prop(optional)]
    page_size_options: Option<Vec<usize>>,
) -> impl IntoView {
    let page_size_opts = page_size_options.unwrap_or_else(|| vec![9, 18, 36]);
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="First page"
            >
                "«"
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=at_first
                title="Previous page"
            >
                "‹"
            </button>
            <span class="pagination-info">
                {move || {
                    let total = total_pages.get().max(1);
                    format!("{} / {} ({})", current_page.get().max(1), total, total_count.get())
                }}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get() + 1)
                disabled=at_last
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get().max(1))
                disabled=at_last
                title="Last page"
            >
                "»"
            </button>
            {on_page_size_change.map(|on_change| view! {
                <select
                    class="page-size-select"
                    on:change=move |ev| {
                        if let Ok(size) = event_target_value(&ev).parse() {
                            on_change.run(size);
                        }
                    }
                    prop:value=move || page_size.get().to_string()
                >
                    {page_size_opts.iter().map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    }).collect_view()}
                </select>
            })}
        </div>
    }
}
