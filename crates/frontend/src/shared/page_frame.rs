//! Root wrapper for every page rendered inside a tab.

use super::page_standard::{is_known_category, is_valid_page_id, page_class};
use leptos::prelude::*;

/// Tags the page root with `id="{entity}--{category}"` and
/// `data-page-category` so styles and tests can find it.
#[component]
pub fn PageFrame(
    /// e.g. `"a004_booking--list"`
    page_id: &'static str,
    /// One of the `PAGE_CAT_*` constants.
    category: &'static str,
    #[prop(optional)]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    if !is_valid_page_id(page_id) || !is_known_category(category) {
        log::warn!("page {page_id} has a non-standard id or category {category}");
    }

    view! {
        <section id=page_id class=page_class(category, class) data-page-category=category>
            {children()}
        </section>
    }
}
