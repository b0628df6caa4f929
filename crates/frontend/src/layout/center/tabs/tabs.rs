use super::tab::Tab as TabComponent;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::TabPage;
use leptos::prelude::*;

#[component]
pub fn Tabs() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");

    view! {
        <div class="tabs-container">
            <div class="tabs-bar">
                <For
                    each=move || ctx.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabComponent tab=tab /> }
                />
            </div>
            <div class="tab-content">
                <Show
                    when=move || ctx.opened.with(|tabs| !tabs.is_empty())
                    fallback=|| view! {
                        <div class="placeholder">"Pick a section from the menu to get started."</div>
                    }
                >
                    <For
                        each=move || ctx.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab| view! { <TabPage tab=tab tabs_store=ctx /> }
                    />
                </Show>
            </div>
        </div>
    }
}
