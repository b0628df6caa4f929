//! Application top bar: brand, sidebar toggle, signed-in user and sign-out.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::icons::icon;
use crate::system::auth::context::{sign_out, use_session};
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();

    let toggle_sidebar = move |_| ctx.toggle_left();

    let logout = move |_| {
        ctx.close_all();
        sign_out(session);
    };

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=toggle_sidebar
                    title=move || if is_sidebar_visible() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_sidebar_visible() {
                        icon("panel-left-close")
                    } else {
                        icon("panel-left-open")
                    }}
                </button>
                <span class="top-header__title">"QuickCourt"</span>
            </div>

            <div class="top-header__actions">
                {move || session.user().map(|user| view! {
                    <div class="top-header__user">
                        <span class="top-header__avatar">{user.initials()}</span>
                        <div class="top-header__user-info">
                            <span class="top-header__user-name">{user.display_name()}</span>
                            <span class="top-header__user-role">{user.role.display_name()}</span>
                        </div>
                    </div>
                })}

                <button class="top-header__icon-btn" on:click=logout title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
