use contracts::system::auth::UserRole;
use leptos::prelude::*;

use super::context::use_session;

/// Renders `children` only for a signed-in user.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.is_authenticated()
            fallback=|| view! { <div class="alert alert--warning">"Please sign in to continue."</div> }
        >
            {children()}
        </Show>
    }
}

/// Renders `children` only when the user's role satisfies `role`.
#[component]
pub fn RequireRole(role: UserRole, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    view! {
        <Show
            when=move || session.has_role(role)
            fallback=move || view! {
                <div class="alert alert--warning">
                    {format!("Access denied. {} privileges required.", role.display_name())}
                </div>
            }
        >
            {children()}
        </Show>
    }
}
