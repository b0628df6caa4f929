use contracts::shared::page::PageRequest;
use contracts::shared::query::{Searchable, TextQuery};
use contracts::system::users::UserResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::layout::{use_modal, ConfirmRequest};
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::{notify_api_error, use_notifications};
use crate::system::admin::api;

/// Rows of the loaded page that match the search box.
fn visible_users(users: &[UserResponse], search: &str) -> Vec<UserResponse> {
    let query = TextQuery::new(search);
    users
        .iter()
        .filter(|u| query.matches_any(u.search_fields()))
        .cloned()
        .collect()
}

#[component]
pub fn UserList() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let modal = use_modal();
    let sequencer = RequestSequencer::new();

    let users = RwSignal::new(Vec::<UserResponse>::new());
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(0u32);
    let page_size = RwSignal::new(25usize);
    let total_pages = RwSignal::new(1usize);
    let total_count = RwSignal::new(0usize);
    let loading = RwSignal::new(false);

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let sequencer = sequencer.clone();
            let ticket = sequencer.issue();
            let request = PageRequest::new(page.get_untracked(), page_size.get_untracked() as u32);
            loading.set(true);
            spawn_local(async move {
                let result = api::fetch_users(&api, &request).await;
                if !sequencer.is_latest(ticket) {
                    return;
                }
                match result {
                    Ok(envelope) => {
                        total_pages.set((envelope.total_pages as usize).max(1));
                        total_count.set(envelope.total_elements as usize);
                        users.set(envelope.content);
                    }
                    Err(e) => notify_api_error(notifications, "Users", &e),
                }
                loading.set(false);
            });
        }
    };
    let load = StoredValue::new(load);
    load.with_value(|f| f());

    let toggle_ban = move |id: Uuid, name: String, ban: bool| {
        let api = api.clone();
        let verb = if ban { "Ban" } else { "Unban" };
        let mut request = ConfirmRequest::new(
            format!("{verb} user"),
            format!("{verb} {name}?"),
            move |_| {
                let api = api.clone();
                let name = name.clone();
                spawn_local(async move {
                    match api::set_banned(&api, &id, ban).await {
                        Ok(()) => {
                            let done = if ban { "banned" } else { "unbanned" };
                            notifications.success(format!("{name} {done}"));
                            load.with_value(|f| f());
                        }
                        Err(e) => notify_api_error(notifications, "Update user", &e),
                    }
                });
            },
        )
        .confirm_label(verb);
        if ban {
            request = request.danger();
        }
        modal.confirm(request);
    };
    let toggle_ban = StoredValue::new(toggle_ban);

    let go_to_page = move |p: usize| {
        page.set(p.saturating_sub(1) as u32);
        load.with_value(|f| f());
    };
    let change_page_size = move |size: usize| {
        page_size.set(size);
        page.set(0);
        load.with_value(|f| f());
    };

    view! {
        <PageFrame page_id="sys_users--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Users"</h1>
                    <Badge>{move || total_count.get().to_string()}</Badge>
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
                <div class="filter-panel">
                    <div class="filter-panel-header">
                        <div class="filter-panel-header__left">
                            <SearchInput
                                value=search
                                on_change=Callback::new(move |text: String| search.set(text))
                                placeholder="Name or email on this page..."
                            />
                        </div>
                        <div class="filter-panel-header__center">
                            <PaginationControls
                                current_page=Signal::derive(move || page.get() as usize + 1)
                                total_pages=Signal::derive(move || total_pages.get())
                                total_count=Signal::derive(move || total_count.get())
                                page_size=Signal::derive(move || page_size.get())
                                on_page_change=Callback::new(go_to_page)
                                on_page_size_change=Callback::new(change_page_size)
                                page_size_options=vec![25, 50, 100]
                            />
                        </div>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Name"</TableHeaderCell>
                                <TableHeaderCell>"Email"</TableHeaderCell>
                                <TableHeaderCell>"Role"</TableHeaderCell>
                                <TableHeaderCell>"Status"</TableHeaderCell>
                                <TableHeaderCell>"Joined"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || users.with(|u| visible_users(u, &search.get()))
                                key=|u| (u.id, u.is_banned())
                                children=move |user| {
                                    let id = user.id;
                                    let banned = user.is_banned();
                                    let name = StoredValue::new(user.name.clone());
                                    let filter = search.get_untracked();
                                    let name_cell = highlight_matches(&user.name, &filter);
                                    let email_cell = highlight_matches(&user.email, &filter);
                                    let role_label = user.role.display_name();
                                    let verified = user.is_verified();
                                    let joined = format_datetime(user.created_at.as_ref());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {name_cell}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    {email_cell}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{role_label}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if banned {
                                                        view! { <span class="badge badge--error">"Banned"</span> }.into_any()
                                                    } else if verified {
                                                        view! { <span class="badge badge--success">"Verified"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--neutral">"Unverified"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{joined}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    size=ButtonSize::Small
                                                    on_click=move |_| toggle_ban.with_value(|f| f(id, name.get_value(), !banned))
                                                >
                                                    {if banned { "Unban" } else { "Ban" }}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::auth::UserRole;

    fn user(name: &str, email: &str) -> UserResponse {
        UserResponse {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            role: UserRole::User,
            verified: None,
            banned: None,
            created_at: None,
        }
    }

    #[test]
    fn test_visible_users_searches_name_and_email() {
        let users = vec![user("Asha Rao", "asha@example.com"), user("Vikram", "vk@club.in")];
        assert_eq!(visible_users(&users, "").len(), 2);
        assert_eq!(visible_users(&users, "ASHA")[0].name, "Asha Rao");
        assert_eq!(visible_users(&users, "club.in")[0].name, "Vikram");
        assert!(visible_users(&users, "nobody").is_empty());
    }
}
