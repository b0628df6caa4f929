//! Sidebar with collapsible, role-filtered menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use crate::system::auth::context::use_session;
use contracts::system::auth::UserRole;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (tab key, label, icon)
    required_role: Option<UserRole>,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "explore",
            label: "Explore",
            icon: "search",
            items: vec![
                ("a001_facility", tab_label_for_key("a001_facility"), "map-pin"),
                ("a004_booking", tab_label_for_key("a004_booking"), "calendar"),
            ],
            required_role: None,
        },
        MenuGroup {
            id: "owner",
            label: "Facility Owner",
            icon: "building",
            items: vec![
                ("d400_owner_summary", tab_label_for_key("d400_owner_summary"), "chart"),
                ("a001_facility_owner", tab_label_for_key("a001_facility_owner"), "building"),
                ("a003_slot_grid", tab_label_for_key("a003_slot_grid"), "grid"),
                ("a005_pricing_rule", tab_label_for_key("a005_pricing_rule"), "tag"),
            ],
            required_role: Some(UserRole::Owner),
        },
        MenuGroup {
            id: "admin",
            label: "Administration",
            icon: "shield",
            items: vec![
                ("sys_admin_dashboard", tab_label_for_key("sys_admin_dashboard"), "chart"),
                ("sys_facility_requests", tab_label_for_key("sys_facility_requests"), "check"),
                ("sys_users", tab_label_for_key("sys_users"), "users"),
            ],
            required_role: Some(UserRole::Admin),
        },
    ]
}

/// Groups the given role may open. Anonymous sessions see only open groups.
fn visible_groups(role: Option<UserRole>) -> Vec<MenuGroup> {
    menu_groups()
        .into_iter()
        .filter(|g| match (g.required_role, role) {
            (None, _) => true,
            (Some(required), Some(role)) => role.satisfies(required),
            (Some(_), None) => false,
        })
        .collect()
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let session = use_session();

    let expanded_groups = RwSignal::new(vec!["explore".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {move || visible_groups(session.role()).into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |open| {
                                    if let Some(pos) = open.iter().position(|x| x == &gid) {
                                        open.remove(pos);
                                    } else {
                                        open.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&group_id)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, label, icon_name)| {
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(role: Option<UserRole>) -> Vec<&'static str> {
        visible_groups(role).iter().map(|g| g.id).collect()
    }

    #[test]
    fn test_groups_follow_role() {
        assert_eq!(ids(None), vec!["explore"]);
        assert_eq!(ids(Some(UserRole::User)), vec!["explore"]);
        assert_eq!(ids(Some(UserRole::Owner)), vec!["explore", "owner"]);
        assert_eq!(ids(Some(UserRole::Admin)), vec!["explore", "owner", "admin"]);
    }

    #[test]
    fn test_every_item_has_a_label() {
        for group in menu_groups() {
            for (key, label, _) in group.items {
                assert_ne!(label, "Untitled", "missing label for {key}");
            }
        }
    }
}
