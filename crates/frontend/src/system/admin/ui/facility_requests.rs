use contracts::domain::a001_facility::FacilityResponse;
use contracts::shared::page::PageRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::layout::{use_modal, ConfirmRequest, Modal};
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::shared::toast::{notify_api_error, use_notifications};
use crate::system::admin::api;

const PAGE_SIZE: u32 = 20;

/// Facilities waiting for approval.
#[component]
pub fn FacilityRequests() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let modal = use_modal();
    let sequencer = RequestSequencer::new();

    let items = RwSignal::new(Vec::<FacilityResponse>::new());
    let page = RwSignal::new(0u32);
    let total_pages = RwSignal::new(1usize);
    let total_count = RwSignal::new(0usize);
    let loading = RwSignal::new(false);

    // reject dialog
    let reject_open = RwSignal::new(false);
    let reject_target = RwSignal::new(Option::<(Uuid, String)>::None);
    let reject_reason = RwSignal::new(String::new());

    let load = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let sequencer = sequencer.clone();
            let ticket = sequencer.issue();
            let request = PageRequest::new(page.get_untracked(), PAGE_SIZE);
            loading.set(true);
            spawn_local(async move {
                let result = api::fetch_facility_requests(&api, &request).await;
                if !sequencer.is_latest(ticket) {
                    return;
                }
                match result {
                    Ok(envelope) => {
                        total_pages.set((envelope.total_pages as usize).max(1));
                        total_count.set(envelope.total_elements as usize);
                        items.set(envelope.content);
                    }
                    Err(e) => notify_api_error(notifications, "Facility requests", &e),
                }
                loading.set(false);
            });
        }
    };
    let load = StoredValue::new(load);
    load.with_value(|f| f());

    let approve = {
        let api = api.clone();
        move |id: Uuid, name: String| {
            let api = api.clone();
            modal.confirm(
                ConfirmRequest::new(
                    "Approve facility",
                    format!("Approve \"{name}\"? It becomes visible to all players."),
                    move |_| {
                        let api = api.clone();
                        let name = name.clone();
                        spawn_local(async move {
                            match api::approve_facility(&api, &id).await {
                                Ok(()) => {
                                    notifications.success(format!("{name} approved"));
                                    load.with_value(|f| f());
                                }
                                Err(e) => notify_api_error(notifications, "Approve facility", &e),
                            }
                        });
                    },
                )
                .confirm_label("Approve"),
            );
        }
    };
    let approve = StoredValue::new(approve);

    let submit_reject = move |_| {
        let Some((id, name)) = reject_target.get_untracked() else {
            return;
        };
        let reason = reject_reason.get_untracked();
        let api = api.clone();
        spawn_local(async move {
            match api::reject_facility(&api, &id, &reason).await {
                Ok(()) => {
                    notifications.success(format!("{name} rejected"));
                    reject_open.set(false);
                    reject_reason.set(String::new());
                    load.with_value(|f| f());
                }
                Err(e) => notify_api_error(notifications, "Reject facility", &e),
            }
        });
    };

    let go_to_page = move |p: usize| {
        page.set(p.saturating_sub(1) as u32);
        load.with_value(|f| f());
    };

    view! {
        <PageFrame page_id="sys_facility_requests--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Facility Approvals"</h1>
                    <Badge>{move || total_count.get().to_string()}</Badge>
                </div>
                <div class="page__header-right">
                    <PaginationControls
                        current_page=Signal::derive(move || page.get() as usize + 1)
                        total_pages=Signal::derive(move || total_pages.get())
                        total_count=Signal::derive(move || total_count.get())
                        page_size=Signal::derive(|| PAGE_SIZE as usize)
                        on_page_change=Callback::new(go_to_page)
                    />
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load.with_value(|f| f())
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        " Refresh"
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <Show
                    when=move || !items.with(Vec::is_empty) || loading.get()
                    fallback=|| view! { <div class="placeholder">"No facilities are waiting for approval."</div> }
                >
                    <div class="table-wrapper">
                        <Table attr:style="width: 100%;">
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Facility"</TableHeaderCell>
                                    <TableHeaderCell>"Address"</TableHeaderCell>
                                    <TableHeaderCell>"Sports"</TableHeaderCell>
                                    <TableHeaderCell>"Submitted"</TableHeaderCell>
                                    <TableHeaderCell>"Status"</TableHeaderCell>
                                    <TableHeaderCell>""</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                <For
                                    each=move || items.get()
                                    key=|f| f.id
                                    children=move |facility| {
                                        let id = facility.id;
                                        let name = StoredValue::new(facility.name.clone());
                                        let facility_name = facility.name.clone();
                                        let address = facility.address.clone().unwrap_or_default();
                                        let sports_label = facility.sports_label();
                                        let submitted = format_datetime(facility.created_at.as_ref());
                                        let status_label = facility.status.display_name();
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        <span style="font-weight: 500;">{facility_name}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>
                                                        {address}
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout truncate=true>{sports_label}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{submitted}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span class="badge badge--warning">{status_label}</span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Flex gap=FlexGap::Small>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Primary
                                                            on_click=move |_| approve.with_value(|f| f(id, name.get_value()))
                                                        >
                                                            {icon("check")}
                                                            " Approve"
                                                        </Button>
                                                        <Button
                                                            size=ButtonSize::Small
                                                            on_click=move |_| {
                                                                reject_target.set(Some((id, name.get_value())));
                                                                reject_reason.set(String::new());
                                                                reject_open.set(true);
                                                            }
                                                        >
                                                            {icon("x")}
                                                            " Reject"
                                                        </Button>
                                                    </Flex>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }
                                />
                            </TableBody>
                        </Table>
                    </div>
                </Show>
            </div>

            <Modal open=reject_open title=String::from("Reject facility")>
                <div class="form-group">
                    <label for="reject-reason">
                        {move || reject_target.get().map(|(_, name)| format!("Why is \"{name}\" rejected?")).unwrap_or_default()}
                    </label>
                    <textarea
                        id="reject-reason"
                        rows="4"
                        prop:value=move || reject_reason.get()
                        on:input=move |ev| reject_reason.set(event_target_value(&ev))
                    />
                </div>
                <div class="modal-content__actions">
                    <button class="btn" on:click=move |_| reject_open.set(false)>"Cancel"</button>
                    <button
                        class="btn btn--danger"
                        disabled=move || reject_reason.get().trim().is_empty()
                        on:click=submit_reject.clone()
                    >
                        "Reject"
                    </button>
                </div>
            </Modal>
        </PageFrame>
    }
}
