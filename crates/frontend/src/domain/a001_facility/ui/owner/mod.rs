mod facility_form;

use contracts::domain::a001_facility::{FacilityResponse, FacilityStatus};
use contracts::domain::a002_court::CourtResponse;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::a001_facility::api;
use crate::domain::a002_court::api as court_api;
use crate::domain::a002_court::ui::form::CourtForm;
use crate::layout::Modal;
use crate::shared::api_utils::{use_scoped_api, RequestSequencer};
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::toast::{notify_api_error, use_notifications};
use facility_form::FacilityForm;

fn status_badge(status: FacilityStatus) -> BadgeColor {
    match status {
        FacilityStatus::Approved => BadgeColor::Success,
        FacilityStatus::Pending => BadgeColor::Warning,
        FacilityStatus::Rejected => BadgeColor::Danger,
    }
}

/// What the open modal is editing.
#[derive(Clone)]
enum Editor {
    NewFacility,
    Facility(FacilityResponse),
    NewCourt(Uuid),
    Court(Uuid, CourtResponse),
}

/// The owner's facilities, each with its courts.
#[component]
pub fn OwnerFacilities() -> impl IntoView {
    let api = use_scoped_api();
    let notifications = use_notifications();
    let courts_sequencer = RequestSequencer::new();

    let facilities = RwSignal::new(Vec::<FacilityResponse>::new());
    let selected = RwSignal::new(Option::<Uuid>::None);
    let courts = RwSignal::new(Vec::<CourtResponse>::new());
    let loading = RwSignal::new(false);
    let modal_open = RwSignal::new(false);
    let editor = RwSignal::new(Option::<Editor>::None);

    let api_courts = api.clone();
    let load_courts = move |facility_id: Uuid| {
        let api = api_courts.clone();
        let sequencer = courts_sequencer.clone();
        let ticket = sequencer.issue();
        spawn_local(async move {
            let result = court_api::fetch_facility_courts(&api, &facility_id).await;
            if !sequencer.is_latest(ticket) {
                return;
            }
            match result {
                Ok(list) => courts.set(list),
                Err(e) => notify_api_error(notifications, "Load courts", &e),
            }
        });
    };
    let load_courts = StoredValue::new(load_courts);

    let api_list = api.clone();
    let load = move || {
        let api = api_list.clone();
        loading.set(true);
        spawn_local(async move {
            match api::fetch_owner_facilities(&api).await {
                Ok(list) => {
                    let keep = selected
                        .get_untracked()
                        .filter(|id| list.iter().any(|f| f.id == *id))
                        .or_else(|| list.first().map(|f| f.id));
                    facilities.set(list);
                    selected.set(keep);
                    if let Some(id) = keep {
                        load_courts.with_value(|f| f(id));
                    }
                }
                Err(e) => notify_api_error(notifications, "Load facilities", &e),
            }
            loading.set(false);
        });
    };
    let load = StoredValue::new(load);
    load.with_value(|f| f());

    let select = move |id: Uuid| {
        selected.set(Some(id));
        courts.set(Vec::new());
        load_courts.with_value(|f| f(id));
    };

    let open_editor = move |e: Editor| {
        editor.set(Some(e));
        modal_open.set(true);
    };
    let close_editor = move || {
        modal_open.set(false);
        editor.set(None);
    };

    let selected_facility = Memo::new(move |_| {
        let id = selected.get()?;
        facilities.with(|list| list.iter().find(|f| f.id == id).cloned())
    });

    let modal_title = Signal::derive(move || match editor.get() {
        Some(Editor::NewFacility) => "New facility".to_string(),
        Some(Editor::Facility(f)) => format!("Edit {}", f.name),
        Some(Editor::NewCourt(_)) => "Add court".to_string(),
        Some(Editor::Court(_, c)) => format!("Edit {}", c.name),
        None => String::new(),
    });

    view! {
        <PageFrame page_id="a001_facility--owner" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"My Facilities"</h1>
                    <Badge>{move || facilities.with(|f| f.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| load.with_value(|f| f())>
                        {icon("refresh")}
                        "Refresh"
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| open_editor(Editor::NewFacility)>
                        {icon("plus")}
                        "New facility"
                    </Button>
                </div>
            </div>

            <div class="page__content owner-facilities">
                <Show
                    when=move || !facilities.with(Vec::is_empty)
                    fallback=move || view! {
                        <div class="empty-state">
                            {move || if loading.get() { "Loading..." } else { "You have not listed any facility yet." }}
                        </div>
                    }
                >
                    <ul class="owner-facilities__list">
                        {move || facilities.get().into_iter().map(|f| {
                            let id = f.id;
                            view! {
                                <li
                                    class="owner-facilities__item"
                                    class:owner-facilities__item--active=move || selected.get() == Some(id)
                                    on:click=move |_| select(id)
                                >
                                    <div class="owner-facilities__name">{f.name.clone()}</div>
                                    <div class="owner-facilities__meta">
                                        <Badge color=status_badge(f.status)>{f.status.display_name()}</Badge>
                                        <span>{f.sports_label()}</span>
                                    </div>
                                </li>
                            }
                        }).collect_view()}
                    </ul>
                </Show>

                {move || selected_facility.get().map(|facility| {
                    let facility_id = facility.id;
                    let for_edit = StoredValue::new(facility.clone());
                    view! {
                        <section class="owner-facilities__detail">
                            <div class="owner-facilities__detail-header">
                                <div>
                                    <h2>{facility.name.clone()}</h2>
                                    <p class="muted">{facility.address.clone().unwrap_or_default()}</p>
                                </div>
                                <Flex gap=FlexGap::Small>
                                    <Button
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| open_editor(Editor::Facility(for_edit.get_value()))
                                    >
                                        {icon("edit")}
                                        "Edit"
                                    </Button>
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        on_click=move |_| open_editor(Editor::NewCourt(facility_id))
                                    >
                                        {icon("plus")}
                                        "Add court"
                                    </Button>
                                </Flex>
                            </div>
                            <Table>
                                <TableHeader>
                                    <TableRow>
                                        <TableHeaderCell>"Court"</TableHeaderCell>
                                        <TableHeaderCell>"Sport"</TableHeaderCell>
                                        <TableHeaderCell>"Price / hr"</TableHeaderCell>
                                        <TableHeaderCell>"Hours"</TableHeaderCell>
                                        <TableHeaderCell>"Status"</TableHeaderCell>
                                        <TableHeaderCell>""</TableHeaderCell>
                                    </TableRow>
                                </TableHeader>
                                <TableBody>
                                    {move || courts.get().into_iter().map(|court| {
                                        let for_edit = StoredValue::new(court.clone());
                                        let court_name = court.name.clone();
                                        let sport_label = court.sport_type.display_name();
                                        let price_label = format!("₹{:.0}", court.price_per_hour);
                                        let hours_label = court.hours_label();
                                        let is_active = court.is_active();
                                        view! {
                                            <TableRow>
                                                <TableCell><TableCellLayout truncate=true>{court_name}</TableCellLayout></TableCell>
                                                <TableCell>{sport_label}</TableCell>
                                                <TableCell>{price_label}</TableCell>
                                                <TableCell>{hours_label}</TableCell>
                                                <TableCell>
                                                    {if is_active {
                                                        view! { <Badge color=BadgeColor::Success>"Active"</Badge> }.into_any()
                                                    } else {
                                                        view! { <Badge color=BadgeColor::Subtle>"Inactive"</Badge> }.into_any()
                                                    }}
                                                </TableCell>
                                                <TableCell>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| open_editor(Editor::Court(facility_id, for_edit.get_value()))
                                                    >
                                                        {icon("edit")}
                                                    </Button>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                            <Show when=move || courts.with(Vec::is_empty)>
                                <div class="empty-state">"No courts yet. Add one to start taking bookings."</div>
                            </Show>
                        </section>
                    }
                })}
            </div>

            <Modal open=modal_open title=modal_title>
                {move || editor.get().map(|e| match e {
                    Editor::NewFacility => view! {
                        <FacilityForm
                            on_saved=move |_| { close_editor(); load.with_value(|f| f()); }
                            on_cancel=move |_| close_editor()
                        />
                    }.into_any(),
                    Editor::Facility(facility) => view! {
                        <FacilityForm
                            facility=facility
                            on_saved=move |_| { close_editor(); load.with_value(|f| f()); }
                            on_cancel=move |_| close_editor()
                        />
                    }.into_any(),
                    Editor::NewCourt(facility_id) => view! {
                        <CourtForm
                            facility_id=facility_id
                            on_saved=move |_| { close_editor(); load_courts.with_value(|f| f(facility_id)); }
                            on_cancel=move |_| close_editor()
                        />
                    }.into_any(),
                    Editor::Court(facility_id, court) => view! {
                        <CourtForm
                            facility_id=facility_id
                            court=court
                            on_saved=move |_| { close_editor(); load_courts.with_value(|f| f(facility_id)); }
                            on_cancel=move |_| close_editor()
                        />
                    }.into_any(),
                })}
            </Modal>
        </PageFrame>
    }
}
