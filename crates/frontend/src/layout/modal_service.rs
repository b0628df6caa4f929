use leptos::prelude::*;

/// A yes/no question shown before a state-changing action.
#[derive(Clone)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub danger: bool,
    pub on_confirm: Callback<()>,
}

impl ConfirmRequest {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        on_confirm: impl Fn(()) + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "Confirm".to_string(),
            danger: false,
            on_confirm: Callback::new(on_confirm),
        }
    }

    pub fn confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }

    pub fn danger(mut self) -> Self {
        self.danger = true;
        self
    }
}

/// Centralised confirmation dialog
#[derive(Clone, Copy)]
pub struct ModalService {
    pending: RwSignal<Option<ConfirmRequest>>,
}

impl ModalService {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(None),
        }
    }

    pub fn confirm(&self, request: ConfirmRequest) {
        self.pending.set(Some(request));
    }

    pub fn hide(&self) {
        self.pending.set(None);
    }

    pub fn is_open(&self) -> bool {
        self.pending.with(Option::is_some)
    }
}

pub fn use_modal() -> ModalService {
    use_context::<ModalService>().expect("ModalService not provided in context")
}

/// Renders the pending confirmation, mounted once by `App`.
#[component]
pub fn ModalHost() -> impl IntoView {
    let modal = use_modal();

    move || {
        modal.pending.get().map(|request| {
            let on_confirm = request.on_confirm;
            let confirm_class = if request.danger { "btn btn--danger" } else { "btn btn--primary" };
            view! {
                <div class="modal-overlay" on:click=move |_| modal.hide()>
                    <div class="modal-content" role="dialog" on:click=|e| e.stop_propagation()>
                        <h3 class="modal-content__title">{request.title}</h3>
                        <p class="modal-content__message">{request.message}</p>
                        <div class="modal-content__actions">
                            <button class="btn" on:click=move |_| modal.hide()>"Cancel"</button>
                            <button
                                class=confirm_class
                                on:click=move |_| {
                                    modal.hide();
                                    on_confirm.run(());
                                }
                            >
                                {request.confirm_label}
                            </button>
                        </div>
                    </div>
                </div>
            }
        })
    }
}

/// Locally owned dialog for forms.
#[component]
pub fn Modal(
    open: RwSignal<bool>,
    #[prop(into)]
    title: Signal<String>,
    children: ChildrenFn,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-overlay" on:click=move |_| open.set(false)>
                <div class="modal-content modal-content--wide" role="dialog" on:click=|e| e.stop_propagation()>
                    <div class="modal-content__header">
                        <h3 class="modal-content__title">{move || title.get()}</h3>
                        <button class="modal-content__close" title="Close" on:click=move |_| open.set(false)>
                            {crate::shared::icons::icon("x")}
                        </button>
                    </div>
                    {children()}
                </div>
            </div>
        </Show>
    }
}
