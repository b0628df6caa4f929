//! Non-blocking notifications.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::shared::api_utils::ApiError;
use crate::shared::icons::icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Loading,
    Custom,
}

impl ToastKind {
    fn css_class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Loading => "toast toast--loading",
            ToastKind::Custom => "toast toast--custom",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Error => "alert-circle",
            ToastKind::Loading => "loader",
            ToastKind::Custom => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub details: Vec<String>,
}

/// Toast queue provided through context.
#[derive(Clone, Copy)]
pub struct Notifications {
    toasts: RwSignal<Vec<Toast>>,
    next_id: StoredValue<u64>,
    timeout_ms: u32,
}

impl Notifications {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
            timeout_ms,
        }
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message.into(), Vec::new())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message.into(), Vec::new())
    }

    /// Error toast with one line per failed item.
    pub fn error_with_details(&self, message: impl Into<String>, details: Vec<String>) -> u64 {
        self.push(ToastKind::Error, message.into(), details)
    }

    /// Stays until dismissed.
    pub fn loading(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Loading, message.into(), Vec::new())
    }

    pub fn custom(&self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Custom, message.into(), Vec::new())
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    fn push(&self, kind: ToastKind, message: String, details: Vec<String>) -> u64 {
        let id = self.next_id.with_value(|n| n + 1);
        self.next_id.set_value(id);
        self.toasts.update(|list| {
            list.push(Toast {
                id,
                kind,
                message,
                details,
            })
        });
        if kind != ToastKind::Loading {
            let this = *self;
            Timeout::new(self.timeout_ms, move || this.dismiss(id)).forget();
        }
        id
    }
}

pub fn use_notifications() -> Notifications {
    use_context::<Notifications>().expect("Notifications not provided in context")
}

/// Show an API failure. Cancelled requests are logged, never shown.
pub fn notify_api_error(notifications: Notifications, context: &str, error: &ApiError) {
    match error {
        ApiError::Cancelled => log::debug!("{context}: cancelled"),
        ApiError::Network(detail) => {
            log::error!("{context}: {detail}");
            notifications.error("Network error. Check your connection and try again.");
        }
        ApiError::Parse(detail) => {
            log::error!("{context}: {detail}");
            notifications.error(format!("{context}: unexpected response from server"));
        }
        ApiError::Unauthorized | ApiError::Server { .. } | ApiError::Validation(_) => {
            notifications.error(error.to_string());
        }
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let notifications = use_notifications();

    view! {
        <div class="toaster">
            <For
                each=move || notifications.toasts.get()
                key=|toast| toast.id
                children=move |toast: Toast| {
                    let id = toast.id;
                    let details = toast.details.clone();
                    view! {
                        <div class=toast.kind.css_class() role="status">
                            <span class="toast__icon">{icon(toast.kind.icon_name())}</span>
                            <div class="toast__body">
                                <div class="toast__message">{toast.message.clone()}</div>
                                {(!details.is_empty()).then(|| view! {
                                    <ul class="toast__details">
                                        {details.into_iter().map(|d| view! { <li>{d}</li> }).collect_view()}
                                    </ul>
                                })}
                            </div>
                            <button class="toast__close" title="Dismiss" on:click=move |_| notifications.dismiss(id)>
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
