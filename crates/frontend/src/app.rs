use crate::layout::global_context::AppGlobalContext;
use crate::layout::{ModalHost, ModalService};
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::ApiClient;
use crate::shared::config::load_config;
use crate::shared::toast::{Notifications, Toaster};
use crate::system::auth::context::AuthProvider;
use crate::system::auth::session::Session;
use crate::system::auth::storage::TokenStorage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    let session = Session::new(TokenStorage::new(config.session.token_storage_key.clone()));
    provide_context(session);
    provide_context(Notifications::new(config.ui.toast_timeout_ms));
    provide_context(ApiClient::new(config.clone(), session));
    provide_context(config);

    provide_context(AppGlobalContext::new());
    provide_context(ModalService::new());

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <ModalHost />
        <Toaster />
    }
}
