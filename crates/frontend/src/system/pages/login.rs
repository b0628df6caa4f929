use contracts::system::auth::{looks_like_email, SignupRequest, UserRole, VerifyOtpRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::use_api;
use crate::shared::toast::use_notifications;
use crate::system::auth::api;
use crate::system::auth::context::{sign_in, sign_up, use_session};
use crate::system::auth::session::SessionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginMode {
    SignIn,
    SignUp,
    VerifyEmail,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let mode = RwSignal::new(LoginMode::SignIn);

    let expired = move || session.state().get() == SessionState::Expired;

    let tab = move |target: LoginMode, label: &'static str| {
        view! {
            <button
                class="login-tabs__tab"
                class:login-tabs__tab--active=move || mode.get() == target
                on:click=move |_| mode.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"QuickCourt"</h1>
                <h2>"Book local sports venues"</h2>

                <Show when=expired>
                    <div class="alert alert--warning">"Your session has expired. Please sign in again."</div>
                </Show>

                <div class="login-tabs">
                    {tab(LoginMode::SignIn, "Sign in")}
                    {tab(LoginMode::SignUp, "Sign up")}
                    {tab(LoginMode::VerifyEmail, "Verify email")}
                </div>

                {move || match mode.get() {
                    LoginMode::SignIn => view! { <SignInForm /> }.into_any(),
                    LoginMode::SignUp => view! { <SignUpForm /> }.into_any(),
                    LoginMode::VerifyEmail => view! { <VerifyEmailForm /> }.into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn SignInForm() -> impl IntoView {
    let api = use_api();
    let identifier = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let can_submit =
        move || !is_loading.get() && !identifier.get().trim().is_empty() && !password.get().is_empty();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if !can_submit() {
            return;
        }
        let api = api.clone();
        let identifier_val = identifier.get_untracked();
        let password_val = password.get_untracked();

        is_loading.set(true);
        error_message.set(None);

        spawn_local(async move {
            // success swaps LoginPage for the main layout
            if let Err(e) = sign_in(&api, &identifier_val, &password_val).await {
                error_message.set(Some(e.to_string()));
            }
            is_loading.set(false);
        });
    };

    view! {
        <Show when=move || error_message.get().is_some()>
            <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
        </Show>

        <form on:submit=on_submit>
            <div class="form-group">
                <label for="identifier">"Email or mobile number"</label>
                <input
                    type="text"
                    id="identifier"
                    autocomplete="username"
                    prop:value=move || identifier.get()
                    on:input=move |ev| identifier.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
            </div>

            <div class="form-group">
                <label for="password">"Password"</label>
                <input
                    type="password"
                    id="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                    disabled=move || is_loading.get()
                />
            </div>

            <button type="submit" class="btn-primary" disabled=move || !can_submit()>
                {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
            </button>
        </form>
    }
}

#[component]
fn SignUpForm() -> impl IntoView {
    let api = use_api();
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(UserRole::User);
    let error_message = RwSignal::new(Option::<String>::None);
    let is_loading = RwSignal::new(false);

    let request = move || SignupRequest {
        name: name.get().trim().to_string(),
        email: email.get().trim().to_string(),
        password: password.get(),
        role: role.get(),
    };
    let can_submit = move || !is_loading.get() && request().validate().is_ok();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let req = request();
        if let Err(e) = req.validate() {
            error_message.set(Some(e));
            return;
        }
        let api = api.clone();
        is_loading.set(true);
        error_message.set(None);
        spawn_local(async move {
            if let Err(e) = sign_up(&api, req).await {
                error_message.set(Some(e.to_string()));
            }
            is_loading.set(false);
        });
    };

    view! {
        <Show when=move || error_message.get().is_some()>
            <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
        </Show>

        <form on:submit=on_submit>
            <div class="form-group">
                <label for="signup-name">"Full name"</label>
                <input
                    type="text"
                    id="signup-name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="signup-email">"Email"</label>
                <input
                    type="email"
                    id="signup-email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="signup-password">"Password (min. 6 characters)"</label>
                <input
                    type="password"
                    id="signup-password"
                    autocomplete="new-password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </div>
            <div class="form-group">
                <label for="signup-role">"I am a"</label>
                <select
                    id="signup-role"
                    on:change=move |ev| {
                        if let Some(r) = UserRole::from_code(&event_target_value(&ev)) {
                            role.set(r);
                        }
                    }
                >
                    {UserRole::signup_choices().into_iter().map(|r| view! {
                        <option value=r.code() selected=move || role.get() == r>{r.display_name()}</option>
                    }).collect_view()}
                </select>
            </div>

            <button type="submit" class="btn-primary" disabled=move || !can_submit()>
                {move || if is_loading.get() { "Creating account..." } else { "Create account" }}
            </button>
        </form>
    }
}

#[component]
fn VerifyEmailForm() -> impl IntoView {
    let api = use_api();
    let notifications = use_notifications();
    let email = RwSignal::new(String::new());
    let otp = RwSignal::new(String::new());
    let otp_sent = RwSignal::new(false);
    let is_loading = RwSignal::new(false);
    let error_message = RwSignal::new(Option::<String>::None);

    let api_send = api.clone();
    let send_code = move |_| {
        let address = email.get_untracked();
        if !looks_like_email(&address) {
            error_message.set(Some("Enter a valid email address".into()));
            return;
        }
        let api = api_send.clone();
        is_loading.set(true);
        error_message.set(None);
        spawn_local(async move {
            match api::send_email_otp(&api, &address).await {
                Ok(()) => {
                    otp_sent.set(true);
                    notifications.success(format!("Verification code sent to {}", address.trim()));
                }
                Err(e) => error_message.set(Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    let verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let request = VerifyOtpRequest {
            email: email.get_untracked().trim().to_string(),
            otp: otp.get_untracked().trim().to_string(),
        };
        if request.otp.is_empty() {
            return;
        }
        let api = api.clone();
        is_loading.set(true);
        error_message.set(None);
        spawn_local(async move {
            match api::verify_otp(&api, &request).await {
                Ok(response) if response.success => {
                    notifications.success(response.message_or_default());
                    otp.set(String::new());
                }
                Ok(response) => error_message.set(Some(response.message_or_default())),
                Err(e) => error_message.set(Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    view! {
        <Show when=move || error_message.get().is_some()>
            <div class="error-message">{move || error_message.get().unwrap_or_default()}</div>
        </Show>

        <form on:submit=verify>
            <div class="form-group">
                <label for="otp-email">"Email"</label>
                <div class="form-row">
                    <input
                        type="email"
                        id="otp-email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                        disabled=move || is_loading.get()
                    />
                    <button type="button" class="btn" on:click=send_code disabled=move || is_loading.get()>
                        {move || if otp_sent.get() { "Resend code" } else { "Send code" }}
                    </button>
                </div>
            </div>

            <Show when=move || otp_sent.get()>
                <div class="form-group">
                    <label for="otp-code">"Verification code"</label>
                    <input
                        type="text"
                        id="otp-code"
                        inputmode="numeric"
                        maxlength="6"
                        prop:value=move || otp.get()
                        on:input=move |ev| otp.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="btn-primary"
                    disabled=move || is_loading.get() || otp.get().trim().is_empty()
                >
                    "Verify"
                </button>
            </Show>
        </form>
    }
}
