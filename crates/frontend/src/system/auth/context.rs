use contracts::system::auth::{LoginRequest, SignupRequest};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use super::session::{Session, SessionEvent, SessionState};
use crate::shared::api_utils::{use_api, ApiClient, ApiError};

/// Restores a stored session once on mount, then renders `children`.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let api = use_api();
    spawn_local(async move {
        restore_session(&api).await;
    });

    children()
}

pub fn use_session() -> Session {
    use_context::<Session>().expect("Session not provided in context")
}

/// Validate the token left by a previous visit.
pub async fn restore_session(api: &ApiClient) {
    let session = api.session();
    let Some(token) = session.stored_token() else {
        return;
    };
    session.dispatch(SessionEvent::LoginStarted);
    match api::current_user(api, &token).await {
        Ok(user) => session.dispatch(SessionEvent::LoginSucceeded { token, user }),
        // the client already moved the session to Expired
        Err(ApiError::Unauthorized) => {}
        Err(e) => {
            log::warn!("could not restore session: {e}");
            fail_login(session);
        }
    }
}

fn fail_login(session: Session) {
    if session.state().get_untracked() == SessionState::Authenticating {
        session.dispatch(SessionEvent::LoginFailed);
    }
}

pub async fn sign_in(api: &ApiClient, identifier: &str, password: &str) -> Result<(), ApiError> {
    let session = api.session();
    session.dispatch(SessionEvent::LoginStarted);

    let request = LoginRequest {
        identifier: identifier.trim().to_string(),
        password: password.to_string(),
    };
    let result = async {
        let response = api::login(api, &request).await?;
        let user = api::current_user(api, &response.jwt_token).await?;
        Ok::<_, ApiError>((response.jwt_token, user))
    }
    .await;

    match result {
        Ok((token, user)) => {
            log::info!("signed in as {}", user.display_name());
            session.dispatch(SessionEvent::LoginSucceeded { token, user });
            Ok(())
        }
        Err(e) => {
            fail_login(session);
            Err(e)
        }
    }
}

/// Register, then sign in with the same email and password.
pub async fn sign_up(api: &ApiClient, request: SignupRequest) -> Result<(), ApiError> {
    request.validate().map_err(ApiError::Validation)?;
    api::register(api, &request).await?;
    sign_in(api, &request.email, &request.password).await
}

pub fn sign_out(session: Session) {
    session.dispatch(SessionEvent::Logout);
}
