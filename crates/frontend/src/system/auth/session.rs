//! Bearer-token lifecycle.
//!
//! ```text
//! Anonymous --login_started--> Authenticating --login_succeeded--> Authenticated
//!     ^                            |    |                               |
//!     +-------- login_failed ------+    +--unauthorized--> Expired <----+
//! ```
//!
//! `logout` returns to `Anonymous` from anywhere. Every other pair is
//! rejected and leaves the state untouched.

use contracts::system::auth::{CurrentUser, UserRole};
use leptos::prelude::*;

use super::storage::TokenStorage;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated { token: String, user: CurrentUser },
    Expired,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    LoginStarted,
    LoginSucceeded { token: String, user: CurrentUser },
    LoginFailed,
    Logout,
    Unauthorized,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::LoginStarted => "login_started",
            SessionEvent::LoginSucceeded { .. } => "login_succeeded",
            SessionEvent::LoginFailed => "login_failed",
            SessionEvent::Logout => "logout",
            SessionEvent::Unauthorized => "unauthorized",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{event}` is not valid while {state}")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Anonymous => "anonymous",
            SessionState::Authenticating => "authenticating",
            SessionState::Authenticated { .. } => "authenticated",
            SessionState::Expired => "expired",
        }
    }

    pub fn transition(&self, event: SessionEvent) -> Result<SessionState, InvalidTransition> {
        use SessionEvent as E;
        use SessionState as S;

        let next = match (self, event) {
            (S::Anonymous | S::Expired, E::LoginStarted) => S::Authenticating,
            (S::Authenticating, E::LoginSucceeded { token, user }) => S::Authenticated { token, user },
            // profile refresh
            (S::Authenticated { .. }, E::LoginSucceeded { token, user }) => {
                S::Authenticated { token, user }
            }
            (S::Authenticating, E::LoginFailed) => S::Anonymous,
            (_, E::Logout) => S::Anonymous,
            (S::Authenticating | S::Authenticated { .. }, E::Unauthorized) => S::Expired,
            (state, event) => {
                return Err(InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                })
            }
        };
        Ok(next)
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }
}

/// Injectable handle over the session signal and its persisted token.
#[derive(Clone, Copy)]
pub struct Session {
    state: RwSignal<SessionState>,
    storage: StoredValue<TokenStorage>,
}

impl Session {
    pub fn new(storage: TokenStorage) -> Self {
        Self {
            state: RwSignal::new(SessionState::Anonymous),
            storage: StoredValue::new(storage),
        }
    }

    pub fn state(&self) -> Signal<SessionState> {
        self.state.into()
    }

    /// Apply an event; invalid ones are logged and ignored.
    pub fn dispatch(&self, event: SessionEvent) {
        let current = self.state.get_untracked();
        match current.transition(event) {
            Ok(next) => {
                log::debug!("session: {} -> {}", current.name(), next.name());
                self.persist(&next);
                self.state.set(next);
            }
            Err(e) => log::warn!("session: {e}"),
        }
    }

    fn persist(&self, next: &SessionState) {
        self.storage.with_value(|storage| match next {
            SessionState::Authenticated { token, .. } => storage.save(token),
            SessionState::Anonymous | SessionState::Expired => storage.clear(),
            SessionState::Authenticating => {}
        });
    }

    /// Token persisted by a previous visit, if any.
    pub fn stored_token(&self) -> Option<String> {
        self.storage.with_value(TokenStorage::load)
    }

    pub fn token_untracked(&self) -> Option<String> {
        self.state.with_untracked(|s| s.token().map(str::to_string))
    }

    pub fn user(&self) -> Option<CurrentUser> {
        self.state.with(|s| s.user().cloned())
    }

    pub fn role(&self) -> Option<UserRole> {
        self.state.with(|s| s.user().map(|u| u.role))
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn has_role(&self, required: UserRole) -> bool {
        self.role().is_some_and(|r| r.satisfies(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in() -> SessionState {
        SessionState::Authenticated {
            token: "t".into(),
            user: CurrentUser::default(),
        }
    }

    fn succeeded() -> SessionEvent {
        SessionEvent::LoginSucceeded {
            token: "t".into(),
            user: CurrentUser::default(),
        }
    }

    #[test]
    fn test_login_happy_path() {
        let s = SessionState::Anonymous
            .transition(SessionEvent::LoginStarted)
            .unwrap();
        assert_eq!(s, SessionState::Authenticating);
        let s = s.transition(succeeded()).unwrap();
        assert!(s.is_authenticated());
        assert_eq!(s.token(), Some("t"));
    }

    #[test]
    fn test_failed_login_returns_to_anonymous() {
        let s = SessionState::Authenticating
            .transition(SessionEvent::LoginFailed)
            .unwrap();
        assert_eq!(s, SessionState::Anonymous);
    }

    #[test]
    fn test_unauthorized_expires_session() {
        assert_eq!(
            signed_in().transition(SessionEvent::Unauthorized).unwrap(),
            SessionState::Expired
        );
        assert_eq!(
            SessionState::Authenticating
                .transition(SessionEvent::Unauthorized)
                .unwrap(),
            SessionState::Expired
        );
        let s = SessionState::Expired.transition(SessionEvent::LoginStarted).unwrap();
        assert_eq!(s, SessionState::Authenticating);
    }

    #[test]
    fn test_logout_from_every_state() {
        for s in [
            SessionState::Anonymous,
            SessionState::Authenticating,
            signed_in(),
            SessionState::Expired,
        ] {
            assert_eq!(s.transition(SessionEvent::Logout).unwrap(), SessionState::Anonymous);
        }
    }

    #[test]
    fn test_invalid_transitions_rejected() {
        let err = SessionState::Anonymous.transition(succeeded()).unwrap_err();
        assert_eq!(err.state, "anonymous");
        assert_eq!(err.event, "login_succeeded");
        assert!(SessionState::Anonymous
            .transition(SessionEvent::Unauthorized)
            .is_err());
        assert!(signed_in().transition(SessionEvent::LoginStarted).is_err());
        assert!(SessionState::Expired.transition(SessionEvent::LoginFailed).is_err());
    }
}
