//! REST client for the booking backend.
//!
//! Every response is read as text and decoded into a typed record here, so
//! nothing untyped reaches page state. A 401 on a request that carried the
//! bearer token expires the session.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use contracts::shared::api_error::ErrorBody;
use gloo_net::http::{Request, RequestBuilder};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::shared::config::AppConfig;
use crate::system::auth::session::{Session, SessionEvent};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    #[error("Unexpected response from server: {0}")]
    Parse(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    ///
    /// A 401 only means an expired session when a token was sent; a failed
    /// sign-in keeps the server's message.
    pub fn from_response(status: u16, body: &str, had_token: bool) -> Self {
        if status == 401 && had_token {
            return ApiError::Unauthorized;
        }
        let message =
            ErrorBody::message_from_text(body).unwrap_or_else(|| format!("HTTP {status}"));
        ApiError::Server { status, message }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

/// Decode a response body. An empty body decodes as JSON `null`.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let text = if text.trim().is_empty() { "null" } else { text };
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

fn encode_query<Q: Serialize>(query: &Q) -> Result<String, ApiError> {
    serde_qs::to_string(query).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Shared "no longer interested" flag for the requests of one view.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Ticket issued by a [`RequestSequencer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Monotonic tokens for one logical query; only the newest ticket's
/// response may be applied.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer(Arc<AtomicU64>);

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        self.0.load(Ordering::SeqCst) == ticket.0
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy)]
enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

enum Body {
    Empty,
    Json(String),
    Form(String),
}

#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    session: Session,
    cancel: Option<CancelToken>,
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Session) -> Self {
        Self {
            config,
            session,
            cancel: None,
        }
    }

    /// A client whose requests resolve to [`ApiError::Cancelled`] once
    /// `token` is cancelled.
    pub fn with_cancel(&self, token: &CancelToken) -> Self {
        Self {
            cancel: Some(token.clone()),
            ..self.clone()
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> Session {
        self.session
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    fn builder(&self, verb: Verb, url: &str) -> RequestBuilder {
        match verb {
            Verb::Get => Request::get(url),
            Verb::Post => Request::post(url),
            Verb::Put => Request::put(url),
            Verb::Delete => Request::delete(url),
        }
    }

    async fn send(
        &self,
        verb: Verb,
        path: &str,
        query: Option<String>,
        body: Body,
        bearer: Option<String>,
    ) -> Result<String, ApiError> {
        if self.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let mut url = self.config.url(path);
        if let Some(q) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&q);
        }

        let mut builder = self.builder(verb, &url);
        if let Some(token) = &bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }

        let controller = web_sys::AbortController::new().ok();
        let signal = controller.as_ref().map(|c| c.signal());
        builder = builder.abort_signal(signal.as_ref());

        let timed_out = Rc::new(Cell::new(false));
        let _timer = controller.map(|c| {
            let flag = timed_out.clone();
            Timeout::new(self.config.api.request_timeout_ms, move || {
                flag.set(true);
                c.abort();
            })
        });

        let request = match body {
            Body::Empty => builder.build(),
            Body::Json(json) => builder.header("Content-Type", "application/json").body(json),
            Body::Form(form) => builder
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(form),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let response = request.send().await.map_err(|e| {
            if timed_out.get() {
                ApiError::Network("request timed out".into())
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if self.is_cancelled() {
            log::debug!("discarding response of cancelled request {path}");
            return Err(ApiError::Cancelled);
        }

        if !(200..300).contains(&status) {
            let error = ApiError::from_response(status, &text, bearer.is_some());
            log::warn!("{verb:?} {path} failed with {status}: {error}");
            if error == ApiError::Unauthorized {
                self.session.dispatch(SessionEvent::Unauthorized);
            }
            return Err(error);
        }

        Ok(text)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        verb: Verb,
        path: &str,
        query: Option<String>,
        body: Body,
    ) -> Result<T, ApiError> {
        let bearer = self.session.token_untracked();
        let text = self.send(verb, path, query, body, bearer).await?;
        decode(&text)
    }

    async fn request_ok(
        &self,
        verb: Verb,
        path: &str,
        query: Option<String>,
        body: Body,
    ) -> Result<(), ApiError> {
        let bearer = self.session.token_untracked();
        self.send(verb, path, query, body, bearer).await.map(|_| ())
    }

    fn json<B: Serialize>(body: &B) -> Result<Body, ApiError> {
        serde_json::to_string(body)
            .map(Body::Json)
            .map_err(|e| ApiError::Validation(e.to_string()))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Verb::Get, path, None, Body::Empty).await
    }

    pub async fn get_query<Q: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, ApiError> {
        let query = encode_query(query)?;
        self.request(Verb::Get, path, Some(query), Body::Empty).await
    }

    /// GET with an explicit bearer token, for validating a stored session.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, ApiError> {
        let text = self
            .send(Verb::Get, path, None, Body::Empty, Some(token.to_string()))
            .await?;
        decode(&text)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Verb::Post, path, None, Self::json(body)?).await
    }

    pub async fn post_ok<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.request_ok(Verb::Post, path, None, Self::json(body)?).await
    }

    /// POST without a body, parameters in the query string.
    pub async fn post_query_ok<Q: Serialize>(&self, path: &str, query: &Q) -> Result<(), ApiError> {
        let query = encode_query(query)?;
        self.request_ok(Verb::Post, path, Some(query), Body::Empty).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Verb::Post, path, None, Body::Empty).await
    }

    pub async fn post_empty_ok(&self, path: &str) -> Result<(), ApiError> {
        self.request_ok(Verb::Post, path, None, Body::Empty).await
    }

    /// POST as `application/x-www-form-urlencoded`.
    pub async fn post_form_ok<B: Serialize>(&self, path: &str, form: &B) -> Result<(), ApiError> {
        let form = encode_query(form)?;
        self.request_ok(Verb::Post, path, None, Body::Form(form)).await
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.request(Verb::Put, path, None, Self::json(body)?).await
    }

    pub async fn put_empty_ok(&self, path: &str) -> Result<(), ApiError> {
        self.request_ok(Verb::Put, path, None, Body::Empty).await
    }

    pub async fn delete_ok(&self, path: &str) -> Result<(), ApiError> {
        self.request_ok(Verb::Delete, path, None, Body::Empty).await
    }
}

/// The client provided by `App`.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided in context")
}

/// A client whose requests are cancelled when the calling view is disposed.
pub fn use_scoped_api() -> ApiClient {
    let token = CancelToken::new();
    let api = use_api().with_cancel(&token);
    on_cleanup(move || token.cancel());
    api
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::page::PageEnvelope;

    #[test]
    fn test_server_error_message_extraction() {
        let e = ApiError::from_response(409, r#"{"message":"Slot already booked"}"#, true);
        assert_eq!(
            e,
            ApiError::Server {
                status: 409,
                message: "Slot already booked".into()
            }
        );
        assert_eq!(e.to_string(), "Slot already booked");

        let e = ApiError::from_response(500, "<html>oops</html>", true);
        assert_eq!(e.to_string(), "HTTP 500");

        let e = ApiError::from_response(404, "Court not found", true);
        assert_eq!(e.to_string(), "Court not found");

        let e = ApiError::from_response(502, "", false);
        assert_eq!(e.to_string(), "HTTP 502");
    }

    #[test]
    fn test_unauthorized_only_with_token() {
        assert_eq!(ApiError::from_response(401, "", true), ApiError::Unauthorized);
        let e = ApiError::from_response(401, r#"{"error":"Invalid credentials"}"#, false);
        assert_eq!(e.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_decode_typed_and_empty() {
        let page: PageEnvelope<u32> =
            decode(r#"{"content":[1],"totalPages":1,"totalElements":1,"number":0}"#).unwrap();
        assert_eq!(page.content, vec![1]);
        let unit: () = decode("").unwrap();
        assert_eq!(unit, ());
        let missing: Option<u32> = decode("  ").unwrap();
        assert_eq!(missing, None);
        assert!(matches!(decode::<PageEnvelope<u32>>("[1,2"), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_query_encoding() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Q {
            date: chrono::NaiveDate,
            start_time: String,
        }
        let q = Q {
            date: chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            start_time: "09:00".into(),
        };
        let encoded = encode_query(&q).unwrap();
        assert!(encoded.starts_with("date=2024-05-01&startTime=09"));
    }

    #[test]
    fn test_sequencer_discards_stale_tickets() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
        seq.invalidate();
        assert!(!seq.is_latest(second));
        let clone = seq.clone();
        let third = clone.issue();
        assert!(seq.is_latest(third));
    }

    #[test]
    fn test_cancel_token_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        assert!(ApiError::Cancelled.is_cancelled());
    }
}
