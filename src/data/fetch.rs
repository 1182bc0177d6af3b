//! Authenticated read controller.
//!
//! A [`Fetcher`] owns one endpoint and the `(data, loading, error)` triple
//! for it. Calls go through [`ApiClient`]; outcomes are folded into
//! [`FetchState`] by [`FetchReducer`].
//!
//! Overlapping calls are resolved by cancellation: each call gets a child
//! token of the fetcher's scope plus a generation number. Starting a call
//! cancels the previous token, and a result is applied only while its token
//! is live and its generation is the latest one.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiClient, RequestOptions};
use crate::data::collab::{AuthState, Navigator};
use crate::data::{DEFAULT_FETCH_ERROR, DEFAULT_REDIRECT, NETWORK_ERROR};
use crate::ui::mvi::{Intent, Reducer, UiState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Where to send the user when the session is missing or rejected.
    pub redirect_to: String,
    /// Fetch as soon as the session resolves.
    pub immediate: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            redirect_to: DEFAULT_REDIRECT.to_string(),
            immediate: true,
        }
    }
}

impl FetchOptions {
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }

    pub fn deferred(mut self) -> Self {
        self.immediate = false;
        self
    }
}

/// Snapshot of one endpoint's read state.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// Empty when there is no error.
    pub error: String,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: true,
            error: String::new(),
        }
    }
}

impl<T> FetchState<T> {
    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

impl<T: Clone + PartialEq + Send + 'static> UiState for FetchState<T> {}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchIntent<T> {
    Started,
    Succeeded(Option<T>),
    Failed(String),
    /// Session rejected; data and error stay as they were.
    Redirected,
    /// Call abandoned; only the loading flag drops.
    Cancelled,
}

impl<T: Send + 'static> Intent for FetchIntent<T> {}

pub struct FetchReducer<T>(PhantomData<T>);

impl<T: Clone + PartialEq + Send + 'static> Reducer for FetchReducer<T> {
    type State = FetchState<T>;
    type Intent = FetchIntent<T>;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Started => FetchState {
                loading: true,
                ..state
            },
            FetchIntent::Succeeded(data) => FetchState {
                data,
                loading: false,
                error: String::new(),
            },
            FetchIntent::Failed(error) => FetchState {
                loading: false,
                error,
                ..state
            },
            FetchIntent::Redirected | FetchIntent::Cancelled => FetchState {
                loading: false,
                ..state
            },
        }
    }
}

/// What a single trigger ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Session still resolving; nothing happened.
    Pending,
    /// Empty endpoint, or `immediate` is off.
    Skipped,
    Loaded,
    Failed(String),
    Redirected,
    /// Superseded by a newer call or cancelled explicitly.
    Cancelled,
}

struct FetcherInner<T> {
    client: ApiClient,
    endpoint: String,
    options: FetchOptions,
    navigator: Arc<dyn Navigator>,
    state: Mutex<FetchState<T>>,
    generation: AtomicU64,
    in_flight: Mutex<Option<CancellationToken>>,
    scope: CancellationToken,
}

impl<T> Drop for FetcherInner<T> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// Read controller for one endpoint. Cheap to clone; clones share state.
pub struct Fetcher<T> {
    inner: Arc<FetcherInner<T>>,
}

impl<T> Clone for Fetcher<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Fetcher<T>
where
    T: DeserializeOwned + Clone + PartialEq + Send + 'static,
{
    pub fn new(
        client: ApiClient,
        endpoint: impl Into<String>,
        options: FetchOptions,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                client,
                endpoint: endpoint.into(),
                options,
                navigator,
                state: Mutex::new(FetchState::default()),
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                scope: CancellationToken::new(),
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn options(&self) -> &FetchOptions {
        &self.inner.options
    }

    /// React to a change in session status.
    ///
    /// Does nothing while the session is resolving. An anonymous session
    /// redirects without fetching.
    pub async fn on_auth_state(&self, auth: AuthState) -> FetchOutcome {
        if auth.loading {
            return FetchOutcome::Pending;
        }

        if !auth.is_authenticated {
            self.cancel();
            tracing::info!(
                endpoint = %self.inner.endpoint,
                redirect = %self.inner.options.redirect_to,
                "No session, redirecting"
            );
            self.inner.navigator.redirect(&self.inner.options.redirect_to);
            self.dispatch(FetchIntent::Redirected);
            return FetchOutcome::Redirected;
        }

        if !self.inner.options.immediate {
            return FetchOutcome::Skipped;
        }

        self.refetch().await
    }

    /// Fetch now, regardless of session gating. Supersedes any call in flight.
    pub async fn refetch(&self) -> FetchOutcome {
        let inner = &self.inner;
        if inner.endpoint.is_empty() {
            return FetchOutcome::Skipped;
        }

        let token = inner.scope.child_token();
        let generation = inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(previous) = inner.in_flight.lock().replace(token.clone()) {
            previous.cancel();
        }

        self.apply(generation, &token, FetchIntent::Started);

        let result = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::debug!(endpoint = %inner.endpoint, generation, "Fetch cancelled");
                return FetchOutcome::Cancelled;
            }
            result = inner.client.request(&inner.endpoint, RequestOptions::default()) => result,
        };

        let (intent, outcome) = match result {
            Ok(response) if response.is_unauthorized() => {
                (FetchIntent::Redirected, FetchOutcome::Redirected)
            }
            Ok(response) => match response.envelope::<Value>() {
                Ok(envelope) if envelope.success => match decode_data::<T>(envelope.data) {
                    Ok(data) => (FetchIntent::Succeeded(data), FetchOutcome::Loaded),
                    Err(e) => {
                        tracing::warn!(endpoint = %inner.endpoint, error = %e, "Unexpected data shape");
                        network_failure()
                    }
                },
                Ok(envelope) => {
                    let message = envelope.message_or(DEFAULT_FETCH_ERROR);
                    (
                        FetchIntent::Failed(message.clone()),
                        FetchOutcome::Failed(message),
                    )
                }
                Err(e) => {
                    tracing::warn!(endpoint = %inner.endpoint, kind = e.kind(), error = %e, "Undecodable response");
                    network_failure()
                }
            },
            Err(e) => {
                tracing::warn!(endpoint = %inner.endpoint, kind = e.kind(), error = %e, "Fetch failed");
                network_failure()
            }
        };

        if !self.apply(generation, &token, intent) {
            tracing::debug!(endpoint = %inner.endpoint, generation, "Discarding stale result");
            return FetchOutcome::Cancelled;
        }

        if outcome == FetchOutcome::Redirected {
            tracing::info!(
                endpoint = %inner.endpoint,
                redirect = %inner.options.redirect_to,
                "Session rejected, redirecting"
            );
            inner.navigator.redirect(&inner.options.redirect_to);
        }

        outcome
    }

    /// Cancel the call in flight, if any. Its result will not be applied.
    pub fn cancel(&self) {
        let Some(token) = self.inner.in_flight.lock().take() else {
            return;
        };
        if !token.is_cancelled() {
            token.cancel();
            self.dispatch(FetchIntent::Cancelled);
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.inner.state.lock().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.lock().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.lock().loading
    }

    pub fn error(&self) -> String {
        self.inner.state.lock().error.clone()
    }

    fn dispatch(&self, intent: FetchIntent<T>) {
        let mut state = self.inner.state.lock();
        let current = std::mem::take(&mut *state);
        *state = FetchReducer::<T>::reduce(current, intent);
    }

    /// Apply `intent` only if the call is still the live one.
    fn apply(&self, generation: u64, token: &CancellationToken, intent: FetchIntent<T>) -> bool {
        let mut state = self.inner.state.lock();
        if token.is_cancelled() || self.inner.generation.load(Ordering::SeqCst) != generation {
            return false;
        }
        let current = std::mem::take(&mut *state);
        *state = FetchReducer::<T>::reduce(current, intent);
        true
    }
}

/// Convert the payload of a successful envelope. Missing or null is `None`.
fn decode_data<T: DeserializeOwned>(data: Option<Value>) -> Result<Option<T>, serde_json::Error> {
    match data {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some),
    }
}

fn network_failure<T>() -> (FetchIntent<T>, FetchOutcome) {
    (
        FetchIntent::Failed(NETWORK_ERROR.to_string()),
        FetchOutcome::Failed(NETWORK_ERROR.to_string()),
    )
}
