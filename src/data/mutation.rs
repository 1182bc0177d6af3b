//! Write controller with notification side effects.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::api::{ApiClient, ApiError, Envelope, RequestOptions};
use crate::data::collab::{Notification, Notifier};
use crate::data::{DEFAULT_MUTATION_ERROR, NETWORK_ERROR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationMethod {
    #[default]
    Create,
    Replace,
    Delete,
}

impl MutationMethod {
    pub fn http_method(self) -> Method {
        match self {
            MutationMethod::Create => Method::POST,
            MutationMethod::Replace => Method::PUT,
            MutationMethod::Delete => Method::DELETE,
        }
    }
}

type SuccessCallback = Box<dyn Fn(&Envelope<Value>) + Send + Sync>;
type ErrorCallback = Box<dyn Fn(&str) + Send + Sync>;

#[derive(Default)]
pub struct MutationOptions {
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
    success_message: Option<String>,
    error_message: Option<String>,
}

impl MutationOptions {
    pub fn on_success(mut self, f: impl Fn(&Envelope<Value>) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    pub fn success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Used when the server gives no message of its own.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

impl fmt::Debug for MutationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MutationOptions")
            .field("on_success", &self.on_success.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("success_message", &self.success_message)
            .field("error_message", &self.error_message)
            .finish()
    }
}

/// Write controller for one endpoint and method.
///
/// Calls are independent of each other; `loading` holds while at least one
/// call is running.
pub struct Mutation {
    client: ApiClient,
    endpoint: String,
    method: MutationMethod,
    options: MutationOptions,
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicUsize,
}

impl Mutation {
    pub fn new(
        client: ApiClient,
        endpoint: impl Into<String>,
        method: MutationMethod,
        options: MutationOptions,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            method,
            options,
            notifier,
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> MutationMethod {
        self.method
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Issue the write without a body.
    pub async fn mutate_empty(&self) -> bool {
        self.mutate::<Value>(None).await
    }

    /// Issue the write. Returns true when the server reports success.
    pub async fn mutate<B>(&self, body: Option<&B>) -> bool
    where
        B: Serialize + ?Sized,
    {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let _in_flight = scopeguard::guard(&self.in_flight, |count| {
            count.fetch_sub(1, Ordering::SeqCst);
        });

        match self.send(body).await {
            Ok(envelope) if envelope.success => {
                tracing::debug!(endpoint = %self.endpoint, method = ?self.method, "Mutation succeeded");
                if let Some(message) = &self.options.success_message {
                    self.notifier.notify(Notification::success(message.clone()));
                }
                if let Some(on_success) = &self.options.on_success {
                    on_success(&envelope);
                }
                true
            }
            Ok(envelope) => {
                let message = envelope
                    .server_message()
                    .or(self.options.error_message.as_deref())
                    .unwrap_or(DEFAULT_MUTATION_ERROR)
                    .to_string();
                tracing::warn!(endpoint = %self.endpoint, %message, "Mutation rejected");
                self.fail(&message);
                false
            }
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, kind = e.kind(), error = %e, "Mutation failed");
                self.fail(NETWORK_ERROR);
                false
            }
        }
    }

    async fn send<B>(&self, body: Option<&B>) -> Result<Envelope<Value>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut options = RequestOptions::method(self.method.http_method());
        if let Some(body) = body {
            options = options.with_body(serde_json::to_value(body).map_err(ApiError::Encode)?);
        }
        self.client.request(&self.endpoint, options).await?.envelope()
    }

    fn fail(&self, message: &str) {
        self.notifier.notify(Notification::error(message));
        if let Some(on_error) = &self.options.on_error {
            on_error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_mapping() {
        assert_eq!(MutationMethod::Create.http_method(), Method::POST);
        assert_eq!(MutationMethod::Replace.http_method(), Method::PUT);
        assert_eq!(MutationMethod::Delete.http_method(), Method::DELETE);
        assert_eq!(MutationMethod::default(), MutationMethod::Create);
    }

    #[test]
    fn test_options_debug_hides_callbacks() {
        let options = MutationOptions::default()
            .on_error(|_| {})
            .success_message("Saved");
        let debug = format!("{:?}", options);
        assert!(debug.contains("on_error: true"));
        assert!(debug.contains("on_success: false"));
        assert!(debug.contains("Saved"));
    }
}
