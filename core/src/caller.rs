//! The generic API-call wrapper.
//!
//! # Design
//! `ApiCaller::call` runs one request through a fixed sequence: connectivity
//! check, loader on, transport, loader off, status dispatch. The connectivity
//! check and the transport both run on tokio's blocking pool. Errors never
//! escape as panics; each branch is logged and returned as an `ApiError`,
//! with the generic notice shown where the dispatch calls for it. The caller keeps no state between calls, and
//! overlapping calls are not coordinated.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::host::{Host, StringKey};
use crate::http::HttpRequest;
use crate::status::parse_response;
use crate::transport::Transport;

#[derive(Clone)]
pub struct ApiCaller {
    transport: Arc<dyn Transport>,
    host: Host,
}

impl ApiCaller {
    pub fn new(transport: Arc<dyn Transport>, host: Host) -> Self {
        Self { transport, host }
    }

    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Execute `request` and decode a 200 body as `T`.
    ///
    /// `Ok(None)` is a 200 with an empty or `null` body. With `loader` set,
    /// the loading sink sees `true` before the request; it always sees
    /// exactly one `false` once the request has been attempted.
    pub async fn call<T: DeserializeOwned>(
        &self,
        request: HttpRequest,
        loader: bool,
    ) -> Result<Option<T>, ApiError> {
        if !self.is_online().await {
            warn!(url = %request.url, "offline, request not sent");
            self.notify_key(StringKey::DeviceOffline);
            return Err(ApiError::Offline);
        }

        if loader {
            self.host.loading.set_loading(true);
        }
        let url = request.url.clone();
        let transport = Arc::clone(&self.transport);
        let joined = tokio::task::spawn_blocking(move || transport.execute(&request)).await;
        self.host.loading.set_loading(false);

        let response = match joined {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                error!(url = %url, error = %err, "request failed");
                self.host.notifier.notify(&err.to_string());
                return Err(err);
            }
            Err(join_err) => {
                error!(url = %url, error = %join_err, "request worker did not complete");
                return Err(ApiError::Transport(join_err.to_string()));
            }
        };

        let outcome = parse_response::<T>(&response);
        match &outcome {
            Ok(Some(_)) => debug!(url = %url, status = response.status, "response decoded"),
            Ok(None) => debug!(url = %url, status = response.status, "response had no body"),
            Err(ApiError::Deserialization(msg)) => {
                error!(url = %url, error = %msg, "could not decode response body")
            }
            Err(err) => warn!(
                url = %url,
                status = response.status,
                message = err.failure().map(|(m, _)| m).unwrap_or_default(),
                "request returned an error status"
            ),
        }
        if let Err(err) = &outcome {
            if err.shows_generic_notice() {
                self.notify_key(StringKey::SomeError);
            }
        }
        outcome
    }

    /// Connectivity checks may resolve names or open sockets, so they run on
    /// the blocking pool like the transport does.
    async fn is_online(&self) -> bool {
        let connectivity = Arc::clone(&self.host.connectivity);
        match tokio::task::spawn_blocking(move || connectivity.is_online()).await {
            Ok(online) => online,
            Err(join_err) => {
                error!(error = %join_err, "connectivity check did not complete");
                false
            }
        }
    }

    fn notify_key(&self, key: StringKey) {
        self.host.notifier.notify(&self.host.strings.lookup(key));
    }
}
