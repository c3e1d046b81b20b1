//! HTTP session gateway.
//!
//! Posts the [`LoginRequest`] as JSON to the backend and reads back a
//! [`SessionResponse`]. The number of requests in flight doubles as the
//! session store's loading indicator.

use crate::config::SessionEndpointConfig;
use crate::credential::{LoginRequest, SessionResponse};
use crate::error::{ActionError, HttpGatewayError};
use crate::providers::SessionGateway;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

/// Session gateway backed by an HTTP endpoint.
///
/// # Examples
///
/// ```no_run
/// use signin_trigger::config::SessionEndpointConfig;
/// use signin_trigger::providers::HttpSessionGateway;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let gateway = HttpSessionGateway::new(SessionEndpointConfig::new("https://api.example.com"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HttpSessionGateway {
    client: Client,
    config: SessionEndpointConfig,
    in_flight: Arc<AtomicUsize>,
}

/// Error body shape returned by the backend on rejection.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Decrements the in-flight counter when a request ends, however it ends.
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl HttpSessionGateway {
    /// Create a gateway for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`HttpGatewayError::Client`] if the HTTP client cannot be built.
    pub fn new(config: SessionEndpointConfig) -> Result<Self, HttpGatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| HttpGatewayError::Client(e.to_string()))?;

        Ok(Self {
            client,
            config,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Endpoint configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionEndpointConfig {
        &self.config
    }

    /// Post a login request.
    ///
    /// # Errors
    ///
    /// - [`HttpGatewayError::RequestFailed`] on transport failure or timeout
    /// - [`HttpGatewayError::Rejected`] on a non-success status
    /// - [`HttpGatewayError::ResponseParseFailed`] if a success body is malformed
    pub async fn post(&self, request: &LoginRequest) -> Result<SessionResponse, HttpGatewayError> {
        let url = self.config.login_url();
        debug!(%url, uid = %request.uid, "Posting login request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| HttpGatewayError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SessionResponse>()
                .await
                .map_err(|e| HttpGatewayError::ResponseParseFailed(e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = rejection_message(status, &body);
        warn!(status = status.as_u16(), %message, "Backend rejected login request");

        Err(HttpGatewayError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pick the user-facing message out of a rejection body.
fn rejection_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map_or_else(|| format!("HTTP {}", status.as_u16()), str::to_string)
        })
}

impl SessionGateway for HttpSessionGateway {
    fn establish_session(
        &self,
        request: LoginRequest,
    ) -> impl Future<Output = Result<SessionResponse, ActionError>> + Send {
        let gateway = self.clone();

        async move {
            let _in_flight = InFlight::enter(&gateway.in_flight);
            gateway.post(&request).await.map_err(ActionError::from)
        }
    }

    fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }
}

impl std::fmt::Debug for HttpSessionGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSessionGateway")
            .field("login_url", &self.config.login_url())
            .field("in_flight", &self.in_flight.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_body_message() {
        let message = rejection_message(StatusCode::UNAUTHORIZED, r#"{"message":"Invalid Google token"}"#);
        assert_eq!(message, "Invalid Google token");

        let message = rejection_message(StatusCode::BAD_REQUEST, r#"{"error":"uid missing"}"#);
        assert_eq!(message, "uid missing");
    }

    #[test]
    fn rejection_falls_back_to_status_reason() {
        assert_eq!(rejection_message(StatusCode::BAD_GATEWAY, "<html>"), "Bad Gateway");
        assert_eq!(rejection_message(StatusCode::UNAUTHORIZED, r#"{"message":""}"#), "Unauthorized");
    }
}
