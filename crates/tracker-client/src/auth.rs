//! Sign-in token exchange with the auth endpoint
//!
//! The identity provider's widget produces an id token; this client trades
//! it for a session at `{auth}/signin` and ends the session at
//! `{auth}/signout`.

use crate::error::FetchError;
use crate::report::{report, ErrorReporter};
use crate::transport::{Transport, TransportRequest};
use serde_json::{json, Value};
use std::sync::Arc;
use tracker_model::User;

#[derive(Clone)]
pub struct AuthClient {
    endpoint: String,
    transport: Arc<dyn Transport>,
    reporter: Option<Arc<dyn ErrorReporter>>,
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl AuthClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            transport,
            reporter: None,
        }
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Exchange an id token for a session; `None` if validation failed
    pub async fn sign_in(&self, google_token: &str) -> Option<User> {
        match self.try_sign_in(google_token).await {
            Ok(user) => {
                tracing::info!(signed_in = user.signed_in, "sign-in verified");
                Some(user)
            }
            Err(err) => {
                report(self.reporter.as_deref(), &format!("Error in Validation: {err}"));
                None
            }
        }
    }

    pub async fn try_sign_in(&self, google_token: &str) -> Result<User, FetchError> {
        let request = TransportRequest::new(
            format!("{}/signin", self.endpoint),
            json!({ "google_token": google_token }),
        );
        let text = self.transport.post_json(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// End the session; returns the anonymous user on success
    pub async fn sign_out(&self) -> Option<User> {
        let request = TransportRequest::new(format!("{}/signout", self.endpoint), Value::Null);
        match self.transport.post_json(request).await {
            Ok(_) => Some(User::anonymous()),
            Err(err) => {
                report(self.reporter.as_deref(), &format!("Error Signing Out: {err}"));
                None
            }
        }
    }
}
