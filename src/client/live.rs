//! HTTP-backed [`GenerationClient`].
//!
//! Sends `POST <endpoint>` with body `{"prompt": "<prompt text>"}` and
//! `Content-Type: application/json`.  `Authorization: Bearer …` is attached
//! only when a non-empty credential is configured.  There are no retries.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::client::extract::{extract_text, upstream_error_message};
use crate::client::{GenerationClient, GenerationError};
use crate::prompt::GenerationRequest;

// ---------------------------------------------------------------------------
// LiveClient
// ---------------------------------------------------------------------------

pub struct LiveClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl LiveClient {
    /// Build a client for `endpoint`.
    ///
    /// `timeout` of `None` leaves reqwest's default (no overall timeout), so
    /// a stalled endpoint keeps the call pending until the caller gives up.
    pub fn new(endpoint: &str, api_key: Option<&str>, timeout: Option<Duration>) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|e| {
            log::warn!("live client: builder failed ({e}); using default client");
            reqwest::Client::new()
        });
        Self::with_http_client(client, endpoint, api_key)
    }

    /// Build around an already-configured `reqwest::Client`.
    pub fn with_http_client(
        client: reqwest::Client,
        endpoint: &str,
        api_key: Option<&str>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.trim().to_string(),
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for LiveClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let body = serde_json::json!({ "prompt": request.prompt_text() });

        let mut req = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = self.api_key.as_deref() {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log::warn!("live client: endpoint returned {status}");
            return Err(GenerationError::Transport(upstream_error_message(
                status.as_u16(),
                &text,
            )));
        }

        let json: Value =
            serde_json::from_str(&text).map_err(|e| GenerationError::Parse(e.to_string()))?;

        let generated = extract_text(&json);
        if generated.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        log::debug!("live client: received {} bytes of generated text", generated.len());
        Ok(generated)
    }

    fn name(&self) -> &'static str {
        "live"
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
