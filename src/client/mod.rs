//! Generation backends.
//!
//! This module provides:
//! * [`GenerationClient`]: async trait, prompt in, raw generated text out.
//! * [`LiveClient`]: POSTs `{"prompt": …}` to a configured HTTP endpoint.
//! * [`MockedClient`]: synthetic output after a short simulated delay; used
//!   when no endpoint is configured.
//! * [`from_config`]: picks one of the two, once, at startup.
//! * [`GenerationError`]: failure variants for a generation call.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use lesson_generator::client;
//! use lesson_generator::config::AppConfig;
//! use lesson_generator::prompt::GenerationRequest;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let client = client::from_config(&config.generation);
//!
//!     let request = GenerationRequest::new("Write a quiz on cells.", "Cells").unwrap();
//!     let text = client.generate(&request).await.unwrap();
//!     println!("{text}");
//! }
//! ```

pub mod extract;
pub mod live;
pub mod mocked;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::GenerationConfig;
use crate::prompt::GenerationRequest;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use extract::{extract_text, upstream_error_message};
pub use live::LiveClient;
pub use mocked::MockedClient;

// ---------------------------------------------------------------------------
// GenerationError
// ---------------------------------------------------------------------------

/// Errors that can occur while obtaining generated text.
///
/// `Display` is the message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Network failure or non-success status.  Carries the upstream message
    /// when the endpoint supplied one.
    #[error("{0}")]
    Transport(String),

    /// The request exceeded the configured timeout.
    #[error("The generation request timed out.")]
    Timeout,

    /// The response body was not valid JSON.
    #[error("Could not parse the generation response: {0}")]
    Parse(String),

    /// The endpoint answered but the extracted text was blank.
    #[error("The generation service returned an empty response.")]
    EmptyResponse,
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Transport(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationClient trait
// ---------------------------------------------------------------------------

/// Async source of generated text.
///
/// Implementors must be `Send + Sync` so the controller can hold them as
/// `Arc<dyn GenerationClient>`.  One call per controller cycle; callers do
/// not retry.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;

    /// Short backend label for logs and status output.
    fn name(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// Strategy selection
// ---------------------------------------------------------------------------

/// Select the backend for this process: live when an endpoint is configured,
/// mocked otherwise.
pub fn from_config(config: &GenerationConfig) -> Arc<dyn GenerationClient> {
    match config.endpoint() {
        Some(endpoint) => {
            log::info!(
                "generation: live endpoint {endpoint} (credential {})",
                if config.api_key().is_some() { "set" } else { "not set" }
            );
            Arc::new(LiveClient::new(endpoint, config.api_key(), config.timeout()))
        }
        None => {
            log::info!("generation: no endpoint configured, using mocked client");
            Arc::new(MockedClient::new(config.mock_latency()))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_endpoint_selects_mocked() {
        let config = GenerationConfig::default();
        assert_eq!(from_config(&config).name(), "mocked");
    }

    #[test]
    fn blank_endpoint_selects_mocked() {
        let config = GenerationConfig {
            endpoint: Some("   ".into()),
            ..GenerationConfig::default()
        };
        assert_eq!(from_config(&config).name(), "mocked");
    }

    #[test]
    fn endpoint_selects_live() {
        let config = GenerationConfig {
            endpoint: Some("http://localhost:8080/generate".into()),
            api_key: Some("sk-test".into()),
            ..GenerationConfig::default()
        };
        assert_eq!(from_config(&config).name(), "live");
    }

    #[test]
    fn transport_error_displays_upstream_message_verbatim() {
        let err = GenerationError::Transport("Rate limit exceeded".into());
        assert_eq!(err.to_string(), "Rate limit exceeded");
    }

    /// Verify that both backends are object-safe (usable as `dyn GenerationClient`).
    #[test]
    fn clients_are_object_safe() {
        let live: Box<dyn GenerationClient> =
            Box::new(LiveClient::new("http://localhost:1", None, None));
        let mocked: Box<dyn GenerationClient> =
            Box::new(MockedClient::new(std::time::Duration::from_millis(1)));
        drop((live, mocked));
    }
}
