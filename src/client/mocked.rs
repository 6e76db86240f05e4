//! Stand-in backend used when no endpoint is configured.
//!
//! [`MockedClient`] waits a fixed, non-zero delay (so the awaiting state is
//! observable) and then returns deterministic placeholder text that embeds
//! the topic and the composed prompt.  It never fails.

use std::time::Duration;

use async_trait::async_trait;

use crate::client::{GenerationClient, GenerationError};
use crate::prompt::GenerationRequest;

pub struct MockedClient {
    latency: Duration,
}

impl MockedClient {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(800);

    /// A zero `latency` is raised to 1 ms.
    pub fn new(latency: Duration) -> Self {
        Self {
            latency: latency.max(Duration::from_millis(1)),
        }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for MockedClient {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

/// The synthetic body returned for `request`.
pub fn mock_text(request: &GenerationRequest) -> String {
    let topic = match request.topic() {
        "" => "your topic",
        t => t,
    };
    format!(
        "[Sample output: {topic}]\n\n\
         Prompt used:\n{prompt}\n\n\
         This is placeholder material generated offline. \
         Configure a generation endpoint to produce real content about {topic}.",
        prompt = request.prompt_text(),
    )
}

#[async_trait]
impl GenerationClient for MockedClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        tokio::time::sleep(self.latency).await;
        Ok(mock_text(request))
    }

    fn name(&self) -> &'static str {
        "mocked"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn request() -> GenerationRequest {
        GenerationRequest::new("Write a study guide about Cells.", "Cells").unwrap()
    }

    #[tokio::test]
    async fn output_embeds_prompt_and_topic() {
        let client = MockedClient::new(Duration::from_millis(5));
        let text = client.generate(&request()).await.unwrap();
        assert!(text.contains("Write a study guide about Cells."));
        assert!(text.contains("[Sample output: Cells]"));
    }

    #[tokio::test]
    async fn waits_for_configured_latency() {
        let client = MockedClient::new(Duration::from_millis(30));
        let started = Instant::now();
        client.generate(&request()).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn zero_latency_is_raised() {
        assert!(MockedClient::new(Duration::ZERO).latency() > Duration::ZERO);
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(mock_text(&request()), mock_text(&request()));
    }

    #[test]
    fn blank_topic_gets_generic_label() {
        let request = GenerationRequest::new("Custom prompt", "").unwrap();
        assert!(mock_text(&request).starts_with("[Sample output: your topic]"));
    }

    #[test]
    fn mock_text_passes_default_filter() {
        let filter = crate::filter::ContentFilter::default();
        assert!(filter.filter(&mock_text(&request())).is_some());
    }
}
