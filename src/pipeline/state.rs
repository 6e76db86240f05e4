//! Controller state machine values.
//!
//! [`ControllerState`] is the single lifecycle value the presentation layer
//! renders.  [`GenerationResult`] is the payload of a successful cycle.

// ---------------------------------------------------------------------------
// GenerationResult
// ---------------------------------------------------------------------------

/// Outcome of a successful generation call.
///
/// `elapsed_ms` and `token_estimate` are telemetry only and never influence
/// control flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    /// Text exactly as returned by the client.
    pub raw_text: String,
    /// The text that passed the content filter; `None` iff it was rejected.
    pub filtered_text: Option<String>,
    /// Time from entering `AwaitingResponse` to receiving the raw response.
    pub elapsed_ms: u64,
    /// Rough token count of `raw_text` (about four characters per token).
    pub token_estimate: u64,
}

impl GenerationResult {
    pub fn new(raw_text: String, filtered_text: Option<String>, elapsed_ms: u64) -> Self {
        let token_estimate = estimate_tokens(&raw_text);
        Self {
            raw_text,
            filtered_text,
            elapsed_ms,
            token_estimate,
        }
    }
}

/// Character-count heuristic: `ceil(chars / 4)`.
pub fn estimate_tokens(text: &str) -> u64 {
    (text.chars().count() as u64).div_ceil(4)
}

// ---------------------------------------------------------------------------
// ControllerState
// ---------------------------------------------------------------------------

/// States of the generation controller.
///
/// ```text
/// Idle ──submit──▶ Validating ──invalid──▶ Failed
///                  Validating ──▶ Composing ──▶ AwaitingResponse
///                  AwaitingResponse ──error──▶ Failed
///                  AwaitingResponse ──▶ Filtering ──pass──▶ Succeeded
///                                       Filtering ──reject─▶ Failed
/// Failed ──edit / submit──▶ Idle
/// Succeeded ──submit──▶ Idle ──▶ Validating
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ControllerState {
    #[default]
    Idle,
    Validating,
    Composing,
    /// Suspended on the generation client.
    AwaitingResponse,
    Filtering,
    Succeeded(GenerationResult),
    /// Carries the user-facing error message.
    Failed(String),
}

/// Payload-free discriminant of [`ControllerState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKind {
    Idle,
    Validating,
    Composing,
    AwaitingResponse,
    Filtering,
    Succeeded,
    Failed,
}

impl ControllerState {
    pub fn kind(&self) -> StateKind {
        match self {
            ControllerState::Idle => StateKind::Idle,
            ControllerState::Validating => StateKind::Validating,
            ControllerState::Composing => StateKind::Composing,
            ControllerState::AwaitingResponse => StateKind::AwaitingResponse,
            ControllerState::Filtering => StateKind::Filtering,
            ControllerState::Succeeded(_) => StateKind::Succeeded,
            ControllerState::Failed(_) => StateKind::Failed,
        }
    }

    /// Returns `true` while a cycle is in flight.
    ///
    /// New submissions are rejected while busy.
    ///
    /// ```
    /// use lesson_generator::pipeline::ControllerState;
    ///
    /// assert!(!ControllerState::Idle.is_busy());
    /// assert!(ControllerState::AwaitingResponse.is_busy());
    /// assert!(!ControllerState::Failed("x".into()).is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            ControllerState::Validating
                | ControllerState::Composing
                | ControllerState::AwaitingResponse
                | ControllerState::Filtering
        )
    }

    /// `Succeeded` or `Failed`.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ControllerState::Succeeded(_) | ControllerState::Failed(_)
        )
    }

    /// A short human-readable label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            ControllerState::Idle => "Idle",
            ControllerState::Validating => "Validating",
            ControllerState::Composing => "Composing",
            ControllerState::AwaitingResponse => "Generating",
            ControllerState::Filtering => "Filtering",
            ControllerState::Succeeded(_) => "Done",
            ControllerState::Failed(_) => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn succeeded() -> ControllerState {
        ControllerState::Succeeded(GenerationResult::new("text".into(), Some("text".into()), 5))
    }

    // ---- is_busy ---

    #[test]
    fn in_flight_states_are_busy() {
        for state in [
            ControllerState::Validating,
            ControllerState::Composing,
            ControllerState::AwaitingResponse,
            ControllerState::Filtering,
        ] {
            assert!(state.is_busy(), "{state:?} should be busy");
            assert!(!state.is_terminal());
        }
    }

    #[test]
    fn idle_and_terminal_states_are_not_busy() {
        assert!(!ControllerState::Idle.is_busy());
        assert!(!succeeded().is_busy());
        assert!(!ControllerState::Failed("boom".into()).is_busy());
    }

    #[test]
    fn terminal_states() {
        assert!(succeeded().is_terminal());
        assert!(ControllerState::Failed("boom".into()).is_terminal());
        assert!(!ControllerState::Idle.is_terminal());
    }

    // ---- label / kind ---

    #[test]
    fn labels() {
        assert_eq!(ControllerState::Idle.label(), "Idle");
        assert_eq!(ControllerState::AwaitingResponse.label(), "Generating");
        assert_eq!(succeeded().label(), "Done");
        assert_eq!(ControllerState::Failed(String::new()).label(), "Error");
    }

    #[test]
    fn kind_ignores_payload() {
        assert_eq!(succeeded().kind(), StateKind::Succeeded);
        assert_eq!(ControllerState::Failed("a".into()).kind(), StateKind::Failed);
    }

    #[test]
    fn default_is_idle() {
        assert_eq!(ControllerState::default(), ControllerState::Idle);
    }

    // ---- GenerationResult ---

    #[test]
    fn token_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
    }

    #[test]
    fn result_computes_token_estimate() {
        let result = GenerationResult::new("12345678".into(), None, 0);
        assert_eq!(result.token_estimate, 2);
        assert!(result.filtered_text.is_none());
    }
}
