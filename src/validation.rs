//! User input collected per submission, and the checks run before composition.
//!
//! [`validate`] evaluates every rule and accumulates all failures, so the
//! caller can render the complete problem list in one pass.

use thiserror::Error;

use crate::prompt::BUILTIN_TEMPLATES;

/// Minimum topic length in characters, measured after trimming.
pub const MIN_TOPIC_CHARS: usize = 3;

// ---------------------------------------------------------------------------
// GenerationInput
// ---------------------------------------------------------------------------

/// Raw form values for one generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInput {
    pub topic: String,
    /// Audience level or grade (e.g. `"Middle School"`).
    pub level: String,
    /// Duration in minutes.  Optional; when non-empty it must be numeric.
    pub duration: String,
    pub tone: String,
    pub length: String,
    pub template_id: String,
    /// When non-empty after trimming, sent verbatim instead of the template.
    pub custom_prompt: String,
}

impl Default for GenerationInput {
    fn default() -> Self {
        Self {
            topic: String::new(),
            level: String::new(),
            duration: String::new(),
            tone: "engaging".into(),
            length: "medium".into(),
            template_id: BUILTIN_TEMPLATES
                .first()
                .map(|t| t.id.to_string())
                .unwrap_or_default(),
            custom_prompt: String::new(),
        }
    }
}

impl GenerationInput {
    /// `true` when a non-blank custom prompt overrides the template.
    pub fn has_custom_prompt(&self) -> bool {
        !self.custom_prompt.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A single input-shape problem.  `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Topic is required.")]
    TopicMissing,

    #[error("Topic must be at least 3 characters.")]
    TopicTooShort,

    #[error("Level is required.")]
    LevelMissing,

    #[error("Duration must be a number.")]
    DurationNotNumeric,
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

/// Check `input`, returning every rule it breaks (empty = valid).
pub fn validate(input: &GenerationInput) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let topic = input.topic.trim();
    if topic.is_empty() {
        errors.push(ValidationError::TopicMissing);
    } else if topic.chars().count() < MIN_TOPIC_CHARS {
        errors.push(ValidationError::TopicTooShort);
    }

    if input.level.trim().is_empty() {
        errors.push(ValidationError::LevelMissing);
    }

    let duration = input.duration.trim();
    if !duration.is_empty() && !is_numeric(duration) {
        errors.push(ValidationError::DurationNotNumeric);
    }

    errors
}

/// Join validation messages into the single line shown in `Failed`.
pub fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

// `f64::from_str` accepts "inf" and "NaN"; neither is a duration.
fn is_numeric(value: &str) -> bool {
    value.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
