//! Fills a template body from a [`GenerationInput`].
//!
//! A non-blank custom prompt always wins: it is used verbatim and no
//! substitution is applied to it.  Otherwise every recognised `{placeholder}`
//! in the template body is replaced, at every occurrence, in a single
//! left-to-right pass.  Substituted values are never re-scanned, so a topic
//! that itself contains `{level}` is inserted literally.  Unrecognised tokens
//! pass through unchanged.

use crate::prompt::registry::Template;
use crate::validation::GenerationInput;

/// Recognised placeholder names.  `grade` is an alias of `level`.
pub const PLACEHOLDERS: &[&str] = &["topic", "level", "grade", "duration", "tone", "length"];

// ---------------------------------------------------------------------------
// GenerationRequest
// ---------------------------------------------------------------------------

/// The final prompt for one generation cycle.
///
/// `prompt_text` is never blank.  `topic` travels alongside as metadata for
/// clients that echo it (it is not part of the wire request).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    prompt_text: String,
    topic: String,
}

impl GenerationRequest {
    /// Returns `None` when `prompt_text` is blank.
    pub fn new(prompt_text: impl Into<String>, topic: impl Into<String>) -> Option<Self> {
        let prompt_text = prompt_text.into();
        if prompt_text.trim().is_empty() {
            return None;
        }
        Some(Self {
            prompt_text,
            topic: topic.into(),
        })
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }
}

// ---------------------------------------------------------------------------
// compose
// ---------------------------------------------------------------------------

/// Build the request for `input`, using `template` unless a custom prompt is set.
///
/// Composition never fails.
///
/// ```
/// use lesson_generator::prompt::{compose, TemplateRegistry};
/// use lesson_generator::validation::GenerationInput;
///
/// let registry = TemplateRegistry::builtin();
/// let input = GenerationInput {
///     topic: "Photosynthesis".into(),
///     level: "High School".into(),
///     ..GenerationInput::default()
/// };
/// let request = compose(&input, registry.resolve("quiz").unwrap());
/// assert!(request.prompt_text().contains("Photosynthesis"));
/// ```
pub fn compose(input: &GenerationInput, template: &Template) -> GenerationRequest {
    let topic = input.topic.trim();

    if input.has_custom_prompt() {
        if let Some(request) = GenerationRequest::new(input.custom_prompt.clone(), topic) {
            return request;
        }
    }

    let filled = fill_placeholders(template.body, input);
    if let Some(request) = GenerationRequest::new(filled, topic) {
        return request;
    }

    // Only reachable with a template body made entirely of empty placeholders.
    log::warn!(
        "compose: template {:?} produced an empty prompt; using its title",
        template.id
    );
    GenerationRequest {
        prompt_text: format!("{} about {}", template.title, topic),
        topic: topic.to_string(),
    }
}

fn placeholder_value<'a>(name: &str, input: &'a GenerationInput) -> Option<&'a str> {
    let value = match name {
        "topic" => &input.topic,
        "level" | "grade" => &input.level,
        "duration" => &input.duration,
        "tone" => &input.tone,
        "length" => &input.length,
        _ => return None,
    };
    Some(value.trim())
}

fn fill_placeholders(body: &str, input: &GenerationInput) -> String {
    let mut out = String::with_capacity(body.len() + 64);
    let mut rest = body;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        match placeholder_value(&after[..close], input) {
            Some(value) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                // Not ours: keep the brace and rescan from the next character.
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
