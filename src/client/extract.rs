//! Tolerant extraction of generated text and error messages from provider
//! response bodies.
//!
//! Success precedence, skipping blank values:
//! 1. `choices[0].message.content` (OpenAI-style chat completion)
//! 2. `result`
//! 3. `text`
//! 4. the whole body, serialised back to text

use serde_json::Value;

/// Pull the generated text out of a parsed success body.
pub fn extract_text(body: &Value) -> String {
    let fields = [
        &body["choices"][0]["message"]["content"],
        &body["result"],
        &body["text"],
    ];
    let known = fields
        .iter()
        .filter_map(|field| field.as_str())
        .find(|text| !text.trim().is_empty());

    match (known, body) {
        (Some(text), _) => text.to_string(),
        // Known fields present but all blank: nothing was generated.
        (None, _) if fields.iter().any(|field| field.is_string()) => String::new(),
        // A bare JSON string is already text; don't re-quote it.
        (None, Value::String(text)) => text.clone(),
        (None, other) => other.to_string(),
    }
}

/// Best-effort human-readable message for a non-success response.
///
/// Looks for `error.message`, `error` (string) and `message` in a JSON body,
/// then falls back to the raw body, then to the status code.
pub fn upstream_error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        let found = json["error"]["message"]
            .as_str()
            .or_else(|| json["error"].as_str())
            .or_else(|| json["message"].as_str());
        if let Some(message) = found.map(str::trim).filter(|m| !m.is_empty()) {
            return message.to_string();
        }
    }

    let raw = body.trim();
    if raw.is_empty() {
        format!("request failed with status {status}")
    } else {
        raw.to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
