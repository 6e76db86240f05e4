//! Post-generation content screen.
//!
//! A blunt safety net, not a classifier: text is rejected when it contains any
//! disallowed term as a case-insensitive substring.  Accepted text is returned
//! byte-for-byte unchanged.

/// Terms rejected by [`ContentFilter::default`].  Stored lowercase.
pub const DEFAULT_BLOCKED_TERMS: &[&str] = &[
    "cheat",
    "plagiarize",
    "self-harm",
    "kill yourself",
    "hate speech",
    "explicit content",
];

// ---------------------------------------------------------------------------
// ContentFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ContentFilter {
    blocked: Vec<String>,
}

impl ContentFilter {
    /// Filter with a custom term list.  Blank terms are ignored.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let blocked = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { blocked }
    }

    /// Returns `Some(text)` unchanged if it passes, `None` if any term matches.
    pub fn filter(&self, text: &str) -> Option<String> {
        match self.first_match(text) {
            Some(term) => {
                log::warn!("content filter: rejected output (matched {term:?})");
                None
            }
            None => Some(text.to_string()),
        }
    }

    /// The first blocked term found in `text`, if any.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        let haystack = text.to_lowercase();
        self.blocked
            .iter()
            .find(|term| haystack.contains(term.as_str()))
            .map(String::as_str)
    }

    pub fn terms(&self) -> &[String] {
        &self.blocked
    }
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCKED_TERMS)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_cheat_in_any_case() {
        let filter = ContentFilter::default();
        for text in ["cheat", "How to CHEAT on a test", "ChEaTiNg is bad", "cheatsheet"] {
            assert!(filter.filter(text).is_none(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn clean_text_passes_byte_for_byte() {
        let filter = ContentFilter::default();
        let text = "  Photosynthesis converts light into chemical energy.\n\tReview: 1) 2) 3)  ";
        assert_eq!(filter.filter(text).as_deref(), Some(text));
    }

    #[test]
    fn empty_text_passes() {
        assert_eq!(ContentFilter::default().filter("").as_deref(), Some(""));
    }

    #[test]
    fn multi_word_terms_match_as_substrings() {
        let filter = ContentFilter::default();
        assert!(filter.filter("This contains Hate Speech examples").is_none());
        assert!(filter.filter("hate and speech apart").is_some());
    }

    #[test]
    fn custom_terms_are_normalised() {
        let filter = ContentFilter::new(["  Forbidden ", "", "   "]);
        assert_eq!(filter.terms(), &["forbidden".to_string()]);
        assert!(filter.filter("totally FORBIDDEN words").is_none());
        assert!(filter.filter("cheat is allowed here").is_some());
    }

    #[test]
    fn first_match_reports_term() {
        let filter = ContentFilter::default();
        assert_eq!(filter.first_match("no cheating"), Some("cheat"));
        assert_eq!(filter.first_match("clean"), None);
    }

    #[test]
    fn default_terms_are_lowercase() {
        for term in DEFAULT_BLOCKED_TERMS {
            assert_eq!(*term, term.to_lowercase());
        }
    }
}
