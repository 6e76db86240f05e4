//! Template catalog and id resolution.
//!
//! [`BUILTIN_TEMPLATES`] is the process-wide, read-only catalog.  Declaration
//! order is meaningful: it is the menu order shown to the user, and the first
//! entry is the implicit default selection.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Template
// ---------------------------------------------------------------------------

/// A named prompt skeleton with `{placeholder}` slots.
///
/// See [`crate::prompt::PLACEHOLDERS`] for the recognised vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Unique identifier (e.g. `"study-guide"`), used by `GenerationInput::template_id`.
    pub id: &'static str,
    /// Human-readable title shown in template menus.
    pub title: &'static str,
    /// Prompt body containing placeholder tokens.
    pub body: &'static str,
}

// ---------------------------------------------------------------------------
// Built-in catalog
// ---------------------------------------------------------------------------

/// Built-in templates, in menu order.  The first entry is the default.
pub const BUILTIN_TEMPLATES: &[Template] = &[
    Template {
        id: "lesson-plan",
        title: "Lesson Plan",
        body: "Create a {length} lesson plan on {topic} for {level} students. \
               The lesson should last {duration} minutes and use a {tone} tone. \
               Include learning objectives, a warm-up activity, direct instruction, \
               guided practice, and an exit ticket that checks understanding of {topic}.",
    },
    Template {
        id: "study-guide",
        title: "Study Guide",
        body: "Write a {length} study guide about {topic} for {level} learners in a {tone} tone. \
               Summarize the key ideas of {topic}, define the essential vocabulary, \
               and finish with five review questions. \
               Plan for about {duration} minutes of independent study.",
    },
    Template {
        id: "quiz",
        title: "Quiz",
        body: "Write a {length} quiz on {topic} for {level} students. \
               Use a {tone} tone, mix multiple-choice and short-answer questions, \
               and include an answer key. The quiz should take about {duration} minutes.",
    },
    Template {
        id: "worksheet",
        title: "Practice Worksheet",
        body: "Design a {length} practice worksheet on {topic} for {level} students. \
               Keep the tone {tone} and give clear instructions for each section.",
    },
    Template {
        id: "discussion-prompts",
        title: "Discussion Prompts",
        body: "Draft discussion prompts about {topic} for a {level} class session \
               of {duration} minutes. Keep the tone {tone} and order the prompts \
               from simple recall to open-ended reflection.",
    },
];

// ---------------------------------------------------------------------------
// UnknownTemplateError
// ---------------------------------------------------------------------------

/// Raised when a template id has no entry in the registry.
///
/// With a well-formed registry this indicates a programming error (an id
/// that was never offered to the user), not a user-facing problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template id: {id:?}")]
pub struct UnknownTemplateError {
    pub id: String,
}

// ---------------------------------------------------------------------------
// TemplateRegistry
// ---------------------------------------------------------------------------

/// Read-only view over a static template catalog.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRegistry {
    templates: &'static [Template],
}

impl TemplateRegistry {
    /// Registry over an explicit catalog (useful for tests).
    pub const fn new(templates: &'static [Template]) -> Self {
        Self { templates }
    }

    /// Registry over [`BUILTIN_TEMPLATES`].
    pub const fn builtin() -> Self {
        Self::new(BUILTIN_TEMPLATES)
    }

    /// All templates, in declaration order.
    pub fn list_templates(&self) -> &'static [Template] {
        self.templates
    }

    /// Look up a template by its `id`.
    pub fn resolve(&self, id: &str) -> Result<&'static Template, UnknownTemplateError> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| UnknownTemplateError { id: id.to_string() })
    }

    /// The implicit default selection: the first declared template.
    pub fn default_template(&self) -> Option<&'static Template> {
        self.templates.first()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_are_unique() {
        let ids: HashSet<_> = BUILTIN_TEMPLATES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), BUILTIN_TEMPLATES.len());
    }

    #[test]
    fn resolve_returns_matching_template_for_every_id() {
        let registry = TemplateRegistry::builtin();
        for template in registry.list_templates() {
            let resolved = registry.resolve(template.id).expect("builtin id resolves");
            assert_eq!(resolved.id, template.id);
        }
    }

    #[test]
    fn resolve_unknown_id_fails() {
        let registry = TemplateRegistry::builtin();
        let err = registry.resolve("no-such-template").unwrap_err();
        assert_eq!(err.id, "no-such-template");
        assert!(err.to_string().contains("no-such-template"));
    }

    #[test]
    fn resolve_is_exact_match() {
        let registry = TemplateRegistry::builtin();
        assert!(registry.resolve("Study-Guide").is_err());
        assert!(registry.resolve(" study-guide").is_err());
        assert!(registry.resolve("").is_err());
    }

    #[test]
    fn list_preserves_declaration_order() {
        let registry = TemplateRegistry::builtin();
        let ids: Vec<_> = registry.list_templates().iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["lesson-plan", "study-guide", "quiz", "worksheet", "discussion-prompts"]
        );
    }

    #[test]
    fn default_is_first_declared() {
        let registry = TemplateRegistry::builtin();
        assert_eq!(
            registry.default_template().map(|t| t.id),
            Some("lesson-plan")
        );
    }

    #[test]
    fn empty_registry_has_no_default() {
        const EMPTY: &[Template] = &[];
        let registry = TemplateRegistry::new(EMPTY);
        assert!(registry.default_template().is_none());
        assert!(registry.resolve("lesson-plan").is_err());
    }

    #[test]
    fn every_builtin_body_mentions_topic() {
        for template in BUILTIN_TEMPLATES {
            assert!(
                template.body.contains("{topic}"),
                "template {} must use the topic placeholder",
                template.id
            );
        }
    }
}
