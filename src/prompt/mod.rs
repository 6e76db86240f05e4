//! Prompt templates and composition.
//!
//! * [`TemplateRegistry`]: static, ordered catalog of [`Template`]s.
//! * [`compose`]: turns a [`GenerationInput`](crate::validation::GenerationInput)
//!   and a template into a [`GenerationRequest`].

pub mod composer;
pub mod registry;

pub use composer::{compose, GenerationRequest, PLACEHOLDERS};
pub use registry::{Template, TemplateRegistry, UnknownTemplateError, BUILTIN_TEMPLATES};
