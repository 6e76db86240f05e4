//! Lesson material generator.
//!
//! Turns a topic, audience level and a few style knobs into one request to a
//! text-generation service, then screens and surfaces the result.
//!
//! * [`prompt`]: template registry and prompt composition.
//! * [`validation`]: form input and pre-flight checks.
//! * [`client`]: live HTTP and mocked generation backends.
//! * [`filter`]: post-generation content screen.
//! * [`pipeline`]: the controller state machine tying the stages together.
//! * [`export`]: plain-text export of the result.
//! * [`config`]: settings, paths and environment overrides.

pub mod client;
pub mod config;
pub mod export;
pub mod filter;
pub mod pipeline;
pub mod prompt;
pub mod validation;
