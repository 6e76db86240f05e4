//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), the generation and export
//! sub-configs, `AppPaths` for cross-platform directories, TOML persistence
//! via `AppConfig::load` / `AppConfig::save_to`, and `LESSON_GEN_*` environment
//! overrides.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, ExportConfig, GenerationConfig, ENV_API_KEY, ENV_ENDPOINT, ENV_TIMEOUT_SECS,
};
