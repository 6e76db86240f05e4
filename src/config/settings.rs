//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files.  Missing keys take their
//! defaults, so a partial `settings.toml` is valid.
//!
//! Settings are read once at startup and are immutable afterwards.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable overriding [`GenerationConfig::endpoint`].
pub const ENV_ENDPOINT: &str = "LESSON_GEN_ENDPOINT";
/// Environment variable overriding [`GenerationConfig::api_key`].
pub const ENV_API_KEY: &str = "LESSON_GEN_API_KEY";
/// Environment variable overriding [`GenerationConfig::timeout_secs`].
pub const ENV_TIMEOUT_SECS: &str = "LESSON_GEN_TIMEOUT_SECS";

// ---------------------------------------------------------------------------
// GenerationConfig
// ---------------------------------------------------------------------------

/// Settings for the generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Full URL that receives `POST {"prompt": …}`.
    ///
    /// `None` (or blank) selects the mocked client.
    pub endpoint: Option<String>,
    /// Bearer credential, `None` for endpoints that need no authentication.
    pub api_key: Option<String>,
    /// Upper bound on a live request in seconds.  `None` means the transport
    /// default, i.e. no overall timeout.
    pub timeout_secs: Option<u64>,
    /// Simulated latency of the mocked client in milliseconds.
    pub mock_latency_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: None,
            mock_latency_ms: 800,
        }
    }
}

impl GenerationConfig {
    /// The configured endpoint, if present and non-blank.
    pub fn endpoint(&self) -> Option<&str> {
        non_blank(self.endpoint.as_deref())
    }

    /// The configured credential, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        non_blank(self.api_key.as_deref())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms.max(1))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// ExportConfig
// ---------------------------------------------------------------------------

/// Settings for the plain-text export artifact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Target directory.  `None` uses [`AppPaths::export_dir`].
    pub directory: Option<PathBuf>,
}

impl ExportConfig {
    pub fn resolved_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(|| AppPaths::new().export_dir)
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use lesson_generator::config::AppConfig;
///
/// // Load (returns Default when file is missing), then apply env overrides.
/// let mut config = AppConfig::load().unwrap();
/// config.apply_env_overrides();
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `LESSON_GEN_*` environment variables on top of the loaded file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from an arbitrary lookup.  Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.generation.endpoint = Some(endpoint);
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.generation.api_key = Some(key);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.generation.timeout_secs = Some(secs),
                Err(e) => log::warn!("ignoring {ENV_TIMEOUT_SECS}={raw:?}: {e}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let mut original = AppConfig::default();
        original.generation.endpoint = Some("https://api.example.com/generate".into());
        original.generation.api_key = Some("sk-test".into());
        original.generation.timeout_secs = Some(30);
        original.export.directory = Some(dir.path().join("exports"));
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");
        assert_eq!(loaded, original);
    }

    #[test]
    fn load_missing_file_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[generation]\nendpoint = \"http://localhost:9000\"\n").unwrap();

        let config = AppConfig::load_from(&path).expect("load");
        assert_eq!(config.generation.endpoint(), Some("http://localhost:9000"));
        assert_eq!(config.generation.mock_latency_ms, 800);
        assert!(config.generation.timeout_secs.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[generation\nendpoint = ").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.generation.endpoint().is_none());
        assert!(cfg.generation.api_key().is_none());
        assert!(cfg.generation.timeout().is_none());
        assert_eq!(cfg.generation.mock_latency(), Duration::from_millis(800));
        assert!(cfg.export.directory.is_none());
    }

    #[test]
    fn blank_endpoint_and_key_count_as_absent() {
        let cfg = GenerationConfig {
            endpoint: Some("  ".into()),
            api_key: Some("".into()),
            ..GenerationConfig::default()
        };
        assert!(cfg.endpoint().is_none());
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn zero_mock_latency_is_raised() {
        let cfg = GenerationConfig {
            mock_latency_ms: 0,
            ..GenerationConfig::default()
        };
        assert!(cfg.mock_latency() > Duration::ZERO);
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut cfg = AppConfig::default();
        cfg.generation.endpoint = Some("http://from-file".into());

        cfg.apply_overrides(lookup(&[
            (ENV_ENDPOINT, "http://from-env"),
            (ENV_API_KEY, "sk-env"),
            (ENV_TIMEOUT_SECS, "15"),
        ]));

        assert_eq!(cfg.generation.endpoint(), Some("http://from-env"));
        assert_eq!(cfg.generation.api_key(), Some("sk-env"));
        assert_eq!(cfg.generation.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn blank_or_invalid_overrides_are_ignored() {
        let mut cfg = AppConfig::default();
        cfg.generation.endpoint = Some("http://from-file".into());

        cfg.apply_overrides(lookup(&[(ENV_ENDPOINT, "  "), (ENV_TIMEOUT_SECS, "soon")]));

        assert_eq!(cfg.generation.endpoint(), Some("http://from-file"));
        assert!(cfg.generation.timeout_secs.is_none());
    }

    #[test]
    fn export_directory_override_is_used() {
        let cfg = ExportConfig {
            directory: Some(PathBuf::from("/tmp/lessons")),
        };
        assert_eq!(cfg.resolved_directory(), PathBuf::from("/tmp/lessons"));
    }
}
