//! Cross-platform application paths using the `dirs` crate.
//!
//! Layout:
//!
//! Config dir (settings):
//!   Windows: %APPDATA%\lesson-generator\
//!   macOS:   ~/Library/Application Support/lesson-generator/
//!   Linux:   ~/.config/lesson-generator/
//!
//! Export dir: the platform download directory, or `.` when there is none.

use std::path::PathBuf;

/// Holds all resolved application directory/file paths.
#[derive(Debug, Clone)]
pub struct AppPaths {
    /// Directory for `settings.toml`.
    pub config_dir: PathBuf,
    /// Full path to `settings.toml`.
    pub settings_file: PathBuf,
    /// Default directory for exported text files.
    pub export_dir: PathBuf,
}

impl AppPaths {
    const APP_NAME: &'static str = "lesson-generator";

    /// Resolves all paths using the `dirs` crate, falling back to the
    /// current directory when the platform provides no standard path.
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(Self::APP_NAME);

        let export_dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        let settings_file = config_dir.join("settings.toml");

        Self {
            config_dir,
            settings_file,
            export_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}
