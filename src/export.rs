//! Plain-text export of generated material.
//!
//! The file name is derived from the topic (whitespace runs become `_`) plus
//! a local timestamp, e.g. `Water_Cycle_20260116-142501.txt`.  Nothing in the
//! pipeline depends on an export succeeding.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// MIME type of the exported artifact.
pub const EXPORT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

const FALLBACK_STEM: &str = "lesson";

#[derive(Debug, Error)]
pub enum ExportError {
    /// There is no successful output to export.
    #[error("nothing to export yet")]
    NothingToExport,

    #[error("cannot write export file: {0}")]
    Io(#[from] std::io::Error),
}

/// `<topic>_<YYYYmmdd-HHMMSS>.txt`
pub fn export_file_name(topic: &str, at: DateTime<Local>) -> String {
    let stem = topic
        .split_whitespace()
        .map(|word| word.replace(['/', '\\'], "-"))
        .collect::<Vec<_>>()
        .join("_");
    let stem = if stem.is_empty() { FALLBACK_STEM.to_string() } else { stem };
    format!("{stem}_{}.txt", at.format("%Y%m%d-%H%M%S"))
}

/// Write `text` as UTF-8 into `dir`, creating it if needed.  Returns the path.
pub fn write_export(dir: &Path, topic: &str, text: Option<&str>) -> Result<PathBuf, ExportError> {
    let text = text.ok_or(ExportError::NothingToExport)?;

    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(topic, Local::now()));
    std::fs::write(&path, text.as_bytes())?;

    log::info!(
        "export: wrote {} bytes ({EXPORT_CONTENT_TYPE}) to {}",
        text.len(),
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 1, 16, 14, 25, 1).unwrap()
    }

    #[test]
    fn file_name_replaces_whitespace() {
        assert_eq!(
            export_file_name("  Water   Cycle\tBasics ", fixed_time()),
            "Water_Cycle_Basics_20260116-142501.txt"
        );
    }

    #[test]
    fn file_name_strips_path_separators() {
        assert_eq!(
            export_file_name("Input/Output", fixed_time()),
            "Input-Output_20260116-142501.txt"
        );
    }

    #[test]
    fn blank_topic_uses_fallback_stem() {
        assert_eq!(
            export_file_name("   ", fixed_time()),
            "lesson_20260116-142501.txt"
        );
    }

    #[test]
    fn writes_text_verbatim() {
        let dir = tempdir().expect("temp dir");
        let target = dir.path().join("nested");

        let path = write_export(&target, "Cells", Some("Line 1\nLine 2\n")).expect("export");
        assert!(path.starts_with(&target));
        assert!(path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with("Cells_") && n.ends_with(".txt")));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Line 1\nLine 2\n");
    }

    #[test]
    fn missing_output_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let err = write_export(dir.path(), "Cells", None).unwrap_err();
        assert!(matches!(err, ExportError::NothingToExport));
    }
}
