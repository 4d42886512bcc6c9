//! The two-line JavaScript sidecar consumed by the display layer.
//!
//! Format is fixed: a capture-time assignment and a single-element
//! frame-name array. The display layer parses these lines as-is.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

/// Sidecar file name alongside the latest composite.
pub const SIDECAR_FILE: &str = "js.js";

/// Timestamp format used in the sidecar.
pub const SIDECAR_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Renders the sidecar contents for a frame name at a point in time.
pub fn sidecar_contents(now: DateTime<Local>, frame_name: &str) -> String {
    format!(
        "var datetime = {} (HST);\nvar frames   = new Array(\"{}\");",
        now.format(SIDECAR_TIME_FORMAT),
        frame_name
    )
}

/// Writes the sidecar into `dir` and returns its path.
pub fn write_sidecar(
    dir: &Path,
    now: DateTime<Local>,
    frame_name: &str,
) -> std::io::Result<PathBuf> {
    let path = dir.join(SIDECAR_FILE);
    std::fs::write(&path, sidecar_contents(now, frame_name))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sidecar_format() {
        let now = Local.with_ymd_and_hms(2021, 6, 15, 5, 3, 40).unwrap();
        let text = sidecar_contents(now, "M");

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("var datetime = 2021-06-15 05:03 (HST);"));
        assert_eq!(lines.next(), Some("var frames   = new Array(\"M\");"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_sidecar_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let now = Local.with_ymd_and_hms(2021, 6, 15, 5, 0, 0).unwrap();

        let path = write_sidecar(tmp.path(), now, "M").unwrap();
        assert!(path.ends_with(SIDECAR_FILE));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("new Array(\"M\")"));
    }
}
