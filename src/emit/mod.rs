//! Composite emission: encoding, naming, and archival handoff.
//!
//! The emitter owns the finished image until it is written to the temp
//! working directory; archival copies and the display sidecar are thin
//! I/O on top of that file.

mod archive;
mod sidecar;

pub use archive::{ArchiveLayout, PublishedPaths};
pub use sidecar::{sidecar_contents, write_sidecar, SIDECAR_FILE, SIDECAR_TIME_FORMAT};

use chrono::{Datelike, NaiveDate};
use image::RgbImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors raised while writing or archiving the composite.
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to encode composite {path}: {source}")]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("archival I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Builds the composite file name: `<camera><YYYY><MM><DD><frameName>.jpg`.
pub fn composite_file_name(camera: &str, date: NaiveDate, frame_name: &str) -> String {
    format!(
        "{camera}{:04}{:02}{:02}{frame_name}.jpg",
        date.year(),
        date.month(),
        date.day()
    )
}

/// Encodes the composite as JPEG into the temp directory.
///
/// Returns the path of the written file, the primary output artifact.
pub fn write_composite(
    tmp_dir: &Path,
    camera: &str,
    frame_name: &str,
    date: NaiveDate,
    image: &RgbImage,
) -> Result<PathBuf, EmitError> {
    let path = tmp_dir.join(composite_file_name(camera, date, frame_name));
    info!(path = %path.display(), "writing composite");
    image
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .map_err(|source| EmitError::Encode {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
