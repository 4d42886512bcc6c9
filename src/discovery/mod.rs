//! Candidate frame discovery over the archive directory layout.
//!
//! Frames live under the conventional layout
//! `{root}/{camera}/images/archive/{YYYY}/{MM}/{DD}/{HH}/*<frameName>.jpg`.
//! Discovery walks the two-day nighttime window: a missing day directory
//! fails the whole run, while a missing hour directory ends that day's
//! scan (capture is sequential, so later hours cannot have frames worth
//! trusting).

mod window;

pub use window::{DayBucket, NightWindow, EVENING_HOURS, MORNING_HOURS};

use chrono::Datelike;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that abort discovery (and the composite run).
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("{0} does not exist")]
    MissingDayDirectory(PathBuf),
    #[error("failed to read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Position of a candidate within the scan order.
///
/// Stands in for a capture timestamp: it is derived from directory
/// position, never from frame content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscoverySlot {
    /// Day bucket index (0 = evening, 1 = morning).
    pub bucket: u8,
    /// Hour directory the file was found in.
    pub hour: u32,
    /// File position within the hour, after name sorting.
    pub index: usize,
}

/// A frame file found during discovery, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Full path to the frame file.
    pub path: PathBuf,
    /// Scan-order position.
    pub slot: DiscoverySlot,
}

/// Returns the day-level archive directory for a camera and date.
pub fn day_directory(root: &Path, camera: &str, date: chrono::NaiveDate) -> PathBuf {
    root.join(camera)
        .join("images")
        .join("archive")
        .join(format!("{:04}", date.year()))
        .join(format!("{:02}", date.month()))
        .join(format!("{:02}", date.day()))
}

/// Enumerates candidate frames for one camera across the night window.
///
/// Candidates are returned in scan order: evening bucket before morning
/// bucket, hours ascending, file names sorted within each hour.
pub fn discover(
    root: &Path,
    camera: &str,
    frame_name: &str,
    window: &NightWindow,
) -> Result<Vec<Candidate>, DiscoveryError> {
    let suffix = format!("{frame_name}.jpg");
    let mut candidates = Vec::new();

    for bucket in window.buckets() {
        let day_dir = day_directory(root, camera, bucket.date);
        if !day_dir.is_dir() {
            return Err(DiscoveryError::MissingDayDirectory(day_dir));
        }

        for hour in bucket.hours.clone() {
            let hour_dir = day_dir.join(format!("{hour:02}"));
            if !hour_dir.is_dir() {
                // Capture stopped before this hour; later hours of the
                // same day are not checked even if present.
                debug!(hour, dir = %hour_dir.display(), "hour directory missing, ending day scan");
                break;
            }

            let mut names = list_matching(&hour_dir, &suffix)?;
            names.sort();

            for (index, name) in names.into_iter().enumerate() {
                candidates.push(Candidate {
                    path: hour_dir.join(name),
                    slot: DiscoverySlot {
                        bucket: bucket.index,
                        hour,
                        index,
                    },
                });
            }
        }
    }

    Ok(candidates)
}

/// Lists file names in `dir` ending with `suffix`.
fn list_matching(dir: &Path, suffix: &str) -> Result<Vec<String>, DiscoveryError> {
    let entries = std::fs::read_dir(dir).map_err(|source| DiscoveryError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| DiscoveryError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(suffix) {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}
