//! Archival copy layout under `{root}/{camera}/composites`.
//!
//! Thin I/O only: the archival layer copies finished artifacts into a
//! "latest" location and a month-keyed archive, creating directories on
//! demand. It never inspects image content.

use super::EmitError;
use chrono::{Datelike, Local, NaiveDate};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Paths of the copies produced by one archival publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedPaths {
    /// The always-current copy, `{composites}/<frameName>.jpg`.
    pub latest: PathBuf,
    /// The month-keyed copy, `{composites}/archive/{YYYY}/{MM}/<name>`.
    pub archived: PathBuf,
    /// The sidecar copy next to the latest composite.
    pub sidecar: PathBuf,
}

/// Destination layout for composite archival.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    /// Creates a layout rooted at the camera archive root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the composites directory for a camera.
    pub fn composites_dir(&self, camera: &str) -> PathBuf {
        self.root.join(camera).join("composites")
    }

    /// Returns the month-keyed archive directory for a camera and date.
    pub fn month_dir(&self, camera: &str, date: NaiveDate) -> PathBuf {
        self.composites_dir(camera)
            .join("archive")
            .join(format!("{:04}", date.year()))
            .join(format!("{:02}", date.month()))
    }

    /// Publishes a finished composite: latest copy, month-keyed copy,
    /// and the display sidecar. The source files in the temp directory
    /// are removed once all copies succeed.
    pub fn publish(
        &self,
        composite: &Path,
        camera: &str,
        frame_name: &str,
        date: NaiveDate,
    ) -> Result<PublishedPaths, EmitError> {
        let composites = self.composites_dir(camera);
        let latest = copy_into(composite, &composites, &format!("{frame_name}.jpg"))?;

        let month = self.month_dir(camera, date);
        let archived_name = composite
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{frame_name}.jpg"));
        let archived = copy_into(composite, &month, &archived_name)?;

        let tmp_dir = composite.parent().unwrap_or(Path::new("."));
        let sidecar_tmp = super::sidecar::write_sidecar(tmp_dir, Local::now(), frame_name)
            .map_err(|source| EmitError::Io {
                path: tmp_dir.join(super::sidecar::SIDECAR_FILE),
                source,
            })?;
        let sidecar = copy_into(&sidecar_tmp, &composites, super::sidecar::SIDECAR_FILE)?;

        // Temp files go only after every copy landed.
        debug!("removing temp files");
        remove(composite)?;
        remove(&sidecar_tmp)?;

        Ok(PublishedPaths {
            latest,
            archived,
            sidecar,
        })
    }
}

/// Copies `src` into `dir/name`, creating `dir` on demand.
fn copy_into(src: &Path, dir: &Path, name: &str) -> Result<PathBuf, EmitError> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "creating archive directory");
        std::fs::create_dir_all(dir).map_err(|source| EmitError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let dest = dir.join(name);
    info!(src = %src.display(), dest = %dest.display(), "copying composite artifact");
    std::fs::copy(src, &dest).map_err(|source| EmitError::Io {
        path: dest.clone(),
        source,
    })?;
    Ok(dest)
}

fn remove(path: &Path) -> Result<(), EmitError> {
    std::fs::remove_file(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_layout_paths() {
        let layout = ArchiveLayout::new("/data/cams");
        assert_eq!(
            layout.composites_dir("kpcam"),
            Path::new("/data/cams/kpcam/composites")
        );
        assert_eq!(
            layout.month_dir("kpcam", date(2021, 6, 15)),
            Path::new("/data/cams/kpcam/composites/archive/2021/06")
        );
    }

    #[test]
    fn test_publish_copies_and_cleans_up() {
        let root = TempDir::new().unwrap();
        let tmp = TempDir::new().unwrap();

        let composite = tmp.path().join("kpcam20210615M.jpg");
        std::fs::write(&composite, b"jpegbytes").unwrap();

        let layout = ArchiveLayout::new(root.path());
        let paths = layout
            .publish(&composite, "kpcam", "M", date(2021, 6, 15))
            .unwrap();

        assert_eq!(
            paths.latest,
            root.path().join("kpcam/composites/M.jpg")
        );
        assert_eq!(
            paths.archived,
            root.path()
                .join("kpcam/composites/archive/2021/06/kpcam20210615M.jpg")
        );
        assert_eq!(std::fs::read(&paths.latest).unwrap(), b"jpegbytes");
        assert_eq!(std::fs::read(&paths.archived).unwrap(), b"jpegbytes");
        assert!(std::fs::read_to_string(&paths.sidecar)
            .unwrap()
            .contains("new Array(\"M\")"));

        // Temp files are gone after a successful publish.
        assert!(!composite.exists());
        assert!(!tmp.path().join("js.js").exists());
    }
}
