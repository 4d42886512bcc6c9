//! Site configuration for unattended runs.
//!
//! Each camera site ships a small TOML file naming the camera, its
//! frame tag, and the expected frame geometry. Paths default to the
//! conventional deployment layout and rarely need overriding.

use crate::request::RequestParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Camera identity and frame geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera code used in archive paths and output names.
    pub code: String,
    /// Frame-name tag matched as a file-name suffix.
    pub frame_name: String,
    /// Expected frame width in pixels.
    pub width: u32,
    /// Expected frame height in pixels.
    pub height: u32,
}

/// Filesystem locations for input and working files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the camera archive tree.
    pub archive_root: PathBuf,
    /// Working directory for composites before archival.
    pub tmp_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            archive_root: PathBuf::from("/data/cams"),
            tmp_dir: PathBuf::from("/tmp"),
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Camera identity and geometry.
    pub camera: CameraConfig,
    /// Input/working paths.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Configuration loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        Ok(config)
    }

    /// Builds raw request parameters for this site and an optional
    /// caller-supplied date. Validation happens in the request layer.
    pub fn request_params(&self, date: Option<String>) -> RequestParams {
        RequestParams {
            camera: self.camera.code.clone(),
            frame_name: self.camera.frame_name.clone(),
            width: self.camera.width.to_string(),
            height: self.camera.height.to_string(),
            date,
            tmp_dir: self.paths.tmp_dir.display().to_string(),
        }
    }
}
