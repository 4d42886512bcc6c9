//! Composite request parameters and validation.
//!
//! A [`CompositeRequest`] is only constructible through validation, and
//! nothing touches the filesystem before validation succeeds. Each
//! failing field maps to its own [`RequestError`] variant because
//! automation built on top of the compositor keys off the messages.

use chrono::{Local, NaiveDate};
use std::path::PathBuf;
use thiserror::Error;

/// Raw, unvalidated request parameters as received from a caller
/// (CLI flags, config file, or scheduler).
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    /// Camera code, e.g. `kpcam`.
    pub camera: String,
    /// Frame-name tag matched as a file-name suffix, e.g. `M`.
    pub frame_name: String,
    /// Expected frame width, as a string.
    pub width: String,
    /// Expected frame height, as a string.
    pub height: String,
    /// Target end date as `yyyymmdd`; empty or absent means today.
    pub date: Option<String>,
    /// Working directory for the composite before archival.
    pub tmp_dir: String,
}

/// Per-field validation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("required parameter '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("{field} is not numeric: '{value}'")]
    NonNumericDimension { field: &'static str, value: String },
    #[error("date is not 8 characters (yyyymmdd): got {len}")]
    DateWrongLength { len: usize },
    #[error("date is not numeric (yyyymmdd): '{value}'")]
    DateNotNumeric { value: String },
    #[error("date is not a valid calendar date (yyyymmdd): '{value}'")]
    DateOutOfRange { value: String },
}

/// A validated, immutable composite request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRequest {
    camera: String,
    frame_name: String,
    width: u32,
    height: u32,
    date: NaiveDate,
    tmp_dir: PathBuf,
}

impl CompositeRequest {
    /// Validates raw parameters and constructs a request.
    ///
    /// The date defaults to today (local time) when absent or empty,
    /// matching the unattended nightly invocation.
    pub fn from_params(params: &RequestParams) -> Result<Self, RequestError> {
        let camera = non_empty("camera", &params.camera)?;
        let frame_name = non_empty("frameName", &params.frame_name)?;
        let width = dimension("imageWidth", &params.width)?;
        let height = dimension("imageHeight", &params.height)?;
        let tmp_dir = non_empty("tmpDir", &params.tmp_dir)?;

        let date = match params.date.as_deref() {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => Local::now().date_naive(),
        };

        Ok(Self {
            camera,
            frame_name,
            width,
            height,
            date,
            tmp_dir: PathBuf::from(tmp_dir),
        })
    }

    /// Returns the camera code.
    #[inline]
    pub fn camera(&self) -> &str {
        &self.camera
    }

    /// Returns the frame-name tag.
    #[inline]
    pub fn frame_name(&self) -> &str {
        &self.frame_name
    }

    /// Returns the expected frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the expected frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the composite end date.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the temp working directory.
    #[inline]
    pub fn tmp_dir(&self) -> &std::path::Path {
        &self.tmp_dir
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<String, RequestError> {
    if value.is_empty() {
        Err(RequestError::EmptyField { field })
    } else {
        Ok(value.to_string())
    }
}

fn dimension(field: &'static str, value: &str) -> Result<u32, RequestError> {
    if value.is_empty() {
        return Err(RequestError::EmptyField { field });
    }
    value
        .parse::<u32>()
        .map_err(|_| RequestError::NonNumericDimension {
            field,
            value: value.to_string(),
        })
}

fn parse_date(raw: &str) -> Result<NaiveDate, RequestError> {
    if raw.len() != 8 {
        return Err(RequestError::DateWrongLength { len: raw.len() });
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RequestError::DateNotNumeric {
            value: raw.to_string(),
        });
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").map_err(|_| RequestError::DateOutOfRange {
        value: raw.to_string(),
    })
}
