//! Frame loading and validation.
//!
//! Every candidate gets a full decode, not a header parse, so truncated
//! files are caught before they can contribute. Load failures are
//! per-frame: the caller logs and skips, the run continues.

use super::Frame;
use crate::discovery::Candidate;
use image::ImageReader;
use std::path::PathBuf;
use thiserror::Error;

/// Per-frame load failures. All of these are recovered by skipping the
/// frame; none aborts a composite run.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("{path} is {got_width}x{got_height}, expected {want_width}x{want_height}")]
    DimensionMismatch {
        path: PathBuf,
        got_width: u32,
        got_height: u32,
        want_width: u32,
        want_height: u32,
    },
}

/// Decodes a candidate and validates its dimensions.
///
/// The container format is sniffed from file content rather than the
/// extension, so a mislabeled-but-decodable file still loads while a
/// truncated one still fails the full decode.
pub fn load_frame(candidate: &Candidate, width: u32, height: u32) -> Result<Frame, FrameError> {
    let path = &candidate.path;

    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| FrameError::Open {
            path: path.clone(),
            source,
        })?;

    let decoded = reader.decode().map_err(|source| FrameError::Decode {
        path: path.clone(),
        source,
    })?;

    if decoded.width() != width || decoded.height() != height {
        return Err(FrameError::DimensionMismatch {
            path: path.clone(),
            got_width: decoded.width(),
            got_height: decoded.height(),
            want_width: width,
            want_height: height,
        });
    }

    let rgb = decoded.into_rgb8();
    Ok(Frame::new(
        rgb.into_raw(),
        width,
        height,
        path.clone(),
        candidate.slot,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::DiscoverySlot;
    use image::RgbImage;
    use tempfile::TempDir;

    fn candidate(path: PathBuf) -> Candidate {
        Candidate {
            path,
            slot: DiscoverySlot {
                bucket: 0,
                hour: 20,
                index: 0,
            },
        }
    }

    #[test]
    fn test_load_valid_frame() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("0100M.jpg");
        let img = RgbImage::from_pixel(8, 6, image::Rgb([10, 20, 30]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let frame = load_frame(&candidate(path), 8, 6).unwrap();
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        assert!(frame.is_valid());
        assert_eq!(&frame.pixels()[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_corrupt_file_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("0100M.jpg");
        std::fs::write(&path, b"\xff\xd8\xff\xe0 not really a jpeg").unwrap();

        let err = load_frame(&candidate(path), 8, 6).unwrap_err();
        assert!(matches!(err, FrameError::Decode { .. }));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let err = load_frame(&candidate(PathBuf::from("/nonexistent/0100M.jpg")), 8, 6)
            .unwrap_err();
        assert!(matches!(err, FrameError::Open { .. }));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("0100M.jpg");
        let img = RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        img.save_with_format(&path, image::ImageFormat::Png).unwrap();

        let err = load_frame(&candidate(path), 8, 6).unwrap_err();
        match err {
            FrameError::DimensionMismatch {
                got_width,
                got_height,
                ..
            } => {
                assert_eq!((got_width, got_height), (4, 4));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
