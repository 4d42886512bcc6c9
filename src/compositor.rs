//! Composite run orchestration.
//!
//! Drives the full control flow: discovery, then per-frame load →
//! defect repair → merge, then emission. Per-frame failures are logged
//! and skipped; validation and missing-directory failures abort the run
//! before any output is written.

use crate::discovery::{self, DiscoveryError, NightWindow};
use crate::emit::{self, EmitError};
use crate::frame::load_frame;
use crate::request::{CompositeRequest, RequestError, RequestParams};
use crate::stack::{repair_defect_band, Accumulator, LumaPlane};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, info_span, warn};

/// Unrecoverable composite-run failures.
///
/// Per-frame decode and dimension problems never surface here; they are
/// absorbed into the skip-and-continue path.
#[derive(Debug, Error)]
pub enum CompositeError {
    #[error(transparent)]
    InvalidRequest(#[from] RequestError),
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Emit(#[from] EmitError),
}

/// Summary of a finished composite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeOutcome {
    /// Path of the written composite in the temp directory.
    pub output: PathBuf,
    /// Candidate files found by discovery.
    pub frames_considered: usize,
    /// Frames that merged into the composite.
    pub frames_used: usize,
    /// Frames skipped for decode or dimension failures.
    pub frames_skipped: usize,
    /// Frames on which defect-band repair ran.
    pub frames_repaired: usize,
}

/// The nightly compositor, bound to one camera archive root.
#[derive(Debug, Clone)]
pub struct Compositor {
    archive_root: PathBuf,
}

impl Compositor {
    /// Creates a compositor reading from the given archive root.
    pub fn new(archive_root: impl Into<PathBuf>) -> Self {
        Self {
            archive_root: archive_root.into(),
        }
    }

    /// Validates raw parameters and runs the composite.
    pub fn run_params(&self, params: &RequestParams) -> Result<CompositeOutcome, CompositeError> {
        let request = CompositeRequest::from_params(params)?;
        self.run(&request)
    }

    /// Runs one composite for a validated request.
    ///
    /// Runs to completion or fails fast on a missing day directory; no
    /// partial composite is ever written. Zero valid frames still emits
    /// an all-black composite, with a warning, because emission itself
    /// is not a health signal.
    pub fn run(&self, request: &CompositeRequest) -> Result<CompositeOutcome, CompositeError> {
        let span = info_span!(
            "composite",
            camera = request.camera(),
            frame = request.frame_name(),
            date = %request.date(),
        );
        let _guard = span.enter();

        let window = NightWindow::ending_on(request.date());
        let candidates = discovery::discover(
            &self.archive_root,
            request.camera(),
            request.frame_name(),
            &window,
        )?;
        info!(candidates = candidates.len(), "discovery complete");

        let mut accumulator = Accumulator::new(request.width(), request.height());
        let mut used = 0usize;
        let mut skipped = 0usize;
        let mut repaired = 0usize;

        for candidate in &candidates {
            debug!(path = %candidate.path.display(), "processing frame");

            let frame = match load_frame(candidate, request.width(), request.height()) {
                Ok(frame) => frame,
                Err(err) => {
                    warn!(path = %candidate.path.display(), error = %err, "skipping frame");
                    skipped += 1;
                    continue;
                }
            };

            let mut plane = LumaPlane::from_rgb8(frame.pixels(), frame.width(), frame.height());
            let report = repair_defect_band(&mut plane);
            if report.applied {
                repaired += 1;
                debug!(
                    path = %candidate.path.display(),
                    in_band = report.in_band,
                    zeroed = report.zeroed,
                    "defect band repaired"
                );
            }

            accumulator.merge(&frame, &plane);
            used += 1;
        }

        if used == 0 {
            warn!("no valid frames contributed; composite will be all black");
        }

        let image = accumulator.finish();
        let output = emit::write_composite(
            request.tmp_dir(),
            request.camera(),
            request.frame_name(),
            request.date(),
            &image,
        )?;

        info!(
            used,
            skipped,
            repaired,
            output = %output.display(),
            "composite finished"
        );

        Ok(CompositeOutcome {
            output,
            frames_considered: candidates.len(),
            frames_used: used,
            frames_skipped: skipped,
            frames_repaired: repaired,
        })
    }
}
