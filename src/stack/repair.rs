//! Sensor defect-band detection and repair.
//!
//! A known sensor/encoding defect produces bands of near-constant gray:
//! pixel luminance clustered strictly inside (127, 129). When enough of
//! the frame falls in that band, the affected pixels are excluded from
//! the max-selection by forcing their luma to zero. Flag decisions read
//! the pristine plane and zeroing is applied afterwards, so the scan is
//! order-independent and can run row-parallel.

use super::luma::LumaPlane;
use rayon::prelude::*;

/// Lower edge of the defect luma band (exclusive).
pub const BAND_LOW: f32 = 127.0;
/// Upper edge of the defect luma band (exclusive).
pub const BAND_HIGH: f32 = 129.0;
/// Frame-wide in-band pixel count above which repair runs.
pub const GLOBAL_THRESHOLD: usize = 5000;
/// In-band neighbors above which a flagged pixel is excluded.
pub const LOCAL_THRESHOLD: usize = 10;
/// Half-width of the square scan window (10x10 in the interior).
pub const WINDOW_HALF_WIDTH: u32 = 5;

/// Returns true if a luma value lies strictly inside the defect band.
#[inline]
pub fn in_band(l: f32) -> bool {
    l > BAND_LOW && l < BAND_HIGH
}

/// Summary of one frame's defect scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairReport {
    /// Pixels whose luma fell inside the defect band.
    pub in_band: usize,
    /// Pixels excluded from this frame's contribution.
    pub zeroed: usize,
    /// Whether the global threshold was exceeded and repair ran.
    pub applied: bool,
}

/// Scans a frame's luma plane for the defect band and repairs it in place.
///
/// If more than [`GLOBAL_THRESHOLD`] pixels are in-band, every in-band
/// pixel whose clipped 10x10 neighborhood contains more than
/// [`LOCAL_THRESHOLD`] in-band pixels (itself included) has its luma
/// forced to zero. Below the global threshold the plane is untouched.
pub fn repair_defect_band(plane: &mut LumaPlane) -> RepairReport {
    let width = plane.width();
    let height = plane.height();

    let flags: Vec<bool> = plane.values().iter().map(|&l| in_band(l)).collect();
    let global = flags.iter().filter(|&&f| f).count();

    if global <= GLOBAL_THRESHOLD {
        return RepairReport {
            in_band: global,
            zeroed: 0,
            applied: false,
        };
    }

    // Each row's verdicts depend only on the immutable flag plane,
    // so rows partition cleanly across threads.
    let excluded: Vec<(u32, u32)> = (0..height)
        .into_par_iter()
        .flat_map_iter(|row| {
            let flags = &flags;
            (0..width).filter_map(move |col| {
                if !flags[(row as usize) * (width as usize) + (col as usize)] {
                    return None;
                }
                if local_band_count(flags, width, height, row, col) > LOCAL_THRESHOLD {
                    Some((row, col))
                } else {
                    None
                }
            })
        })
        .collect();

    for &(row, col) in &excluded {
        plane.zero(row, col);
    }

    RepairReport {
        in_band: global,
        zeroed: excluded.len(),
        applied: true,
    }
}

/// Counts in-band pixels in the scan window around (row, col).
///
/// The window spans rows `row-5..row+5` and cols `col-5..col+5`, each
/// bound clipped independently to the image extent.
fn local_band_count(flags: &[bool], width: u32, height: u32, row: u32, col: u32) -> usize {
    let r0 = row.saturating_sub(WINDOW_HALF_WIDTH);
    let r1 = (row + WINDOW_HALF_WIDTH).min(height);
    let c0 = col.saturating_sub(WINDOW_HALF_WIDTH);
    let c1 = (col + WINDOW_HALF_WIDTH).min(width);

    let mut count = 0;
    for r in r0..r1 {
        let base = (r as usize) * (width as usize);
        for c in c0..c1 {
            if flags[base + c as usize] {
                count += 1;
            }
        }
    }
    count
}
