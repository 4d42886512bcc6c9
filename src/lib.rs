//! Nightstack: nightly max-luminance composites.
//!
//! Builds a single composite from the frames an unattended camera
//! captured over one night: per pixel, the RGB triple with the highest
//! BT.601 luminance across all valid frames wins. Transient glow that
//! appears in only a few frames survives into the composite.
//!
//! # Architecture
//!
//! The pipeline follows an explicit data flow:
//!
//! ```text
//! discovery → (load → repair → merge) per frame → emit
//! ```
//!
//! # Design Principles
//!
//! - **Fail-fast on missing days**: an absent day directory aborts the
//!   run before any output is written
//! - **Skip-and-continue per frame**: corrupt or mismatched frames are
//!   logged and dropped, never fatal
//! - **One luma, three channels**: pixel selection is driven by a single
//!   derived luminance scalar applied identically to R, G, and B
//! - **Repair before merge**: the gray defect band is neutralized before
//!   a frame can win any pixel
//!
//! # Example
//!
//! ```no_run
//! use nightstack::{Compositor, RequestParams};
//!
//! let compositor = Compositor::new("/data/cams");
//! let params = RequestParams {
//!     camera: "kpcam".into(),
//!     frame_name: "M".into(),
//!     width: "1920".into(),
//!     height: "1080".into(),
//!     date: Some("20210615".into()),
//!     tmp_dir: "/tmp".into(),
//! };
//!
//! let outcome = compositor.run_params(&params).unwrap();
//! println!(
//!     "{} frames used, {} skipped -> {}",
//!     outcome.frames_used,
//!     outcome.frames_skipped,
//!     outcome.output.display()
//! );
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod compositor;
pub mod config;
pub mod discovery;
pub mod emit;
pub mod frame;
pub mod request;
pub mod stack;

// Re-export commonly used types at crate root
pub use compositor::{CompositeError, CompositeOutcome, Compositor};
pub use config::{CameraConfig, ConfigError, FileConfig, PathsConfig};
pub use discovery::{Candidate, DiscoveryError, NightWindow};
pub use emit::{ArchiveLayout, EmitError, PublishedPaths};
pub use frame::{Frame, FrameError};
pub use request::{CompositeRequest, RequestError, RequestParams};
pub use stack::{Accumulator, LumaPlane, RepairReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
