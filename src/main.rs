//! Nightstack CLI
//!
//! Nightly entry point: reads a site configuration, builds the night's
//! composite, and optionally publishes it to the web archive.

use clap::Parser;
use nightstack::{ArchiveLayout, CompositeRequest, Compositor, FileConfig};
use std::path::PathBuf;
use tracing::{info, warn};

/// Builds the nightly max-luminance composite for one camera.
#[derive(Debug, Parser)]
#[command(name = "nightstack", version)]
struct Cli {
    /// Site configuration file (TOML).
    #[arg(short, long)]
    config: PathBuf,

    /// Target end date as yyyymmdd (default: today).
    #[arg(short, long)]
    date: Option<String>,

    /// Copy the composite to the web archive locations.
    #[arg(short, long, default_value_t = true, action = clap::ArgAction::Set)]
    webcopy: bool,

    /// Override the archive root from the config file.
    #[arg(long)]
    archive_root: Option<PathBuf>,

    /// Override the temp working directory from the config file.
    #[arg(long)]
    tmp_dir: Option<PathBuf>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    info!("Nightstack v{}", nightstack::VERSION);

    let mut config = match FileConfig::from_file(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config {}: {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(root) = cli.archive_root {
        config.paths.archive_root = root;
    }
    if let Some(tmp) = cli.tmp_dir {
        config.paths.tmp_dir = tmp;
    }

    let request = match CompositeRequest::from_params(&config.request_params(cli.date)) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Invalid parameters: {}", e);
            std::process::exit(1);
        }
    };

    let compositor = Compositor::new(&config.paths.archive_root);
    let outcome = match compositor.run(&request) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("Composite failed: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Composite done: {} of {} frames used ({} skipped, {} repaired)",
        outcome.frames_used,
        outcome.frames_considered,
        outcome.frames_skipped,
        outcome.frames_repaired
    );
    if outcome.frames_used == 0 {
        warn!("composite is all black: no valid frames in the night window");
    }

    if cli.webcopy {
        let layout = ArchiveLayout::new(&config.paths.archive_root);
        match layout.publish(
            &outcome.output,
            request.camera(),
            request.frame_name(),
            request.date(),
        ) {
            Ok(paths) => {
                info!("Published latest composite to {}", paths.latest.display());
                info!("Archived composite to {}", paths.archived.display());
            }
            Err(e) => {
                eprintln!("Archival copy failed: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        info!(
            "Webcopy disabled; composite left at {}",
            outcome.output.display()
        );
    }
}
