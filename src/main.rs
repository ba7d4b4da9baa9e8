//! Framesift CLI
//!
//! Command-line demo driving the frame deduplicator from a mock
//! camera. Real deployments replace the mock with an actual capture
//! collaborator and hand process decisions to a classifier or
//! uploader.

use clap::Parser;
use framesift::{
    capture::{Camera, FileConfig, MockCamera},
    dedup::{Decision, FrameDeduplicator, Orientation, SkipReason},
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "framesift", version, about = "Perceptual-hash frame deduplication demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to feed (overrides the config file).
    #[arg(long)]
    frames: Option<u32>,

    /// Run until interrupted instead of a fixed frame count.
    #[arg(long)]
    continuous: bool,
}

#[derive(Debug, Default)]
struct Tally {
    warmup: u64,
    dropped: u64,
    static_scene: u64,
    background: u64,
    bad: u64,
    processed: u64,
}

impl Tally {
    fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::WarmingUp => self.warmup += 1,
            Decision::Dropped => self.dropped += 1,
            Decision::Skip(SkipReason::StaticScene { .. }) => self.static_scene += 1,
            Decision::Skip(SkipReason::Background { .. }) => self.background += 1,
            Decision::Skip(_) => self.bad += 1,
            Decision::Process(_) => self.processed += 1,
        }
    }
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Framesift v{}", framesift::VERSION);
    info!("This is a demonstration using mock camera input");

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let orientation = match Orientation::from_degrees(config.capture.orientation_degrees) {
        Some(o) => o,
        None => {
            eprintln!(
                "Unsupported sensor orientation: {}",
                config.capture.orientation_degrees
            );
            std::process::exit(1);
        }
    };

    let mut camera = MockCamera::new();
    if let Err(e) = camera.open(&config.capture) {
        eprintln!("Failed to open camera: {}", e);
        std::process::exit(1);
    }

    let dedup = match FrameDeduplicator::new(config.hash, config.dedup, orientation) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let continuous = args.continuous || config.output.continuous;
    let frame_limit = args.frames.unwrap_or(config.output.frame_count);

    let running = Arc::new(AtomicBool::new(true));
    if continuous {
        let running = running.clone();
        if let Err(e) = ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        }) {
            warn!("Failed to install Ctrl-C handler: {}", e);
        }
        info!("Running continuously, press Ctrl-C to stop");
    } else {
        info!("Processing {} frames...", frame_limit);
    }

    let mut tally = Tally::default();
    let mut fed: u64 = 0;

    while running.load(Ordering::SeqCst) && (continuous || fed < u64::from(frame_limit)) {
        let frame = match camera.capture() {
            Ok(f) => f,
            Err(e) => {
                warn!("Frame capture failed: {}", e);
                continue;
            }
        };
        fed += 1;

        let decision = dedup.submit(&frame);
        tally.record(&decision);

        if let Decision::Process(cropped) = decision {
            // Hand-off point for the classifier / uploader collaborators.
            info!(
                sequence = cropped.sequence(),
                size = cropped.width(),
                "process decision emitted"
            );
        }
    }

    info!(
        "Fed {} frames: {} warm-up, {} dropped, {} static-scene skips, {} background skips, {} bad, {} processed",
        fed,
        tally.warmup,
        tally.dropped,
        tally.static_scene,
        tally.background,
        tally.bad,
        tally.processed
    );
}
