//! Framesift — perceptual-hash frame deduplication.
//!
//! Converts camera frames into short DCT-based fingerprints (pHash)
//! and uses successive fingerprints to decide whether a frame is new
//! relative to a reference background and the previous frame,
//! throttling expensive downstream work (classification, upload)
//! under a continuous frame stream.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! capture → preprocess → transform → encode → hash
//!                                               ↓
//!                  previous / background ← deduplicate → crop
//! ```
//!
//! # Design Principles
//!
//! - **Drop, never queue**: a frame arriving while a decision is in
//!   flight is discarded, bounding latency and memory
//! - **Skip on failure**: no per-frame error is fatal; everything
//!   degrades to skipping that frame
//! - **Configuration over constants**: transform size, thresholds and
//!   warm-up length are all explicit configuration
//!
//! # Example
//!
//! ```no_run
//! use framesift::{
//!     capture::{Camera, CaptureConfig, MockCamera},
//!     dedup::{Decision, DedupConfig, FrameDeduplicator, Orientation},
//!     hashing::HashConfig,
//! };
//!
//! let mut camera = MockCamera::new();
//! camera.open(&CaptureConfig::default()).unwrap();
//!
//! let dedup = FrameDeduplicator::new(
//!     HashConfig::default(),
//!     DedupConfig::default(),
//!     Orientation::Deg0,
//! )
//! .unwrap();
//!
//! for _ in 0..200 {
//!     let frame = camera.capture().unwrap();
//!     if let Decision::Process(cropped) = dedup.submit(&frame) {
//!         // Hand the crop to the classifier / uploader.
//!         println!("new content: {}x{}", cropped.width(), cropped.height());
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capture;
pub mod dedup;
pub mod hashing;

// Re-export commonly used types at crate root
pub use capture::{Camera, CaptureConfig, FileConfig, Frame, MockCamera};
pub use dedup::{Decision, DedupConfig, FrameDeduplicator, Orientation, SkipReason};
pub use hashing::{DctBasis, HashConfig, IncomparableHashes, Phash, Phasher, PreprocessError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
