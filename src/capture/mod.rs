//! Camera input and frame handling.
//!
//! This module provides abstractions for delivering frames to the
//! deduplication engine and for configuring the whole pipeline. Real
//! acquisition hardware lives behind the [`Camera`] trait.

mod camera;
mod config;
mod frame;

pub use camera::{Camera, CameraError, MockCamera};
pub use config::{CaptureConfig, ConfigError, FileConfig, OutputConfig};
pub use frame::Frame;
