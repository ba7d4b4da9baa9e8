//! Capture and runtime configuration.
//!
//! Every constant the engine depends on (transform size, low-frequency
//! block, distance threshold, warm-up length, crop size) lives in a
//! config struct here or in its owning module; none are inlined at the
//! point of use.

use crate::dedup::DedupConfig;
use crate::hashing::HashConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the frame source.
///
/// The sensor orientation is fixed for the lifetime of a capture
/// session and is applied to every emitted crop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Camera device index or identifier.
    pub device_id: u32,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Target frames per second.
    pub fps: u32,
    /// Sensor orientation in degrees (0, 90, 180 or 270).
    pub orientation_degrees: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device_id: 0,
            width: 640,
            height: 480,
            fps: 30,
            orientation_degrees: 0,
        }
    }
}

impl CaptureConfig {
    /// Creates a new configuration with the specified dimensions.
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidFrameRate);
        }
        if !matches!(self.orientation_degrees, 0 | 90 | 180 | 270) {
            return Err(ConfigError::InvalidOrientation);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid frame dimensions")]
    InvalidDimensions,
    #[error("invalid frame rate (must be 1-120 fps)")]
    InvalidFrameRate,
    #[error("orientation must be 0, 90, 180 or 270 degrees")]
    InvalidOrientation,
    #[error("transform size must be positive")]
    InvalidTransformSize,
    #[error("low-frequency block must be 2..=transform size")]
    InvalidLowFreqBlock,
    #[error("crop size must be positive")]
    InvalidCropSize,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Output configuration for the demo binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Run continuously (true) or process a fixed number of frames.
    pub continuous: bool,
    /// Number of frames to process if not continuous.
    pub frame_count: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            continuous: false,
            frame_count: 300,
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub hash: HashConfig,
    #[serde(default)]
    pub dedup: DedupConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capture.validate()?;
        self.hash.validate()?;
        self.dedup.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_invalid() {
        let mut config = CaptureConfig::default();
        config.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions)
        ));
    }

    #[test]
    fn test_diagonal_orientation_invalid() {
        let mut config = CaptureConfig::default();
        config.orientation_degrees = 45;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidOrientation)
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FileConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: FileConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.hash.transform_size, 32);
        assert_eq!(parsed.hash.low_freq_size, 8);
        assert_eq!(parsed.dedup.distance_threshold, 12);
        assert_eq!(parsed.dedup.warmup_threshold, 100);
        assert_eq!(parsed.dedup.crop_size, 224);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: FileConfig = toml::from_str("[dedup]\ndistance_threshold = 6\n").unwrap();

        assert_eq!(parsed.dedup.distance_threshold, 6);
        assert_eq!(parsed.dedup.warmup_threshold, 100);
        assert_eq!(parsed.capture.width, 640);
    }
}
