//! Perceptual hashing pipeline.
//!
//! Converts an arbitrary-resolution color frame into a short
//! structure-sensitive fingerprint: resize + desaturate, separable 2D
//! cosine transform against a precomputed basis, then bit quantization
//! of the low-frequency block. The basis is built once per
//! configuration and reused for every frame.

mod basis;
mod encode;
mod hash;
mod matrix;
mod preprocess;

pub use basis::DctBasis;
pub use hash::{IncomparableHashes, Phash};
pub use matrix::Matrix;
pub use preprocess::{preprocess, PreprocessError};

use crate::capture::{ConfigError, Frame};
use serde::{Deserialize, Serialize};

/// Hashing configuration.
///
/// Two hashes are comparable only if produced under identical values
/// here; changing either mid-stream invalidates stored references.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Edge size of the square transform (frames are reduced to this).
    pub transform_size: usize,
    /// Edge size of the retained low-frequency block.
    pub low_freq_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            transform_size: 32,
            low_freq_size: 8,
        }
    }
}

impl HashConfig {
    /// Length in bits of hashes produced under this configuration.
    pub fn hash_len(&self) -> usize {
        self.low_freq_size * self.low_freq_size - 1
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transform_size == 0 {
            return Err(ConfigError::InvalidTransformSize);
        }
        if self.low_freq_size < 2 || self.low_freq_size > self.transform_size {
            return Err(ConfigError::InvalidLowFreqBlock);
        }
        Ok(())
    }
}

/// Hashes frames under a fixed configuration.
///
/// Owns the precomputed basis; hashing a frame is a pure function of
/// the frame pixels, so identical frames always produce identical
/// hashes.
#[derive(Debug)]
pub struct Phasher {
    config: HashConfig,
    basis: DctBasis,
}

impl Phasher {
    /// Creates a hasher, building the transform basis once.
    pub fn new(config: HashConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            basis: DctBasis::new(config.transform_size),
            config,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &HashConfig {
        &self.config
    }

    /// Computes the perceptual hash of a frame.
    pub fn hash(&self, frame: &Frame) -> Result<Phash, PreprocessError> {
        let matrix = preprocess(frame, self.config.transform_size)?;
        let freq = self.basis.transform(&matrix);
        let hash = encode::encode(&freq, self.config.low_freq_size);
        tracing::trace!(sequence = frame.sequence(), hash = %hash, "frame hashed");
        Ok(hash)
    }
}
