//! Per-frame decision emitted by the deduplicator.

use crate::capture::Frame;

/// Why a hashed frame was skipped instead of processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Too close to the previously processed frame; the scene is
    /// static and downstream work would be redundant.
    StaticScene {
        /// Hamming distance to the previous hash.
        distance: u32,
    },
    /// Matches the established background reference; the view has not
    /// changed.
    Background {
        /// Hamming distance to the background hash.
        distance: u32,
    },
    /// The frame could not be preprocessed (empty or degenerate);
    /// treated as a dropped sample, no state was updated.
    BadFrame,
    /// Stored and current hashes were not comparable. Only possible if
    /// the hash configuration changed mid-stream; never coerced into
    /// "similar" or "different".
    Incomparable,
}

/// Outcome of submitting one frame.
#[derive(Debug)]
pub enum Decision {
    /// Discarded while the sensor settles; no hash was computed.
    WarmingUp,
    /// Discarded because a previous frame was still being processed.
    /// Contention drops frames, it never queues them.
    Dropped,
    /// Hashed but not worth downstream work.
    Skip(SkipReason),
    /// New content: the orientation-corrected center crop to hand to
    /// downstream collaborators (classifier, uploader).
    Process(Frame),
}

impl Decision {
    /// True for the `Process` variant.
    pub fn is_process(&self) -> bool {
        matches!(self, Decision::Process(_))
    }
}
