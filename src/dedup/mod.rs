//! Stateful frame deduplication.
//!
//! Decides, per frame, whether downstream work (classification,
//! upload) is worth doing. Two rolling references are kept: the hash
//! of the last processed frame and the hash of the assumed-static
//! background. Frames close to either are skipped; frames arriving
//! while a decision is in flight are dropped, never queued.

mod crop;
mod decision;

pub use crop::{center_crop, Orientation};
pub use decision::{Decision, SkipReason};

use crate::capture::{ConfigError, Frame};
use crate::hashing::{HashConfig, Phash, Phasher};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Deduplication configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    /// Minimum Hamming distance for two frames to count as different.
    pub distance_threshold: u32,
    /// Frames discarded at startup before trusting input.
    pub warmup_threshold: u32,
    /// Edge size of the square crop emitted on a process decision.
    pub crop_size: u32,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            distance_threshold: 12,
            warmup_threshold: 100,
            crop_size: 224,
        }
    }
}

impl DedupConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.crop_size == 0 {
            return Err(ConfigError::InvalidCropSize);
        }
        Ok(())
    }
}

/// Rolling deduplicator state.
///
/// One explicit value rather than ambient fields, so the state machine
/// is testable without a live camera. Mutated only under the guard in
/// [`FrameDeduplicator::submit`].
#[derive(Debug, Default)]
struct DedupState {
    previous: Option<Phash>,
    background: Option<Phash>,
    warmup_count: u32,
    warmed_up: bool,
}

/// Per-frame admission decision engine.
///
/// `submit` takes `&self`: the state sits behind a mutex whose
/// `try_lock` is the busy guard, so the deduplicator can be shared
/// with a concurrent frame source and still drops (never blocks or
/// queues) on contention. The guard is released on every exit path by
/// guard drop, including error paths.
pub struct FrameDeduplicator {
    config: DedupConfig,
    orientation: Orientation,
    hasher: Phasher,
    state: Mutex<DedupState>,
}

impl FrameDeduplicator {
    /// Creates a deduplicator, precomputing the transform basis.
    pub fn new(
        hash_config: HashConfig,
        config: DedupConfig,
        orientation: Orientation,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            orientation,
            hasher: Phasher::new(hash_config)?,
            state: Mutex::new(DedupState::default()),
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DedupConfig {
        &self.config
    }

    /// True once the warm-up period has elapsed.
    pub fn is_warmed_up(&self) -> bool {
        self.state
            .try_lock()
            .map(|state| state.warmed_up)
            .unwrap_or(false)
    }

    /// Submits one frame and returns the decision.
    ///
    /// Decision order for a ready, uncontended frame: hash it, skip if
    /// too close to the previous hash, otherwise take it as the new
    /// previous hash, skip if it still matches the background, else
    /// emit the center crop for processing. The previous hash is
    /// updated before the background check; a frame far from the
    /// previous one overwrites it even when the background then skips
    /// it.
    pub fn submit(&self, frame: &Frame) -> Decision {
        let mut state = match self.state.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::debug!(sequence = frame.sequence(), "busy, frame dropped");
                return Decision::Dropped;
            }
        };

        if !state.warmed_up {
            state.warmup_count += 1;
            if state.warmup_count > self.config.warmup_threshold {
                state.warmed_up = true;
                tracing::info!(
                    discarded = state.warmup_count,
                    "warm-up complete, next frame will be hashed"
                );
            }
            return Decision::WarmingUp;
        }

        let current = match self.hasher.hash(frame) {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(sequence = frame.sequence(), error = %e, "frame not hashable");
                return Decision::Skip(SkipReason::BadFrame);
            }
        };

        let distance_prev = {
            let previous = state.previous.get_or_insert_with(|| current.clone());
            match previous.distance(&current) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(error = %e, "previous hash not comparable");
                    return Decision::Skip(SkipReason::Incomparable);
                }
            }
        };

        let distance_background = {
            let background = state.background.get_or_insert_with(|| current.clone());
            match background.distance(&current) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(error = %e, "background hash not comparable");
                    return Decision::Skip(SkipReason::Incomparable);
                }
            }
        };

        if distance_prev < self.config.distance_threshold {
            tracing::debug!(distance_prev, "skip: static scene");
            return Decision::Skip(SkipReason::StaticScene {
                distance: distance_prev,
            });
        }
        state.previous = Some(current);

        if distance_background < self.config.distance_threshold {
            tracing::debug!(distance_background, "skip: matches background");
            return Decision::Skip(SkipReason::Background {
                distance: distance_background,
            });
        }

        tracing::info!(
            sequence = frame.sequence(),
            distance_prev,
            distance_background,
            "new content, emitting crop"
        );
        match center_crop(frame, self.orientation, self.config.crop_size) {
            Ok(cropped) => Decision::Process(cropped),
            Err(e) => {
                tracing::warn!(sequence = frame.sequence(), error = %e, "crop failed");
                Decision::Skip(SkipReason::BadFrame)
            }
        }
    }
}

impl std::fmt::Debug for FrameDeduplicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameDeduplicator")
            .field("config", &self.config)
            .field("orientation", &self.orientation)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(value: u8, sequence: u64) -> Frame {
        Frame::new(vec![value; 64 * 48 * 3], 64, 48, sequence)
    }

    fn split_frame(sequence: u64) -> Frame {
        let (w, h) = (64u32, 48u32);
        let mut pixels = Vec::with_capacity((w * h * 3) as usize);
        for _y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        Frame::new(pixels, w, h, sequence)
    }

    fn inverted_frame(frame: &Frame, sequence: u64) -> Frame {
        let pixels = frame.pixels().iter().map(|&p| 255 - p).collect();
        Frame::new(pixels, frame.width(), frame.height(), sequence)
    }

    fn dedup(config: DedupConfig) -> FrameDeduplicator {
        FrameDeduplicator::new(HashConfig::default(), config, Orientation::Deg0).unwrap()
    }

    #[test]
    fn test_warmup_discards_then_transitions() {
        let dedup = dedup(DedupConfig {
            warmup_threshold: 100,
            ..Default::default()
        });

        // 101 identical frames all discarded as warm-up.
        for i in 0..101 {
            assert!(
                matches!(dedup.submit(&solid_frame(80, i + 1)), Decision::WarmingUp),
                "frame {} should be warm-up",
                i + 1
            );
        }
        assert!(dedup.is_warmed_up());

        // Frame 102 is the first hashed; it bootstraps both references
        // and skips against itself with distance zero.
        match dedup.submit(&solid_frame(80, 102)) {
            Decision::Skip(SkipReason::StaticScene { distance }) => assert_eq!(distance, 0),
            other => panic!("expected static-scene skip, got {:?}", other),
        }

        let state = dedup.state.try_lock().unwrap();
        assert!(state.previous.is_some());
        assert!(state.background.is_some());
        assert_eq!(state.previous, state.background);
    }

    #[test]
    fn test_identical_then_inverted_frame() {
        let config = DedupConfig {
            warmup_threshold: 0,
            ..Default::default()
        };
        let dedup = dedup(config);
        let base = split_frame(1);
        let inverted = inverted_frame(&base, 4);

        assert!(matches!(dedup.submit(&base), Decision::WarmingUp));

        // Bootstrap frame establishes previous and background.
        assert!(matches!(
            dedup.submit(&split_frame(2)),
            Decision::Skip(SkipReason::StaticScene { .. })
        ));
        // Identical to the background: skipped either way.
        assert!(matches!(dedup.submit(&split_frame(3)), Decision::Skip(_)));

        // The inverted frame processes exactly when its induced
        // distance clears the threshold.
        let hasher = Phasher::new(HashConfig::default()).unwrap();
        let induced = hasher
            .hash(&base)
            .unwrap()
            .distance(&hasher.hash(&inverted).unwrap())
            .unwrap();

        let decision = dedup.submit(&inverted);
        if induced >= config.distance_threshold {
            assert!(decision.is_process(), "distance {} should process", induced);
        } else {
            assert!(matches!(decision, Decision::Skip(_)));
        }
    }

    #[test]
    fn test_process_emits_configured_crop() {
        // Threshold zero means no distance can be "too similar", so
        // the first ready frame exercises the full process path.
        let dedup = dedup(DedupConfig {
            warmup_threshold: 0,
            distance_threshold: 0,
            crop_size: 224,
            ..Default::default()
        });

        assert!(matches!(dedup.submit(&split_frame(1)), Decision::WarmingUp));
        match dedup.submit(&split_frame(2)) {
            Decision::Process(cropped) => {
                assert_eq!(cropped.width(), 224);
                assert_eq!(cropped.height(), 224);
                assert_eq!(cropped.sequence(), 2);
            }
            other => panic!("expected process, got {:?}", other),
        }
    }

    #[test]
    fn test_contention_drops_and_preserves_state() {
        let dedup = dedup(DedupConfig {
            warmup_threshold: 0,
            ..Default::default()
        });

        assert!(matches!(dedup.submit(&solid_frame(60, 1)), Decision::WarmingUp));
        assert!(matches!(dedup.submit(&solid_frame(60, 2)), Decision::Skip(_)));

        let snapshot = dedup.state.try_lock().unwrap().previous.clone();

        // Hold the guard, as if the previous frame were still being
        // decided, and submit a very different frame.
        {
            let _guard = dedup.state.try_lock().unwrap();
            assert!(matches!(dedup.submit(&split_frame(3)), Decision::Dropped));
        }

        assert_eq!(dedup.state.try_lock().unwrap().previous, snapshot);
    }

    #[test]
    fn test_previous_updates_even_on_background_skip() {
        let config = DedupConfig {
            warmup_threshold: 0,
            distance_threshold: 1,
            ..Default::default()
        };
        let dedup = dedup(config);
        let background = solid_frame(0, 0);

        assert!(matches!(dedup.submit(&background), Decision::WarmingUp));
        // Bootstrap: previous = background reference = flat scene.
        assert!(matches!(
            dedup.submit(&solid_frame(0, 2)),
            Decision::Skip(SkipReason::StaticScene { .. })
        ));

        // A structurally different frame processes and becomes the
        // previous hash.
        let changed = split_frame(3);
        assert!(dedup.submit(&changed).is_process());

        // Returning to the flat scene: far from previous (so previous
        // is overwritten) but it matches the background, so it skips.
        match dedup.submit(&solid_frame(0, 4)) {
            Decision::Skip(SkipReason::Background { distance }) => assert_eq!(distance, 0),
            other => panic!("expected background skip, got {:?}", other),
        }

        // The overwrite is observable: the same flat frame again is
        // now a static-scene skip against the updated previous hash.
        assert!(matches!(
            dedup.submit(&solid_frame(0, 5)),
            Decision::Skip(SkipReason::StaticScene { distance: 0 })
        ));
    }

    #[test]
    fn test_bad_frame_skips_without_state_update() {
        let dedup = dedup(DedupConfig {
            warmup_threshold: 0,
            ..Default::default()
        });
        assert!(matches!(dedup.submit(&solid_frame(60, 1)), Decision::WarmingUp));

        let broken = Frame::new(vec![1, 2, 3], 64, 48, 2);
        assert!(matches!(
            dedup.submit(&broken),
            Decision::Skip(SkipReason::BadFrame)
        ));

        let state = dedup.state.try_lock().unwrap();
        assert!(state.previous.is_none());
        assert!(state.background.is_none());
    }
}
