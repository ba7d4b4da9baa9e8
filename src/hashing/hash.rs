//! Perceptual hash value and Hamming comparison.

use thiserror::Error;

/// Two hashes that cannot be meaningfully compared.
///
/// Raised when either hash is empty or the lengths differ, which only
/// happens if hashes from different configurations are mixed. This is
/// deliberately an error rather than a distance: a consumer must never
/// read it as "similar" or "different".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("hashes are not comparable: lengths {left} and {right}")]
pub struct IncomparableHashes {
    /// Bit length of the left-hand hash.
    pub left: usize,
    /// Bit length of the right-hand hash.
    pub right: usize,
}

/// A fixed-length perceptual fingerprint of one frame.
///
/// Bits are packed into `u64` words; the length is always
/// `low_freq_size² − 1` for the configuration that produced it (63 by
/// default). Hashes are plain values: cloned freely, compared by
/// [`distance`](Phash::distance), never mutated after encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Phash {
    words: Vec<u64>,
    len: usize,
}

impl Phash {
    /// Builds a hash from an ordered sequence of bits.
    pub fn from_bits(bits: impl IntoIterator<Item = bool>) -> Self {
        let mut words = Vec::new();
        let mut len = 0;
        for bit in bits {
            if len % 64 == 0 {
                words.push(0);
            }
            if bit {
                words[len / 64] |= 1u64 << (len % 64);
            }
            len += 1;
        }
        Self { words, len }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the hash holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `index`.
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.words[index / 64] >> (index % 64) & 1 == 1
    }

    /// Counts the set bits.
    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Hamming distance to another hash.
    ///
    /// Symmetric and deterministic; the result is in `[0, len]`.
    /// Empty or differing-length hashes are not comparable.
    pub fn distance(&self, other: &Phash) -> Result<u32, IncomparableHashes> {
        if self.is_empty() || other.is_empty() || self.len != other.len {
            return Err(IncomparableHashes {
                left: self.len,
                right: other.len,
            });
        }
        // Unused high bits are zero by construction, so whole-word XOR
        // needs no tail mask.
        Ok(self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum())
    }
}

impl std::fmt::Display for Phash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.len {
            f.write_str(if self.bit(i) { "1" } else { "0" })?;
        }
        Ok(())
    }
}
