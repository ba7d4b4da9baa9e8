//! Bit quantization of the low-frequency block.

use super::hash::Phash;
use super::matrix::Matrix;

/// Quantizes the top-left `low_freq_size²` block of a frequency-domain
/// matrix into a hash of `low_freq_size² − 1` bits.
///
/// The mean is taken over the block with the DC term at (0,0) excluded:
/// its magnitude tracks overall brightness, not structure, and would
/// swamp the average. Each remaining coefficient then contributes one
/// bit, in row-major order: 1 if it exceeds the mean, else 0.
pub fn encode(freq: &Matrix, low_freq_size: usize) -> Phash {
    debug_assert!(low_freq_size >= 2 && low_freq_size <= freq.size());

    let mut total = 0.0;
    for row in 0..low_freq_size {
        for col in 0..low_freq_size {
            total += freq.get(row, col);
        }
    }
    total -= freq.get(0, 0);

    let count = low_freq_size * low_freq_size - 1;
    let average = total / count as f64;

    Phash::from_bits((0..low_freq_size).flat_map(|row| {
        (0..low_freq_size).filter_map(move |col| {
            if (row, col) == (0, 0) {
                None
            } else {
                Some(freq.get(row, col) > average)
            }
        })
    }))
}
