//! Frame reduction: resize to the transform size and desaturate.
//!
//! The hashing pipeline only ever sees a fixed-size grayscale matrix;
//! this module is the sole place raw color frames are touched.

use super::matrix::Matrix;
use crate::capture::Frame;
use image::imageops::{self, FilterType};
use thiserror::Error;

/// Errors raised when a frame cannot be reduced for hashing.
///
/// These are per-frame conditions: the frame is dropped and no stored
/// hash is updated. Nothing here is fatal to the stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PreprocessError {
    #[error("frame has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },
    #[error("frame buffer of {actual} bytes does not match {width}x{height} rgb data")]
    BufferMismatch {
        actual: usize,
        width: u32,
        height: u32,
    },
}

/// Reduces a color frame to an `n × n` grayscale matrix.
///
/// Resampling is plain nearest-neighbor; no filtering is wanted beyond
/// basic scaling since the transform discards high frequencies anyway.
/// Output values are 8-bit intensities widened to `f64`.
pub fn preprocess(frame: &Frame, n: usize) -> Result<Matrix, PreprocessError> {
    let img = frame.to_image().ok_or_else(|| to_error(frame))?;

    let side = n as u32;
    let small = imageops::resize(&img, side, side, FilterType::Nearest);
    let gray = imageops::grayscale(&small);

    Ok(Matrix::from_fn(n, |row, col| {
        f64::from(gray.get_pixel(col as u32, row as u32).0[0])
    }))
}

fn to_error(frame: &Frame) -> PreprocessError {
    if frame.width() == 0 || frame.height() == 0 {
        PreprocessError::ZeroArea {
            width: frame.width(),
            height: frame.height(),
        }
    } else {
        PreprocessError::BufferMismatch {
            actual: frame.pixels().len(),
            width: frame.width(),
            height: frame.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, value: u8) -> Frame {
        Frame::new(vec![value; (width * height * 3) as usize], width, height, 1)
    }

    #[test]
    fn test_solid_frame_gives_uniform_matrix() {
        let frame = solid_frame(64, 48, 200);
        let matrix = preprocess(&frame, 32).unwrap();

        assert_eq!(matrix.size(), 32);
        for r in 0..32 {
            for c in 0..32 {
                assert_eq!(matrix.get(r, c), 200.0);
            }
        }
    }

    #[test]
    fn test_zero_area_rejected() {
        let frame = Frame::new(Vec::new(), 0, 0, 1);
        assert!(matches!(
            preprocess(&frame, 32),
            Err(PreprocessError::ZeroArea { .. })
        ));
    }

    #[test]
    fn test_buffer_mismatch_rejected() {
        let frame = Frame::new(vec![0u8; 10], 64, 48, 1);
        assert!(matches!(
            preprocess(&frame, 32),
            Err(PreprocessError::BufferMismatch { .. })
        ));
    }

    #[test]
    fn test_output_is_intensity_range() {
        // Gradient frame; every cell must stay within 8-bit range.
        let width = 100u32;
        let height = 80u32;
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y) % 256) as u8);
            }
        }
        let frame = Frame::new(pixels, width, height, 1);
        let matrix = preprocess(&frame, 32).unwrap();

        for r in 0..32 {
            for c in 0..32 {
                let v = matrix.get(r, c);
                assert!((0.0..=255.0).contains(&v));
            }
        }
    }
}
