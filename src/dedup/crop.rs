//! Center crop and orientation correction for processed frames.
//!
//! Downstream consumers want a fixed-size square. Only the center
//! square of the original rectangle is kept, scaled, then rotated to
//! compensate for the fixed sensor mounting.

use crate::capture::Frame;
use crate::hashing::PreprocessError;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

/// Fixed sensor orientation, supplied once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Sensor aligned with the display.
    Deg0,
    /// Sensor rotated 90° clockwise.
    Deg90,
    /// Sensor upside down.
    Deg180,
    /// Sensor rotated 270° clockwise.
    Deg270,
}

impl Orientation {
    /// Parses an orientation from degrees; only the four right angles
    /// are valid.
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    /// Returns the rotation in degrees.
    pub fn degrees(&self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

/// Extracts the orientation-corrected center square at `size × size`.
///
/// The center square of min(width, height) is taken from the source,
/// scaled with bilinear filtering, then rotated. The cropped frame
/// keeps the source frame's sequence number.
pub fn center_crop(
    frame: &Frame,
    orientation: Orientation,
    size: u32,
) -> Result<Frame, PreprocessError> {
    let img = frame.to_image().ok_or(PreprocessError::ZeroArea {
        width: frame.width(),
        height: frame.height(),
    })?;

    let min_dim = frame.width().min(frame.height());
    let x0 = (frame.width() - min_dim) / 2;
    let y0 = (frame.height() - min_dim) / 2;

    let square = imageops::crop_imm(&img, x0, y0, min_dim, min_dim).to_image();
    let scaled = imageops::resize(&square, size, size, FilterType::Triangle);
    let rotated = match orientation {
        Orientation::Deg0 => scaled,
        Orientation::Deg90 => imageops::rotate90(&scaled),
        Orientation::Deg180 => imageops::rotate180(&scaled),
        Orientation::Deg270 => imageops::rotate270(&scaled),
    };

    Ok(Frame::new(rotated.into_raw(), size, size, frame.sequence()))
}
