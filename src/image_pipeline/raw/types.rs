//! Frame geometry and raw mosaic buffer types

use std::fmt;

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::common::try_alloc;

/// Smallest supported frame edge; the demosaic reads one neighbor in each direction.
pub const MIN_DIMENSION: usize = 2;

/// Width and height of every buffer in a capture session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Geometry {
    width: usize,
    height: usize,
}

impl Geometry {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(CaptureError::InvalidDimensions(width, height));
        }

        // The largest buffer of the session is the four-channel export frame.
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(CaptureError::InvalidDimensions(width, height))?;

        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Bytes in a RawFrame of this geometry.
    pub fn raw_len(&self) -> usize {
        self.pixel_count()
    }

    /// Bytes in a ColorFrame of this geometry.
    pub fn color_len(&self) -> usize {
        self.pixel_count() * 3
    }

    /// Bytes in an ExportFrame of this geometry.
    pub fn export_len(&self) -> usize {
        self.pixel_count() * 4
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One exposure of the sensor mosaic, one byte per pixel, row-major.
///
/// The buffer is allocated once per session and refilled in place; a short
/// read leaves the previous frame's bytes behind the new data.
#[derive(Debug, Clone)]
pub struct RawFrame {
    geometry: Geometry,
    data: Vec<u8>,
}

impl RawFrame {
    /// Allocate a zeroed frame for `geometry`.
    pub fn new(geometry: Geometry) -> Result<Self> {
        let data = try_alloc("bayer", geometry.raw_len(), 0)?;
        Ok(Self { geometry, data })
    }

    /// Wrap existing mosaic bytes, which must be exactly `width * height` long.
    pub fn from_bytes(geometry: Geometry, data: Vec<u8>) -> Result<Self> {
        if data.len() != geometry.raw_len() {
            return Err(CaptureError::BufferSizeMismatch {
                expected: geometry.raw_len(),
                actual: data.len(),
            });
        }
        Ok(Self { geometry, data })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Turn a byte count reported by a source into a strict result.
    pub fn expect_full(&self, bytes_read: usize) -> Result<()> {
        if bytes_read != self.data.len() {
            return Err(CaptureError::ShortRead {
                expected: self.data.len(),
                actual: bytes_read,
            });
        }
        Ok(())
    }
}
