//! Types for debayering operations

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::common::try_alloc;
use crate::image_pipeline::raw::types::Geometry;

/// Three-channel image produced by the demosaic, row-major.
///
/// Each pixel is three bytes in demosaic output order: red, green, blue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorFrame {
    geometry: Geometry,
    data: Vec<u8>,
}

impl ColorFrame {
    /// Allocate a zeroed frame for `geometry`.
    pub fn new(geometry: Geometry) -> Result<Self> {
        let data = try_alloc("RGB24", geometry.color_len(), 0)?;
        Ok(Self { geometry, data })
    }

    /// Wrap existing pixel bytes, which must be exactly `width * height * 3` long.
    pub fn from_bytes(geometry: Geometry, data: Vec<u8>) -> Result<Self> {
        if data.len() != geometry.color_len() {
            return Err(CaptureError::BufferSizeMismatch {
                expected: geometry.color_len(),
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

    /// The three bytes of the pixel at `(row, col)`, if in range.
    pub fn pixel(&self, row: usize, col: usize) -> Option<[u8; 3]> {
        if row >= self.geometry.height() || col >= self.geometry.width() {
            return None;
        }
        let offset = (row * self.geometry.width() + col) * 3;
        let px = self.data.get(offset..offset + 3)?;
        Some([px[0], px[1], px[2]])
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
