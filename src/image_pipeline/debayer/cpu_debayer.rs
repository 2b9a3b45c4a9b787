//! Fixed-neighborhood demosaic for BGGR sensors.
//!
//! Every pixel copies its own sample and fills the two missing channels by
//! averaging the nearest samples of that color. Interior pixels use the full
//! neighborhood; pixels on the first/last row or column fall back to a reduced
//! set, chosen per phase. The row bound is tested before the column bound and
//! corners get no special treatment.

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::debayer::types::ColorFrame;
use crate::image_pipeline::raw::types::{Geometry, RawFrame};

/// Position of a sample within the 2x2 BGGR tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BayerPhase {
    /// Even row, even column.
    Blue,
    /// Even row, odd column.
    GreenOnBlueRow,
    /// Odd row, even column.
    GreenOnRedRow,
    /// Odd row, odd column.
    Red,
}

impl BayerPhase {
    pub fn at(row: usize, col: usize) -> Self {
        match (row % 2, col % 2) {
            (0, 0) => Self::Blue,
            (0, _) => Self::GreenOnBlueRow,
            (_, 0) => Self::GreenOnRedRow,
            _ => Self::Red,
        }
    }
}

/// Read-only view of a mosaic with neighbor lookups.
struct Mosaic<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
}

impl Mosaic<'_> {
    fn at(&self, row: usize, col: usize) -> u16 {
        u16::from(self.data[row * self.width + col])
    }

    // Odd geometries are the only way to step past the last row or column;
    // such reads land on the edge sample.
    fn below(&self, row: usize) -> usize {
        (row + 1).min(self.height - 1)
    }

    fn right_of(&self, col: usize) -> usize {
        (col + 1).min(self.width - 1)
    }

    fn diagonal_sum(&self, row: usize, col: usize) -> u16 {
        let (up, down) = (row - 1, self.below(row));
        let (left, right) = (col - 1, self.right_of(col));
        self.at(up, left) + self.at(up, right) + self.at(down, left) + self.at(down, right)
    }

    fn orthogonal_sum(&self, row: usize, col: usize) -> u16 {
        let (up, down) = (row - 1, self.below(row));
        let (left, right) = (col - 1, self.right_of(col));
        self.at(row, left) + self.at(row, right) + self.at(up, col) + self.at(down, col)
    }

    fn blue_site(&self, row: usize, col: usize) -> [u16; 3] {
        let blue = self.at(row, col);
        if row > 0 && col > 0 {
            [
                self.diagonal_sum(row, col) / 4,
                self.orthogonal_sum(row, col) / 4,
                blue,
            ]
        } else {
            // first row or left column
            let (down, right) = (self.below(row), self.right_of(col));
            [
                self.at(down, right),
                (self.at(row, right) + self.at(down, col)) / 2,
                blue,
            ]
        }
    }

    fn green_on_blue_row(&self, row: usize, col: usize) -> [u16; 3] {
        let green = self.at(row, col);
        let down = self.below(row);
        if row > 0 && col < self.width - 1 {
            [
                (self.at(down, col) + self.at(row - 1, col)) / 2,
                green,
                (self.at(row, col - 1) + self.at(row, col + 1)) / 2,
            ]
        } else {
            // first row or right column
            [self.at(down, col), green, self.at(row, col - 1)]
        }
    }

    fn green_on_red_row(&self, row: usize, col: usize) -> [u16; 3] {
        let green = self.at(row, col);
        let right = self.right_of(col);
        if row < self.height - 1 && col > 0 {
            [
                (self.at(row, col - 1) + self.at(row, right)) / 2,
                green,
                (self.at(row + 1, col) + self.at(row - 1, col)) / 2,
            ]
        } else {
            // last row or left column
            [self.at(row, right), green, self.at(row - 1, col)]
        }
    }

    fn red_site(&self, row: usize, col: usize) -> [u16; 3] {
        let red = self.at(row, col);
        if row < self.height - 1 && col < self.width - 1 {
            [
                red,
                self.orthogonal_sum(row, col) / 4,
                self.diagonal_sum(row, col) / 4,
            ]
        } else {
            // last row or right column
            [
                red,
                (self.at(row, col - 1) + self.at(row - 1, col)) / 2,
                self.at(row - 1, col - 1),
            ]
        }
    }

    fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let rgb = match BayerPhase::at(row, col) {
            BayerPhase::Blue => self.blue_site(row, col),
            BayerPhase::GreenOnBlueRow => self.green_on_blue_row(row, col),
            BayerPhase::GreenOnRedRow => self.green_on_red_row(row, col),
            BayerPhase::Red => self.red_site(row, col),
        };
        // Averages of u8 samples never exceed u8::MAX.
        [rgb[0] as u8, rgb[1] as u8, rgb[2] as u8]
    }
}

/// Demosaic `raw` into `out`, writing red, green, blue per pixel.
///
/// `raw` must hold `width * height` bytes and `out` three times as many.
pub fn demosaic_into(raw: &[u8], geometry: Geometry, out: &mut [u8]) -> Result<()> {
    if raw.len() != geometry.raw_len() {
        return Err(CaptureError::BufferSizeMismatch {
            expected: geometry.raw_len(),
            actual: raw.len(),
        });
    }
    if out.len() != geometry.color_len() {
        return Err(CaptureError::BufferSizeMismatch {
            expected: geometry.color_len(),
            actual: out.len(),
        });
    }

    let mosaic = Mosaic {
        data: raw,
        width: geometry.width(),
        height: geometry.height(),
    };

    for (row, dst_row) in out.chunks_exact_mut(geometry.width() * 3).enumerate() {
        for (col, dst) in dst_row.chunks_exact_mut(3).enumerate() {
            dst.copy_from_slice(&mosaic.pixel(row, col));
        }
    }

    Ok(())
}

/// Demosaic a raw frame into a freshly allocated color frame.
pub fn demosaic(raw: &RawFrame) -> Result<ColorFrame> {
    let mut color = ColorFrame::new(raw.geometry())?;
    demosaic_into(raw.as_bytes(), raw.geometry(), color.as_bytes_mut())?;
    Ok(color)
}

pub struct CpuDebayer;

impl CpuDebayer {
    pub fn new() -> Self {
        Self
    }

    pub fn process(&self, raw: &RawFrame) -> Result<ColorFrame> {
        demosaic(raw)
    }

    /// Demosaic into an existing frame of the same geometry.
    #[instrument(level = "trace", skip_all, fields(geometry = %raw.geometry()))]
    pub fn process_into(&self, raw: &RawFrame, color: &mut ColorFrame) -> Result<()> {
        if color.geometry() != raw.geometry() {
            return Err(CaptureError::GeometryMismatch {
                expected: raw.geometry().to_string(),
                actual: color.geometry().to_string(),
            });
        }
        demosaic_into(raw.as_bytes(), raw.geometry(), color.as_bytes_mut())?;
        debug!("Demosaiced {} frame", raw.geometry());
        Ok(())
    }
}

impl Default for CpuDebayer {
    fn default() -> Self {
        Self::new()
    }
}
