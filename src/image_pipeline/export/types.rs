//! Export buffer and encoder configuration types

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::common::try_alloc;
use crate::image_pipeline::debayer::types::ColorFrame;
use crate::image_pipeline::raw::types::Geometry;

/// Value of the fourth byte of every export pixel.
pub const OPAQUE: u8 = 0xFF;

/// Four-byte-per-pixel buffer handed to the image writer.
///
/// Each pixel holds the color frame's three bytes in reverse order followed by
/// the constant [`OPAQUE`] byte. With the demosaic's red, green, blue output
/// this is blue, green, red, alpha: the byte layout of a little-endian
/// `0xAARRGGBB` word.
#[derive(Debug, Clone)]
pub struct ExportFrame {
    geometry: Geometry,
    data: Vec<u8>,
}

impl ExportFrame {
    /// Allocate a fully opaque frame for `geometry`.
    pub fn new(geometry: Geometry) -> Result<Self> {
        let data = try_alloc("RGBA", geometry.export_len(), OPAQUE)?;
        Ok(Self { geometry, data })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy the color channels of `color` in, leaving the fourth byte alone.
    ///
    /// Callers guarantee matching geometry.
    pub(crate) fn repack_from(&mut self, color: &ColorFrame) {
        for (dst, src) in self
            .data
            .chunks_exact_mut(4)
            .zip(color.as_bytes().chunks_exact(3))
        {
            dst[0] = src[2];
            dst[1] = src[1];
            dst[2] = src[0];
        }
    }

    /// True when every pixel's fourth byte still holds [`OPAQUE`].
    pub fn alpha_intact(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == OPAQUE)
    }

    /// The frame as red, green, blue, alpha bytes, the order encoders expect.
    pub fn to_rgba(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[2], px[1], px[0], px[3]])
            .collect()
    }
}

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression - fast level
    DeflateFast,
    /// Deflate compression - balanced
    DeflateBalanced,
    /// Deflate compression - best compression (slower)
    DeflateBest,
}

/// Encoder settings for exported frames
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Compression used for `.tif`/`.tiff` outputs
    pub compression: TiffCompression,
    /// TIFF predictor (2 = horizontal differencing)
    pub predictor: Option<u16>,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: TiffCompression::None,
            predictor: None,
            jpeg_quality: 75,
        }
    }
}

impl ExportConfig {
    pub fn builder() -> ExportConfigBuilder {
        ExportConfigBuilder::default()
    }
}

/// Builder for ExportConfig
#[derive(Default)]
pub struct ExportConfigBuilder {
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    jpeg_quality: Option<u8>,
}

impl ExportConfigBuilder {
    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = Some(quality.clamp(1, 100));
        self
    }

    pub fn build(self) -> ExportConfig {
        let default = ExportConfig::default();
        ExportConfig {
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            jpeg_quality: self.jpeg_quality.unwrap_or(default.jpeg_quality),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_export_frame_is_opaque_black() {
        let frame = ExportFrame::new(Geometry::new(3, 2).unwrap()).unwrap();
        assert_eq!(frame.as_bytes().len(), 24);
        assert!(frame.as_bytes().iter().all(|&b| b == OPAQUE));
        assert!(frame.alpha_intact());
    }

    #[test]
    fn test_repack_reverses_color_bytes() {
        let geometry = Geometry::new(2, 2).unwrap();
        let color = ColorFrame::from_bytes(
            geometry,
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12],
        )
        .unwrap();
        let mut frame = ExportFrame::new(geometry).unwrap();

        frame.repack_from(&color);

        assert_eq!(
            frame.as_bytes(),
            &[3, 2, 1, 255, 6, 5, 4, 255, 9, 8, 7, 255, 12, 11, 10, 255]
        );
        assert_eq!(
            frame.to_rgba(),
            vec![1, 2, 3, 255, 4, 5, 6, 255, 7, 8, 9, 255, 10, 11, 12, 255]
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ExportConfig::builder()
            .compression(TiffCompression::DeflateBest)
            .predictor(Some(2))
            .jpeg_quality(0)
            .build();

        assert_eq!(config.compression, TiffCompression::DeflateBest);
        assert_eq!(config.predictor, Some(2));
        assert_eq!(config.jpeg_quality, 1);

        let default = ExportConfig::builder().build();
        assert_eq!(default.compression, TiffCompression::None);
        assert_eq!(default.predictor, None);
        assert_eq!(default.jpeg_quality, 75);
    }
}
