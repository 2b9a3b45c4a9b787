//! Image writer picking the file format from the output extension.
//!
//! `.tif`/`.tiff` go through the `tiff` encoder so compression and predictor
//! can be configured; every other extension is resolved by `image`.

use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::export::types::{ExportConfig, ExportFrame, TiffCompression};
use crate::image_pipeline::export::writer::ImageWriter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Tiff,
    Raster(ImageFormat),
}

impl OutputFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        if matches!(extension.as_deref(), Some("tif" | "tiff")) {
            return Ok(Self::Tiff);
        }

        ImageFormat::from_path(path)
            .map(Self::Raster)
            .map_err(|e| encode_error(path, e))
    }
}

fn encode_error(path: &Path, err: impl std::fmt::Display) -> CaptureError {
    CaptureError::EncodeError(format!("{}: {}", path.display(), err))
}

pub struct StandardImageWriter {
    config: ExportConfig,
}

impl StandardImageWriter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn write_tiff(&self, frame: &ExportFrame, path: &Path) -> Result<()> {
        let (width, height) = dimensions(frame, path)?;
        let rgba = frame.to_rgba();
        let mut buffer = Vec::new();

        {
            let compression = match self.config.compression {
                TiffCompression::None => tiff::encoder::Compression::Uncompressed,
                TiffCompression::Lzw => tiff::encoder::Compression::Lzw,
                TiffCompression::DeflateFast => tiff::encoder::Compression::Deflate(
                    tiff::encoder::compression::DeflateLevel::Fast,
                ),
                TiffCompression::DeflateBalanced => tiff::encoder::Compression::Deflate(
                    tiff::encoder::compression::DeflateLevel::Balanced,
                ),
                TiffCompression::DeflateBest => tiff::encoder::Compression::Deflate(
                    tiff::encoder::compression::DeflateLevel::Best,
                ),
            };

            let mut encoder = tiff::encoder::TiffEncoder::new(Cursor::new(&mut buffer))
                .map_err(|e| encode_error(path, e))?
                .with_compression(compression);

            if let Some(predictor_val) = self.config.predictor {
                let predictor = match predictor_val {
                    2 => tiff::tags::Predictor::Horizontal,
                    _ => tiff::tags::Predictor::None,
                };
                encoder = encoder.with_predictor(predictor);
            }

            encoder
                .write_image::<tiff::encoder::colortype::RGBA8>(width, height, &rgba)
                .map_err(|e| encode_error(path, e))?;
        }

        let mut file = File::create(path).map_err(|e| encode_error(path, e))?;
        file.write_all(&buffer).map_err(|e| encode_error(path, e))?;
        Ok(())
    }

    fn write_raster(&self, frame: &ExportFrame, path: &Path, format: ImageFormat) -> Result<()> {
        let (width, height) = dimensions(frame, path)?;
        let image = RgbaImage::from_raw(width, height, frame.to_rgba())
            .ok_or_else(|| encode_error(path, "pixel buffer does not match frame size"))?;

        match format {
            ImageFormat::Jpeg => {
                let rgb = DynamicImage::ImageRgba8(image).to_rgb8();
                let file = File::create(path).map_err(|e| encode_error(path, e))?;
                let mut writer = BufWriter::new(file);
                JpegEncoder::new_with_quality(&mut writer, self.config.jpeg_quality)
                    .encode_image(&rgb)
                    .map_err(|e| encode_error(path, e))?;
                writer.flush().map_err(|e| encode_error(path, e))?;
            }
            ImageFormat::Pnm => {
                DynamicImage::ImageRgba8(image)
                    .to_rgb8()
                    .save_with_format(path, format)
                    .map_err(|e| encode_error(path, e))?;
            }
            _ => {
                image
                    .save_with_format(path, format)
                    .map_err(|e| encode_error(path, e))?;
            }
        }
        Ok(())
    }
}

impl Default for StandardImageWriter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

fn dimensions(frame: &ExportFrame, path: &Path) -> Result<(u32, u32)> {
    let geometry = frame.geometry();
    let width = u32::try_from(geometry.width()).map_err(|e| encode_error(path, e))?;
    let height = u32::try_from(geometry.height()).map_err(|e| encode_error(path, e))?;
    Ok((width, height))
}

impl ImageWriter for StandardImageWriter {
    fn write_image(&self, frame: &ExportFrame, path: &Path) -> Result<()> {
        debug!(
            "Encoding {} image to {}",
            frame.geometry(),
            path.display()
        );

        match OutputFormat::from_path(path)? {
            OutputFormat::Tiff => self.write_tiff(frame, path)?,
            OutputFormat::Raster(format) => self.write_raster(frame, path, format)?,
        }

        debug!("Image encoding complete");
        Ok(())
    }
}
