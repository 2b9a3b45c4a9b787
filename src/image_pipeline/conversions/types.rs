//! Capture session configuration types

use std::path::PathBuf;
use std::time::Duration;

use crate::image_pipeline::export::types::ExportConfig;

/// Default pause between frames.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(20);
pub const DEFAULT_WIDTH: usize = 320;
pub const DEFAULT_HEIGHT: usize = 240;

/// Parameters of a capture session
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Video4Linux device node
    pub device: PathBuf,
    /// Output path, optionally with one `%d`-style frame number
    pub output_template: String,
    /// Pause after each exported frame
    pub delay: Duration,
    /// Frame width in pixels
    pub width: usize,
    /// Frame height in pixels
    pub height: usize,
    /// Downscale factor: the sensor window is `factor` times the frame size
    pub scale_factor: usize,
    /// Encoder settings
    pub export: ExportConfig,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from("/dev/video0"),
            output_template: "cam.jpg".to_owned(),
            delay: DEFAULT_DELAY,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            scale_factor: 1,
            export: ExportConfig::default(),
        }
    }
}

impl CaptureConfig {
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }

    /// Sensor area that gets scaled down to one frame.
    pub fn crop_window(&self) -> (usize, usize) {
        (
            self.width.saturating_mul(self.scale_factor),
            self.height.saturating_mul(self.scale_factor),
        )
    }

    /// Crop window that would need a driver-side crop, if any.
    ///
    /// `None` when the factor is 1 and the frame is the whole window.
    pub fn sensor_crop(&self) -> Option<(usize, usize)> {
        (self.scale_factor > 1).then(|| self.crop_window())
    }
}

/// Builder for CaptureConfig
#[derive(Default)]
pub struct CaptureConfigBuilder {
    device: Option<PathBuf>,
    output_template: Option<String>,
    delay: Option<Duration>,
    width: Option<usize>,
    height: Option<usize>,
    scale_factor: Option<usize>,
    export: Option<ExportConfig>,
}

impl CaptureConfigBuilder {
    pub fn device(mut self, device: impl Into<PathBuf>) -> Self {
        self.device = Some(device.into());
        self
    }

    pub fn output_template(mut self, template: impl Into<String>) -> Self {
        self.output_template = Some(template.into());
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: usize) -> Self {
        self.height = Some(height);
        self
    }

    pub fn scale_factor(mut self, factor: usize) -> Self {
        self.scale_factor = Some(factor);
        self
    }

    pub fn export(mut self, export: ExportConfig) -> Self {
        self.export = Some(export);
        self
    }

    pub fn build(self) -> CaptureConfig {
        let default = CaptureConfig::default();
        CaptureConfig {
            device: self.device.unwrap_or(default.device),
            output_template: self.output_template.unwrap_or(default.output_template),
            delay: self.delay.unwrap_or(default.delay),
            width: self.width.unwrap_or(default.width),
            height: self.height.unwrap_or(default.height),
            scale_factor: self.scale_factor.unwrap_or(default.scale_factor),
            export: self.export.unwrap_or(default.export),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::export::types::TiffCompression;

    #[test]
    fn test_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.device, PathBuf::from("/dev/video0"));
        assert_eq!(config.delay, Duration::from_millis(20));
        assert_eq!((config.width, config.height), (320, 240));
        assert_eq!(config.scale_factor, 1);
        assert_eq!(config.crop_window(), (320, 240));
        assert_eq!(config.sensor_crop(), None);
    }

    #[test]
    fn test_config_builder() {
        let config = CaptureConfig::builder()
            .device("/dev/video2")
            .output_template("cam-%03d.tiff")
            .delay(Duration::from_secs(1))
            .width(640)
            .height(480)
            .scale_factor(2)
            .export(
                ExportConfig::builder()
                    .compression(TiffCompression::Lzw)
                    .build(),
            )
            .build();

        assert_eq!(config.device, PathBuf::from("/dev/video2"));
        assert_eq!(config.output_template, "cam-%03d.tiff");
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!(config.crop_window(), (1280, 960));
        assert_eq!(config.sensor_crop(), Some((1280, 960)));
        assert_eq!(config.export.compression, TiffCompression::Lzw);
    }
}
