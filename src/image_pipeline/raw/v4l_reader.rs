//! Video4Linux capture source for SBGGR8 sensors.
//!
//! The device is configured through the `v4l` crate and frames are then pulled
//! with plain `read()` calls on the device node, one frame per call.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use v4l::Device;
use v4l::video::Capture;

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::raw::reader::RawFrameSource;
use crate::image_pipeline::raw::stream_reader::StreamSource;
use crate::image_pipeline::raw::types::{Geometry, RawFrame};

/// 8-bit Bayer, blue-green / green-red rows.
pub const SBGGR8: &[u8; 4] = b"BA81";

/// Capture source backed by a V4L2 device node.
pub struct V4l2Source {
    path: PathBuf,
    card: String,
    // Held open so the negotiated format stays in effect for the session.
    _device: Device,
    stream: StreamSource<File>,
}

impl V4l2Source {
    /// Open `path`, request `width x height` SBGGR8 frames and prepare for reading.
    ///
    /// The driver may adjust the size; the adjusted size becomes the session geometry.
    pub fn open<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Self> {
        let path = path.as_ref();
        let device_error =
            |e: std::io::Error| CaptureError::Device(format!("{}: {}", path.display(), e));

        let device = Device::with_path(path).map_err(device_error)?;
        let caps = device.query_caps().map_err(device_error)?;
        info!(
            device = %path.display(),
            card = %caps.card,
            driver = %caps.driver,
            "Opened video device"
        );

        let requested_width = u32::try_from(width)
            .map_err(|_| CaptureError::InvalidDimensions(width, height))?;
        let requested_height = u32::try_from(height)
            .map_err(|_| CaptureError::InvalidDimensions(width, height))?;

        let mut fmt = device.format().map_err(device_error)?;
        fmt.width = requested_width;
        fmt.height = requested_height;
        fmt.fourcc = v4l::FourCC::new(SBGGR8);

        let fmt = device.set_format(&fmt).map_err(device_error)?;
        if fmt.fourcc != v4l::FourCC::new(SBGGR8) {
            return Err(CaptureError::Device(format!(
                "{}: driver refused SBGGR8, offered {}",
                path.display(),
                fmt.fourcc
            )));
        }
        if fmt.width != requested_width || fmt.height != requested_height {
            warn!(
                "Driver adjusted frame size from {}x{} to {}x{}",
                requested_width, requested_height, fmt.width, fmt.height
            );
        }
        debug!("Negotiated format: {}", fmt);

        let geometry = Geometry::new(fmt.width as usize, fmt.height as usize)?;
        let file = File::open(path).map_err(device_error)?;

        Ok(Self {
            path: path.to_path_buf(),
            card: caps.card,
            _device: device,
            stream: StreamSource::new(file, geometry),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn card(&self) -> &str {
        &self.card
    }
}

impl RawFrameSource for V4l2Source {
    fn geometry(&self) -> Geometry {
        self.stream.geometry()
    }

    fn read_frame(&mut self, frame: &mut RawFrame) -> Result<usize> {
        self.stream.read_frame(frame)
    }
}
