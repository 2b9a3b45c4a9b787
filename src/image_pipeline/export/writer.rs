use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::export::types::ExportFrame;

/// Encodes an export frame to a file.
///
/// Failures are reported as `CaptureError::EncodeError`.
pub trait ImageWriter {
    fn write_image(&self, frame: &ExportFrame, path: &Path) -> Result<()>;
}
