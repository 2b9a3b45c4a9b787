//! Frame export module
//!
//! Repacking demosaiced frames into the four-channel export buffer, output
//! path numbering, and image file encoding.

mod frame_image;
mod path_template;
mod standard_image_writer;
mod writer;
pub mod types;

pub use frame_image::FrameImageManager;
pub use path_template::PathTemplate;
pub use standard_image_writer::StandardImageWriter;
pub use types::{ExportConfig, ExportConfigBuilder, ExportFrame, OPAQUE, TiffCompression};
pub use writer::ImageWriter;
