//! Frame image manager: repacks demosaiced frames and hands them to a writer.

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::{CaptureError, Result};
use crate::image_pipeline::debayer::types::ColorFrame;
use crate::image_pipeline::export::path_template::PathTemplate;
use crate::image_pipeline::export::types::ExportFrame;
use crate::image_pipeline::export::writer::ImageWriter;
use crate::image_pipeline::raw::types::Geometry;

/// Owns the export buffer and frame counter for one capture session.
pub struct FrameImageManager<W: ImageWriter> {
    geometry: Geometry,
    export_frame: ExportFrame,
    frame_counter: u64,
    template: PathTemplate,
    writer: W,
}

impl<W: ImageWriter> FrameImageManager<W> {
    /// Allocate the opaque export buffer and parse the output path template.
    pub fn initialize(geometry: Geometry, path_template: &str, writer: W) -> Result<Self> {
        let template = PathTemplate::parse(path_template)?;
        let export_frame = ExportFrame::new(geometry)?;

        debug!(
            geometry = %geometry,
            template = %template,
            numbered = template.is_numbered(),
            "Frame image manager initialized"
        );

        Ok(Self {
            geometry,
            export_frame,
            frame_counter: 0,
            template,
            writer,
        })
    }

    /// Repack `color`, write it to the next output path and advance the counter.
    ///
    /// Returns the path written. On a writer failure the counter is left as is.
    #[instrument(skip_all, fields(frame = self.frame_counter))]
    pub fn export(&mut self, color: &ColorFrame) -> Result<PathBuf> {
        if color.geometry() != self.geometry {
            return Err(CaptureError::GeometryMismatch {
                expected: self.geometry.to_string(),
                actual: color.geometry().to_string(),
            });
        }

        {
            let _span = tracing::debug_span!("repack").entered();
            self.export_frame.repack_from(color);
        }

        let path = self.template.render(self.frame_counter);

        {
            let _span = tracing::debug_span!("encode_image", path = %path.display()).entered();
            self.writer.write_image(&self.export_frame, &path)?;
        }

        self.frame_counter += 1;
        Ok(path)
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Number of frames exported so far.
    pub fn frame_counter(&self) -> u64 {
        self.frame_counter
    }

    pub fn export_frame(&self) -> &ExportFrame {
        &self.export_frame
    }

    pub fn path_template(&self) -> &PathTemplate {
        &self.template
    }

    /// Path the next successful export will be written to.
    pub fn next_output_path(&self) -> PathBuf {
        self.template.render(self.frame_counter)
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}
