use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::{Geometry, RawFrame};

/// A producer of raw Bayer mosaics.
pub trait RawFrameSource {
    /// Frame geometry negotiated for the session.
    fn geometry(&self) -> Geometry;

    /// Fill `frame` with the next exposure and return the number of bytes delivered.
    ///
    /// Fewer bytes than `geometry().raw_len()` is a short read; the untouched
    /// tail keeps whatever the frame held before.
    fn read_frame(&mut self, frame: &mut RawFrame) -> Result<usize>;
}
