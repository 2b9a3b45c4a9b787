//! Raw frame source over any byte stream.
//!
//! Video4Linux devices opened without streaming I/O deliver one frame per
//! `read()` call, so a device node, a FIFO or a file of concatenated raw dumps
//! can all be consumed the same way.

use std::io::{ErrorKind, Read};

use tracing::trace;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::reader::RawFrameSource;
use crate::image_pipeline::raw::types::{Geometry, RawFrame};

/// Reads one frame per `read()` call from the wrapped reader.
pub struct StreamSource<R: Read> {
    reader: R,
    geometry: Geometry,
}

impl<R: Read> StreamSource<R> {
    pub fn new(reader: R, geometry: Geometry) -> Self {
        Self { reader, geometry }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> RawFrameSource for StreamSource<R> {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn read_frame(&mut self, frame: &mut RawFrame) -> Result<usize> {
        let buf = frame.as_bytes_mut();
        loop {
            match self.reader.read(buf) {
                Ok(n) => {
                    trace!("Read {} of {} bayer bytes", n, buf.len());
                    return Ok(n);
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_one_frame_per_call() {
        let geometry = Geometry::new(2, 2).unwrap();
        let mut source = StreamSource::new(Cursor::new(vec![1, 2, 3, 4, 5, 6, 7, 8]), geometry);
        let mut frame = RawFrame::new(geometry).unwrap();

        assert_eq!(source.read_frame(&mut frame).unwrap(), 4);
        assert_eq!(frame.as_bytes(), &[1, 2, 3, 4]);

        assert_eq!(source.read_frame(&mut frame).unwrap(), 4);
        assert_eq!(frame.as_bytes(), &[5, 6, 7, 8]);
    }

    #[test]
    fn test_short_read_keeps_stale_tail() {
        let geometry = Geometry::new(2, 2).unwrap();
        let mut source = StreamSource::new(Cursor::new(vec![9, 9, 9, 9, 1, 2]), geometry);
        let mut frame = RawFrame::new(geometry).unwrap();

        source.read_frame(&mut frame).unwrap();
        let n = source.read_frame(&mut frame).unwrap();

        assert_eq!(n, 2);
        assert_eq!(frame.as_bytes(), &[1, 2, 9, 9]);
        assert!(frame.expect_full(n).is_err());
    }

    #[test]
    fn test_end_of_stream_reads_nothing() {
        let geometry = Geometry::new(2, 2).unwrap();
        let mut source = StreamSource::new(Cursor::new(Vec::new()), geometry);
        let mut frame = RawFrame::from_bytes(geometry, vec![7; 4]).unwrap();

        assert_eq!(source.read_frame(&mut frame).unwrap(), 0);
        assert_eq!(frame.as_bytes(), &[7; 4]);
    }
}
