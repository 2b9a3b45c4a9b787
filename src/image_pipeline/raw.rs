//! Raw frame capture module
//!
//! Frame geometry, the raw mosaic buffer, and the sources that fill it.

mod reader;
mod stream_reader;
mod v4l_reader;
pub mod types;

pub use reader::RawFrameSource;
pub use stream_reader::StreamSource;
pub use v4l_reader::{SBGGR8, V4l2Source};
pub use types::{Geometry, RawFrame, MIN_DIMENSION};
