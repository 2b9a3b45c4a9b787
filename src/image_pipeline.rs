//! Live capture pipeline module
//!
//! Raw BGGR frames come in through a [`RawFrameSource`], are demosaiced to
//! three-channel color, repacked into a four-channel export buffer and
//! written out as numbered image files.

pub mod raw;
pub mod debayer;
pub mod export;
pub mod conversions;
pub mod common;

pub use common::{
    CaptureError,
    Result,
};

pub use raw::{
    Geometry,
    RawFrame,
    RawFrameSource,
    StreamSource,
    V4l2Source,
};

pub use debayer::{
    BayerPhase,
    ColorFrame,
    CpuDebayer,
    demosaic,
};

pub use export::{
    ExportConfig,
    ExportConfigBuilder,
    ExportFrame,
    FrameImageManager,
    ImageWriter,
    PathTemplate,
    StandardImageWriter,
    TiffCompression,
};

pub use conversions::{
    CaptureConfig,
    CaptureConfigBuilder,
    CapturePipeline,
    CaptureStats,
    FrameReport,
};
