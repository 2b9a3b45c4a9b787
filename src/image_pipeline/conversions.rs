//! Capture pipeline module
//!
//! Orchestrates the per-frame read, demosaic and export steps.

mod capture_loop;
mod timing;
pub mod types;


pub use capture_loop::{CapturePipeline, CaptureStats, FrameReport};
pub use timing::{PipelineTimings, StepTiming, Timer};
pub use types::{CaptureConfig, CaptureConfigBuilder, DEFAULT_DELAY, DEFAULT_HEIGHT, DEFAULT_WIDTH};
