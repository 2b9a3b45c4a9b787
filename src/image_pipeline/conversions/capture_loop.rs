use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use crate::image_pipeline::{
    common::error::Result,
    conversions::timing::PipelineTimings,
    conversions::types::CaptureConfig,
    debayer::{ColorFrame, CpuDebayer},
    export::{FrameImageManager, ImageWriter, StandardImageWriter},
    raw::{Geometry, RawFrame, RawFrameSource, V4l2Source},
};

/// Outcome of one successfully exported frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Frame number used for the output path.
    pub sequence: u64,
    /// Bytes the source delivered; less than the frame size on a short read.
    pub bytes_read: usize,
    pub path: PathBuf,
    pub timings: PipelineTimings,
}

impl FrameReport {
    pub fn is_fragmented(&self, geometry: Geometry) -> bool {
        self.bytes_read != geometry.raw_len()
    }
}

/// Counters kept across the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    pub frames_captured: u64,
    pub frames_exported: u64,
    pub export_failures: u64,
    pub short_reads: u64,
}

/// Read, demosaic and export loop over a raw frame source.
pub struct CapturePipeline<S: RawFrameSource, W: ImageWriter> {
    source: S,
    debayer: CpuDebayer,
    frames: FrameImageManager<W>,
    raw: RawFrame,
    color: ColorFrame,
    delay: Duration,
    stats: CaptureStats,
}

impl CapturePipeline<V4l2Source, StandardImageWriter> {
    /// Open the configured video device and set up the session buffers.
    pub fn open(config: &CaptureConfig) -> Result<Self> {
        info!(
            device = %config.device.display(),
            output = %config.output_template,
            delay_ms = config.delay.as_millis() as u64,
            "Requesting {}x{} frames",
            config.width,
            config.height
        );
        if let Some((crop_width, crop_height)) = config.sensor_crop() {
            warn!(
                "Scale factor {} ignored: the {}x{} sensor crop is not requested, frames are captured at {}x{}",
                config.scale_factor,
                crop_width,
                crop_height,
                config.width,
                config.height
            );
        }

        let source = V4l2Source::open(&config.device, config.width, config.height)?;
        let writer = StandardImageWriter::new(config.export.clone());
        Self::with_custom(source, writer, &config.output_template, config.delay)
    }
}

impl<S: RawFrameSource, W: ImageWriter> CapturePipeline<S, W> {
    pub fn with_custom(source: S, writer: W, output_template: &str, delay: Duration) -> Result<Self> {
        let geometry = source.geometry();
        let raw = RawFrame::new(geometry)?;
        let color = ColorFrame::new(geometry)?;
        let frames = FrameImageManager::initialize(geometry, output_template, writer)?;

        Ok(Self {
            source,
            debayer: CpuDebayer::new(),
            frames,
            raw,
            color,
            delay,
            stats: CaptureStats::default(),
        })
    }

    /// Capture, convert and export a single frame.
    ///
    /// Short or failed reads are logged and the frame is converted from
    /// whatever the raw buffer holds. Export failures are returned.
    #[instrument(skip(self), fields(frame = self.frames.frame_counter()))]
    pub fn capture_frame(&mut self) -> Result<FrameReport> {
        let mut timings = PipelineTimings::new();
        let expected = self.raw.as_bytes().len();

        let bytes_read = {
            let _span = tracing::info_span!("read_frame").entered();
            let source = &mut self.source;
            let raw = &mut self.raw;
            match timings.time("read_frame", || source.read_frame(raw)) {
                Ok(n) => n,
                Err(e) => {
                    warn!("Frame read failed: {}", e);
                    0
                }
            }
        };
        self.stats.frames_captured += 1;

        if bytes_read != expected {
            self.stats.short_reads += 1;
            warn!(
                "Fragmented picture: read {} of {} bytes",
                bytes_read, expected
            );
        }

        {
            let _span = tracing::info_span!("demosaic").entered();
            let (debayer, raw, color) = (&self.debayer, &self.raw, &mut self.color);
            timings.time("demosaic", || debayer.process_into(raw, color))?;
        }

        let sequence = self.frames.frame_counter();
        let path = {
            let _span = tracing::info_span!("export").entered();
            let (frames, color) = (&mut self.frames, &self.color);
            match timings.time("export", || frames.export(color)) {
                Ok(path) => path,
                Err(e) => {
                    self.stats.export_failures += 1;
                    return Err(e);
                }
            }
        };
        self.stats.frames_exported += 1;

        timings.log_summary(sequence);

        Ok(FrameReport {
            sequence,
            bytes_read,
            path,
            timings,
        })
    }

    fn step(&mut self) {
        match self.capture_frame() {
            Ok(report) => info!(
                frame = report.sequence,
                "Saved {}",
                report.path.display()
            ),
            Err(e) => error!("Frame export failed: {}", e),
        }
    }

    /// Capture `count` frames, sleeping the configured delay after each one.
    pub fn run_frames(&mut self, count: u64) -> CaptureStats {
        for _ in 0..count {
            self.step();
            thread::sleep(self.delay);
        }
        self.stats
    }

    /// Capture until the process is terminated.
    pub fn run(&mut self) -> ! {
        info!(
            geometry = %self.geometry(),
            template = %self.frames.path_template(),
            "Starting capture loop"
        );
        loop {
            self.step();
            thread::sleep(self.delay);
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.frames.geometry()
    }

    pub fn stats(&self) -> CaptureStats {
        self.stats
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn frames(&self) -> &FrameImageManager<W> {
        &self.frames
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Most recent demosaiced frame.
    pub fn color_frame(&self) -> &ColorFrame {
        &self.color
    }
}
