//! Positional command line for the capture binary.
//!
//! `<video_dev> <image_path> [delay] [width] [height] [scalefact]`

use std::ffi::OsString;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::image_pipeline::{CaptureConfig, CaptureError, Result};

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Capture(CaptureConfig),
    Help,
}

/// Parse process arguments, the first of which is the program name.
pub fn parse_args<I, S>(args: I) -> Result<CliAction>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().skip(1).map(Into::into).collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(CliAction::Help);
    }
    if args.len() < 2 {
        return Err(CaptureError::InvalidArgument(
            "a video device and an image path are required".to_owned(),
        ));
    }
    if args.len() > 6 {
        return Err(CaptureError::InvalidArgument(format!(
            "unexpected argument '{}'",
            args[6]
        )));
    }

    let mut builder = CaptureConfig::builder()
        .device(PathBuf::from(&args[0]))
        .output_template(args[1].as_str());

    if let Some(delay) = args.get(2) {
        builder = builder.delay(Duration::from_millis(number("delay", delay)?));
    }
    if let Some(width) = args.get(3) {
        builder = builder.width(number("width", width)?);
    }
    if let Some(height) = args.get(4) {
        builder = builder.height(number("height", height)?);
    }
    if let Some(factor) = args.get(5) {
        let factor: usize = number("scalefact", factor)?;
        if factor == 0 {
            return Err(CaptureError::InvalidArgument(
                "scalefact must be at least 1".to_owned(),
            ));
        }
        builder = builder.scale_factor(factor);
    }

    Ok(CliAction::Capture(builder.build()))
}

/// Like [`parse_args`], for `std::env::args_os()`.
///
/// Arguments that are not valid UTF-8 are an `InvalidArgument` error.
pub fn parse_os_args<I>(args: I) -> Result<CliAction>
where
    I: IntoIterator<Item = OsString>,
{
    let args = args
        .into_iter()
        .map(|arg| {
            arg.into_string().map_err(|arg| {
                CaptureError::InvalidArgument(format!(
                    "argument '{}' is not valid UTF-8",
                    arg.to_string_lossy()
                ))
            })
        })
        .collect::<Result<Vec<String>>>()?;
    parse_args(args)
}

fn number<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CaptureError::InvalidArgument(format!("{name} must be a non-negative integer, got '{value}'"))
    })
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} <video_dev> <image_path> [delay] [width] [height] [scalefact]

Parameters:
  video_dev:  Path to video4linux device (e.g. \"/dev/video0\", required).
 image_path:  Path of output image (e.g. \"cam.jpg\", required). May contain
              one printf-style frame number, e.g. \"cam-%03d.jpg\".
      delay:  Delay between captures, in milliseconds (defaults to 20).
      width:  Width of image, in pixels (defaults to 320).
     height:  Height of image, in pixels (defaults to 240).
  scalefact:  Downscale factor (defaults to 1). Sensor cropping is not
              supported; values above 1 are reported and ignored.

The output format follows the image_path extension (png, jpg, bmp, ppm, tif).
Set RUST_LOG=debug for per-frame timings.

Examples:
  # save to \"cam.jpg\" from V4L device \"/dev/video0\".
  {program} /dev/video0 cam.jpg

  # save to \"cam-XXX.jpg\" from \"/dev/video0\" with a 1 second delay.
  {program} /dev/video0 cam-%03d.jpg 1000
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(args: &[&str]) -> CaptureConfig {
        match parse_args(args.iter().copied()).unwrap() {
            CliAction::Capture(config) => config,
            CliAction::Help => panic!("expected a capture config"),
        }
    }

    #[test]
    fn test_required_arguments_only() {
        let config = capture(&["bayercam", "/dev/video1", "cam.jpg"]);
        assert_eq!(config.device, PathBuf::from("/dev/video1"));
        assert_eq!(config.output_template, "cam.jpg");
        assert_eq!(config.delay, Duration::from_millis(20));
        assert_eq!((config.width, config.height, config.scale_factor), (320, 240, 1));
    }

    #[test]
    fn test_all_arguments() {
        let config = capture(&[
            "bayercam",
            "/dev/video0",
            "cam-%03d.png",
            "1000",
            "640",
            "480",
            "2",
        ]);
        assert_eq!(config.delay, Duration::from_secs(1));
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.crop_window(), (1280, 960));
        assert_eq!(config.sensor_crop(), Some((1280, 960)));
    }

    #[test]
    fn test_os_args() {
        let args = ["bayercam", "/dev/video0", "cam.png"].map(OsString::from);
        match parse_os_args(args).unwrap() {
            CliAction::Capture(config) => assert_eq!(config.output_template, "cam.png"),
            CliAction::Help => panic!("expected a capture config"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_argument_is_rejected() {
        use std::os::unix::ffi::OsStringExt;

        let args = vec![
            OsString::from("bayercam"),
            OsString::from_vec(b"/dev/video\xff".to_vec()),
            OsString::from("cam.png"),
        ];
        assert!(matches!(
            parse_os_args(args),
            Err(CaptureError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_arguments() {
        assert!(matches!(
            parse_args(["bayercam", "/dev/video0"]),
            Err(CaptureError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bad_numbers() {
        for args in [
            ["bayercam", "/dev/video0", "cam.jpg", "soon"],
            ["bayercam", "/dev/video0", "cam.jpg", "-5"],
        ] {
            assert!(matches!(
                parse_args(args),
                Err(CaptureError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            parse_args(["bayercam", "/dev/video0", "cam.jpg", "20", "320", "240", "0"]),
            Err(CaptureError::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_args(["bayercam", "d", "o", "1", "2", "3", "4", "5"]),
            Err(CaptureError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(["bayercam", "--help"]).unwrap(), CliAction::Help);
        assert!(usage("bayercam").starts_with("Usage: bayercam <video_dev>"));
    }
}
