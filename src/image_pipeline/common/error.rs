use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Couldn't allocate {what} buffer ({bytes} bytes)")]
    Allocation { what: &'static str, bytes: usize },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Frame geometry mismatch: expected {expected}, got {actual}")]
    GeometryMismatch { expected: String, actual: String },

    #[error("Invalid output path template: {0}")]
    InvalidPathTemplate(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Fragmented picture: expected {expected} bytes, read {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Video device error: {0}")]
    Device(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
