//! Common utilities module
//!
//! Shared error type and buffer helpers used across the capture pipeline.

pub mod error;

pub use error::{CaptureError, Result};

/// Allocate a byte buffer filled with `fill`, reporting allocation failure instead of aborting.
pub(crate) fn try_alloc(what: &'static str, bytes: usize, fill: u8) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)
        .map_err(|_| CaptureError::Allocation { what, bytes })?;
    buf.resize(bytes, fill);
    Ok(buf)
}
