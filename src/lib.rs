//! bayercam: capture raw BGGR frames from a Video4Linux device, demosaic them
//! and save the result as image files.

pub mod cli;
pub mod image_pipeline;
pub mod logger;
