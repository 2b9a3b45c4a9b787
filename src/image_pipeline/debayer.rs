//! Debayering module for converting BGGR mosaics to three-channel color

pub mod cpu_debayer;
pub mod types;

pub use cpu_debayer::{BayerPhase, CpuDebayer, demosaic, demosaic_into};
pub use types::ColorFrame;
