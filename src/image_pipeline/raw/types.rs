//! RAW frame types

use crate::image_pipeline::debayer::BayerPattern;

/// Decoded single-channel Bayer frame, narrowed to 8 bits per sample
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Colour filter layout of the top-left 2x2 cell
    pub pattern: BayerPattern,
    /// One byte per sensor site, row-major
    pub data: Vec<u8>,
    /// Bits per sample the sensor produced before narrowing
    pub bits_per_sample: u32,
}
