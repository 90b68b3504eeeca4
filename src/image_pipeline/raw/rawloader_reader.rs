//! RAW frame reader built on the rawloader library.
//!
//! Handles any Bayer-sensor format rawloader can decode (ARW, CR2, NEF, DNG,
//! ...). Samples are narrowed to 8 bits so the result can feed the RAW8
//! capture path directly.

use std::io::Cursor;

use tracing::debug;
use rawloader::RawImageData as RawloaderImageData;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::debayer::BayerPattern;
use crate::image_pipeline::raw::reader::RawFrameReader;
use crate::image_pipeline::raw::types::RawFrame;

pub struct RawLoaderReader;

/// Bit depth assumed when the file carries no usable white level.
const DEFAULT_BITS_PER_SAMPLE: u32 = 16;

const U16_BITS: u32 = 16;

const OUTPUT_BITS: u32 = 8;

impl RawFrameReader for RawLoaderReader {
    /// Decodes a camera RAW file into an 8-bit Bayer frame.
    ///
    /// The sensor bit depth is taken from the white level; the low
    /// `bits_per_sample - 8` bits of every sample are then dropped. Sensors
    /// without a 2x2 Bayer layout (X-Trans, linear DNG) are rejected.
    ///
    /// ```no_run
    /// use camera_preproc_rs::image_pipeline::raw::{RawFrameReader, RawLoaderReader};
    ///
    /// let bytes = std::fs::read("frame.dng").unwrap();
    /// let frame = RawLoaderReader.read_raw(&bytes).unwrap();
    /// println!("{}x{} {}", frame.width, frame.height, frame.pattern);
    /// ```
    fn read_raw(&self, data: &[u8]) -> Result<RawFrame> {
        debug!("Decoding RAW image, {} bytes", data.len());

        let decoded = rawloader::decode(&mut Cursor::new(data))
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        if decoded.cpp != 1 {
            return Err(PipelineError::UnsupportedFormat(format!(
                "{} components per pixel, expected a single-channel mosaic",
                decoded.cpp
            )));
        }

        let pattern = bayer_pattern(&decoded.cfa.name)?;
        let width = decoded.width;
        let height = decoded.height;

        let max_white_level = decoded.whitelevels.iter().max().copied().unwrap_or(u16::MAX);
        let bits_per_sample = if max_white_level == 0 {
            DEFAULT_BITS_PER_SAMPLE
        } else {
            U16_BITS - max_white_level.leading_zeros()
        };
        let shift = bits_per_sample.saturating_sub(OUTPUT_BITS);

        debug!(
            "Decoded {}x{} {} frame, {} bits per sample",
            width, height, pattern, bits_per_sample
        );

        let data: Vec<u8> = match decoded.data {
            RawloaderImageData::Integer(values) => values
                .iter()
                .map(|&v| (v >> shift).min(u8::MAX as u16) as u8)
                .collect(),
            // float data is normalised to 0.0..=1.0
            RawloaderImageData::Float(values) => values
                .iter()
                .map(|&v| (v * u8::MAX as f32).clamp(0.0, u8::MAX as f32) as u8)
                .collect(),
        };

        Ok(RawFrame {
            width,
            height,
            pattern,
            data,
            bits_per_sample,
        })
    }
}

/// Maps a rawloader CFA name such as `"RGGB"` onto a Bayer pattern. Both
/// rows of the 2x2 cell must match the pattern.
fn bayer_pattern(name: &str) -> Result<BayerPattern> {
    let mut colors = name.chars();
    let layout = match (colors.next(), colors.next()) {
        (Some(first), Some(second)) if name.len() == 4 => BayerPattern::from_first_row(first, second)
            .filter(|pattern| pattern.to_string() == name),
        _ => None,
    };
    layout.ok_or_else(|| PipelineError::UnsupportedFormat(format!("CFA layout {name:?} is not 2x2 Bayer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bayer_pattern_from_cfa_name() {
        assert_eq!(bayer_pattern("RGGB").unwrap(), BayerPattern::RGGB);
        assert_eq!(bayer_pattern("BGGR").unwrap(), BayerPattern::BGGR);
        assert_eq!(bayer_pattern("GRBG").unwrap(), BayerPattern::GRBG);
        assert_eq!(bayer_pattern("GBRG").unwrap(), BayerPattern::GBRG);
    }

    #[test]
    fn test_non_bayer_layouts_rejected() {
        assert!(matches!(bayer_pattern(""), Err(PipelineError::UnsupportedFormat(_))));
        // valid first row, second row is not a Bayer completion
        assert!(matches!(bayer_pattern("RGBG"), Err(PipelineError::UnsupportedFormat(_))));
        assert!(matches!(bayer_pattern("GBGR"), Err(PipelineError::UnsupportedFormat(_))));
        assert!(matches!(
            bayer_pattern("GGRGGBGGBGGRBRGRBGGGBGGRGGRGGBRBGBRG"),
            Err(PipelineError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_garbage_input_is_decode_error() {
        let result = RawLoaderReader.read_raw(b"definitely not a raw file");
        assert!(matches!(result, Err(PipelineError::DecodeError(_))));
    }
}
