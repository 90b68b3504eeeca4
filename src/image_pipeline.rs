//! Camera preprocessing pipeline module
//!
//! Pixel kernels (demosaic, resize, crop, compositing) over borrowed frame
//! buffers, plus the pieces around them: configuration, RAW decoding, TIFF
//! output, frame sources and sinks, and the capture orchestration.

pub mod common;
pub mod compose;
pub mod config;
pub mod conversions;
pub mod crop;
pub mod debayer;
pub mod pixel;
pub mod raw;
pub mod resize;
pub mod stream;
pub mod tiff;

pub use common::{ImageView, ImageViewMut, PipelineError, Rect, Result};

pub use pixel::{PixelFormat, Rgb, convert_rgb565_to_rgb888};

pub use debayer::{BayerPattern, crop_and_debayer, debayer};

pub use resize::resize;

pub use crop::{crop_rgb565_to_rgb888, crop_rgb888_to_rgb888};

pub use compose::{blit, draw_box};

pub use config::{FrameType, PipelineConfig, PipelineConfigBuilder};

pub use raw::{RawFrame, RawFrameReader, RawLoaderReader};

pub use self::tiff::{StandardTiffWriter, TiffCompression, TiffOptions, TiffWriter};

pub use stream::{FileFrameSource, FrameSink, FrameSource, TiffFrameSink};

pub use conversions::{CapturePipeline, FramePlan, StageTimings};
