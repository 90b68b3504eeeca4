//! Pipeline configuration
//!
//! Frame geometry and camera format are fixed for the lifetime of a
//! pipeline. They are checked once by [`PipelineConfig::validate`] so the
//! per-frame kernels never have to.

use tracing::warn;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::debayer::BayerPattern;
use crate::image_pipeline::pixel::PixelFormat;

/// Largest side the resamplers can address: `(dim - 1) << 16` must fit an
/// i32.
pub const MAX_DIMENSION: usize = 1 << 15;

/// Layout of the frames delivered by the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameType {
    /// Single-channel 8-bit Bayer mosaic
    Raw8(BayerPattern),
    Rgb565,
    Rgb888,
}

impl FrameType {
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            FrameType::Raw8(_) => 1,
            FrameType::Rgb565 => PixelFormat::Rgb565.bytes_per_pixel(),
            FrameType::Rgb888 => PixelFormat::Rgb888.bytes_per_pixel(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub camera_width: usize,
    pub camera_height: usize,
    pub frame_type: FrameType,
    /// Intermediate RGB888 image, normally square
    pub rgb_width: usize,
    pub rgb_height: usize,
    /// Model input, RGB888
    pub model_width: usize,
    pub model_height: usize,
    pub display_width: usize,
    pub display_height: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            camera_width: 1280,
            camera_height: 720,
            frame_type: FrameType::Raw8(BayerPattern::GBRG),
            rgb_width: 384,
            rgb_height: 384,
            model_width: 192,
            model_height: 192,
            display_width: 480,
            display_height: 800,
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Bytes in one camera frame.
    pub fn camera_frame_size(&self) -> usize {
        self.camera_width * self.camera_height * self.frame_type.bytes_per_pixel()
    }

    pub fn rgb_image_size(&self) -> usize {
        PixelFormat::Rgb888.frame_size(self.rgb_width, self.rgb_height)
    }

    pub fn model_image_size(&self) -> usize {
        PixelFormat::Rgb888.frame_size(self.model_width, self.model_height)
    }

    pub fn display_frame_size(&self) -> usize {
        PixelFormat::Rgb888.frame_size(self.display_width, self.display_height)
    }

    pub fn validate(&self) -> Result<()> {
        for (width, height) in [
            (self.camera_width, self.camera_height),
            (self.rgb_width, self.rgb_height),
            (self.model_width, self.model_height),
            (self.display_width, self.display_height),
        ] {
            if width == 0 || height == 0 {
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        // resampled outputs divide by (dim - 1)
        for (width, height) in [
            (self.rgb_width, self.rgb_height),
            (self.model_width, self.model_height),
        ] {
            if width < 2 || height < 2 {
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        for (width, height) in [
            (self.camera_width, self.camera_height),
            (self.rgb_width, self.rgb_height),
            (self.model_width, self.model_height),
        ] {
            if width > MAX_DIMENSION || height > MAX_DIMENSION {
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        if matches!(self.frame_type, FrameType::Raw8(_))
            && (self.camera_width < 3 || self.camera_height < 3)
        {
            return Err(PipelineError::InvalidConfig(format!(
                "RAW8 frames need at least 3x3 pixels, got {}x{}",
                self.camera_width, self.camera_height
            )));
        }

        if self.rgb_width > self.camera_width || self.rgb_height > self.camera_height {
            return Err(PipelineError::InvalidConfig(format!(
                "RGB image {}x{} is larger than camera frame {}x{}",
                self.rgb_width, self.rgb_height, self.camera_width, self.camera_height
            )));
        }

        if self.model_width > self.display_width || self.model_height > self.display_height {
            return Err(PipelineError::InvalidConfig(format!(
                "model image {}x{} does not fit display {}x{}",
                self.model_width, self.model_height, self.display_width, self.display_height
            )));
        }

        if self.rgb_width != self.rgb_height {
            warn!(
                "RGB image {}x{} is not square, model input will be stretched",
                self.rgb_width, self.rgb_height
            );
        }

        Ok(())
    }
}

#[derive(Default)]
pub struct PipelineConfigBuilder {
    camera_size: Option<(usize, usize)>,
    frame_type: Option<FrameType>,
    rgb_size: Option<(usize, usize)>,
    model_size: Option<(usize, usize)>,
    display_size: Option<(usize, usize)>,
}

impl PipelineConfigBuilder {
    pub fn camera_size(mut self, width: usize, height: usize) -> Self {
        self.camera_size = Some((width, height));
        self
    }

    pub fn frame_type(mut self, frame_type: FrameType) -> Self {
        self.frame_type = Some(frame_type);
        self
    }

    pub fn rgb_size(mut self, width: usize, height: usize) -> Self {
        self.rgb_size = Some((width, height));
        self
    }

    pub fn model_size(mut self, width: usize, height: usize) -> Self {
        self.model_size = Some((width, height));
        self
    }

    pub fn display_size(mut self, width: usize, height: usize) -> Self {
        self.display_size = Some((width, height));
        self
    }

    pub fn build(self) -> PipelineConfig {
        let default = PipelineConfig::default();
        let (camera_width, camera_height) = self
            .camera_size
            .unwrap_or((default.camera_width, default.camera_height));
        let (rgb_width, rgb_height) = self.rgb_size.unwrap_or((default.rgb_width, default.rgb_height));
        let (model_width, model_height) = self
            .model_size
            .unwrap_or((default.model_width, default.model_height));
        let (display_width, display_height) = self
            .display_size
            .unwrap_or((default.display_width, default.display_height));

        PipelineConfig {
            camera_width,
            camera_height,
            frame_type: self.frame_type.unwrap_or(default.frame_type),
            rgb_width,
            rgb_height,
            model_width,
            model_height,
            display_width,
            display_height,
        }
    }
}
