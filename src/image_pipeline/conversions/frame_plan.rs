use std::fmt;

use crate::image_pipeline::common::{ImageView, ImageViewMut, Rect};
use crate::image_pipeline::config::{FrameType, PipelineConfig};
use crate::image_pipeline::crop::{crop_rgb565_to_rgb888, crop_rgb888_to_rgb888};
use crate::image_pipeline::debayer::{BayerPattern, crop_and_debayer};
use crate::image_pipeline::pixel::{PixelFormat, convert_rgb565_to_rgb888};
use crate::image_pipeline::resize::resize;

/// The single kernel that turns a camera frame into the RGB image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Fused crop, scale and demosaic of a RAW8 frame
    CropDebayer {
        crop_x: usize,
        crop_y: usize,
        pattern: BayerPattern,
    },
    /// Same-size RGB565 -> RGB888 conversion
    ConvertRgb565,
    /// Same-size RGB888 copy
    CopyRgb888,
    /// Bilinear resize of a square frame into the RGB image
    Resize { format: PixelFormat },
    /// Centre crop of a non-square RGB565 frame
    CropRgb565 { crop: Rect },
    /// Centre crop of a non-square RGB888 frame
    CropRgb888 { crop: Rect },
}

/// Frame conversion chosen once from a validated [`PipelineConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramePlan {
    pub step: FrameStep,
    camera_width: usize,
    camera_height: usize,
    rgb_width: usize,
    rgb_height: usize,
}

impl FramePlan {
    /// Picks the conversion for `config`.
    ///
    /// RAW8 frames are always centre-cropped and demosaiced in one pass. RGB
    /// frames are converted or copied when the square camera frame already
    /// has the RGB image size, resized when it is square but larger, and
    /// centre-cropped at unit scale when it is not square.
    ///
    /// `config` must have passed [`PipelineConfig::validate`].
    pub fn from_config(config: &PipelineConfig) -> Self {
        let square = config.camera_width == config.camera_height;
        let same_size = config.camera_width == config.rgb_width && config.camera_height == config.rgb_height;
        let crop = Rect::new(
            (config.camera_width - config.rgb_width) / 2,
            (config.camera_height - config.rgb_height) / 2,
            config.rgb_width,
            config.rgb_height,
        );

        let step = match config.frame_type {
            FrameType::Raw8(pattern) => FrameStep::CropDebayer {
                crop_x: crop.x,
                crop_y: crop.y,
                pattern,
            },
            FrameType::Rgb565 if square && same_size => FrameStep::ConvertRgb565,
            FrameType::Rgb888 if square && same_size => FrameStep::CopyRgb888,
            FrameType::Rgb565 if square => FrameStep::Resize {
                format: PixelFormat::Rgb565,
            },
            FrameType::Rgb888 if square => FrameStep::Resize {
                format: PixelFormat::Rgb888,
            },
            FrameType::Rgb565 => FrameStep::CropRgb565 { crop },
            FrameType::Rgb888 => FrameStep::CropRgb888 { crop },
        };

        Self {
            step,
            camera_width: config.camera_width,
            camera_height: config.camera_height,
            rgb_width: config.rgb_width,
            rgb_height: config.rgb_height,
        }
    }

    /// Converts one camera `frame` into `rgb` (RGB888, RGB image size).
    pub fn apply(&self, frame: &[u8], rgb: &mut [u8]) {
        let src = ImageView::new(frame, self.camera_width, self.camera_height);

        match self.step {
            FrameStep::CropDebayer {
                crop_x,
                crop_y,
                pattern,
            } => {
                let mut dst = ImageViewMut::new(rgb, self.rgb_width, self.rgb_height);
                crop_and_debayer(&src, crop_x, crop_y, &mut dst, pattern);
            }
            FrameStep::ConvertRgb565 => {
                convert_rgb565_to_rgb888(frame, rgb, self.camera_width, self.camera_height);
            }
            FrameStep::CopyRgb888 => {
                let len = PixelFormat::Rgb888.frame_size(self.camera_width, self.camera_height);
                rgb[..len].copy_from_slice(&frame[..len]);
            }
            FrameStep::Resize { format } => {
                let mut dst = ImageViewMut::new(rgb, self.rgb_width, self.rgb_height);
                resize(&src, format, &mut dst, PixelFormat::Rgb888);
            }
            FrameStep::CropRgb565 { crop } => crop_rgb565_to_rgb888(&src, rgb, crop),
            FrameStep::CropRgb888 { crop } => crop_rgb888_to_rgb888(&src, rgb, crop),
        }
    }
}

impl fmt::Display for FramePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (cw, ch, rw, rh) = (self.camera_width, self.camera_height, self.rgb_width, self.rgb_height);
        match self.step {
            FrameStep::CropDebayer {
                crop_x,
                crop_y,
                pattern,
            } => write!(f, "crop+debayer {pattern} {cw}x{ch} @({crop_x},{crop_y}) -> {rw}x{rh}"),
            FrameStep::ConvertRgb565 => write!(f, "convert RGB565 {cw}x{ch}"),
            FrameStep::CopyRgb888 => write!(f, "copy RGB888 {cw}x{ch}"),
            FrameStep::Resize { format } => write!(f, "resize {format:?} {cw}x{ch} -> {rw}x{rh}"),
            FrameStep::CropRgb565 { crop } => {
                write!(f, "crop RGB565 {cw}x{ch} @({},{}) -> {rw}x{rh}", crop.x, crop.y)
            }
            FrameStep::CropRgb888 { crop } => {
                write!(f, "crop RGB888 {cw}x{ch} @({},{}) -> {rw}x{rh}", crop.x, crop.y)
            }
        }
    }
}
