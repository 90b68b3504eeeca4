use std::time::{Duration, Instant};

use tracing::{debug, info, info_span};

use crate::image_pipeline::common::{ImageView, ImageViewMut, PipelineError, Rect, Result};
use crate::image_pipeline::compose::{blit, draw_box};
use crate::image_pipeline::config::PipelineConfig;
use crate::image_pipeline::conversions::{FramePlan, StageTimings};
use crate::image_pipeline::pixel::PixelFormat;
use crate::image_pipeline::resize::resize;
use crate::image_pipeline::stream::{FrameSink, FrameSource};

/// Drives camera frames through to the model input and the display.
///
/// The RGB image and the model image are allocated once here and reused for
/// every frame.
pub struct CapturePipeline<S: FrameSource, K: FrameSink> {
    source: S,
    sink: K,
    config: PipelineConfig,
    plan: FramePlan,
    rgb_image: Vec<u8>,
    model_image: Vec<u8>,
    frames: u64,
}

impl<S: FrameSource, K: FrameSink> CapturePipeline<S, K> {
    pub fn new(config: PipelineConfig, source: S, sink: K) -> Result<Self> {
        config.validate()?;
        let plan = FramePlan::from_config(&config);

        info!("Capture pipeline initialized: {}", plan);
        info!(
            "Model input {}x{}, display {}x{}",
            config.model_width, config.model_height, config.display_width, config.display_height
        );

        Ok(Self {
            rgb_image: vec![0; config.rgb_image_size()],
            model_image: vec![0; config.model_image_size()],
            source,
            sink,
            config,
            plan,
            frames: 0,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn plan(&self) -> &FramePlan {
        &self.plan
    }

    /// Frames converted so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Converts the next camera frame into the model input.
    ///
    /// Returns `false` once the source has no more frames.
    pub fn open_frame(&mut self, timeout: Duration) -> Result<bool> {
        Ok(self.open_frame_with_timings(timeout)?.is_some())
    }

    /// Same as [`CapturePipeline::open_frame`], also reporting how long each
    /// stage took. `None` means the source is exhausted.
    pub fn open_frame_with_timings(&mut self, timeout: Duration) -> Result<Option<StageTimings>> {
        let _span = info_span!("open_frame", frame = self.frames).entered();
        let mut timings = StageTimings::new();

        let started = Instant::now();
        let Some(frame) = self.source.acquire(timeout)? else {
            debug!("Frame source exhausted after {} frames", self.frames);
            return Ok(None);
        };
        timings.record("acquire", started.elapsed());

        let expected = self.config.camera_frame_size();
        if frame.len() < expected {
            let actual = frame.len();
            self.source.release()?;
            return Err(PipelineError::FrameSize { expected, actual });
        }

        let plan = &self.plan;
        let rgb_image = &mut self.rgb_image;
        timings.time("convert_frame", || plan.apply(frame, rgb_image));

        let cfg = &self.config;
        let rgb = ImageView::new(&self.rgb_image, cfg.rgb_width, cfg.rgb_height);
        let mut model = ImageViewMut::new(&mut self.model_image, cfg.model_width, cfg.model_height);
        timings.time("resize_to_model", || {
            resize(&rgb, PixelFormat::Rgb888, &mut model, PixelFormat::Rgb888)
        });

        let started = Instant::now();
        self.source.release()?;
        timings.record("release", started.elapsed());

        self.frames += 1;
        debug!(
            "Frame {} ready in {:.3}ms",
            self.frames,
            timings.total().as_secs_f64() * 1000.0
        );

        Ok(Some(timings))
    }

    /// The RGB888 model image of the last converted frame.
    pub fn model_input(&self) -> &[u8] {
        &self.model_image
    }

    /// The intermediate RGB888 image of the last converted frame.
    pub fn rgb_image(&self) -> &[u8] {
        &self.rgb_image
    }

    /// Outlines `bbox` in green on the model image.
    ///
    /// The right and bottom edges are drawn at `x + width` and
    /// `y + height`, so both must lie inside the model image.
    pub fn mark_detection(&mut self, bbox: Rect) -> Result<()> {
        let (width, height) = (self.config.model_width, self.config.model_height);
        let fits_x = bbox.x.checked_add(bbox.width).is_some_and(|right| right < width);
        let fits_y = bbox.y.checked_add(bbox.height).is_some_and(|bottom| bottom < height);
        if !fits_x || !fits_y {
            return Err(PipelineError::BoxOutOfBounds {
                x: bbox.x,
                y: bbox.y,
                width: bbox.width,
                height: bbox.height,
                image_width: width,
                image_height: height,
            });
        }

        draw_box(&mut ImageViewMut::new(&mut self.model_image, width, height), bbox);
        Ok(())
    }

    /// Blits the model image, centred, into the next display frame and
    /// submits it.
    pub fn present(&mut self) -> Result<()> {
        let cfg = &self.config;
        let x_offset = ((cfg.display_width - cfg.model_width) / 2) as isize;
        let y_offset = ((cfg.display_height - cfg.model_height) / 2) as isize;

        let frame = self.sink.acquire()?;
        let expected = cfg.display_frame_size();
        if frame.len() < expected {
            return Err(PipelineError::SinkError(format!(
                "display buffer holds {} bytes, expected {}",
                frame.len(),
                expected
            )));
        }

        blit(
            &ImageView::new(&self.model_image, cfg.model_width, cfg.model_height),
            &mut ImageViewMut::new(frame, cfg.display_width, cfg.display_height),
            x_offset,
            y_offset,
            PixelFormat::Rgb888,
        );

        self.sink.submit()
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }
}
