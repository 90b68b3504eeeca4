use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::config::{FrameType, PipelineConfig};
use crate::image_pipeline::raw::{RawFrameReader, RawLoaderReader, is_camera_raw};
use crate::image_pipeline::stream::source::FrameSource;

/// Plays back a list of frame files.
///
/// Files with a camera RAW extension are decoded through the RAW reader.
/// Anything else is a headerless dump in the configured frame type and must
/// be exactly one frame long.
pub struct FileFrameSource<R: RawFrameReader = RawLoaderReader> {
    paths: Vec<PathBuf>,
    next: usize,
    frame: Vec<u8>,
    held: bool,
    config: PipelineConfig,
    reader: R,
}

impl FileFrameSource<RawLoaderReader> {
    pub fn new(paths: Vec<PathBuf>, config: &PipelineConfig) -> Self {
        Self::with_reader(paths, config, RawLoaderReader)
    }
}

impl<R: RawFrameReader> FileFrameSource<R> {
    pub fn with_reader(paths: Vec<PathBuf>, config: &PipelineConfig, reader: R) -> Self {
        Self {
            paths,
            next: 0,
            frame: Vec::with_capacity(config.camera_frame_size()),
            held: false,
            config: config.clone(),
            reader,
        }
    }

    pub fn remaining(&self) -> usize {
        self.paths.len() - self.next
    }

    fn load(&mut self, index: usize) -> Result<()> {
        let path = &self.paths[index];
        let source_error = |e: std::io::Error| PipelineError::SourceError(format!("{}: {}", path.display(), e));

        self.frame.clear();
        File::open(path)
            .and_then(|mut file| file.read_to_end(&mut self.frame))
            .map_err(source_error)?;

        if is_camera_raw(path) {
            let raw = self.reader.read_raw(&self.frame)?;
            let FrameType::Raw8(pattern) = self.config.frame_type else {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "{} is a camera RAW file but frames are configured as {:?}",
                    path.display(),
                    self.config.frame_type
                )));
            };
            if raw.pattern != pattern {
                return Err(PipelineError::UnsupportedFormat(format!(
                    "{} has a {} layout, pipeline expects {}",
                    path.display(),
                    raw.pattern,
                    pattern
                )));
            }
            if (raw.width, raw.height) != (self.config.camera_width, self.config.camera_height) {
                return Err(PipelineError::InvalidDimensions(raw.width, raw.height));
            }
            self.frame = raw.data;
        }

        let expected = self.config.camera_frame_size();
        if self.frame.len() != expected {
            return Err(PipelineError::FrameSize {
                expected,
                actual: self.frame.len(),
            });
        }

        debug!("Loaded frame {} from {}", index, path.display());
        Ok(())
    }
}

impl<R: RawFrameReader> FrameSource for FileFrameSource<R> {
    /// Files are always ready, so `timeout` is never waited on.
    fn acquire(&mut self, _timeout: Duration) -> Result<Option<&[u8]>> {
        if self.held {
            return Err(PipelineError::SourceError(
                "previous frame has not been released".to_string(),
            ));
        }
        if self.next >= self.paths.len() {
            return Ok(None);
        }

        let index = self.next;
        self.next += 1;
        self.load(index)?;

        self.held = true;
        Ok(Some(self.frame.as_slice()))
    }

    fn release(&mut self) -> Result<()> {
        self.held = false;
        Ok(())
    }
}
