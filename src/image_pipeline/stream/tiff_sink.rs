use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::info;

use crate::image_pipeline::common::ImageView;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::pixel::PixelFormat;
use crate::image_pipeline::stream::sink::FrameSink;
use crate::image_pipeline::tiff::{StandardTiffWriter, TiffOptions, TiffWriter};

/// Display sink that writes every submitted RGB888 frame to
/// `<dir>/frame_NNNN.tif`.
///
/// The frame buffer persists across submits, like a real framebuffer: only
/// what a frame overwrites changes.
pub struct TiffFrameSink<W: TiffWriter = StandardTiffWriter> {
    dir: PathBuf,
    frame: Vec<u8>,
    width: usize,
    height: usize,
    writer: W,
    options: TiffOptions,
    submitted: usize,
}

impl TiffFrameSink<StandardTiffWriter> {
    pub fn new(dir: impl Into<PathBuf>, width: usize, height: usize, options: TiffOptions) -> Self {
        Self::with_writer(dir, width, height, StandardTiffWriter, options)
    }
}

impl<W: TiffWriter> TiffFrameSink<W> {
    pub fn with_writer(dir: impl Into<PathBuf>, width: usize, height: usize, writer: W, options: TiffOptions) -> Self {
        Self {
            dir: dir.into(),
            frame: vec![0; PixelFormat::Rgb888.frame_size(width, height)],
            width,
            height,
            writer,
            options,
            submitted: 0,
        }
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:04}.tif"))
    }
}

impl<W: TiffWriter> FrameSink for TiffFrameSink<W> {
    fn acquire(&mut self) -> Result<&mut [u8]> {
        Ok(self.frame.as_mut_slice())
    }

    fn submit(&mut self) -> Result<()> {
        let path = self.frame_path(self.submitted);
        let file = File::create(&path)
            .map_err(|e| PipelineError::SinkError(format!("{}: {}", path.display(), e)))?;
        let mut output = BufWriter::new(file);

        self.writer.write_tiff(
            &ImageView::new(&self.frame, self.width, self.height),
            PixelFormat::Rgb888,
            &mut output,
            &self.options,
        )?;
        output.flush()?;

        info!(path = %path.display(), "Display frame written");
        self.submitted += 1;
        Ok(())
    }
}
