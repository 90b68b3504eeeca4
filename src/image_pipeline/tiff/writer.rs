use std::io::Write;
use crate::image_pipeline::common::ImageView;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::pixel::PixelFormat;
use crate::image_pipeline::tiff::types::TiffOptions;

pub trait TiffWriter {
    /// Encodes `image`, stored as `format`, into `output`.
    fn write_tiff(
        &self,
        image: &ImageView<'_>,
        format: PixelFormat,
        output: &mut dyn Write,
        options: &TiffOptions,
    ) -> Result<()>;
}
