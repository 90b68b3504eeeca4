use std::io::Write;
use tracing::debug;
use ::tiff::encoder::{Compression, TiffEncoder, colortype, compression::DeflateLevel};
use ::tiff::tags::Predictor;
use crate::image_pipeline::common::ImageView;
use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::pixel::{PixelFormat, Rgb};
use crate::image_pipeline::tiff::types::{TiffCompression, TiffOptions};
use crate::image_pipeline::tiff::writer::TiffWriter;

pub struct StandardTiffWriter;

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        image: &ImageView<'_>,
        format: PixelFormat,
        output: &mut dyn Write,
        options: &TiffOptions,
    ) -> Result<()> {
        debug!("Encoding TIFF image: {}x{} {:?}", image.width, image.height, format);

        let expected = format.frame_size(image.width, image.height);
        if image.data.len() < expected {
            return Err(PipelineError::FrameSize {
                expected,
                actual: image.data.len(),
            });
        }
        let pixels = &image.data[..expected];

        let compression = match options.compression {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Balanced),
        };

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(|e| PipelineError::EncodeError(e.to_string()))?
                .with_compression(compression);

            if options.horizontal_predictor {
                encoder = encoder.with_predictor(Predictor::Horizontal);
            }

            let (width, height) = (image.width as u32, image.height as u32);
            let written = match format {
                PixelFormat::Grayscale => encoder.write_image::<colortype::Gray8>(width, height, pixels),
                PixelFormat::Rgb888 => encoder.write_image::<colortype::RGB8>(width, height, pixels),
                // TIFF has no 5-6-5 colour type; widen first
                PixelFormat::Rgb565 => {
                    let widened: Vec<u8> = pixels
                        .chunks_exact(2)
                        .flat_map(|px| Rgb::from_rgb565(u16::from_le_bytes([px[0], px[1]])).to_array())
                        .collect();
                    encoder.write_image::<colortype::RGB8>(width, height, &widened)
                }
            };
            written.map_err(|e| PipelineError::EncodeError(e.to_string()))?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
