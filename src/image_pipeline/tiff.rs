//! TIFF writing module
//!
//! Dumps 8-bit RGB888 and grayscale buffers (model input, display frames)
//! as TIFF files.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, TiffOptions, TiffOptionsBuilder};
