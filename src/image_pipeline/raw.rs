//! RAW image reading module
//!
//! Decodes camera RAW files into the 8-bit Bayer frames the capture path
//! consumes.

mod reader;
mod rawloader_reader;
pub mod types;

pub use reader::RawFrameReader;
pub use rawloader_reader::RawLoaderReader;
pub use types::RawFrame;

/// File extensions treated as camera RAW containers rather than headerless
/// frame dumps.
pub const CAMERA_RAW_EXTENSIONS: [&str; 8] = ["arw", "cr2", "nef", "dng", "raf", "orf", "rw2", "pef"];

pub fn is_camera_raw(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| CAMERA_RAW_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
