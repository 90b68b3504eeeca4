//! Frame streaming collaborators
//!
//! A capture source hands out one camera frame at a time and a display sink
//! hands out one writable output frame at a time. The capture pipeline only
//! talks to these traits.

mod source;
mod sink;
mod file_source;
mod tiff_sink;

pub use source::FrameSource;
pub use sink::FrameSink;
pub use file_source::FileFrameSource;
pub use tiff_sink::TiffFrameSink;
