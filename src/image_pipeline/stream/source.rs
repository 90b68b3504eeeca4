use std::time::Duration;

use crate::image_pipeline::common::error::Result;

pub trait FrameSource {
    /// Waits up to `timeout` for the next frame. `Ok(None)` means the source
    /// is exhausted. The frame stays valid until [`FrameSource::release`].
    fn acquire(&mut self, timeout: Duration) -> Result<Option<&[u8]>>;

    /// Hands the current frame back to the source.
    fn release(&mut self) -> Result<()>;
}
