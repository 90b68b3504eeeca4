use crate::image_pipeline::common::error::Result;

pub trait FrameSink {
    /// Borrows the writable output frame.
    fn acquire(&mut self) -> Result<&mut [u8]>;

    /// Publishes the frame last handed out by [`FrameSink::acquire`].
    fn submit(&mut self) -> Result<()>;
}
