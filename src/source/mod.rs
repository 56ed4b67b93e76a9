#[cfg(test)]
mod memory;
mod video;

use opencv::core::Mat;

use crate::error::Result;

#[cfg(test)]
pub use memory::MemorySource;
pub use video::{VideoSource, VideoSourceSpec};

pub trait FrameSource {
    /// Next decoded frame in presentation order, `None` once the stream is exhausted.
    fn next_frame(&mut self) -> Result<Option<Mat>>;
    fn close(&mut self) -> Result<()>;
}
