use opencv::core::Mat;

use crate::error::Result;

pub trait BackgroundSubtractor {
    fn name(&self) -> &'static str;
    /// Feeds the next frame into the model and returns its foreground mask.
    /// Frames must arrive in chronological order.
    fn apply(&mut self, frame: &Mat) -> Result<Mat>;
    /// Drops all accumulated statistics.
    fn reset(&mut self) -> Result<()>;
}
