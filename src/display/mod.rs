mod compositor;
mod display_window;
mod pacing;

pub use compositor::side_by_side;
pub use display_window::{DisplaySurface, HighGuiWindow};
pub use pacing::{PlaybackStats, frame_delay_ms};
