use opencv::core::Mat;
use opencv::highgui;

use crate::error::Result;

pub trait DisplaySurface {
    fn show(&mut self, title: &str, image: &Mat) -> Result<()>;
    /// Blocks for up to `delay_ms` and returns the low byte of a pressed key.
    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<i32>>;
    fn close(&mut self) -> Result<()>;
}

/// OpenCV highgui windows, created lazily on first `show`.
#[derive(Default)]
pub struct HighGuiWindow {
    windows: Vec<String>,
}

impl HighGuiWindow {
    pub fn new() -> HighGuiWindow {
        HighGuiWindow::default()
    }
}

pub(crate) fn key_code(raw: i32) -> Option<i32> {
    //wait_key gives -1 on timeout, platform bits live above the low byte
    if raw < 0 { None } else { Some(raw & 0xFF) }
}

impl DisplaySurface for HighGuiWindow {
    fn show(&mut self, title: &str, image: &Mat) -> Result<()> {
        if !self.windows.iter().any(|w| w == title) {
            highgui::named_window(title, highgui::WINDOW_AUTOSIZE)?;
            self.windows.push(title.to_string());
        }
        highgui::imshow(title, image)?;
        Ok(())
    }

    fn poll_key(&mut self, delay_ms: i32) -> Result<Option<i32>> {
        Ok(key_code(highgui::wait_key(delay_ms)?))
    }

    fn close(&mut self) -> Result<()> {
        if !self.windows.is_empty() {
            highgui::destroy_all_windows()?;
            self.windows.clear();
        }
        Ok(())
    }
}
