use opencv::core::Mat;

use crate::bg_subtract::{BackgroundSubtractor, ModelSettings, create_subtractor};
use crate::config::HarnessConfig;
use crate::display::{DisplaySurface, PlaybackStats, frame_delay_ms, side_by_side};
use crate::error::Result;
use crate::refine::MaskRefiner;
use crate::source::FrameSource;

const UNREFINED_WINDOW: &str = "MOG2";
const LOG_EVERY: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    EscapeKey,
    EndOfStream,
}

/// Drives frames from the source through both models, refines and
/// composes the masks and paces the display.
pub struct Controller<S: FrameSource, D: DisplaySurface> {
    source: S,
    display: D,
    mog2: Box<dyn BackgroundSubtractor>,
    knn: Box<dyn BackgroundSubtractor>,
    unrefined: Option<Box<dyn BackgroundSubtractor>>,
    refiner: MaskRefiner,
    window_title: String,
    escape_key: i32,
    delay_ms: i32,
    state: LoopState,
    stop_reason: Option<StopReason>,
    stats: PlaybackStats,
}

impl<S: FrameSource, D: DisplaySurface> Controller<S, D> {
    pub fn from_config(source: S, display: D, config: &HarnessConfig) -> Result<Controller<S, D>> {
        config.validate()?;
        let unrefined = match config.display.show_unrefined_mog2 {
            true => Some(create_subtractor(ModelSettings::Mog2(config.mog2))?),
            false => None,
        };
        Ok(Controller {
            source,
            display,
            mog2: create_subtractor(ModelSettings::Mog2(config.mog2))?,
            knn: create_subtractor(ModelSettings::Knn(config.knn))?,
            unrefined,
            refiner: MaskRefiner::new(&config.kernel)?,
            window_title: config.display.window_title.clone(),
            escape_key: config.display.escape_key,
            delay_ms: frame_delay_ms(config.source.frame_rate),
            state: LoopState::Running,
            stop_reason: None,
            stats: PlaybackStats::start(),
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_processed(&self) -> u64 {
        self.stats.frames()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Runs until the escape key, the end of the stream or the first error.
    /// Source and display are released on every path out.
    pub fn run(&mut self) -> Result<StopReason> {
        if let Some(reason) = self.stop_reason {
            return Ok(reason);
        }
        let outcome = self.run_loop();
        self.state = LoopState::Stopped;
        let teardown = self.teardown();

        match (outcome, teardown) {
            (Ok(reason), Ok(())) => {
                self.stop_reason = Some(reason);
                tracing::info!(
                    "Stopped after {} frames: {reason:?}",
                    self.frames_processed()
                );
                Ok(reason)
            }
            (Ok(_), Err(error)) => Err(error),
            (Err(error), Err(teardown_error)) => {
                tracing::warn!("Teardown after failure also failed: {teardown_error}");
                Err(error)
            }
            (Err(error), Ok(())) => Err(error),
        }
    }

    fn run_loop(&mut self) -> Result<StopReason> {
        loop {
            let Some(frame) = self.source.next_frame()? else {
                return Ok(StopReason::EndOfStream);
            };
            self.process_frame(&frame)?;

            if self.display.poll_key(self.delay_ms)? == Some(self.escape_key) {
                return Ok(StopReason::EscapeKey);
            }
        }
    }

    fn process_frame(&mut self, frame: &Mat) -> Result<()> {
        let mog2_mask = self.refiner.refine(&self.mog2.apply(frame)?)?;
        let knn_mask = self.refiner.refine(&self.knn.apply(frame)?)?;
        let composite = side_by_side(&mog2_mask, &knn_mask)?;
        self.display.show(&self.window_title, &composite)?;

        if let Some(unrefined) = self.unrefined.as_mut() {
            let raw_mask = unrefined.apply(frame)?;
            self.display.show(UNREFINED_WINDOW, &raw_mask)?;
        }

        self.stats.record_frame();
        if self.stats.is_log_frame(LOG_EVERY) {
            tracing::debug!(
                "Frame {}: {:.1} fps over {:.1}s",
                self.stats.frames(),
                self.stats.fps().unwrap_or(0.0),
                self.stats.elapsed().as_secs_f32()
            );
        }
        Ok(())
    }

    fn teardown(&mut self) -> Result<()> {
        let source = self.source.close();
        let display = self.display.close();
        source.and(display)
    }
}
