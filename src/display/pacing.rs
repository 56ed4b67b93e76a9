use std::time::{Duration, Instant};

/// weight of the newest frame interval in the smoothed rate
const SMOOTHING: f32 = 0.1;

/// Per-frame wait that plays the source back at `frame_rate`.
pub fn frame_delay_ms(frame_rate: u32) -> i32 {
    (1000 / frame_rate.max(1)) as i32
}

/// Frame rate the loop actually achieves, including model and display time.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackStats {
    started: Instant,
    last: Instant,
    frames: u64,
    smoothed_ms: Option<f32>,
}

impl PlaybackStats {
    pub fn start() -> PlaybackStats {
        PlaybackStats::start_at(Instant::now())
    }

    pub fn start_at(now: Instant) -> PlaybackStats {
        PlaybackStats {
            started: now,
            last: now,
            frames: 0,
            smoothed_ms: None,
        }
    }

    pub fn record_frame(&mut self) {
        self.record_frame_at(Instant::now());
    }

    pub fn record_frame_at(&mut self, now: Instant) {
        let interval = now.saturating_duration_since(self.last).as_secs_f32() * 1000.0;
        self.last = now;
        self.frames += 1;
        self.smoothed_ms = Some(match self.smoothed_ms {
            None => interval,
            Some(previous) => previous + SMOOTHING * (interval - previous),
        });
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> Option<f32> {
        self.smoothed_ms.filter(|ms| *ms > 0.0).map(|ms| 1000.0 / ms)
    }

    pub fn elapsed(&self) -> Duration {
        self.last.saturating_duration_since(self.started)
    }

    pub fn is_log_frame(&self, every: u64) -> bool {
        self.frames > 0 && self.frames % every == 0
    }
}
