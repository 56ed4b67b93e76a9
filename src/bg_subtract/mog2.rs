use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{BackgroundSubtractorMOG2, create_background_subtractor_mog2};

use serde::Deserialize;

use crate::bg_subtract::BackgroundSubtractor;
use crate::bg_subtract::shape::ShapeGuard;
use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Mog2Settings {
    /// frames a static pixel needs before it is absorbed into the background
    pub history: i32,
    /// squared Mahalanobis distance below which a pixel fits the model
    pub var_threshold: f64,
    pub detect_shadows: bool,
    /// negative lets OpenCV derive the rate from `history`
    pub learning_rate: f64,
}

impl Default for Mog2Settings {
    fn default() -> Mog2Settings {
        Mog2Settings {
            history: 20,
            var_threshold: 200.0,
            detect_shadows: false,
            learning_rate: -1.0,
        }
    }
}

pub struct Mog2Subtractor {
    subtractor: Ptr<BackgroundSubtractorMOG2>,
    settings: Mog2Settings,
    guard: ShapeGuard,
}

fn mog2_from_settings(
    Mog2Settings {
        history,
        var_threshold,
        detect_shadows,
        learning_rate: _,
    }: Mog2Settings,
) -> opencv::Result<Ptr<BackgroundSubtractorMOG2>> {
    create_background_subtractor_mog2(history, var_threshold, detect_shadows)
}

impl Mog2Subtractor {
    pub fn new(settings: Mog2Settings) -> Result<Mog2Subtractor> {
        let subtractor = mog2_from_settings(settings)?;
        Ok(Mog2Subtractor {
            subtractor,
            settings,
            guard: ShapeGuard::default(),
        })
    }
}

impl BackgroundSubtractor for Mog2Subtractor {
    fn name(&self) -> &'static str {
        "MOG2"
    }

    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        self.guard.check(frame, self.name())?;
        let mut mask = Mat::default();
        self.subtractor
            .apply(frame, &mut mask, self.settings.learning_rate)?;
        Ok(mask)
    }

    fn reset(&mut self) -> Result<()> {
        self.subtractor = mog2_from_settings(self.settings)?;
        self.guard.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_frames::{moving_square, uniform};
    use crate::error::HarnessError;
    use opencv::core::{CV_8UC1, count_non_zero};

    #[test]
    fn static_scene_converges_to_background() {
        let settings = Mog2Settings::default();
        let mut subtractor = Mog2Subtractor::new(settings).unwrap();
        let frame = uniform(48, 64, 90.0);
        let mut mask = Mat::default();
        for _ in 0..(settings.history * 3) {
            mask = subtractor.apply(&frame).unwrap();
        }
        assert_eq!(mask.typ(), CV_8UC1);
        assert_eq!(count_non_zero(&mask).unwrap(), 0);
    }

    #[test]
    fn bright_square_is_foreground() {
        let mut subtractor = Mog2Subtractor::new(Mog2Settings::default()).unwrap();
        let background = uniform(64, 64, 30.0);
        for _ in 0..60 {
            subtractor.apply(&background).unwrap();
        }
        let mask = subtractor.apply(&moving_square(64, 64, 30.0, 20, 20, 12)).unwrap();
        let foreground = count_non_zero(&mask).unwrap();
        assert!((130..=160).contains(&foreground), "foreground = {foreground}");
    }

    #[test]
    fn shadows_are_not_marked_gray() {
        let mut subtractor = Mog2Subtractor::new(Mog2Settings::default()).unwrap();
        let background = uniform(32, 32, 120.0);
        for _ in 0..40 {
            subtractor.apply(&background).unwrap();
        }
        let mask = subtractor.apply(&uniform(32, 32, 70.0)).unwrap();
        for row in 0..mask.rows() {
            for col in 0..mask.cols() {
                let value = *mask.at_2d::<u8>(row, col).unwrap();
                assert!(value == 0 || value == 255);
            }
        }
    }

    #[test]
    fn dimension_change_fails_until_reset() {
        let mut subtractor = Mog2Subtractor::new(Mog2Settings::default()).unwrap();
        subtractor.apply(&uniform(20, 20, 10.0)).unwrap();
        assert!(matches!(
            subtractor.apply(&uniform(30, 30, 10.0)),
            Err(HarnessError::DimensionMismatch(_))
        ));
        subtractor.reset().unwrap();
        subtractor.apply(&uniform(30, 30, 10.0)).unwrap();
    }
}
