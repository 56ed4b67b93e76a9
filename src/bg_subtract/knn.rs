use opencv::core::{Mat, Ptr};
use opencv::prelude::*;
use opencv::video::{BackgroundSubtractorKNN, create_background_subtractor_knn};

use serde::Deserialize;

use crate::bg_subtract::BackgroundSubtractor;
use crate::bg_subtract::shape::ShapeGuard;
use crate::error::Result;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct KnnSettings {
    pub history: i32,
    /// squared distance for a pixel to count as close to a stored sample
    pub dist2_threshold: f64,
    pub detect_shadows: bool,
    pub learning_rate: f64,
}

impl Default for KnnSettings {
    fn default() -> KnnSettings {
        KnnSettings {
            history: 20,
            dist2_threshold: 2000.0,
            detect_shadows: false,
            learning_rate: -1.0,
        }
    }
}

pub struct KnnSubtractor {
    subtractor: Ptr<BackgroundSubtractorKNN>,
    settings: KnnSettings,
    guard: ShapeGuard,
}

fn knn_from_settings(
    KnnSettings {
        history,
        dist2_threshold,
        detect_shadows,
        learning_rate: _,
    }: KnnSettings,
) -> opencv::Result<Ptr<BackgroundSubtractorKNN>> {
    create_background_subtractor_knn(history, dist2_threshold, detect_shadows)
}

impl KnnSubtractor {
    pub fn new(settings: KnnSettings) -> Result<KnnSubtractor> {
        Ok(KnnSubtractor {
            subtractor: knn_from_settings(settings)?,
            settings,
            guard: ShapeGuard::default(),
        })
    }
}

impl BackgroundSubtractor for KnnSubtractor {
    fn name(&self) -> &'static str {
        "KNN"
    }

    fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        self.guard.check(frame, self.name())?;
        let mut mask = Mat::default();
        self.subtractor
            .apply(frame, &mut mask, self.settings.learning_rate)?;
        Ok(mask)
    }

    fn reset(&mut self) -> Result<()> {
        self.subtractor = knn_from_settings(self.settings)?;
        self.guard.clear();
        Ok(())
    }
}
