use crate::bg_subtract::BackgroundSubtractor;
use crate::bg_subtract::knn::{KnnSettings, KnnSubtractor};
use crate::bg_subtract::mog2::{Mog2Settings, Mog2Subtractor};
use crate::error::{HarnessError, Result};

/// Settings of one background model, tagged by algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSettings {
    Mog2(Mog2Settings),
    Knn(KnnSettings),
}

impl ModelSettings {
    pub fn validate(&self) -> Result<()> {
        match self {
            ModelSettings::Mog2(mog2) => {
                check_model("mog2", mog2.history, mog2.var_threshold, mog2.learning_rate)
            }
            ModelSettings::Knn(knn) => {
                check_model("knn", knn.history, knn.dist2_threshold, knn.learning_rate)
            }
        }
    }
}

fn check_model(section: &str, history: i32, threshold: f64, learning_rate: f64) -> Result<()> {
    if history <= 0 {
        return Err(HarnessError::Configuration(format!(
            "{section}.history must be positive, got {history}"
        )));
    }
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(HarnessError::Configuration(format!(
            "{section} threshold must be a positive number, got {threshold}"
        )));
    }
    if !(-1.0..=1.0).contains(&learning_rate) {
        return Err(HarnessError::Configuration(format!(
            "{section}.learning_rate must lie in [-1, 1], got {learning_rate}"
        )));
    }
    Ok(())
}

pub fn create_subtractor(settings: ModelSettings) -> Result<Box<dyn BackgroundSubtractor>> {
    settings.validate()?;
    Ok(match settings {
        ModelSettings::Mog2(mog2) => Box::new(Mog2Subtractor::new(mog2)?),
        ModelSettings::Knn(knn) => Box::new(KnnSubtractor::new(knn)?),
    })
}
