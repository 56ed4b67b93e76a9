use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::bg_subtract::{KnnSettings, ModelSettings, Mog2Settings};
use crate::error::{HarnessError, Result};
use crate::refine::KernelSettings;
use crate::source::VideoSourceSpec;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
    pub video_source: VideoSourceSpec,
    pub frame_rate: u32,
}

impl Default for SourceConfig {
    fn default() -> SourceConfig {
        SourceConfig {
            video_source: VideoSourceSpec::default(),
            frame_rate: 60,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub window_title: String,
    pub escape_key: i32,
    /// extra window with the raw, unrefined MOG2 mask
    pub show_unrefined_mog2: bool,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            window_title: "KNN+MOG2Morph".to_string(),
            escape_key: 27,
            show_unrefined_mog2: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub source: SourceConfig,
    pub mog2: Mog2Settings,
    pub knn: KnnSettings,
    pub kernel: KernelSettings,
    pub display: DisplayConfig,
}

impl HarnessConfig {
    pub fn validate(&self) -> Result<()> {
        if self.source.frame_rate == 0 {
            return Err(HarnessError::Configuration(
                "frame_rate must be at least 1".to_string(),
            ));
        }
        if self.display.window_title.trim().is_empty() {
            return Err(HarnessError::Configuration(
                "window_title must not be empty".to_string(),
            ));
        }
        if !(0..=255).contains(&self.display.escape_key) {
            return Err(HarnessError::Configuration(format!(
                "escape_key must be a byte, got {}",
                self.display.escape_key
            )));
        }
        ModelSettings::Mog2(self.mog2).validate()?;
        ModelSettings::Knn(self.knn).validate()?;
        self.kernel.validate()
    }
}

fn open_file(path: &Path) -> Result<String> {
    match std::fs::read_to_string(path) {
        Ok(res) => Ok(res),
        Err(e) => {
            tracing::error!("Could not load config at {}", path.display());
            Err(e.into())
        }
    }
}

pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = open_file(path)?;
    Ok(toml::from_str(&contents)?)
}
