mod bg_trait;
mod config;
mod knn;
mod mog2;
mod shape;

pub use bg_trait::BackgroundSubtractor;
pub use config::{ModelSettings, create_subtractor};
pub use knn::KnnSettings;
pub use mog2::Mog2Settings;
