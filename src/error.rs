use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("could not open video source {0}")]
    SourceOpen(String),

    #[error("could not decode frame: {0}")]
    Decode(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("OpenCV error: {0}")]
    OpenCv(#[from] opencv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Toml(#[from] toml::de::Error),
}
