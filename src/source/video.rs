use std::fmt;

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};
use serde::Deserialize;

use crate::error::{HarnessError, Result};
use crate::source::FrameSource;

/// Either a capture device index or a path/URL handed to the decoder.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum VideoSourceSpec {
    Device(i32),
    File(String),
}

impl VideoSourceSpec {
    /// Parses a command line value: plain integers select a device.
    pub fn parse(value: &str) -> VideoSourceSpec {
        match value.trim().parse::<i32>() {
            Ok(index) => VideoSourceSpec::Device(index),
            Err(_) => VideoSourceSpec::File(value.to_string()),
        }
    }
}

impl Default for VideoSourceSpec {
    fn default() -> VideoSourceSpec {
        VideoSourceSpec::Device(0)
    }
}

impl fmt::Display for VideoSourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoSourceSpec::Device(index) => write!(f, "device {index}"),
            VideoSourceSpec::File(path) => write!(f, "{path}"),
        }
    }
}

pub struct VideoSource {
    capture: VideoCapture,
    spec: VideoSourceSpec,
    released: bool,
}

fn get_capture(spec: &VideoSourceSpec) -> opencv::Result<VideoCapture> {
    match spec {
        VideoSourceSpec::Device(index) => VideoCapture::new(*index, videoio::CAP_ANY),
        VideoSourceSpec::File(path) => VideoCapture::from_file(path, videoio::CAP_ANY),
    }
}

impl VideoSource {
    pub fn open(spec: &VideoSourceSpec) -> Result<VideoSource> {
        let capture = get_capture(spec)
            .map_err(|e| HarnessError::SourceOpen(format!("{spec}: {}", e.message)))?;
        if !capture.is_opened()? {
            return Err(HarnessError::SourceOpen(spec.to_string()));
        }
        tracing::info!("Opened video source {spec}");
        Ok(VideoSource {
            capture,
            spec: spec.clone(),
            released: false,
        })
    }
}

impl FrameSource for VideoSource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        if self.released {
            return Ok(None);
        }
        let mut frame = Mat::default();
        let grabbed = self
            .capture
            .read(&mut frame)
            .map_err(|e| HarnessError::Decode(format!("{}: {}", self.spec, e.message)))?;
        if !grabbed {
            return Ok(None);
        }
        if frame.empty() {
            return Err(HarnessError::Decode(format!(
                "{} returned an empty frame",
                self.spec
            )));
        }
        Ok(Some(frame))
    }

    fn close(&mut self) -> Result<()> {
        if !self.released {
            self.released = true;
            self.capture.release()?;
            tracing::debug!("Released video source {}", self.spec);
        }
        Ok(())
    }
}

impl Drop for VideoSource {
    fn drop(&mut self) {
        if let Err(error) = self.close() {
            tracing::warn!("Could not release video source {}: {error}", self.spec);
        }
    }
}
