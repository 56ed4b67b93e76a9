use opencv::core::{Mat, Point, Size};
use opencv::imgproc;
use serde::Deserialize;

use crate::error::{HarnessError, Result};

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum KernelShape {
    Ellipse,
    Rectangle,
    Cross,
}

impl KernelShape {
    fn morph_shape(self) -> i32 {
        match self {
            KernelShape::Ellipse => imgproc::MORPH_ELLIPSE,
            KernelShape::Rectangle => imgproc::MORPH_RECT,
            KernelShape::Cross => imgproc::MORPH_CROSS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MorphOperation {
    /// erode then dilate, drops specks
    Open,
    /// dilate then erode, fills pinholes
    Close,
}

impl MorphOperation {
    pub(super) fn morph_op(self) -> i32 {
        match self {
            MorphOperation::Open => imgproc::MORPH_OPEN,
            MorphOperation::Close => imgproc::MORPH_CLOSE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct KernelSettings {
    pub shape: KernelShape,
    /// (width, height)
    pub size: (i32, i32),
    pub operation: MorphOperation,
}

impl Default for KernelSettings {
    fn default() -> KernelSettings {
        KernelSettings {
            shape: KernelShape::Ellipse,
            size: (3, 3),
            operation: MorphOperation::Open,
        }
    }
}

impl KernelSettings {
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.size;
        if width <= 0 || height <= 0 {
            return Err(HarnessError::Configuration(format!(
                "kernel size must be positive, got {width}x{height}"
            )));
        }
        Ok(())
    }

    pub fn structuring_element(&self) -> Result<Mat> {
        self.validate()?;
        let (width, height) = self.size;
        Ok(imgproc::get_structuring_element(
            self.shape.morph_shape(),
            Size::new(width, height),
            Point::new(-1, -1),
        )?)
    }
}
