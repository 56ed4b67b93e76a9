mod kernel;

use opencv::core::{BORDER_CONSTANT, CV_8UC1, Mat, Point};
use opencv::imgproc;
use opencv::prelude::*;

use crate::error::{HarnessError, Result};

pub use kernel::{KernelSettings, KernelShape, MorphOperation};

/// Morphological cleanup applied to every foreground mask.
/// The structuring element is built once and shared by all calls.
pub struct MaskRefiner {
    element: Mat,
    operation: MorphOperation,
}

impl MaskRefiner {
    pub fn new(settings: &KernelSettings) -> Result<MaskRefiner> {
        Ok(MaskRefiner {
            element: settings.structuring_element()?,
            operation: settings.operation,
        })
    }

    pub fn refine(&self, mask: &Mat) -> Result<Mat> {
        if mask.typ() != CV_8UC1 {
            return Err(HarnessError::DimensionMismatch(format!(
                "masks must be single channel 8-bit, got type {}",
                mask.typ()
            )));
        }
        let mut refined = Mat::default();
        imgproc::morphology_ex(
            mask,
            &mut refined,
            self.operation.morph_op(),
            &self.element,
            Point::new(-1, -1),
            1,
            BORDER_CONSTANT,
            imgproc::morphology_default_border_value()?,
        )?;
        Ok(refined)
    }
}
