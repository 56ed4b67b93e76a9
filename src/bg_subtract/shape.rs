use opencv::core::Mat;
use opencv::prelude::*;

use crate::error::{HarnessError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameShape {
    pub rows: i32,
    pub cols: i32,
    pub typ: i32,
}

impl FrameShape {
    pub fn of(mat: &Mat) -> FrameShape {
        FrameShape {
            rows: mat.rows(),
            cols: mat.cols(),
            typ: mat.typ(),
        }
    }
}

/// Remembers the shape of the first frame a model saw.
#[derive(Debug, Default)]
pub struct ShapeGuard {
    expected: Option<FrameShape>,
}

impl ShapeGuard {
    pub fn check(&mut self, frame: &Mat, owner: &str) -> Result<()> {
        if frame.empty() {
            return Err(HarnessError::DimensionMismatch(format!(
                "{owner} received an empty frame"
            )));
        }
        let shape = FrameShape::of(frame);
        match self.expected {
            None => {
                self.expected = Some(shape);
                Ok(())
            }
            Some(expected) if expected == shape => Ok(()),
            Some(expected) => Err(HarnessError::DimensionMismatch(format!(
                "{owner} was fed {}x{} (type {}) frames, got {}x{} (type {})",
                expected.cols, expected.rows, expected.typ, shape.cols, shape.rows, shape.typ
            ))),
        }
    }

    pub fn clear(&mut self) {
        self.expected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{CV_8UC1, CV_8UC3, Scalar};

    fn frame(rows: i32, cols: i32, typ: i32) -> Mat {
        Mat::new_rows_cols_with_default(rows, cols, typ, Scalar::all(0.0)).unwrap()
    }

    #[test]
    fn first_frame_fixes_the_shape() {
        let mut guard = ShapeGuard::default();
        guard.check(&frame(4, 6, CV_8UC3), "test").unwrap();
        guard.check(&frame(4, 6, CV_8UC3), "test").unwrap();
        assert!(matches!(
            guard.check(&frame(6, 4, CV_8UC3), "test"),
            Err(HarnessError::DimensionMismatch(_))
        ));
        assert!(matches!(
            guard.check(&frame(4, 6, CV_8UC1), "test"),
            Err(HarnessError::DimensionMismatch(_))
        ));
    }

    #[test]
    fn clear_accepts_a_new_shape() {
        let mut guard = ShapeGuard::default();
        guard.check(&frame(4, 6, CV_8UC3), "test").unwrap();
        guard.clear();
        guard.check(&frame(8, 8, CV_8UC3), "test").unwrap();
    }

    #[test]
    fn empty_frames_are_rejected() {
        let mut guard = ShapeGuard::default();
        assert!(guard.check(&Mat::default(), "test").is_err());
    }
}
