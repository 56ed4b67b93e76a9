use opencv::core::{Mat, hconcat2};
use opencv::prelude::*;

use crate::error::{HarnessError, Result};

/// Places `left` in the first columns and `right` after it.
pub fn side_by_side(left: &Mat, right: &Mat) -> Result<Mat> {
    if left.rows() != right.rows() {
        return Err(HarnessError::DimensionMismatch(format!(
            "cannot compose masks with {} and {} rows",
            left.rows(),
            right.rows()
        )));
    }
    if left.typ() != right.typ() {
        return Err(HarnessError::DimensionMismatch(format!(
            "cannot compose masks of type {} and {}",
            left.typ(),
            right.typ()
        )));
    }
    let mut composite = Mat::default();
    hconcat2(left, right, &mut composite)?;
    Ok(composite)
}
