//! Synthetic frames and masks for unit tests.

use opencv::core::{CV_8UC1, CV_8UC3, Mat, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

pub fn uniform(rows: i32, cols: i32, value: f64) -> Mat {
    Mat::new_rows_cols_with_default(rows, cols, CV_8UC3, Scalar::all(value)).unwrap()
}

/// Uniform background with a filled white `size`x`size` square at (x, y).
pub fn moving_square(rows: i32, cols: i32, background: f64, x: i32, y: i32, size: i32) -> Mat {
    let mut frame = uniform(rows, cols, background);
    imgproc::rectangle(
        &mut frame,
        Rect::new(x, y, size, size),
        Scalar::all(255.0),
        -1,
        imgproc::LINE_8,
        0,
    )
    .unwrap();
    frame
}

pub fn blank_mask(rows: i32, cols: i32) -> Mat {
    Mat::new_rows_cols_with_default(rows, cols, CV_8UC1, Scalar::all(0.0)).unwrap()
}

pub fn fill_rect(mask: &mut Mat, x: i32, y: i32, width: i32, height: i32) {
    imgproc::rectangle(
        mask,
        Rect::new(x, y, width, height),
        Scalar::all(255.0),
        -1,
        imgproc::LINE_8,
        0,
    )
    .unwrap();
}

pub fn set_pixel(mask: &mut Mat, row: i32, col: i32) {
    *mask.at_2d_mut::<u8>(row, col).unwrap() = 255;
}

pub fn pixel(mask: &Mat, row: i32, col: i32) -> u8 {
    *mask.at_2d::<u8>(row, col).unwrap()
}
