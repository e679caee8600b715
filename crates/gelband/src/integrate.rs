//! Background-corrected gray integral over a rectangular region.

use image::GrayImage;

use crate::Rect;

/// Count of ROI pixels strictly darker than `background_threshold`.
///
/// This is the binary-mask sum used as the authoritative intensity measure:
/// pixels with intensity below the threshold count as foreground (band), the
/// rest as background. The ROI is clipped to the image bounds; a region fully
/// outside the image integrates to 0.
pub fn gray_integral(gray: &GrayImage, background_threshold: u8, roi: Rect) -> u64 {
    let (w, h) = gray.dimensions();
    let x0 = roi.x.clamp(0, w as i32) as u32;
    let y0 = roi.y.clamp(0, h as i32) as u32;
    let x1 = roi.right().clamp(0, w as i32) as u32;
    let y1 = roi.bottom().clamp(0, h as i32) as u32;

    let mut sum = 0u64;
    for y in y0..y1 {
        for x in x0..x1 {
            if gray.get_pixel(x, y)[0] < background_threshold {
                sum += 1;
            }
        }
    }
    sum
}
