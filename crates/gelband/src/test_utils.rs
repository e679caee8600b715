//! Shared test utilities for image-based unit tests.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};

use crate::Rect;

/// Render a synthetic gel photograph: uniform `bg_pix` background with
/// rectangular bands filled at `band_pix`.
pub(crate) fn draw_gel_image(w: u32, h: u32, bg_pix: u8, band_pix: u8, bands: &[Rect]) -> GrayImage {
    let mut img = GrayImage::from_pixel(w, h, Luma([bg_pix]));
    for rect in bands {
        for y in rect.y.max(0)..rect.bottom().min(h as i32) {
            for x in rect.x.max(0)..rect.right().min(w as i32) {
                img.put_pixel(x as u32, y as u32, Luma([band_pix]));
            }
        }
    }
    img
}

/// Same synthetic gel as a 3-channel color image, for session `load` paths.
///
/// Channels are replicated, so the derived grayscale equals the input.
pub(crate) fn draw_gel_color_image(
    w: u32,
    h: u32,
    bg_pix: u8,
    band_pix: u8,
    bands: &[Rect],
) -> DynamicImage {
    let gray = draw_gel_image(w, h, bg_pix, band_pix, bands);
    let mut rgb = RgbImage::new(w, h);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let v = pixel[0];
        rgb.put_pixel(x, y, Rgb([v, v, v]));
    }
    DynamicImage::ImageRgb8(rgb)
}
