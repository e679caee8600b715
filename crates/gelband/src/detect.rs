//! Band detection: smooth → Otsu binarize → open → external contours.
//!
//! The Otsu mask is used for shape detection only; the authoritative
//! intensity measure re-thresholds the original grayscale ROI at the
//! session's background threshold (see [`crate::integrate`]), decoupled from
//! the coarse mask.

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};
use imageproc::contrast::{otsu_level, threshold, ThresholdType};
use imageproc::distance_transform::Norm;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::open;
use imageproc::point::Point;

use crate::integrate::gray_integral;
use crate::store::Band;
use crate::Rect;

// Fixed detection policy, not tunable at runtime.
//
// Sigma is what a 5-tap Gaussian kernel implies: 0.3 * ((5 - 1) * 0.5 - 1) + 0.8.
const GAUSSIAN_SIGMA: f32 = 1.1;
// LInf radius 2 == two passes of a 3x3 structuring element.
const OPENING_RADIUS: u8 = 2;

/// Detect band rectangles in a grayscale gel photograph.
///
/// Pipeline: 5×5 Gaussian smoothing against sensor noise, inverse-binary
/// Otsu thresholding (dark bands become foreground), morphological opening
/// to drop speckle and separate touching artifacts, then external-only
/// contours reduced to their axis-aligned bounding rectangles. Each
/// rectangle's gray integral is computed from the ORIGINAL grayscale pixels
/// at `background_threshold`.
///
/// An image with no detectable contours yields an empty list, not an error.
pub fn detect_bands(gray: &GrayImage, background_threshold: u8) -> Vec<Band> {
    let blurred = gaussian_blur_f32(gray, GAUSSIAN_SIGMA);
    let level = otsu_level(&blurred);
    let mask = threshold(&blurred, level, ThresholdType::BinaryInverted);
    let opened = open(&mask, Norm::LInf, OPENING_RADIUS);

    let contours: Vec<Contour<i32>> = find_contours(&opened);
    let mut bands = Vec::new();
    for contour in &contours {
        // External contours only; holes carry a parent index.
        if contour.parent.is_some() {
            continue;
        }
        let Some(rect) = bounding_rect(&contour.points) else {
            continue;
        };
        let integral = gray_integral(gray, background_threshold, rect);
        bands.push(Band { rect, integral });
    }

    tracing::debug!(
        "otsu level {}, {} of {} contours external",
        level,
        bands.len(),
        contours.len(),
    );
    bands
}

fn bounding_rect(points: &[Point<i32>]) -> Option<Rect> {
    let first = points.first()?;
    let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
    for p in points {
        x0 = x0.min(p.x);
        y0 = y0.min(p.y);
        x1 = x1.max(p.x);
        y1 = y1.max(p.y);
    }
    Some(Rect::new(x0, y0, (x1 - x0 + 1) as u32, (y1 - y0 + 1) as u32))
}
