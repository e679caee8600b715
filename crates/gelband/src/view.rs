//! Window ↔ image coordinate transform under fit-to-viewport scaling.
//!
//! Interactive edits arrive in on-screen (window) coordinates while all
//! measurements happen in image pixels; this transform keeps the two
//! consistent under arbitrary view scaling. Both mappings truncate to
//! integers, so a round trip is exact only up to truncation error; tests
//! assert the error bound rather than exact equality.

use crate::Rect;

/// Fraction of the spare vertical space placed above the image:
/// 0 pins the image to the top of the viewport, 1 to the bottom,
/// 0.5 centers it.
pub const DEFAULT_IMAGE_POSITION_RATIO: f64 = 0.5;

/// Uniform scale plus offset mapping image pixels onto the viewport.
///
/// Recomputed whenever the viewport or the loaded image changes; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale_factor: f64,
    pub offset: (i32, i32),
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewTransform {
    pub fn identity() -> Self {
        Self {
            scale_factor: 1.0,
            offset: (0, 0),
        }
    }

    /// Fit `image` into `viewport`, preserving aspect ratio.
    ///
    /// The scaled image is centered horizontally; its vertical placement is
    /// governed by `image_position_ratio` (clamped to [0, 1]). Degenerate
    /// image or viewport dimensions yield the identity transform.
    pub fn fit(image: (u32, u32), viewport: (u32, u32), image_position_ratio: f64) -> Self {
        let (img_w, img_h) = image;
        let (view_w, view_h) = viewport;
        if img_w == 0 || img_h == 0 || view_w == 0 || view_h == 0 {
            return Self::identity();
        }

        let scale = (view_w as f64 / img_w as f64).min(view_h as f64 / img_h as f64);
        let scaled_w = (img_w as f64 * scale) as i32;
        let scaled_h = (img_h as f64 * scale) as i32;
        let ratio = image_position_ratio.clamp(0.0, 1.0);
        Self {
            scale_factor: scale,
            offset: (
                (view_w as i32 - scaled_w) / 2,
                ((view_h as i32 - scaled_h) as f64 * ratio) as i32,
            ),
        }
    }

    pub fn window_to_image(&self, wx: i32, wy: i32) -> (i32, i32) {
        (
            ((wx - self.offset.0) as f64 / self.scale_factor) as i32,
            ((wy - self.offset.1) as f64 / self.scale_factor) as i32,
        )
    }

    pub fn image_to_window(&self, ix: i32, iy: i32) -> (i32, i32) {
        (
            (ix as f64 * self.scale_factor + self.offset.0 as f64) as i32,
            (iy as f64 * self.scale_factor + self.offset.1 as f64) as i32,
        )
    }

    /// Map a window-space rectangle to image space, scaling its extent.
    pub fn window_rect_to_image(&self, rect: Rect) -> Rect {
        let (x, y) = self.window_to_image(rect.x, rect.y);
        Rect {
            x,
            y,
            width: (rect.width as f64 / self.scale_factor) as u32,
            height: (rect.height as f64 / self.scale_factor) as u32,
        }
    }

    /// Map an image-space rectangle to window space, scaling its extent.
    pub fn image_rect_to_window(&self, rect: Rect) -> Rect {
        let (x, y) = self.image_to_window(rect.x, rect.y);
        Rect {
            x,
            y,
            width: (rect.width as f64 * self.scale_factor) as u32,
            height: (rect.height as f64 * self.scale_factor) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fit_centers_a_wide_image() {
        let view = ViewTransform::fit((200, 100), (640, 480), DEFAULT_IMAGE_POSITION_RATIO);
        assert_relative_eq!(view.scale_factor, 3.2);
        // 200 * 3.2 = 640 wide: flush left/right, centered vertically.
        assert_eq!(view.offset, (0, (480 - 320) / 2));
    }

    #[test]
    fn position_ratio_biases_vertical_placement() {
        let top = ViewTransform::fit((200, 100), (640, 480), 0.0);
        let bottom = ViewTransform::fit((200, 100), (640, 480), 1.0);
        assert_eq!(top.offset.1, 0);
        assert_eq!(bottom.offset.1, 480 - 320);
    }

    #[test]
    fn degenerate_dimensions_fall_back_to_identity() {
        assert_eq!(
            ViewTransform::fit((0, 100), (640, 480), 0.5),
            ViewTransform::identity()
        );
        assert_eq!(
            ViewTransform::fit((200, 100), (640, 0), 0.5),
            ViewTransform::identity()
        );
    }

    #[test]
    fn round_trip_is_within_one_pixel_when_downscaling() {
        // Downscaled display (image larger than viewport) is the common
        // regime; truncation error stays within ±1 window pixel.
        for (img, viewport) in [
            ((2000u32, 1500u32), (640u32, 480u32)),
            ((1024, 768), (800, 600)),
            ((997, 311), (512, 512)),
        ] {
            let view = ViewTransform::fit(img, viewport, DEFAULT_IMAGE_POSITION_RATIO);
            assert!(view.scale_factor <= 1.0);
            for wx in (0..viewport.0 as i32).step_by(7) {
                for wy in (0..viewport.1 as i32).step_by(7) {
                    let (ix, iy) = view.window_to_image(wx, wy);
                    let (bx, by) = view.image_to_window(ix, iy);
                    assert!((bx - wx).abs() <= 1, "x: {wx} -> {ix} -> {bx}");
                    assert!((by - wy).abs() <= 1, "y: {wy} -> {iy} -> {by}");
                }
            }
        }
    }

    #[test]
    fn round_trip_is_within_one_image_pixel_when_upscaling() {
        // Magnified display: truncation costs up to one IMAGE pixel, which
        // spans `scale_factor` window pixels.
        let view = ViewTransform::fit((100, 50), (640, 480), DEFAULT_IMAGE_POSITION_RATIO);
        assert!(view.scale_factor > 1.0);
        let tolerance = view.scale_factor.ceil() as i32;
        for wx in (0..640).step_by(13) {
            for wy in (0..480).step_by(13) {
                let (ix, iy) = view.window_to_image(wx, wy);
                let (bx, by) = view.image_to_window(ix, iy);
                assert!((bx - wx).abs() <= tolerance);
                assert!((by - wy).abs() <= tolerance);
            }
        }
    }

    #[test]
    fn rect_mappings_scale_extent() {
        let view = ViewTransform {
            scale_factor: 0.5,
            offset: (10, 20),
        };
        let img = view.window_rect_to_image(Rect::new(30, 40, 50, 10));
        assert_eq!(img, Rect::new(40, 40, 100, 20));
        let win = view.image_rect_to_window(img);
        assert_eq!(win, Rect::new(30, 40, 50, 10));
    }
}
