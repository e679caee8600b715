//! gelband — band intensity analysis for gel electrophoresis photographs.
//!
//! The pipeline stages are:
//!
//! 1. **Threshold** – background cutoff estimation from the image's own
//!    intensity histogram.
//! 2. **Detect** – smooth, Otsu-binarize, morphologically open, extract
//!    external contours as axis-aligned band rectangles.
//! 3. **Lanes** – group band rectangles into lanes by horizontal overlap.
//! 4. **Integrate** – background-corrected gray integral per band region.
//! 5. **Session** – the mutable results store addressed by `(lane, band)`
//!    tags, with move/resize/add/delete edits re-integrated live through the
//!    window ↔ image coordinate transform.
//!
//! Rendering, widgets and file dialogs are collaborator concerns; the crate
//! exposes the analysis engine plus the CSV and color-name config surfaces
//! those collaborators consume.

mod detect;
mod error;
mod export;
mod integrate;
mod lanes;
mod names;
mod session;
mod store;
mod threshold;
mod view;

#[cfg(test)]
mod test_utils;

pub use detect::detect_bands;
pub use error::{Error, Result};
pub use export::{export_csv_path, write_csv};
pub use integrate::gray_integral;
pub use lanes::group_into_lanes;
pub use names::ColorNameMapping;
pub use session::{ChangeHook, Session, DEFAULT_BAND_HEIGHT};
pub use store::{Band, BandSlot, BandTag, Lane, ResultsStore};
pub use threshold::{estimate_background_threshold, intensity_histogram};
pub use view::{ViewTransform, DEFAULT_IMAGE_POSITION_RATIO};

/// Axis-aligned rectangle in pixel coordinates (image or window space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right-most column covered by the rectangle.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// One past the bottom-most row covered by the rectangle.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }
}
