//! Analysis session: owned image state, the results store and its edit
//! operations.
//!
//! A session owns one loaded image at a time together with the background
//! threshold derived from it, the results store and the view transform.
//! Everything runs synchronously on the calling thread; state is replaced
//! wholesale on `load`/`analyze` so observers never see a half-updated
//! lane/band collection.

use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage};

use crate::detect::detect_bands;
use crate::error::{Error, Result};
use crate::integrate::gray_integral;
use crate::lanes::group_into_lanes;
use crate::store::{Band, BandTag, ResultsStore, TombstoneOutcome};
use crate::threshold::estimate_background_threshold;
use crate::view::{ViewTransform, DEFAULT_IMAGE_POSITION_RATIO};
use crate::Rect;

/// Height in image pixels of a manually added band.
pub const DEFAULT_BAND_HEIGHT: u32 = 10;

/// Hook invoked with the full updated results after every mutation.
pub type ChangeHook = Box<dyn FnMut(&ResultsStore)>;

struct LoadedImage {
    color: RgbImage,
    gray: GrayImage,
    /// Derived once per load, never mutated afterwards.
    background_threshold: u8,
}

/// One analysis session: image, threshold, results and view transform.
#[derive(Default)]
pub struct Session {
    image: Option<LoadedImage>,
    store: ResultsStore,
    viewport: Option<(u32, u32)>,
    image_position_ratio: Option<f64>,
    view: ViewTransform,
    on_change: Option<ChangeHook>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the single on-change hook notified after every mutation.
    pub fn set_on_change(&mut self, hook: ChangeHook) {
        self.on_change = Some(hook);
    }

    /// Load a 3-channel color raster from `path`.
    ///
    /// All-or-nothing: a decode failure or a non-3-channel image leaves the
    /// prior image, threshold and results untouched.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let decoded = image::open(path).map_err(|source| Error::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_decoded(decoded)
    }

    /// Install an already-decoded image, with the same all-or-nothing
    /// contract as [`Session::load`].
    pub fn load_decoded(&mut self, decoded: DynamicImage) -> Result<()> {
        let channels = decoded.color().channel_count();
        if channels != 3 {
            return Err(Error::ChannelCount { channels });
        }
        let color = decoded.to_rgb8();
        let gray = decoded.to_luma8();
        let background_threshold = estimate_background_threshold(&gray);
        tracing::info!(
            "image installed: {}x{}, background threshold {}",
            color.width(),
            color.height(),
            background_threshold,
        );
        self.image = Some(LoadedImage {
            color,
            gray,
            background_threshold,
        });
        self.refresh_view();
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.image.is_some()
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.color.dimensions())
    }

    pub fn color_image(&self) -> Option<&RgbImage> {
        self.image.as_ref().map(|img| &img.color)
    }

    pub fn gray_image(&self) -> Option<&GrayImage> {
        self.image.as_ref().map(|img| &img.gray)
    }

    pub fn background_threshold(&self) -> Option<u8> {
        self.image.as_ref().map(|img| img.background_threshold)
    }

    pub fn results(&self) -> &ResultsStore {
        &self.store
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    /// Record the viewport size and recompute the view transform.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        self.refresh_view();
    }

    /// Configure the vertical placement of the fitted image (0 flush top,
    /// 1 flush bottom) and recompute the view transform.
    pub fn set_image_position_ratio(&mut self, ratio: f64) {
        self.image_position_ratio = Some(ratio);
        self.refresh_view();
    }

    /// Run detection and grouping, replacing the entire results store.
    ///
    /// Zero detected bands is a valid, representable empty result.
    pub fn analyze(&mut self) -> Result<&ResultsStore> {
        let img = self.image.as_ref().ok_or(Error::NoImage)?;
        let bands = detect_bands(&img.gray, img.background_threshold);
        let lanes = group_into_lanes(bands);
        tracing::info!(
            "analysis: {} bands in {} lanes",
            lanes.iter().map(Vec::len).sum::<usize>(),
            lanes.len(),
        );
        self.store = ResultsStore::from_lanes(lanes);
        self.refresh_view();
        self.notify();
        Ok(&self.store)
    }

    /// Apply an interactive move/resize of the band at `tag`.
    ///
    /// `window_rect` is transformed to image space, the gray integral is
    /// recomputed over the new region, and the band is overwritten in place.
    /// Returns the new integral, or `None` (silently, without notification)
    /// when `tag` does not resolve to a live band.
    pub fn band_changed(&mut self, tag: BandTag, window_rect: Rect) -> Option<u64> {
        let img = self.image.as_ref()?;
        let roi = self.view.window_rect_to_image(window_rect);
        let integral = gray_integral(&img.gray, img.background_threshold, roi);

        let band = self.store.band_mut(tag)?;
        let old = band.integral;
        *band = Band {
            rect: roi,
            integral,
        };
        tracing::debug!("band {tag:?}: integral {old} -> {integral}");
        self.notify();
        Some(integral)
    }

    /// Append a new band to lane `lane_idx`.
    ///
    /// The band spans the union x-extent of the lane's live bands, sits
    /// immediately below the lane's lowest band with a fixed default height,
    /// and gets its integral populated immediately from the pixels it
    /// covers. A lane with no live bands to derive an extent from is an
    /// explicit error, as is an unknown lane index.
    pub fn add_band(&mut self, lane_idx: usize) -> Result<BandTag> {
        let img = self.image.as_ref().ok_or(Error::NoImage)?;
        let lane = self
            .store
            .lane_mut(lane_idx)
            .ok_or(Error::EmptyLane { lane: lane_idx })?;
        let (x0, x1, bottom) = lane
            .live_extent()
            .ok_or(Error::EmptyLane { lane: lane_idx })?;

        let rect = Rect::new(x0, bottom, (x1 - x0) as u32, DEFAULT_BAND_HEIGHT);
        let integral = gray_integral(&img.gray, img.background_threshold, rect);
        let band_idx = lane.push(Band { rect, integral });
        tracing::debug!("band added at ({lane_idx}, {band_idx}): {rect:?}");
        self.notify();
        Ok((lane_idx, band_idx))
    }

    /// Tombstone the band at `tag`; collapse its lane when the last live
    /// band goes.
    ///
    /// Lane indices held by callers for lanes after a collapsed one are
    /// stale after this returns. A stale `tag` is a silent no-op.
    pub fn delete_band(&mut self, tag: BandTag) {
        match self.store.tombstone(tag) {
            TombstoneOutcome::Stale => {}
            TombstoneOutcome::Tombstoned => {
                tracing::debug!("band {tag:?} tombstoned");
                self.notify();
            }
            TombstoneOutcome::LaneRemoved => {
                tracing::debug!("band {tag:?} tombstoned, lane {} collapsed", tag.0);
                self.notify();
            }
        }
    }

    fn refresh_view(&mut self) {
        let (Some(image_size), Some(viewport)) = (self.image_size(), self.viewport) else {
            return;
        };
        let ratio = self
            .image_position_ratio
            .unwrap_or(DEFAULT_IMAGE_POSITION_RATIO);
        self.view = ViewTransform::fit(image_size, viewport, ratio);
    }

    fn notify(&mut self) {
        let Self {
            store, on_change, ..
        } = self;
        if let Some(hook) = on_change {
            hook(store);
        }
    }
}
