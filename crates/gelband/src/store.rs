//! The mutable results model: bands, lanes and the addressable store.
//!
//! Band slots are a sum type rather than a nullable entry in a resizable
//! list: deleting a band leaves a [`BandSlot::Tombstone`] in place, so the
//! indices of its siblings stay valid for the rest of the session. The one
//! exception is lane-level collapse: tombstoning a lane's last live band
//! removes the whole lane, shifting the indices of subsequent lanes down.

use crate::Rect;

/// Address of a band inside the store: `(lane_index, band_index)`.
pub type BandTag = (usize, usize);

/// One detected or manually added band: a rectangle in image pixel
/// coordinates plus its background-corrected gray integral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Band {
    #[serde(flatten)]
    pub rect: Rect,
    pub integral: u64,
}

impl Band {
    pub fn new(x: i32, y: i32, width: u32, height: u32, integral: u64) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
            integral,
        }
    }
}

/// A band slot: live band or deletion tombstone.
///
/// Serializes as the band object or `null`, matching the nullable-slot shape
/// consumed by display collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum BandSlot {
    Present(Band),
    Tombstone,
}

impl BandSlot {
    pub fn band(&self) -> Option<&Band> {
        match self {
            Self::Present(band) => Some(band),
            Self::Tombstone => None,
        }
    }

    pub fn band_mut(&mut self) -> Option<&mut Band> {
        match self {
            Self::Present(band) => Some(band),
            Self::Tombstone => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Ordered band slots of one lane, top-to-bottom at grouping time.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Lane {
    slots: Vec<BandSlot>,
}

impl Lane {
    pub fn from_bands(bands: Vec<Band>) -> Self {
        Self {
            slots: bands.into_iter().map(BandSlot::Present).collect(),
        }
    }

    pub fn slots(&self) -> &[BandSlot] {
        &self.slots
    }

    /// Live bands with their slot indices, tombstones skipped.
    pub fn live_bands(&self) -> impl Iterator<Item = (usize, &Band)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.band().map(|band| (idx, band)))
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_live()).count()
    }

    /// Union x-extent and lowest bottom edge over the live bands:
    /// `(min_x, max_right, max_bottom)`. `None` when no band is live.
    pub fn live_extent(&self) -> Option<(i32, i32, i32)> {
        let mut extent: Option<(i32, i32, i32)> = None;
        for (_, band) in self.live_bands() {
            let (x0, x1, bottom) = extent.unwrap_or((i32::MAX, i32::MIN, i32::MIN));
            extent = Some((
                x0.min(band.rect.x),
                x1.max(band.rect.right()),
                bottom.max(band.rect.bottom()),
            ));
        }
        extent
    }

    /// Append a band as the lane's new highest slot index.
    pub(crate) fn push(&mut self, band: Band) -> usize {
        self.slots.push(BandSlot::Present(band));
        self.slots.len() - 1
    }
}

/// Outcome of a tombstoning request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TombstoneOutcome {
    /// The tag did not resolve to a live band; nothing changed.
    Stale,
    /// The band was tombstoned; its lane still has live members.
    Tombstoned,
    /// The band was the lane's last live member; the lane was removed.
    LaneRemoved,
}

/// Ordered lanes, addressed externally by [`BandTag`].
///
/// The single source of truth shared between the analysis engine and its
/// display/export collaborators. Replaced wholesale by `analyze`, mutated in
/// place by the session's edit operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ResultsStore {
    lanes: Vec<Lane>,
}

impl ResultsStore {
    pub fn from_lanes(lanes: Vec<Vec<Band>>) -> Self {
        Self {
            lanes: lanes.into_iter().map(Lane::from_bands).collect(),
        }
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    pub fn lane(&self, lane_idx: usize) -> Option<&Lane> {
        self.lanes.get(lane_idx)
    }

    pub fn band(&self, (lane_idx, band_idx): BandTag) -> Option<&Band> {
        self.lanes.get(lane_idx)?.slots.get(band_idx)?.band()
    }

    pub fn live_band_count(&self) -> usize {
        self.lanes.iter().map(Lane::live_count).sum()
    }

    pub(crate) fn lane_mut(&mut self, lane_idx: usize) -> Option<&mut Lane> {
        self.lanes.get_mut(lane_idx)
    }

    pub(crate) fn band_mut(&mut self, (lane_idx, band_idx): BandTag) -> Option<&mut Band> {
        self.lanes.get_mut(lane_idx)?.slots.get_mut(band_idx)?.band_mut()
    }

    /// Tombstone the band at `tag`; collapse the lane when its last live
    /// band goes.
    pub(crate) fn tombstone(&mut self, (lane_idx, band_idx): BandTag) -> TombstoneOutcome {
        let Some(lane) = self.lanes.get_mut(lane_idx) else {
            return TombstoneOutcome::Stale;
        };
        let Some(slot) = lane.slots.get_mut(band_idx) else {
            return TombstoneOutcome::Stale;
        };
        if !slot.is_live() {
            return TombstoneOutcome::Stale;
        }
        *slot = BandSlot::Tombstone;
        if lane.live_count() == 0 {
            self.lanes.remove(lane_idx);
            TombstoneOutcome::LaneRemoved
        } else {
            TombstoneOutcome::Tombstoned
        }
    }
}
