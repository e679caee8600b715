use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the analysis engine and its export surfaces.
///
/// Stale `(lane, band)` tags are deliberately not represented here: edits
/// referencing a dead band are silent no-ops, since they can arise benignly
/// from UI event ordering.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unsupported image format: expected 3 color channels, got {channels}")]
    ChannelCount { channels: u8 },

    #[error("no image loaded")]
    NoImage,

    #[error("lane {lane} has no live bands to derive an extent from")]
    EmptyLane { lane: usize },

    #[error("nothing to export")]
    NothingToExport,

    #[error("invalid color-name config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
