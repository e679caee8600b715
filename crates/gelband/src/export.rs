//! CSV export of the results store.
//!
//! One row per lane: a `Group` column (the lane index) followed by one
//! column per band-color index observed across all lanes, labeled through
//! the lazily-defaulting color-name mapping. Cells hold the band's gray
//! integral, or stay empty where a lane has no live band at that index.

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::names::ColorNameMapping;
use crate::store::{BandSlot, ResultsStore};

/// Write the store as CSV.
///
/// Fails with [`Error::NothingToExport`] before touching the writer when no
/// live band exists. Label lookups go through
/// [`ColorNameMapping::get_or_insert_default`], so exporting materializes a
/// default label for every column it emits.
pub fn write_csv<W: Write>(
    store: &ResultsStore,
    names: &mut ColorNameMapping,
    writer: W,
) -> Result<()> {
    if store.live_band_count() == 0 {
        return Err(Error::NothingToExport);
    }
    let columns = store
        .lanes()
        .iter()
        .map(|lane| lane.slots().len())
        .max()
        .unwrap_or(0);

    let mut out = csv::Writer::from_writer(writer);
    let mut header = Vec::with_capacity(columns + 1);
    header.push("Group".to_string());
    for index in 0..columns {
        header.push(names.get_or_insert_default(index as u32).to_string());
    }
    out.write_record(&header)?;

    for (lane_idx, lane) in store.lanes().iter().enumerate() {
        if lane.live_count() == 0 {
            continue;
        }
        let mut row = Vec::with_capacity(columns + 1);
        row.push(lane_idx.to_string());
        for index in 0..columns {
            row.push(match lane.slots().get(index).and_then(BandSlot::band) {
                Some(band) => band.integral.to_string(),
                None => String::new(),
            });
        }
        out.write_record(&row)?;
    }
    out.flush()?;
    Ok(())
}

/// Render the CSV in memory and write it to `path` in one operation, so an
/// I/O failure never leaves a half-written file behind as apparent success.
pub fn export_csv_path(
    store: &ResultsStore,
    names: &mut ColorNameMapping,
    path: &Path,
) -> Result<()> {
    let mut buf = Vec::new();
    write_csv(store, names, &mut buf)?;
    std::fs::write(path, buf)?;
    Ok(())
}
