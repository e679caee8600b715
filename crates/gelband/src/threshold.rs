//! Background threshold estimation from the intensity histogram.

use image::GrayImage;

/// Offset subtracted from the dominant histogram peak: `round(0.10 * 256)`.
const PEAK_OFFSET: u8 = 26;

/// 256-bin intensity histogram of a grayscale image.
pub fn intensity_histogram(gray: &GrayImage) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for pixel in gray.pixels() {
        hist[pixel[0] as usize] += 1;
    }
    hist
}

/// Estimate the grayscale cutoff separating band pixels from substrate
/// background.
///
/// Background dominates band area in gel photographs, so the histogram's
/// highest bin is the dominant background shade. Bands are darker than that
/// shade, and a cutoff offset into the peak's lower tail separates band
/// signal from background noise without manual tuning.
///
/// Deterministic given the image; ties between equally-tall bins resolve to
/// the lowest intensity.
pub fn estimate_background_threshold(gray: &GrayImage) -> u8 {
    let hist = intensity_histogram(gray);
    let mut peak = 0usize;
    for (bin, &count) in hist.iter().enumerate() {
        if count > hist[peak] {
            peak = bin;
        }
    }
    (peak as u8).saturating_sub(PEAK_OFFSET)
}
