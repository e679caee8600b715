use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::GrayImage;

use gelband::{detect_bands, estimate_background_threshold, group_into_lanes};

/// Synthetic gel: deterministic sinusoidal background texture with a grid of
/// dark bands, `lanes` across and `rows` deep.
fn make_gel_fixture(width: u32, height: u32, lanes: u32, rows: u32) -> GrayImage {
    let mut img = GrayImage::new(width, height);
    let buf = img.as_mut();

    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) as usize;
            let v = 205.0
                + 12.0 * ((x as f32 * 0.009).sin() + (y as f32 * 0.013).cos())
                + 5.0 * ((x as f32 * 0.023 + y as f32 * 0.019).sin());
            buf[idx] = v.clamp(0.0, 255.0) as u8;
        }
    }

    let pitch_x = width as f32 / (lanes as f32 + 1.0);
    let pitch_y = height as f32 / (rows as f32 + 1.0);
    let band_w = (pitch_x * 0.55) as u32;
    let band_h = (pitch_y * 0.25).max(6.0) as u32;

    for r in 0..rows {
        for l in 0..lanes {
            let cx = (pitch_x * (l as f32 + 1.0)) as u32;
            let cy = (pitch_y * (r as f32 + 1.0)) as u32;
            let x0 = cx.saturating_sub(band_w / 2);
            let y0 = cy.saturating_sub(band_h / 2);
            for y in y0..(y0 + band_h).min(height) {
                for x in x0..(x0 + band_w).min(width) {
                    buf[(y * width + x) as usize] = 52;
                }
            }
        }
    }

    img
}

fn bench_detect(c: &mut Criterion) {
    let img_small = make_gel_fixture(640, 480, 8, 6);
    let img_large = make_gel_fixture(1280, 1024, 12, 8);
    let thr_small = estimate_background_threshold(&img_small);
    let thr_large = estimate_background_threshold(&img_large);

    c.bench_function("detect_640x480", |b| {
        b.iter(|| {
            let bands = detect_bands(black_box(&img_small), black_box(thr_small));
            black_box(bands.len())
        })
    });

    c.bench_function("detect_1280x1024", |b| {
        b.iter(|| {
            let bands = detect_bands(black_box(&img_large), black_box(thr_large));
            black_box(bands.len())
        })
    });
}

fn bench_group(c: &mut Criterion) {
    let img = make_gel_fixture(1280, 1024, 12, 8);
    let thr = estimate_background_threshold(&img);
    let bands = detect_bands(&img, thr);

    c.bench_function("group_into_lanes_96bands", |b| {
        b.iter(|| {
            let lanes = group_into_lanes(black_box(bands.clone()));
            black_box(lanes.len())
        })
    });
}

criterion_group!(hotpaths, bench_detect, bench_group);
criterion_main!(hotpaths);
