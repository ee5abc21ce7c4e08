//! Off-screen histogram rendering. Builds the whole chart in an RGBA buffer
//! and writes it out once; nothing ever reads the file back.

use crate::services::analysis::Bucket;
use image::{Rgba, RgbaImage};
use std::path::Path;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 600;
const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 40;
const TICK_LEN: u32 = 6;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const AXIS: Rgba<u8> = Rgba([40, 40, 40, 255]);
const GRID: Rgba<u8> = Rgba([225, 225, 225, 255]);
const BAR: Rgba<u8> = Rgba([70, 110, 180, 255]);

pub fn render_histogram(buckets: &[Bucket], path: &Path) -> anyhow::Result<()> {
    let mut img = RgbaImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);

    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let baseline = MARGIN_TOP + plot_h;
    let max_count = buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);

    // Horizontal gridlines at whole counts; thin the set out when tall.
    let step = (max_count as f64 / 10.0).ceil() as usize;
    let mut level = step;
    while level <= max_count {
        let y = baseline - scale(level, max_count, plot_h);
        fill_rect(&mut img, MARGIN_LEFT, y, plot_w, 1, GRID);
        level += step;
    }

    // Bars: each bucket gets an equal slot, the bar fills 70% of it. Slot
    // centers double as the axis tick positions, one per bucket, so a year
    // axis only ever gets ticks at whole years.
    let slot = plot_w as f64 / buckets.len() as f64;
    for (i, bucket) in buckets.iter().enumerate() {
        let bar_w = (slot * 0.7).max(1.0) as u32;
        let x0 = MARGIN_LEFT + (i as f64 * slot + slot * 0.15) as u32;
        let bar_h = scale(bucket.count, max_count, plot_h);
        if bar_h > 0 {
            fill_rect(&mut img, x0, baseline - bar_h, bar_w, bar_h, BAR);
        }
        let tick_x = MARGIN_LEFT + (i as f64 * slot + slot / 2.0) as u32;
        fill_rect(&mut img, tick_x, baseline, 1, TICK_LEN, AXIS);
    }

    // Axes last so they sit on top of bars and gridlines.
    fill_rect(&mut img, MARGIN_LEFT, baseline, plot_w, 1, AXIS);
    fill_rect(&mut img, MARGIN_LEFT, MARGIN_TOP, 1, plot_h + 1, AXIS);

    img.save(path)?;
    Ok(())
}

fn scale(count: usize, max_count: usize, plot_h: u32) -> u32 {
    ((count as f64 / max_count as f64) * plot_h as f64) as u32
}

fn fill_rect(img: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Rgba<u8>) {
    for px in x..(x + w).min(WIDTH) {
        for py in y..(y + h).min(HEIGHT) {
            img.put_pixel(px, py, color);
        }
    }
}
