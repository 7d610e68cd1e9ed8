//! Line chart rendering for the weekly report.
//!
//! The chart is a pure function of the aggregated series: fixed canvas,
//! fixed colors, fixed marker and grid styling. Text is stamped from an
//! embedded 5x7 glyph set so rendering never depends on system fonts.

use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgba, RgbaImage};
use log::info;

use crate::aggregate::AggregatedSeries;
use crate::report::payload::DATE_LABEL_FORMAT;

const CHART_WIDTH: u32 = 1200;
const CHART_HEIGHT: u32 = 600;

const MARGIN_LEFT: i32 = 80;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 80;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const LINE_COLOR: Rgba<u8> = Rgba([31, 119, 180, 255]);
const AXIS_COLOR: Rgba<u8> = Rgba([60, 60, 60, 255]);
const GRID_COLOR: Rgba<u8> = Rgba([210, 210, 210, 255]);
const TEXT_COLOR: Rgba<u8> = Rgba([40, 40, 40, 255]);

const LINE_WIDTH: i32 = 2;
const MARKER_RADIUS: i32 = 5;
const GLYPH_SCALE: i32 = 2;

/// Y range falls back to this when the series is empty or all zero.
const DEFAULT_Y_MAX: u32 = 5;

/// Upper bound of the y axis: one above the tallest bucket, or the
/// default range when there is nothing to show.
pub fn y_axis_max(series: &AggregatedSeries) -> u32 {
    let max = series.max_count();
    if max > 0 {
        max + 1
    } else {
        DEFAULT_Y_MAX
    }
}

/// Render the weekly series as a line chart.
///
/// An empty series still renders: axes, grid and the default y range with
/// no line, so the published image is always fresh.
pub fn render_chart(series: &AggregatedSeries) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(CHART_WIDTH, CHART_HEIGHT, BACKGROUND);

    let left = MARGIN_LEFT;
    let right = CHART_WIDTH as i32 - MARGIN_RIGHT;
    let top = MARGIN_TOP;
    let bottom = CHART_HEIGHT as i32 - MARGIN_BOTTOM;

    let y_max = y_axis_max(series);

    // Integer ticks with dashed gridlines, labelled along the left edge.
    for tick in 0..=y_max {
        let y = map_y(tick, y_max, top, bottom);
        if tick > 0 {
            draw_dashed_hline(&mut img, y, left, right, GRID_COLOR);
        }
        let label = tick.to_string();
        let label_w = text_width(&label, GLYPH_SCALE);
        draw_text(
            &mut img,
            &label,
            left - 10 - label_w,
            y - glyph_height(GLYPH_SCALE) / 2,
            GLYPH_SCALE,
            TEXT_COLOR,
        );
    }

    // Axes.
    draw_segment(&mut img, left, top, left, bottom, AXIS_COLOR, LINE_WIDTH);
    draw_segment(&mut img, left, bottom, right, bottom, AXIS_COLOR, LINE_WIDTH);

    let points: Vec<(i32, i32)> = series
        .iter()
        .enumerate()
        .map(|(i, bucket)| {
            (
                map_x(i, series.len(), left, right),
                map_y(bucket.full_count.min(y_max), y_max, top, bottom),
            )
        })
        .collect();

    // Connecting line first, markers and annotations on top.
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_segment(&mut img, x0, y0, x1, y1, LINE_COLOR, LINE_WIDTH);
    }

    for (point, bucket) in points.iter().zip(series.iter()) {
        let (x, y) = *point;
        fill_circle(&mut img, x, y, MARKER_RADIUS, LINE_COLOR);

        let value = bucket.full_count.to_string();
        draw_text(
            &mut img,
            &value,
            x - text_width(&value, GLYPH_SCALE) / 2,
            y - MARKER_RADIUS - glyph_height(GLYPH_SCALE) - 6,
            GLYPH_SCALE,
            TEXT_COLOR,
        );

        let label = bucket.date.format(DATE_LABEL_FORMAT).to_string();
        draw_text(
            &mut img,
            &label,
            x - text_width(&label, GLYPH_SCALE) / 2,
            bottom + 12,
            GLYPH_SCALE,
            TEXT_COLOR,
        );
    }

    img
}

/// Render the chart and write it as a PNG artifact.
pub fn write_chart_png(series: &AggregatedSeries, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create chart directory {}", parent.display())
            })?;
        }
    }

    let img = render_chart(series);
    img.save(path)
        .with_context(|| format!("failed to write chart to {}", path.display()))?;

    info!("Chart written to {}", path.display());
    Ok(())
}

fn map_x(index: usize, len: usize, left: i32, right: i32) -> i32 {
    if len <= 1 {
        return (left + right) / 2;
    }
    let span = (right - left) as i64;
    left + (span * index as i64 / (len as i64 - 1)) as i32
}

fn map_y(value: u32, y_max: u32, top: i32, bottom: i32) -> i32 {
    let span = (bottom - top) as i64;
    bottom - (span * i64::from(value) / i64::from(y_max.max(1))) as i32
}

fn put(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

// Bresenham with a square pen of the given width.
fn draw_segment(img: &mut RgbaImage, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba<u8>, width: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        for ox in 0..width {
            for oy in 0..width {
                put(img, x + ox, y + oy, color);
            }
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

fn draw_dashed_hline(img: &mut RgbaImage, y: i32, x0: i32, x1: i32, color: Rgba<u8>) {
    const DASH_ON: i32 = 8;
    const DASH_OFF: i32 = 6;

    let mut x = x0;
    while x < x1 {
        let end = (x + DASH_ON).min(x1);
        for px in x..end {
            put(img, px, y, color);
        }
        x += DASH_ON + DASH_OFF;
    }
}

fn fill_circle(img: &mut RgbaImage, cx: i32, cy: i32, radius: i32, color: Rgba<u8>) {
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            if ox * ox + oy * oy <= radius * radius {
                put(img, cx + ox, cy + oy, color);
            }
        }
    }
}

// 5x7 bitmaps, one row per byte, low 5 bits used.
fn glyph(ch: char) -> Option<[u8; 7]> {
    let rows = match ch {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        _ => return None,
    };
    Some(rows)
}

fn glyph_height(scale: i32) -> i32 {
    7 * scale
}

fn glyph_advance(scale: i32) -> i32 {
    6 * scale
}

pub fn text_width(text: &str, scale: i32) -> i32 {
    text.chars().count() as i32 * glyph_advance(scale) - scale
}

fn draw_text(img: &mut RgbaImage, text: &str, x: i32, y: i32, scale: i32, color: Rgba<u8>) {
    let mut cursor = x;
    for ch in text.chars() {
        if let Some(rows) = glyph(ch) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..5i32 {
                    if (bits >> (4 - col)) & 1 != 0 {
                        for oy in 0..scale {
                            for ox in 0..scale {
                                put(
                                    img,
                                    cursor + col * scale + ox,
                                    y + row as i32 * scale + oy,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
        cursor += glyph_advance(scale);
    }
}
