//! Turns a colour table into draw instructions for a horizontal preview strip.
//!
//! Values map linearly onto `[margin, pixel_width - margin]`. Every band is
//! drawn from its own breakpoint to the next one; the last band runs to the
//! right margin.

use crate::config::PreviewLayout;
use crate::models::{ColorTable, Rgb8};
use serde::Serialize;

pub mod raster;

/// Memory bound only. Real step hints stay far below it.
const MAX_TICKS: f64 = 1_000_000.0;
const DEFAULT_TICK_DIVISIONS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillRect { x0: f64, x1: f64, color: Rgb8 },
    GradientColumn { x: f64, color: Rgb8 },
    Tick { x: f64, label: String },
    /// The RF colour, drawn beside the tick row and unrelated to the value scale.
    Swatch { x0: f64, x1: f64, color: Rgb8 },
}

pub fn render(table: &ColorTable, pixel_width: u32) -> Vec<DrawOp> {
    render_with(table, pixel_width, &PreviewLayout::default())
}

pub fn render_with(table: &ColorTable, pixel_width: u32, layout: &PreviewLayout) -> Vec<DrawOp> {
    let bands = table.sorted_bands();
    if bands.len() < 2 {
        return Vec::new();
    }

    let margin = layout.margin;
    let width = (pixel_width as f64 - 2.0 * margin).max(0.0);
    let min_val = bands[0].value();
    let max_val = bands[bands.len() - 1].value();
    let range = max_val - min_val;
    // all breakpoints equal: the last band covers the whole strip
    let color_width = if range == 0.0 { width } else { width / range };
    let x_of = |v: f64| margin + (v - min_val) * color_width;

    let mut ops = Vec::new();
    for (i, band) in bands.iter().enumerate() {
        let x0 = x_of(band.value());
        let x1 = match bands.get(i + 1) {
            Some(next) => x_of(next.value()),
            None => margin + width,
        };

        match band.end_color() {
            Some(end) => {
                let span = x1 - x0;
                let steps = if span > 0.0 { span as usize } else { 1 };
                let start = band.start_color();
                for j in 0..steps {
                    let ratio = j as f64 / steps as f64;
                    ops.push(DrawOp::GradientColumn {
                        x: x0 + j as f64,
                        color: start.lerp(end, ratio),
                    });
                }
            }
            None => ops.push(DrawOp::FillRect {
                x0,
                x1,
                color: band.start_color(),
            }),
        }
    }

    let units = table.units.trim();
    for value in tick_values(min_val, max_val, table.step_value()) {
        let x = if range == 0.0 {
            margin
        } else {
            margin + (value - min_val) * width / range
        };
        ops.push(DrawOp::Tick {
            x,
            label: format!("{} {}", value, units),
        });
    }

    // both ends stay on the strip, so a narrow strip shrinks the swatch
    let swatch = layout.swatch_size as f64;
    let swatch_x1 = (margin + width).clamp(0.0, pixel_width as f64);
    ops.push(DrawOp::Swatch {
        x0: (swatch_x1 - swatch).max(0.0),
        x1: swatch_x1,
        color: table.rf_color,
    });

    ops
}

/// `min, min + step, min + 2*step, ...` up to `max`, closing with `max` itself
/// when the last step falls short of it.
///
/// Without a usable step the range is split into fifths. A step is unusable
/// when it is not positive and finite, or too small to move `min` or `max`
/// at their magnitude.
pub fn tick_values(min_val: f64, max_val: f64, step: Option<f64>) -> Vec<f64> {
    let range = max_val - min_val;
    if range <= 0.0 {
        return vec![min_val];
    }

    let default_step = range / DEFAULT_TICK_DIVISIONS;
    let step = step
        .filter(|s| s.is_finite() && *s > 0.0)
        .filter(|s| min_val + s != min_val && max_val - s != max_val)
        .filter(|s| range / s <= MAX_TICKS)
        .unwrap_or(default_step);

    let mut ticks = Vec::new();
    let mut k = 0usize;
    loop {
        let value = min_val + k as f64 * step;
        if value > max_val {
            break;
        }
        ticks.push(value);
        k += 1;
    }
    if ticks.last().is_some_and(|&last| last < max_val) {
        ticks.push(max_val);
    }
    ticks
}
