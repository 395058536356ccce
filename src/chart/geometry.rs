//! Geometry Mapper
//!
//! Converts numeric series into device coordinates: line points, bar heights
//! and pie-arc endpoints. Canvas y grows downward, so values are mapped
//! inverted onto the vertical axis.

use serde::{Deserialize, Serialize};

/// A point in device (pixel) space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel viewport with a uniform padding on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }

    /// Drawable width inside the padding (never negative)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.padding * 2.0).max(0.0)
    }

    /// Drawable height inside the padding (never negative)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.padding * 2.0).max(0.0)
    }

    /// y coordinate of the chart baseline
    pub fn baseline(&self) -> f64 {
        self.padding + self.inner_height()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(400.0, 200.0, 20.0)
    }
}

/// Minimum and maximum of a series, with the range guarded against zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Compute the range of `values`, `None` for an empty slice
    pub fn of(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self { min, max })
    }

    /// `max - min`, falling back to 1 when all values are equal
    pub fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 || !span.is_finite() {
            1.0
        } else {
            span
        }
    }
}

/// Map an ordered series onto line-chart points inside `viewport`.
///
/// Index `i` maps linearly to `[padding, width - padding]`, value maps
/// inverted to `[padding, height - padding]`. A single point sits at the
/// left padding edge.
pub fn map_line_points(values: &[f64], viewport: &Viewport) -> Vec<Point> {
    let range = match ValueRange::of(values) {
        Some(range) => range,
        None => return Vec::new(),
    };

    let chart_width = viewport.inner_width();
    let chart_height = viewport.inner_height();
    let span = range.span();
    let steps = values.len().saturating_sub(1).max(1) as f64;

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = viewport.padding + (i as f64 / steps) * chart_width;
            let t = ((value - range.min) / span).clamp(0.0, 1.0);
            let y = viewport.padding + chart_height - t * chart_height;
            Point::new(x, y)
        })
        .collect()
}

/// Bar height as a percentage of the series maximum (0 when max <= 0)
pub fn bar_height_percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || !max.is_finite() {
        return 0.0;
    }
    (value / max * 100.0).max(0.0)
}

/// Largest value in a series, 0 for an empty series
pub fn series_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

/// Point on a circle for an angle in degrees. 0° is 3 o'clock and angles
/// grow clockwise (y points down), so -90° is 12 o'clock.
pub fn polar_to_cartesian(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> Point {
    let radians = angle_deg.to_radians();
    Point::new(cx + radius * radians.cos(), cy + radius * radians.sin())
}
