//! Bar chart with a selectable metric
//!
//! Bars are scaled against the selected metric's target maximum. Switching
//! metric only swaps the target series; the caller keeps animating from the
//! currently displayed values, so bars glide between metrics instead of
//! collapsing to zero first.

use super::format::ValueFormat;
use super::geometry::{bar_height_percent, series_max, Point, Viewport};
use super::line::Tooltip;
use super::surface::{Color, DrawingSurface, Paint, Path, Stroke, TextStyle};

/// Width and height of the box the trend line is laid out in
const TREND_BOX: (f64, f64) = (400.0, 200.0);

/// One selectable metric
#[derive(Debug, Clone, PartialEq)]
pub struct BarMetric {
    pub key: String,
    pub label: String,
    pub color: Color,
    pub format: ValueFormat,
    pub values: Vec<f64>,
}

impl BarMetric {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        color: Color,
        format: ValueFormat,
        values: Vec<f64>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            color,
            format,
            values,
        }
    }

    pub fn max(&self) -> f64 {
        series_max(&self.values)
    }
}

pub struct BarChart {
    metrics: Vec<BarMetric>,
    labels: Vec<String>,
    selected: usize,
    viewport: Viewport,
}

impl BarChart {
    pub fn new(metrics: Vec<BarMetric>, labels: Vec<String>, viewport: Viewport) -> Self {
        Self {
            metrics,
            labels,
            selected: 0,
            viewport,
        }
    }

    pub fn metrics(&self) -> &[BarMetric] {
        &self.metrics
    }

    /// The selected metric, `None` only when the chart has no metrics
    pub fn selected(&self) -> Option<&BarMetric> {
        self.metrics.get(self.selected)
    }

    /// Select a metric by key; returns its target values when the key exists
    pub fn select(&mut self, key: &str) -> Option<Vec<f64>> {
        let index = self.metrics.iter().position(|m| m.key == key)?;
        self.selected = index;
        Some(self.metrics[index].values.clone())
    }

    /// Target values of the selected metric
    pub fn targets(&self) -> Vec<f64> {
        self.selected().map(|m| m.values.clone()).unwrap_or_default()
    }

    /// Bar heights in percent of the selected metric's target maximum
    pub fn bar_heights(&self, displayed: &[f64]) -> Vec<f64> {
        let max = self.selected().map(BarMetric::max).unwrap_or(0.0);
        displayed
            .iter()
            .map(|&v| bar_height_percent(v, max))
            .collect()
    }

    /// Per-bar tooltip text using the selected metric's formatter
    pub fn tooltips(&self, displayed: &[f64]) -> Vec<Tooltip> {
        let format = match self.selected() {
            Some(metric) => metric.format,
            None => return Vec::new(),
        };
        let n = displayed.len().max(1) as f64;
        displayed
            .iter()
            .enumerate()
            .map(|(i, &v)| Tooltip {
                left_percent: (i as f64 + 0.5) / n * 100.0,
                text: format.format(v),
            })
            .collect()
    }

    /// Trend line points inside the 400x200 trend box
    pub fn trend_points(&self, displayed: &[f64]) -> Vec<Point> {
        let max = self.selected().map(BarMetric::max).unwrap_or(0.0);
        let steps = displayed.len().saturating_sub(1).max(1) as f64;
        displayed
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = i as f64 / steps * 350.0 + 25.0;
                let y = 180.0 - bar_height_percent(v, max) / 100.0 * 160.0;
                Point::new(x, y)
            })
            .collect()
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, displayed: &[f64]) {
        surface.clear();

        let metric = match self.selected() {
            Some(metric) => metric,
            None => return,
        };

        let vp = &self.viewport;
        let plot_top = vp.padding;
        let plot_height = vp.inner_height();
        let baseline = vp.baseline();

        let grid = Stroke::new(Color::GRAY_100, 1.0);
        for line in [0.0, 25.0, 50.0, 75.0, 100.0] {
            let y = baseline - line / 100.0 * plot_height;
            let path = Path::new()
                .move_to(Point::new(vp.padding, y))
                .line_to(Point::new(vp.width - vp.padding, y));
            surface.stroke_path(&path, &grid);
        }

        if displayed.is_empty() {
            return;
        }

        let slot = vp.inner_width() / displayed.len() as f64;
        let bar_width = (slot - 8.0).clamp(1.0, 32.0);
        let label_style = TextStyle::new(Color::GRAY_500, 12.0);

        for (i, height) in self.bar_heights(displayed).into_iter().enumerate() {
            let h = height.min(100.0) / 100.0 * plot_height;
            let center_x = vp.padding + slot * (i as f64 + 0.5);
            surface.rect(
                center_x - bar_width / 2.0,
                baseline - h,
                bar_width,
                h,
                6.0,
                &Paint::Solid(metric.color),
            );
            if let Some(label) = self.labels.get(i) {
                surface.text(
                    Point::new(center_x, baseline + 16.0),
                    label,
                    &label_style,
                );
            }
        }

        // Trend box is stretched over the plot area
        let sx = vp.width / TREND_BOX.0;
        let sy = (plot_top + plot_height) / TREND_BOX.1;
        let trend: Vec<Point> = self
            .trend_points(displayed)
            .into_iter()
            .map(|p| Point::new(p.x * sx, p.y * sy))
            .collect();
        let dashed = Stroke::new(metric.color.with_alpha(0x99), 2.0).dashed(&[4.0, 4.0]);
        surface.stroke_path(&Path::polyline(&trend), &dashed);
    }
}

/// The three monthly performance metrics
pub fn performance_metrics() -> Vec<BarMetric> {
    vec![
        BarMetric::new(
            "revenue",
            "Revenue",
            Color::rgb(0x3b, 0x82, 0xf6),
            ValueFormat::CurrencyThousands,
            vec![12000.0, 19000.0, 15000.0, 25000.0, 22000.0, 30000.0, 28000.0, 35000.0],
        ),
        BarMetric::new(
            "users",
            "Active Users",
            Color::rgb(0x10, 0xb9, 0x81),
            ValueFormat::Thousands,
            vec![1200.0, 1900.0, 1500.0, 2500.0, 2200.0, 3000.0, 2800.0, 3500.0],
        ),
        BarMetric::new(
            "engagement",
            "Engagement",
            Color::rgb(0x8b, 0x5c, 0xf6),
            ValueFormat::Percent,
            vec![65.0, 78.0, 82.0, 75.0, 88.0, 92.0, 85.0, 95.0],
        ),
    ]
}

/// Month labels for the performance chart
pub fn performance_months() -> Vec<String> {
    ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}
