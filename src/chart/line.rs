//! Line Chart Renderer
//!
//! Animated line + gradient + point chart. The reveal progress decides how
//! much of the mapped polyline is drawn on each frame, producing the
//! "drawing itself in" effect.

use super::dataset::ChartDataset;
use super::geometry::{map_line_points, Point, Viewport};
use super::reveal::{RevealProgress, DEFAULT_REVEAL_STEP};
use super::surface::{Color, DrawingSurface, Paint, Path, Stroke};

/// Visual styling for the line chart
#[derive(Debug, Clone, PartialEq)]
pub struct LineChartStyle {
    pub gradient: bool,
    pub line_width: f64,
    pub point_radius: f64,
    pub point_border: Color,
    pub point_border_width: f64,
    /// Gradient alpha at the top and bottom of the plot
    pub gradient_alpha: (u8, u8),
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            gradient: true,
            line_width: 3.0,
            point_radius: 4.0,
            point_border: Color::WHITE,
            point_border_width: 2.0,
            gradient_alpha: (0x20, 0x05),
        }
    }
}

/// Hover tooltip anchored over one data point
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    /// Horizontal position as a percentage of the chart width
    pub left_percent: f64,
    pub text: String,
}

pub struct LineChart {
    dataset: ChartDataset,
    viewport: Viewport,
    style: LineChartStyle,
    animated: bool,
    reveal_step: f64,
    reveal: RevealProgress,
    points: Vec<Point>,
}

impl LineChart {
    pub fn new(dataset: ChartDataset, viewport: Viewport) -> Self {
        let points = map_line_points(&dataset.values(), &viewport);
        Self {
            dataset,
            viewport,
            style: LineChartStyle::default(),
            animated: true,
            reveal_step: DEFAULT_REVEAL_STEP,
            reveal: RevealProgress::new(DEFAULT_REVEAL_STEP),
            points,
        }
    }

    pub fn with_style(mut self, style: LineChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Disable the reveal animation; the chart draws complete immediately
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self.restart_reveal();
        self
    }

    pub fn reveal_step(mut self, step: f64) -> Self {
        self.reveal_step = step;
        self.restart_reveal();
        self
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn progress(&self) -> f64 {
        self.reveal.progress()
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal.is_complete()
    }

    /// Replace the dataset and restart the reveal from zero
    pub fn set_dataset(&mut self, dataset: ChartDataset) {
        self.points = map_line_points(&dataset.values(), &self.viewport);
        self.dataset = dataset;
        self.restart_reveal();
    }

    /// Advance the reveal by one frame; returns `true` while more frames are needed
    pub fn advance_frame(&mut self) -> bool {
        if !self.animated {
            return false;
        }
        self.reveal.advance()
    }

    fn restart_reveal(&mut self) {
        self.reveal = if self.animated {
            RevealProgress::new(self.reveal_step)
        } else {
            RevealProgress::complete()
        };
    }

    /// Draw the current frame: clear, gradient, line, points
    pub fn draw_frame(&self, surface: &mut dyn DrawingSurface) {
        surface.clear();

        let total = self.points.len();
        if total == 0 {
            return;
        }

        let color = self.dataset.color();
        let baseline = self.viewport.baseline();
        let revealed = &self.points[..self.reveal.revealed_len(total)];

        if self.style.gradient {
            let last = ((total - 1) as f64 * self.reveal.progress()).floor() as usize;
            let edge = self.points[last.min(total - 1)];

            let mut area = Path::new().move_to(Point::new(self.points[0].x, baseline));
            for p in revealed {
                area = area.line_to(*p);
            }
            let area = area.line_to(Point::new(edge.x, baseline)).close();

            let (top, bottom) = self.style.gradient_alpha;
            surface.fill_path(
                &area,
                &Paint::VerticalGradient {
                    top: color.with_alpha(top),
                    bottom: color.with_alpha(bottom),
                    y0: self.viewport.padding,
                    y1: baseline,
                },
            );
        }

        let line = Stroke::new(color, self.style.line_width).round();
        surface.stroke_path(&Path::polyline(revealed), &line);

        let border = Stroke::new(self.style.point_border, self.style.point_border_width);
        for p in &self.points[..self.reveal.marker_len(total)] {
            surface.circle(*p, self.style.point_radius, &Paint::Solid(color), Some(&border));
        }
    }

    /// One tooltip per point, positioned across the chart width
    pub fn tooltips(&self) -> Vec<Tooltip> {
        let steps = self.dataset.len().saturating_sub(1).max(1) as f64;
        let format = self.dataset.format();
        self.dataset
            .points()
            .iter()
            .enumerate()
            .map(|(i, p)| Tooltip {
                left_percent: i as f64 / steps * 100.0,
                text: format!("{}: {}", p.label, format.format(p.value)),
            })
            .collect()
    }
}
