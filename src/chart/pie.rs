//! Pie / donut chart
//!
//! Segments are laid out in fixed category order (never sorted by size),
//! starting at 12 o'clock and sweeping clockwise.

use super::format::{group_thousands, ValueFormat};
use super::geometry::{polar_to_cartesian, Point};
use super::surface::{Color, DrawingSurface, Paint, Path, TextAnchor, TextStyle};

/// Angle of the first segment's start edge (12 o'clock)
pub const START_ANGLE: f64 = -90.0;

/// A fixed pie category
#[derive(Debug, Clone, PartialEq)]
pub struct PieCategory {
    pub label: String,
    pub color: Color,
}

impl PieCategory {
    pub fn new(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            color,
        }
    }
}

/// One wedge, recomputed from the animated values each tick
#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: String,
    pub color: Color,
    pub value: f64,
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSegment {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Legend row for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub percentage: String,
    pub amount: String,
}

/// Build segments from `values` in category order.
///
/// Percentages are 0 when the total is 0. Missing values count as 0.
pub fn compute_segments(categories: &[PieCategory], values: &[f64]) -> Vec<PieSegment> {
    let total: f64 = values.iter().sum();
    let mut angle = START_ANGLE;

    categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let value = values.get(i).copied().unwrap_or(0.0);
            let percentage = if total > 0.0 { value / total * 100.0 } else { 0.0 };
            let start_angle = angle;
            angle += percentage / 100.0 * 360.0;

            PieSegment {
                label: category.label.clone(),
                color: category.color,
                value,
                percentage,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

/// Closed wedge path from the center out to the arc between two angles
pub fn wedge_path(center: Point, radius: f64, start_angle: f64, end_angle: f64) -> Path {
    let start = polar_to_cartesian(center.x, center.y, radius, end_angle);
    let end = polar_to_cartesian(center.x, center.y, radius, start_angle);
    let large_arc = end_angle - start_angle > 180.0;

    Path::new()
        .move_to(center)
        .line_to(start)
        .arc_to(radius, large_arc, false, end)
        .close()
}

/// Donut layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieLayout {
    pub size: f64,
    pub radius: f64,
    pub hole_radius: f64,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self {
            size: 200.0,
            radius: 80.0,
            hole_radius: 45.0,
        }
    }
}

pub struct PieChart {
    categories: Vec<PieCategory>,
    layout: PieLayout,
    /// Multiplier turning a displayed value into a dollar amount
    amount_scale: f64,
}

impl PieChart {
    pub fn new(categories: Vec<PieCategory>) -> Self {
        Self {
            categories,
            layout: PieLayout::default(),
            amount_scale: 1000.0,
        }
    }

    pub fn with_layout(mut self, layout: PieLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn categories(&self) -> &[PieCategory] {
        &self.categories
    }

    pub fn segments(&self, values: &[f64]) -> Vec<PieSegment> {
        compute_segments(&self.categories, values)
    }

    pub fn legend(&self, values: &[f64]) -> Vec<LegendEntry> {
        self.segments(values)
            .into_iter()
            .map(|s| LegendEntry {
                percentage: format!("{:.1}%", s.percentage),
                amount: ValueFormat::Dollars.format(s.value * self.amount_scale),
                label: s.label,
                color: s.color,
            })
            .collect()
    }

    /// Growth-rate figure shown under the chart, derived from the first category
    pub fn growth_rate(&self, values: &[f64]) -> String {
        let first = values.first().copied().unwrap_or(0.0);
        format!("+{:.1}%", first * 0.15)
    }

    /// Monthly average dollar figure shown under the chart
    pub fn monthly_average(&self, values: &[f64]) -> String {
        let total: f64 = values.iter().sum();
        format!("${}", group_thousands((total * self.amount_scale / 12.0).round() as i64))
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, values: &[f64]) {
        surface.clear();

        let center = Point::new(self.layout.size / 2.0, self.layout.size / 2.0);
        for segment in self.segments(values) {
            // A zero sweep has no area and would degenerate into a spike
            if segment.sweep() <= 0.0 {
                continue;
            }
            let path = if segment.sweep() >= 360.0 {
                full_disc(center, self.layout.radius)
            } else {
                wedge_path(
                    center,
                    self.layout.radius,
                    segment.start_angle,
                    segment.end_angle,
                )
            };
            surface.fill_path(&path, &Paint::Solid(segment.color));
        }

        surface.circle(
            center,
            self.layout.hole_radius,
            &Paint::Solid(Color::WHITE),
            None,
        );

        let total: f64 = values.iter().sum();
        surface.text(
            Point::new(center.x, center.y + 4.0),
            &format!("{:.0}%", total),
            &TextStyle::new(Color::GRAY_900, 24.0).bold(),
        );
        surface.text(
            Point::new(center.x, center.y + 20.0),
            "Total",
            &TextStyle::new(Color::GRAY_500, 12.0),
        );
    }

    /// Legend rows to the right of the donut
    pub fn draw_legend(&self, surface: &mut dyn DrawingSurface, values: &[f64], origin: Point) {
        for (i, entry) in self.legend(values).into_iter().enumerate() {
            let y = origin.y + i as f64 * 36.0;
            surface.circle(
                Point::new(origin.x + 8.0, y + 8.0),
                8.0,
                &Paint::Solid(entry.color),
                None,
            );
            let left = TextStyle::new(Color::GRAY_900, 14.0).anchor(TextAnchor::Start);
            surface.text(Point::new(origin.x + 24.0, y + 12.0), &entry.label, &left);
            surface.text(
                Point::new(origin.x + 200.0, y + 12.0),
                &entry.percentage,
                &TextStyle::new(Color::GRAY_900, 14.0)
                    .bold()
                    .anchor(TextAnchor::End),
            );
            surface.text(
                Point::new(origin.x + 24.0, y + 28.0),
                &entry.amount,
                &TextStyle::new(Color::GRAY_500, 12.0).anchor(TextAnchor::Start),
            );
        }
    }
}

/// Two half arcs; an SVG arc whose endpoints coincide draws nothing
fn full_disc(center: Point, radius: f64) -> Path {
    let top = Point::new(center.x, center.y - radius);
    let bottom = Point::new(center.x, center.y + radius);
    Path::new()
        .move_to(top)
        .arc_to(radius, false, true, bottom)
        .arc_to(radius, false, true, top)
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::surface::{DrawCommand, PathCommand, RecordingSurface};

    fn revenue_categories() -> Vec<PieCategory> {
        vec![
            PieCategory::new("Subscriptions", Color::rgb(0x3b, 0x82, 0xf6)),
            PieCategory::new("Services", Color::rgb(0x10, 0xb9, 0x81)),
            PieCategory::new("Consulting", Color::rgb(0xf5, 0x9e, 0x0b)),
            PieCategory::new("Integrations", Color::rgb(0x8b, 0x5c, 0xf6)),
        ]
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_segment_angles_in_fixed_order() {
        let segments = compute_segments(&revenue_categories(), &[45.0, 30.0, 15.0, 10.0]);
        let expected = [(0.0, 162.0), (162.0, 270.0), (270.0, 324.0), (324.0, 360.0)];

        for (segment, (start, end)) in segments.iter().zip(expected) {
            assert!(close(segment.start_angle - START_ANGLE, start));
            assert!(close(segment.end_angle - START_ANGLE, end));
        }
        assert_eq!(segments[0].label, "Subscriptions");
        assert_eq!(segments[3].label, "Integrations");
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let segments = compute_segments(&revenue_categories(), &[3.3, 7.1, 0.4, 12.9]);
        let sum: f64 = segments.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_total_gives_zero_segments() {
        let segments = compute_segments(&revenue_categories(), &[0.0, 0.0, 0.0, 0.0]);
        assert!(segments.iter().all(|s| s.percentage == 0.0));
        assert!(segments.iter().all(|s| s.sweep() == 0.0));

        let chart = PieChart::new(revenue_categories());
        let mut surface = RecordingSurface::new(200.0, 200.0);
        chart.draw(&mut surface, &[]);
        assert!(surface.texts().contains(&"0%"));
    }

    #[test]
    fn test_large_arc_flag() {
        let center = Point::new(100.0, 100.0);
        let big = wedge_path(center, 80.0, -90.0, 100.0);
        let small = wedge_path(center, 80.0, -90.0, 0.0);

        let flag = |p: &Path| {
            p.commands().iter().find_map(|c| match c {
                PathCommand::Arc { large_arc, .. } => Some(*large_arc),
                _ => None,
            })
        };
        assert_eq!(flag(&big), Some(true));
        assert_eq!(flag(&small), Some(false));
    }

    #[test]
    fn test_draw_has_hole_and_label() {
        let chart = PieChart::new(revenue_categories());
        let mut surface = RecordingSurface::new(200.0, 200.0);
        chart.draw(&mut surface, &[45.0, 30.0, 15.0, 10.0]);

        let wedges = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath(..)))
            .count();
        assert_eq!(wedges, 4);
        assert_eq!(surface.circles(), 1);
        assert_eq!(surface.texts(), vec!["100%", "Total"]);
    }

    #[test]
    fn test_single_category_draws_full_disc() {
        let chart = PieChart::new(revenue_categories());
        let mut surface = RecordingSurface::new(200.0, 200.0);
        chart.draw(&mut surface, &[10.0, 0.0, 0.0, 0.0]);
        let wedges = surface
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillPath(..)))
            .count();
        assert_eq!(wedges, 1);
    }

    #[test]
    fn test_legend_and_summary() {
        let chart = PieChart::new(revenue_categories());
        let values = [45.0, 30.0, 15.0, 10.0];
        let legend = chart.legend(&values);
        assert_eq!(legend[0].percentage, "45.0%");
        assert_eq!(legend[0].amount, "$45,000");
        assert_eq!(legend[3].label, "Integrations");

        assert_eq!(chart.growth_rate(&[50.0, 50.0]), "+7.5%");
        assert_eq!(chart.monthly_average(&values), "$8,333");
    }
}
