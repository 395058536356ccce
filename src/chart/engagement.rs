//! Per-platform engagement bars
//!
//! One horizontal progress bar per platform, its fill width the engagement
//! percentage, plus two summary figures computed from the displayed values.

use super::geometry::Point;
use super::surface::{Color, DrawingSurface, Paint, TextAnchor, TextStyle};

/// Values strictly above this count as high performers
pub const HIGH_PERFORMER_THRESHOLD: f64 = 70.0;

const ROW_HEIGHT: f64 = 56.0;
const TRACK_HEIGHT: f64 = 8.0;
const SUMMARY_HEIGHT: f64 = 64.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EngagementItem {
    pub platform: String,
    pub color: Color,
}

impl EngagementItem {
    pub fn new(platform: impl Into<String>, color: Color) -> Self {
        Self {
            platform: platform.into(),
            color,
        }
    }
}

/// Figures shown under the bars
#[derive(Debug, Clone, PartialEq)]
pub struct EngagementSummary {
    /// Mean displayed engagement, `"{:.0}%"`
    pub average: String,
    pub high_performers: usize,
}

/// Mean of the displayed values, 0 for an empty set
pub fn average_engagement(displayed: &[f64]) -> f64 {
    if displayed.is_empty() {
        return 0.0;
    }
    displayed.iter().sum::<f64>() / displayed.len() as f64
}

pub fn high_performers(displayed: &[f64]) -> usize {
    displayed
        .iter()
        .filter(|&&v| v > HIGH_PERFORMER_THRESHOLD)
        .count()
}

/// Fill width of a bar on a track of `track_width`, value read as a percentage
pub fn bar_fill_width(value: f64, track_width: f64) -> f64 {
    value.clamp(0.0, 100.0) * track_width / 100.0
}

pub struct EngagementBars {
    items: Vec<EngagementItem>,
    width: f64,
}

impl EngagementBars {
    pub fn new(items: Vec<EngagementItem>, width: f64) -> Self {
        Self { items, width }
    }

    pub fn items(&self) -> &[EngagementItem] {
        &self.items
    }

    /// Height needed for every row plus the summary
    pub fn height(&self) -> f64 {
        self.items.len() as f64 * ROW_HEIGHT + SUMMARY_HEIGHT
    }

    pub fn summary(&self, displayed: &[f64]) -> EngagementSummary {
        EngagementSummary {
            average: format!("{:.0}%", average_engagement(displayed)),
            high_performers: high_performers(displayed),
        }
    }

    pub fn draw(&self, surface: &mut dyn DrawingSurface, displayed: &[f64]) {
        surface.clear();

        let name = TextStyle::new(Color::GRAY_900, 14.0).anchor(TextAnchor::Start);
        let value = TextStyle::new(Color::GRAY_500, 14.0)
            .bold()
            .anchor(TextAnchor::End);
        let caption = |anchor: TextAnchor| TextStyle::new(Color::GRAY_500, 11.0).anchor(anchor);

        for (i, item) in self.items.iter().enumerate() {
            let top = i as f64 * ROW_HEIGHT;
            let shown = displayed.get(i).copied().unwrap_or(0.0);

            surface.text(Point::new(0.0, top + 14.0), &item.platform, &name);
            surface.text(
                Point::new(self.width, top + 14.0),
                &format!("{:.0}%", shown),
                &value,
            );

            let track_y = top + 22.0;
            surface.rect(
                0.0,
                track_y,
                self.width,
                TRACK_HEIGHT,
                TRACK_HEIGHT / 2.0,
                &Paint::Solid(Color::GRAY_100),
            );
            let fill = bar_fill_width(shown, self.width);
            if fill > 0.0 {
                surface.rect(
                    0.0,
                    track_y,
                    fill,
                    TRACK_HEIGHT,
                    TRACK_HEIGHT / 2.0,
                    &Paint::Solid(item.color),
                );
            }

            let caption_y = track_y + TRACK_HEIGHT + 14.0;
            surface.text(Point::new(0.0, caption_y), "Low", &caption(TextAnchor::Start));
            surface.text(
                Point::new(self.width, caption_y),
                "High",
                &caption(TextAnchor::End),
            );
        }

        let summary = self.summary(displayed);
        let top = self.items.len() as f64 * ROW_HEIGHT + 16.0;
        let figure = |color: Color| TextStyle::new(color, 18.0).bold();
        let label = TextStyle::new(Color::GRAY_500, 12.0);
        let left = self.width / 4.0;
        let right = self.width * 3.0 / 4.0;

        surface.text(
            Point::new(left, top + 20.0),
            &summary.average,
            &figure(Color::rgb(0x25, 0x63, 0xeb)),
        );
        surface.text(Point::new(left, top + 38.0), "Avg Engagement", &label);
        surface.text(
            Point::new(right, top + 20.0),
            &summary.high_performers.to_string(),
            &figure(Color::rgb(0x16, 0xa3, 0x4a)),
        );
        surface.text(Point::new(right, top + 38.0), "High Performers", &label);
    }
}

/// Platforms shown in the engagement card, with their engagement rates
pub fn platform_engagement() -> (Vec<EngagementItem>, Vec<f64>) {
    let items = vec![
        EngagementItem::new("Instagram", Color::rgb(0xe1, 0x30, 0x6c)),
        EngagementItem::new("Facebook", Color::rgb(0x18, 0x77, 0xf2)),
        EngagementItem::new("Twitter", Color::rgb(0x1d, 0xa1, 0xf2)),
        EngagementItem::new("LinkedIn", Color::rgb(0x0a, 0x66, 0xc2)),
        EngagementItem::new("YouTube", Color::rgb(0xff, 0x00, 0x00)),
    ];
    (items, vec![85.0, 72.0, 68.0, 91.0, 63.0])
}
