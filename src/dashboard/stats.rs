//! Stat cards
//!
//! Four headline figures at the top of the dashboard. A channel analysis,
//! when present, is authoritative; the generic dashboard stats are only a
//! fallback.

use crate::chart::format::{format_compact, group_thousands};
use crate::chart::live::spawn_animation;
use crate::chart::surface::{Color, DrawingSurface, Paint, TextAnchor, TextStyle};
use crate::chart::{AnimatorConfig, KeyedAnimator, Point};
use crate::client::{ChannelSummary, DashboardStats};
use crate::scheduler::TaskSlot;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub id: &'static str,
    pub title: &'static str,
    pub value: f64,
    pub change: &'static str,
    pub subtitle: &'static str,
    pub color: Color,
}

impl StatCard {
    fn new(
        id: &'static str,
        title: &'static str,
        value: f64,
        change: &'static str,
        subtitle: &'static str,
        color: Color,
    ) -> Self {
        Self {
            id,
            title,
            value,
            change,
            subtitle,
            color,
        }
    }
}

const BLUE: Color = Color::rgb(0x25, 0x63, 0xeb);
const GREEN: Color = Color::rgb(0x16, 0xa3, 0x4a);
const PURPLE: Color = Color::rgb(0x93, 0x33, 0xea);
const ORANGE: Color = Color::rgb(0xea, 0x58, 0x0c);
const PINK: Color = Color::rgb(0xdb, 0x27, 0x77);

/// Pick the four cards from whichever source is available
pub fn stat_cards(
    channel: Option<&ChannelSummary>,
    stats: Option<&DashboardStats>,
) -> Vec<StatCard> {
    if let Some(summary) = channel {
        return vec![
            StatCard::new(
                "videos",
                "Total Videos",
                summary.total_videos,
                "+12.5%",
                "all videos (shorts + long)",
                BLUE,
            ),
            StatCard::new(
                "views",
                "Total Views",
                summary.total_views,
                "+2.3%",
                "across all videos",
                GREEN,
            ),
            StatCard::new(
                "likes",
                "Total Likes",
                summary.total_likes,
                "+18.2%",
                "from your audience",
                PURPLE,
            ),
            StatCard::new(
                "engagement",
                "Engagement Rate",
                summary.avg_engagement_rate,
                "+6.4%",
                "average engagement",
                ORANGE,
            ),
        ];
    }

    let stats = stats.cloned().unwrap_or_default();
    vec![
        StatCard::new(
            "followers",
            "Total Followers",
            stats.total_followers,
            "+12.5%",
            "from last month",
            BLUE,
        ),
        StatCard::new(
            "engagement",
            "Engagement Rate",
            stats.engagement,
            "+2.3%",
            "from last month",
            PINK,
        ),
        StatCard::new(
            "reach",
            "Total Reach",
            stats.reach,
            "+18.2%",
            "from last month",
            GREEN,
        ),
        StatCard::new(
            "impressions",
            "Total Impressions",
            stats.impressions,
            "+6.4%",
            "this month",
            PURPLE,
        ),
    ]
}

/// Format an animated stat value for display
pub fn format_stat(id: &str, value: f64) -> String {
    match id {
        "followers" | "reach" | "impressions" => format_compact(value),
        "engagement" => format!("{:.1}%", value),
        _ => group_thousands(value.round() as i64),
    }
}

/// Animated stat card row
pub struct StatCardsView {
    cards: Vec<StatCard>,
    animator: Arc<Mutex<KeyedAnimator>>,
    config: AnimatorConfig,
    task: TaskSlot,
}

impl StatCardsView {
    pub fn new(config: AnimatorConfig) -> Self {
        Self {
            cards: Vec::new(),
            animator: Arc::new(Mutex::new(KeyedAnimator::new(config))),
            config,
            task: TaskSlot::new(),
        }
    }

    pub fn cards(&self) -> &[StatCard] {
        &self.cards
    }

    /// Replace the cards; values animate from what is currently shown
    pub async fn set_cards(&mut self, cards: Vec<StatCard>) {
        self.task.cancel();
        self.animator
            .lock()
            .await
            .set_targets(cards.iter().map(|c| (c.id, c.value)));
        self.cards = cards;
        self.task.replace(spawn_animation(
            "stat-cards",
            self.animator.clone(),
            self.config.tick,
        ));
    }

    /// Formatted value per card, in card order
    pub async fn displayed(&self) -> Vec<String> {
        let animator = self.animator.lock().await;
        self.cards
            .iter()
            .map(|c| format_stat(c.id, animator.value(c.id)))
            .collect()
    }

    pub fn is_animating(&self) -> bool {
        self.task.is_active()
    }

    /// Draw one card per slot of `card_width`, left to right
    pub async fn draw(&self, surface: &mut dyn DrawingSurface, card_width: f64, gap: f64) {
        surface.clear();
        let (_, height) = surface.size();
        for (i, (card, value)) in self.cards.iter().zip(self.displayed().await).enumerate() {
            let x = i as f64 * (card_width + gap);
            draw_stat_card(surface, card, &value, x, card_width, height);
        }
    }
}

fn draw_stat_card(
    surface: &mut dyn DrawingSurface,
    card: &StatCard,
    value: &str,
    x: f64,
    width: f64,
    height: f64,
) {
    surface.rect(x, 0.0, width, height, 12.0, &Paint::Solid(Color::WHITE));
    surface.rect(x, 0.0, width, 4.0, 0.0, &Paint::Solid(card.color));

    let left = |size: f64, color: Color| TextStyle::new(color, size).anchor(TextAnchor::Start);
    surface.text(Point::new(x + 20.0, 32.0), card.title, &left(14.0, Color::GRAY_500));
    surface.text(
        Point::new(x + width - 20.0, 32.0),
        card.change,
        &TextStyle::new(GREEN, 12.0).anchor(TextAnchor::End),
    );
    surface.text(
        Point::new(x + 20.0, 70.0),
        value,
        &left(28.0, Color::GRAY_900).bold(),
    );
    surface.text(Point::new(x + 20.0, 94.0), card.subtitle, &left(12.0, Color::GRAY_500));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::RecordingSurface;
    use std::time::Duration;

    #[test]
    fn test_channel_summary_wins() {
        let summary = ChannelSummary {
            total_videos: 120.0,
            total_views: 5_400_000.0,
            total_likes: 230_000.0,
            avg_engagement_rate: 4.26,
        };
        let stats = DashboardStats {
            total_followers: 1.0,
            ..DashboardStats::default()
        };

        let cards = stat_cards(Some(&summary), Some(&stats));
        let ids: Vec<_> = cards.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["videos", "views", "likes", "engagement"]);

        let fallback = stat_cards(None, Some(&stats));
        assert_eq!(fallback[0].id, "followers");
        assert_eq!(fallback[0].value, 1.0);

        assert_eq!(stat_cards(None, None)[2].value, 0.0);
    }

    #[test]
    fn test_format_stat() {
        assert_eq!(format_stat("followers", 1_250_000.0), "1.3M");
        assert_eq!(format_stat("reach", 89_000.0), "89.0K");
        assert_eq!(format_stat("impressions", 999.4), "999");
        assert_eq!(format_stat("engagement", 4.26), "4.3%");
        assert_eq!(format_stat("views", 5_400_000.0), "5,400,000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cards_animate_to_targets() {
        let mut view = StatCardsView::new(
            AnimatorConfig::new(0.1, 0.1).with_tick(Duration::from_millis(50)),
        );
        let stats = DashboardStats {
            total_followers: 125_000.0,
            engagement: 4.2,
            reach: 89_000.0,
            impressions: 1_500_000.0,
            platforms: Vec::new(),
        };
        view.set_cards(stat_cards(None, Some(&stats))).await;
        assert_eq!(view.displayed().await[0], "0");

        tokio::time::sleep(Duration::from_secs(30)).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(
            view.displayed().await,
            vec!["125.0K", "4.2%", "89.0K", "1.5M"]
        );
        assert!(!view.is_animating());

        let mut surface = RecordingSurface::new(1200.0, 120.0);
        view.draw(&mut surface, 280.0, 16.0).await;
        assert!(surface.texts().contains(&"Total Followers"));
        assert!(surface.texts().contains(&"1.5M"));
    }
}
