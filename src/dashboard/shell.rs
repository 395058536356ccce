//! Dashboard shell: the mounted charts and how they are laid out

use super::card::Card;
use super::stats::{StatCard, StatCardsView};
use crate::chart::bar::{performance_metrics, performance_months};
use crate::chart::engagement::platform_engagement;
use crate::chart::surface::{DrawingSurface, TextAnchor, TextStyle};
use crate::chart::{
    BarChart, ChartDataset, Color, EngagementBars, LineChart, LiveBarChart, LiveEngagementBars,
    LiveLineChart, LivePieChart, PieCategory, PieChart, Point, SvgSurface, ValueFormat, Viewport,
};
use crate::client::PlatformStats;
use crate::config::AnimationConfig;

pub const WIDTH: f64 = 1200.0;
const MARGIN: f64 = 24.0;
const STAT_HEIGHT: f64 = 120.0;
/// Horizontal padding inside a card
const CARD_INSET: f64 = 48.0;

const LINE_VIEWPORT: Viewport = Viewport {
    width: 520.0,
    height: 220.0,
    padding: 20.0,
};
const BAR_VIEWPORT: Viewport = Viewport {
    width: 520.0,
    height: 256.0,
    padding: 16.0,
};

/// Engagement per platform, shown until real platform figures arrive
fn demo_engagement() -> ChartDataset {
    ChartDataset::from_pairs(
        &["Instagram", "Facebook", "Twitter", "LinkedIn", "YouTube"],
        &[85.0, 72.0, 68.0, 91.0, 63.0],
        Color::rgb(0x3b, 0x82, 0xf6),
        ValueFormat::Percent,
    )
}

fn revenue_categories() -> Vec<PieCategory> {
    vec![
        PieCategory::new("Subscriptions", Color::rgb(0x3b, 0x82, 0xf6)),
        PieCategory::new("Services", Color::rgb(0x10, 0xb9, 0x81)),
        PieCategory::new("Consulting", Color::rgb(0xf5, 0x9e, 0x0b)),
        PieCategory::new("Integrations", Color::rgb(0x8b, 0x5c, 0xf6)),
    ]
}

fn half_width() -> f64 {
    (WIDTH - MARGIN * 3.0) / 2.0
}

pub struct DashboardShell {
    stats: StatCardsView,
    engagement: LiveLineChart<SvgSurface>,
    engagement_title: &'static str,
    user_engagement: LiveEngagementBars,
    performance: LiveBarChart,
    revenue: LivePieChart,
}

impl DashboardShell {
    /// Mount every chart; animations start immediately
    pub fn mount(animation: &AnimationConfig) -> Self {
        let line =
            LineChart::new(demo_engagement(), LINE_VIEWPORT).reveal_step(animation.reveal_step);
        let bars = BarChart::new(performance_metrics(), performance_months(), BAR_VIEWPORT);
        let (platforms, rates) = platform_engagement();
        let user_engagement = EngagementBars::new(platforms, half_width() - CARD_INSET);

        Self {
            stats: StatCardsView::new(animation.stats()),
            engagement: LiveLineChart::start(
                line,
                SvgSurface::new(LINE_VIEWPORT.width, LINE_VIEWPORT.height),
                animation.frame_period(),
            ),
            engagement_title: "Platform Engagement",
            user_engagement: LiveEngagementBars::start(
                user_engagement,
                rates,
                animation.engagement(),
            ),
            performance: LiveBarChart::start(bars, animation.bars()),
            revenue: LivePieChart::start(
                PieChart::new(revenue_categories()),
                vec![45.0, 30.0, 15.0, 10.0],
                animation.values(),
            ),
        }
    }

    pub async fn set_stat_cards(&mut self, cards: Vec<StatCard>) {
        self.stats.set_cards(cards).await;
    }

    /// Chart follower counts per platform and retitle the card to match; an
    /// empty list keeps the current chart
    pub async fn set_platforms(&mut self, platforms: &[PlatformStats]) {
        if platforms.is_empty() {
            return;
        }
        let labels: Vec<&str> = platforms.iter().map(|p| p.name.as_str()).collect();
        let values: Vec<f64> = platforms.iter().map(|p| p.followers).collect();
        self.engagement
            .set_dataset(ChartDataset::from_pairs(
                &labels,
                &values,
                Color::rgb(0x3b, 0x82, 0xf6),
                ValueFormat::Compact,
            ))
            .await;
        self.engagement_title = "Platform Followers";
    }

    pub async fn select_metric(&mut self, key: &str) -> bool {
        self.performance.select_metric(key).await
    }

    /// True once every animation has come to rest
    pub fn is_settled(&self) -> bool {
        !(self.stats.is_animating()
            || self.engagement.is_animating()
            || self.user_engagement.is_animating()
            || self.performance.is_animating()
            || self.revenue.is_animating())
    }

    pub async fn render_stats(&self) -> SvgSurface {
        let mut surface = SvgSurface::new(WIDTH - MARGIN * 2.0, STAT_HEIGHT);
        let card_width = (WIDTH - MARGIN * 2.0 - 3.0 * 16.0) / 4.0;
        self.stats.draw(&mut surface, card_width, 16.0).await;
        surface
    }

    pub async fn render_engagement(&self) -> SvgSurface {
        let mut body = SvgSurface::new(LINE_VIEWPORT.width, LINE_VIEWPORT.height);
        self.engagement.with_surface(|s| body.embed(s, 0.0, 0.0)).await;
        body
    }

    pub async fn render_user_engagement(&self) -> SvgSurface {
        let bars = self.user_engagement.bars();
        let mut body = SvgSurface::new(half_width() - CARD_INSET, bars.height());
        self.user_engagement.draw(&mut body).await;
        body
    }

    pub async fn render_performance(&self) -> SvgSurface {
        let mut body = SvgSurface::new(BAR_VIEWPORT.width, BAR_VIEWPORT.height + 24.0);
        self.performance.draw(&mut body).await;
        body
    }

    pub async fn render_revenue(&self) -> SvgSurface {
        let mut pie = SvgSurface::new(200.0, 200.0);
        self.revenue.draw(&mut pie).await;

        let displayed = self.revenue.displayed().await;
        let mut body = SvgSurface::new(520.0, 200.0);
        body.embed(&pie, 0.0, 0.0);
        self.revenue
            .chart()
            .draw_legend(&mut body, &displayed, Point::new(240.0, 16.0));
        body
    }

    /// Whole dashboard as one document
    pub async fn render(&self) -> SvgSurface {
        let half = half_width();

        let engagement = Card::builder(half)
            .title(self.engagement_title, None)
            .body(self.render_engagement().await)
            .build();

        let metric = self.performance.chart().selected().map(|m| m.label.clone());
        let performance = Card::builder(half)
            .title("Performance Overview", metric.as_deref())
            .body(self.render_performance().await)
            .build();

        let displayed = self.revenue.displayed().await;
        let chart = self.revenue.chart();
        let mut footer = SvgSurface::new(half - CARD_INSET, 24.0);
        let style = TextStyle::new(Color::GRAY_500, 12.0).anchor(TextAnchor::Start);
        footer.text(
            Point::new(0.0, 16.0),
            &format!("Growth rate {}", chart.growth_rate(&displayed)),
            &style,
        );
        footer.text(
            Point::new((half - CARD_INSET) / 2.0, 16.0),
            &format!("Monthly average {}", chart.monthly_average(&displayed)),
            &style,
        );
        let revenue = Card::builder(half)
            .title("Revenue Breakdown", None)
            .body(self.render_revenue().await)
            .footer(footer)
            .build();

        let user_engagement = Card::builder(half)
            .title("User Engagement", Some("Engagement across different platforms"))
            .body(self.render_user_engagement().await)
            .build();

        let row_two = MARGIN * 2.0 + STAT_HEIGHT;
        let row_three = row_two + engagement.height().max(performance.height()) + MARGIN;
        let height = row_three + revenue.height().max(user_engagement.height()) + MARGIN;

        let mut page = SvgSurface::new(WIDTH, height);
        page.embed(&self.render_stats().await, MARGIN, MARGIN);
        page.embed(&engagement.render(), MARGIN, row_two);
        page.embed(&performance.render(), MARGIN * 2.0 + half, row_two);
        page.embed(&revenue.render(), MARGIN, row_three);
        page.embed(&user_engagement.render(), MARGIN * 2.0 + half, row_three);
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DashboardStats;
    use crate::dashboard::stat_cards;
    use std::time::Duration;

    async fn run_to_rest(shell: &DashboardShell) {
        for _ in 0..400 {
            if shell.is_settled() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_shell_settles_and_renders() {
        let mut shell = DashboardShell::mount(&AnimationConfig::default());
        shell
            .set_stat_cards(stat_cards(
                None,
                Some(&DashboardStats {
                    total_followers: 125_000.0,
                    ..DashboardStats::default()
                }),
            ))
            .await;
        assert!(!shell.is_settled());

        run_to_rest(&shell).await;
        assert!(shell.is_settled());

        let svg = shell.render().await.finish();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("125.0K"));
        assert!(svg.contains("Revenue Breakdown"));
        assert!(svg.contains("Monthly average $8,333"));
        assert!(svg.contains("stroke-dasharray=\"4,4\""));
        assert!(svg.contains("Platform Engagement"));
        assert!(svg.contains("User Engagement"));
        assert!(svg.contains("Avg Engagement"));
        assert!(svg.contains(">76%<"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_metric_and_platforms() {
        let mut shell = DashboardShell::mount(&AnimationConfig::default());
        assert!(shell.select_metric("users").await);
        assert!(!shell.select_metric("bogus").await);

        shell
            .set_platforms(&[PlatformStats {
                name: "YouTube".to_string(),
                followers: 50_000.0,
                growth: 2.0,
            }])
            .await;
        run_to_rest(&shell).await;

        let svg = shell.render().await.finish();
        assert!(svg.contains("Active Users"));
        assert!(svg.contains("Platform Followers"));
        assert!(!svg.contains("Platform Engagement"));
    }
}
