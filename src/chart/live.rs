//! Timer-driven chart views
//!
//! Binds the pure chart types to the scheduler. Each view owns its tasks; a
//! retarget cancels the running animation before starting the next one, and
//! dropping the view stops everything.

use super::animator::{Animate, Animator, AnimatorConfig};
use super::bar::BarChart;
use super::dataset::ChartDataset;
use super::engagement::{EngagementBars, EngagementSummary};
use super::line::{LineChart, Tooltip};
use super::pie::{LegendEntry, PieChart};
use super::surface::DrawingSurface;
use crate::scheduler::{spawn_repeating, TaskHandle, TaskSlot, TickControl};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Frame period for reveal animations (~60 fps)
pub const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// A value set interpolated toward its targets on a background timer.
///
/// The timer stops once every value has snapped to its target and is
/// restarted by [`AnimatedValues::retarget`].
pub struct AnimatedValues {
    name: String,
    animator: Arc<Mutex<Animator>>,
    task: TaskSlot,
}

impl AnimatedValues {
    /// Start animating from zero toward `targets`
    pub fn start(name: impl Into<String>, targets: Vec<f64>, config: AnimatorConfig) -> Self {
        let mut values = Self {
            name: name.into(),
            animator: Arc::new(Mutex::new(Animator::new(targets, config))),
            task: TaskSlot::new(),
        };
        values.spawn(config.tick);
        values
    }

    /// Swap targets and keep animating from the current displayed values
    pub async fn retarget(&mut self, targets: Vec<f64>) {
        self.task.cancel();
        let tick = {
            let mut animator = self.animator.lock().await;
            animator.set_targets(targets);
            animator.config().tick
        };
        tracing::trace!(animation = %self.name, "Retargeting");
        self.spawn(tick);
    }

    /// Displayed values, zero-filled to the target length before the first tick
    pub async fn snapshot(&self) -> Vec<f64> {
        let animator = self.animator.lock().await;
        (0..animator.targets().len())
            .map(|i| animator.value(i))
            .collect()
    }

    pub async fn targets(&self) -> Vec<f64> {
        self.animator.lock().await.targets().to_vec()
    }

    pub async fn is_settled(&self) -> bool {
        self.animator.lock().await.is_settled()
    }

    /// True while the interpolation timer is alive
    pub fn is_running(&self) -> bool {
        self.task.is_active()
    }

    pub fn stop(&mut self) {
        self.task.cancel();
    }

    fn spawn(&mut self, period: Duration) {
        self.task
            .replace(spawn_animation(self.name.clone(), self.animator.clone(), period));
    }
}

/// Tick `animation` every `period` until it settles
pub fn spawn_animation<A>(
    name: impl Into<String>,
    animation: Arc<Mutex<A>>,
    period: Duration,
) -> TaskHandle
where
    A: Animate + Send + 'static,
{
    spawn_repeating(name, period, move || {
        let animation = animation.clone();
        async move {
            let mut animation = animation.lock().await;
            animation.tick();
            if animation.is_settled() {
                TickControl::Stop
            } else {
                TickControl::Continue
            }
        }
    })
}

struct LineFrame<S> {
    chart: LineChart,
    surface: S,
}

/// Line chart that redraws itself every frame until fully revealed
pub struct LiveLineChart<S> {
    frame: Arc<Mutex<LineFrame<S>>>,
    task: TaskSlot,
    period: Duration,
}

impl<S: DrawingSurface + Send + 'static> LiveLineChart<S> {
    /// Draw the first frame immediately, then start the reveal loop
    pub fn start(chart: LineChart, mut surface: S, period: Duration) -> Self {
        chart.draw_frame(&mut surface);
        let mut live = Self {
            frame: Arc::new(Mutex::new(LineFrame { chart, surface })),
            task: TaskSlot::new(),
            period,
        };
        live.spawn();
        live
    }

    /// Replace the dataset; the reveal restarts from zero
    pub async fn set_dataset(&mut self, dataset: ChartDataset) {
        self.task.cancel();
        {
            let mut frame = self.frame.lock().await;
            let LineFrame { chart, surface } = &mut *frame;
            chart.set_dataset(dataset);
            chart.draw_frame(surface);
        }
        self.spawn();
    }

    pub async fn progress(&self) -> f64 {
        self.frame.lock().await.chart.progress()
    }

    pub async fn tooltips(&self) -> Vec<Tooltip> {
        self.frame.lock().await.chart.tooltips()
    }

    /// Inspect the surface holding the latest frame
    pub async fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.frame.lock().await.surface)
    }

    pub fn is_animating(&self) -> bool {
        self.task.is_active()
    }

    fn spawn(&mut self) {
        let frame = self.frame.clone();
        self.task
            .replace(spawn_repeating("line-reveal", self.period, move || {
                let frame = frame.clone();
                async move {
                    let mut frame = frame.lock().await;
                    let LineFrame { chart, surface } = &mut *frame;
                    let more = chart.advance_frame();
                    chart.draw_frame(surface);
                    if more {
                        TickControl::Continue
                    } else {
                        TickControl::Stop
                    }
                }
            }));
    }
}

/// Bar chart whose bars glide between metrics
pub struct LiveBarChart {
    chart: BarChart,
    values: AnimatedValues,
}

impl LiveBarChart {
    pub fn start(chart: BarChart, config: AnimatorConfig) -> Self {
        let values = AnimatedValues::start("bar-values", chart.targets(), config);
        Self { chart, values }
    }

    pub fn chart(&self) -> &BarChart {
        &self.chart
    }

    /// Switch metric; returns `false` for an unknown key
    pub async fn select_metric(&mut self, key: &str) -> bool {
        match self.chart.select(key) {
            Some(targets) => {
                self.values.retarget(targets).await;
                true
            }
            None => false,
        }
    }

    pub async fn displayed(&self) -> Vec<f64> {
        self.values.snapshot().await
    }

    pub async fn tooltips(&self) -> Vec<Tooltip> {
        self.chart.tooltips(&self.values.snapshot().await)
    }

    pub async fn draw(&self, surface: &mut dyn DrawingSurface) {
        let displayed = self.values.snapshot().await;
        self.chart.draw(surface, &displayed);
    }

    pub fn is_animating(&self) -> bool {
        self.values.is_running()
    }
}

/// Donut chart animated toward new category values
pub struct LivePieChart {
    chart: PieChart,
    values: AnimatedValues,
}

impl LivePieChart {
    pub fn start(chart: PieChart, targets: Vec<f64>, config: AnimatorConfig) -> Self {
        let values = AnimatedValues::start("pie-values", targets, config);
        Self { chart, values }
    }

    pub fn chart(&self) -> &PieChart {
        &self.chart
    }

    pub async fn set_values(&mut self, targets: Vec<f64>) {
        self.values.retarget(targets).await;
    }

    pub async fn displayed(&self) -> Vec<f64> {
        self.values.snapshot().await
    }

    pub async fn legend(&self) -> Vec<LegendEntry> {
        self.chart.legend(&self.values.snapshot().await)
    }

    pub async fn draw(&self, surface: &mut dyn DrawingSurface) {
        let displayed = self.values.snapshot().await;
        self.chart.draw(surface, &displayed);
    }

    pub fn is_animating(&self) -> bool {
        self.values.is_running()
    }
}

/// Engagement progress bars filling toward each platform's rate
pub struct LiveEngagementBars {
    bars: EngagementBars,
    values: AnimatedValues,
}

impl LiveEngagementBars {
    pub fn start(bars: EngagementBars, targets: Vec<f64>, config: AnimatorConfig) -> Self {
        let values = AnimatedValues::start("engagement-values", targets, config);
        Self { bars, values }
    }

    pub fn bars(&self) -> &EngagementBars {
        &self.bars
    }

    pub async fn set_values(&mut self, targets: Vec<f64>) {
        self.values.retarget(targets).await;
    }

    pub async fn displayed(&self) -> Vec<f64> {
        self.values.snapshot().await
    }

    /// Summary of the values currently on screen
    pub async fn summary(&self) -> EngagementSummary {
        self.bars.summary(&self.values.snapshot().await)
    }

    pub async fn draw(&self, surface: &mut dyn DrawingSurface) {
        let displayed = self.values.snapshot().await;
        self.bars.draw(surface, &displayed);
    }

    pub fn is_animating(&self) -> bool {
        self.values.is_running()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::bar::{performance_metrics, performance_months};
    use crate::chart::format::ValueFormat;
    use crate::chart::geometry::Viewport;
    use crate::chart::surface::{Color, RecordingSurface};

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    fn config() -> AnimatorConfig {
        AnimatorConfig::new(0.1, 0.5).with_tick(Duration::from_millis(50))
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_converge_and_timer_stops() {
        let values = AnimatedValues::start("test", vec![0.0, 100.0], config());
        assert_eq!(values.snapshot().await, vec![0.0, 0.0]);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;

        assert_eq!(values.snapshot().await, vec![0.0, 100.0]);
        assert!(values.is_settled().await);
        assert!(!values.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retarget_continues_from_displayed() {
        let mut values = AnimatedValues::start("test", vec![100.0], config());
        tokio::time::sleep(Duration::from_millis(520)).await;
        settle().await;

        let mid = values.snapshot().await[0];
        assert!(mid > 0.0 && mid < 100.0);

        values.retarget(vec![0.0]).await;
        assert_eq!(values.snapshot().await[0], mid);
        assert!(values.is_running());

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(values.snapshot().await, vec![0.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_timer() {
        let values = AnimatedValues::start("test", vec![100.0], config());
        let animator = values.animator.clone();
        drop(values);

        tokio::time::sleep(Duration::from_secs(1)).await;
        settle().await;
        assert!(animator.lock().await.displayed().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_bar_metric_switch_does_not_reset() {
        let chart = BarChart::new(
            performance_metrics(),
            performance_months(),
            Viewport::new(400.0, 256.0, 16.0),
        );
        let mut live = LiveBarChart::start(chart, AnimatorConfig::new(0.1, 1.0));
        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(live.displayed().await[7], 35000.0);

        assert!(live.select_metric("engagement").await);
        assert_eq!(live.displayed().await[7], 35000.0);

        tokio::time::sleep(Duration::from_millis(60)).await;
        settle().await;
        let after = live.displayed().await[7];
        assert!(after < 35000.0 && after > 95.0);

        assert!(!live.select_metric("nope").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pie_settles_on_values() {
        let chart = PieChart::new(vec![
            crate::chart::pie::PieCategory::new("A", Color::WHITE),
            crate::chart::pie::PieCategory::new("B", Color::GRAY_500),
        ]);
        let mut live = LivePieChart::start(chart, vec![60.0, 40.0], config());
        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(live.legend().await[0].percentage, "60.0%");

        live.set_values(vec![25.0, 75.0]).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert_eq!(live.displayed().await, vec![25.0, 75.0]);
        assert!(!live.is_animating());
    }

    #[tokio::test(start_paused = true)]
    async fn test_engagement_summary_follows_displayed_values() {
        let (items, targets) = crate::chart::engagement::platform_engagement();
        let bars = EngagementBars::new(items, 400.0);
        let live = LiveEngagementBars::start(bars, targets, AnimatorConfig::new(0.08, 0.5));

        let start = live.summary().await;
        assert_eq!(start.average, "0%");
        assert_eq!(start.high_performers, 0);

        tokio::time::sleep(Duration::from_secs(10)).await;
        settle().await;
        assert!(!live.is_animating());
        assert_eq!(live.displayed().await, vec![85.0, 72.0, 68.0, 91.0, 63.0]);

        let end = live.summary().await;
        assert_eq!(end.average, "76%");
        assert_eq!(end.high_performers, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_line_reveals_then_stops() {
        let dataset = ChartDataset::from_pairs(
            &["Mon", "Tue", "Wed"],
            &[3.0, 9.0, 6.0],
            Color::rgb(0x3b, 0x82, 0xf6),
            ValueFormat::Count,
        );
        let chart = LineChart::new(dataset.clone(), Viewport::default());
        let surface = RecordingSurface::new(400.0, 200.0);
        let mut live = LiveLineChart::start(chart, surface, FRAME_PERIOD);

        assert_eq!(live.with_surface(|s| s.clear_count()).await, 1);
        assert_eq!(live.progress().await, 0.0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        settle().await;
        assert_eq!(live.progress().await, 1.0);
        assert!(!live.is_animating());
        assert_eq!(live.with_surface(|s| s.circles()).await, 3);

        live.set_dataset(dataset).await;
        assert_eq!(live.progress().await, 0.0);
        assert!(live.is_animating());
    }
}
