//! Chart rendering and animation
//!
//! Pure layout (geometry, segments, bar heights) is kept apart from the
//! timer-driven views in [`live`], so every chart can be drawn headless.

pub mod animator;
pub mod bar;
pub mod dataset;
pub mod engagement;
pub mod format;
pub mod geometry;
pub mod line;
pub mod live;
pub mod pie;
pub mod reveal;
pub mod surface;
pub mod svg;

pub use animator::{step_toward, Animate, Animator, AnimatorConfig, KeyedAnimator};
pub use bar::{BarChart, BarMetric};
pub use dataset::{ChartDataset, SeriesPoint};
pub use engagement::{EngagementBars, EngagementItem, EngagementSummary};
pub use format::ValueFormat;
pub use geometry::{Point, Viewport};
pub use line::{LineChart, LineChartStyle, Tooltip};
pub use live::{
    spawn_animation, AnimatedValues, LiveBarChart, LiveEngagementBars, LiveLineChart, LivePieChart,
};
pub use pie::{PieCategory, PieChart, PieSegment};
pub use reveal::RevealProgress;
pub use surface::{Color, DrawingSurface, RecordingSurface, RenderError};
pub use svg::SvgSurface;
