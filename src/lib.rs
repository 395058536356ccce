//! # Pulseboard
//!
//! Social-media and YouTube analytics dashboard: a typed client for the
//! analytics backend, animated charts that render to SVG, and the dashboard
//! shell that ties them together.
//!
//! ## Modules
//!
//! - [`chart`]: Geometry mapping, value animation and the line, pie and bar charts
//! - [`client`]: Analytics REST client with a TTL response cache
//! - [`dashboard`]: Data resources, session, auto-refresh and card layout
//! - [`scheduler`]: Cancellable repeating tasks driving animations and refresh
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pulseboard::config::Config;
//! use pulseboard::dashboard::DashboardShell;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!
//!     // Mount the charts; each one animates towards its data
//!     let shell = DashboardShell::mount(&config.animation);
//!     while !shell.is_settled() {
//!         tokio::time::sleep(config.animation.frame_period()).await;
//!     }
//!
//!     shell.render().await.write_to(Path::new("dashboard.svg"))?;
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod scheduler;

pub use chart::{Animator, AnimatorConfig, BarChart, LineChart, PieChart, SvgSurface};
pub use client::{AnalyticsClient, ApiError};
pub use config::Config;
pub use dashboard::{Dashboard, DashboardShell, Session};
