//! Dashboard Shell
//!
//! Owns the data resources views read from, the signed-in session and the
//! background refresh loop. Views never talk to the client directly.

mod card;
mod resource;
mod session;
mod shell;
mod stats;

pub use card::{Card, CardBuilder};
pub use resource::{fetch_into, FetchMode, Resource};
pub use session::{Session, UserProfile};
pub use shell::DashboardShell;
pub use stats::{format_stat, stat_cards, StatCard, StatCardsView};

use crate::client::{
    AnalyticsClient, ApiError, ChannelAnalysis, ChannelAnalysisRequest, DashboardStats,
};
use crate::config::DashboardConfig;
use crate::scheduler::{spawn_repeating, TaskSlot, TickControl};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Where dashboard data comes from
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;

    async fn channel_analysis(
        &self,
        channel_name: &str,
        max_videos: u32,
    ) -> Result<ChannelAnalysis, ApiError>;
}

#[async_trait]
impl DashboardSource for AnalyticsClient {
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        AnalyticsClient::dashboard_stats(self).await
    }

    async fn channel_analysis(
        &self,
        channel_name: &str,
        max_videos: u32,
    ) -> Result<ChannelAnalysis, ApiError> {
        self.analyze_channel(&ChannelAnalysisRequest {
            channel_name: channel_name.to_string(),
            max_videos,
        })
        .await
    }
}

/// Shared state behind the dashboard views
struct DashboardState {
    source: Arc<dyn DashboardSource>,
    session: Arc<RwLock<Session>>,
    config: DashboardConfig,
    stats: RwLock<Resource<DashboardStats>>,
    channel: RwLock<Resource<ChannelAnalysis>>,
}

impl DashboardState {
    async fn load(&self, mode: FetchMode) {
        let source = self.source.clone();
        fetch_into(&self.stats, "dashboard_stats", mode, async move {
            source.dashboard_stats().await
        })
        .await;

        let channel = {
            let session = self.session.read().await;
            if !session.is_authenticated() {
                Err("Please log in to see your channel analytics".to_string())
            } else {
                session
                    .channel()
                    .or(self.config.channel_name.as_deref())
                    .map(str::to_string)
                    .ok_or_else(|| {
                        "No YouTube channel configured. Please update your profile.".to_string()
                    })
            }
        };

        let channel = match channel {
            Ok(channel) => channel,
            Err(message) => {
                if mode == FetchMode::User {
                    self.channel.write().await.fail(message);
                }
                return;
            }
        };

        let source = self.source.clone();
        let max_videos = self.config.max_videos;
        fetch_into(&self.channel, "channel_analysis", mode, async move {
            let analysis = source.channel_analysis(&channel, max_videos).await?;
            if analysis.success {
                Ok(analysis)
            } else {
                Err(ApiError::rejected(format!(
                    "Could not analyze channel: {}",
                    channel
                )))
            }
        })
        .await;
    }
}

/// Data side of the dashboard
pub struct Dashboard {
    state: Arc<DashboardState>,
    refresh: TaskSlot,
}

impl Dashboard {
    pub fn new(
        source: Arc<dyn DashboardSource>,
        session: Arc<RwLock<Session>>,
        config: DashboardConfig,
    ) -> Self {
        Self {
            state: Arc::new(DashboardState {
                source,
                session,
                config,
                stats: RwLock::new(Resource::pending()),
                channel: RwLock::new(Resource::pending()),
            }),
            refresh: TaskSlot::new(),
        }
    }

    /// User-triggered fetch; failures are stored in the resources
    pub async fn refresh(&self) {
        self.state.load(FetchMode::User).await;
    }

    /// Re-fetch every configured interval; failures are only logged
    pub fn start_auto_refresh(&mut self) {
        let state = self.state.clone();
        let period = state.config.refresh_interval();
        tracing::info!(interval_secs = period.as_secs(), "Starting auto-refresh");

        self.refresh.replace(spawn_repeating("auto-refresh", period, move || {
            let state = state.clone();
            async move {
                state.load(FetchMode::Background).await;
                TickControl::Continue
            }
        }));
    }

    pub fn stop_auto_refresh(&mut self) {
        self.refresh.cancel();
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh.is_active()
    }

    pub async fn stats(&self) -> Resource<DashboardStats> {
        self.state.stats.read().await.clone()
    }

    pub async fn channel(&self) -> Resource<ChannelAnalysis> {
        self.state.channel.read().await.clone()
    }

    /// True while either resource is still loading
    pub async fn is_loading(&self) -> bool {
        self.state.stats.read().await.loading || self.state.channel.read().await.loading
    }

    /// Stat cards built from the current resources
    pub async fn stat_cards(&self) -> Vec<StatCard> {
        let channel = self.state.channel.read().await;
        let stats = self.state.stats.read().await;
        stat_cards(
            channel
                .data
                .as_ref()
                .and_then(|c| c.analysis_summary.as_ref()),
            stats.data.as_ref(),
        )
    }
}
