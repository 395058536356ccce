//! Request and response types for the analytics backend
//!
//! Response fields the dashboard does not strictly need are defaulted so a
//! partial payload still decodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================
// Envelope
// ============================================

/// Standard response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timestamp: String,
    pub data: T,
}

/// Outcome of a connection check; never an error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConnectionStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================
// Requests
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoAnalysisRequest {
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyze_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_comments: Option<u32>,
}

impl VideoAnalysisRequest {
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
            analyze_comments: None,
            max_comments: None,
        }
    }

    pub fn with_comments(mut self, max_comments: u32) -> Self {
        self.analyze_comments = Some(true);
        self.max_comments = Some(max_comments);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelAnalysisRequest {
    pub channel_name: String,
    pub max_videos: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextAnalysisRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchAnalysisRequest {
    pub texts: Vec<String>,
}

// ============================================
// Responses
// ============================================

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SentimentCounts {
    #[serde(default)]
    pub positive: f64,
    #[serde(default)]
    pub negative: f64,
    #[serde(default)]
    pub neutral: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SentimentDistribution {
    #[serde(default)]
    pub counts: SentimentCounts,
    #[serde(default)]
    pub percentages: SentimentCounts,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalyzedComment {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub timestamp: i64,
    pub sentiment: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentAnalysis {
    pub total_comments: u64,
    #[serde(default)]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(default)]
    pub average_confidence: f64,
    #[serde(default)]
    pub comments: Vec<AnalyzedComment>,
    #[serde(default)]
    pub model_used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoAnalysisData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub upload_date: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub description_sentiment: String,
    #[serde(default)]
    pub description_confidence: f64,
    #[serde(default)]
    pub comment_analysis: Option<CommentAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextAnalysisData {
    pub text: String,
    pub sentiment: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub model_used: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchResult {
    pub id: u64,
    pub text: String,
    pub sentiment: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchAnalysisData {
    pub total_analyzed: u64,
    #[serde(default)]
    pub sentiment_distribution: SentimentDistribution,
    #[serde(default)]
    pub average_confidence: f64,
    #[serde(default)]
    pub results: Vec<BatchResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelInfo {
    #[serde(default)]
    pub channel_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
}

/// Aggregate figures across a channel's analysed videos
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChannelSummary {
    #[serde(default)]
    pub total_videos: f64,
    #[serde(default)]
    pub total_views: f64,
    #[serde(default)]
    pub total_likes: f64,
    #[serde(default)]
    pub avg_engagement_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChannelAnalysis {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub channel_info: ChannelInfo,
    #[serde(default)]
    pub analysis_summary: Option<ChannelSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlatformStats {
    pub name: String,
    #[serde(default)]
    pub followers: f64,
    #[serde(default)]
    pub growth: f64,
}

/// Generic social-media dashboard figures
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_followers: f64,
    #[serde(default)]
    pub engagement: f64,
    #[serde(default)]
    pub reach: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub platforms: Vec<PlatformStats>,
}
