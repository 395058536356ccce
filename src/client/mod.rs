//! Analytics backend client
//!
//! Thin typed wrapper over the analytics REST API. Video analyses go through
//! a TTL cache; everything else hits the network so dashboard refreshes see
//! fresh data. Calls are one-shot, there is no retry.

pub mod cache;
pub mod dto;
pub mod error;

pub use cache::ResponseCache;
pub use dto::*;
pub use error::{ApiError, ErrorKind};

use crate::config::ApiConfig;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

/// Analytics REST API client
pub struct AnalyticsClient {
    client: Client,
    root: String,
    cache: Mutex<ResponseCache>,
}

impl AnalyticsClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            root: config.api_root(),
            cache: Mutex::new(ResponseCache::new(config.cache_ttl())),
        })
    }

    /// Versioned API root every path is appended to
    pub fn root(&self) -> &str {
        &self.root
    }

    pub async fn health_check(&self) -> Result<Value, ApiError> {
        self.get("/health").await
    }

    /// Probe the API root; failures are reported in the result, not as an error
    pub async fn test_connection(&self) -> ConnectionStatus {
        match self.get::<Value>("/").await {
            Ok(data) => ConnectionStatus {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => ConnectionStatus {
                success: false,
                data: None,
                error: Some(e.message),
            },
        }
    }

    pub async fn analyze_video(
        &self,
        request: &VideoAnalysisRequest,
    ) -> Result<ApiResponse<VideoAnalysisData>, ApiError> {
        if request.video_url.trim().is_empty() {
            return Err(ApiError::validation("Video URL is required"));
        }
        self.cached_post("analyze_video", "/analyze/video", request)
            .await
    }

    pub async fn analyze_channel(
        &self,
        request: &ChannelAnalysisRequest,
    ) -> Result<ChannelAnalysis, ApiError> {
        if request.channel_name.trim().is_empty() {
            return Err(ApiError::validation("Channel name is required"));
        }
        self.post("/analyze/channel", request).await
    }

    pub async fn analyze_text(
        &self,
        request: &TextAnalysisRequest,
    ) -> Result<ApiResponse<TextAnalysisData>, ApiError> {
        if request.text.trim().is_empty() {
            return Err(ApiError::validation("Text is required"));
        }
        self.post("/analyze/text", request).await
    }

    pub async fn analyze_batch(
        &self,
        request: &BatchAnalysisRequest,
    ) -> Result<ApiResponse<BatchAnalysisData>, ApiError> {
        if request.texts.iter().all(|t| t.trim().is_empty()) {
            return Err(ApiError::validation("At least one text is required"));
        }
        self.post("/analyze/batch", request).await
    }

    pub async fn models_status(&self) -> Result<Value, ApiError> {
        self.get("/models/status").await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get("/dashboard/stats").await
    }

    /// Drop every cached response
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    async fn cached<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, ApiError> {
        match self.cache.lock().await.get(key) {
            Some(value) => decode(value).map(Some),
            None => Ok(None),
        }
    }

    async fn cached_post<B, T>(&self, endpoint: &str, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let key = ResponseCache::key(endpoint, body);
        if let Some(hit) = self.cached(&key).await? {
            return Ok(hit);
        }

        let raw: Value = self.post(path, body).await?;
        let result = decode(raw.clone())?;
        self.cache.lock().await.insert(key, raw);
        Ok(result)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.root, path);
        tracing::debug!(method = "GET", url = %url, "API request");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::debug!(url = %url, error = %e, "API request failed");
            ApiError::from(e)
        })?;
        handle_response(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.root, path);
        tracing::debug!(method = "POST", url = %url, "API request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(url = %url, error = %e, "API request failed");
                ApiError::from(e)
            })?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    tracing::debug!(status = status.as_u16(), url = %response.url(), "API response");

    if status.is_success() {
        return response.json().await.map_err(ApiError::from);
    }

    let text = response.text().await.unwrap_or_default();
    let message = error_message(&text).unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
    });
    Err(ApiError::server(status.as_u16(), message))
}

/// `detail` or `message` from a JSON error body
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["detail", "message"]
        .iter()
        .find_map(|field| value.get(field).and_then(Value::as_str))
        .map(str::to_string)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::decode(e.to_string()))
}
