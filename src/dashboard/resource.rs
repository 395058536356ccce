//! `{ data, loading, error }` resources exposed to views

use crate::client::ApiError;
use chrono::{DateTime, Utc};
use std::future::Future;
use tokio::sync::RwLock;

/// Who asked for a fetch, which decides how failures are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Errors land in the resource for the view to show
    User,
    /// Errors are logged; the previous data and error stay untouched
    Background,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> Resource<T> {
    /// Initial state: nothing loaded yet, loading
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
            updated_at: None,
        }
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn succeed(&mut self, data: T) {
        self.data = Some(data);
        self.loading = false;
        self.error = None;
        self.updated_at = Some(Utc::now());
    }

    /// Record a failure; existing data is kept
    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::pending()
    }
}

/// Run `fetch` and store its outcome in `resource` according to `mode`
pub async fn fetch_into<T, Fut>(
    resource: &RwLock<Resource<T>>,
    name: &str,
    mode: FetchMode,
    fetch: Fut,
) -> bool
where
    Fut: Future<Output = Result<T, ApiError>>,
{
    if mode == FetchMode::User {
        resource.write().await.begin();
    }

    match fetch.await {
        Ok(data) => {
            resource.write().await.succeed(data);
            true
        }
        Err(e) => {
            match mode {
                FetchMode::User => {
                    tracing::error!(resource = name, error = %e, "Fetch failed");
                    resource.write().await.fail(e.message);
                }
                FetchMode::Background => {
                    tracing::warn!(resource = name, error = %e, "Background refresh failed");
                }
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_user_fetch_surfaces_error() {
        let resource = RwLock::new(Resource::<u32>::pending());
        assert!(fetch_into(&resource, "n", FetchMode::User, async { Ok(7) }).await);

        let ok = fetch_into(&resource, "n", FetchMode::User, async {
            Err(ApiError::unavailable())
        })
        .await;
        assert!(!ok);

        let state = resource.read().await;
        assert_eq!(state.data, Some(7));
        assert!(!state.loading);
        assert!(state.error.as_deref().unwrap().contains("not running"));
    }

    #[tokio::test]
    async fn test_background_fetch_is_silent() {
        let resource = RwLock::new(Resource::<u32>::pending());
        fetch_into(&resource, "n", FetchMode::User, async { Ok(1) }).await;

        fetch_into(&resource, "n", FetchMode::Background, async {
            Err(ApiError::timeout())
        })
        .await;
        {
            let state = resource.read().await;
            assert_eq!(state.data, Some(1));
            assert!(state.error.is_none());
        }

        fetch_into(&resource, "n", FetchMode::Background, async { Ok(2) }).await;
        assert_eq!(resource.read().await.data, Some(2));
    }
}
