//! TTL response cache
//!
//! Entries are keyed by `"{endpoint}_{json params}"` and stored as raw JSON
//! so one cache serves every response type.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

pub struct ResponseCache {
    ttl: Duration,
    entries: HashMap<String, CacheEntry>,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Build the cache key for an endpoint and its parameters
    pub fn key<P: Serialize + ?Sized>(endpoint: &str, params: &P) -> String {
        let params = serde_json::to_string(params).unwrap_or_else(|_| "null".to_string());
        format!("{}_{}", endpoint, params)
    }

    /// Fresh entry for `key`; expired entries are evicted on access
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let fresh = self
            .entries
            .get(key)
            .map(|entry| entry.stored_at.elapsed() < self.ttl)?;

        if fresh {
            tracing::debug!(key = %key, "Cache hit");
            self.entries.get(key).map(|entry| entry.value.clone())
        } else {
            self.entries.remove(key);
            None
        }
    }

    pub fn insert(&mut self, key: String, value: Value) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        tracing::debug!("API cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
