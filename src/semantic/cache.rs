use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::error::Result;
use crate::models::SemanticAnalysis;
use crate::semantic::SemanticAnalyzer;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Concurrent map with a single time-to-live for every entry.
///
/// Readers never block writers on other keys; concurrent writes to the same
/// key are last-writer-wins. Expired entries are evicted on read.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        None
    }

    pub fn set(&self, key: String, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Hex SHA-256 of the analyzed text.
pub fn cache_key(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Memoizes another analyzer by input text for the cache TTL.
pub struct CachedAnalyzer {
    inner: Arc<dyn SemanticAnalyzer>,
    cache: TtlCache<SemanticAnalysis>,
}

impl CachedAnalyzer {
    pub fn new(inner: Arc<dyn SemanticAnalyzer>, ttl: Duration) -> Self {
        Self {
            inner,
            cache: TtlCache::new(ttl),
        }
    }
}

#[async_trait]
impl SemanticAnalyzer for CachedAnalyzer {
    async fn analyze(&self, text: &str) -> Result<SemanticAnalysis> {
        let key = cache_key(text);
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!("Semantic analysis cache hit");
            return Ok(hit);
        }

        let analysis = self.inner.analyze(text).await?;
        self.cache.set(key, analysis.clone());
        Ok(analysis)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
