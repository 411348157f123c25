//! Qualitative profile assessment.
//!
//! Callers depend on [`SemanticAnalyzer`] only. [`build_analyzer`] is the one
//! place that picks the implementation from configuration.

pub mod cache;
pub mod live;
pub mod stub;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{AnalyzerBackend, Config};
use crate::error::{Error, Result};
use crate::llm::HuggingFaceProvider;
use crate::models::SemanticAnalysis;
use crate::rate_limiter::RateLimiter;

pub use cache::{CachedAnalyzer, TtlCache};
pub use live::LiveAnalyzer;
pub use stub::StubAnalyzer;

#[async_trait]
pub trait SemanticAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<SemanticAnalysis>;
    fn name(&self) -> &str;
}

pub fn build_analyzer(config: &Config, rate_limiter: RateLimiter) -> Result<Arc<dyn SemanticAnalyzer>> {
    match config.analyzer_backend {
        AnalyzerBackend::Stub => {
            tracing::info!("Using stub semantic analyzer");
            Ok(Arc::new(StubAnalyzer))
        }
        AnalyzerBackend::Live => {
            let token = config.huggingface_token.clone().ok_or_else(|| {
                Error::Config("HUGGINGFACE_TOKEN environment variable not set".to_string())
            })?;
            let provider = HuggingFaceProvider::new(
                token,
                config.inference_api_url.clone(),
                config.request_timeout,
            )?;
            let live = LiveAnalyzer::new(Arc::new(provider), rate_limiter);
            Ok(Arc::new(CachedAnalyzer::new(Arc::new(live), config.cache_ttl)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_selection() {
        let stub = build_analyzer(&Config::default(), RateLimiter::default()).unwrap();
        assert_eq!(stub.name(), "stub");

        let live_config = Config {
            analyzer_backend: AnalyzerBackend::Live,
            huggingface_token: Some("hf_test".to_string()),
            ..Config::default()
        };
        let live = build_analyzer(&live_config, RateLimiter::default()).unwrap();
        assert_eq!(live.name(), "live");

        let missing_token = Config {
            huggingface_token: None,
            ..live_config
        };
        assert!(matches!(
            build_analyzer(&missing_token, RateLimiter::default()),
            Err(Error::Config(_))
        ));
    }
}
