use crate::error::{Error, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/models/gpt2";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Which semantic analyzer implementation backs the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AnalyzerBackend {
    /// Calls the text-generation inference service.
    Live,
    /// Deterministic fixed output, no network.
    Stub,
}

impl FromStr for AnalyzerBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "live" => Ok(AnalyzerBackend::Live),
            "stub" => Ok(AnalyzerBackend::Stub),
            other => Err(Error::Config(format!(
                "SEMANTIC_ANALYZER must be 'live' or 'stub', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_token: Option<String>,
    pub github_token: Option<String>,
    pub max_requests_per_minute: u32,
    pub cache_ttl: Duration,
    pub analyzer_backend: AnalyzerBackend,
    pub inference_api_url: String,
    pub github_api_url: String,
    pub request_timeout: Duration,
    pub catalog_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            huggingface_token: None,
            github_token: None,
            max_requests_per_minute: 60,
            cache_ttl: Duration::from_secs(3600),
            analyzer_backend: AnalyzerBackend::Stub,
            inference_api_url: DEFAULT_INFERENCE_API_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            catalog_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let huggingface_token = non_empty_var("HUGGINGFACE_TOKEN");
        let github_token = non_empty_var("GITHUB_TOKEN");

        let max_requests_per_minute = env::var("MAX_REQUESTS_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let cache_ttl = env::var("CACHE_TTL")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(3600));

        let analyzer_backend = match env::var("SEMANTIC_ANALYZER") {
            Ok(v) => v.parse()?,
            Err(_) => AnalyzerBackend::Live,
        };

        let inference_api_url = env::var("INFERENCE_API_URL")
            .unwrap_or_else(|_| DEFAULT_INFERENCE_API_URL.to_string());

        let github_api_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string());

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(10));

        let catalog_path = non_empty_var("PROFILE_CATALOG");

        Ok(Self {
            huggingface_token,
            github_token,
            max_requests_per_minute,
            cache_ttl,
            analyzer_backend,
            inference_api_url,
            github_api_url,
            request_timeout,
            catalog_path,
        })
    }

    /// Checks that the selected backend has the credentials it needs.
    pub fn validate(&self) -> Result<()> {
        if self.analyzer_backend == AnalyzerBackend::Live && self.huggingface_token.is_none() {
            return Err(Error::Config(
                "HUGGINGFACE_TOKEN environment variable not set (required by the live analyzer)"
                    .to_string(),
            ));
        }
        if self.max_requests_per_minute == 0 {
            return Err(Error::Config(
                "MAX_REQUESTS_PER_MINUTE must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// A GitHub credential is configured. Without one, GitHub profiles are
    /// still read anonymously for the report but never enter scoring.
    pub github_authenticated: bool,
    pub show_progress: bool,
}

impl From<&Config> for PipelineConfig {
    fn from(config: &Config) -> Self {
        Self {
            github_authenticated: config.github_token.is_some(),
            show_progress: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_parsing() {
        assert_eq!("live".parse::<AnalyzerBackend>().unwrap(), AnalyzerBackend::Live);
        assert_eq!(" STUB ".parse::<AnalyzerBackend>().unwrap(), AnalyzerBackend::Stub);
        assert!("model".parse::<AnalyzerBackend>().is_err());
    }

    #[test]
    fn test_live_backend_requires_token() {
        let config = Config {
            analyzer_backend: AnalyzerBackend::Live,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            huggingface_token: Some("hf_token".to_string()),
            ..config
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_config_tracks_github_credential() {
        assert!(!PipelineConfig::from(&Config::default()).github_authenticated);

        let config = Config {
            github_token: Some("ghp_token".to_string()),
            ..Config::default()
        };
        assert!(PipelineConfig::from(&config).github_authenticated);
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.max_requests_per_minute, 60);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert!(config.validate().is_ok());
    }
}
