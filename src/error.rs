use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to parse {0}")]
    Parse(String),

    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("Inference API error: {0}")]
    InferenceApi(String),

    #[error("Inference request rejected: {0}")]
    InferenceRejected(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Failed to combine analyses: {0}")]
    AnalysisCombination(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Transient failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Network(_) | Error::Timeout(_) | Error::InferenceApi(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::Timeout("github".into()).is_retryable());
        assert!(Error::InferenceApi("502 Bad Gateway".into()).is_retryable());
        assert!(!Error::InferenceRejected("401 Unauthorized".into()).is_retryable());
        assert!(!Error::UserNotFound("ghost".into()).is_retryable());
        assert!(!Error::RateLimitExceeded("inference".into()).is_retryable());
    }

    #[test]
    fn test_parse_message() {
        let err = Error::Parse("resume PDF: empty document".into());
        assert_eq!(err.to_string(), "Failed to parse resume PDF: empty document");
    }
}
