pub mod config;
pub mod error;
pub mod models;
pub mod rate_limiter;
pub mod taxonomy;
pub mod sources;
pub mod github;
pub mod llm;
pub mod semantic;
pub mod analysis;

pub use config::{Config, PipelineConfig};
pub use error::{Error, Result};
pub use rate_limiter::RateLimiter;
pub use taxonomy::Taxonomy;
pub use github::{GitHubClient, GitHubProvider};
pub use llm::{HuggingFaceProvider, InferenceProvider};
pub use semantic::{build_analyzer, SemanticAnalyzer};
pub use analysis::AnalysisPipeline;
