use async_trait::async_trait;
use crate::error::Result;

/// A text-generation service: prompt in, generated text out.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
    fn name(&self) -> &str;
}
