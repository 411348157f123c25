use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{Error, Result};
use crate::llm::provider::InferenceProvider;

const MAX_ATTEMPTS: u32 = 3;

/// Hugging Face hosted text-generation endpoint.
///
/// A 503 means the model is still loading; it is retried after
/// `warmup_backoff`. Other failures are retried after `retry_backoff`.
/// After the last attempt the final failure is reported.
pub struct HuggingFaceProvider {
    client: Client,
    api_url: String,
    token: String,
    warmup_backoff: Duration,
    retry_backoff: Duration,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Serialize)]
struct GenerationParameters {
    max_new_tokens: u32,
    temperature: f64,
    top_p: f64,
    return_full_text: bool,
    truncation: bool,
    max_length: u32,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_new_tokens: 100,
            temperature: 0.7,
            top_p: 0.9,
            return_full_text: false,
            truncation: true,
            max_length: 1024,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<Generation>),
    Single(Generation),
}

#[derive(Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl HuggingFaceProvider {
    pub fn new(token: String, api_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url,
            token,
            warmup_backoff: Duration::from_secs(2),
            retry_backoff: Duration::from_secs(1),
        })
    }

    pub fn with_backoff(mut self, warmup: Duration, retry: Duration) -> Self {
        self.warmup_backoff = warmup;
        self.retry_backoff = retry;
        self
    }

    async fn attempt(&self, prompt: &str) -> Attempt {
        let body = GenerationRequest {
            inputs: prompt,
            parameters: GenerationParameters::default(),
        };

        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Attempt::Failed(Error::Timeout(format!("inference request: {}", e)))
            }
            Err(e) => return Attempt::Failed(Error::Network(e)),
        };

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Attempt::WarmingUp;
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = format!("{} - {}", status, body);
            // Client errors other than timeouts and throttling will not change on retry
            let rejected = status.is_client_error()
                && status != StatusCode::REQUEST_TIMEOUT
                && status != StatusCode::TOO_MANY_REQUESTS;
            return Attempt::Failed(if rejected {
                Error::InferenceRejected(message)
            } else {
                Error::InferenceApi(message)
            });
        }

        let reply = match response.json::<GenerationResponse>().await {
            Ok(reply) => generated_text(reply),
            Err(e) => Err(Error::InferenceApi(format!(
                "Unreadable inference response: {}",
                e
            ))),
        };
        match reply {
            Ok(text) => Attempt::Done(text),
            Err(e) => Attempt::Failed(e),
        }
    }
}

enum Attempt {
    Done(String),
    WarmingUp,
    Failed(Error),
}

fn generated_text(reply: GenerationResponse) -> Result<String> {
    let generation = match reply {
        GenerationResponse::Batch(mut batch) if !batch.is_empty() => batch.swap_remove(0),
        GenerationResponse::Batch(_) => {
            return Err(Error::InferenceApi("Empty response from inference service".to_string()))
        }
        GenerationResponse::Single(generation) => generation,
    };

    if let Some(error) = generation.error {
        return Err(Error::InferenceRejected(error));
    }

    generation
        .generated_text
        .ok_or_else(|| Error::InferenceApi("Response carried no generated_text".to_string()))
}

#[async_trait]
impl InferenceProvider for HuggingFaceProvider {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut last_error = String::new();

        for attempt in 1..=MAX_ATTEMPTS {
            let backoff = match self.attempt(prompt).await {
                Attempt::Done(text) => return Ok(text),
                Attempt::WarmingUp => {
                    last_error = "model is still loading (503)".to_string();
                    self.warmup_backoff
                }
                Attempt::Failed(e) if !e.is_retryable() => return Err(e),
                Attempt::Failed(e) => {
                    last_error = e.to_string();
                    self.retry_backoff
                }
            };

            if attempt < MAX_ATTEMPTS {
                tracing::warn!(
                    "Inference attempt {}/{} failed ({}), retrying in {:?}",
                    attempt,
                    MAX_ATTEMPTS,
                    last_error,
                    backoff
                );
                sleep(backoff).await;
            }
        }

        Err(Error::InferenceApi(format!(
            "Failed after {} attempts: {}",
            MAX_ATTEMPTS, last_error
        )))
    }

    fn name(&self) -> &str {
        "Hugging Face"
    }
}
