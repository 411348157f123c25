use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use reqwest::Response;

use crate::error::{Error, Result};

const WINDOW: Duration = Duration::from_secs(60);

/// Per-minute request ceiling shared by the outbound clients.
///
/// GitHub calls use [`RateLimiter::wait`] and sleep until a slot frees up;
/// inference calls use [`RateLimiter::try_acquire`] and surface
/// [`Error::RateLimitExceeded`] to the caller instead.
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<RateLimitState>>,
    max_per_minute: u32,
}

struct RateLimitState {
    remaining: u32,
    reset_at: Option<Instant>,
    requests_this_minute: u32,
    minute_start: Instant,
}

impl RateLimiter {
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(RateLimitState {
                remaining: 5000,
                reset_at: None,
                requests_this_minute: 0,
                minute_start: Instant::now(),
            })),
            max_per_minute: max_per_minute.max(1),
        }
    }

    pub async fn wait(&self) {
        let mut state = self.state.lock().await;

        // Server-side quota exhausted: sleep until the advertised reset
        if state.remaining == 0 {
            if let Some(reset_at) = state.reset_at {
                let now = Instant::now();
                if reset_at > now {
                    let wait_duration = reset_at - now;
                    drop(state);
                    tracing::info!("Rate limited, waiting {:?}", wait_duration);
                    sleep(wait_duration).await;
                    state = self.state.lock().await;
                }
            }
        }

        let minute_elapsed = state.minute_start.elapsed();
        if minute_elapsed < WINDOW {
            if state.requests_this_minute >= self.max_per_minute {
                let wait_time = WINDOW - minute_elapsed;
                drop(state);
                tracing::debug!("Soft rate limiting, waiting {:?}", wait_time);
                sleep(wait_time).await;
                state = self.state.lock().await;
                state.requests_this_minute = 0;
                state.minute_start = Instant::now();
            }
        } else {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        state.requests_this_minute += 1;
    }

    /// Takes a slot in the current window, or fails without waiting.
    pub async fn try_acquire(&self) -> Result<()> {
        let mut state = self.state.lock().await;

        if state.minute_start.elapsed() >= WINDOW {
            state.requests_this_minute = 0;
            state.minute_start = Instant::now();
        }

        if state.requests_this_minute >= self.max_per_minute {
            return Err(Error::RateLimitExceeded(format!(
                "{} requests per minute allowed, retry in {}s",
                self.max_per_minute,
                (WINDOW - state.minute_start.elapsed()).as_secs()
            )));
        }

        state.requests_this_minute += 1;
        Ok(())
    }

    pub fn update_from_response(&self, response: &Response) {
        if let Some(remaining) = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
        {
            let state = self.state.clone();
            let reset = response
                .headers()
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());

            tokio::spawn(async move {
                let mut state = state.lock().await;
                state.remaining = remaining;
                if let Some(reset_timestamp) = reset {
                    let now = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .unwrap_or_default()
                        .as_secs();
                    if reset_timestamp > now {
                        let wait_secs = reset_timestamp - now;
                        state.reset_at = Some(Instant::now() + Duration::from_secs(wait_secs));
                    }
                }
            });
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(60)
    }
}
