use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::provider::GitHubProvider;
use crate::models::{GitHubUser, Repository, UserEvent};
use crate::rate_limiter::RateLimiter;

/// GitHub exposes at most 300 events per user.
const MAX_EVENTS: u32 = 300;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    /// Anonymous access works against the public API at a lower quota, so
    /// the token is optional.
    pub fn new(
        token: Option<&str>,
        base_url: &str,
        timeout: Duration,
        rate_limiter: RateLimiter,
    ) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("profilescore/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            rate_limiter,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GitHubProvider for GitHubClient {
    async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        self.rate_limiter.wait().await;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(&url).send().await?;
        self.rate_limiter.update_from_response(&response);

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(username.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch user {}: {} - {}",
                username, status, body
            )));
        }

        Ok(response.json().await?)
    }

    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let url = format!("{}/users/{}/repos?type=owner&sort=updated", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(&url, 100).await
    }

    async fn get_user_events(&self, username: &str) -> Result<Vec<UserEvent>> {
        let url = format!("{}/users/{}/events", self.base_url, username);
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::debug!("Fetching events for: {}", username);
        paginator.fetch_limited(&url, 100, MAX_EVENTS).await
    }
}
