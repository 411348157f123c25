use async_trait::async_trait;

use crate::error::Result;
use crate::models::{GitHubSnapshot, GitHubUser, Repository, UserEvent};

#[async_trait]
pub trait GitHubProvider: Send + Sync {
    async fn get_user(&self, username: &str) -> Result<GitHubUser>;

    /// All repositories owned by the user, forks included.
    async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>>;

    /// Recent public events, newest first.
    async fn get_user_events(&self, username: &str) -> Result<Vec<UserEvent>>;

    /// User, repositories and events in one go. The event log only feeds the
    /// contribution count, so an event failure yields an empty log instead
    /// of failing the snapshot.
    async fn fetch_snapshot(&self, username: &str) -> Result<GitHubSnapshot> {
        let user = self.get_user(username).await?;

        let (repositories, events) =
            tokio::join!(self.get_user_repos(username), self.get_user_events(username));
        let repositories = repositories?;
        let events = events.unwrap_or_else(|e| {
            tracing::warn!("Could not fetch events for {}: {}", username, e);
            Vec::new()
        });

        Ok(GitHubSnapshot {
            user,
            repositories,
            events,
        })
    }
}
