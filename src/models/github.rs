use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::skills::DomainScores;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

/// Everything fetched from GitHub for one handle.
#[derive(Debug, Clone)]
pub struct GitHubSnapshot {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub events: Vec<UserEvent>,
}

/// Structured GitHub activity used by the traditional scorer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubSignal {
    pub total_repos: u32,
    pub stars: u32,
    pub languages: BTreeMap<String, u32>,
    pub topics: BTreeMap<String, u32>,
    pub contributions: u32,
    /// Topic-density heuristic per domain, 0-10.
    pub domain_scores: DomainScores,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub language: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubProfileData {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub repositories: Vec<RepositorySummary>,
    pub languages: BTreeMap<String, u32>,
    pub contributions_last_year: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubActivity {
    pub repository_count: u32,
    pub total_stars: u32,
    pub languages: BTreeMap<String, u32>,
    pub contribution_level: u32,
    pub top_projects: Vec<RepositorySummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubReport {
    pub profile_data: GitHubProfileData,
    pub analysis: GitHubActivity,
}
