use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{
    DomainScores, GitHubActivity, GitHubProfileData, GitHubReport, GitHubSignal, GitHubSnapshot,
    GitHubUser, Repository, RepositorySummary, UserEvent,
};
use crate::taxonomy::Taxonomy;

/// Text summary of a GitHub account for the aggregated profile document.
///
/// Forked repositories are left out of the language and topic sets and of
/// the per-repository blocks.
pub fn summarize(user: &GitHubUser, repos: &[Repository]) -> String {
    let own_repos: Vec<&Repository> = repos.iter().filter(|r| !r.fork).collect();

    let languages: BTreeSet<&str> = own_repos
        .iter()
        .filter_map(|r| r.language.as_deref())
        .collect();
    let topics: BTreeSet<&str> = own_repos
        .iter()
        .flat_map(|r| r.topics.iter().map(String::as_str))
        .collect();

    let repo_blocks: Vec<String> = own_repos
        .iter()
        .map(|repo| {
            format!(
                "Repository: {}\nDescription: {}\nLanguage: {}\nStars: {}\nTopics: {}\n",
                repo.name,
                repo.description.as_deref().unwrap_or("No description"),
                repo.language.as_deref().unwrap_or("Not specified"),
                repo.stargazers_count,
                repo.topics.join(", ")
            )
        })
        .collect();

    let mut text = format!("GitHub Profile - {}\n", user.login);
    text.push_str(&format!("Bio: {}\n\n", user.bio.as_deref().unwrap_or("")));
    text.push_str(&format!(
        "Programming Languages: {}\n",
        languages.into_iter().collect::<Vec<_>>().join(", ")
    ));
    text.push_str(&format!(
        "Topics & Skills: {}\n\n",
        topics.into_iter().collect::<Vec<_>>().join(", ")
    ));
    text.push_str("Notable Repositories:\n");
    text.push_str(&repo_blocks.join("\n---\n"));
    text
}

/// Push events inside the trailing 365 days.
pub fn count_contributions(events: &[UserEvent], now: DateTime<Utc>) -> u32 {
    let one_year_ago = now - Duration::days(365);
    events
        .iter()
        .filter(|e| e.event_type == "PushEvent" && e.created_at > one_year_ago)
        .count() as u32
}

/// Topic-density heuristic: share of repositories carrying a topic that
/// contains one of the domain's GitHub keywords, scaled to 0-10.
pub fn domain_topic_scores(repos: &[Repository], taxonomy: &Taxonomy) -> DomainScores {
    let total = repos.len().max(1) as f64;

    taxonomy
        .domains()
        .iter()
        .map(|domain| {
            let matching = repos
                .iter()
                .filter(|repo| {
                    repo.topics.iter().any(|topic| {
                        let topic = topic.to_lowercase();
                        domain.github_topics.iter().any(|k| topic.contains(k.as_str()))
                    })
                })
                .count();
            (domain.id.clone(), matching as f64 / total * 10.0)
        })
        .collect()
}

pub fn build_signal(snapshot: &GitHubSnapshot, taxonomy: &Taxonomy, now: DateTime<Utc>) -> GitHubSignal {
    let repos = &snapshot.repositories;

    let mut languages: BTreeMap<String, u32> = BTreeMap::new();
    let mut topics: BTreeMap<String, u32> = BTreeMap::new();
    for repo in repos {
        if let Some(ref language) = repo.language {
            *languages.entry(language.clone()).or_insert(0) += 1;
        }
        for topic in &repo.topics {
            *topics.entry(topic.clone()).or_insert(0) += 1;
        }
    }

    GitHubSignal {
        total_repos: repos.len() as u32,
        stars: repos.iter().map(|r| r.stargazers_count).sum(),
        languages,
        topics,
        contributions: count_contributions(&snapshot.events, now),
        domain_scores: domain_topic_scores(repos, taxonomy),
    }
}

pub fn build_report(snapshot: &GitHubSnapshot, signal: &GitHubSignal) -> GitHubReport {
    let repositories: Vec<RepositorySummary> = snapshot
        .repositories
        .iter()
        .map(|repo| RepositorySummary {
            name: repo.name.clone(),
            description: repo.description.clone(),
            stars: repo.stargazers_count,
            language: repo.language.clone(),
            url: repo.html_url.clone(),
        })
        .collect();

    let mut top_projects = repositories.clone();
    top_projects.sort_by(|a, b| b.stars.cmp(&a.stars));
    top_projects.truncate(5);

    GitHubReport {
        profile_data: GitHubProfileData {
            username: snapshot.user.login.clone(),
            name: snapshot.user.name.clone(),
            bio: snapshot.user.bio.clone(),
            repositories,
            languages: signal.languages.clone(),
            contributions_last_year: signal.contributions,
        },
        analysis: GitHubActivity {
            repository_count: signal.total_repos,
            total_stars: signal.stars,
            languages: signal.languages.clone(),
            contribution_level: signal.contributions,
            top_projects,
        },
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn repo(name: &str, language: Option<&str>, stars: u32, fork: bool, topics: &[&str]) -> Repository {
        Repository {
            id: stars as u64,
            name: name.to_string(),
            full_name: format!("octo/{}", name),
            description: None,
            language: language.map(str::to_string),
            stargazers_count: stars,
            fork,
            topics: topics.iter().map(|t| t.to_string()).collect(),
            html_url: Some(format!("https://github.com/octo/{}", name)),
        }
    }

    pub(crate) fn user(login: &str) -> GitHubUser {
        GitHubUser {
            login: login.to_string(),
            id: 1,
            name: Some("Octo Cat".to_string()),
            bio: Some("Builds ML tooling".to_string()),
            company: None,
            location: None,
            public_repos: 0,
            followers: 0,
            created_at: None,
        }
    }

    fn event(kind: &str, created_at: DateTime<Utc>) -> UserEvent {
        UserEvent {
            event_type: kind.to_string(),
            created_at,
        }
    }

    #[test]
    fn test_domain_score_is_topic_density() {
        let mut repos: Vec<Repository> = (0..8)
            .map(|i| repo(&format!("r{}", i), Some("Rust"), 0, false, &[]))
            .collect();
        repos.push(repo("ml-a", Some("Python"), 3, false, &["machine-learning"]));
        repos.push(repo("ml-b", Some("Python"), 1, false, &["applied-machine-learning", "web"]));

        let scores = domain_topic_scores(&repos, &Taxonomy::builtin());
        assert!((scores["ai_ml"] - 2.0).abs() < 1e-9);
        assert!((scores["web_dev"] - 1.0).abs() < 1e-9);
        assert_eq!(scores["blockchain"], 0.0);
        assert_eq!(scores.len(), 5);
    }

    #[test]
    fn test_domain_scores_without_repositories() {
        let scores = domain_topic_scores(&[], &Taxonomy::builtin());
        assert!(scores.values().all(|s| *s == 0.0));
    }

    #[test]
    fn test_contributions_window() {
        let now = Utc::now();
        let events = vec![
            event("PushEvent", now - Duration::days(1)),
            event("PushEvent", now - Duration::days(364)),
            event("PushEvent", now - Duration::days(400)),
            event("WatchEvent", now - Duration::days(2)),
        ];
        assert_eq!(count_contributions(&events, now), 2);
    }

    #[test]
    fn test_summary_skips_forks() {
        let repos = vec![
            repo("tensor-kit", Some("Python"), 12, false, &["pytorch", "deep-learning"]),
            repo("forked-lib", Some("Haskell"), 400, true, &["functional"]),
            repo("site", None, 0, false, &[]),
        ];
        let text = summarize(&user("octo"), &repos);

        assert!(text.starts_with("GitHub Profile - octo\nBio: Builds ML tooling\n\n"));
        assert!(text.contains("Programming Languages: Python\n"));
        assert!(text.contains("Topics & Skills: deep-learning, pytorch\n"));
        assert!(text.contains("Repository: tensor-kit\n"));
        assert!(text.contains("Language: Not specified\n"));
        assert!(!text.contains("Haskell"));
        assert!(!text.contains("forked-lib"));
    }

    #[test]
    fn test_signal_and_report() {
        let now = Utc::now();
        let snapshot = GitHubSnapshot {
            user: user("octo"),
            repositories: vec![
                repo("a", Some("Rust"), 5, false, &["docker"]),
                repo("b", Some("Rust"), 50, true, &["kubernetes"]),
                repo("c", Some("Go"), 1, false, &[]),
            ],
            events: vec![event("PushEvent", now - Duration::days(3))],
        };
        let signal = build_signal(&snapshot, &Taxonomy::builtin(), now);

        assert_eq!(signal.total_repos, 3);
        assert_eq!(signal.stars, 56);
        assert_eq!(signal.languages["Rust"], 2);
        assert_eq!(signal.topics["kubernetes"], 1);
        assert_eq!(signal.contributions, 1);
        assert!((signal.domain_scores["cloud"] - 20.0 / 3.0).abs() < 1e-9);

        let report = build_report(&snapshot, &signal);
        assert_eq!(report.analysis.repository_count, 3);
        assert_eq!(report.analysis.top_projects[0].name, "b");
        assert_eq!(report.profile_data.contributions_last_year, 1);
    }
}
