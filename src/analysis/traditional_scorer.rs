use std::sync::Arc;

use crate::models::{DomainScores, ExtractedSkills, GitHubSignal, TraditionalAnalysis};
use crate::taxonomy::Taxonomy;

/// Skill count at which the skills sub-score saturates.
const SKILL_SATURATION: f64 = 10.0;
/// Years of experience at which the experience sub-score saturates.
const EXPERIENCE_SATURATION: f64 = 5.0;

/// Rule-based per-domain scoring from extracted skills and GitHub activity.
///
/// When no GitHub signal is present the GitHub weight simply contributes
/// nothing; the remaining weights are not rescaled.
pub struct TraditionalScorer {
    taxonomy: Arc<Taxonomy>,
}

impl TraditionalScorer {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    pub fn score(&self, skills: &ExtractedSkills, github: Option<&GitHubSignal>) -> DomainScores {
        self.taxonomy
            .domains()
            .iter()
            .map(|domain| {
                let weights = &domain.weights;

                let skills_score =
                    (skills.skills_for(&domain.id).len() as f64 / SKILL_SATURATION).min(1.0);
                let experience_score =
                    (skills.years_for(&domain.id) as f64 / EXPERIENCE_SATURATION).min(1.0);

                let mut total = weights.skills * skills_score + weights.experience * experience_score;
                if let Some(signal) = github {
                    let github_score = signal
                        .domain_scores
                        .get(&domain.id)
                        .map(|s| (s / 10.0).clamp(0.0, 1.0))
                        .unwrap_or(0.0);
                    total += weights.github * github_score;
                }

                (domain.id.clone(), round2(total * 10.0))
            })
            .collect()
    }

    pub fn analyze(&self, skills: ExtractedSkills, github: Option<GitHubSignal>) -> TraditionalAnalysis {
        TraditionalAnalysis {
            domain_scores: self.score(&skills, github.as_ref()),
            skills_analysis: skills,
            github_analysis: github,
        }
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
