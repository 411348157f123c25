use std::sync::Arc;

use crate::analysis::traditional_scorer::round2;
use crate::models::{
    Opportunity, OpportunityMatch, ProjectMatch, ResumeAnalysis, TechnicalMatch,
    TrackRecommendations,
};
use crate::taxonomy::{Taxonomy, TrackSpec};

const DOMAIN_WEIGHT: f64 = 0.4;
const TECHNICAL_WEIGHT: f64 = 0.3;
const PROJECT_WEIGHT: f64 = 0.3;
const MAX_PREPARATION_TIPS: usize = 3;

/// Scores a candidate against externally supplied opportunities.
pub struct OpportunityMatcher {
    taxonomy: Arc<Taxonomy>,
}

impl OpportunityMatcher {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self { taxonomy }
    }

    /// Unrounded compatibility in [0, 1].
    pub fn compatibility(&self, analysis: &ResumeAnalysis, track: &str, difficulty: Option<&str>) -> f64 {
        let domain = analysis
            .enhanced_scores
            .get(track)
            .map(|e| e.score)
            .unwrap_or(0.0)
            / 10.0;
        let technical = analysis.llm_analysis.technical_analysis.skill_depth_score / 10.0;
        let project = analysis.llm_analysis.project_evaluation.project_score / 10.0;

        let raw = (DOMAIN_WEIGHT * domain + TECHNICAL_WEIGHT * technical + PROJECT_WEIGHT * project)
            * self.taxonomy.difficulty_multiplier(difficulty);
        raw.clamp(0.0, 1.0)
    }

    /// Accepted matches, best first. Opportunities on unknown tracks are
    /// skipped, and equal scores keep their input order.
    pub fn match_opportunities(
        &self,
        analysis: &ResumeAnalysis,
        opportunities: &[Opportunity],
    ) -> Vec<OpportunityMatch> {
        let mut matches: Vec<OpportunityMatch> = opportunities
            .iter()
            .filter_map(|opportunity| {
                let track_id = opportunity.primary_track.as_deref()?;
                let Some(track) = self.taxonomy.track(track_id) else {
                    tracing::debug!("Skipping opportunity on unknown track '{}'", track_id);
                    return None;
                };

                let compatibility =
                    self.compatibility(analysis, track_id, opportunity.difficulty.as_deref());
                if compatibility < track.min_score {
                    return None;
                }

                Some(self.build_match(analysis, opportunity, track, compatibility))
            })
            .collect();

        matches.sort_by(|a, b| b.compatibility_score.total_cmp(&a.compatibility_score));
        tracing::info!("{} of {} opportunities matched", matches.len(), opportunities.len());
        matches
    }

    fn build_match(
        &self,
        analysis: &ResumeAnalysis,
        opportunity: &Opportunity,
        track: &TrackSpec,
        compatibility: f64,
    ) -> OpportunityMatch {
        let technical = &analysis.llm_analysis.technical_analysis;
        let project = &analysis.llm_analysis.project_evaluation;

        OpportunityMatch {
            opportunity: opportunity.clone(),
            compatibility_score: round2(compatibility),
            technical_match: TechnicalMatch {
                score: technical.skill_depth_score,
                strengths: technical.key_technical_achievements.clone(),
            },
            project_match: ProjectMatch {
                score: project.project_score,
                complexity_match: if project.technical_complexity.is_empty() {
                    "Medium".to_string()
                } else {
                    project.technical_complexity.clone()
                },
            },
            recommendations: track_recommendations(track, &technical.key_technical_achievements),
        }
    }
}

fn track_recommendations(track: &TrackSpec, achievements: &[String]) -> TrackRecommendations {
    let missing: Vec<String> = track
        .recommended_skills
        .iter()
        .filter(|skill| !achievements.iter().any(|a| a.eq_ignore_ascii_case(skill)))
        .cloned()
        .collect();

    let preparation_tips = if missing.is_empty() {
        vec!["You have the core skills for this track!".to_string()]
    } else {
        missing
            .iter()
            .take(MAX_PREPARATION_TIPS)
            .map(|skill| format!("Focus on learning {}", skill))
            .collect()
    };

    TrackRecommendations {
        track_name: track.name.clone(),
        recommended_skills: missing,
        min_score_required: track.min_score,
        preparation_tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        EnhancedScore, ExtractedSkills, Recommendations, SourceCompleteness, TraditionalAnalysis,
    };
    use crate::semantic::StubAnalyzer;

    /// Stub semantic result (technical 7.5, project 8.2) with the given
    /// enhanced domain scores.
    fn analysis(scores: &[(&str, f64)]) -> ResumeAnalysis {
        let semantic = StubAnalyzer::analysis();
        let enhanced_scores = scores
            .iter()
            .map(|(domain, score)| {
                (
                    domain.to_string(),
                    EnhancedScore {
                        score: *score,
                        technical_depth: semantic.technical_analysis.clone(),
                        project_insights: semantic.project_evaluation.clone(),
                        growth_potential: semantic.growth_assessment.clone(),
                        source_completeness: SourceCompleteness::default(),
                    },
                )
            })
            .collect();

        ResumeAnalysis {
            enhanced_scores,
            llm_analysis: semantic,
            traditional_analysis: TraditionalAnalysis {
                domain_scores: Default::default(),
                skills_analysis: ExtractedSkills::empty(&Taxonomy::builtin()),
                github_analysis: None,
            },
            recommendations: Recommendations::default(),
        }
    }

    fn opportunity(name: &str, track: &str, difficulty: Option<&str>) -> Opportunity {
        Opportunity {
            name: Some(name.to_string()),
            primary_track: Some(track.to_string()),
            difficulty: difficulty.map(str::to_string),
            ..Opportunity::default()
        }
    }

    #[test]
    fn test_beginner_compatibility() {
        let matcher = OpportunityMatcher::new(Taxonomy::builtin());
        let analysis = analysis(&[("ai_ml", 8.0)]);

        let raw = matcher.compatibility(&analysis, "ai_ml", Some("Beginner"));
        assert!((raw - 0.9492).abs() < 1e-9);

        let matches = matcher.match_opportunities(&analysis, &[opportunity("ML Jam", "ai_ml", Some("Beginner"))]);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].compatibility_score, 0.95);
        assert_eq!(matches[0].project_match.complexity_match, "High");
    }

    #[test]
    fn test_unknown_tracks_are_skipped() {
        let matcher = OpportunityMatcher::new(Taxonomy::builtin());
        let analysis = analysis(&[("ai_ml", 8.0)]);
        let opportunities = vec![
            opportunity("Quantum", "quantum", None),
            Opportunity::default(),
            opportunity("ML Jam", "ai_ml", None),
        ];
        let matches = matcher.match_opportunities(&analysis, &opportunities);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opportunity.name.as_deref(), Some("ML Jam"));
    }

    #[test]
    fn test_mistyped_track_is_skipped() {
        let matcher = OpportunityMatcher::new(Taxonomy::builtin());
        let analysis = analysis(&[("ai_ml", 8.0)]);
        let opportunities: Vec<Opportunity> = serde_json::from_str(
            r#"[{"name": "Q", "primary_track": 7}, {"id": 1, "name": "ML Jam", "primary_track": "ai_ml"}]"#,
        )
        .unwrap();

        let matches = matcher.match_opportunities(&analysis, &opportunities);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].opportunity.id.as_deref(), Some("1"));
    }

    #[test]
    fn test_threshold_and_ordering() {
        let matcher = OpportunityMatcher::new(Taxonomy::builtin());
        let analysis = analysis(&[("ai_ml", 8.0), ("cybersecurity", 0.0), ("web_dev", 8.0)]);
        let opportunities = vec![
            // 0.791 * 0.8 = 0.633 >= 0.5
            opportunity("Web Advanced", "web_dev", Some("Advanced")),
            // (0.225 + 0.246) * 0.8 = 0.377 < 0.7
            opportunity("Sec Advanced", "cybersecurity", Some("Advanced")),
            opportunity("ML Jam", "ai_ml", Some("Beginner")),
            opportunity("Web Open", "web_dev", None),
            opportunity("ML Open", "ai_ml", Some("Intermediate")),
        ];
        let matches = matcher.match_opportunities(&analysis, &opportunities);
        let names: Vec<_> = matches
            .iter()
            .map(|m| m.opportunity.name.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, vec!["ML Jam", "Web Open", "ML Open", "Web Advanced"]);
        assert_eq!(matches[1].compatibility_score, 0.79);
        assert_eq!(matches[3].compatibility_score, 0.63);
    }

    #[test]
    fn test_missing_skills_and_tips() {
        let achievements = vec!["python".to_string(), "PyTorch".to_string()];
        let ai = Taxonomy::builtin().track("ai_ml").cloned().unwrap();
        let rec = track_recommendations(&ai, &achievements);
        assert_eq!(rec.recommended_skills, vec!["TensorFlow", "Data Science"]);
        assert_eq!(
            rec.preparation_tips,
            vec!["Focus on learning TensorFlow", "Focus on learning Data Science"]
        );

        let covered = vec!["Solidity".to_string(), "Web3.js".to_string(), "Smart Contracts".to_string()];
        let chain = Taxonomy::builtin().track("blockchain").cloned().unwrap();
        let rec = track_recommendations(&chain, &covered);
        assert!(rec.recommended_skills.is_empty());
        assert_eq!(rec.preparation_tips, vec!["You have the core skills for this track!"]);
    }

    #[test]
    fn test_unmatched_track_scores_from_zero() {
        let matcher = OpportunityMatcher::new(Taxonomy::builtin());
        let analysis = analysis(&[]);
        // (0 + 0.225 + 0.246) * 1.2 = 0.5652 >= 0.55
        let raw = matcher.compatibility(&analysis, "cloud", Some("Beginner"));
        assert!((raw - 0.5652).abs() < 1e-9);
        assert_eq!(
            matcher
                .match_opportunities(&analysis, &[opportunity("Cloud", "cloud", Some("Beginner"))])
                .len(),
            1
        );
    }
}
