use std::collections::BTreeMap;

use crate::analysis::traditional_scorer::round2;
use crate::error::{Error, Result};
use crate::models::{
    EnhancedScore, LearningPathEntry, Recommendations, ResumeAnalysis, SemanticAnalysis,
    SourceCompleteness, TraditionalAnalysis,
};

const TRADITIONAL_WEIGHT: f64 = 0.4;
const TECHNICAL_WEIGHT: f64 = 0.3;
const PROJECT_WEIGHT: f64 = 0.3;

const MISSING_GITHUB_FACTOR: f64 = 0.8;
const MISSING_LINKEDIN_FACTOR: f64 = 0.9;

const STRONG_THRESHOLD: f64 = 8.0;
const WEAK_THRESHOLD: f64 = 6.0;
const GROWTH_THRESHOLD: f64 = 7.0;

/// Blends traditional and semantic scores per domain.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScoreCombiner;

impl ScoreCombiner {
    pub fn new() -> Self {
        Self
    }

    pub fn combine(
        &self,
        traditional: TraditionalAnalysis,
        semantic: SemanticAnalysis,
        completeness: SourceCompleteness,
    ) -> Result<ResumeAnalysis> {
        let enhanced_scores = self.enhanced_scores(&traditional, &semantic, completeness)?;
        let recommendations = self.recommendations(&enhanced_scores);

        Ok(ResumeAnalysis {
            enhanced_scores,
            llm_analysis: semantic,
            traditional_analysis: traditional,
            recommendations,
        })
    }

    pub fn enhanced_scores(
        &self,
        traditional: &TraditionalAnalysis,
        semantic: &SemanticAnalysis,
        completeness: SourceCompleteness,
    ) -> Result<BTreeMap<String, EnhancedScore>> {
        if traditional.domain_scores.is_empty() {
            return Ok(BTreeMap::new());
        }

        let technical = checked("technical depth score", semantic.technical_analysis.skill_depth_score)?;
        let project = checked("project score", semantic.project_evaluation.project_score)?;

        let github_factor = if completeness.github { 1.0 } else { MISSING_GITHUB_FACTOR };
        let linkedin_factor = if completeness.linkedin { 1.0 } else { MISSING_LINKEDIN_FACTOR };

        traditional
            .domain_scores
            .iter()
            .map(|(domain, score)| {
                let score = checked(&format!("traditional score for {}", domain), *score)?;
                let blended = TRADITIONAL_WEIGHT * score * github_factor * linkedin_factor
                    + TECHNICAL_WEIGHT * technical
                    + PROJECT_WEIGHT * project;

                Ok((
                    domain.clone(),
                    EnhancedScore {
                        score: round2(blended),
                        technical_depth: semantic.technical_analysis.clone(),
                        project_insights: semantic.project_evaluation.clone(),
                        growth_potential: semantic.growth_assessment.clone(),
                        source_completeness: completeness,
                    },
                ))
            })
            .collect()
    }

    pub fn recommendations(&self, enhanced: &BTreeMap<String, EnhancedScore>) -> Recommendations {
        let mut recommendations = Recommendations::default();

        for (domain, detail) in enhanced {
            if detail.score >= STRONG_THRESHOLD {
                recommendations.strongest_domains.push(domain.clone());
            } else if detail.score < WEAK_THRESHOLD {
                recommendations.improvement_areas.push(domain.clone());
            }

            if detail.growth_potential.score >= GROWTH_THRESHOLD {
                recommendations.learning_path.push(LearningPathEntry {
                    domain: domain.clone(),
                    focus_areas: detail.growth_potential.improvement_areas.clone(),
                    suggested_projects: detail.project_insights.recommended_projects.clone(),
                });
            }
        }

        recommendations.recommended_focus = if !recommendations.improvement_areas.is_empty() {
            recommendations.improvement_areas.iter().take(2).cloned().collect()
        } else {
            recommendations.strongest_domains.iter().take(1).cloned().collect()
        };

        recommendations
    }
}

/// Scores entering the blend must be finite and on the 0-10 scale.
fn checked(what: &str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=10.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::AnalysisCombination(format!(
            "{} is {} (expected 0-10)",
            what, value
        )))
    }
}
