use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::github::{GitHubReport, GitHubSignal};
use super::opportunity::OpportunityMatch;
use super::profile::SourceCompleteness;
use super::semantic::{GrowthAssessment, ProjectEvaluation, SemanticAnalysis, TechnicalAnalysis};
use super::skills::{DomainScores, ExtractedSkills};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TraditionalAnalysis {
    pub domain_scores: DomainScores,
    pub skills_analysis: ExtractedSkills,
    pub github_analysis: Option<GitHubSignal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnhancedScore {
    pub score: f64,
    pub technical_depth: TechnicalAnalysis,
    pub project_insights: ProjectEvaluation,
    pub growth_potential: GrowthAssessment,
    pub source_completeness: SourceCompleteness,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningPathEntry {
    pub domain: String,
    pub focus_areas: Vec<String>,
    pub suggested_projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub strongest_domains: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub recommended_focus: Vec<String>,
    pub learning_path: Vec<LearningPathEntry>,
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        self.strongest_domains.is_empty()
            && self.improvement_areas.is_empty()
            && self.recommended_focus.is_empty()
            && self.learning_path.is_empty()
    }
}

/// Traditional and semantic results blended into one per-domain view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeAnalysis {
    pub enhanced_scores: BTreeMap<String, EnhancedScore>,
    pub llm_analysis: SemanticAnalysis,
    pub traditional_analysis: TraditionalAnalysis,
    pub recommendations: Recommendations,
}

/// Output of the `analyze_candidate` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub resume_analysis: ResumeAnalysis,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_analysis: Option<GitHubReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackathon_matches: Option<Vec<OpportunityMatch>>,
}
