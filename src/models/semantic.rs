use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TechnicalAnalysis {
    pub skill_depth_score: f64,
    pub key_technical_achievements: Vec<String>,
    pub project_score: f64,
    pub technical_complexity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SoftSkillsAnalysis {
    pub score: f64,
    pub communication: f64,
    pub leadership: f64,
    pub teamwork: f64,
    pub key_attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectEvaluation {
    pub project_score: f64,
    pub technical_complexity: String,
    pub recommended_projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GrowthAssessment {
    pub score: f64,
    pub growth_indicators: Vec<String>,
    pub improvement_areas: Vec<String>,
}

/// Qualitative assessment of a whole profile, all scores on a 0-10 scale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SemanticAnalysis {
    pub technical_analysis: TechnicalAnalysis,
    pub soft_skills_analysis: SoftSkillsAnalysis,
    pub project_evaluation: ProjectEvaluation,
    pub growth_assessment: GrowthAssessment,
    pub overall_score: f64,
}
