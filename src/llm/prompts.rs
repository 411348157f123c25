/// Input budget for a single prompt, leaving room in the model context for
/// the generated reply.
pub const MAX_PROMPT_TOKENS: usize = 800;

/// Rough words-to-tokens ratio used to estimate prompt size.
pub const TOKENS_PER_WORD: f64 = 1.3;

const BASE_PROMPT: &str = "Analyze this section of a resume and provide a JSON response. \
Focus on specific details and quantifiable metrics.";

/// The four independent sub-analyses of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubAnalysis {
    TechnicalDepth,
    SoftSkills,
    ProjectAnalysis,
    GrowthPotential,
}

impl SubAnalysis {
    pub const ALL: [SubAnalysis; 4] = [
        SubAnalysis::TechnicalDepth,
        SubAnalysis::SoftSkills,
        SubAnalysis::ProjectAnalysis,
        SubAnalysis::GrowthPotential,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SubAnalysis::TechnicalDepth => "technical_depth",
            SubAnalysis::SoftSkills => "soft_skills",
            SubAnalysis::ProjectAnalysis => "project_analysis",
            SubAnalysis::GrowthPotential => "growth_potential",
        }
    }

    /// Field holding the 0-10 headline score of this sub-analysis.
    pub fn score_field(&self) -> &'static str {
        match self {
            SubAnalysis::TechnicalDepth => "skill_depth_score",
            SubAnalysis::SoftSkills => "score",
            SubAnalysis::ProjectAnalysis => "project_score",
            SubAnalysis::GrowthPotential => "score",
        }
    }

    /// Field that free-text list items are recovered into.
    pub fn list_field(&self) -> &'static str {
        match self {
            SubAnalysis::TechnicalDepth => "key_technical_achievements",
            SubAnalysis::SoftSkills => "key_attributes",
            SubAnalysis::ProjectAnalysis => "recommended_projects",
            SubAnalysis::GrowthPotential => "growth_indicators",
        }
    }

    fn instructions(&self) -> &'static str {
        match self {
            SubAnalysis::TechnicalDepth => {
                "Assess technical depth. Keys: skill_depth_score (0-10), \
                 key_technical_achievements (list), project_score (0-10), technical_complexity."
            }
            SubAnalysis::SoftSkills => {
                "Assess soft skills. Keys: score (0-10), communication (0-10), \
                 leadership (0-10), teamwork (0-10), key_attributes (list)."
            }
            SubAnalysis::ProjectAnalysis => {
                "Evaluate the projects. Keys: project_score (0-10), technical_complexity, \
                 recommended_projects (list)."
            }
            SubAnalysis::GrowthPotential => {
                "Assess growth potential. Keys: score (0-10), growth_indicators (list), \
                 improvement_areas (list)."
            }
        }
    }
}

pub fn build_prompt(kind: SubAnalysis, text: &str) -> String {
    let prompt = format!("{} {}\n\n{}", BASE_PROMPT, kind.instructions(), text);
    truncate_to_budget(&prompt, MAX_PROMPT_TOKENS)
}

pub fn estimate_tokens(prompt: &str) -> f64 {
    prompt.split_whitespace().count() as f64 * TOKENS_PER_WORD
}

/// Cuts the prompt to the words that fit the token budget. Prompts already
/// within budget are returned untouched.
pub fn truncate_to_budget(prompt: &str, max_tokens: usize) -> String {
    if estimate_tokens(prompt) <= max_tokens as f64 {
        return prompt.to_string();
    }

    let max_words = (max_tokens as f64 / TOKENS_PER_WORD) as usize;
    tracing::debug!("Truncating prompt to {} words", max_words);
    prompt
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_is_untouched() {
        let prompt = build_prompt(SubAnalysis::SoftSkills, "Led a team of four.\nShipped v2.");
        assert!(prompt.starts_with("Analyze this section of a resume"));
        assert!(prompt.ends_with("Led a team of four.\nShipped v2."));
    }

    #[test]
    fn test_long_prompt_is_cut_to_budget() {
        let text = "word ".repeat(2_000);
        let prompt = build_prompt(SubAnalysis::TechnicalDepth, &text);
        assert_eq!(prompt.split_whitespace().count(), 615);
        assert!(estimate_tokens(&prompt) <= MAX_PROMPT_TOKENS as f64);
        assert!(prompt.contains("skill_depth_score"));
    }

    #[test]
    fn test_fields_per_sub_analysis() {
        let keys: Vec<_> = SubAnalysis::ALL.iter().map(|k| k.key()).collect();
        assert_eq!(keys, ["technical_depth", "soft_skills", "project_analysis", "growth_potential"]);
        assert_eq!(SubAnalysis::ProjectAnalysis.score_field(), "project_score");
        assert_eq!(SubAnalysis::GrowthPotential.list_field(), "growth_indicators");
    }
}
