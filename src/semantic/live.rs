use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::llm::prompts::build_prompt;
use crate::llm::{parse_reply, InferenceProvider, StructuredReply, SubAnalysis};
use crate::models::{
    GrowthAssessment, ProjectEvaluation, SemanticAnalysis, SoftSkillsAnalysis, TechnicalAnalysis,
};
use crate::rate_limiter::RateLimiter;
use crate::semantic::SemanticAnalyzer;

/// Analyzer backed by a text-generation service. The four sub-analyses are
/// requested concurrently and combined in fixed order.
pub struct LiveAnalyzer {
    provider: Arc<dyn InferenceProvider>,
    rate_limiter: RateLimiter,
}

impl LiveAnalyzer {
    pub fn new(provider: Arc<dyn InferenceProvider>, rate_limiter: RateLimiter) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }

    async fn ask<T: DeserializeOwned>(&self, kind: SubAnalysis, text: &str) -> Result<T> {
        self.rate_limiter.try_acquire().await?;

        tracing::debug!("Requesting {} from {}", kind.key(), self.provider.name());
        let reply = self.provider.generate(&build_prompt(kind, text)).await?;
        let reply = parse_reply(&reply).map_err(|e| label(kind, e))?;

        let value = reply_to_object(kind, reply)?;
        serde_json::from_value(value)
            .map_err(|e| Error::Parse(format!("{} reply: {}", kind.key(), e)))
    }
}

fn label(kind: SubAnalysis, err: Error) -> Error {
    match err {
        Error::Parse(message) => Error::Parse(format!("{} {}", kind.key(), message)),
        other => other,
    }
}

/// Shapes a reply into the sub-analysis object. A JSON reply must carry the
/// headline score, either under its own field name or as a bare `score`.
fn reply_to_object(kind: SubAnalysis, reply: StructuredReply) -> Result<Value> {
    match reply {
        StructuredReply::Json(Value::Object(mut object)) => {
            let headline = object
                .get(kind.score_field())
                .or_else(|| object.get("score"))
                .and_then(Value::as_f64)
                .ok_or_else(|| {
                    Error::Parse(format!(
                        "{} reply: missing numeric {}",
                        kind.key(),
                        kind.score_field()
                    ))
                })?;
            object.insert(kind.score_field().to_string(), json!(headline));
            Ok(Value::Object(object))
        }
        StructuredReply::Json(_) => Err(Error::Parse(format!(
            "{} reply: expected a JSON object",
            kind.key()
        ))),
        StructuredReply::Extracted { score, items } => {
            let mut object = Map::new();
            object.insert(kind.score_field().to_string(), json!(score));
            object.insert(kind.list_field().to_string(), json!(items));
            Ok(Value::Object(object))
        }
    }
}

fn clamp_score(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 10.0)
    } else {
        0.0
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[async_trait]
impl SemanticAnalyzer for LiveAnalyzer {
    async fn analyze(&self, text: &str) -> Result<SemanticAnalysis> {
        tracing::info!("Running semantic analysis via {}", self.provider.name());

        let (mut technical, mut soft, mut project, mut growth) = futures::try_join!(
            self.ask::<TechnicalAnalysis>(SubAnalysis::TechnicalDepth, text),
            self.ask::<SoftSkillsAnalysis>(SubAnalysis::SoftSkills, text),
            self.ask::<ProjectEvaluation>(SubAnalysis::ProjectAnalysis, text),
            self.ask::<GrowthAssessment>(SubAnalysis::GrowthPotential, text),
        )?;

        technical.skill_depth_score = clamp_score(technical.skill_depth_score);
        technical.project_score = clamp_score(technical.project_score);
        soft.score = clamp_score(soft.score);
        soft.communication = clamp_score(soft.communication);
        soft.leadership = clamp_score(soft.leadership);
        soft.teamwork = clamp_score(soft.teamwork);
        project.project_score = clamp_score(project.project_score);
        growth.score = clamp_score(growth.score);

        let overall_score = round2(
            (technical.skill_depth_score + soft.score + project.project_score + growth.score) / 4.0,
        );

        Ok(SemanticAnalysis {
            technical_analysis: technical,
            soft_skills_analysis: soft,
            project_evaluation: project,
            growth_assessment: growth,
            overall_score,
        })
    }

    fn name(&self) -> &str {
        "live"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Replies keyed by a distinctive word in each sub-analysis prompt.
    struct ScriptedProvider {
        replies: Vec<(&'static str, &'static str)>,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl InferenceProvider for ScriptedProvider {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .iter()
                .find(|(marker, _)| prompt.contains(marker))
                .map(|(_, reply)| reply.to_string())
                .ok_or_else(|| Error::InferenceApi("no scripted reply".to_string()))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn analyzer(replies: Vec<(&'static str, &'static str)>, limit: u32) -> LiveAnalyzer {
        LiveAnalyzer::new(
            Arc::new(ScriptedProvider {
                replies,
                prompts: Mutex::new(Vec::new()),
            }),
            RateLimiter::new(limit),
        )
    }

    fn full_script() -> Vec<(&'static str, &'static str)> {
        vec![
            ("technical depth", r#"{"skill_depth_score": 12, "key_technical_achievements": ["Rust"], "technical_complexity": "High"}"#),
            ("soft skills", r#"```json
{"score": 6, "communication": 7}
```"#),
            ("Evaluate the projects", "Project score: 8 and recommended projects: [CLI tool, Web crawler]"),
            ("growth potential", r#"{"score": 7.0, "improvement_areas": ["Testing"]}"#),
        ]
    }

    #[tokio::test]
    async fn test_combines_sub_analyses() {
        let analysis = analyzer(full_script(), 60).analyze("resume text").await.unwrap();

        assert_eq!(analysis.technical_analysis.skill_depth_score, 10.0);
        assert_eq!(analysis.technical_analysis.key_technical_achievements, vec!["Rust"]);
        assert_eq!(analysis.soft_skills_analysis.score, 6.0);
        assert_eq!(analysis.project_evaluation.project_score, 8.0);
        assert_eq!(
            analysis.project_evaluation.recommended_projects,
            vec!["CLI tool", "Web crawler"]
        );
        assert_eq!(analysis.growth_assessment.improvement_areas, vec!["Testing"]);
        assert_eq!(analysis.overall_score, 7.75);
    }

    #[tokio::test]
    async fn test_unparseable_reply_fails() {
        let mut script = full_script();
        script[2] = ("Evaluate the projects", "Looks like a solid portfolio overall.");
        let err = analyzer(script, 60).analyze("resume text").await.unwrap_err();
        assert!(matches!(err, Error::Parse(ref m) if m.starts_with("project_analysis")));
    }

    #[tokio::test]
    async fn test_json_without_headline_score_fails() {
        let mut script = full_script();
        script[3] = ("growth potential", r#"{"growth_indicators": ["Initiative"]}"#);
        let err = analyzer(script, 60).analyze("resume text").await.unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[tokio::test]
    async fn test_rate_ceiling_is_surfaced() {
        let err = analyzer(full_script(), 3).analyze("resume text").await.unwrap_err();
        assert!(matches!(err, Error::RateLimitExceeded(_)));
    }
}
