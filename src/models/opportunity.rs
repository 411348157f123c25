use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An externally supplied hackathon or similar opportunity.
///
/// Fields the matcher does not read are carried through untouched. The
/// fields it does read are taken as text when they are strings or numbers
/// and dropped otherwise, so one malformed record never rejects the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Opportunity {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub primary_track: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TechnicalMatch {
    pub score: f64,
    pub strengths: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMatch {
    pub score: f64,
    pub complexity_match: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackRecommendations {
    pub track_name: String,
    /// Recommended track skills not found among the candidate's achievements.
    pub recommended_skills: Vec<String>,
    pub min_score_required: f64,
    pub preparation_tips: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpportunityMatch {
    #[serde(rename = "hackathon")]
    pub opportunity: Opportunity,
    /// Rounded to 2 decimals, in [0, 1].
    pub compatibility_score: f64,
    pub technical_match: TechnicalMatch,
    pub project_match: ProjectMatch,
    pub recommendations: TrackRecommendations,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mistyped_fields_do_not_reject_the_record() {
        let opportunities: Vec<Opportunity> = serde_json::from_str(
            r#"[
                {"id": 1, "name": "ML Jam", "primary_track": "ai_ml", "difficulty": "Beginner"},
                {"name": "Q", "primary_track": 7},
                {"name": ["not", "text"], "primary_track": {"id": "cloud"}, "difficulty": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(opportunities[0].id.as_deref(), Some("1"));
        assert_eq!(opportunities[0].primary_track.as_deref(), Some("ai_ml"));
        assert_eq!(opportunities[1].primary_track.as_deref(), Some("7"));
        assert!(opportunities[2].name.is_none());
        assert!(opportunities[2].primary_track.is_none());
        assert!(opportunities[2].difficulty.is_none());
    }
}
