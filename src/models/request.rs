use serde::{Deserialize, Deserializer};

use super::opportunity::Opportunity;

/// Input of the `analyze_candidate` command.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRequest {
    #[serde(deserialize_with = "document_bytes")]
    pub resume_pdf: Vec<u8>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "optional_document_bytes")]
    pub linkedin_pdf: Option<Vec<u8>>,
    #[serde(default)]
    pub hackathons: Option<Vec<Opportunity>>,
    /// Fail the analysis instead of dropping GitHub when it cannot be read.
    #[serde(default)]
    pub require_github: bool,
    /// Fail the analysis instead of dropping LinkedIn when it cannot be read.
    #[serde(default)]
    pub require_linkedin: bool,
}

/// Input of the `analyze_linkedin` command.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkedInRequest {
    #[serde(deserialize_with = "document_bytes")]
    pub pdf_content: Vec<u8>,
}

/// Documents arrive as a JSON byte array or as a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum DocumentBytes {
    Bytes(Vec<u8>),
    Text(String),
}

impl From<DocumentBytes> for Vec<u8> {
    fn from(input: DocumentBytes) -> Self {
        match input {
            DocumentBytes::Bytes(bytes) => bytes,
            DocumentBytes::Text(text) => text.into_bytes(),
        }
    }
}

fn document_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    DocumentBytes::deserialize(deserializer).map(Vec::from)
}

fn optional_document_bytes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<u8>>, D::Error> {
    Option::<DocumentBytes>::deserialize(deserializer).map(|input| input.map(Vec::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_array_and_string_inputs() {
        let request: CandidateRequest = serde_json::from_str(
            r#"{"resume_pdf": [37, 80, 68, 70], "linkedin_pdf": "Jane Doe\nEngineer"}"#,
        )
        .unwrap();
        assert_eq!(request.resume_pdf, b"%PDF");
        assert_eq!(request.linkedin_pdf.as_deref(), Some(&b"Jane Doe\nEngineer"[..]));
        assert!(request.github_username.is_none());
        assert!(!request.require_github);
        assert!(!request.require_linkedin);
    }

    #[test]
    fn test_full_candidate_request() {
        let request: CandidateRequest = serde_json::from_str(
            r#"{
                "resume_pdf": "resume text",
                "github_username": "octo",
                "linkedin_url": "https://www.linkedin.com/in/octo",
                "linkedin_pdf": null,
                "hackathons": [{"name": "ML Jam", "primary_track": "ai_ml", "prize": 1000}],
                "require_github": true,
                "require_linkedin": true
            }"#,
        )
        .unwrap();
        assert_eq!(request.github_username.as_deref(), Some("octo"));
        assert!(request.linkedin_pdf.is_none());
        let hackathons = request.hackathons.unwrap();
        assert_eq!(hackathons[0].primary_track.as_deref(), Some("ai_ml"));
        assert_eq!(hackathons[0].extra["prize"], 1000);
        assert!(request.require_github);
        assert!(request.require_linkedin);
    }

    #[test]
    fn test_numeric_opportunity_fields_are_accepted() {
        let request: CandidateRequest = serde_json::from_str(
            r#"{"resume_pdf": "r", "hackathons": [{"id": 1, "primary_track": 7}, {"primary_track": "ai_ml"}]}"#,
        )
        .unwrap();
        let hackathons = request.hackathons.unwrap();
        assert_eq!(hackathons.len(), 2);
        assert_eq!(hackathons[1].primary_track.as_deref(), Some("ai_ml"));
    }

    #[test]
    fn test_resume_is_required() {
        let result = serde_json::from_str::<CandidateRequest>(r#"{"github_username": "octo"}"#);
        assert!(result.is_err());

        let linkedin: LinkedInRequest = serde_json::from_str(r#"{"pdf_content": "Jane"}"#).unwrap();
        assert_eq!(linkedin.pdf_content, b"Jane");
    }
}
