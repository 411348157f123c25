use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error::{Error, Result};

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:score|rating):\s*(\d+(?:\.\d+)?)").unwrap());

static LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)(?:skills|achievements|areas|projects|indicators):\s*\[(.*?)\]").unwrap()
});

/// What could be recovered from a generated reply.
#[derive(Debug, Clone, PartialEq)]
pub enum StructuredReply {
    /// The reply embedded a JSON object.
    Json(Value),
    /// No JSON, but a score and possibly bracketed lists were found in prose.
    Extracted { score: f64, items: Vec<String> },
}

/// Parses a generated reply: embedded JSON first, then pattern extraction.
/// A reply carrying neither is a parse failure, never a guessed score.
pub fn parse_reply(text: &str) -> Result<StructuredReply> {
    if let Ok(json_str) = extract_json(text) {
        match serde_json::from_str::<Value>(&json_str) {
            Ok(value) if value.is_object() => return Ok(StructuredReply::Json(value)),
            Ok(_) => {}
            Err(e) => tracing::debug!("Embedded JSON did not parse: {}", e),
        }
    }

    extract_fallback(text).ok_or_else(|| {
        Error::Parse("inference reply: no JSON object or score found".to_string())
    })
}

fn extract_fallback(text: &str) -> Option<StructuredReply> {
    let score = SCORE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())?;

    let items = LIST_RE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .flat_map(|m| m.as_str().split(','))
        .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    Some(StructuredReply::Extracted { score, items })
}

fn extract_json(text: &str) -> Result<String> {
    // Try to find JSON block in markdown code blocks
    if let Some(start) = text.find("```json") {
        let start = start + 7;
        if let Some(end) = text[start..].find("```") {
            return Ok(text[start..start + end].trim().to_string());
        }
    }

    // Try plain code block
    if let Some(start) = text.find("```") {
        let start = start + 3;
        // Skip any language identifier on the same line
        let start = text[start..]
            .find('\n')
            .map(|i| start + i + 1)
            .unwrap_or(start);
        if let Some(end) = text[start..].find("```") {
            let content = text[start..start + end].trim();
            if content.starts_with('{') {
                return Ok(content.to_string());
            }
        }
    }

    // Try to find raw JSON object
    if let Some(start) = text.find('{') {
        let mut depth = 0;
        let mut end = start;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, c) in text[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match c {
                '\\' if in_string => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        end = start + i + 1;
                        break;
                    }
                }
                _ => {}
            }
        }

        if depth == 0 && end > start {
            return Ok(text[start..end].to_string());
        }
    }

    Err(Error::Parse("No valid JSON found in response".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_json_from_markdown() {
        let input = r#"Here's the analysis:
```json
{"score": 7}
```
"#;
        let result = extract_json(input).unwrap();
        assert_eq!(result, r#"{"score": 7}"#);
    }

    #[test]
    fn test_extract_raw_json() {
        let input = r#"The result is {"score": 6.5, "growth_indicators": ["Initiative"]} overall"#;
        let reply = parse_reply(input).unwrap();
        assert_eq!(
            reply,
            StructuredReply::Json(json!({"score": 6.5, "growth_indicators": ["Initiative"]}))
        );
    }

    #[test]
    fn test_fallback_extraction() {
        let input = "Overall Rating: 7.5 out of 10.\nSkills: [Rust, \"Go\", Kubernetes]\nAreas: [System design]";
        match parse_reply(input).unwrap() {
            StructuredReply::Extracted { score, items } => {
                assert_eq!(score, 7.5);
                assert_eq!(items, vec!["Rust", "Go", "Kubernetes", "System design"]);
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_broken_json_falls_back_to_patterns() {
        let input = "{score: 8, unquoted} score: 8";
        assert!(matches!(
            parse_reply(input).unwrap(),
            StructuredReply::Extracted { score, .. } if score == 8.0
        ));
    }

    #[test]
    fn test_prose_without_score_fails() {
        let err = parse_reply("The candidate seems promising and motivated.").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }
}
