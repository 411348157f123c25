use serde::{Deserialize, Serialize};

pub const SECTION_DELIMITER: &str = "\n===\n";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Resume,
    GitHub,
    LinkedIn,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Resume, SourceKind::GitHub, SourceKind::LinkedIn];

    pub fn tag(&self) -> &'static str {
        match self {
            SourceKind::Resume => "RESUME SECTION:",
            SourceKind::GitHub => "GITHUB SECTION:",
            SourceKind::LinkedIn => "LINKEDIN SECTION:",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Resume => write!(f, "resume"),
            SourceKind::GitHub => write!(f, "github"),
            SourceKind::LinkedIn => write!(f, "linkedin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileSection {
    pub kind: SourceKind,
    pub text: String,
}

/// Up to three tagged source sections for one candidate.
///
/// Sections are kept in [`SourceKind::ALL`] order; the document is never
/// mutated once built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileDocument {
    sections: Vec<ProfileSection>,
}

impl ProfileDocument {
    pub fn new(resume: Option<String>, github: Option<String>, linkedin: Option<String>) -> Self {
        let sections = SourceKind::ALL
            .into_iter()
            .zip([resume, github, linkedin])
            .filter_map(|(kind, text)| text.map(|text| ProfileSection { kind, text }))
            .collect();
        Self { sections }
    }

    /// Recovers the sections of a blob produced by [`ProfileDocument::concatenated`].
    pub fn parse(concatenated: &str) -> Self {
        let mut resume = None;
        let mut github = None;
        let mut linkedin = None;

        for part in concatenated.split(SECTION_DELIMITER) {
            for kind in SourceKind::ALL {
                if let Some((_, body)) = part.split_once(kind.tag()) {
                    let body = Some(body.trim().to_string());
                    match kind {
                        SourceKind::Resume => resume = body,
                        SourceKind::GitHub => github = body,
                        SourceKind::LinkedIn => linkedin = body,
                    }
                    break;
                }
            }
        }

        Self::new(resume, github, linkedin)
    }

    pub fn sections(&self) -> &[ProfileSection] {
        &self.sections
    }

    pub fn section(&self, kind: SourceKind) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .map(|s| s.text.as_str())
    }

    pub fn has_content(&self, kind: SourceKind) -> bool {
        self.section(kind)
            .map(|text| !text.trim().is_empty())
            .unwrap_or(false)
    }

    pub fn completeness(&self) -> SourceCompleteness {
        SourceCompleteness {
            resume: self.has_content(SourceKind::Resume),
            github: self.has_content(SourceKind::GitHub),
            linkedin: self.has_content(SourceKind::LinkedIn),
        }
    }

    /// Tagged sections joined by the `===` delimiter.
    pub fn concatenated(&self) -> String {
        let parts: Vec<String> = self
            .sections
            .iter()
            .map(|s| format!("{}\n{}", s.kind.tag(), s.text))
            .collect();
        format!("\n\n{}\n", parts.join(&format!("\n{}\n", SECTION_DELIMITER)))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceCompleteness {
    pub resume: bool,
    pub github: bool,
    pub linkedin: bool,
}
