use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BasicInfo {
    pub name: Option<String>,
    pub headline: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub title: Option<String>,
    pub date_range: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub school: Option<String>,
    pub degree: Option<String>,
    pub date_range: Option<String>,
}

/// Structured view of a LinkedIn profile export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LinkedInProfile {
    pub basic_info: BasicInfo,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
}

impl LinkedInProfile {
    /// Renders the profile as the text block used for the LinkedIn section.
    pub fn to_text(&self) -> String {
        let mut text = String::from("LinkedIn Profile\n\n");
        let or_empty = |field: &Option<String>| field.clone().unwrap_or_default();

        let info = &self.basic_info;
        if info.name.is_some() || info.headline.is_some() || info.location.is_some() {
            text.push_str(&format!("Name: {}\n", or_empty(&info.name)));
            text.push_str(&format!("Headline: {}\n", or_empty(&info.headline)));
            text.push_str(&format!("Location: {}\n\n", or_empty(&info.location)));
        }

        text.push_str("Experience:\n");
        for exp in &self.experience {
            text.push_str(&format!(
                "- {} at {}\n",
                or_empty(&exp.title),
                or_empty(&exp.company)
            ));
            text.push_str(&format!("  {}\n", or_empty(&exp.date_range)));
            if let Some(ref description) = exp.description {
                text.push_str(&format!("  {}\n", description));
            }
            text.push('\n');
        }

        text.push_str("Education:\n");
        for edu in &self.education {
            text.push_str(&format!(
                "- {} from {}\n",
                or_empty(&edu.degree),
                or_empty(&edu.school)
            ));
            if let Some(ref date_range) = edu.date_range {
                text.push_str(&format!("  {}\n", date_range));
            }
            text.push('\n');
        }

        text.push_str("Skills:\n");
        for skill in &self.skills {
            text.push_str(&format!("- {}\n", skill));
        }

        text
    }
}
