use regex::Regex;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::ExtractedSkills;
use crate::taxonomy::{DomainSpec, Taxonomy};

/// Maps normalized text onto the catalog domains: keyword hits and the
/// largest "N years of experience" figure per domain.
pub struct SkillExtractor {
    taxonomy: Arc<Taxonomy>,
    experience_patterns: Vec<ExperiencePatterns>,
}

struct ExperiencePatterns {
    domain: String,
    /// "5 years of experience in machine learning"
    years_first: Regex,
    /// "machine learning engineer with 5 years of experience"
    domain_first: Regex,
}

impl ExperiencePatterns {
    fn compile(domain: &DomainSpec) -> Result<Self> {
        let terms: Vec<String> = if domain.experience_terms.is_empty() {
            vec![regex::escape(&domain.id)]
        } else {
            domain.experience_terms.iter().map(|t| regex::escape(t)).collect()
        };
        let terms = terms.join("|");

        let years_first = Regex::new(&format!(
            r"(?i)(\d+)\s*(?:years?|yrs?).+?(?:experience|exp).+?\b(?:{})\b",
            terms
        ));
        let domain_first = Regex::new(&format!(
            r"(?i)\b(?:{})\b.+?(\d+)\s*(?:years?|yrs?).+?(?:experience|exp)",
            terms
        ));

        match (years_first, domain_first) {
            (Ok(years_first), Ok(domain_first)) => Ok(Self {
                domain: domain.id.clone(),
                years_first,
                domain_first,
            }),
            (Err(e), _) | (_, Err(e)) => Err(Error::Config(format!(
                "Experience terms for domain '{}' do not compile: {}",
                domain.id, e
            ))),
        }
    }

    fn max_years(&self, text: &str) -> u32 {
        [&self.years_first, &self.domain_first]
            .iter()
            .flat_map(|re| re.captures_iter(text))
            .filter_map(|c| c.get(1).and_then(|m| m.as_str().parse::<u32>().ok()))
            .max()
            .unwrap_or(0)
    }
}

impl SkillExtractor {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Result<Self> {
        let experience_patterns = taxonomy
            .domains()
            .iter()
            .map(ExperiencePatterns::compile)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            taxonomy,
            experience_patterns,
        })
    }

    pub fn extract(&self, text: &str) -> ExtractedSkills {
        let mut extracted = ExtractedSkills::empty(&self.taxonomy);
        let lowered = text.to_lowercase();

        for domain in self.taxonomy.domains() {
            let matched: Vec<String> = domain
                .keywords
                .iter()
                .filter(|k| lowered.contains(&k.to_lowercase()))
                .cloned()
                .collect();
            extracted.skills.insert(domain.id.clone(), matched);
        }

        for patterns in &self.experience_patterns {
            extracted
                .experience_years
                .insert(patterns.domain.clone(), patterns.max_years(text));
        }

        tracing::debug!(
            "Matched {} keywords across {} domains",
            extracted.skills.values().map(Vec::len).sum::<usize>(),
            extracted.skills.len()
        );
        extracted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::normalize;

    fn extractor() -> SkillExtractor {
        SkillExtractor::new(Taxonomy::builtin()).unwrap()
    }

    #[test]
    fn test_every_domain_present_for_empty_text() {
        let skills = extractor().extract("");
        for id in Taxonomy::builtin().domain_ids() {
            assert!(skills.skills_for(id).is_empty());
            assert_eq!(skills.years_for(id), 0);
        }
        assert_eq!(skills.skills.len(), 5);
        assert_eq!(skills.experience_years.len(), 5);
    }

    #[test]
    fn test_keyword_matching_is_case_insensitive() {
        let skills = extractor().extract("Built PyTorch models and a React frontend on AWS with Docker");
        assert_eq!(skills.skills_for("ai_ml"), ["pytorch"]);
        assert_eq!(skills.skills_for("web_dev"), ["react", "frontend"]);
        assert_eq!(skills.skills_for("cloud"), ["aws", "docker"]);
        assert!(skills.skills_for("blockchain").is_empty());
    }

    #[test]
    fn test_keywords_survive_normalization() {
        for domain in Taxonomy::builtin().domains() {
            for keyword in &domain.keywords {
                assert_eq!(&normalize(keyword), keyword, "keyword in {}", domain.id);
            }
        }

        let skills = extractor().extract(&normalize("Owned the CI/CD pipeline (GitHub Actions)"));
        assert_eq!(skills.skills_for("cloud"), ["cicd"]);
    }

    #[test]
    fn test_experience_years_take_the_maximum() {
        let text = "3 years of professional experience in machine learning.\n\
                    Machine learning lead with 6 years industry experience.\n\
                    2 years of experience with web development.";
        let skills = extractor().extract(text);
        assert_eq!(skills.years_for("ai_ml"), 6);
        assert_eq!(skills.years_for("web_dev"), 2);
        assert_eq!(skills.years_for("blockchain"), 0);
    }

    #[test]
    fn test_domains_do_not_cross_contaminate() {
        let skills = extractor().extract("Solidity developer, 4 years of experience in blockchain");
        assert_eq!(skills.years_for("blockchain"), 4);
        assert_eq!(skills.years_for("ai_ml"), 0);
        assert_eq!(skills.skills_for("blockchain"), ["solidity", "blockchain"]);
        assert!(skills.skills_for("web_dev").is_empty());
    }
}
