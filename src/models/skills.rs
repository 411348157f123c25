use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::taxonomy::Taxonomy;

/// Per-domain score on the 0-10 scale, keyed by domain id.
pub type DomainScores = BTreeMap<String, f64>;

/// Keyword hits and years of experience for every catalog domain.
///
/// Both maps always hold a key for each domain of the taxonomy they were
/// built from, even when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractedSkills {
    pub skills: BTreeMap<String, Vec<String>>,
    pub experience_years: BTreeMap<String, u32>,
}

impl ExtractedSkills {
    pub fn empty(taxonomy: &Taxonomy) -> Self {
        Self {
            skills: taxonomy
                .domain_ids()
                .map(|id| (id.to_string(), Vec::new()))
                .collect(),
            experience_years: taxonomy.domain_ids().map(|id| (id.to_string(), 0)).collect(),
        }
    }

    pub fn skills_for(&self, domain: &str) -> &[String] {
        self.skills.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn years_for(&self, domain: &str) -> u32 {
        self.experience_years.get(domain).copied().unwrap_or(0)
    }
}
