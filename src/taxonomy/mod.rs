//! Domain and track catalog.
//!
//! The five competency domains, their keyword lists and weight tuples, and
//! the hackathon track catalog are data, not code: the built-in catalog is
//! `catalog.json` embedded at compile time, and a replacement can be loaded
//! with [`Taxonomy::from_json`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use crate::error::{Error, Result};

const BUILTIN_CATALOG: &str = include_str!("catalog.json");

static BUILTIN: LazyLock<Arc<Taxonomy>> = LazyLock::new(|| {
    Arc::new(Taxonomy::from_json(BUILTIN_CATALOG).expect("embedded catalog.json is valid"))
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainWeights {
    pub skills: f64,
    pub experience: f64,
    pub github: f64,
    pub education: f64,
}

impl DomainWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.github + self.education
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainSpec {
    pub id: String,
    pub label: String,
    /// Matched as case-insensitive substrings of resume text.
    pub keywords: Vec<String>,
    /// Matched as substrings of GitHub repository topics.
    pub github_topics: Vec<String>,
    /// Words that name the domain in "N years of experience in ..." phrases.
    pub experience_terms: Vec<String>,
    pub weights: DomainWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSpec {
    pub id: String,
    pub name: String,
    pub min_score: f64,
    pub recommended_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxonomy {
    domains: Vec<DomainSpec>,
    tracks: Vec<TrackSpec>,
    difficulty_multipliers: BTreeMap<String, f64>,
}

impl Taxonomy {
    /// The embedded catalog, parsed once per process.
    pub fn builtin() -> Arc<Taxonomy> {
        BUILTIN.clone()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let taxonomy: Taxonomy = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("Invalid domain catalog: {}", e)))?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<()> {
        if self.domains.is_empty() {
            return Err(Error::Config("Domain catalog lists no domains".to_string()));
        }

        for domain in &self.domains {
            let total = domain.weights.total();
            if (total - 1.0).abs() > 1e-6 {
                return Err(Error::Config(format!(
                    "Weights for domain '{}' sum to {:.3}, expected 1.0",
                    domain.id, total
                )));
            }
            if [
                domain.weights.skills,
                domain.weights.experience,
                domain.weights.github,
                domain.weights.education,
            ]
            .iter()
            .any(|w| *w < 0.0)
            {
                return Err(Error::Config(format!(
                    "Domain '{}' has a negative weight",
                    domain.id
                )));
            }
        }

        for track in &self.tracks {
            if !(0.0..=1.0).contains(&track.min_score) {
                return Err(Error::Config(format!(
                    "Track '{}' min_score {} outside [0, 1]",
                    track.id, track.min_score
                )));
            }
        }

        Ok(())
    }

    pub fn domains(&self) -> &[DomainSpec] {
        &self.domains
    }

    pub fn domain_ids(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(|d| d.id.as_str())
    }

    pub fn domain(&self, id: &str) -> Option<&DomainSpec> {
        self.domains.iter().find(|d| d.id == id)
    }

    pub fn tracks(&self) -> &[TrackSpec] {
        &self.tracks
    }

    pub fn track(&self, id: &str) -> Option<&TrackSpec> {
        self.tracks.iter().find(|t| t.id == id)
    }

    /// Unknown or missing difficulty levels leave the score unchanged.
    pub fn difficulty_multiplier(&self, difficulty: Option<&str>) -> f64 {
        difficulty
            .and_then(|d| self.difficulty_multipliers.get(d))
            .copied()
            .unwrap_or(1.0)
    }
}
