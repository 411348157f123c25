use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::combiner::ScoreCombiner;
use crate::analysis::matcher::OpportunityMatcher;
use crate::analysis::skill_extractor::SkillExtractor;
use crate::analysis::traditional_scorer::TraditionalScorer;
use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::github::GitHubProvider;
use crate::models::{
    CandidateAnalysis, CandidateRequest, GitHubSnapshot, LinkedInProfile, ProfileDocument,
    SourceKind,
};
use crate::semantic::SemanticAnalyzer;
use crate::sources::{self, decode_document, normalize, PdfDecoder};
use crate::taxonomy::Taxonomy;

/// Request-scoped orchestration: collect sources concurrently, score them
/// two ways, blend, then match opportunities.
pub struct AnalysisPipeline {
    github: Arc<dyn GitHubProvider>,
    analyzer: Arc<dyn SemanticAnalyzer>,
    decoder: Arc<dyn PdfDecoder>,
    skill_extractor: SkillExtractor,
    scorer: TraditionalScorer,
    combiner: ScoreCombiner,
    matcher: OpportunityMatcher,
    taxonomy: Arc<Taxonomy>,
    config: PipelineConfig,
}

impl AnalysisPipeline {
    pub fn new(
        taxonomy: Arc<Taxonomy>,
        github: Arc<dyn GitHubProvider>,
        analyzer: Arc<dyn SemanticAnalyzer>,
        decoder: Arc<dyn PdfDecoder>,
        config: PipelineConfig,
    ) -> Result<Self> {
        Ok(Self {
            github,
            analyzer,
            decoder,
            skill_extractor: SkillExtractor::new(taxonomy.clone())?,
            scorer: TraditionalScorer::new(taxonomy.clone()),
            combiner: ScoreCombiner::new(),
            matcher: OpportunityMatcher::new(taxonomy.clone()),
            taxonomy,
            config,
        })
    }

    pub async fn analyze_candidate(&self, request: CandidateRequest) -> Result<CandidateAnalysis> {
        tracing::info!(
            "Analyzing candidate (github: {}, linkedin: {}, opportunities: {})",
            request.github_username.as_deref().unwrap_or("-"),
            request.linkedin_pdf.is_some() || request.linkedin_url.is_some(),
            request.hackathons.as_ref().map(Vec::len).unwrap_or(0)
        );

        let pb = self.spinner("Collecting profile sources");

        let (resume, github, linkedin) = tokio::join!(
            self.collect_resume(request.resume_pdf),
            self.collect_github(request.github_username.as_deref(), request.require_github),
            self.collect_linkedin(request.linkedin_pdf, request.linkedin_url.as_deref()),
        );

        pb.finish_and_clear();

        let resume = resume?;
        let snapshot = match github {
            Ok(snapshot) => snapshot,
            Err(e) if request.require_github => return Err(e),
            Err(e) => {
                tracing::warn!("Continuing without GitHub: {}", e);
                None
            }
        };
        let linkedin = match linkedin {
            Ok(text) => text,
            Err(e) if request.require_linkedin => return Err(e),
            Err(e) => {
                tracing::warn!("Continuing without LinkedIn: {}", e);
                None
            }
        };

        let now = Utc::now();
        let (github_text, signal, report) = match snapshot {
            Some(snapshot) => {
                let signal = sources::github::build_signal(&snapshot, &self.taxonomy, now);
                let report = sources::github::build_report(&snapshot, &signal);
                if self.config.github_authenticated {
                    let text = sources::github::summarize(&snapshot.user, &snapshot.repositories);
                    (Some(text), Some(signal), Some(report))
                } else {
                    tracing::info!("No GitHub credential, profile is reported but not scored");
                    (None, None, Some(report))
                }
            }
            None => (None, None, None),
        };

        let combined = ProfileDocument::new(Some(resume), github_text, linkedin).concatenated();
        let document = ProfileDocument::parse(&combined);
        let completeness = document.completeness();
        tracing::debug!("Source completeness: {:?}", completeness);

        let skills = self
            .skill_extractor
            .extract(document.section(SourceKind::Resume).unwrap_or_default());
        let traditional = self.scorer.analyze(skills, signal);

        tracing::info!("Running {} semantic analyzer", self.analyzer.name());
        let semantic = self.analyzer.analyze(&combined).await?;

        let resume_analysis = self.combiner.combine(traditional, semantic, completeness)?;

        let hackathon_matches = request
            .hackathons
            .filter(|h| !h.is_empty())
            .map(|h| self.matcher.match_opportunities(&resume_analysis, &h));

        Ok(CandidateAnalysis {
            resume_analysis,
            github_analysis: report,
            hackathon_matches,
        })
    }

    pub async fn analyze_linkedin(&self, pdf_content: Vec<u8>) -> Result<LinkedInProfile> {
        tracing::info!("Analyzing LinkedIn export ({} bytes)", pdf_content.len());
        let text = decode_document(self.decoder.clone(), pdf_content, "LinkedIn PDF").await?;
        Ok(sources::extract_profile(&text))
    }

    async fn collect_resume(&self, bytes: Vec<u8>) -> Result<String> {
        let text = decode_document(self.decoder.clone(), bytes, "resume PDF").await?;
        let text = normalize(&text);
        tracing::debug!("Resume text: {} chars", text.len());
        Ok(text)
    }

    async fn collect_github(
        &self,
        username: Option<&str>,
        required: bool,
    ) -> Result<Option<GitHubSnapshot>> {
        let Some(username) = username.map(str::trim).filter(|u| !u.is_empty()) else {
            return Ok(None);
        };

        // A required profile has to be scored, which needs a credential
        if required && !self.config.github_authenticated {
            return Err(Error::Config(format!(
                "GITHUB_TOKEN not set, cannot score required GitHub profile '{}'",
                username
            )));
        }

        tracing::info!("Fetching GitHub profile for: {}", username);
        let snapshot = self.github.fetch_snapshot(username).await?;
        tracing::info!(
            "Fetched {} repositories and {} events",
            snapshot.repositories.len(),
            snapshot.events.len()
        );
        Ok(Some(snapshot))
    }

    async fn collect_linkedin(&self, pdf: Option<Vec<u8>>, url: Option<&str>) -> Result<Option<String>> {
        let Some(bytes) = pdf else {
            return match url {
                Some(url) => Err(Error::Config(format!(
                    "LinkedIn profile {} given without a PDF export; profiles are not fetched by URL",
                    url
                ))),
                None => Ok(None),
            };
        };

        let text = decode_document(self.decoder.clone(), bytes, "LinkedIn PDF").await?;
        Ok(Some(sources::extract_profile(&text).to_text()))
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
