use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use profilescore::config::AnalyzerBackend;
use profilescore::models::{CandidateRequest, LinkedInRequest};
use profilescore::semantic::build_analyzer;
use profilescore::sources::PdfExtractDecoder;
use profilescore::{
    AnalysisPipeline, Config, GitHubClient, PipelineConfig, RateLimiter, Taxonomy,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
enum Command {
    /// Score a resume (plus optional GitHub and LinkedIn) and match hackathons
    AnalyzeCandidate,
    /// Extract the structured profile from a LinkedIn PDF export
    AnalyzeLinkedin,
}

#[derive(Parser, Debug)]
#[command(name = "profilescore")]
#[command(version = "0.1.0")]
#[command(about = "Score candidate profiles and match them against hackathon tracks")]
struct Args {
    /// Command to run
    #[arg(value_enum)]
    command: Command,

    /// Request as a JSON document
    input: String,

    /// Semantic analyzer backend (overrides SEMANTIC_ANALYZER)
    #[arg(long, value_enum)]
    analyzer: Option<AnalyzerBackend>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Show a progress spinner on stderr
    #[arg(long)]
    progress: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries only the JSON result
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("profilescore=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(backend) = args.analyzer {
        config.analyzer_backend = backend;
    }
    // LinkedIn extraction never consults the semantic analyzer
    if args.command == Command::AnalyzeLinkedin {
        config.analyzer_backend = AnalyzerBackend::Stub;
    }
    config.validate()?;

    let taxonomy = match config.catalog_path {
        Some(ref path) => {
            tracing::info!("Loading domain catalog from {}", path);
            Arc::new(Taxonomy::from_path(path)?)
        }
        None => Taxonomy::builtin(),
    };

    let rate_limiter = RateLimiter::new(config.max_requests_per_minute);

    if config.github_token.is_none() {
        tracing::info!("GITHUB_TOKEN not set, GitHub profiles are read anonymously and not scored");
    }
    let github = Arc::new(GitHubClient::new(
        config.github_token.as_deref(),
        &config.github_api_url,
        config.request_timeout,
        rate_limiter.clone(),
    )?);

    let analyzer = build_analyzer(&config, rate_limiter)?;

    let pipeline_config = PipelineConfig {
        show_progress: args.progress,
        ..PipelineConfig::from(&config)
    };

    let pipeline = AnalysisPipeline::new(
        taxonomy,
        github,
        analyzer,
        Arc::new(PdfExtractDecoder),
        pipeline_config,
    )?;

    match args.command {
        Command::AnalyzeCandidate => {
            let request: CandidateRequest = serde_json::from_str(&args.input)?;
            let result = pipeline.analyze_candidate(request).await?;
            write_output(&result, &args)?;
        }
        Command::AnalyzeLinkedin => {
            let request: LinkedInRequest = serde_json::from_str(&args.input)?;
            let result = pipeline.analyze_linkedin(request.pdf_content).await?;
            write_output(&result, &args)?;
        }
    }

    Ok(())
}

fn write_output<T: Serialize>(result: &T, args: &Args) -> anyhow::Result<()> {
    let output = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    if let Some(ref path) = args.output {
        std::fs::write(path, &output)?;
        tracing::info!("Output written to: {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}
