pub mod skill_extractor;
pub mod traditional_scorer;
pub mod combiner;
pub mod matcher;
pub mod pipeline;

pub use skill_extractor::SkillExtractor;
pub use traditional_scorer::TraditionalScorer;
pub use combiner::ScoreCombiner;
pub use matcher::OpportunityMatcher;
pub use pipeline::AnalysisPipeline;
