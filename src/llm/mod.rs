pub mod provider;
pub mod huggingface;
pub mod prompts;
pub mod parser;

pub use provider::InferenceProvider;
pub use huggingface::HuggingFaceProvider;
pub use prompts::SubAnalysis;
pub use parser::{parse_reply, StructuredReply};
