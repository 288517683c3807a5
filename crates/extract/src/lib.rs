pub mod extractor;
pub mod llm;
pub mod prompt;
pub mod schema;
pub mod summarizer;

pub use extractor::{DiscardReason, ExtractionOutcome, extract_triple, parse_triple_response};
pub use llm::{GeminiClient, LanguageModel};
pub use schema::Triple;
pub use summarizer::summarize_chunk;
