use anyhow::Result;

use crate::llm::LanguageModel;
use crate::prompt;

/// Ask the model for a two-line title+summary of a chunk's text. The
/// response is passed through verbatim; the triple extractor copes with
/// whatever shape comes back. A model-call error propagates to the caller.
pub async fn summarize_chunk<M: LanguageModel>(model: &M, chunk_text: &str) -> Result<String> {
    model
        .generate(&prompt::build_summary_prompt(chunk_text))
        .await
}
