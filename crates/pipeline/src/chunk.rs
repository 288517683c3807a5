use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A bounded segment of source text plus whatever metadata the external
/// chunker attached (typically a `source` entry). Consumed once per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    pub content: String,
    pub metadata: HashMap<String, String>,
}

impl Chunk {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_source(content: impl Into<String>, source: impl Into<String>) -> Self {
        let mut chunk = Self::new(content);
        chunk.metadata.insert("source".to_string(), source.into());
        chunk
    }
}

/// A chunk paired with the model-generated title+summary text for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub chunk: Chunk,
    pub text: String,
}
