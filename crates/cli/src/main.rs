use anyhow::Result;
use clap::Parser;
use tracing::info;

use extract::GeminiClient;
use graph::Neo4jStore;
use pipeline::{Chunk, PipelineConfig, Throttle, run_batch};

/// Extract a knowledge graph from text and persist it into Neo4j.
///
/// Connection settings come from the environment: GOOGLE_API_KEY,
/// GEMINI_MODEL, NEO4J_URI, NEO4J_USERNAME, NEO4J_PASSWORD.
#[derive(Parser)]
#[command(name = "kgquad")]
struct Args {
    /// Pre-chunked text segments, one chunk per argument. With none given,
    /// two built-in sample documents are used.
    texts: Vec<String>,

    /// Minimum delay between consecutive model calls, in milliseconds.
    /// Overrides THROTTLE_MS from the environment.
    #[arg(long)]
    throttle_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = PipelineConfig::from_env();

    let chunks: Vec<Chunk> = if args.texts.is_empty() {
        sample_documents()
    } else {
        args.texts
            .into_iter()
            .map(|text| Chunk::with_source(text, "arg"))
            .collect()
    };

    let throttle = resolve_throttle(args.throttle_ms, &config);
    let model = GeminiClient::new(
        config.gemini.base_url,
        config.gemini.model,
        config.gemini.api_key,
    );
    let mut store = Neo4jStore::connect(
        &config.neo4j.uri,
        &config.neo4j.username,
        &config.neo4j.password,
    )
    .await?;

    let report = run_batch(&model, &mut store, &throttle, chunks).await?;

    info!(
        chunks = report.chunks_processed,
        failures = report.chunk_failures,
        discarded = report.discarded,
        unique_triples = report.unique_triples,
        nodes = report.nodes_written,
        edges = report.edges_written,
        "Batch finished"
    );

    if let Some(error) = report.materialization_error {
        anyhow::bail!("materialization failed: {}", error);
    }
    Ok(())
}

/// The --throttle-ms flag wins; otherwise whatever the environment put into
/// the config applies.
fn resolve_throttle(flag: Option<u64>, config: &PipelineConfig) -> Throttle {
    Throttle::from_millis(flag.unwrap_or(config.throttle_ms))
}

fn sample_documents() -> Vec<Chunk> {
    vec![
        Chunk::with_source("The capital of France is Paris.", "knowledge_base_1"),
        Chunk::with_source(
            "JavaScript is a versatile programming language.",
            "web_doc_1",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_flag_overrides_configured_throttle() {
        let mut config = PipelineConfig::default();
        config.throttle_ms = 250;

        assert_eq!(
            resolve_throttle(Some(50), &config).delay(),
            Duration::from_millis(50)
        );
        assert_eq!(
            resolve_throttle(None, &config).delay(),
            Duration::from_millis(250)
        );
    }
}
