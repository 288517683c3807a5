use anyhow::Result;
use extract::{ExtractionOutcome, LanguageModel, extract_triple, summarize_chunk};
use graph::{GraphSession, GraphStore, materialize};
use tracing::{info, warn};

use crate::chunk::{Chunk, Summary};
use crate::dedup::TripleSet;
use crate::throttle::Throttle;

/// Per-run accounting handed back to the caller. The graph store itself is
/// the only durable output; this is for logs and exit codes.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub chunks_processed: usize,
    pub chunk_failures: usize,
    pub discarded: usize,
    pub unique_triples: usize,
    pub nodes_written: usize,
    pub edges_written: usize,
    pub materialization_error: Option<String>,
}

/// Drive a batch of chunks through summarize → extract → dedup → materialize.
///
/// Stages run batchwise: every chunk is summarized before the first
/// extraction call, and the whole triple set is collected before any graph
/// write. Within each stage the calls are strictly sequential, with the
/// throttle pause after every extraction attempt, so the model sees an
/// ordered one-at-a-time call stream. A failing chunk is logged and
/// contributes no triple; the batch continues. The graph session and the
/// store connection are released on every exit path, and a materialization
/// failure lands in the report instead of being re-raised past cleanup.
pub async fn run_batch<M, G>(
    model: &M,
    store: &mut G,
    throttle: &Throttle,
    chunks: Vec<Chunk>,
) -> Result<BatchReport>
where
    M: LanguageModel,
    G: GraphStore,
{
    let mut report = BatchReport::default();
    report.chunks_processed = chunks.len();

    // Stage 1: summarize the whole batch.
    let mut summaries: Vec<(usize, Summary)> = Vec::new();
    for (index, chunk) in chunks.into_iter().enumerate() {
        match summarize_chunk(model, &chunk.content).await {
            Ok(text) => summaries.push((index, Summary { chunk, text })),
            Err(e) => {
                warn!(chunk = index, error = %e, "Summarization failed, chunk contributes no triple");
                report.chunk_failures += 1;
            }
        }
    }

    // Stage 2: one throttled extraction attempt per summary.
    let mut triples = TripleSet::new();
    for (index, summary) in summaries {
        match extract_triple(model, &summary.text).await {
            Ok(ExtractionOutcome::Triple(triple)) => {
                triples.insert(triple);
            }
            Ok(ExtractionOutcome::Discarded(reason)) => {
                info!(chunk = index, reason = %reason, "No triple extracted from chunk");
                report.discarded += 1;
            }
            Err(e) => {
                warn!(chunk = index, error = %e, "Extraction failed, continuing with the rest of the batch");
                report.chunk_failures += 1;
            }
        }
        throttle.pause().await;
    }

    report.unique_triples = triples.len();
    info!(
        unique_triples = report.unique_triples,
        failures = report.chunk_failures,
        "Extraction loop finished, materializing"
    );

    let triples = triples.into_vec();
    let mut session = match store.session().await {
        Ok(session) => session,
        Err(e) => {
            store.close().await?;
            return Err(e);
        }
    };

    match materialize(&mut session, &triples).await {
        Ok(written) => {
            report.nodes_written = written.nodes_written;
            report.edges_written = written.edges_written;
        }
        Err(e) => {
            warn!(error = %e, "Materialization failed, graph may hold a partial node/edge set");
            report.materialization_error = Some(e.to_string());
        }
    }

    // Release both handles even if one close fails.
    let session_closed = session.close().await;
    let store_closed = store.close().await;
    session_closed?;
    store_closed?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Replays a canned sequence of model responses. The batch is staged, so
    /// all summary responses are consumed before the first triple response.
    struct ScriptedModel {
        responses: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedModel {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: Mutex::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(str::to_string).map_err(str::to_string))
                        .collect(),
                ),
            }
        }
    }

    impl LanguageModel for ScriptedModel {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(message)) => Err(anyhow::anyhow!(message)),
                None => Err(anyhow::anyhow!("script exhausted")),
            }
        }
    }

    #[derive(Default, Clone)]
    struct WriteLog {
        statements: Arc<Mutex<Vec<String>>>,
        session_closes: Arc<AtomicUsize>,
        store_closes: Arc<AtomicUsize>,
        fail_writes: bool,
    }

    struct FakeStore {
        log: WriteLog,
    }

    struct FakeSession {
        log: WriteLog,
    }

    impl GraphStore for FakeStore {
        type Session = FakeSession;

        async fn session(&mut self) -> Result<FakeSession> {
            Ok(FakeSession {
                log: self.log.clone(),
            })
        }

        async fn close(&mut self) -> Result<()> {
            self.log.store_closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl GraphSession for FakeSession {
        async fn run(&mut self, statement: &str, _params: Vec<(&'static str, String)>) -> Result<()> {
            if self.log.fail_writes {
                anyhow::bail!("write refused");
            }
            self.log.statements.lock().unwrap().push(statement.to_string());
            Ok(())
        }

        async fn close(&mut self) -> Result<()> {
            self.log.session_closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn triple_json(subject: &str, object: &str, relationship: &str) -> String {
        format!(
            r#"{{"node": "{}", "target_node": "{}", "relationship": "{}"}}"#,
            subject, object, relationship
        )
    }

    fn fast() -> Throttle {
        Throttle::from_millis(0)
    }

    #[tokio::test]
    async fn test_all_summaries_complete_before_extraction_begins() {
        /// Classifies each prompt by the stage that built it and always
        /// answers with a valid triple.
        struct RecordingModel {
            calls: Mutex<Vec<&'static str>>,
        }

        impl LanguageModel for RecordingModel {
            async fn generate(&self, prompt: &str) -> Result<String> {
                let stage = if prompt.contains("graph relationship extractor") {
                    "extract"
                } else {
                    "summarize"
                };
                self.calls.lock().unwrap().push(stage);
                Ok(triple_json("a", "b", "r"))
            }
        }

        let model = RecordingModel {
            calls: Mutex::new(Vec::new()),
        };
        let log = WriteLog::default();
        let mut store = FakeStore { log: log.clone() };

        let chunks = vec![Chunk::new("one"), Chunk::new("two")];
        run_batch(&model, &mut store, &fast(), chunks).await.unwrap();

        assert_eq!(
            *model.calls.lock().unwrap(),
            vec!["summarize", "summarize", "extract", "extract"]
        );
    }

    #[tokio::test]
    async fn test_failing_chunk_does_not_abort_the_batch() {
        let paris = triple_json("Paris", "France", "capital_of");
        let apple = triple_json("Steve Jobs", "Apple", "founded");
        // Summaries for all three chunks come first; the middle one fails and
        // drops out before the extraction stage.
        let model = ScriptedModel::new(vec![
            Ok("Title: a\nSummary: b"),
            Err("model quota exceeded"),
            Ok("Title: c\nSummary: d"),
            Ok(paris.as_str()),
            Ok(apple.as_str()),
        ]);
        let log = WriteLog::default();
        let mut store = FakeStore { log: log.clone() };

        let chunks = vec![Chunk::new("one"), Chunk::new("two"), Chunk::new("three")];
        let report = run_batch(&model, &mut store, &fast(), chunks).await.unwrap();

        assert_eq!(report.chunks_processed, 3);
        assert_eq!(report.chunk_failures, 1);
        assert_eq!(report.unique_triples, 2);
        assert_eq!(report.nodes_written, 4);
        assert_eq!(report.edges_written, 2);
    }

    #[tokio::test]
    async fn test_duplicate_triples_collapse_before_materialization() {
        let paris = triple_json("Paris", "France", "capital_of");
        let model = ScriptedModel::new(vec![
            Ok("Title: a\nSummary: b"),
            Ok("Title: c\nSummary: d"),
            Ok(paris.as_str()),
            Ok(paris.as_str()),
        ]);
        let log = WriteLog::default();
        let mut store = FakeStore { log: log.clone() };

        let chunks = vec![Chunk::new("one"), Chunk::new("two")];
        let report = run_batch(&model, &mut store, &fast(), chunks).await.unwrap();

        assert_eq!(report.unique_triples, 1);
        assert_eq!(report.nodes_written, 2);
        assert_eq!(report.edges_written, 1);
        assert_eq!(log.statements.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_response_counts_as_discard_not_failure() {
        let model = ScriptedModel::new(vec![
            Ok("Title: a\nSummary: b"),
            Ok("no JSON here, sorry"),
        ]);
        let log = WriteLog::default();
        let mut store = FakeStore { log: log.clone() };

        let report = run_batch(&model, &mut store, &fast(), vec![Chunk::new("one")])
            .await
            .unwrap();

        assert_eq!(report.discarded, 1);
        assert_eq!(report.chunk_failures, 0);
        assert_eq!(report.unique_triples, 0);
    }

    #[tokio::test]
    async fn test_session_and_store_released_once_on_success() {
        let paris = triple_json("Paris", "France", "capital_of");
        let model = ScriptedModel::new(vec![Ok("Title: a\nSummary: b"), Ok(paris.as_str())]);
        let log = WriteLog::default();
        let mut store = FakeStore { log: log.clone() };

        run_batch(&model, &mut store, &fast(), vec![Chunk::new("one")])
            .await
            .unwrap();

        assert_eq!(log.session_closes.load(Ordering::SeqCst), 1);
        assert_eq!(log.store_closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_session_and_store_released_once_on_write_failure() {
        let paris = triple_json("Paris", "France", "capital_of");
        let model = ScriptedModel::new(vec![Ok("Title: a\nSummary: b"), Ok(paris.as_str())]);
        let log = WriteLog {
            fail_writes: true,
            ..Default::default()
        };
        let mut store = FakeStore { log: log.clone() };

        let report = run_batch(&model, &mut store, &fast(), vec![Chunk::new("one")])
            .await
            .unwrap();

        assert!(report.materialization_error.is_some());
        assert_eq!(report.nodes_written, 0);
        assert_eq!(log.session_closes.load(Ordering::SeqCst), 1);
        assert_eq!(log.store_closes.load(Ordering::SeqCst), 1);
    }
}
