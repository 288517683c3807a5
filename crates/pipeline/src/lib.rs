pub mod chunk;
pub mod config;
pub mod dedup;
pub mod orchestrator;
pub mod throttle;

pub use chunk::{Chunk, Summary};
pub use config::{GeminiConfig, Neo4jConfig, PipelineConfig};
pub use dedup::TripleSet;
pub use orchestrator::{BatchReport, run_batch};
pub use throttle::Throttle;
