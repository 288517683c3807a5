pub mod materializer;
pub mod session;
pub mod types;

pub use materializer::{MaterializeReport, materialize};
pub use session::{GraphSession, GraphStore, Neo4jSession, Neo4jStore};
pub use types::{GraphEdge, GraphNode};
