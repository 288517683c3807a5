use anyhow::{Context, Result};
use neo4rs::Query;

/// One parameterized write statement per call, which is all the pipeline
/// needs from a Bolt session. `close` is explicit so the orchestrator's
/// release discipline is observable in tests.
pub trait GraphSession {
    async fn run(&mut self, statement: &str, params: Vec<(&'static str, String)>) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
}

/// Owner of the underlying connection. Hands out one session per batch run;
/// no concurrent batches share a session.
pub trait GraphStore {
    type Session: GraphSession;

    async fn session(&mut self) -> Result<Self::Session>;
    async fn close(&mut self) -> Result<()>;
}

pub struct Neo4jStore {
    graph: neo4rs::Graph,
}

impl Neo4jStore {
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = neo4rs::Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;
        Ok(Self { graph })
    }
}

pub struct Neo4jSession {
    graph: neo4rs::Graph,
}

impl GraphStore for Neo4jStore {
    type Session = Neo4jSession;

    async fn session(&mut self) -> Result<Neo4jSession> {
        Ok(Neo4jSession {
            graph: self.graph.clone(),
        })
    }

    async fn close(&mut self) -> Result<()> {
        // neo4rs tears its connection pool down on drop; nothing to flush.
        Ok(())
    }
}

impl GraphSession for Neo4jSession {
    async fn run(&mut self, statement: &str, params: Vec<(&'static str, String)>) -> Result<()> {
        let mut query = Query::new(statement.to_string());
        for (key, value) in params {
            query = query.param(key, value);
        }
        self.graph.run(query).await.context("Graph write failed")?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
