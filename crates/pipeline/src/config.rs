use std::env;

use serde::{Deserialize, Serialize};

/// Everything a run needs, constructed once and passed in explicitly. There
/// are no ambient globals: the binary builds this, the orchestrator borrows
/// the clients built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub gemini: GeminiConfig,
    pub neo4j: Neo4jConfig,
    pub throttle_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neo4jConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            gemini: GeminiConfig {
                base_url: "https://generativelanguage.googleapis.com".to_string(),
                model: "gemini-2.0-flash".to_string(),
                api_key: String::new(),
            },
            neo4j: Neo4jConfig {
                uri: "bolt://localhost:7687".to_string(),
                username: "neo4j".to_string(),
                password: String::new(),
            },
            throttle_ms: 1000,
        }
    }
}

impl PipelineConfig {
    /// Read connection settings from the environment, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = env::var("GOOGLE_API_KEY") {
            config.gemini.api_key = key;
        }
        if let Ok(model) = env::var("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Ok(uri) = env::var("NEO4J_URI") {
            config.neo4j.uri = uri;
        }
        if let Ok(user) = env::var("NEO4J_USERNAME") {
            config.neo4j.username = user;
        }
        if let Ok(password) = env::var("NEO4J_PASSWORD") {
            config.neo4j.password = password;
        }
        if let Ok(ms) = env::var("THROTTLE_MS") {
            if let Ok(ms) = ms.parse() {
                config.throttle_ms = ms;
            }
        }
        config
    }
}
