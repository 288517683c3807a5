use std::collections::HashMap;

use anyhow::Result;
use extract::Triple;
use tracing::info;

use crate::session::GraphSession;
use crate::types::{GraphEdge, GraphNode};

const CREATE_NODE: &str = "CREATE (e:Entity {id: $id, name: $name})";

// Relationship types cannot be parameterized in Cypher, so the type rides
// along as a property on a fixed-label relationship.
const CREATE_EDGE: &str = r#"
MATCH (a:Entity {id: $source_id})
MATCH (b:Entity {id: $target_id})
CREATE (a)-[r:RELATES {type: $type}]->(b)
"#;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub nodes_written: usize,
    pub edges_written: usize,
}

/// Write the run's triples into the graph store: all nodes first, then all
/// edges, one statement per record.
///
/// A node id is minted on the first sight of an exact name string and reused
/// for repeats within the run. The first write error aborts the remaining
/// writes; records already committed stay in the store (no rollback).
pub async fn materialize<S: GraphSession>(
    session: &mut S,
    triples: &[Triple],
) -> Result<MaterializeReport> {
    let mut nodes: HashMap<String, GraphNode> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    for triple in triples {
        for name in [&triple.subject, &triple.object] {
            if !nodes.contains_key(name.as_str()) {
                order.push(name.clone());
                nodes.insert(name.clone(), GraphNode::mint(name));
            }
        }
        edges.push(GraphEdge {
            source_id: nodes[&triple.subject].id.clone(),
            target_id: nodes[&triple.object].id.clone(),
            rel_type: triple.relationship.clone(),
        });
    }

    let mut report = MaterializeReport::default();

    for name in &order {
        let node = &nodes[name];
        session
            .run(
                CREATE_NODE,
                vec![("id", node.id.clone()), ("name", node.name.clone())],
            )
            .await?;
        report.nodes_written += 1;
    }

    for edge in &edges {
        session
            .run(
                CREATE_EDGE,
                vec![
                    ("source_id", edge.source_id.clone()),
                    ("target_id", edge.target_id.clone()),
                    ("type", edge.rel_type.clone()),
                ],
            )
            .await?;
        report.edges_written += 1;
    }

    info!(
        nodes = report.nodes_written,
        edges = report.edges_written,
        "Materialized triples into graph store"
    );

    Ok(report)
}
