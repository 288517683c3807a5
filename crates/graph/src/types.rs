use uuid::Uuid;

/// A node minted for one pipeline run. The id is the display name plus a
/// random suffix, and is never reconciled against nodes persisted by earlier
/// runs: the same real-world entity gets a fresh node every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    pub name: String,
    pub id: String,
}

impl GraphNode {
    pub fn mint(name: &str) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self {
            name: name.to_string(),
            id: format!("{}-{}", name, &suffix[..8]),
        }
    }
}

/// A directed relationship between two nodes minted in the same run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub source_id: String,
    pub target_id: String,
    pub rel_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minted_id_keeps_display_name() {
        let node = GraphNode::mint("Paris");
        assert_eq!(node.name, "Paris");
        assert!(node.id.starts_with("Paris-"));
        assert!(node.id.len() > "Paris-".len());
    }

    #[test]
    fn test_minting_twice_gives_distinct_ids() {
        let a = GraphNode::mint("Paris");
        let b = GraphNode::mint("Paris");
        assert_ne!(a.id, b.id);
    }
}
