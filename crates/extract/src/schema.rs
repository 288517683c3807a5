use serde::{Deserialize, Serialize};

/// A single subject–relationship–object fact extracted from text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub object: String,
    pub relationship: String,
}

impl Triple {
    pub fn new(
        subject: impl Into<String>,
        object: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            object: object.into(),
            relationship: relationship.into(),
        }
    }

    /// Canonical serialized form, used as the dedup identity. Field order is
    /// fixed by the struct declaration, so structurally equal triples always
    /// serialize to the same string. Comparison is literal: casing and
    /// whitespace count.
    pub fn canonical_key(&self) -> String {
        serde_json::to_string(self).expect("triple serialization cannot fail")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_key_is_stable() {
        let a = Triple::new("Paris", "France", "capital_of");
        let b = Triple::new("Paris", "France", "capital_of");
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn test_canonical_key_is_case_sensitive() {
        let a = Triple::new("Paris", "France", "capital_of");
        let b = Triple::new("paris", "France", "capital_of");
        assert_ne!(a.canonical_key(), b.canonical_key());
    }
}
