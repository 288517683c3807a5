use std::collections::HashMap;

use extract::Triple;

/// Collapses structurally identical triples. Identity is the exact canonical
/// serialization, so casing and whitespace count: "Paris" and "paris" stay
/// distinct entries. Near-duplicate merging is left out on purpose.
#[derive(Debug, Default)]
pub struct TripleSet {
    triples: HashMap<String, Triple>,
}

impl TripleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent: inserting an already-present serialization is a no-op.
    /// Returns whether the triple was new.
    pub fn insert(&mut self, triple: Triple) -> bool {
        let key = triple.canonical_key();
        if self.triples.contains_key(&key) {
            return false;
        }
        self.triples.insert(key, triple);
        true
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.values()
    }

    /// The distinct triples seen across the batch, in no guaranteed order.
    pub fn into_vec(self) -> Vec<Triple> {
        self.triples.into_values().collect()
    }
}
