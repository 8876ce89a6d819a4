use crate::{DocId, DocumentStatus};
use std::collections::HashMap;

/// Metadata kept for every added document. Never mutated after insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}

/// Per-document metadata keyed by id, remembering insertion order.
#[derive(Debug, Default, Clone)]
pub struct DocumentStore {
    documents: HashMap<DocId, DocumentData>,
    order: Vec<DocId>,
}

impl DocumentStore {
    pub fn new() -> Self { Self::default() }

    /// Returns false and leaves the store untouched if `doc_id` is taken.
    pub fn insert(&mut self, doc_id: DocId, data: DocumentData) -> bool {
        if self.documents.contains_key(&doc_id) {
            return false;
        }
        self.documents.insert(doc_id, data);
        self.order.push(doc_id);
        true
    }

    pub fn get(&self, doc_id: DocId) -> Option<&DocumentData> { self.documents.get(&doc_id) }

    pub fn contains(&self, doc_id: DocId) -> bool { self.documents.contains_key(&doc_id) }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Ids in the order they were added.
    pub fn ids(&self) -> impl Iterator<Item = DocId> + '_ { self.order.iter().copied() }
}

/// Average of `ratings`, truncated toward zero; 0 for an empty slice.
pub fn compute_average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    // i64 keeps large rating lists from overflowing before the division
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    (sum / ratings.len() as i64) as i32
}
