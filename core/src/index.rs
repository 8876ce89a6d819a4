use crate::DocId;
use std::collections::BTreeMap;

/// Posting list: document id -> term frequency of one word.
pub type Postings = BTreeMap<DocId, f64>;

/// word -> (document id -> term frequency).
///
/// Term frequency is the word's count in a document divided by the number of
/// non stop words in that document.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, Postings>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Index the content words of one document. An empty slice is a no-op.
    pub fn add_document<S: AsRef<str>>(&mut self, doc_id: DocId, words: &[S]) {
        if words.is_empty() {
            return;
        }
        let inv_word_count = 1.0 / words.len() as f64;
        for word in words {
            let postings = self.word_to_document_freqs.entry(word.as_ref().to_string()).or_default();
            *postings.entry(doc_id).or_insert(0.0) += inv_word_count;
        }
    }

    pub fn postings(&self, word: &str) -> Option<&Postings> { self.word_to_document_freqs.get(word) }

    /// True when `word` occurs in document `doc_id`.
    pub fn contains(&self, word: &str, doc_id: DocId) -> bool {
        self.postings(word).is_some_and(|p| p.contains_key(&doc_id))
    }

    /// Number of documents containing `word`.
    pub fn document_frequency(&self, word: &str) -> usize {
        self.postings(word).map_or(0, BTreeMap::len)
    }

    /// ln(total / documents containing `word`).
    ///
    /// Only meaningful for indexed words; callers reach this through
    /// `postings`, which guarantees at least one containing document.
    pub fn inverse_document_freq(&self, word: &str, total_documents: usize) -> f64 {
        let df = self.document_frequency(word);
        debug_assert!(df > 0, "idf requested for unindexed word {word:?}");
        debug_assert!(total_documents >= df);
        (total_documents as f64 / df as f64).ln()
    }

    pub fn word_count(&self) -> usize { self.word_to_document_freqs.len() }

    pub fn is_empty(&self) -> bool { self.word_to_document_freqs.is_empty() }
}
