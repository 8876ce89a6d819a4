use crate::documents::{compute_average_rating, DocumentData, DocumentStore};
use crate::error::{Result, SearchError};
use crate::index::InvertedIndex;
use crate::query::{parse_query, ParsedQuery};
use crate::ranker;
use crate::stop_words::StopWords;
use crate::{DocId, Document, DocumentStatus};
use tracing::{debug, warn};

/// In-memory TF-IDF search engine over caller-identified documents.
///
/// Documents are append-only: there is no removal or update.
#[derive(Debug, Default, Clone)]
pub struct SearchServer {
    stop_words: StopWords,
    index: InvertedIndex,
    documents: DocumentStore,
}

impl SearchServer {
    pub fn new() -> Self { Self::default() }

    pub fn with_stop_words(text: &str) -> Self {
        let mut server = Self::new();
        server.set_stop_words(text);
        server
    }

    /// Only affects documents and queries processed afterwards.
    pub fn set_stop_words(&mut self, text: &str) {
        self.stop_words.configure(text);
        debug!(stop_words = self.stop_words.len(), "stop words configured");
    }

    pub fn stop_words(&self) -> &StopWords { &self.stop_words }

    /// Index a document. Fails with `DuplicateId` without touching any state
    /// if `doc_id` was added before.
    pub fn add_document(&mut self, doc_id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> Result<()> {
        if self.documents.contains(doc_id) {
            warn!(doc_id, "rejected duplicate document id");
            return Err(SearchError::DuplicateId(doc_id));
        }
        let words: Vec<&str> = self.stop_words.filter(text).collect();
        self.index.add_document(doc_id, &words);
        let rating = compute_average_rating(ratings);
        self.documents.insert(doc_id, DocumentData { rating, status });
        debug!(doc_id, words = words.len(), rating, %status, indexed_words = self.index.word_count(), "document added");
        Ok(())
    }

    pub fn document_count(&self) -> usize { self.documents.len() }

    pub fn contains_document(&self, doc_id: DocId) -> bool { self.documents.contains(doc_id) }

    /// Document ids in the order they were added.
    pub fn document_ids(&self) -> impl Iterator<Item = DocId> + '_ { self.documents.ids() }

    pub fn parse_query(&self, raw_query: &str) -> ParsedQuery { parse_query(raw_query, &self.stop_words) }

    /// Top documents with status `Actual`.
    pub fn find_top_documents(&self, raw_query: &str) -> Vec<Document> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(&self, raw_query: &str, status: DocumentStatus) -> Vec<Document> {
        self.find_top_documents_with(raw_query, |_, s, _| s == status)
    }

    /// Top documents accepted by `predicate(id, status, rating)`, at most
    /// `MAX_RESULT_DOCUMENT_COUNT` of them.
    pub fn find_top_documents_with<F>(&self, raw_query: &str, predicate: F) -> Vec<Document>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        let query = self.parse_query(raw_query);
        let matched = self.find_all_documents(&query, predicate);
        let total_hits = matched.len();
        let top = ranker::top_documents(matched);
        debug!(query = raw_query, total_hits, returned = top.len(), "search");
        top
    }

    /// Every matching document, unsorted.
    pub fn find_all_documents<F>(&self, query: &ParsedQuery, predicate: F) -> Vec<Document>
    where
        F: Fn(DocId, DocumentStatus, i32) -> bool,
    {
        ranker::find_all_documents(query, &self.index, &self.documents, predicate)
    }

    /// Plus-words of `raw_query` present in document `doc_id`, or none if it
    /// contains any minus-word. Fails with `NotFound` for an unknown id.
    pub fn match_document(&self, raw_query: &str, doc_id: DocId) -> Result<(Vec<String>, DocumentStatus)> {
        let status = self.documents.get(doc_id).ok_or(SearchError::NotFound(doc_id))?.status;
        let query = self.parse_query(raw_query);

        if query.minus_words.iter().any(|w| self.index.contains(w, doc_id)) {
            return Ok((Vec::new(), status));
        }
        let matched = query
            .plus_words
            .into_iter()
            .filter(|w| self.index.contains(w, doc_id))
            .collect();
        Ok((matched, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_leaves_state_untouched() {
        let mut server = SearchServer::new();
        server.add_document(1, "cat city", DocumentStatus::Actual, &[5]).unwrap();
        let err = server.add_document(1, "dog", DocumentStatus::Banned, &[1]).unwrap_err();
        assert_eq!(err, SearchError::DuplicateId(1));
        assert_eq!(server.document_count(), 1);
        assert!(server.find_top_documents("dog").is_empty());
        let (words, status) = server.match_document("cat", 1).unwrap();
        assert_eq!(words, vec!["cat"]);
        assert_eq!(status, DocumentStatus::Actual);
    }

    #[test]
    fn document_of_only_stop_words_is_counted_but_unsearchable() {
        let mut server = SearchServer::with_stop_words("in the");
        server.add_document(3, "in the in", DocumentStatus::Actual, &[]).unwrap();
        assert_eq!(server.document_count(), 1);
        assert!(server.find_top_documents("in").is_empty());
        assert!(server.match_document("in", 3).unwrap().0.is_empty());
    }

    #[test]
    fn match_unknown_document_is_not_found() {
        let server = SearchServer::new();
        assert_eq!(server.match_document("cat", 42), Err(SearchError::NotFound(42)));
    }
}
