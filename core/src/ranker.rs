use crate::documents::DocumentStore;
use crate::index::InvertedIndex;
use crate::query::ParsedQuery;
use crate::{DocId, Document, DocumentStatus, MAX_RESULT_DOCUMENT_COUNT, RELEVANCE_EPSILON};
use std::collections::BTreeMap;

/// Score every document matching `query` with TF-IDF.
///
/// Plus-word contributions are only accumulated for documents accepted by
/// `predicate`. Any document containing a minus-word is dropped whether or
/// not the predicate accepted it. Output is in id order, unsorted by score.
pub fn find_all_documents<F>(
    query: &ParsedQuery,
    index: &InvertedIndex,
    documents: &DocumentStore,
    predicate: F,
) -> Vec<Document>
where
    F: Fn(DocId, DocumentStatus, i32) -> bool,
{
    let total = documents.len();
    let mut document_to_relevance: BTreeMap<DocId, f64> = BTreeMap::new();

    for word in &query.plus_words {
        let Some(postings) = index.postings(word) else { continue };
        let idf = index.inverse_document_freq(word, total);
        for (&doc_id, &term_freq) in postings {
            let Some(data) = documents.get(doc_id) else { continue };
            if predicate(doc_id, data.status, data.rating) {
                *document_to_relevance.entry(doc_id).or_insert(0.0) += term_freq * idf;
            }
        }
    }

    for word in &query.minus_words {
        let Some(postings) = index.postings(word) else { continue };
        for doc_id in postings.keys() {
            document_to_relevance.remove(doc_id);
        }
    }

    document_to_relevance
        .into_iter()
        .map(|(id, relevance)| Document {
            id,
            relevance,
            rating: documents.get(id).map_or(0, |d| d.rating),
        })
        .collect()
}

fn is_tie(a: &Document, b: &Document) -> bool { (a.relevance - b.relevance).abs() < RELEVANCE_EPSILON }

/// `a` must come before `b`: higher rating on a tie, higher relevance otherwise.
fn precedes(a: &Document, b: &Document) -> bool {
    if is_tie(a, b) { a.rating > b.rating } else { a.relevance > b.relevance }
}

/// Position in relevance-sorted `rest` of the first document no other
/// document in `rest` must precede, or 0 when ties form a cycle.
fn next_unblocked(rest: &[Document]) -> usize {
    let top = rest[0].relevance;
    for (i, candidate) in rest.iter().enumerate() {
        if top - candidate.relevance >= RELEVANCE_EPSILON {
            break;
        }
        // everything ahead of `candidate` is within epsilon above it
        let blocked = rest
            .iter()
            .take_while(|d| candidate.relevance - d.relevance < RELEVANCE_EPSILON)
            .any(|d| precedes(d, candidate));
        if !blocked {
            return i;
        }
    }
    0
}

/// Order by descending relevance, ranking by descending rating among
/// documents whose relevances lie within `RELEVANCE_EPSILON` of each other.
///
/// Each position takes the most relevant remaining document that no other
/// remaining document must precede, so whenever an order satisfying every
/// pairwise rule exists it is the one produced. Cyclic ties fall back to
/// relevance.
pub fn sort_by_relevance(docs: &mut [Document]) {
    docs.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then_with(|| b.rating.cmp(&a.rating)));
    for start in 0..docs.len() {
        let pick = next_unblocked(&docs[start..]);
        docs[start..=start + pick].rotate_right(1);
    }
}

/// Sort and cut to `MAX_RESULT_DOCUMENT_COUNT`.
pub fn top_documents(mut docs: Vec<Document>) -> Vec<Document> {
    sort_by_relevance(&mut docs);
    docs.truncate(MAX_RESULT_DOCUMENT_COUNT);
    docs
}
