use crate::stop_words::StopWords;
use crate::tokenizer::split_into_words;
use std::collections::BTreeSet;

/// Prefix that turns a query word into a minus-word.
pub const MINUS_MARKER: char = '-';

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
}

fn parse_query_word(text: &str) -> QueryWord<'_> {
    match text.strip_prefix(MINUS_MARKER) {
        Some(rest) => QueryWord { data: rest, is_minus: true },
        None => QueryWord { data: text, is_minus: false },
    }
}

/// Plus-words must be present, minus-words must be absent. Stop words never
/// appear in either set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedQuery {
    pub plus_words: BTreeSet<String>,
    pub minus_words: BTreeSet<String>,
}

impl ParsedQuery {
    pub fn is_empty(&self) -> bool { self.plus_words.is_empty() && self.minus_words.is_empty() }
}

/// Parse a raw query. Every word decides plus or minus by its own leading
/// marker; only one marker is stripped, so `--cat` excludes `-cat`.
///
/// A lone `-` strips to an empty word, which can never be indexed, and is
/// dropped.
pub fn parse_query(text: &str, stop_words: &StopWords) -> ParsedQuery {
    let mut query = ParsedQuery::default();
    for word in split_into_words(text) {
        let query_word = parse_query_word(word);
        if query_word.data.is_empty() || stop_words.is_stop_word(query_word.data) {
            continue;
        }
        let target = if query_word.is_minus { &mut query.minus_words } else { &mut query.plus_words };
        target.insert(query_word.data.to_string());
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(set: &BTreeSet<String>) -> Vec<&str> { set.iter().map(String::as_str).collect() }

    #[test]
    fn splits_plus_and_minus_words() {
        let sw = StopWords::new();
        let q = parse_query("fluffy -cat dog fluffy", &sw);
        assert_eq!(words(&q.plus_words), vec!["dog", "fluffy"]);
        assert_eq!(words(&q.minus_words), vec!["cat"]);
    }

    #[test]
    fn stop_words_are_dropped_regardless_of_marker() {
        let sw: StopWords = ["in the"].into_iter().collect();
        let q = parse_query("cat in -the city", &sw);
        assert_eq!(words(&q.plus_words), vec!["cat", "city"]);
        assert!(q.minus_words.is_empty());
    }

    #[test]
    fn same_word_with_and_without_marker_lands_in_both_sets() {
        let q = parse_query("cat -cat", &StopWords::new());
        assert!(q.plus_words.contains("cat"));
        assert!(q.minus_words.contains("cat"));
    }

    #[test]
    fn lone_marker_is_ignored() {
        let q = parse_query("- cat -", &StopWords::new());
        assert_eq!(words(&q.plus_words), vec!["cat"]);
        assert!(q.minus_words.is_empty());
        assert!(parse_query("-", &StopWords::new()).is_empty());
    }

    #[test]
    fn only_one_marker_is_stripped() {
        let q = parse_query("--cat", &StopWords::new());
        assert_eq!(words(&q.minus_words), vec!["-cat"]);
    }
}
