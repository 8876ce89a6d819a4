use crate::tokenizer::split_into_words;
use std::collections::BTreeSet;

/// Words excluded from indexing and querying.
///
/// Words can only be added. Adding a stop word does not touch documents that
/// were indexed before it was added.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: BTreeSet<String>,
}

impl StopWords {
    pub fn new() -> Self { Self::default() }

    /// Tokenize `text` and add every word to the set.
    pub fn configure(&mut self, text: &str) {
        for word in split_into_words(text) {
            if !self.words.contains(word) {
                self.words.insert(word.to_string());
            }
        }
    }

    pub fn is_stop_word(&self, word: &str) -> bool { self.words.contains(word) }

    pub fn len(&self) -> usize { self.words.len() }

    pub fn is_empty(&self) -> bool { self.words.is_empty() }

    /// Words of `text` that are not stop words, in order, duplicates kept.
    pub fn filter<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        split_into_words(text).filter(move |w| !self.is_stop_word(w))
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut stop_words = StopWords::new();
        for s in iter {
            stop_words.configure(s.as_ref());
        }
        stop_words
    }
}
