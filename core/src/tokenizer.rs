/// Split text into words on the space character only.
///
/// No other whitespace is treated as a separator and punctuation is kept as
/// part of the word. Runs of spaces never yield empty words.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}
