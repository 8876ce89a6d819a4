use anyhow::{anyhow, bail, Context, Result};
use search_core::loader::{ingest, read_documents};
use search_core::{DocId, Document, DocumentStatus, SearchServer};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchOutput {
    pub id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

/// Build a server from the documents under `input`.
pub fn load_server(input: &Path, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::with_stop_words(stop_words);
    let added = ingest(&mut server, read_documents(input)?)?;
    tracing::info!(added, "index built");
    Ok(server)
}

/// Write the top documents with `status` as JSON lines.
pub fn run_search<W: Write>(server: &SearchServer, query: &str, status: DocumentStatus, mut output: W) -> Result<Vec<Document>> {
    let found = server.find_top_documents_by_status(query, status);
    for document in &found {
        writeln!(output, "{}", serde_json::to_string(document)?)?;
    }
    Ok(found)
}

/// Write the words of `query` present in document `id` as one JSON line.
pub fn run_match<W: Write>(server: &SearchServer, query: &str, id: DocId, mut output: W) -> Result<MatchOutput> {
    let (words, status) = server.match_document(query, id)?;
    let matched = MatchOutput { id, words, status };
    writeln!(output, "{}", serde_json::to_string(&matched)?)?;
    Ok(matched)
}

fn read_line<R: BufRead>(input: &mut R, what: &str) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input, expected {what}");
    }
    // Drop the line terminator but keep other characters intact.
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

fn read_line_with_number<R: BufRead>(input: &mut R, what: &str) -> Result<usize> {
    let line = read_line(input, what)?;
    line.trim().parse().with_context(|| format!("invalid {what}: {line:?}"))
}

/// Parse a ratings line: a count followed by that many ratings.
pub fn parse_ratings(line: &str) -> Result<Vec<i32>> {
    let mut numbers = line.split_whitespace();
    let count: usize = match numbers.next() {
        Some(n) => n.parse().with_context(|| format!("invalid ratings count {n:?}"))?,
        None => return Ok(Vec::new()),
    };
    let ratings = numbers
        .map(|n| n.parse::<i32>().with_context(|| format!("invalid rating {n:?}")))
        .collect::<Result<Vec<_>>>()?;
    if ratings.len() != count {
        return Err(anyhow!("expected {count} ratings, found {}", ratings.len()));
    }
    Ok(ratings)
}

/// Build a server from the line protocol on `input` and write the results
/// of its query to `output`.
///
/// Protocol: stop words line, document count, then a text line and a ratings
/// line per document, then the query line. Documents are numbered from 0 and
/// added as `Actual`.
pub fn run_console<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<Vec<Document>> {
    let mut server = SearchServer::with_stop_words(&read_line(&mut input, "stop words")?);
    let document_count = read_line_with_number(&mut input, "document count")?;
    for document_id in 0..document_count {
        let text = read_line(&mut input, "document text")?;
        let ratings = parse_ratings(&read_line(&mut input, "document ratings")?)?;
        let document_id = i32::try_from(document_id)?;
        server.add_document(document_id, &text, DocumentStatus::Actual, &ratings)?;
    }
    let query = read_line(&mut input, "query")?;
    let found = server.find_top_documents(&query);
    for document in &found {
        writeln!(output, "{document}")?;
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_line_has_leading_count() {
        assert_eq!(parse_ratings("3 7 2 0").unwrap(), vec![7, 2, 0]);
        assert_eq!(parse_ratings("0").unwrap(), Vec::<i32>::new());
        assert_eq!(parse_ratings("").unwrap(), Vec::<i32>::new());
        assert!(parse_ratings("2 1").is_err());
        assert!(parse_ratings("x").is_err());
    }
}
