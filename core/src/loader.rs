use crate::{DocId, DocumentStatus, SearchServer};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A document as accepted from JSON input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDoc {
    pub id: DocId,
    pub text: String,
    #[serde(default)]
    pub status: DocumentStatus,
    #[serde(default)]
    pub ratings: Vec<i32>,
}

/// `.json`/`.jsonl` files under `path`, or `path` itself if it is a file.
/// Directory entries come back sorted by name.
pub fn collect_input_files(path: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    }
    files
}

/// Read every document under `path`, in file order. Fails when `path` is
/// neither a file nor a directory.
pub fn read_documents(path: &Path) -> Result<Vec<InputDoc>> {
    if !path.is_file() && !path.is_dir() {
        bail!("input path {} is not a file or directory", path.display());
    }
    let mut docs = Vec::new();
    for file in collect_input_files(path) {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::info!(path = %path.display(), documents = docs.len(), "read input documents");
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: invalid document", file.display(), line_no + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file).with_context(|| format!("opening {}", file.display()))?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v).with_context(|| format!("{}: invalid document", file.display()))?);
            }
        }
        serde_json::Value::Object(_) => {
            docs.push(serde_json::from_value(json).with_context(|| format!("{}: invalid document", file.display()))?);
        }
        _ => {}
    }
    Ok(())
}

/// Add `docs` to `server`, stopping at the first rejected document.
/// Returns how many were added.
pub fn ingest<I>(server: &mut SearchServer, docs: I) -> crate::Result<usize>
where
    I: IntoIterator<Item = InputDoc>,
{
    let mut added = 0;
    for doc in docs {
        server.add_document(doc.id, &doc.text, doc.status, &doc.ratings)?;
        added += 1;
    }
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn reads_json_and_jsonl_from_directory() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"[{"id": 1, "text": "white cat"}, {"id": 2, "text": "black dog", "status": "banned", "ratings": [1, 2]}]"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/b.jsonl"), "{\"id\": 3, \"text\": \"bird\"}\n\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = read_documents(dir.path()).unwrap();
        assert_eq!(docs.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(docs[0].status, DocumentStatus::Actual);
        assert!(docs[0].ratings.is_empty());
        assert_eq!(docs[1].status, DocumentStatus::Banned);
        assert_eq!(docs[1].ratings, vec![1, 2]);
    }

    #[test]
    fn invalid_line_reports_location() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("docs.jsonl");
        fs::write(&file, "{\"id\": 1, \"text\": \"cat\"}\n{\"id\": \"x\"}\n").unwrap();
        let err = read_documents(&file).unwrap_err();
        assert!(format!("{err:#}").contains("docs.jsonl:2"));
    }

    #[test]
    fn missing_input_path_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("typo.json");
        let err = read_documents(&missing).unwrap_err();
        assert!(err.to_string().contains("typo.json"));
    }

    #[test]
    fn empty_directory_reads_no_documents() {
        let dir = tempdir().unwrap();
        assert!(read_documents(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn ingest_stops_at_duplicate() {
        let mut server = SearchServer::new();
        let doc = |id| InputDoc { id, text: "cat".into(), status: DocumentStatus::Actual, ratings: vec![] };
        let err = ingest(&mut server, vec![doc(1), doc(2), doc(1), doc(3)]).unwrap_err();
        assert_eq!(err, crate::SearchError::DuplicateId(1));
        assert_eq!(server.document_count(), 2);
    }
}
