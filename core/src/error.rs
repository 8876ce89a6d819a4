use crate::DocId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A document with this id was already added.
    #[error("document {0} already exists")]
    DuplicateId(DocId),
    #[error("document {0} not found")]
    NotFound(DocId),
    #[error("unknown document status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, SearchError>;
