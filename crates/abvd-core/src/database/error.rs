use thiserror::Error;

use crate::cognate::CognateError;
use crate::storage::StorageError;

/// Errors that can occur while aggregating documents.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data for {0} not loaded")]
    NotLoaded(String),

    #[error("{document}: missing field `{field}`")]
    MissingField { document: String, field: &'static str },

    #[error("{document}: field `{field}` is not a numeric id: {value:?}")]
    InvalidId {
        document: String,
        field: &'static str,
        value: String,
    },

    #[error("{document}: entry {entry}: {source}")]
    Cognate {
        document: String,
        entry: String,
        #[source]
        source: CognateError,
    },

    #[error("{language}: invalid coordinate {value:?}")]
    InvalidCoordinate { language: String, value: String },

    #[error("{language}: value contains a tab or newline: {value:?}")]
    SeparatorInField { language: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
