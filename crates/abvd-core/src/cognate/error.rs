use thiserror::Error;

/// Errors raised while decoding a raw cognacy annotation.
///
/// Each variant carries the raw value as it was received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CognateError {
    #[error("Possible broken combined cognate: {0:?}")]
    Malformed(String),

    #[error("Cognate is not numeric: {0:?}")]
    NonNumeric(String),

    #[error("Cognate class out of range: {0:?}")]
    OutOfRange(String),

    #[error("Cognacy value has unsupported type {kind}: {raw}")]
    WrongType { kind: &'static str, raw: String },
}
