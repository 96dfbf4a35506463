use thiserror::Error;

/// Errors that can occur while reading a language document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Field <{0}> appears twice in one record")]
    DuplicateField(String),

    #[error("Unexpected element <{element}> inside field <{field}>")]
    NestedElement { field: String, element: String },

    #[error("Encountered duplicate language record")]
    DuplicateLanguage,

    #[error("Unknown record type with fields: {0}")]
    UnknownRecord(String),

    #[error("No language record found")]
    NoLanguage,

    #[error("No lexical records found")]
    NoLexicon,
}
