//! Language documents as delivered by the ABVD.
//!
//! A document is a flat list of `<record>` elements: one language record,
//! one or more word-list entries and an optional location. Records carry no
//! type tag, so each one is classified by its exact key set.

mod classify;
mod error;
mod xml;

pub use classify::RecordKind;
pub use error::DocumentError;
pub use xml::{parse_document, read_records, wrap_fragment};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cognate::CognacyValue;
use crate::record::LoanMarker;

/// A record as a flat map from element name to text (`None` for empty cells).
pub type RawRecord = BTreeMap<String, Option<String>>;

/// Language metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageRecord {
    pub id: Option<String>,
    pub language: Option<String>,
    pub classification: Option<String>,
    pub author: Option<String>,
    /// ISO 639-3 code.
    pub silcode: Option<String>,
    pub glottocode: Option<String>,
    pub notes: Option<String>,
    pub problems: Option<String>,
    pub checkedby: Option<String>,
    pub typedby: Option<String>,
}

impl LanguageRecord {
    fn from_raw(mut raw: RawRecord) -> Self {
        Self {
            id: take(&mut raw, "id"),
            language: take(&mut raw, "language"),
            classification: take(&mut raw, "classification"),
            author: take(&mut raw, "author"),
            silcode: take(&mut raw, "silcode"),
            glottocode: take(&mut raw, "glottocode"),
            notes: take(&mut raw, "notes"),
            problems: take(&mut raw, "problems"),
            checkedby: take(&mut raw, "checkedby"),
            typedby: take(&mut raw, "typedby"),
        }
    }
}

/// One word-list entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconEntry {
    pub id: Option<String>,
    pub word_id: Option<String>,
    pub word: Option<String>,
    pub item: Option<String>,
    pub annotation: Option<String>,
    pub loan: Option<LoanMarker>,
    pub cognacy: Option<CognacyValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pmpcognacy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl LexiconEntry {
    fn from_raw(mut raw: RawRecord) -> Self {
        Self {
            id: take(&mut raw, "id"),
            word_id: take(&mut raw, "word_id"),
            word: take(&mut raw, "word"),
            item: take(&mut raw, "item"),
            annotation: take(&mut raw, "annotation"),
            loan: take(&mut raw, "loan").map(LoanMarker::Text),
            cognacy: take(&mut raw, "cognacy").map(CognacyValue::Text),
            pmpcognacy: take(&mut raw, "pmpcognacy"),
            source_id: take(&mut raw, "source_id"),
            source: take(&mut raw, "source"),
        }
    }
}

/// Coordinates as decimal strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Location {
    fn from_raw(mut raw: RawRecord) -> Self {
        Self {
            latitude: take(&mut raw, "latitude"),
            longitude: take(&mut raw, "longitude"),
        }
    }
}

/// A complete language document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub language: LanguageRecord,
    pub lexicon: Vec<LexiconEntry>,
    #[serde(default)]
    pub location: Option<Location>,
}

impl Document {
    /// Assembles a document from classified raw records.
    pub fn from_records(
        records: impl IntoIterator<Item = RawRecord>,
    ) -> Result<Self, DocumentError> {
        let mut language = None;
        let mut lexicon = Vec::new();
        let mut location = None;

        for record in records {
            match RecordKind::classify(&record)? {
                RecordKind::Language => {
                    if language.is_some() {
                        return Err(DocumentError::DuplicateLanguage);
                    }
                    language = Some(LanguageRecord::from_raw(record));
                }
                RecordKind::Lexicon | RecordKind::LexiconWithSource => {
                    lexicon.push(LexiconEntry::from_raw(record));
                }
                RecordKind::Location => location = Some(Location::from_raw(record)),
            }
        }

        let language = language.ok_or(DocumentError::NoLanguage)?;
        if lexicon.is_empty() {
            return Err(DocumentError::NoLexicon);
        }

        Ok(Self {
            language,
            lexicon,
            location,
        })
    }
}

fn take(raw: &mut RawRecord, key: &str) -> Option<String> {
    raw.remove(key).flatten()
}
