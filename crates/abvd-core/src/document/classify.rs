//! Record classification by key set.

use super::{DocumentError, RawRecord};

const LANGUAGE_KEYS: &[&str] = &[
    "id",
    "checkedby",
    "language",
    "classification",
    "author",
    "silcode",
    "glottocode",
    "notes",
    "typedby",
    "problems",
];

const LEXICON_KEYS: &[&str] = &[
    "id",
    "word_id",
    "word",
    "item",
    "annotation",
    "loan",
    "cognacy",
    "pmpcognacy",
];

const LEXICON_WITH_SOURCE_KEYS: &[&str] = &[
    "id",
    "word_id",
    "word",
    "source_id",
    "source",
    "item",
    "annotation",
    "loan",
    "cognacy",
];

const LOCATION_KEYS: &[&str] = &["latitude", "longitude"];

/// The kinds of record a language document is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Language metadata, exactly one per document.
    Language,
    /// A word-list entry.
    Lexicon,
    /// A word-list entry attributed to a source.
    LexiconWithSource,
    /// Coordinates of the language.
    Location,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Language,
        RecordKind::Lexicon,
        RecordKind::LexiconWithSource,
        RecordKind::Location,
    ];

    /// The exact key set a record of this kind carries.
    pub fn expected_keys(self) -> &'static [&'static str] {
        match self {
            RecordKind::Language => LANGUAGE_KEYS,
            RecordKind::Lexicon => LEXICON_KEYS,
            RecordKind::LexiconWithSource => LEXICON_WITH_SOURCE_KEYS,
            RecordKind::Location => LOCATION_KEYS,
        }
    }

    /// Returns true if the record's keys are exactly this kind's keys.
    pub fn matches(self, record: &RawRecord) -> bool {
        let expected = self.expected_keys();
        record.len() == expected.len() && expected.iter().all(|key| record.contains_key(*key))
    }

    /// Classifies a record, failing on any shape that is not a known kind.
    pub fn classify(record: &RawRecord) -> Result<RecordKind, DocumentError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.matches(record))
            .ok_or_else(|| {
                let keys: Vec<&str> = record.keys().map(String::as_str).collect();
                DocumentError::UnknownRecord(keys.join(", "))
            })
    }

    pub fn is_lexicon(self) -> bool {
        matches!(self, RecordKind::Lexicon | RecordKind::LexiconWithSource)
    }
}
