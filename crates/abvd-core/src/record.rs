use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cognate::CognateId;
use crate::slug::slug_for;

/// Loan-word marker.
///
/// The database stores free text (often the donor language); edited
/// documents may also use a plain boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoanMarker {
    Flag(bool),
    Text(String),
}

impl LoanMarker {
    /// An empty string or `false` means "not a loan".
    pub fn is_loan(&self) -> bool {
        match self {
            LoanMarker::Flag(flag) => *flag,
            LoanMarker::Text(text) => !text.is_empty(),
        }
    }
}

impl From<&str> for LoanMarker {
    fn from(s: &str) -> Self {
        LoanMarker::Text(s.to_string())
    }
}

impl From<bool> for LoanMarker {
    fn from(flag: bool) -> Self {
        LoanMarker::Flag(flag)
    }
}

/// One word form of one language, with its parsed cognate classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LexicalRecord {
    /// Entry id.
    #[serde(rename = "ID")]
    pub id: u32,
    /// Language id.
    #[serde(rename = "LID")]
    pub lid: u32,
    /// Word-list slot id.
    #[serde(rename = "WID")]
    pub wid: u32,
    pub language: String,
    /// Gloss of the word-list slot.
    pub word: String,
    pub item: Option<String>,
    pub annotation: Option<String>,
    pub loan: Option<LoanMarker>,
    #[serde(rename = "Cognacy")]
    pub cognates: Vec<CognateId>,
}

impl LexicalRecord {
    pub fn is_loan(&self) -> bool {
        self.loan.as_ref().is_some_and(LoanMarker::is_loan)
    }

    /// Row label used in exported matrices, e.g. `Arosi_Oneibia_Village_583`.
    pub fn taxon(&self) -> String {
        slug_for(&self.language, self.lid)
    }

    /// Returns true if at least one class is shared (not a singleton).
    pub fn has_shared_class(&self) -> bool {
        self.cognates.iter().any(|id| !id.is_unique())
    }
}

impl fmt::Display for LexicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Record {} - {} - {} - {}>",
            self.id,
            self.language,
            self.word,
            self.item.as_deref().unwrap_or("")
        )
    }
}
