//! Aggregation of language documents into cognate-coded records.

mod error;
mod summary;

pub use error::DatabaseError;
pub use summary::{write_details, LanguageSummary, DETAILS_HEADER};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::{debug, info};

use crate::cognate::{CognateOptions, CognateParser};
use crate::document::{Document, LanguageRecord, Location};
use crate::record::LexicalRecord;
use crate::storage::read_document;

/// A document together with the name it was loaded under.
#[derive(Debug, Clone)]
struct Source {
    name: String,
    document: Document,
}

/// A set of language documents, kept in load order.
#[derive(Debug, Clone, Default)]
pub struct LexiconDatabase {
    options: CognateOptions,
    sources: Vec<Source>,
}

impl LexiconDatabase {
    /// Creates an empty database with the default cognate options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty database that parses cognates with `options`.
    pub fn with_options(options: CognateOptions) -> Self {
        Self {
            options,
            sources: Vec::new(),
        }
    }

    /// Loads every file in `paths`.
    pub fn from_files<I, P>(paths: I) -> Result<Self, DatabaseError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut db = Self::new();
        for path in paths {
            db.load(path)?;
        }
        Ok(db)
    }

    /// Loads a stored document, named after its path.
    ///
    /// Loading the same path again replaces the earlier document.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), DatabaseError> {
        let path = path.as_ref();
        let document = read_document(path)?;
        debug!(path = %path.display(), entries = document.lexicon.len(), "loaded document");
        self.add(path.display().to_string(), document);
        Ok(())
    }

    /// Adds a document under `name`, replacing any document of that name.
    pub fn add(&mut self, name: impl Into<String>, document: Document) {
        let name = name.into();
        match self.sources.iter_mut().find(|s| s.name == name) {
            Some(source) => source.document = document,
            None => self.sources.push(Source { name, document }),
        }
    }

    pub fn options(&self) -> CognateOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Names of the loaded documents, in load order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    fn source(&self, name: &str) -> Result<&Source, DatabaseError> {
        self.sources
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| DatabaseError::NotLoaded(name.to_string()))
    }

    /// Language metadata of a loaded document.
    pub fn details(&self, name: &str) -> Result<&LanguageRecord, DatabaseError> {
        Ok(&self.source(name)?.document.language)
    }

    /// Location of a loaded document, if it has one.
    pub fn location(&self, name: &str) -> Result<Option<&Location>, DatabaseError> {
        Ok(self.source(name)?.document.location.as_ref())
    }

    /// Builds cognate-coded records for every entry of every document.
    ///
    /// A single parser serves the whole run, so singleton classes are
    /// numbered continuously across documents in load order. Each call is
    /// an independent run and restarts numbering at `u_1`.
    pub fn process(&self) -> Result<Aggregation, DatabaseError> {
        let mut parser = CognateParser::with_options(self.options);
        let mut records = Vec::new();
        let mut summaries = Vec::with_capacity(self.sources.len());

        for source in &self.sources {
            let start = records.len();
            let details = &source.document.language;
            let lid = parse_id(&source.name, "id", details.id.as_deref())?;
            let language = details
                .language
                .clone()
                .ok_or_else(|| DatabaseError::MissingField {
                    document: source.name.clone(),
                    field: "language",
                })?;

            for entry in &source.document.lexicon {
                let cognates = parser.parse_value(entry.cognacy.as_ref()).map_err(|e| {
                    DatabaseError::Cognate {
                        document: source.name.clone(),
                        entry: entry.id.clone().unwrap_or_default(),
                        source: e,
                    }
                })?;

                records.push(LexicalRecord {
                    id: parse_id(&source.name, "id", entry.id.as_deref())?,
                    lid,
                    wid: parse_id(&source.name, "word_id", entry.word_id.as_deref())?,
                    language: language.clone(),
                    word: entry.word.clone().unwrap_or_default(),
                    item: entry.item.clone(),
                    annotation: entry.annotation.clone(),
                    loan: entry.loan.clone(),
                    cognates,
                });
            }

            let span = start..records.len();
            summaries.push(LanguageSummary::new(
                &source.name,
                details,
                &language,
                source.document.location.as_ref(),
                &records[span.clone()],
                span,
            ));
        }

        info!(
            documents = summaries.len(),
            records = records.len(),
            singletons = parser.issued(),
            "processed database"
        );

        Ok(Aggregation { records, summaries })
    }
}

/// Output of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    records: Vec<LexicalRecord>,
    summaries: Vec<LanguageSummary>,
}

impl Aggregation {
    /// All records, document by document, in entry order.
    pub fn records(&self) -> &[LexicalRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<LexicalRecord> {
        self.records
    }

    /// One summary per document, in load order.
    pub fn summaries(&self) -> &[LanguageSummary] {
        &self.summaries
    }

    pub fn summary(&self, name: &str) -> Option<&LanguageSummary> {
        self.summaries.iter().find(|s| s.source == name)
    }

    /// Records of one document.
    pub fn records_for(&self, name: &str) -> Option<&[LexicalRecord]> {
        self.summary(name).map(|s| &self.records[s.span.clone()])
    }

    /// Writes the tab-separated details table.
    pub fn write_details<W: std::io::Write>(&self, out: W) -> Result<(), DatabaseError> {
        write_details(&self.summaries, out)
    }

    /// Renders the details table as a string.
    pub fn details_table(&self) -> Result<String, DatabaseError> {
        let mut buf = Vec::new();
        self.write_details(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Writes the details table to a file.
    pub fn save_details(&self, path: impl AsRef<Path>) -> Result<(), DatabaseError> {
        let file = File::create(path.as_ref())?;
        self.write_details(BufWriter::new(file))
    }
}

fn parse_id(document: &str, field: &'static str, value: Option<&str>) -> Result<u32, DatabaseError> {
    let value = value.ok_or_else(|| DatabaseError::MissingField {
        document: document.to_string(),
        field,
    })?;
    value.trim().parse().map_err(|_| DatabaseError::InvalidId {
        document: document.to_string(),
        field,
        value: value.to_string(),
    })
}
