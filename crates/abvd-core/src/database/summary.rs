use std::io::Write;
use std::ops::Range;

use crate::document::{LanguageRecord, Location};
use crate::record::LexicalRecord;
use crate::slug::slug_for;

use super::DatabaseError;

/// Column headers of the details table.
pub const DETAILS_HEADER: [&str; 11] = [
    "ID",
    "ISO",
    "Glottocode",
    "Language",
    "Slug",
    "NLexemes",
    "NCognates",
    "Author",
    "Latitude",
    "Longitude",
    "Classification",
];

/// Per-language statistics of one aggregation run.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageSummary {
    /// Name the document was loaded under.
    pub source: String,
    pub id: String,
    pub iso: Option<String>,
    pub glottocode: Option<String>,
    pub language: String,
    pub slug: String,
    /// Number of word-list entries.
    pub nlexemes: usize,
    /// Entries with at least one shared cognate class.
    pub ncognates: usize,
    pub author: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub classification: Option<String>,
    pub(crate) span: Range<usize>,
}

impl LanguageSummary {
    pub(crate) fn new(
        source: &str,
        details: &LanguageRecord,
        language: &str,
        location: Option<&Location>,
        records: &[LexicalRecord],
        span: Range<usize>,
    ) -> Self {
        let id = details.id.clone().unwrap_or_default();
        Self {
            source: source.to_string(),
            slug: slug_for(language, &id),
            id,
            iso: details.silcode.clone(),
            glottocode: details.glottocode.clone(),
            language: language.to_string(),
            nlexemes: records.len(),
            ncognates: records.iter().filter(|r| r.has_shared_class()).count(),
            author: details.author.clone(),
            latitude: location.and_then(|l| l.latitude.clone()),
            longitude: location.and_then(|l| l.longitude.clone()),
            classification: details.classification.clone(),
            span,
        }
    }

    /// Cells of this summary's table row.
    pub fn row(&self) -> Result<Vec<String>, DatabaseError> {
        let row = vec![
            self.id.clone(),
            denone(&self.iso),
            denone(&self.glottocode),
            self.language.clone(),
            self.slug.clone(),
            self.nlexemes.to_string(),
            self.ncognates.to_string(),
            denone(&self.author),
            self.format_coordinate(self.latitude.as_deref())?,
            self.format_coordinate(self.longitude.as_deref())?,
            denone(&self.classification),
        ];

        if let Some(bad) = row.iter().find(|v| v.contains(|c: char| c == '\t' || c == '\n')) {
            return Err(DatabaseError::SeparatorInField {
                language: self.language.clone(),
                value: bad.clone(),
            });
        }
        Ok(row)
    }

    fn format_coordinate(&self, value: Option<&str>) -> Result<String, DatabaseError> {
        match value {
            None => Ok("-".to_string()),
            Some(v) => v
                .trim()
                .parse::<f64>()
                .map(|n| format!("{:.4}", n))
                .map_err(|_| DatabaseError::InvalidCoordinate {
                    language: self.language.clone(),
                    value: v.to_string(),
                }),
        }
    }
}

/// Writes the tab-separated details table.
pub fn write_details<W: Write>(
    summaries: &[LanguageSummary],
    mut out: W,
) -> Result<(), DatabaseError> {
    writeln!(out, "{}", DETAILS_HEADER.join("\t"))?;
    for summary in summaries {
        writeln!(out, "{}", summary.row()?.join("\t"))?;
    }
    out.flush()?;
    Ok(())
}

fn denone(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}
