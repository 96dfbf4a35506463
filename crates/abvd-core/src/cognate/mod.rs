//! Cognacy annotation parsing.
//!
//! Analysts record cognacy as free text: `"1"`, `"5, 40"`, `"19, 34?"`,
//! `"x"` or nothing at all. [`CognateParser`] turns those annotations into
//! ordered lists of [`CognateId`]s and hands out fresh singleton classes
//! (`u_1`, `u_2`, ...) to entries that have no usable code.

mod audit;
mod error;
mod id;

pub use audit::{audit, AuditFailure, AuditReport};
pub use error::CognateError;
pub use id::{CognateId, UNIQUE_PREFIX};

use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// Marker for an entry filed under the wrong word slot.
const WRONG_SLOT_MARKER: &str = "s";

/// Marker for an erroneous entry.
const ERROR_MARKER: &str = "x";

/// Marker for an uncertain cognate assignment.
const DUBIOUS_MARKER: char = '?';

/// Parser behaviour, fixed for the lifetime of a parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CognateOptions {
    /// Drop dubious sub-codes instead of stripping their marker.
    pub strict: bool,

    /// Give entries without a usable code a fresh singleton class.
    pub uniques: bool,

    /// Require every surviving sub-code to be an integer.
    pub check: bool,

    /// Accept integer raw values (not just text) as a single class.
    pub accept_numeric: bool,
}

impl Default for CognateOptions {
    fn default() -> Self {
        Self {
            strict: true,
            uniques: true,
            check: true,
            accept_numeric: false,
        }
    }
}

/// A raw cognacy cell as found in a stored document.
///
/// The wire format only ever delivers text, but hand-edited documents can
/// carry other JSON values, so those are preserved for the parser to judge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CognacyValue {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

impl From<&str> for CognacyValue {
    fn from(s: &str) -> Self {
        CognacyValue::Text(s.to_string())
    }
}

impl From<String> for CognacyValue {
    fn from(s: String) -> Self {
        CognacyValue::Text(s)
    }
}

/// Stateful cognacy parser.
///
/// One parser belongs to one aggregation run: the singleton counter must
/// be shared by every entry of the run and must not leak into another.
#[derive(Debug, Clone, Default)]
pub struct CognateParser {
    options: CognateOptions,
    unique_id: usize,
}

impl CognateParser {
    /// Creates a parser with the default options (strict, uniques, check).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: CognateOptions) -> Self {
        Self {
            options,
            unique_id: 0,
        }
    }

    /// Sets strict mode.
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Sets singleton generation.
    pub fn uniques(mut self, uniques: bool) -> Self {
        self.options.uniques = uniques;
        self
    }

    /// Sets numeric checking.
    pub fn check(mut self, check: bool) -> Self {
        self.options.check = check;
        self
    }

    /// Sets whether integer raw values are accepted.
    pub fn accept_numeric(mut self, accept: bool) -> Self {
        self.options.accept_numeric = accept;
        self
    }

    pub fn options(&self) -> CognateOptions {
        self.options
    }

    /// Number of singleton classes minted so far.
    pub fn issued(&self) -> usize {
        self.unique_id
    }

    /// Mints the next singleton class, or nothing when uniques are disabled.
    pub fn next_unique(&mut self) -> Vec<CognateId> {
        if !self.options.uniques {
            return Vec::new();
        }
        self.unique_id += 1;
        vec![CognateId::Unique(self.unique_id)]
    }

    /// Parses a textual cognacy annotation.
    ///
    /// `None`, blank text and the `s` / `x` markers carry no code and
    /// resolve to a fresh singleton (or nothing, without uniques).
    pub fn parse(&mut self, raw: Option<&str>) -> Result<Vec<CognateId>, CognateError> {
        let Some(raw) = raw else {
            return Ok(self.next_unique());
        };

        let value = raw.trim();
        if value.is_empty()
            || value.eq_ignore_ascii_case(WRONG_SLOT_MARKER)
            || value.eq_ignore_ascii_case(ERROR_MARKER)
        {
            return Ok(self.next_unique());
        }

        if value.starts_with(',') {
            return Err(CognateError::Malformed(raw.to_string()));
        }

        let codes: Vec<String> = value
            .split(|c: char| matches!(c, ',' | '.' | '/'))
            .filter_map(|code| self.resolve_dubious(code.trim()))
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() {
            return Ok(self.next_unique());
        }

        if !self.options.check {
            return Ok(codes.into_iter().map(CognateId::Code).collect());
        }

        codes
            .iter()
            .map(|code| {
                code.parse::<u32>()
                    .map(CognateId::Class)
                    .map_err(|e| match e.kind() {
                        IntErrorKind::PosOverflow => CognateError::OutOfRange(raw.to_string()),
                        _ => CognateError::NonNumeric(raw.to_string()),
                    })
            })
            .collect()
    }

    /// Parses a cognacy cell that may hold a non-text JSON value.
    pub fn parse_value(
        &mut self,
        raw: Option<&CognacyValue>,
    ) -> Result<Vec<CognateId>, CognateError> {
        match raw {
            None => self.parse(None),
            Some(CognacyValue::Text(text)) => self.parse(Some(text.as_str())),
            Some(CognacyValue::Number(n)) => {
                if !self.options.accept_numeric {
                    return Err(CognateError::WrongType {
                        kind: "number",
                        raw: n.to_string(),
                    });
                }
                let v = n
                    .as_u64()
                    .ok_or_else(|| CognateError::NonNumeric(n.to_string()))?;
                u32::try_from(v)
                    .map(|v| vec![CognateId::Class(v)])
                    .map_err(|_| CognateError::OutOfRange(n.to_string()))
            }
            Some(CognacyValue::Other(serde_json::Value::Null)) => self.parse(None),
            Some(CognacyValue::Other(other)) => Err(CognateError::WrongType {
                kind: json_kind(other),
                raw: other.to_string(),
            }),
        }
    }

    fn resolve_dubious(&self, code: &str) -> Option<String> {
        if !code.contains(DUBIOUS_MARKER) {
            return Some(code.to_string());
        }
        if self.options.strict {
            None
        } else {
            Some(code.replace(DUBIOUS_MARKER, "").trim().to_string())
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u32]) -> Vec<CognateId> {
        values.iter().copied().map(CognateId::Class).collect()
    }

    #[test]
    fn test_separators_are_interchangeable() {
        let mut parser = CognateParser::new();
        assert_eq!(parser.parse(Some("1,2")).unwrap(), ids(&[1, 2]));
        assert_eq!(parser.parse(Some("1 . 2")).unwrap(), ids(&[1, 2]));
        assert_eq!(parser.parse(Some("1/2")).unwrap(), ids(&[1, 2]));
        assert_eq!(parser.parse(Some("3.1/2,3")).unwrap(), ids(&[3, 1, 2, 3]));
        assert_eq!(parser.issued(), 0);
    }

    #[test]
    fn test_resolve_dubious() {
        let strict = CognateParser::new();
        assert_eq!(strict.resolve_dubious("2?"), None);
        assert_eq!(strict.resolve_dubious("2"), Some("2".to_string()));

        let lenient = CognateParser::new().strict(false);
        assert_eq!(lenient.resolve_dubious("2 ?"), Some("2".to_string()));
        assert_eq!(lenient.resolve_dubious("?"), Some(String::new()));
    }

    #[test]
    fn test_blank_is_no_code() {
        let mut parser = CognateParser::new();
        assert_eq!(parser.parse(Some("   ")).unwrap(), vec![CognateId::Unique(1)]);
        assert_eq!(parser.parse(Some(" x ")).unwrap(), vec![CognateId::Unique(2)]);
        assert_eq!(parser.parse(Some(",,")).unwrap_err(), CognateError::Malformed(",,".into()));
    }

    #[test]
    fn test_lenient_bare_marker_is_unique() {
        let mut parser = CognateParser::new().strict(false);
        assert_eq!(parser.parse(Some("?")).unwrap(), vec![CognateId::Unique(1)]);
    }
}
