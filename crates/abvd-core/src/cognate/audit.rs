//! Data-quality check for raw cognacy annotations.
//!
//! Every value is run through two parsers: the strict one used for
//! phylogenetic export (dubious codes dropped, singletons minted) and a
//! lenient one (dubious codes kept, no singletons). A value is good only if
//! both accept it.

use super::{CognateError, CognateId, CognateOptions, CognateParser};

/// A value rejected by at least one of the two parsers.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditFailure {
    pub value: String,
    pub strict: Result<Vec<CognateId>, CognateError>,
    pub lenient: Result<Vec<CognateId>, CognateError>,
}

/// Outcome of an audit run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    pub checked: usize,
    pub good: usize,
    pub failures: Vec<AuditFailure>,
}

impl AuditReport {
    /// Share of good values, in percent.
    pub fn percentage(&self) -> f64 {
        if self.checked == 0 {
            return 100.0;
        }
        self.good as f64 / self.checked as f64 * 100.0
    }
}

/// Audits a sequence of raw cognacy values.
pub fn audit<I, S>(values: I) -> AuditReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut strict = CognateParser::with_options(CognateOptions {
        strict: true,
        uniques: true,
        check: true,
        accept_numeric: false,
    });
    let mut lenient = CognateParser::with_options(CognateOptions {
        strict: false,
        uniques: false,
        check: true,
        accept_numeric: false,
    });

    let mut report = AuditReport::default();
    for value in values {
        let value = value.as_ref();
        let a = strict.parse(Some(value));
        let b = lenient.parse(Some(value));
        report.checked += 1;

        if a.is_ok() && b.is_ok() {
            report.good += 1;
        } else {
            report.failures.push(AuditFailure {
                value: value.to_string(),
                strict: a,
                lenient: b,
            });
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_counts() {
        let report = audit(["1", "2, 3?", "A", "", ",4"]);
        assert_eq!(report.checked, 5);
        assert_eq!(report.good, 3);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].value, "A");
        assert!(matches!(
            report.failures[1].strict,
            Err(CognateError::Malformed(_))
        ));
        assert!((report.percentage() - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_audit() {
        let report = audit(Vec::<String>::new());
        assert_eq!(report.checked, 0);
        assert_eq!(report.percentage(), 100.0);
    }
}
