//! Taxon labels derived from language names.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Characters dropped from names outright.
const DROPPED: &[char] = &[':', '?', '\u{2019}', '\'', ',', '.'];

/// Derives a separator-safe label from a language name.
///
/// Qualifiers in square brackets and alternative names after a slash are
/// cut, diacritics are folded away and punctuation is removed:
/// `"Banggai (W.dialect)"` becomes `Banggai_Wdialect`.
pub fn slugify(name: &str) -> String {
    let name = name.split('[').next().unwrap_or_default().trim();
    let name = name.split('/').next().unwrap_or_default().trim();
    let name: String = name.chars().filter(|c| !matches!(c, '(' | ')')).collect();

    let folded: String = name.nfkd().filter(|c| canonical_combining_class(*c) == 0).collect();

    folded
        .replace(" - ", "_")
        .replace('-', "")
        .chars()
        .filter(|c| !DROPPED.contains(c))
        .map(|c| match c {
            ' ' => '_',
            'ß' => 'V',
            other => other,
        })
        .collect()
}

/// Taxon label for a language: `<slug>_<id>`.
pub fn slug_for(name: &str, id: impl std::fmt::Display) -> String {
    format!("{}_{}", slugify(name), id)
}

/// Removes tabs and newlines and trims, mapping a missing value to `""`.
pub fn clean(value: Option<&str>) -> String {
    value
        .map(|v| v.replace('\t', "").replace('\n', "").trim().to_string())
        .unwrap_or_default()
}
