use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DownloadError;

/// One of the sibling databases served by the ABVD software.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Austronesian,
    Bantu,
    Mayan,
    UtoAztecan,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Austronesian,
        Collection::Bantu,
        Collection::Mayan,
        Collection::UtoAztecan,
    ];

    /// Section name used in export URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Austronesian => "austronesian",
            Collection::Bantu => "bantu",
            Collection::Mayan => "mayan",
            Collection::UtoAztecan => "utoaztecan",
        }
    }

    /// Languages that were removed from the database and no longer export.
    pub fn dead_languages(self) -> &'static [u32] {
        match self {
            Collection::Austronesian => &[
                261, // Futuna-Aniwa
                874, // proto-philippines
            ],
            Collection::Bantu | Collection::Mayan | Collection::UtoAztecan => &[],
        }
    }

    pub fn is_dead(self, language_id: u32) -> bool {
        self.dead_languages().contains(&language_id)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = DownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.to_lowercase())
            .ok_or_else(|| DownloadError::UnknownCollection(s.to_string()))
    }
}
