pub mod cognate;
pub mod config;
pub mod database;
pub mod document;
pub mod download;
pub mod record;
pub mod slug;
pub mod storage;

pub use cognate::{CognacyValue, CognateError, CognateId, CognateOptions, CognateParser};
pub use config::{Config, ConfigError, DownloadConfig, StorageConfig};
pub use database::{Aggregation, DatabaseError, LanguageSummary, LexiconDatabase};
pub use document::{Document, DocumentError, LanguageRecord, LexiconEntry, Location, RecordKind};
pub use download::{Collection, DownloadError, Downloader, Fetcher, HttpFetcher};
pub use record::{LexicalRecord, LoanMarker};
pub use slug::{slug_for, slugify};
pub use storage::{FileStorage, Storage, StorageError};
