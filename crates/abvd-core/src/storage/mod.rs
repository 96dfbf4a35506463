mod error;
mod file;

pub use error::StorageError;
pub use file::{read_document, write_json, FileStorage};

use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::download::Collection;

/// Trait for document storage backends.
///
/// Implementations keep raw downloads and parsed documents per collection
/// and language id.
pub trait Storage {
    /// Saves a raw XML download, returning where it was written.
    fn save_raw(
        &self,
        collection: Collection,
        language_id: u32,
        xml: &str,
    ) -> Result<PathBuf, StorageError>;

    /// Saves a parsed document as JSON, returning where it was written.
    fn save_document(
        &self,
        collection: Collection,
        language_id: u32,
        document: &Document,
    ) -> Result<PathBuf, StorageError>;

    /// Loads a document from a raw or JSON file.
    fn load_document(&self, path: &Path) -> Result<Document, StorageError>;

    /// Lists language ids with a raw download, in ascending order.
    fn list_downloaded(&self, collection: Collection) -> Result<Vec<u32>, StorageError>;

    /// Lists stored JSON documents of a collection, sorted by path.
    fn document_paths(&self, collection: Collection) -> Result<Vec<PathBuf>, StorageError>;
}
