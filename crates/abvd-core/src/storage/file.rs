use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{StorageConfig, DOCUMENT_EXTENSION, RAW_EXTENSION};
use crate::document::{parse_document, wrap_fragment, Document};
use crate::download::Collection;

use super::error::StorageError;
use super::Storage;

/// File-based storage implementation.
///
/// Layout under the data directory:
/// ```text
/// abvd-data/
///   austronesian/
///     99.xml          # raw export, wrapped in an <abvd> root
///     99.json         # parsed document
///   bantu/
///     ...
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    config: StorageConfig,
}

impl FileStorage {
    /// Creates a new FileStorage with the default data directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new FileStorage with custom configuration.
    pub fn with_config(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Returns the directory of a collection.
    pub fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.config.collection_path(collection.as_str())
    }

    /// Returns the path of a raw download.
    pub fn raw_file(&self, collection: Collection, language_id: u32) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", language_id, RAW_EXTENSION))
    }

    /// Returns the path of a parsed document.
    pub fn document_file(&self, collection: Collection, language_id: u32) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{}.{}", language_id, DOCUMENT_EXTENSION))
    }

    /// Ensures a collection's directory exists.
    fn ensure_collection_dir(&self, collection: Collection) -> Result<(), StorageError> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        }
        Ok(())
    }

    /// Files of a collection with the given extension, keyed by numeric stem.
    fn files_with_extension(
        &self,
        collection: Collection,
        extension: &str,
    ) -> Result<Vec<(u32, PathBuf)>, StorageError> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let entries = fs::read_dir(&dir).map_err(|e| StorageError::io(&dir, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&dir, e))?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) != Some(extension) {
                continue;
            }
            // Skip files not named after a language id
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u32>().ok())
            {
                files.push((id, path));
            }
        }

        files.sort_by_key(|(id, _)| *id);
        Ok(files)
    }
}

impl Storage for FileStorage {
    fn save_raw(
        &self,
        collection: Collection,
        language_id: u32,
        xml: &str,
    ) -> Result<PathBuf, StorageError> {
        self.ensure_collection_dir(collection)?;

        let path = self.raw_file(collection, language_id);
        fs::write(&path, wrap_fragment(xml).as_bytes()).map_err(|e| StorageError::io(&path, e))?;

        Ok(path)
    }

    fn save_document(
        &self,
        collection: Collection,
        language_id: u32,
        document: &Document,
    ) -> Result<PathBuf, StorageError> {
        self.ensure_collection_dir(collection)?;

        let path = self.document_file(collection, language_id);
        write_json(&path, document)?;

        Ok(path)
    }

    fn load_document(&self, path: &Path) -> Result<Document, StorageError> {
        read_document(path)
    }

    fn list_downloaded(&self, collection: Collection) -> Result<Vec<u32>, StorageError> {
        Ok(self
            .files_with_extension(collection, RAW_EXTENSION)?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }

    fn document_paths(&self, collection: Collection) -> Result<Vec<PathBuf>, StorageError> {
        Ok(self
            .files_with_extension(collection, DOCUMENT_EXTENSION)?
            .into_iter()
            .map(|(_, path)| path)
            .collect())
    }
}

/// Reads a document from disk.
///
/// `.xml` files are parsed as raw exports, anything else as JSON.
pub fn read_document(path: &Path) -> Result<Document, StorageError> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;

    if path.extension().and_then(|e| e.to_str()) == Some(RAW_EXTENSION) {
        Ok(parse_document(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).map_err(|e| StorageError::io(path, e))?;

    Ok(())
}
