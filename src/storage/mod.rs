//! Snapshot directory access
//!
//! A snapshot directory holds one JSON document per REST collection plus
//! `info.json`, and receives the rendered `report.txt`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::{Collection, InfoDocument, Snapshot};
use crate::utils::error::ReportError;

/// Site info document name
pub const INFO_FILE: &str = "info.json";

/// Rendered report name
pub const REPORT_FILE: &str = "report.txt";

/// Reads and writes the files of one snapshot directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of a file inside the directory
    pub fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// Load and parse a JSON document
    ///
    /// Returns `Ok(None)` when the file does not exist. Any other read
    /// failure, or content that does not parse as `T`, is an error.
    pub fn load<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>, ReportError> {
        let path = self.path(file_name);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(file = %path.display(), "Snapshot file absent");
                return Ok(None);
            }
            Err(source) => return Err(ReportError::Io { path, source }),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ReportError::MalformedJson { file: path, source })
    }

    /// Load a collection, substituting an empty list when absent
    ///
    /// A document holding `null` or `{}` counts as an empty collection.
    pub fn load_collection<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<Vec<T>, ReportError> {
        let file_name = collection.file_name();
        let items: Vec<T> = match self.load::<Option<Value>>(&file_name)?.flatten() {
            None => Vec::new(),
            Some(Value::Object(map)) if map.is_empty() => Vec::new(),
            Some(document) => {
                serde_json::from_value(document).map_err(|source| ReportError::MalformedJson {
                    file: self.path(&file_name),
                    source,
                })?
            }
        };
        tracing::debug!(collection = %collection, count = items.len(), "Loaded collection");
        Ok(items)
    }

    /// Load every document a report needs
    pub fn load_snapshot(&self) -> Result<Snapshot, ReportError> {
        let info = self
            .load::<Option<InfoDocument>>(INFO_FILE)?
            .flatten()
            .and_then(InfoDocument::into_info);

        Ok(Snapshot {
            info,
            categories: self.load_collection(Collection::Categories)?,
            tags: self.load_collection(Collection::Tags)?,
            posts: self.load_collection(Collection::Posts)?,
            pages: self.load_collection(Collection::Pages)?,
            media: self.load_collection(Collection::Media)?,
            users: self.load_collection(Collection::Users)?,
        })
    }

    /// Serialize a value as pretty JSON, creating the directory if needed
    pub fn save<T: Serialize + ?Sized>(
        &self,
        file_name: &str,
        value: &T,
    ) -> Result<PathBuf, ReportError> {
        let path = self.path(file_name);
        let json = serde_json::to_string_pretty(value)
            .map_err(|source| ReportError::MalformedJson {
                file: path.clone(),
                source,
            })?;
        self.write(&path, json.as_bytes())?;
        Ok(path)
    }

    /// Delete a file left by an earlier run
    ///
    /// Returns whether a file was removed.
    pub fn remove(&self, file_name: &str) -> Result<bool, ReportError> {
        let path = self.path(file_name);
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "Removed stale snapshot file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ReportError::Io { path, source }),
        }
    }

    /// Write the rendered report as UTF-8 text
    pub fn write_report(&self, text: &str) -> Result<PathBuf, ReportError> {
        let path = self.path(REPORT_FILE);
        self.write(&path, text.as_bytes())?;
        tracing::info!(file = %path.display(), bytes = text.len(), "Report written");
        Ok(path)
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
        fs::create_dir_all(&self.dir).map_err(|source| ReportError::Io {
            path: self.dir.clone(),
            source,
        })?;
        fs::write(path, bytes).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
