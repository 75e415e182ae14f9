//! JSON file storage.
//!
//! The whole storage is one JSON object (`{"key": "value", ...}`) so several
//! keys can share a file, the way a browser origin shares local storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use super::{KeyValueStorage, StorageError};

type Entries = BTreeMap<String, String>;

/// Key-value storage persisted as a JSON object in a single file.
///
/// Readers take a shared advisory lock and writers an exclusive one, so a
/// concurrent process never observes a half-written file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default storage location.
    ///
    /// Uses `~/.local/share/idxsite/storage.json` on Linux, or the platform
    /// equivalent via `dirs::data_dir()`. Falls back to the current directory.
    pub fn default_path() -> PathBuf {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        data_dir.join("idxsite").join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_entries(&self) -> Result<Entries, StorageError> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        FileExt::lock_shared(&file).map_err(|e| self.io_error(e))?;
        let mut content = String::new();
        let read = file.read_to_string(&mut content);
        let _ = FileExt::unlock(&file);
        read.map_err(|e| self.io_error(e))?;

        parse_entries(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Read-modify-write under an exclusive lock.
    fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| self.io_error(e))?;

        FileExt::lock_exclusive(&file).map_err(|e| self.io_error(e))?;
        let result = self.rewrite_locked(&mut file, apply);
        let _ = FileExt::unlock(&file);
        result
    }

    fn rewrite_locked<F>(&self, file: &mut File, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Entries),
    {
        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| self.io_error(e))?;

        let mut entries = match parse_entries(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Discarding corrupt storage file on write"
                );
                Entries::new()
            }
        };

        apply(&mut entries);

        let serialized = serde_json::to_string_pretty(&entries).map_err(StorageError::Serialize)?;

        file.set_len(0).map_err(|e| self.io_error(e))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| self.io_error(e))?;
        file.write_all(serialized.as_bytes())
            .map_err(|e| self.io_error(e))?;
        file.flush().map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

impl Default for FileStorage {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

/// Empty or whitespace-only content is treated as an empty storage.
fn parse_entries(content: &str) -> Result<Entries, serde_json::Error> {
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_str(content)
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
