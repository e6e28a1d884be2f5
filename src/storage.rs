//! File access used by the resource store.
//!
//! The engine only talks to the [`Storage`] trait so tests and editor hosts
//! can swap the backing store. [`FileSystem`] is the local-disk implementation.

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

pub trait Storage {
    fn exists(&self, path: &Path) -> bool;

    /// Create `path` and any missing ancestors. Succeeds if it already exists.
    fn create_dir(&self, path: &Path) -> Result<(), StorageError>;

    fn read_text(&self, path: &Path) -> Result<String, StorageError>;

    fn write_text(&self, path: &Path, text: &str) -> Result<(), StorageError>;

    fn delete_file(&self, path: &Path) -> Result<(), StorageError>;

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T, StorageError>
    where
        Self: Sized,
    {
        let text = self.read_text(path)?;
        serde_json::from_str(&text).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Serialize `value` with 4-space indentation and write it to `path`.
    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
    {
        let text = to_json_string(value).map_err(|source| StorageError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_text(path, &text)
    }
}

/// JSON text with the stable 4-space indentation used for every persisted document.
pub fn to_json_string<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Local-disk storage backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystem;

impl FileSystem {
    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        if source.kind() == ErrorKind::NotFound {
            StorageError::NotFound(path.to_path_buf())
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

impl Storage for FileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir(&self, path: &Path) -> Result<(), StorageError> {
        match std::fs::create_dir_all(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
            Err(source) => Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn read_text(&self, path: &Path) -> Result<String, StorageError> {
        std::fs::read_to_string(path).map_err(|e| Self::io_error(path, e))
    }

    fn write_text(&self, path: &Path, text: &str) -> Result<(), StorageError> {
        std::fs::write(path, text).map_err(|e| Self::io_error(path, e))
    }

    fn delete_file(&self, path: &Path) -> Result<(), StorageError> {
        std::fs::remove_file(path).map_err(|e| Self::io_error(path, e))
    }
}
