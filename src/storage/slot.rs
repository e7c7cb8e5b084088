//! Durable key-value slots.

use super::StorageError;
use log::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const DEFAULT_DIRECTORY_NAME: &str = "taskboard";
const FILE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// A single named location holding the serialized board.
///
pub trait Slot {
    /// Human readable location, for logs and messages.
    fn describe(&self) -> String;

    /// Current contents, `None` when nothing was ever written.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Replace the contents.
    fn write(&mut self, contents: &str) -> Result<(), StorageError>;
}

/// Slot stored as `<dir>/<key>.json`.
///
#[derive(Clone, Debug)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    /// Slot for `key` inside `dir`. The key becomes the file stem as is, so
    /// it must be a plain file name.
    ///
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Result<Self, StorageError> {
        if key.is_empty()
            || key == "."
            || key == ".."
            || key.contains(|c: char| c == '/' || c == '\\')
        {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        let path = dir
            .as_ref()
            .join(format!("{}.{}", key, FILE_EXTENSION));
        Ok(FileSlot { path })
    }

    /// Slot under the platform data directory, e.g.
    /// `~/.local/share/taskboard/<key>.json`.
    ///
    pub fn in_default_dir(key: &str) -> Result<Self, StorageError> {
        FileSlot::new(FileSlot::default_dir()?, key)
    }

    fn default_dir() -> Result<PathBuf, StorageError> {
        match dirs::data_dir() {
            Some(data) => Ok(data.join(DEFAULT_DIRECTORY_NAME)),
            None => Err(StorageError::DataDirectoryNotFound),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next contents are written to before replacing the
    /// slot.
    ///
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(".");
        name.push(TEMP_EXTENSION);
        PathBuf::from(name)
    }
}

impl Slot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&self.path)
            .map(Some)
            .map_err(|e| StorageError::Read {
                path: self.path.clone(),
                source: e,
            })
    }

    /// Write the whole document to a temporary sibling and rename it over
    /// the slot, so the previous contents stay intact until the new ones are
    /// complete on disk.
    ///
    fn write(&mut self, contents: &str) -> Result<(), StorageError> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                debug!("Creating data directory {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let temp = self.temp_path();
        let write_err = |e: std::io::Error| StorageError::Write {
            path: temp.clone(),
            source: e,
        };
        let mut file = fs::File::create(&temp).map_err(write_err)?;
        file.write_all(contents.as_bytes()).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        drop(file);

        fs::rename(&temp, &self.path).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(())
    }
}

#[cfg(test)]
pub use memory::MemorySlot;
