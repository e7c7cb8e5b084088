//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! theme preference, where the board is stored, and hotkey bindings.

mod error;
pub mod hotkeys;

pub use error::ConfigError;

use crate::storage::{FileSlot, StorageError, DEFAULT_STORAGE_KEY};
use hotkeys::ViewHotkeys;
use log::*;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/taskboard";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub theme_name: String,
    pub data_dir: Option<PathBuf>,
    pub storage_key: String,
    pub hotkeys: ViewHotkeys,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_theme_name")]
    theme_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    data_dir: Option<PathBuf>,
    #[serde(default = "default_storage_key")]
    storage_key: String,
    #[serde(default)]
    hotkeys: ViewHotkeys,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            theme_name: default_theme_name(),
            data_dir: None,
            storage_key: default_storage_key(),
            hotkeys: ViewHotkeys::default(),
            file_path: None,
        }
    }

    /// Load the configuration from the custom directory if provided, or the
    /// default one otherwise. A missing file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), ConfigError> {
        let dir_path = match custom_path {
            Some(path) => PathBuf::from(path),
            None => Config::default_path()?,
        };
        let file_path = dir_path.join(FILE_NAME);

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::Read {
                path: file_path.clone(),
                source: e,
            })?;
            self.apply_yaml(&file_path, &contents)?;
            debug!("Loaded configuration from {}", file_path.display());
        } else {
            debug!(
                "No configuration at {}, using defaults",
                file_path.display()
            );
        }

        self.file_path = Some(file_path);
        Ok(())
    }

    fn apply_yaml(&mut self, path: &Path, contents: &str) -> Result<(), ConfigError> {
        let data: FileSpec = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.theme_name = data.theme_name;
        self.data_dir = data.data_dir;
        self.storage_key = data.storage_key;
        self.hotkeys = data.hotkeys.with_defaults();
        Ok(())
    }

    /// Write the current configuration back to the file it was loaded from.
    ///
    pub fn save(&self) -> Result<(), ConfigError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::NotLoaded)?;
        let data = FileSpec {
            theme_name: self.theme_name.clone(),
            data_dir: self.data_dir.clone(),
            storage_key: self.storage_key.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content =
            serde_yaml::to_string(&data).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectory {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let write_err = |e: std::io::Error| ConfigError::Write {
            path: file_path.clone(),
            source: e,
        };
        let mut file = fs::File::create(file_path).map_err(write_err)?;
        write!(file, "{}", content).map_err(write_err)?;
        file.flush().map_err(write_err)?;
        debug!("Saved configuration to {}", file_path.display());
        Ok(())
    }

    /// The slot holding the board, honoring the configured directory and key.
    ///
    pub fn storage_slot(&self) -> Result<FileSlot, StorageError> {
        match &self.data_dir {
            Some(dir) => FileSlot::new(dir, &self.storage_key),
            None => FileSlot::in_default_dir(&self.storage_key),
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, ConfigError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::HomeDirectoryNotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::hotkeys::{Hotkey, HotkeyAction};
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("taskboard-config-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_keeps_defaults() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(config.theme_name, "tokyo-night");
        assert_eq!(config.storage_key, "mini-trello-state");
        assert!(config.data_dir.is_none());
        assert_eq!(config.file_path(), Some(dir.join("config.yml").as_path()));
        // Loading alone never creates anything.
        assert!(!dir.exists());
    }

    #[test]
    fn test_partial_file() {
        let mut config = Config::new();
        config
            .apply_yaml(
                Path::new("config.yml"),
                "theme_name: dracula\nstorage_key: work\nhotkeys:\n  board:\n    quit: Q\n",
            )
            .unwrap();
        assert_eq!(config.theme_name, "dracula");
        assert_eq!(config.storage_key, "work");
        assert_eq!(config.hotkeys.board[&HotkeyAction::Quit], Hotkey::key('Q'));
        assert_eq!(
            config.hotkeys.board[&HotkeyAction::MoveTask],
            Hotkey::key('m')
        );
    }

    #[test]
    fn test_invalid_hotkey_is_a_parse_error() {
        let mut config = Config::new();
        let result = config.apply_yaml(
            Path::new("config.yml"),
            "hotkeys:\n  board:\n    quit: hyper+q\n",
        );
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        config.theme_name = "rose-pine-dawn".to_string();
        config.data_dir = Some(dir.join("data"));
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).unwrap();
        assert_eq!(reloaded.theme_name, "rose-pine-dawn");
        assert_eq!(reloaded.data_dir, Some(dir.join("data")));
        assert_eq!(reloaded.hotkeys, config.hotkeys);
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_without_load_fails() {
        assert!(matches!(Config::new().save(), Err(ConfigError::NotLoaded)));
    }

    #[test]
    fn test_storage_slot_uses_configured_dir() {
        let mut config = Config::new();
        config.data_dir = Some(PathBuf::from("/srv/boards"));
        config.storage_key = "team".to_string();
        let slot = config.storage_slot().unwrap();
        assert_eq!(slot.path(), Path::new("/srv/boards/team.json"));
    }

    #[test]
    fn test_storage_slot_rejects_key_leaving_data_dir() {
        let mut config = Config::new();
        config.data_dir = Some(PathBuf::from("/srv/boards"));
        config.storage_key = "../elsewhere".to_string();
        assert!(matches!(
            config.storage_slot(),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
