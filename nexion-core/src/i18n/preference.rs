//! Persisted language preference.

use chrono::Utc;
use nexion_types::Language;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PREFERENCE_FILENAME: &str = "preferences.json";

#[derive(Error, Debug)]
pub enum PreferenceError {
    #[error("Failed to access preference file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize preferences: {0}")]
    Json(#[from] serde_json::Error),
}

/// Key/value storage for the user's language choice, surviving restarts
pub trait PreferenceStore: Send + Sync {
    fn load(&self) -> Result<Option<Language>, PreferenceError>;
    fn save(&self, language: Language) -> Result<(), PreferenceError>;
}

/// Store that lives as long as the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    language: Mutex<Option<Language>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_language(language: Language) -> Self {
        Self {
            language: Mutex::new(Some(language)),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<Language>, PreferenceError> {
        Ok(*self.language.lock())
    }

    fn save(&self, language: Language) -> Result<(), PreferenceError> {
        *self.language.lock() = Some(language);
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct StoredPreferences {
    language: Language,
    updated_at: String,
}

/// JSON file in the site's state directory
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default file name inside `state_dir`
    pub fn in_dir(state_dir: &Path) -> Self {
        Self::new(state_dir.join(PREFERENCE_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> PreferenceError {
        PreferenceError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<Language>, PreferenceError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read(&self.path).map_err(|e| self.io_error(e))?;
        match serde_json::from_slice::<StoredPreferences>(&data) {
            Ok(prefs) => Ok(Some(prefs.language)),
            Err(err) => {
                tracing::warn!("Ignoring unreadable preferences {:?}: {}", self.path, err);
                Ok(None)
            }
        }
    }

    fn save(&self, language: Language) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let payload = StoredPreferences {
            language,
            updated_at: Utc::now().to_rfc3339(),
        };
        let json = serde_json::to_vec_pretty(&payload)?;
        fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.load().unwrap(), None);
        store.save(Language::Zh).unwrap();
        assert_eq!(store.load().unwrap(), Some(Language::Zh));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FilePreferenceStore::in_dir(&dir.path().join("state"));
        assert_eq!(store.load().unwrap(), None);

        store.save(Language::Zh).unwrap();
        let reopened = FilePreferenceStore::in_dir(&dir.path().join("state"));
        assert_eq!(reopened.load().unwrap(), Some(Language::Zh));
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"language": "fr", "updated_at": "now"}"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }
}
