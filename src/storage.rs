use std::io::Write;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use hedgehog_core::GameSettings;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::StorageError;

const SETTINGS_KEY: &str = "settings.json";

pub fn get_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "meeshroom", "hedgehog").map(|dirs| dirs.data_dir().to_path_buf())
}

/// JSON files in a single directory, one per key.
#[derive(Debug, Clone, PartialEq)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Storage in the platform data directory.
    pub fn new() -> Result<Self, StorageError> {
        get_data_dir()
            .map(Storage::at)
            .ok_or(StorageError::NoDataDir)
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Storage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn set<T: Serialize>(&self, key: impl AsRef<str>, value: &T) -> Result<(), StorageError> {
        let file_path = self.dir.join(key.as_ref());
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = std::fs::File::create(file_path)?;
        file.write_all(serde_json::to_string(value)?.as_bytes())?;
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: impl AsRef<str>) -> Result<T, StorageError> {
        let data = std::fs::read_to_string(self.dir.join(key.as_ref()))?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_settings(&self, settings: &GameSettings) -> Result<(), StorageError> {
        self.set(SETTINGS_KEY, settings)
    }

    pub fn load_settings(&self) -> Result<GameSettings, StorageError> {
        self.get(SETTINGS_KEY)
    }

    /// Loads the last used settings, falling back to the defaults when
    /// nothing usable is stored.
    pub fn load_settings_or_default(&self) -> GameSettings {
        match self.load_settings() {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(err) => {
                    log::warn!("Ignoring stored settings: {}", err);
                    GameSettings::default()
                }
            },
            Err(StorageError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                GameSettings::default()
            }
            Err(err) => {
                log::warn!("Failed to load settings: {}", err);
                GameSettings::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hedgehog_core::PitMode;

    #[test]
    fn test_settings_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::at(dir.path().join("nested"));
        let settings = GameSettings::new(8, 4, 5, 2, PitMode::WormHoles);
        storage.save_settings(&settings).unwrap();
        assert_eq!(storage.load_settings().unwrap(), settings);
        assert_eq!(storage.load_settings_or_default(), settings);
    }

    #[test]
    fn test_missing_settings_use_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::at(dir.path());
        assert!(matches!(storage.load_settings(), Err(StorageError::Io(_))));
        assert_eq!(storage.load_settings_or_default(), GameSettings::default());
    }

    #[test]
    fn test_bad_settings_use_default() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::at(dir.path());

        std::fs::write(dir.path().join(SETTINGS_KEY), "not json").unwrap();
        assert!(matches!(storage.load_settings(), Err(StorageError::Json(_))));
        assert_eq!(storage.load_settings_or_default(), GameSettings::default());

        let out_of_range = GameSettings::new(20, 2, 4, 3, PitMode::Pits);
        storage.save_settings(&out_of_range).unwrap();
        assert_eq!(storage.load_settings().unwrap(), out_of_range);
        assert_eq!(storage.load_settings_or_default(), GameSettings::default());
    }
}
