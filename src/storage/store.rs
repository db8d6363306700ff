use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SprintError};
use crate::model::Settings;

/// Where effective settings came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsOrigin {
    File,
    Defaults,
}

/// Loads and saves the settings file. All config I/O goes through here.
pub struct SettingsStore {
    path: Option<PathBuf>,
}

impl SettingsStore {
    /// A store backed by an explicit file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// `<config_dir>/sprintcal/config.json`, or a store with no file when the
    /// platform has no config directory.
    pub fn global() -> Self {
        Self {
            path: Self::global_path(),
        }
    }

    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sprintcal").join("config.json"))
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Settings from the file, or defaults when there is no file.
    pub fn load(&self) -> Result<(Settings, SettingsOrigin)> {
        match &self.path {
            Some(path) if path.exists() => {
                let data = fs::read_to_string(path)?;
                tracing::debug!(path = %path.display(), "loaded settings");
                Ok((serde_json::from_str(&data)?, SettingsOrigin::File))
            }
            _ => Ok((Settings::default(), SettingsOrigin::Defaults)),
        }
    }

    pub fn save(&self, settings: &Settings) -> Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| SprintError::Other("No config directory available".into()))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Writes default settings, refusing to overwrite an existing file.
    pub fn init(&self) -> Result<Settings> {
        if let Some(path) = self.path.as_ref().filter(|p| p.exists()) {
            return Err(SprintError::ConfigExists(path.display().to_string()));
        }
        let settings = Settings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("config.json"));
        let (settings, origin) = store.load().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(origin, SettingsOrigin::Defaults);
    }

    #[test]
    fn loads_existing_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.json");
        file.write_str(r#"{"locale": "de_DE", "historyCount": 3}"#).unwrap();
        let (settings, origin) = SettingsStore::new(file.path()).load().unwrap();
        assert_eq!(settings.locale, "de_DE");
        assert_eq!(settings.history_count, 3);
        assert_eq!(origin, SettingsOrigin::File);
    }

    #[test]
    fn init_writes_then_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("config.json"));
        store.init().unwrap();
        dir.child("nested/config.json").assert(predicates::str::contains("fr_FR"));
        assert!(matches!(store.init(), Err(SprintError::ConfigExists(_))));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("config.json");
        file.write_str("{not json").unwrap();
        assert!(matches!(
            SettingsStore::new(file.path()).load(),
            Err(SprintError::Json(_))
        ));
    }
}
