//! Application settings.
//!
//! Settings live in a single TOML file with kebab-case keys. Every section
//! falls back to its defaults, so a partial file is valid:
//!
//! ```toml
//! [history]
//! max-entries = 25
//!
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//! ```

use anyhow::{Context, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_SETTINGS_PATH: &str = "Settings.toml";
const DEFAULT_MAX_HISTORY_ENTRIES: usize = 25;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub history: HistorySettings,
    pub logging: LoggingSettings,
}

/// Browsing history of a pane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HistorySettings {
    /// Maximum number of entries kept behind the current view (0 = unlimited).
    pub max_entries: usize,
}

impl Default for HistorySettings {
    fn default() -> Self {
        HistorySettings {
            max_entries: DEFAULT_MAX_HISTORY_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Run logs kept in `directory` (0 = keep all).
    pub max_files: usize,
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, returning defaults when the file doesn't exist.
    ///
    /// Runs before logging is set up, so diagnostics go to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        if !path.exists() {
            println!("No settings found at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        crate::helpers::load_toml::<Settings, _>(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        crate::helpers::save_toml(self, path).context("failed to save settings file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let settings = Settings::load(temp_dir.path().join(DEFAULT_SETTINGS_PATH)).unwrap();

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.history.max_entries, 25);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_PATH);
        fs::write(&path, "[history]\nmax-entries = 5\n").unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.history.max_entries, 5);
        assert_eq!(settings.logging, LoggingSettings::default());
    }

    #[test]
    fn test_kebab_case_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_PATH);
        fs::write(
            &path,
            "[logging]\nenabled = false\nlevel = \"debug\"\nmax-files = 7\ndirectory = \"var/log\"\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert!(!settings.logging.enabled);
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.max_files, 7);
        assert_eq!(settings.logging.directory, PathBuf::from("var/log"));
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_PATH);
        let mut settings = Settings::default();
        settings.history.max_entries = 0;
        settings.logging.level = "softcenter_core=trace,warn".to_string();

        settings.save(&path).unwrap();

        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_SETTINGS_PATH);
        fs::write(&path, "[history]\nmax-entries = \"many\"\n").unwrap();

        assert!(Settings::load(&path).is_err());
    }
}
