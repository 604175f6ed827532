//! `config.json` in the program home. Every field is optional; a missing file
//! means defaults, a malformed one is an error.

use crate::errors::{Result, StoreError};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Compiled-in official package repository.
pub const OFFICIAL_SOURCE: &str = "The404Company/SigmaOS-packages";

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Overrides `<home>/packages`.
    pub packages_dir: Option<PathBuf>,
    pub official_source: String,
    pub api_base: String,
    pub raw_base: String,
    pub branch: String,
    /// Program used to launch entry files.
    pub interpreter: String,
    pub entry_stem: String,
    pub extension: String,
    /// Python used for `-m pip install`.
    pub python: String,
    pub timeout_secs: u64,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            packages_dir: None,
            official_source: OFFICIAL_SOURCE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            branch: "main".to_string(),
            interpreter: "python3".to_string(),
            entry_stem: "main".to_string(),
            extension: "py".to_string(),
            python: "python3".to_string(),
            timeout_secs: 30,
            log_level: None,
        }
    }
}

impl Settings {
    /// Reads `path`; falls back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StoreError::fs(path, e)),
        };
        let settings: Settings = serde_json::from_slice(&bytes)?;
        settings.validate()?;
        Ok(settings)
    }

    /// `<home>/config.json`
    pub fn load_default() -> Result<Self> {
        Self::load(&paths::config_path())
    }

    pub fn packages_root(&self) -> PathBuf {
        self.packages_dir
            .clone()
            .unwrap_or_else(paths::packages_dir)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            entry_stem: self.entry_stem.clone(),
            extension: self.extension.clone(),
            interpreter: self.interpreter.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.entry_stem.trim().is_empty() || self.extension.trim().is_empty() {
            return Err(StoreError::Validation(
                "config: entry_stem and extension must not be empty".into(),
            ));
        }
        if self.interpreter.trim().is_empty() {
            return Err(StoreError::Validation(
                "config: interpreter must not be empty".into(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::Validation(
                "config: timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// How addresses map to files and how those files are launched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub entry_stem: String,
    pub extension: String,
    pub interpreter: String,
}

impl Layout {
    /// File name used for one-segment addresses (`main.py`).
    pub fn default_entry(&self) -> String {
        self.file_name(&self.entry_stem)
    }

    pub fn file_name(&self, stem: &str) -> String {
        format!("{stem}.{}", self.extension)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Settings::default().layout()
    }
}
