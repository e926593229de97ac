//! Runtime settings
//!
//! Stored as JSON next to the high score file. A missing file means
//! defaults; `SOL_INVADERS_DATA_DIR` overrides where data lives.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::write_bytes_atomic;
use crate::tuning::LevelTable;

/// Environment variable that overrides `data_dir`
pub const DATA_DIR_ENV: &str = "SOL_INVADERS_DATA_DIR";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the high score file
    pub data_dir: PathBuf,

    // === Simulation ===
    /// Fixed simulation rate
    pub tick_rate_hz: u32,
    /// Cap on simulation steps per frame
    pub max_substeps: u32,
    /// Lives at the start of a game
    pub start_lives: u32,
    /// RNG seed; a fresh one is drawn per level when unset
    pub seed: Option<u64>,

    // === Content ===
    /// Custom level table (JSON); the built-in table is used when unset
    pub levels_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            tick_rate_hz: 50,
            max_substeps: crate::consts::MAX_SUBSTEPS,
            start_lives: crate::consts::START_LIVES,
            seed: None,
            levels_path: None,
        }
    }
}

impl Settings {
    /// Settings file name inside the data dir
    pub const FILE_NAME: &'static str = "settings.json";
    /// High score file name inside the data dir
    pub const HIGH_SCORE_FILE: &'static str = "HighScores";

    /// Load settings from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let mut settings = match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings: Settings = serde_json::from_str(&json)?;
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => return Err(err.into()),
        };
        settings.apply_overrides(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// `load`, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("Ignoring settings at {}: {}", path.display(), err);
            let mut settings = Self::default();
            settings.apply_overrides(|key| std::env::var(key).ok());
            settings
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        write_bytes_atomic(path, json.as_bytes())?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|d| !d.trim().is_empty()) {
            log::debug!("{} overrides data dir: {}", DATA_DIR_ENV, dir);
            self.data_dir = PathBuf::from(dir);
        }
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.data_dir.join(Self::HIGH_SCORE_FILE)
    }

    /// Seconds per simulation step
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }

    /// The configured level table, or the built-in one if it can't be loaded
    pub fn level_table(&self) -> LevelTable {
        let Some(path) = &self.levels_path else {
            return LevelTable::default();
        };
        match LevelTable::load(path) {
            Ok(table) => {
                log::info!("Loaded {} levels from {}", table.len(), path.display());
                table
            }
            Err(err) => {
                log::warn!("Using built-in levels, {} is unusable: {}", path.display(), err);
                LevelTable::default()
            }
        }
    }
}
