//! Data-driven level balance
//!
//! Each level of the game is described by a `LevelInfo`. The built-in table
//! can be replaced by a JSON file (see `Settings::levels_path`).

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a level table
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read level table: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("level table contains no levels")]
    Empty,
    #[error("level {level}: {field} is {value}, must be at most 100")]
    OutOfRange {
        level: String,
        field: &'static str,
        value: u32,
    },
}

/// Percent rolls are made against `0..100`
const MAX_CHANCE: u32 = 100;

/// Tunables for a single level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelInfo {
    /// Display name (shown on the get-ready panel)
    pub name: String,
    /// Ticks between wave steps at level start
    pub start_move_delay: f32,
    /// Ticks removed from the step delay with each invader death
    pub move_delay_decrement: f32,
    /// Initial horizontal step size
    pub horizontal_start_speed: f32,
    /// Step size multiplier applied with each invader death
    pub horizontal_speed_multiplier: f32,
    /// Drop distance when the wave reverses
    pub vertical_speed: f32,
    /// Percent chance (out of 100) that an invader fires on a step
    pub alien_fire_chance: u32,
    /// Percent chance per step that the mystery invader appears
    pub mystery_invader_chance: u32,
    /// Maximum number of alien projectiles in flight
    pub max_alien_projectiles: usize,
    /// Lowest step delay allowed
    pub move_delay_low_clamp: f32,
}

impl Default for LevelInfo {
    fn default() -> Self {
        Self {
            name: "Unnamed Sector".to_string(),
            start_move_delay: 55.0,
            move_delay_decrement: 1.0,
            horizontal_start_speed: 2.5,
            horizontal_speed_multiplier: 1.01,
            vertical_speed: 12.0,
            alien_fire_chance: 25,
            mystery_invader_chance: 5,
            max_alien_projectiles: 2,
            move_delay_low_clamp: 0.0,
        }
    }
}

/// Ordered list of levels; the last level repeats forever
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    levels: Vec<LevelInfo>,
}

impl Default for LevelTable {
    fn default() -> Self {
        let level = |name: &str, delay: f32, speed: f32, drop: f32, fire: u32, max: usize, low: f32| {
            LevelInfo {
                name: name.to_string(),
                start_move_delay: delay,
                horizontal_start_speed: speed,
                vertical_speed: drop,
                alien_fire_chance: fire,
                max_alien_projectiles: max,
                move_delay_low_clamp: low,
                ..LevelInfo::default()
            }
        };

        Self {
            levels: vec![
                level("Pluto Outpost", 55.0, 2.5, 8.0, 20, 2, 1.0),
                level("Neptune Watch", 50.0, 2.5, 10.0, 25, 2, 1.0),
                level("Saturn Rings", 45.0, 3.0, 10.0, 30, 3, 1.0),
                level("Jupiter Gate", 40.0, 3.0, 12.0, 35, 3, 1.0),
                level("Mars Defence", 35.0, 3.5, 12.0, 40, 4, 0.0),
                level("Earth Orbit", 30.0, 3.5, 14.0, 50, 5, 0.0),
            ],
        }
    }
}

impl LevelTable {
    /// Build a table from an explicit list (must not be empty, chances are percentages)
    pub fn new(levels: Vec<LevelInfo>) -> Result<Self, TuningError> {
        if levels.is_empty() {
            return Err(TuningError::Empty);
        }
        for level in &levels {
            let chances = [
                ("alien_fire_chance", level.alien_fire_chance),
                ("mystery_invader_chance", level.mystery_invader_chance),
            ];
            for (field, value) in chances {
                if value > MAX_CHANCE {
                    return Err(TuningError::OutOfRange {
                        level: level.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of levels
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let levels: Vec<LevelInfo> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// Load a JSON level table from disk
    pub fn load(path: &Path) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", table.len(), path.display());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the final level
    pub fn last_index(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Level at `index`, clamped to the final level
    pub fn get(&self, index: usize) -> &LevelInfo {
        let clamped = index.min(self.last_index());
        if clamped != index {
            log::warn!("Level {} out of range, using level {}", index, clamped);
        }
        &self.levels[clamped]
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelInfo> {
        self.levels.iter()
    }
}
