//! Sol Invaders - Defenders of Sol, a Space Invaders clone
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (wave, projectiles, level state machine)
//! - `session`: Cross-scene game session (score, lives, level table, high scores)
//! - `scenes`: Bootstrap, menu, high score entry, credits and HUD coordinators
//! - `app`: Scene router that drives the active scene once per frame
//! - `persistence`: High score file codec with signature validation
//! - `tuning`: Data-driven level balance

pub mod app;
pub mod autopilot;
pub mod highscores;
pub mod persistence;
pub mod scenes;
pub mod session;
pub mod settings;
pub mod sim;
pub mod timer;
pub mod tuning;

pub use app::{App, FrameInput};
pub use highscores::{HighScoreEntry, HighScores};
pub use session::{MusicCue, MusicTrack, Scene, Session};
pub use settings::Settings;
pub use tuning::{LevelInfo, LevelTable};

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (50 Hz)
    pub const SIM_DT: f32 = 1.0 / 50.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Wave grid dimensions
    pub const WAVE_ROWS: usize = 5;
    pub const WAVE_COLUMNS: usize = 11;
    /// Distance between neighbouring invaders (both axes)
    pub const INVADER_SPACING: f32 = 20.0;
    /// Local offset of the top-left invader relative to the wave origin
    pub const WAVE_LEFT_OFFSET: f32 = -100.0;
    pub const WAVE_TOP_OFFSET: f32 = 160.0;
    /// Points per row, top to bottom
    pub const ROW_POINTS: [u32; WAVE_ROWS] = [30, 20, 20, 10, 10];

    /// Initial horizontal travel bounds of the wave origin
    pub const WAVE_X_MIN: f32 = -20.0;
    pub const WAVE_X_MAX: f32 = 20.0;
    /// Initial vertical position of the wave origin
    pub const WAVE_START_Y: f32 = -30.0;

    /// Upper clamp on the tick delay between wave steps
    pub const MOVE_DELAY_HIGH_CLAMP: f32 = 50.0;
    /// An invader below this altitude has landed
    pub const LANDING_ALTITUDE: f32 = 10.0;
    /// Warning is shown while any invader is at or below this altitude
    pub const WARNING_ALTITUDE: f32 = 30.0;

    /// Player cannon
    pub const CANNON_START: Vec2 = Vec2::new(0.0, -28.79);
    pub const CANNON_SPEED: f32 = 50.0;
    pub const CANNON_X_LIMIT: f32 = 115.0;
    /// Seconds between cannon shots
    pub const CANNON_FIRE_LOCK: f32 = 0.35;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 100.0;
    /// Alien projectiles are retired below this height
    pub const ALIEN_PROJECTILE_FLOOR: f32 = -35.0;
    /// Cannon projectiles are retired above this height
    pub const CANNON_PROJECTILE_CEILING: f32 = 140.0;
    /// Size multiplier of bombs dropped by the mystery invader
    pub const MYSTERY_BOMB_SIZE: f32 = 2.0;

    /// Mystery invader flight
    pub const MYSTERY_START: Vec2 = Vec2::new(-237.0, 150.0);
    pub const MYSTERY_SPEED: f32 = 10.0;
    pub const MYSTERY_EXIT_X: f32 = 247.0;
    /// Minimum seconds between mystery invader appearances
    pub const MYSTERY_SPAWN_GATE: f32 = 20.0;

    /// Hitbox half extents
    pub const INVADER_HALF_EXTENTS: Vec2 = Vec2::new(6.0, 5.0);
    pub const MYSTERY_HALF_EXTENTS: Vec2 = Vec2::new(12.0, 10.0);
    pub const CANNON_HALF_EXTENTS: Vec2 = Vec2::new(7.0, 4.0);
    pub const PROJECTILE_HALF_EXTENTS: Vec2 = Vec2::new(0.5, 3.0);

    /// Bunker layout
    pub const BUNKER_CENTERS_X: [f32; 4] = [-75.0, -25.0, 25.0, 75.0];
    pub const BUNKER_BASE_Y: f32 = -15.0;
    pub const BUNKER_BRICK_COLUMNS: usize = 8;
    pub const BUNKER_BRICK_ROWS: usize = 4;
    pub const BRICK_SIZE: f32 = 3.0;
    /// Blast radius ranges when a shot hits a bunker
    pub const ALIEN_BLAST_MIN: f32 = 3.0;
    pub const ALIEN_BLAST_MAX: f32 = 9.0;
    pub const CANNON_BLAST_MIN: f32 = 3.0;
    pub const CANNON_BLAST_MAX: f32 = 8.0;

    /// Session defaults
    pub const START_LIVES: u32 = 3;
    /// The HUD has room for this many reserve cannons
    pub const MAX_LIFE_ICONS: usize = 10;
}

/// Seconds since the unix epoch, used to stamp high score entries
pub fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
