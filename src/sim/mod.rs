//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by slot and grid index)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod mystery;
pub mod pool;
pub mod sequence;
pub mod state;
pub mod tick;
pub mod wave;

pub use collision::{Aabb, Brick, Bunker, BunkerStrike, strike_bunkers};
pub use mystery::{MysteryInvader, mystery_points};
pub use pool::{Projectile, ProjectilePool};
pub use sequence::{GetReadySequence, SequenceSignal};
pub use state::{Cannon, GameEvent, GameState, LevelState, PanelText, PointsPopup};
pub use tick::{TickInput, tick};
pub use wave::{Invader, StepKind, Wave, column_bounds};
