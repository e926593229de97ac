//! Game state and core simulation types
//!
//! Everything one level of play needs lives in `GameState`; the cross-level
//! session (score, lives, level index) is passed into `tick` separately.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Aabb, Bunker};
use super::mystery::MysteryInvader;
use super::pool::ProjectilePool;
use super::sequence::GetReadySequence;
use super::wave::{StepKind, Wave};
use crate::consts::*;
use crate::tuning::LevelInfo;

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelState {
    /// Panel showing before the first life of a level, or level cleared
    GetReady,
    /// Active gameplay
    Playing,
    /// Cannon destroyed, waiting to continue with the next life
    NextLife,
    /// Game is paused
    Paused,
    /// Run ended (last life lost or invaders landed)
    GameOver,
}

/// The player's cannon
#[derive(Debug, Clone)]
pub struct Cannon {
    pub pos: Vec2,
    pub alive: bool,
    /// Seconds since the last shot
    since_fired: f32,
}

impl Default for Cannon {
    fn default() -> Self {
        Self {
            pos: CANNON_START,
            alive: true,
            since_fired: CANNON_FIRE_LOCK,
        }
    }
}

impl Cannon {
    /// Back to the start position, alive and ready to fire
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.pos, CANNON_HALF_EXTENTS)
    }

    /// Move by `axis` in [-1, 1] for `dt` seconds and cool the fire lock
    pub fn steer(&mut self, axis: f32, dt: f32) {
        let delta = axis.clamp(-1.0, 1.0) * CANNON_SPEED * dt;
        self.pos.x = (self.pos.x + delta).clamp(-CANNON_X_LIMIT, CANNON_X_LIMIT);
        self.since_fired += dt;
    }

    pub fn fire_ready(&self) -> bool {
        self.alive && self.since_fired >= CANNON_FIRE_LOCK
    }

    pub fn mark_fired(&mut self) {
        self.since_fired = 0.0;
    }
}

/// Title and body of the get-ready panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelText {
    pub title: String,
    pub body: String,
}

impl PanelText {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn lives_remaining(title: impl Into<String>, lives: u32) -> Self {
        Self::new(
            title,
            format!("Lives Remaining : {}\nPress Space to Continue", lives),
        )
    }
}

/// "N Points" label shown where the mystery invader was hit
#[derive(Debug, Clone, PartialEq)]
pub struct PointsPopup {
    pub pos: Vec2,
    pub points: u32,
    /// Seconds left on screen
    pub remaining: f32,
}

/// Seconds the mystery points label stays up
pub const POINTS_POPUP_TIME: f32 = 2.0;

/// Game events for audio/visual feedback
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    InvaderKilled { index: usize, points: u32, pos: Vec2 },
    MysteryKilled { points: u32, pos: Vec2 },
    MysterySpawned,
    /// Crossed the screen without being hit
    MysteryEscaped,
    CannonFired { pos: Vec2 },
    AlienFired { pos: Vec2, mystery: bool },
    PlayerHit { pos: Vec2 },
    BunkerHit { pos: Vec2, bricks: usize },
    WaveStep(StepKind),
    InvadersLanded,
    LevelCleared,
    StateChanged { from: LevelState, to: LevelState },
}

/// State of one level in progress
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the level RNG was created from
    pub seed: u64,
    rng: Pcg32,
    pub level_state: LevelState,
    pub level_name: String,
    pub wave: Wave,
    pub alien_projectiles: ProjectilePool,
    pub cannon_projectile: ProjectilePool,
    pub mystery: MysteryInvader,
    pub cannon: Cannon,
    pub bunkers: Vec<Bunker>,
    pub sequence: GetReadySequence,
    pub panel: PanelText,
    /// Invaders are close to landing
    pub warning: bool,
    pub points_popup: Option<PointsPopup>,
    pub fire_chance: u32,
    pub mystery_chance: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Lay out a fresh level and start the get-ready sequence
    pub fn new(level: &LevelInfo, lives: u32, seed: u64) -> Self {
        let mut sequence = GetReadySequence::default();
        sequence.start(0.0);

        log::info!("Level '{}' loaded (seed {})", level.name, seed);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_state: LevelState::GetReady,
            level_name: level.name.clone(),
            wave: Wave::new(level),
            alien_projectiles: ProjectilePool::new(level.max_alien_projectiles),
            cannon_projectile: ProjectilePool::new(1),
            mystery: MysteryInvader::new(),
            cannon: Cannon::default(),
            bunkers: Bunker::standard_row(),
            sequence,
            panel: PanelText::lives_remaining(level.name.clone(), lives),
            warning: false,
            points_popup: None,
            fire_chance: level.alien_fire_chance,
            mystery_chance: level.mystery_invader_chance,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub(crate) fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Change state, recording the transition
    pub fn set_level_state(&mut self, to: LevelState) {
        let from = self.level_state;
        if from == to {
            return;
        }
        log::debug!("Level state {:?} -> {:?}", from, to);
        self.level_state = to;
        self.events.push(GameEvent::StateChanged { from, to });
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_playing(&self) -> bool {
        self.level_state == LevelState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_level_waits_in_get_ready() {
        let level = LevelInfo::default();
        let state = GameState::new(&level, 3, 1);
        assert_eq!(state.level_state, LevelState::GetReady);
        assert!(state.sequence.is_running());
        assert_eq!(state.alien_projectiles.capacity(), level.max_alien_projectiles);
        assert_eq!(state.cannon_projectile.capacity(), 1);
        assert_eq!(state.bunkers.len(), 4);
        assert_eq!(
            state.panel.body,
            "Lives Remaining : 3\nPress Space to Continue"
        );
    }

    #[test]
    fn test_cannon_clamps_and_locks_fire() {
        let mut cannon = Cannon::default();
        assert!(cannon.fire_ready());
        cannon.mark_fired();
        assert!(!cannon.fire_ready());
        for _ in 0..20 {
            cannon.steer(1.0, SIM_DT);
        }
        assert!(cannon.fire_ready());
        for _ in 0..1000 {
            cannon.steer(1.0, SIM_DT);
        }
        assert_eq!(cannon.pos.x, CANNON_X_LIMIT);

        cannon.alive = false;
        assert!(!cannon.fire_ready());
        cannon.reset();
        assert_eq!(cannon.pos, CANNON_START);
        assert!(cannon.alive);
    }

    #[test]
    fn test_state_changes_are_recorded_once() {
        let mut state = GameState::new(&LevelInfo::default(), 3, 1);
        state.set_level_state(LevelState::Playing);
        state.set_level_state(LevelState::Playing);
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::StateChanged {
                from: LevelState::GetReady,
                to: LevelState::Playing
            }]
        );
    }
}
