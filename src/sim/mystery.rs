//! Mystery invader: a bonus target crossing the top of the screen
//!
//! Spawning is gated by a minimum elapsed time plus a percent roll made on
//! each wave step. Points depend on how close to the screen centre it was
//! when hit.

use glam::Vec2;

use crate::consts::*;

/// Points for hitting the mystery invader at horizontal position `x`.
///
/// 100 at the centre, falling by 1 per 2 units of distance down to 40;
/// anything above 91 snaps to 100.
pub fn mystery_points(x: f32) -> u32 {
    let points = 100.0 - (x.abs() / 2.0).clamp(0.0, 60.0);
    if points > 91.0 { 100 } else { points as u32 }
}

#[derive(Debug, Clone)]
pub struct MysteryInvader {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds since the last spawn (or level start)
    spawn_timer: f32,
}

impl Default for MysteryInvader {
    fn default() -> Self {
        Self::new()
    }
}

impl MysteryInvader {
    pub fn new() -> Self {
        Self {
            active: false,
            pos: MYSTERY_START,
            vel: Vec2::ZERO,
            spawn_timer: 0.0,
        }
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    /// Accumulate play time toward the spawn gate
    pub fn accumulate(&mut self, dt: f32) {
        self.spawn_timer += dt;
    }

    /// Whether an inactive mystery invader should appear, given a roll in 0..100
    pub fn should_spawn(&self, roll: u32, chance: u32) -> bool {
        !self.active && self.spawn_timer > MYSTERY_SPAWN_GATE && roll < chance
    }

    /// Start a crossing from the left edge
    pub fn spawn(&mut self) {
        self.spawn_timer = 0.0;
        self.active = true;
        self.pos = MYSTERY_START;
        self.vel = Vec2::new(MYSTERY_SPEED, 0.0);
    }

    /// Remove from play (hit, crossed the screen, or the player died)
    pub fn despawn(&mut self) {
        self.active = false;
        self.vel = Vec2::ZERO;
    }

    /// Move while active; returns true if it just left the field
    pub fn integrate(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.pos += self.vel * dt;
        if self.pos.x >= MYSTERY_EXIT_X {
            self.despawn();
            return true;
        }
        false
    }
}
