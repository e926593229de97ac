//! Overlap tests and bunker damage
//!
//! Every hitbox in the game is an axis-aligned box; bunkers are grids of
//! small bricks that are knocked out individually and in blast circles.

use glam::Vec2;

use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x <= reach.x && delta.y <= reach.y
    }
}

/// Hitbox of a projectile at `pos`
pub fn projectile_box(pos: Vec2) -> Aabb {
    Aabb::new(pos, PROJECTILE_HALF_EXTENTS)
}

/// A destructible bunker brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub center: Vec2,
    pub alive: bool,
}

impl Brick {
    pub fn hitbox(&self) -> Aabb {
        Aabb::new(self.center, Vec2::splat(BRICK_SIZE / 2.0))
    }
}

/// A bunker made of bricks
#[derive(Debug, Clone)]
pub struct Bunker {
    pub bricks: Vec<Brick>,
}

impl Bunker {
    /// Build a full bunker whose bottom edge is centred on (`center_x`, `base_y`)
    pub fn new(center_x: f32, base_y: f32) -> Self {
        let width = BUNKER_BRICK_COLUMNS as f32 * BRICK_SIZE;
        let left = center_x - width / 2.0 + BRICK_SIZE / 2.0;
        let mut bricks = Vec::with_capacity(BUNKER_BRICK_COLUMNS * BUNKER_BRICK_ROWS);
        for row in 0..BUNKER_BRICK_ROWS {
            for col in 0..BUNKER_BRICK_COLUMNS {
                bricks.push(Brick {
                    center: Vec2::new(
                        left + col as f32 * BRICK_SIZE,
                        base_y + BRICK_SIZE / 2.0 + row as f32 * BRICK_SIZE,
                    ),
                    alive: true,
                });
            }
        }
        Self { bricks }
    }

    /// The standard row of four bunkers
    pub fn standard_row() -> Vec<Bunker> {
        BUNKER_CENTERS_X
            .iter()
            .map(|&x| Bunker::new(x, BUNKER_BASE_Y))
            .collect()
    }

    pub fn live_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// First live brick overlapping `hitbox`
    pub fn hit_test(&self, hitbox: &Aabb) -> Option<usize> {
        self.bricks
            .iter()
            .position(|b| b.alive && b.hitbox().overlaps(hitbox))
    }

    /// Destroy every live brick whose centre lies within `radius` of `point`;
    /// returns how many were destroyed
    pub fn blast(&mut self, point: Vec2, radius: f32) -> usize {
        let mut destroyed = 0;
        for brick in self.bricks.iter_mut().filter(|b| b.alive) {
            if brick.center.distance(point) <= radius {
                brick.alive = false;
                destroyed += 1;
            }
        }
        destroyed
    }
}

/// A projectile striking a bunker brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BunkerStrike {
    pub bunker: usize,
    pub brick: usize,
}

/// Find the first brick in any bunker hit by `hitbox`
pub fn strike_bunkers(bunkers: &[Bunker], hitbox: &Aabb) -> Option<BunkerStrike> {
    bunkers.iter().enumerate().find_map(|(bunker, b)| {
        b.hit_test(hitbox)
            .map(|brick| BunkerStrike { bunker, brick })
    })
}
