//! Fixed-size projectile pools
//!
//! Projectiles are never allocated during play: each pool is created at
//! level load and slots are reused by a first-inactive scan.

use glam::Vec2;

/// A pooled projectile
#[derive(Debug, Clone, Default)]
pub struct Projectile {
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scales the blast radius when hitting a bunker
    pub size_multiplier: f32,
}

/// Fixed-capacity set of reusable projectiles
#[derive(Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Projectile::default(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of projectiles currently in flight
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    pub fn has_free_slot(&self) -> bool {
        self.slots.iter().any(|p| !p.active)
    }

    /// Launch from the first inactive slot; returns its index
    pub fn fire(&mut self, pos: Vec2, vel: Vec2, size_multiplier: f32) -> Option<usize> {
        let (index, slot) = self.slots.iter_mut().enumerate().find(|(_, p)| !p.active)?;
        slot.active = true;
        slot.pos = pos;
        slot.vel = vel;
        slot.size_multiplier = size_multiplier;
        Some(index)
    }

    /// Return a slot to the pool
    pub fn deactivate(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.active = false;
            slot.vel = Vec2::ZERO;
        }
    }

    pub fn get(&self, index: usize) -> Option<&Projectile> {
        self.slots.get(index)
    }

    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }

    /// Indices and positions of active projectiles
    pub fn active(&self) -> impl Iterator<Item = (usize, &Projectile)> {
        self.slots.iter().enumerate().filter(|(_, p)| p.active)
    }

    /// Move active projectiles by their velocity
    pub fn integrate(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().filter(|p| p.active) {
            slot.pos += slot.vel * dt;
        }
    }

    /// Deactivate projectiles outside `[min_y, max_y]`; returns how many were retired
    pub fn retire_outside(&mut self, min_y: f32, max_y: f32) -> usize {
        let mut retired = 0;
        for slot in self.slots.iter_mut().filter(|p| p.active) {
            if slot.pos.y < min_y || slot.pos.y > max_y {
                slot.active = false;
                slot.vel = Vec2::ZERO;
                retired += 1;
            }
        }
        retired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_uses_first_inactive_slot() {
        let mut pool = ProjectilePool::new(3);
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y, 1.0), Some(0));
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y, 1.0), Some(1));
        pool.deactivate(0);
        assert_eq!(pool.fire(Vec2::ONE, Vec2::Y, 2.0), Some(0));
        assert_eq!(pool.get(0).map(|p| p.size_multiplier), Some(2.0));
        assert_eq!(pool.live_count(), 2);
    }

    #[test]
    fn test_full_pool_refuses_to_fire() {
        let mut pool = ProjectilePool::new(1);
        assert!(pool.fire(Vec2::ZERO, Vec2::Y, 1.0).is_some());
        assert!(!pool.has_free_slot());
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y, 1.0), None);
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_retire_outside_bounds() {
        let mut pool = ProjectilePool::new(2);
        pool.fire(Vec2::new(0.0, -30.0), Vec2::new(0.0, -100.0), 1.0);
        pool.fire(Vec2::new(0.0, 0.0), Vec2::new(0.0, -100.0), 1.0);
        pool.integrate(0.1);
        assert_eq!(pool.retire_outside(-35.0, 140.0), 1);
        assert_eq!(pool.live_count(), 1);
        assert!(!pool.slots()[0].active);
    }
}
