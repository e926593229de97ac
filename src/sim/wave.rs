//! The invader wave
//!
//! 55 invaders in a 5 x 11 grid moved as one rigid group. Per-column live
//! counts determine how far the wave may travel before reversing: when the
//! outermost columns empty, the bounds widen so the survivors still reach
//! the screen edge.

use glam::Vec2;

use crate::consts::*;
use crate::tuning::LevelInfo;

/// A single regular invader
#[derive(Debug, Clone)]
pub struct Invader {
    pub row: usize,
    pub column: usize,
    /// Position relative to the wave origin
    pub offset: Vec2,
    pub alive: bool,
    /// Points awarded on death
    pub points: u32,
    /// Animation frame toggled on every step
    pub frame: bool,
}

/// Result of a single wave step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Moved horizontally
    Shift,
    /// Reached a bound: reversed direction and dropped
    Drop,
}

/// Horizontal travel bounds for the given column counts.
///
/// Each empty column on the left extends `x_min` by one invader spacing, each
/// empty column on the right extends `x_max` likewise.
pub fn column_bounds(counts: &[u32; WAVE_COLUMNS]) -> (f32, f32) {
    let leading = counts.iter().take_while(|c| **c == 0).count();
    let trailing = counts.iter().rev().take_while(|c| **c == 0).count();
    (
        WAVE_X_MIN - leading as f32 * INVADER_SPACING,
        WAVE_X_MAX + trailing as f32 * INVADER_SPACING,
    )
}

/// The regular invader wave plus its movement and difficulty state
#[derive(Debug, Clone)]
pub struct Wave {
    /// World position of the wave origin
    pub origin: Vec2,
    invaders: Vec<Invader>,
    column_counts: [u32; WAVE_COLUMNS],
    remaining: usize,
    x_min: f32,
    x_max: f32,
    x_step: f32,
    x_step_multiplier: f32,
    y_step: f32,
    move_delay: f32,
    move_delay_decrement: f32,
    low_clamp: f32,
    delay_counter: u32,
}

impl Wave {
    /// Lay out a fresh wave for a level
    pub fn new(level: &LevelInfo) -> Self {
        let mut invaders = Vec::with_capacity(WAVE_ROWS * WAVE_COLUMNS);
        for row in 0..WAVE_ROWS {
            for column in 0..WAVE_COLUMNS {
                invaders.push(Invader {
                    row,
                    column,
                    offset: Vec2::new(
                        WAVE_LEFT_OFFSET + column as f32 * INVADER_SPACING,
                        WAVE_TOP_OFFSET - row as f32 * INVADER_SPACING,
                    ),
                    alive: true,
                    points: ROW_POINTS[row],
                    frame: false,
                });
            }
        }

        Self {
            origin: Vec2::new(WAVE_X_MIN, WAVE_START_Y),
            remaining: invaders.len(),
            invaders,
            column_counts: [WAVE_ROWS as u32; WAVE_COLUMNS],
            x_min: WAVE_X_MIN,
            x_max: WAVE_X_MAX,
            x_step: level.horizontal_start_speed,
            x_step_multiplier: level.horizontal_speed_multiplier,
            y_step: level.vertical_speed,
            move_delay: level.start_move_delay,
            move_delay_decrement: level.move_delay_decrement,
            low_clamp: level.move_delay_low_clamp,
            delay_counter: 0,
        }
    }

    pub fn invaders(&self) -> &[Invader] {
        &self.invaders
    }

    /// World position of invader `index`
    pub fn position_of(&self, index: usize) -> Vec2 {
        self.origin + self.invaders[index].offset
    }

    /// Indices and world positions of live invaders
    pub fn live_positions(&self) -> impl Iterator<Item = (usize, Vec2)> + '_ {
        self.invaders
            .iter()
            .enumerate()
            .filter(|(_, inv)| inv.alive)
            .map(|(i, inv)| (i, self.origin + inv.offset))
    }

    pub fn column_counts(&self) -> &[u32; WAVE_COLUMNS] {
        &self.column_counts
    }

    /// Current (x_min, x_max) travel bounds of the origin
    pub fn bounds(&self) -> (f32, f32) {
        (self.x_min, self.x_max)
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    pub fn x_step(&self) -> f32 {
        self.x_step
    }

    pub fn move_delay(&self) -> f32 {
        self.move_delay
    }

    /// Step delay actually used, clamped to [low_clamp, MOVE_DELAY_HIGH_CLAMP]
    pub fn effective_move_delay(&self) -> f32 {
        self.move_delay
            .max(self.low_clamp)
            .min(MOVE_DELAY_HIGH_CLAMP)
    }

    /// Count one fixed tick; returns true (and resets the counter) when a step is due
    pub fn advance_counter(&mut self) -> bool {
        self.delay_counter += 1;
        if self.delay_counter as f32 >= self.effective_move_delay() {
            self.delay_counter = 0;
            return true;
        }
        false
    }

    /// Move the wave one step and flip every invader's animation frame
    pub fn step(&mut self) -> StepKind {
        let at_right = self.origin.x >= self.x_max && self.x_step > 0.0;
        let at_left = self.origin.x <= self.x_min && self.x_step < 0.0;

        let kind = if at_right || at_left {
            self.x_step = -self.x_step;
            self.origin.y -= self.y_step;
            StepKind::Drop
        } else {
            self.origin.x += self.x_step;
            StepKind::Shift
        };

        for invader in self.invaders.iter_mut().filter(|i| i.alive) {
            invader.frame = !invader.frame;
        }

        kind
    }

    /// Altitude of the lowest live invader
    pub fn lowest_altitude(&self) -> Option<f32> {
        self.live_positions()
            .map(|(_, pos)| pos.y)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Kill invader `index`, ramping difficulty and widening the bounds.
    /// Returns the points earned, or None if it was already dead.
    pub fn kill(&mut self, index: usize) -> Option<u32> {
        let invader = self.invaders.get_mut(index)?;
        if !invader.alive {
            return None;
        }
        invader.alive = false;
        let column = invader.column;
        let points = invader.points;

        self.column_counts[column] = self.column_counts[column].saturating_sub(1);
        self.remaining = self.remaining.saturating_sub(1);

        self.move_delay = (self.move_delay - self.move_delay_decrement).max(self.low_clamp);
        self.x_step *= self.x_step_multiplier;

        let (x_min, x_max) = column_bounds(&self.column_counts);
        self.x_min = self.x_min.min(x_min);
        self.x_max = self.x_max.max(x_max);

        Some(points)
    }

    /// Lowest live invader in `column`
    pub fn lowest_in_column(&self, column: usize) -> Option<usize> {
        (0..WAVE_ROWS)
            .rev()
            .map(|row| row * WAVE_COLUMNS + column)
            .find(|&i| self.invaders.get(i).is_some_and(|inv| inv.alive))
    }

    /// Columns that still hold at least one invader
    pub fn non_empty_columns(&self) -> Vec<usize> {
        (0..WAVE_COLUMNS)
            .filter(|&c| self.column_counts[c] > 0)
            .collect()
    }
}
