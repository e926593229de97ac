//! Attract-mode driver
//!
//! Produces `FrameInput` from the app state so the whole game can run
//! without a player: it starts games from the menu, plays them, enters
//! initials and finally quits through the credits.

use glam::Vec2;

use crate::app::{App, FrameInput};
use crate::scenes::ActiveScene;
use crate::sim::{GameState, LevelState};

/// Seconds on the menu before pressing a key
const MENU_WAIT: f32 = 2.0;
/// After this long in one game the pilot stops playing and lets it end
const GIVE_UP_AFTER: f32 = 90.0;
/// Dodge shots closer than this (horizontally)
const DODGE_MARGIN: f32 = 12.0;
/// Only shots below this height are a threat
const DODGE_HEIGHT: f32 = 45.0;
const INITIALS: &str = "CPU";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Idle,
    Menu,
    Playing,
    Entry,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    max_games: u32,
    games_started: u32,
    mode: Mode,
    /// Seconds in the current scene
    scene_time: f32,
    frame: u64,
    entry_step: usize,
}

impl Autopilot {
    /// Play `max_games` games, then quit from the menu
    pub fn new(max_games: u32) -> Self {
        Self {
            max_games,
            games_started: 0,
            mode: Mode::Idle,
            scene_time: 0.0,
            frame: 0,
            entry_step: 0,
        }
    }

    pub fn games_started(&self) -> u32 {
        self.games_started
    }

    /// Input for the next frame of `app`
    pub fn input(&mut self, app: &App, dt: f32) -> FrameInput {
        self.frame += 1;
        let mode = match app.active() {
            ActiveScene::MainMenu(_) => Mode::Menu,
            ActiveScene::Game(_) => Mode::Playing,
            ActiveScene::HighScoreEntry(_) => Mode::Entry,
            ActiveScene::Bootstrap(_) | ActiveScene::Credits(_) => Mode::Idle,
        };
        if mode != self.mode {
            if mode == Mode::Playing && self.mode != Mode::Playing {
                self.games_started += 1;
                log::info!("Autopilot starting game {}", self.games_started);
            }
            self.mode = mode;
            self.scene_time = 0.0;
            self.entry_step = 0;
        }
        self.scene_time += dt;

        match app.active() {
            ActiveScene::MainMenu(menu) => self.menu_input(menu.is_quitting()),
            ActiveScene::Game(game) => self.game_input(game.state()),
            ActiveScene::HighScoreEntry(_) => self.entry_input(),
            ActiveScene::Bootstrap(_) | ActiveScene::Credits(_) => FrameInput::default(),
        }
    }

    fn menu_input(&self, quitting: bool) -> FrameInput {
        if quitting || self.scene_time < MENU_WAIT {
            return FrameInput::default();
        }
        if self.games_started < self.max_games {
            FrameInput {
                any_key: true,
                ..Default::default()
            }
        } else {
            FrameInput {
                any_key: true,
                escape: true,
                ..Default::default()
            }
        }
    }

    fn game_input(&self, state: &GameState) -> FrameInput {
        // Tap fire every other frame to get past panels
        let tap = self.frame % 2 == 0;
        if state.level_state != LevelState::Playing || self.scene_time > GIVE_UP_AFTER {
            return FrameInput {
                fire_pressed: tap,
                ..Default::default()
            };
        }

        let cannon = state.cannon.pos;
        let threat = state
            .alien_projectiles
            .active()
            .map(|(_, p)| p.pos)
            .filter(|pos| pos.y < cannon.y + DODGE_HEIGHT)
            .filter(|pos| (pos.x - cannon.x).abs() < DODGE_MARGIN)
            .min_by(|a, b| a.y.total_cmp(&b.y));

        let axis = match threat {
            Some(shot) => {
                // Move away from the shot, towards the middle when it is dead on
                let away = cannon.x - shot.x;
                if away.abs() < 1.0 {
                    -cannon.x.signum()
                } else {
                    away.signum()
                }
            }
            None => steer_towards(cannon, nearest_invader_x(state, cannon)),
        };

        FrameInput {
            axis,
            fire: true,
            fire_pressed: tap,
            ..Default::default()
        }
    }

    fn entry_input(&mut self) -> FrameInput {
        let step = self.entry_step;
        self.entry_step += 1;
        let name_len = crate::scenes::entry::NAME_LENGTH;
        if step < name_len {
            FrameInput {
                backspace: true,
                ..Default::default()
            }
        } else if step == name_len {
            FrameInput {
                text: INITIALS.to_string(),
                ..Default::default()
            }
        } else {
            FrameInput {
                enter: true,
                ..Default::default()
            }
        }
    }
}

/// x of the live invader closest to the cannon's column
fn nearest_invader_x(state: &GameState, cannon: Vec2) -> Option<f32> {
    state
        .wave
        .live_positions()
        .map(|(_, pos)| pos.x)
        .min_by(|a, b| (a - cannon.x).abs().total_cmp(&(b - cannon.x).abs()))
}

fn steer_towards(cannon: Vec2, target: Option<f32>) -> f32 {
    let Some(x) = target else {
        return 0.0;
    };
    ((x - cannon.x) / 4.0).clamp(-1.0, 1.0)
}
