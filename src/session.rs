//! Game session shared across scenes
//!
//! Holds the player's score, lives and current level, the level table and
//! the high score table. Scene changes and music changes are requested here
//! and applied by the `App` after the frame.

use std::path::PathBuf;

use crate::consts::START_LIVES;
use crate::highscores::HighScores;
use crate::tuning::{LevelInfo, LevelTable};

/// Scenes the game can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Bootstrap,
    MainMenu,
    Game,
    HighScoreEntry,
    Credits,
    /// Leave the game loop
    Exit,
}

/// Music tracks a frontend can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    GameOver,
    Warning,
    Credits,
}

/// Requested music change, with fade time in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MusicCue {
    Play { track: MusicTrack, fade: f32 },
    Stop { fade: f32 },
}

#[derive(Debug)]
pub struct Session {
    lives: u32,
    score: u32,
    level: usize,
    start_lives: u32,
    levels: LevelTable,
    high_scores: HighScores,
    /// Where the table is saved; None keeps it in memory only
    high_score_path: Option<PathBuf>,
    /// Set while a scene load is pending, blocks duplicate requests
    scene_loading: bool,
    pending_scene: Option<Scene>,
    current_track: Option<MusicTrack>,
    music_cues: Vec<MusicCue>,
}

impl Session {
    pub fn new(levels: LevelTable, high_scores: HighScores, high_score_path: Option<PathBuf>) -> Self {
        Self {
            lives: START_LIVES,
            score: 0,
            level: 0,
            start_lives: START_LIVES,
            levels,
            high_scores,
            high_score_path,
            scene_loading: false,
            pending_scene: None,
            current_track: None,
            music_cues: Vec::new(),
        }
    }

    /// Override the number of lives a new game starts with
    pub fn with_start_lives(mut self, lives: u32) -> Self {
        self.start_lives = lives.max(1);
        self.lives = self.start_lives;
        self
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Tunables of the current level
    pub fn level_info(&self) -> &LevelInfo {
        self.levels.get(self.level)
    }

    pub fn levels(&self) -> &LevelTable {
        &self.levels
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Name and score to beat, shown in-game
    pub fn high_score(&self) -> (&str, u32) {
        self.high_scores.top()
    }

    pub fn increase_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Lose a life; returns the lives left
    pub fn decrement_lives(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    // ---------------------------------------------------------------------
    // Scene flow
    // ---------------------------------------------------------------------

    /// Ask for a scene change at the end of the frame
    pub fn request_scene(&mut self, scene: Scene) {
        log::debug!("Scene requested: {:?}", scene);
        self.pending_scene = Some(scene);
    }

    /// Take the pending scene request
    pub fn take_scene_request(&mut self) -> Option<Scene> {
        self.pending_scene.take()
    }

    pub fn is_scene_loading(&self) -> bool {
        self.scene_loading
    }

    /// Called once a requested scene is live
    pub fn on_scene_loaded(&mut self) {
        self.scene_loading = false;
    }

    /// Reset score, level and lives and load the game scene
    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.level = 0;
        self.lives = self.start_lives;
        self.stop_music(3.0);
        log::info!("Starting new game");
        self.request_scene(Scene::Game);
    }

    /// Advance to the next level and reload the game scene.
    /// Ignored while a scene load is already pending so levels are never skipped.
    pub fn level_complete(&mut self) {
        if self.scene_loading {
            return;
        }
        self.scene_loading = true;
        if self.level < self.levels.last_index() {
            self.level += 1;
        }
        log::info!("Level complete, advancing to level {}", self.level);
        self.request_scene(Scene::Game);
    }

    /// Leave the menu for the closing credits
    pub fn quit_game(&mut self) {
        self.request_scene(Scene::Credits);
    }

    /// End the run: go to name entry if the score made the table, else the menu
    pub fn game_over(&mut self) {
        self.game_over_at(crate::unix_timestamp());
    }

    /// `game_over` with an explicit timestamp for the new entry
    pub fn game_over_at(&mut self, stamp: i64) {
        self.level = 0;
        self.lives = self.start_lives;
        self.play_music(MusicTrack::Menu, 3.0);

        match self.high_scores.insert_pending(self.score, stamp) {
            Some(rank) => {
                log::info!("Score {} placed #{} in the high score table", self.score, rank + 1);
                self.request_scene(Scene::HighScoreEntry);
            }
            None => {
                log::info!("Game over with {} points", self.score);
                self.request_scene(Scene::MainMenu);
            }
        }
    }

    /// Name the pending high score entry, save the table and return to the menu
    pub fn set_player_name(&mut self, name: &str) {
        if !self.high_scores.set_player_name(name) {
            log::warn!("No pending high score entry for {}", name);
        }
        self.save_high_scores();
        self.request_scene(Scene::MainMenu);
    }

    pub fn save_high_scores(&mut self) {
        let Some(path) = self.high_score_path.clone() else {
            return;
        };
        if let Err(err) = self.high_scores.save(&path) {
            log::error!("Failed to save high scores: {}", err);
        }
    }

    // ---------------------------------------------------------------------
    // Music
    // ---------------------------------------------------------------------

    /// Fade in `track`; ignored if it is already playing
    pub fn play_music(&mut self, track: MusicTrack, fade: f32) {
        if self.current_track == Some(track) {
            return;
        }
        self.current_track = Some(track);
        self.music_cues.push(MusicCue::Play { track, fade });
    }

    /// Fade out whatever is playing
    pub fn stop_music(&mut self, fade: f32) {
        if self.current_track.take().is_some() {
            self.music_cues.push(MusicCue::Stop { fade });
        }
    }

    pub fn current_track(&self) -> Option<MusicTrack> {
        self.current_track
    }

    /// Music changes requested since the last drain
    pub fn drain_music_cues(&mut self) -> Vec<MusicCue> {
        std::mem::take(&mut self.music_cues)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LevelTable::default(), HighScores::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_resets_state() {
        let mut session = Session::default();
        session.increase_score(500);
        session.decrement_lives();
        session.start_new_game();
        assert_eq!(session.score(), 0);
        assert_eq!(session.lives(), START_LIVES);
        assert_eq!(session.level(), 0);
        assert_eq!(session.take_scene_request(), Some(Scene::Game));
    }

    #[test]
    fn test_level_complete_is_guarded_until_loaded() {
        let mut session = Session::default();
        session.level_complete();
        session.level_complete();
        assert_eq!(session.level(), 1);
        assert!(session.is_scene_loading());
        assert_eq!(session.take_scene_request(), Some(Scene::Game));

        session.on_scene_loaded();
        session.level_complete();
        assert_eq!(session.level(), 2);
    }

    #[test]
    fn test_level_caps_at_last() {
        let mut session = Session::default();
        for _ in 0..50 {
            session.level_complete();
            session.on_scene_loaded();
        }
        assert_eq!(session.level(), session.levels().last_index());
    }

    #[test]
    fn test_lives_never_go_negative() {
        let mut session = Session::default();
        assert_eq!(session.decrement_lives(), 2);
        assert_eq!(session.decrement_lives(), 1);
        assert_eq!(session.decrement_lives(), 0);
        assert_eq!(session.decrement_lives(), 0);
    }

    #[test]
    fn test_game_over_with_qualifying_score() {
        let mut session = Session::default();
        session.increase_score(1000);
        session.game_over_at(77);
        assert_eq!(session.take_scene_request(), Some(Scene::HighScoreEntry));
        assert_eq!(session.high_scores().pending_position(), Some(0));
        assert_eq!(session.lives(), START_LIVES);

        session.set_player_name("ACE");
        assert_eq!(session.high_score(), ("ACE", 1000));
        assert_eq!(session.take_scene_request(), Some(Scene::MainMenu));
    }

    #[test]
    fn test_game_over_with_low_score_returns_to_menu() {
        let mut session = Session::default();
        session.increase_score(10);
        session.game_over_at(1);
        assert_eq!(session.take_scene_request(), Some(Scene::MainMenu));
        assert_eq!(session.high_scores().pending_position(), None);
    }

    #[test]
    fn test_set_player_name_persists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("HighScores");
        let mut session = Session::new(
            LevelTable::default(),
            HighScores::defaults(0),
            Some(path.clone()),
        );
        session.increase_score(300);
        session.game_over_at(5);
        session.set_player_name("JOY");

        let saved = HighScores::load(&path).expect("saved table");
        assert_eq!(saved.top(), ("JOY", 300));
    }

    #[test]
    fn test_music_cues_skip_repeats() {
        let mut session = Session::default();
        session.play_music(MusicTrack::Warning, 1.0);
        session.play_music(MusicTrack::Warning, 1.0);
        session.stop_music(1.0);
        session.stop_music(1.0);
        assert_eq!(
            session.drain_music_cues(),
            vec![
                MusicCue::Play {
                    track: MusicTrack::Warning,
                    fade: 1.0
                },
                MusicCue::Stop { fade: 1.0 },
            ]
        );
        assert!(session.drain_music_cues().is_empty());
    }
}
