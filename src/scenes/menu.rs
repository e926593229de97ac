//! Main menu
//!
//! Alternates between the title screen and the high score table. Any key
//! starts a new game; Escape fades out and rolls the credits.

use super::FrameInput;
use crate::highscores::MAX_HIGH_SCORES;
use crate::session::Session;
use crate::timer::{Countdown, Fade};

/// Keys are ignored for this long after the menu appears
pub const INPUT_GRACE: f32 = 1.0;
pub const MENU_FADE_IN: f32 = 1.5;
/// Length of the title screen's invader parade
pub const TITLE_SCREEN_TIME: f32 = 11.0;
pub const HIGH_SCORE_SCREEN_TIME: f32 = 6.0;
pub const QUIT_FADE: f32 = 2.0;
pub const QUIT_DELAY: f32 = 2.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Title,
    HighScores,
}

impl MenuScreen {
    fn duration(self) -> f32 {
        match self {
            MenuScreen::Title => TITLE_SCREEN_TIME,
            MenuScreen::HighScores => HIGH_SCORE_SCREEN_TIME,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MenuScene {
    screen: MenuScreen,
    screen_timer: f32,
    elapsed: f32,
    fade: Fade,
    quit: Option<Countdown>,
    rows: Vec<(String, u32)>,
}

impl MenuScene {
    pub fn new(session: &Session) -> Self {
        Self {
            screen: MenuScreen::Title,
            screen_timer: 0.0,
            elapsed: 0.0,
            fade: Fade::fade_in(MENU_FADE_IN),
            quit: None,
            rows: high_score_rows(session),
        }
    }

    pub fn frame(&mut self, session: &mut Session, input: &FrameInput, dt: f32) {
        self.fade.advance(dt);

        if let Some(countdown) = &mut self.quit {
            if countdown.tick(dt) {
                session.quit_game();
            }
            return;
        }

        self.elapsed += dt;
        self.screen_timer += dt;
        if self.screen_timer > self.screen.duration() {
            self.next_screen(session);
        }

        if self.elapsed < INPUT_GRACE {
            return;
        }

        if input.escape {
            log::info!("Leaving main menu");
            session.stop_music(QUIT_FADE);
            self.fade = Fade::fade_out(QUIT_FADE);
            self.quit = Some(Countdown::new(QUIT_DELAY));
        } else if input.any_key {
            session.start_new_game();
        }
    }

    /// Flip between the title and the high score table
    pub fn next_screen(&mut self, session: &Session) {
        self.screen = match self.screen {
            MenuScreen::Title => MenuScreen::HighScores,
            MenuScreen::HighScores => MenuScreen::Title,
        };
        self.screen_timer = 0.0;
        if self.screen == MenuScreen::HighScores {
            self.rows = high_score_rows(session);
        }
    }

    pub fn screen(&self) -> MenuScreen {
        self.screen
    }

    /// Name and score rows of the high score screen
    pub fn high_score_rows(&self) -> &[(String, u32)] {
        &self.rows
    }

    pub fn is_quitting(&self) -> bool {
        self.quit.is_some()
    }

    pub fn overlay_alpha(&self) -> f32 {
        1.0 - self.fade.alpha()
    }
}

fn high_score_rows(session: &Session) -> Vec<(String, u32)> {
    session
        .high_scores()
        .entries()
        .iter()
        .take(MAX_HIGH_SCORES)
        .map(|e| (e.name.clone(), e.score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MusicTrack, Scene};

    const FRAME: f32 = 1.0 / 60.0;

    fn key() -> FrameInput {
        FrameInput {
            any_key: true,
            ..Default::default()
        }
    }

    fn escape() -> FrameInput {
        FrameInput {
            any_key: true,
            escape: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_keys_ignored_during_grace() {
        let mut session = Session::default();
        let mut menu = MenuScene::new(&session);
        for _ in 0..50 {
            menu.frame(&mut session, &key(), FRAME);
        }
        assert!(session.take_scene_request().is_none());

        for _ in 0..20 {
            menu.frame(&mut session, &key(), FRAME);
        }
        assert_eq!(session.take_scene_request(), Some(Scene::Game));
    }

    #[test]
    fn test_escape_quits_after_delay() {
        let mut session = Session::default();
        session.play_music(MusicTrack::Menu, 1.0);
        session.drain_music_cues();
        let mut menu = MenuScene::new(&session);
        for _ in 0..70 {
            menu.frame(&mut session, &FrameInput::default(), FRAME);
        }
        menu.frame(&mut session, &escape(), FRAME);
        assert!(menu.is_quitting());
        assert_eq!(session.current_track(), None);

        // Further keys do nothing while fading out
        for _ in 0..120 {
            menu.frame(&mut session, &key(), FRAME);
        }
        assert!(session.take_scene_request().is_none());
        for _ in 0..20 {
            menu.frame(&mut session, &FrameInput::default(), FRAME);
        }
        assert_eq!(session.take_scene_request(), Some(Scene::Credits));
        assert!(menu.overlay_alpha() > 0.99);
    }

    #[test]
    fn test_screens_alternate() {
        let mut session = Session::default();
        let mut menu = MenuScene::new(&session);
        assert_eq!(menu.screen(), MenuScreen::Title);
        assert_eq!(menu.high_score_rows().len(), MAX_HIGH_SCORES);

        let idle = FrameInput::default();
        for _ in 0..(60 * 12) {
            menu.frame(&mut session, &idle, FRAME);
        }
        assert_eq!(menu.screen(), MenuScreen::HighScores);
        assert_eq!(menu.high_score_rows()[0], ("GAZ".to_string(), 180));

        for _ in 0..(60 * 7) {
            menu.frame(&mut session, &idle, FRAME);
        }
        assert_eq!(menu.screen(), MenuScreen::Title);
    }
}
