//! Heads-up display model
//!
//! Score lines, remaining-life icons, the get-ready panel and the mystery
//! points label. Rebuilt from the session and level state after every frame.

use crate::consts::MAX_LIFE_ICONS;
use crate::session::Session;
use crate::sim::{GameState, PanelText};

#[derive(Debug, Clone, Default)]
pub struct Hud {
    /// Table leader captured when the level started
    high_name: String,
    high_score: u32,
    score: u32,
    lives: u32,
    panel: PanelText,
    visibility: f32,
    warning: bool,
    popup: Option<String>,
}

impl Hud {
    pub fn new(session: &Session) -> Self {
        let (name, score) = session.high_score();
        Self {
            high_name: name.to_string(),
            high_score: score,
            score: session.score(),
            lives: session.lives(),
            ..Default::default()
        }
    }

    pub fn update(&mut self, session: &Session, state: &GameState) {
        self.score = session.score();
        self.lives = session.lives();
        self.panel = state.panel.clone();
        self.visibility = state.sequence.visibility();
        self.warning = state.warning;
        self.popup = state
            .points_popup
            .as_ref()
            .map(|p| format!("{} Points", p.points));
    }

    pub fn score_line(&self) -> String {
        format!("Current Score : {}", self.score)
    }

    pub fn high_score_line(&self) -> String {
        format!("<High>{} : {}", self.high_name, self.high_score)
    }

    /// Spare lives drawn as cannon icons
    pub fn life_icons(&self) -> usize {
        (self.lives.saturating_sub(1) as usize).min(MAX_LIFE_ICONS)
    }

    /// The player is ahead of the table leader
    pub fn is_beaten(&self) -> bool {
        self.score > self.high_score
    }

    pub fn panel(&self) -> &PanelText {
        &self.panel
    }

    pub fn panel_alpha(&self) -> f32 {
        self.visibility * crate::sim::sequence::PANEL_MAX_ALPHA
    }

    pub fn text_alpha(&self) -> f32 {
        self.visibility
    }

    pub fn warning(&self) -> bool {
        self.warning
    }

    pub fn popup_text(&self) -> Option<&str> {
        self.popup.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_and_beaten() {
        let mut session = Session::default();
        let hud_before = Hud::new(&session);
        assert_eq!(hud_before.score_line(), "Current Score : 0");
        assert_eq!(hud_before.high_score_line(), "<High>GAZ : 180");
        assert!(!hud_before.is_beaten());

        let state = GameState::new(session.level_info(), session.lives(), 1);
        let mut hud = Hud::new(&session);
        session.increase_score(200);
        hud.update(&session, &state);
        assert_eq!(hud.score_line(), "Current Score : 200");
        assert!(hud.is_beaten());
        // Leader is fixed for the level
        assert_eq!(hud.high_score_line(), "<High>GAZ : 180");
    }

    #[test]
    fn test_life_icons_capped() {
        let session = Session::default().with_start_lives(3);
        assert_eq!(Hud::new(&session).life_icons(), 2);

        let session = Session::default().with_start_lives(40);
        assert_eq!(Hud::new(&session).life_icons(), MAX_LIFE_ICONS);

        let mut session = Session::default().with_start_lives(1);
        session.decrement_lives();
        assert_eq!(Hud::new(&session).life_icons(), 0);
    }

    #[test]
    fn test_panel_follows_sequence() {
        let session = Session::default();
        let mut state = GameState::new(session.level_info(), session.lives(), 1);
        let mut hud = Hud::new(&session);
        hud.update(&session, &state);
        assert_eq!(hud.panel().title, session.level_info().name);
        assert_eq!(hud.text_alpha(), 0.0);

        for _ in 0..40 {
            state.sequence.advance(0.02, false);
        }
        hud.update(&session, &state);
        assert_eq!(hud.text_alpha(), 1.0);
        assert!((hud.panel_alpha() - 0.8).abs() < 1e-6);
        assert!(hud.popup_text().is_none());
    }
}
