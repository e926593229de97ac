//! Opening logo sequence
//!
//! The logo slides into place while fading in, the title text fades in and
//! holds, then menu music starts and the screen fades to the main menu.

use crate::session::{MusicTrack, Scene, Session};
use crate::timer::{Countdown, Fade, smoothstep};

pub const LOGO_FADE_IN: f32 = 3.0;
/// The logo interpolator starts below zero so the slide begins late
pub const LOGO_START: f32 = -3.0;
pub const LOGO_SPEED: f32 = 0.5;
pub const TEXT_FADE_IN: f32 = 5.0;
pub const TEXT_HOLD: f32 = 1.0;
pub const FADE_OUT: f32 = 2.0;
pub const MENU_MUSIC_FADE: f32 = 6.0;

// "presents" caption: fade in, hold, fade out
const PRESENTS_IN: f32 = 3.0;
const PRESENTS_HOLD: f32 = 1.0;
const PRESENTS_OUT: f32 = 3.5;

#[derive(Debug, Clone)]
enum Phase {
    Logo,
    Text(Fade),
    Hold(Countdown),
    FadeOut(Fade),
    Done,
}

#[derive(Debug, Clone)]
pub struct BootstrapScene {
    phase: Phase,
    elapsed: f32,
    interpolator: f32,
}

impl Default for BootstrapScene {
    fn default() -> Self {
        Self::new()
    }
}

impl BootstrapScene {
    pub fn new() -> Self {
        Self {
            phase: Phase::Logo,
            elapsed: 0.0,
            interpolator: LOGO_START,
        }
    }

    pub fn frame(&mut self, session: &mut Session, dt: f32) {
        self.elapsed += dt;
        if self.interpolator < 1.0 {
            self.interpolator += LOGO_SPEED * dt;
        }

        match &mut self.phase {
            Phase::Logo => {
                if self.interpolator >= 1.0 {
                    self.phase = Phase::Text(Fade::fade_in(TEXT_FADE_IN));
                }
            }
            Phase::Text(fade) => {
                fade.advance(dt);
                if fade.is_finished() {
                    self.phase = Phase::Hold(Countdown::new(TEXT_HOLD));
                }
            }
            Phase::Hold(countdown) => {
                if countdown.tick(dt) {
                    session.play_music(MusicTrack::Menu, MENU_MUSIC_FADE);
                    self.phase = Phase::FadeOut(Fade::fade_out(FADE_OUT));
                }
            }
            Phase::FadeOut(fade) => {
                fade.advance(dt);
                if fade.is_finished() {
                    self.phase = Phase::Done;
                    session.request_scene(Scene::MainMenu);
                }
            }
            Phase::Done => {}
        }
    }

    /// Logo slide progress along its eased path
    pub fn logo_progress(&self) -> f32 {
        smoothstep(self.interpolator)
    }

    pub fn logo_alpha(&self) -> f32 {
        (self.elapsed / LOGO_FADE_IN).clamp(0.0, 1.0)
    }

    pub fn presents_alpha(&self) -> f32 {
        let t = self.elapsed;
        if t < PRESENTS_IN {
            t / PRESENTS_IN
        } else if t < PRESENTS_IN + PRESENTS_HOLD {
            1.0
        } else {
            (1.0 - (t - PRESENTS_IN - PRESENTS_HOLD) / PRESENTS_OUT).max(0.0)
        }
    }

    pub fn text_alpha(&self) -> f32 {
        match &self.phase {
            Phase::Logo => 0.0,
            Phase::Text(fade) => fade.alpha(),
            _ => 1.0,
        }
    }

    pub fn overlay_alpha(&self) -> f32 {
        match &self.phase {
            Phase::FadeOut(fade) => 1.0 - fade.alpha(),
            Phase::Done => 1.0,
            _ => 0.0,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.phase, Phase::Done)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MusicCue;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_runs_through_to_main_menu() {
        let mut session = Session::default();
        let mut scene = BootstrapScene::new();
        let mut frames = 0;
        while !scene.is_done() {
            scene.frame(&mut session, FRAME);
            frames += 1;
            assert!(frames < 60 * 60, "bootstrap never finished");
        }

        // 8s slide + 5s text + 1s hold + 2s fade
        let seconds = frames as f32 * FRAME;
        assert!((15.5..17.0).contains(&seconds), "took {seconds}s");
        assert_eq!(session.take_scene_request(), Some(Scene::MainMenu));
        assert_eq!(
            session.drain_music_cues(),
            vec![MusicCue::Play {
                track: MusicTrack::Menu,
                fade: MENU_MUSIC_FADE
            }]
        );
        assert_eq!(scene.overlay_alpha(), 1.0);
    }

    #[test]
    fn test_alphas_follow_timeline() {
        let mut session = Session::default();
        let mut scene = BootstrapScene::new();
        assert_eq!(scene.logo_alpha(), 0.0);
        assert_eq!(scene.logo_progress(), 0.0);

        for _ in 0..(60 * 3) {
            scene.frame(&mut session, FRAME);
        }
        assert!(scene.logo_alpha() > 0.99);
        assert!(scene.presents_alpha() > 0.99);
        assert_eq!(scene.text_alpha(), 0.0);

        for _ in 0..(60 * 6) {
            scene.frame(&mut session, FRAME);
        }
        assert_eq!(scene.presents_alpha(), 0.0);
        assert_eq!(scene.logo_progress(), 1.0);
        assert!(scene.text_alpha() > 0.0);
        assert!(session.take_scene_request().is_none());
    }
}
