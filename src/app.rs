//! Scene router
//!
//! Owns the session and the active scene. Each frame advances the scene,
//! then applies any scene change the session asked for.

use crate::highscores::HighScores;
use crate::scenes::{
    ActiveScene, BootstrapScene, CreditsScene, EntryScene, GameScene, MenuScene,
};
use crate::session::{MusicCue, Scene, Session};
use crate::settings::Settings;

pub use crate::scenes::FrameInput;

pub struct App {
    settings: Settings,
    session: Session,
    active: ActiveScene,
    running: bool,
}

impl App {
    /// Load levels and high scores and start on the logo sequence
    pub fn new(settings: Settings) -> Self {
        let levels = settings.level_table();
        let path = settings.high_score_path();
        let high_scores = HighScores::load_or_create(&path, crate::unix_timestamp());
        let session =
            Session::new(levels, high_scores, Some(path)).with_start_lives(settings.start_lives);
        Self::with_session(settings, session, Scene::Bootstrap)
    }

    /// Start from `start` with an existing session
    pub fn with_session(settings: Settings, mut session: Session, start: Scene) -> Self {
        let active = load_scene(start, &settings, &mut session);
        let running = active.is_some();
        let active = active.unwrap_or_else(|| ActiveScene::Bootstrap(BootstrapScene::new()));
        Self {
            settings,
            session,
            active,
            running,
        }
    }

    /// Advance one frame; returns false once the game has exited
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> bool {
        if !self.running {
            return false;
        }

        self.active.frame(&mut self.session, input, dt);

        if let Some(next) = self.session.take_scene_request() {
            log::info!("Scene {:?} -> {:?}", self.active.scene(), next);
            match load_scene(next, &self.settings, &mut self.session) {
                Some(scene) => {
                    self.active = scene;
                    self.session.on_scene_loaded();
                }
                None => {
                    log::info!("Exiting");
                    self.running = false;
                }
            }
        }

        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scene(&self) -> Scene {
        self.active.scene()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn active(&self) -> &ActiveScene {
        &self.active
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Music changes for the audio frontend
    pub fn drain_music_cues(&mut self) -> Vec<MusicCue> {
        self.session.drain_music_cues()
    }
}

/// Build the scene for `scene`; None for `Scene::Exit`
fn load_scene(scene: Scene, settings: &Settings, session: &mut Session) -> Option<ActiveScene> {
    let active = match scene {
        Scene::Bootstrap => ActiveScene::Bootstrap(BootstrapScene::new()),
        Scene::MainMenu => ActiveScene::MainMenu(MenuScene::new(session)),
        Scene::Game => {
            let seed = settings
                .seed
                .map(|seed| seed.wrapping_add(session.level() as u64))
                .unwrap_or_else(rand::random);
            ActiveScene::Game(Box::new(GameScene::new(
                session,
                seed,
                settings.fixed_dt(),
                settings.max_substeps,
            )))
        }
        Scene::HighScoreEntry => ActiveScene::HighScoreEntry(EntryScene::new()),
        Scene::Credits => ActiveScene::Credits(CreditsScene::new(session)),
        Scene::Exit => return None,
    };
    Some(active)
}
