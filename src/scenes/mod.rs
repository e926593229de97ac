//! Scene coordinators
//!
//! Each scene is a small state machine advanced once per frame. Scenes never
//! switch themselves; they ask the `Session` and the `App` applies the
//! request after the frame.

pub mod bootstrap;
pub mod credits;
pub mod entry;
pub mod game;
pub mod hud;
pub mod menu;

pub use bootstrap::BootstrapScene;
pub use credits::{CreditsScene, Waypoint, WaypointAnimator};
pub use entry::EntryScene;
pub use game::GameScene;
pub use hud::Hud;
pub use menu::{MenuScene, MenuScreen};

use crate::session::{Scene, Session};

/// Input gathered by the frontend for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Horizontal axis in [-1, 1]
    pub axis: f32,
    /// Fire button held
    pub fire: bool,
    /// Fire button went down this frame
    pub fire_pressed: bool,
    /// Pause toggle
    pub pause: bool,
    /// Any key went down this frame
    pub any_key: bool,
    /// Escape went down this frame
    pub escape: bool,
    /// Text typed this frame
    pub text: String,
    pub backspace: bool,
    pub enter: bool,
}

/// The scene currently being driven
#[derive(Debug)]
pub enum ActiveScene {
    Bootstrap(BootstrapScene),
    MainMenu(MenuScene),
    Game(Box<GameScene>),
    HighScoreEntry(EntryScene),
    Credits(CreditsScene),
}

impl ActiveScene {
    pub fn scene(&self) -> Scene {
        match self {
            ActiveScene::Bootstrap(_) => Scene::Bootstrap,
            ActiveScene::MainMenu(_) => Scene::MainMenu,
            ActiveScene::Game(_) => Scene::Game,
            ActiveScene::HighScoreEntry(_) => Scene::HighScoreEntry,
            ActiveScene::Credits(_) => Scene::Credits,
        }
    }

    /// Advance the scene by one frame
    pub fn frame(&mut self, session: &mut Session, input: &FrameInput, dt: f32) {
        match self {
            ActiveScene::Bootstrap(scene) => scene.frame(session, dt),
            ActiveScene::MainMenu(scene) => scene.frame(session, input, dt),
            ActiveScene::Game(scene) => scene.frame(session, input, dt),
            ActiveScene::HighScoreEntry(scene) => scene.frame(session, input),
            ActiveScene::Credits(scene) => scene.frame(session, input, dt),
        }
    }

    /// Alpha of the black full-screen overlay (0 = fully visible scene)
    pub fn overlay_alpha(&self) -> f32 {
        match self {
            ActiveScene::Bootstrap(scene) => scene.overlay_alpha(),
            ActiveScene::MainMenu(scene) => scene.overlay_alpha(),
            ActiveScene::Credits(scene) => scene.overlay_alpha(),
            ActiveScene::Game(_) | ActiveScene::HighScoreEntry(_) => 0.0,
        }
    }

    pub fn game(&self) -> Option<&GameScene> {
        match self {
            ActiveScene::Game(scene) => Some(&**scene),
            _ => None,
        }
    }

    pub fn entry(&self) -> Option<&EntryScene> {
        match self {
            ActiveScene::HighScoreEntry(scene) => Some(scene),
            _ => None,
        }
    }

    pub fn menu(&self) -> Option<&MenuScene> {
        match self {
            ActiveScene::MainMenu(scene) => Some(scene),
            _ => None,
        }
    }
}
