//! Sol Invaders entry point
//!
//! Runs the game headlessly in attract mode: the autopilot plays a few games
//! from the menu, then quits through the credits. Music cues and the final
//! high score table are logged.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use sol_invaders::autopilot::Autopilot;
    use sol_invaders::{App, Settings};

    /// Frame time of the headless loop
    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Hard stop for the attract loop (one hour of game time)
    const MAX_FRAMES: u64 = 60 * 60 * 60;
    const ATTRACT_GAMES: u32 = 2;

    pub fn run() {
        let settings_path = std::env::args()
            .nth(1)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Settings::FILE_NAME));
        let settings = Settings::load_or_default(&settings_path);

        let mut app = App::new(settings);
        let mut pilot = Autopilot::new(ATTRACT_GAMES);

        let mut frames = 0;
        while frames < MAX_FRAMES {
            let input = pilot.input(&app, FRAME_DT);
            let running = app.frame(&input, FRAME_DT);
            for cue in app.drain_music_cues() {
                log::debug!("Music: {:?}", cue);
            }
            if !running {
                break;
            }
            frames += 1;
        }

        if app.is_running() {
            log::warn!("Attract loop stopped after {} frames", frames);
        }

        println!("High scores:");
        for (rank, entry) in app.session().high_scores().entries().iter().enumerate() {
            println!("{:>2}. {:<3} {:>6}", rank + 1, entry.name, entry.score);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sol Invaders (native) starting...");
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The game has no web frontend
}
