//! End-to-end scene flow through the public API

use sol_invaders::autopilot::Autopilot;
use sol_invaders::highscores::MAX_HIGH_SCORES;
use sol_invaders::{App, FrameInput, HighScores, MusicCue, MusicTrack, Scene, Settings};

const FRAME: f32 = 1.0 / 60.0;

fn settings_in(dir: &std::path::Path) -> Settings {
    Settings {
        data_dir: dir.to_path_buf(),
        seed: Some(5),
        ..Default::default()
    }
}

#[test]
fn attract_run_reaches_exit_and_keeps_table() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    let path = settings.high_score_path();

    let mut app = App::new(settings);
    assert_eq!(app.scene(), Scene::Bootstrap);
    // A fresh table is written on first start
    assert!(path.exists());

    let mut pilot = Autopilot::new(2);
    let mut cues = Vec::new();
    let mut scenes = vec![app.scene()];
    let mut frames = 0u64;
    loop {
        let input = pilot.input(&app, FRAME);
        let running = app.frame(&input, FRAME);
        cues.extend(app.drain_music_cues());
        if scenes.last() != Some(&app.scene()) {
            scenes.push(app.scene());
        }
        if !running {
            break;
        }
        frames += 1;
        assert!(frames < 60 * 60 * 40, "attract run never exited");
    }

    assert_eq!(pilot.games_started(), 2);
    assert_eq!(scenes.first(), Some(&Scene::Bootstrap));
    assert_eq!(scenes.last(), Some(&Scene::Credits));
    assert!(scenes.contains(&Scene::Game));
    assert!(cues.contains(&MusicCue::Play {
        track: MusicTrack::Credits,
        fade: 1.0
    }));

    let table = HighScores::load(&path).expect("table readable");
    assert_eq!(table.len(), MAX_HIGH_SCORES);
    let scores: Vec<u32> = table.entries().iter().map(|e| e.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn corrupt_table_is_regenerated() {
    let dir = tempfile::tempdir().expect("tempdir");
    let settings = settings_in(dir.path());
    let path = settings.high_score_path();
    std::fs::write(&path, b"not a high score file").expect("write");

    let app = App::new(settings);
    assert_eq!(app.session().high_score(), ("GAZ", 180));
    let table = HighScores::load(&path).expect("regenerated");
    assert_eq!(table.top(), ("GAZ", 180));
}

#[test]
fn new_game_from_menu_uses_first_level() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut app = App::new(settings_in(dir.path()));

    let idle = FrameInput::default();
    let mut frames = 0;
    while app.scene() != Scene::MainMenu {
        app.frame(&idle, FRAME);
        frames += 1;
        assert!(frames < 60 * 30, "bootstrap never finished");
    }
    for _ in 0..90 {
        app.frame(&idle, FRAME);
    }

    let key = FrameInput {
        any_key: true,
        ..Default::default()
    };
    app.frame(&key, FRAME);
    assert_eq!(app.scene(), Scene::Game);
    assert_eq!(app.session().level(), 0);

    let game = app.active().game().expect("game scene");
    assert_eq!(game.state().level_name, app.session().level_info().name);
    assert_eq!(game.hud().high_score_line(), "<High>GAZ : 180");
}
