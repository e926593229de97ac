//! End credits
//!
//! The camera flies a fixed loop of waypoints over the credits text. When it
//! reaches the last waypoint the starfield turns on and the scene fades out
//! and exits. Any key cuts the credits short.

use glam::Vec3;

use super::FrameInput;
use crate::session::{MusicTrack, Scene, Session};
use crate::timer::{Countdown, Fade, smoothstep};

pub const CREDITS_FADE_IN: f32 = 2.5;
pub const CREDITS_MUSIC_FADE: f32 = 1.0;
/// Seconds the camera rests at each waypoint
pub const WAYPOINT_STAY: f32 = 1.5;

// Reaching the last waypoint
const FINALE_FADE_DELAY: f32 = 6.0;
const FINALE_FADE: f32 = 1.0;
const FINALE_MUSIC_FADE: f32 = 7.0;
const FINALE_EXIT: f32 = 7.5;

// Skipping with a key press
const SKIP_FADE: f32 = 2.0;
const SKIP_EXIT: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoint {
    pub position: Vec3,
    /// Interpolator units per second on the way to this waypoint
    pub move_speed: f32,
}

impl Waypoint {
    pub const fn new(position: Vec3, move_speed: f32) -> Self {
        Self {
            position,
            move_speed,
        }
    }
}

/// Eased movement through a closed loop of waypoints
#[derive(Debug, Clone)]
pub struct WaypointAnimator {
    waypoints: Vec<Waypoint>,
    stay: f32,
    current: usize,
    source: Vec3,
    target: Vec3,
    interpolator: f32,
}

impl WaypointAnimator {
    /// Start at `start` heading for the first waypoint
    pub fn new(start: Vec3, waypoints: Vec<Waypoint>, stay: f32) -> Self {
        let target = waypoints.first().map_or(start, |w| w.position);
        Self {
            waypoints,
            stay,
            current: 0,
            source: start,
            target,
            interpolator: 0.0,
        }
    }

    /// Advance by `dt`; returns the index of the waypoint now targeted when
    /// the animator moves on
    pub fn update(&mut self, dt: f32) -> Option<usize> {
        let waypoint = self.waypoints.get(self.current)?;

        // Travel at the waypoint's speed, then rest in real time
        if self.interpolator <= 1.0 {
            self.interpolator += waypoint.move_speed * dt;
        } else {
            self.interpolator += dt;
        }

        if self.interpolator < self.stay + 1.0 {
            return None;
        }

        self.current = (self.current + 1) % self.waypoints.len();
        self.source = self.target;
        self.target = self.waypoints[self.current].position;
        self.interpolator = 0.0;
        Some(self.current)
    }

    pub fn position(&self) -> Vec3 {
        self.source.lerp(self.target, smoothstep(self.interpolator))
    }

    /// Index of the waypoint being approached
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn last_index(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }
}

/// Camera path over the credits text
pub fn default_waypoints() -> Vec<Waypoint> {
    vec![
        Waypoint::new(Vec3::new(0.0, 20.0, -60.0), 0.4),
        Waypoint::new(Vec3::new(-40.0, 10.0, -20.0), 0.3),
        Waypoint::new(Vec3::new(40.0, 10.0, -20.0), 0.25),
        Waypoint::new(Vec3::new(0.0, 60.0, 0.0), 0.3),
        Waypoint::new(Vec3::new(0.0, 120.0, -100.0), 0.2),
    ]
}

const CAMERA_START: Vec3 = Vec3::new(0.0, 0.0, -120.0);

#[derive(Debug, Clone)]
pub struct CreditsScene {
    camera: WaypointAnimator,
    fade: Fade,
    exit: Option<Countdown>,
    starfield: bool,
}

impl CreditsScene {
    pub fn new(session: &mut Session) -> Self {
        Self::with_waypoints(session, default_waypoints())
    }

    pub fn with_waypoints(session: &mut Session, waypoints: Vec<Waypoint>) -> Self {
        session.play_music(MusicTrack::Credits, CREDITS_MUSIC_FADE);
        Self {
            camera: WaypointAnimator::new(CAMERA_START, waypoints, WAYPOINT_STAY),
            fade: Fade::fade_in(CREDITS_FADE_IN),
            exit: None,
            starfield: false,
        }
    }

    pub fn frame(&mut self, session: &mut Session, input: &FrameInput, dt: f32) {
        self.fade.advance(dt);

        if let Some(countdown) = &mut self.exit {
            if countdown.tick(dt) {
                log::info!("Credits finished");
                session.request_scene(Scene::Exit);
            }
        }

        if self.exit.is_none() && input.any_key {
            log::info!("Credits skipped");
            self.fade = Fade::fade_out(SKIP_FADE);
            session.stop_music(SKIP_FADE);
            self.exit = Some(Countdown::new(SKIP_EXIT));
            return;
        }

        if let Some(index) = self.camera.update(dt) {
            if index == self.camera.last_index() && self.exit.is_none() {
                self.starfield = true;
                self.fade = Fade::fade_out(FINALE_FADE).with_delay(FINALE_FADE_DELAY);
                session.stop_music(FINALE_MUSIC_FADE);
                self.exit = Some(Countdown::new(FINALE_EXIT));
            }
        }
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera.position()
    }

    pub fn starfield_enabled(&self) -> bool {
        self.starfield
    }

    pub fn is_exiting(&self) -> bool {
        self.exit.is_some()
    }

    pub fn overlay_alpha(&self) -> f32 {
        1.0 - self.fade.alpha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MusicCue;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_animator_eases_and_rests() {
        let path = vec![
            Waypoint::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
            Waypoint::new(Vec3::new(10.0, 10.0, 0.0), 2.0),
        ];
        let mut animator = WaypointAnimator::new(Vec3::ZERO, path, 1.5);
        assert_eq!(animator.position(), Vec3::ZERO);

        // Half way in time is half way in space for smoothstep
        assert!(animator.update(0.5).is_none());
        assert!((animator.position().x - 5.0).abs() < 1e-4);

        // Arrived, then rests for the stay time
        assert!(animator.update(0.6).is_none());
        assert_eq!(animator.position(), Vec3::new(10.0, 0.0, 0.0));
        assert!(animator.update(1.3).is_none());
        assert_eq!(animator.update(0.2), Some(1));
        assert_eq!(animator.position(), Vec3::new(10.0, 0.0, 0.0));

        // Wraps back to the first waypoint
        let mut moved = None;
        for _ in 0..100 {
            if let Some(index) = animator.update(0.05) {
                moved = Some(index);
                break;
            }
        }
        assert_eq!(moved, Some(0));
        assert_eq!(animator.position(), Vec3::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn test_empty_path_stays_put() {
        let mut animator = WaypointAnimator::new(Vec3::ONE, Vec::new(), 1.0);
        assert!(animator.update(5.0).is_none());
        assert_eq!(animator.position(), Vec3::ONE);
    }

    #[test]
    fn test_credits_roll_to_exit() {
        let mut session = Session::default();
        let mut scene = CreditsScene::new(&mut session);
        assert_eq!(session.current_track(), Some(MusicTrack::Credits));
        assert!(scene.overlay_alpha() > 0.99);

        let idle = FrameInput::default();
        let mut frames = 0;
        while session.take_scene_request().is_none() {
            scene.frame(&mut session, &idle, FRAME);
            frames += 1;
            assert!(frames < 60 * 120, "credits never ended");
        }
        assert!(scene.starfield_enabled());
        assert!(scene.overlay_alpha() > 0.5);
        assert_eq!(
            session.drain_music_cues().last(),
            Some(&MusicCue::Stop {
                fade: FINALE_MUSIC_FADE
            })
        );
    }

    #[test]
    fn test_key_skips_credits() {
        let mut session = Session::default();
        let mut scene = CreditsScene::new(&mut session);
        let key = FrameInput {
            any_key: true,
            ..Default::default()
        };
        scene.frame(&mut session, &key, FRAME);
        assert!(scene.is_exiting());
        assert_eq!(session.current_track(), None);

        let mut requested = None;
        for _ in 0..(60 * 3) {
            scene.frame(&mut session, &key, FRAME);
            if let Some(scene) = session.take_scene_request() {
                requested = Some(scene);
                break;
            }
        }
        assert_eq!(requested, Some(Scene::Exit));
        assert!(!scene.starfield_enabled());
    }
}
