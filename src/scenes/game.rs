//! In-game scene: drives fixed-step ticks of one level

use super::FrameInput;
use super::hud::Hud;
use crate::session::Session;
use crate::sim::{GameEvent, GameState, TickInput, tick};

#[derive(Debug)]
pub struct GameScene {
    state: GameState,
    hud: Hud,
    accumulator: f32,
    fixed_dt: f32,
    max_substeps: u32,
    /// Input carried into the next tick; one-shots survive frames with no tick
    pending: TickInput,
    /// Events raised during the last frame
    events: Vec<GameEvent>,
}

impl GameScene {
    /// Lay out the session's current level
    pub fn new(session: &Session, seed: u64, fixed_dt: f32, max_substeps: u32) -> Self {
        Self {
            state: GameState::new(session.level_info(), session.lives(), seed),
            hud: Hud::new(session),
            accumulator: 0.0,
            fixed_dt,
            max_substeps: max_substeps.max(1),
            pending: TickInput::default(),
            events: Vec::new(),
        }
    }

    /// Run as many ticks as the frame time covers
    pub fn frame(&mut self, session: &mut Session, input: &FrameInput, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        self.pending.axis = input.axis;
        self.pending.fire = input.fire;
        self.pending.fire_pressed |= input.fire_pressed;
        self.pending.pause |= input.pause;

        let mut substeps = 0;
        while self.accumulator >= self.fixed_dt && substeps < self.max_substeps {
            let input = self.pending.clone();
            tick(&mut self.state, session, &input, self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.fire_pressed = false;
            self.pending.pause = false;
        }

        // Drop backlog we could not simulate
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.fixed_dt);
        }

        self.events = self.state.drain_events();
        self.hud.update(session, &self.state);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{MAX_SUBSTEPS, SIM_DT};
    use crate::sim::LevelState;

    fn scene(session: &Session) -> GameScene {
        GameScene::new(session, 7, SIM_DT, MAX_SUBSTEPS)
    }

    #[test]
    fn test_accumulator_runs_fixed_ticks() {
        let mut session = Session::default();
        let mut game = scene(&session);

        game.frame(&mut session, &FrameInput::default(), 0.01);
        assert_eq!(game.state().time_ticks, 0);
        game.frame(&mut session, &FrameInput::default(), 0.011);
        assert_eq!(game.state().time_ticks, 1);

        // Long frames are clamped
        game.frame(&mut session, &FrameInput::default(), 5.0);
        assert_eq!(game.state().time_ticks, 1 + 5);
    }

    #[test]
    fn test_fire_press_survives_short_frames() {
        let mut session = Session::default();
        let mut game = scene(&session);

        // Bring the panel up and past its lockout
        for _ in 0..200 {
            game.frame(&mut session, &FrameInput::default(), SIM_DT);
        }
        assert_eq!(game.state().level_state, LevelState::GetReady);

        // Too short to tick, but the press is kept
        let press = FrameInput {
            fire_pressed: true,
            ..Default::default()
        };
        game.frame(&mut session, &press, SIM_DT * 0.25);
        for _ in 0..40 {
            game.frame(&mut session, &FrameInput::default(), SIM_DT);
        }
        assert_eq!(game.state().level_state, LevelState::Playing);
    }

    #[test]
    fn test_hud_tracks_session() {
        let mut session = Session::default();
        let mut game = scene(&session);
        session.increase_score(30);
        game.frame(&mut session, &FrameInput::default(), SIM_DT);
        assert_eq!(game.hud().score_line(), "Current Score : 30");
        assert_eq!(game.hud().panel().title, session.level_info().name);
    }
}
