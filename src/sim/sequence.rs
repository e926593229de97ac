//! Get-ready panel sequence
//!
//! Runs at level start, after losing a life and at game over:
//! wait -> fade panel in -> wait for fire -> fade panel out.

use crate::timer::Fade;

/// Seconds the panel takes to fade in or out
pub const PANEL_FADE: f32 = 0.5;
/// Fire presses are ignored for this long after the panel appears
pub const CONFIRM_LOCKOUT: f32 = 2.0;
/// Default wait before the panel appears (lets explosions play out)
pub const DEFAULT_INITIAL_DELAY: f32 = 2.0;
/// Maximum alpha of the panel backdrop (text goes to 1.0)
pub const PANEL_MAX_ALPHA: f32 = 0.8;

#[derive(Debug, Clone)]
enum Phase {
    Idle,
    Delay { remaining: f32 },
    FadeIn(Fade),
    AwaitConfirm { elapsed: f32 },
    FadeOut(Fade),
    Halted,
}

/// Signals raised as the sequence advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceSignal {
    /// The panel started fading in
    PanelShowing,
    /// The player confirmed; the panel is fading out
    Confirmed,
    /// The panel is gone; play may resume
    Finished,
}

#[derive(Debug, Clone)]
pub struct GetReadySequence {
    phase: Phase,
}

impl Default for GetReadySequence {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl GetReadySequence {
    /// Begin (or restart) the sequence
    pub fn start(&mut self, initial_delay: f32) {
        self.phase = Phase::Delay {
            remaining: initial_delay.max(0.0),
        };
    }

    /// Freeze the panel fully shown; used once the game is over
    pub fn halt(&mut self) {
        self.phase = Phase::Halted;
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.phase, Phase::Idle | Phase::Halted)
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.phase, Phase::Halted)
    }

    /// Panel visibility in [0, 1]
    pub fn visibility(&self) -> f32 {
        match &self.phase {
            Phase::Idle | Phase::Delay { .. } => 0.0,
            Phase::FadeIn(fade) | Phase::FadeOut(fade) => fade.alpha(),
            Phase::AwaitConfirm { .. } | Phase::Halted => 1.0,
        }
    }

    /// Backdrop alpha
    pub fn panel_alpha(&self) -> f32 {
        self.visibility() * PANEL_MAX_ALPHA
    }

    /// Advance by `dt`; `fire_pressed` is the fire button's down edge this tick
    pub fn advance(&mut self, dt: f32, fire_pressed: bool) -> Option<SequenceSignal> {
        match &mut self.phase {
            Phase::Idle | Phase::Halted => None,
            Phase::Delay { remaining } => {
                *remaining -= dt;
                if *remaining <= 0.0 {
                    self.phase = Phase::FadeIn(Fade::fade_in(PANEL_FADE));
                    return Some(SequenceSignal::PanelShowing);
                }
                None
            }
            Phase::FadeIn(fade) => {
                fade.advance(dt);
                if fade.is_finished() {
                    self.phase = Phase::AwaitConfirm { elapsed: 0.0 };
                }
                None
            }
            Phase::AwaitConfirm { elapsed } => {
                *elapsed += dt;
                if fire_pressed && *elapsed > CONFIRM_LOCKOUT {
                    self.phase = Phase::FadeOut(Fade::fade_out(PANEL_FADE));
                    return Some(SequenceSignal::Confirmed);
                }
                None
            }
            Phase::FadeOut(fade) => {
                fade.advance(dt);
                if fade.is_finished() {
                    self.phase = Phase::Idle;
                    return Some(SequenceSignal::Finished);
                }
                None
            }
        }
    }
}
