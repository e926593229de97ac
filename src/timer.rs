//! Explicit timers advanced once per tick
//!
//! Every timed sequence in the game (screen fades, delayed scene changes,
//! the get-ready panel) is expressed with these instead of suspended tasks.

/// Direction of a fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeDirection {
    /// Alpha rises from 0 to 1
    In,
    /// Alpha falls from 1 to 0
    Out,
}

/// A linear fade with an optional start delay
#[derive(Debug, Clone)]
pub struct Fade {
    direction: FadeDirection,
    delay: f32,
    duration: f32,
    elapsed: f32,
}

impl Fade {
    /// Durations shorter than this complete immediately
    const MIN_DURATION: f32 = 0.01;

    pub fn fade_in(duration: f32) -> Self {
        Self::new(FadeDirection::In, duration)
    }

    pub fn fade_out(duration: f32) -> Self {
        Self::new(FadeDirection::Out, duration)
    }

    fn new(direction: FadeDirection, duration: f32) -> Self {
        Self {
            direction,
            delay: 0.0,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Hold the fade at its starting alpha for `delay` seconds
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn direction(&self) -> FadeDirection {
        self.direction
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Fade progress in [0, 1], excluding the delay
    pub fn progress(&self) -> f32 {
        if self.duration < Self::MIN_DURATION {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        ((self.elapsed - self.delay) / self.duration).clamp(0.0, 1.0)
    }

    /// Current alpha
    pub fn alpha(&self) -> f32 {
        match self.direction {
            FadeDirection::In => self.progress(),
            FadeDirection::Out => 1.0 - self.progress(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Ease-in/ease-out curve over [0, 1]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// One-shot countdown that fires exactly once
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: f32,
    fired: bool,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            fired: false,
        }
    }

    /// Advance the countdown; returns true on the tick it expires
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_in_progresses_linearly() {
        let mut fade = Fade::fade_in(2.0);
        assert_eq!(fade.alpha(), 0.0);
        fade.advance(1.0);
        assert!((fade.alpha() - 0.5).abs() < 1e-6);
        fade.advance(1.5);
        assert_eq!(fade.alpha(), 1.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn test_fade_out_respects_delay() {
        let mut fade = Fade::fade_out(1.0).with_delay(6.0);
        fade.advance(5.0);
        assert_eq!(fade.alpha(), 1.0);
        fade.advance(1.5);
        assert!((fade.alpha() - 0.5).abs() < 1e-6);
        fade.advance(1.0);
        assert!(fade.is_finished());
        assert_eq!(fade.alpha(), 0.0);
    }

    #[test]
    fn test_zero_duration_fade_completes_at_once() {
        let mut fade = Fade::fade_in(0.0);
        fade.advance(0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn test_smoothstep_endpoints() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(2.0), 1.0);
        assert!(smoothstep(0.25) < 0.25);
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut countdown = Countdown::new(0.05);
        assert!(!countdown.tick(0.02));
        assert!(!countdown.tick(0.02));
        assert!(countdown.tick(0.02));
        assert!(!countdown.tick(0.02));
        assert!(countdown.has_fired());
    }
}
