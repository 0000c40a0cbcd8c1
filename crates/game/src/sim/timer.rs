use serde::Serialize;

/// Float countdown shared by every timed subsystem. `tick` clamps at zero and reports the
/// single tick on which the timer expires, so callers never re-implement the clamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Countdown {
    remaining: f32,
    duration: f32,
}

impl Countdown {
    pub const IDLE: Countdown = Countdown {
        remaining: 0.0,
        duration: 0.0,
    };

    pub fn started(duration: f32) -> Self {
        let mut timer = Self::IDLE;
        timer.start(duration);
        timer
    }

    pub fn start(&mut self, duration: f32) {
        let duration = duration.max(0.0);
        self.duration = duration;
        self.remaining = duration;
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
    }

    /// Returns true only on the tick that crosses from positive to zero.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= dt.max(0.0);
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            return true;
        }
        false
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn fraction_remaining(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }

    pub fn fraction_elapsed(&self) -> f32 {
        1.0 - self.fraction_remaining()
    }
}
