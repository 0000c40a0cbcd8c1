use std::time::{Duration, Instant};

/// Wall-clock frame delta provider. Produces one clamped, non-negative delta per frame.
#[derive(Debug)]
pub(crate) struct FrameClock {
    last_frame_instant: Instant,
    max_frame_delta: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameDelta {
    pub raw: Duration,
    pub clamped: Duration,
}

impl FrameDelta {
    pub(crate) fn seconds(self) -> f32 {
        self.clamped.as_secs_f32()
    }

    pub(crate) fn was_clamped(self) -> bool {
        self.raw > self.clamped
    }
}

impl FrameClock {
    pub(crate) fn new(now: Instant, max_frame_delta: Duration) -> Self {
        Self {
            last_frame_instant: now,
            max_frame_delta,
        }
    }

    pub(crate) fn tick(&mut self, now: Instant) -> FrameDelta {
        let raw = now.saturating_duration_since(self.last_frame_instant);
        self.last_frame_instant = now;
        FrameDelta {
            raw,
            clamped: clamp_frame_delta(raw, self.max_frame_delta),
        }
    }
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}
