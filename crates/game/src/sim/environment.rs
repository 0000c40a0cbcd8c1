//! Ambient world processes: the day/night cycle and the sandstorm state machine.

use std::f32::consts::TAU;

use engine::{Rgba, Vec2};
use rand::Rng;
use serde::Serialize;
use tracing::info;

use super::timer::Countdown;

pub const DAY_LENGTH_SECONDS: f32 = 180.0;
const NIGHT_STARTS_AFTER_PHASE: f32 = 0.75;
const NIGHT_ENDS_BEFORE_PHASE: f32 = 0.05;
const SHADOW_MAX_LENGTH: f32 = 14.0;

const CALM_MIN_SECONDS: f32 = 60.0;
const CALM_MAX_SECONDS: f32 = 120.0;
const BUILDING_SECONDS: f32 = 5.0;
const ACTIVE_MIN_SECONDS: f32 = 20.0;
const ACTIVE_MAX_SECONDS: f32 = 30.0;
const FADING_SECONDS: f32 = 5.0;
pub const STORM_SPEED_MULTIPLIER: f32 = 0.7;

/// Tint keyframes by phase; the last frame repeats dawn so the cycle wraps smoothly.
const TINT_KEYFRAMES: [(f32, [f32; 3]); 5] = [
    (0.0, [255.0, 196.0, 170.0]),
    (0.25, [255.0, 255.0, 255.0]),
    (0.6, [255.0, 214.0, 150.0]),
    (0.85, [82.0, 92.0, 150.0]),
    (1.0, [255.0, 196.0, 170.0]),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DayNight {
    timer: f32,
}

impl DayNight {
    pub fn starting_at_phase(phase: f32) -> Self {
        Self {
            timer: phase.rem_euclid(1.0) * DAY_LENGTH_SECONDS,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.timer = (self.timer + dt.max(0.0)).rem_euclid(DAY_LENGTH_SECONDS);
    }

    pub fn phase(&self) -> f32 {
        self.timer / DAY_LENGTH_SECONDS
    }

    pub fn is_night(&self) -> bool {
        let phase = self.phase();
        phase > NIGHT_STARTS_AFTER_PHASE || phase < NIGHT_ENDS_BEFORE_PHASE
    }

    pub fn ambient_tint(&self) -> Rgba {
        let phase = self.phase();
        let upper = TINT_KEYFRAMES
            .iter()
            .position(|(at, _)| *at > phase)
            .unwrap_or(TINT_KEYFRAMES.len() - 1)
            .max(1);
        let (from_phase, from) = TINT_KEYFRAMES[upper - 1];
        let (to_phase, to) = TINT_KEYFRAMES[upper];
        let span = (to_phase - from_phase).max(f32::EPSILON);
        let t = ((phase - from_phase) / span).clamp(0.0, 1.0);
        let channel = |i: usize| (from[i] + (to[i] - from[i]) * t).round() as u8;
        [channel(0), channel(1), channel(2), 255]
    }

    /// Shadows swing with the sun across the day and vanish at night.
    pub fn shadow_offset(&self) -> Vec2 {
        if self.is_night() {
            return Vec2::ZERO;
        }
        let angle = self.phase() * TAU;
        Vec2::new(-angle.cos() * SHADOW_MAX_LENGTH, SHADOW_MAX_LENGTH * 0.5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StormState {
    Calm,
    Building,
    Active,
    Fading,
}

impl StormState {
    pub fn label(self) -> &'static str {
        match self {
            StormState::Calm => "CALM",
            StormState::Building => "STORM BUILDING",
            StormState::Active => "SANDSTORM",
            StormState::Fading => "STORM FADING",
        }
    }
}

/// Cyclic sandstorm. Phase and speed multiplier are derived from the current state's
/// countdown every tick, never accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Storm {
    state: StormState,
    timer: Countdown,
    phase: f32,
    speed_multiplier: f32,
}

impl Storm {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::calm_for(rng.gen_range(CALM_MIN_SECONDS..=CALM_MAX_SECONDS))
    }

    pub fn calm_for(seconds: f32) -> Self {
        Self {
            state: StormState::Calm,
            timer: Countdown::started(seconds),
            phase: 0.0,
            speed_multiplier: 1.0,
        }
    }

    pub fn state(&self) -> StormState {
        self.state
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    pub fn remaining(&self) -> f32 {
        self.timer.remaining()
    }

    pub fn state_duration(&self) -> f32 {
        self.timer.duration()
    }

    /// Visual strength of the storm in [0, 1].
    pub fn intensity(&self) -> f32 {
        match self.state {
            StormState::Calm => 0.0,
            StormState::Building | StormState::Fading => self.phase,
            StormState::Active => 1.0,
        }
    }

    /// Advances the machine; returns the new state when a transition happened.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Option<StormState> {
        let expired = self.timer.tick(dt);
        let transition = if expired {
            Some(self.enter_next(rng))
        } else {
            None
        };
        self.recompute();
        transition
    }

    fn enter_next(&mut self, rng: &mut impl Rng) -> StormState {
        let (next, duration) = match self.state {
            StormState::Calm => (StormState::Building, BUILDING_SECONDS),
            StormState::Building => (
                StormState::Active,
                rng.gen_range(ACTIVE_MIN_SECONDS..=ACTIVE_MAX_SECONDS),
            ),
            StormState::Active => (StormState::Fading, FADING_SECONDS),
            StormState::Fading => (
                StormState::Calm,
                rng.gen_range(CALM_MIN_SECONDS..=CALM_MAX_SECONDS),
            ),
        };
        self.state = next;
        self.timer.start(duration);
        info!(
            state = next.label(),
            duration_seconds = duration,
            "storm_state_changed"
        );
        next
    }

    fn recompute(&mut self) {
        let remaining = self.timer.fraction_remaining();
        match self.state {
            StormState::Calm => {
                self.phase = 0.0;
                self.speed_multiplier = 1.0;
            }
            StormState::Building => {
                self.phase = 1.0 - remaining;
                self.speed_multiplier = 1.0;
            }
            StormState::Active => {
                self.phase = remaining;
                self.speed_multiplier = STORM_SPEED_MULTIPLIER;
            }
            StormState::Fading => {
                self.phase = remaining;
                self.speed_multiplier =
                    STORM_SPEED_MULTIPLIER + (1.0 - STORM_SPEED_MULTIPLIER) * (1.0 - remaining);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Environment {
    pub day: DayNight,
    pub storm: Storm,
}

impl Environment {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            day: DayNight::starting_at_phase(0.1),
            storm: Storm::new(rng),
        }
    }

    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) {
        self.day.tick(dt);
        self.storm.tick(dt, rng);
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.storm.speed_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn day_phase_wraps_after_full_period() {
        let mut day = DayNight::default();
        day.tick(DAY_LENGTH_SECONDS * 0.5);
        assert!((day.phase() - 0.5).abs() < 1e-5);
        day.tick(DAY_LENGTH_SECONDS * 0.75);
        assert!((day.phase() - 0.25).abs() < 1e-4);
    }

    #[test]
    fn night_window_spans_the_wrap() {
        assert!(DayNight::starting_at_phase(0.8).is_night());
        assert!(DayNight::starting_at_phase(0.02).is_night());
        assert!(!DayNight::starting_at_phase(0.05).is_night());
        assert!(!DayNight::starting_at_phase(0.75).is_night());
        assert!(!DayNight::starting_at_phase(0.4).is_night());
    }

    #[test]
    fn tint_hits_keyframes_exactly() {
        assert_eq!(
            DayNight::starting_at_phase(0.25).ambient_tint(),
            [255, 255, 255, 255]
        );
        assert_eq!(
            DayNight::starting_at_phase(0.0).ambient_tint(),
            [255, 196, 170, 255]
        );
        let night = DayNight::starting_at_phase(0.85).ambient_tint();
        assert!((night[2] as i32 - 150).abs() <= 1);
    }

    #[test]
    fn tint_interpolates_between_keyframes() {
        let tint = DayNight::starting_at_phase(0.125).ambient_tint();
        assert!(tint[1] > 196 && tint[1] < 255);
    }

    #[test]
    fn shadow_collapses_at_night_and_swings_by_day() {
        assert_eq!(DayNight::starting_at_phase(0.9).shadow_offset(), Vec2::ZERO);
        let morning = DayNight::starting_at_phase(0.1).shadow_offset();
        let evening = DayNight::starting_at_phase(0.6).shadow_offset();
        assert!(morning.x < 0.0);
        assert!(evening.x > 0.0);
    }

    #[test]
    fn storm_cycle_returns_to_calm_at_full_speed() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut storm = Storm::new(&mut rng);
        let calm = storm.remaining();
        assert!((CALM_MIN_SECONDS..=CALM_MAX_SECONDS).contains(&calm));

        assert_eq!(storm.tick(calm, &mut rng), Some(StormState::Building));
        assert_eq!(storm.speed_multiplier(), 1.0);

        assert_eq!(
            storm.tick(BUILDING_SECONDS, &mut rng),
            Some(StormState::Active)
        );
        assert_eq!(storm.speed_multiplier(), STORM_SPEED_MULTIPLIER);
        let active = storm.state_duration();
        assert!((ACTIVE_MIN_SECONDS..=ACTIVE_MAX_SECONDS).contains(&active));

        assert_eq!(storm.tick(active, &mut rng), Some(StormState::Fading));
        assert_eq!(
            storm.tick(FADING_SECONDS, &mut rng),
            Some(StormState::Calm)
        );
        assert_eq!(storm.state(), StormState::Calm);
        assert_eq!(storm.speed_multiplier(), 1.0);
        assert!((CALM_MIN_SECONDS..=CALM_MAX_SECONDS).contains(&storm.remaining()));
    }

    #[test]
    fn building_phase_ramps_up_and_active_counts_down() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut storm = Storm::calm_for(1.0);
        storm.tick(1.0, &mut rng);
        storm.tick(2.5, &mut rng);
        assert!((storm.phase() - 0.5).abs() < 1e-5);

        storm.tick(2.5, &mut rng);
        assert_eq!(storm.state(), StormState::Active);
        assert!((storm.phase() - 1.0).abs() < 1e-6);
        let half = storm.state_duration() * 0.5;
        storm.tick(half, &mut rng);
        assert!((storm.phase() - 0.5).abs() < 1e-4);
        assert_eq!(storm.intensity(), 1.0);
    }

    #[test]
    fn fading_multiplier_recovers_as_phase_falls() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut storm = Storm::calm_for(1.0);
        storm.tick(1.0, &mut rng);
        storm.tick(BUILDING_SECONDS, &mut rng);
        let active = storm.state_duration();
        storm.tick(active, &mut rng);
        assert_eq!(storm.state(), StormState::Fading);
        assert!((storm.speed_multiplier() - STORM_SPEED_MULTIPLIER).abs() < 1e-6);

        storm.tick(FADING_SECONDS * 0.5, &mut rng);
        assert!((storm.speed_multiplier() - 0.85).abs() < 1e-4);
        assert!((storm.phase() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn many_small_ticks_do_not_drift_past_transitions() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut storm = Storm::calm_for(2.0);
        let mut transitions = 0;
        for _ in 0..130 {
            if storm.tick(1.0 / 60.0, &mut rng).is_some() {
                transitions += 1;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(storm.state(), StormState::Building);
    }
}
