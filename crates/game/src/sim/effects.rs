use std::collections::VecDeque;

use engine::Vec2;
use rand::Rng;
use serde::Serialize;

use super::timer::Countdown;

pub const FOOTPRINT_INTERVAL_SECONDS: f32 = 0.25;
pub const FOOTPRINT_LIFETIME_SECONDS: f32 = 3.0;
pub const MAX_FOOTPRINTS: usize = 48;
pub const DUST_PUFF_SECONDS: f32 = 0.4;
const MAX_DUST_PUFFS: usize = 16;
pub const SHIMMER_SECONDS: f32 = 1.0;
pub const PICKUP_FLASH_SECONDS: f32 = 0.3;
pub const REPAIR_FLASH_SECONDS: f32 = 0.5;
pub const TOKEN_POPUP_SECONDS: f32 = 1.2;
pub const FULL_NOTICE_SECONDS: f32 = 2.0;
pub const WIND_LINE_SECONDS: f32 = 0.6;
const WIND_BASE_INTERVAL_SECONDS: f32 = 0.05;
const WIND_NIGHT_INTERVAL_FACTOR: f32 = 2.5;
const MAX_WIND_LINES: usize = 64;
const FOOT_SPREAD: f32 = 4.0;

/// A world-anchored mark that fades over its countdown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mark {
    pub position: Vec2,
    pub life: Countdown,
}

impl Mark {
    fn new(position: Vec2, seconds: f32) -> Self {
        Self {
            position,
            life: Countdown::started(seconds),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.life.fraction_remaining()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Footprint {
    pub mark: Mark,
    pub facing: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WindLine {
    pub origin: Vec2,
    pub length: f32,
    pub life: Countdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TokenPopup {
    pub delta: i32,
    pub timer: Countdown,
}

/// Per-frame facts the effect timers react to.
#[derive(Debug, Clone, Copy)]
pub struct EffectContext {
    pub player_moving: bool,
    pub storm_intensity: f32,
    pub is_night: bool,
    pub view_center: Vec2,
    pub view_size: Vec2,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Effects {
    footprints: VecDeque<Footprint>,
    footprint_timer: Countdown,
    left_foot: bool,
    dust_puffs: VecDeque<Mark>,
    wind_lines: VecDeque<WindLine>,
    wind_timer: Countdown,
    shimmers: Vec<Mark>,
    pickup_flash: Option<Mark>,
    repair_flash: Countdown,
    token_popup: TokenPopup,
    full_notice: Countdown,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn footprints(&self) -> impl Iterator<Item = &Footprint> {
        self.footprints.iter()
    }

    pub fn dust_puffs(&self) -> impl Iterator<Item = &Mark> {
        self.dust_puffs.iter()
    }

    pub fn wind_lines(&self) -> impl Iterator<Item = &WindLine> {
        self.wind_lines.iter()
    }

    pub fn shimmers(&self) -> &[Mark] {
        &self.shimmers
    }

    pub fn pickup_flash(&self) -> Option<&Mark> {
        self.pickup_flash.as_ref()
    }

    pub fn repair_flash(&self) -> Countdown {
        self.repair_flash
    }

    pub fn token_popup(&self) -> TokenPopup {
        self.token_popup
    }

    pub fn full_notice(&self) -> Countdown {
        self.full_notice
    }

    pub fn trigger_pickup_flash(&mut self, position: Vec2) {
        self.pickup_flash = Some(Mark::new(position, PICKUP_FLASH_SECONDS));
    }

    pub fn trigger_repair_flash(&mut self) {
        self.repair_flash.start(REPAIR_FLASH_SECONDS);
    }

    pub fn trigger_token_popup(&mut self, delta: i32) {
        self.token_popup = TokenPopup {
            delta,
            timer: Countdown::started(TOKEN_POPUP_SECONDS),
        };
    }

    pub fn trigger_full_notice(&mut self) {
        self.full_notice.start(FULL_NOTICE_SECONDS);
    }

    pub fn spawn_shimmer(&mut self, position: Vec2) {
        self.shimmers.push(Mark::new(position, SHIMMER_SECONDS));
    }

    /// Walking footsteps. Called only on frames where the player actually moved, so a
    /// blocked screen or an idle player leaves no trail.
    pub fn record_walk(&mut self, dt: f32, position: Vec2, facing: Vec2) {
        if !self.footprint_timer.is_running() {
            self.footprint_timer.start(FOOTPRINT_INTERVAL_SECONDS);
        }
        if !self.footprint_timer.tick(dt) {
            return;
        }
        self.footprint_timer.start(FOOTPRINT_INTERVAL_SECONDS);
        self.left_foot = !self.left_foot;
        let spread = if self.left_foot {
            FOOT_SPREAD
        } else {
            -FOOT_SPREAD
        };
        let side = Vec2::new(-facing.y, facing.x) * spread;
        if self.footprints.len() == MAX_FOOTPRINTS {
            self.footprints.pop_front();
        }
        self.footprints.push_back(Footprint {
            mark: Mark::new(position + side, FOOTPRINT_LIFETIME_SECONDS),
            facing,
        });
        if self.dust_puffs.len() == MAX_DUST_PUFFS {
            self.dust_puffs.pop_front();
        }
        self.dust_puffs
            .push_back(Mark::new(position - facing * 10.0, DUST_PUFF_SECONDS));
    }

    pub fn tick(&mut self, dt: f32, context: &EffectContext, rng: &mut impl Rng) {
        tick_marks(&mut self.footprints, dt, |footprint| &mut footprint.mark.life);
        tick_marks(&mut self.dust_puffs, dt, |mark| &mut mark.life);
        tick_marks(&mut self.wind_lines, dt, |line| &mut line.life);
        self.shimmers.retain_mut(|mark| !mark.life.tick(dt));
        if let Some(flash) = self.pickup_flash.as_mut() {
            if flash.life.tick(dt) {
                self.pickup_flash = None;
            }
        }
        self.repair_flash.tick(dt);
        self.token_popup.timer.tick(dt);
        self.full_notice.tick(dt);
        if !context.player_moving {
            self.footprint_timer.stop();
        }
        self.tick_wind(dt, context, rng);
    }

    fn tick_wind(&mut self, dt: f32, context: &EffectContext, rng: &mut impl Rng) {
        if context.storm_intensity <= 0.0 {
            self.wind_timer.stop();
            return;
        }
        if self.wind_timer.is_running() && !self.wind_timer.tick(dt) {
            return;
        }
        let mut interval = WIND_BASE_INTERVAL_SECONDS / context.storm_intensity.max(0.05);
        if context.is_night {
            interval *= WIND_NIGHT_INTERVAL_FACTOR;
        }
        self.wind_timer.start(interval);
        if self.wind_lines.len() == MAX_WIND_LINES {
            self.wind_lines.pop_front();
        }
        let half = context.view_size * 0.5;
        let origin = Vec2::new(
            context.view_center.x + rng.gen_range(-half.x..=half.x),
            context.view_center.y + rng.gen_range(-half.y..=half.y),
        );
        self.wind_lines.push_back(WindLine {
            origin,
            length: rng.gen_range(24.0..=72.0) * context.storm_intensity.max(0.3),
            life: Countdown::started(WIND_LINE_SECONDS),
        });
    }
}

fn tick_marks<T>(
    marks: &mut VecDeque<T>,
    dt: f32,
    mut life: impl FnMut(&mut T) -> &mut Countdown,
) {
    for mark in marks.iter_mut() {
        life(mark).tick(dt);
    }
    marks.retain_mut(|mark| life(mark).is_running());
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn context(moving: bool, storm_intensity: f32, is_night: bool) -> EffectContext {
        EffectContext {
            player_moving: moving,
            storm_intensity,
            is_night,
            view_center: Vec2::new(100.0, 100.0),
            view_size: Vec2::new(1280.0, 720.0),
        }
    }

    #[test]
    fn footprints_spawn_every_quarter_second_of_walking() {
        let mut effects = Effects::new();
        for _ in 0..10 {
            effects.record_walk(0.1, Vec2::new(50.0, 50.0), Vec2::new(1.0, 0.0));
        }
        assert_eq!(effects.footprints().count(), 3);
        assert_eq!(effects.dust_puffs().count(), 3);
    }

    #[test]
    fn footprint_ring_is_bounded() {
        let mut effects = Effects::new();
        for _ in 0..200 {
            effects.record_walk(0.25, Vec2::new(50.0, 50.0), Vec2::new(0.0, 1.0));
        }
        assert_eq!(effects.footprints().count(), MAX_FOOTPRINTS);
    }

    #[test]
    fn marks_expire_after_their_lifetime() {
        let mut effects = Effects::new();
        let mut rng = StdRng::seed_from_u64(1);
        effects.record_walk(0.25, Vec2::new(50.0, 50.0), Vec2::new(0.0, 1.0));
        effects.spawn_shimmer(Vec2::new(10.0, 10.0));
        effects.trigger_pickup_flash(Vec2::new(10.0, 10.0));

        effects.tick(0.5, &context(false, 0.0, false), &mut rng);
        assert_eq!(effects.dust_puffs().count(), 0);
        assert!(effects.pickup_flash().is_none());
        assert_eq!(effects.shimmers().len(), 1);
        assert_eq!(effects.footprints().count(), 1);

        effects.tick(3.0, &context(false, 0.0, false), &mut rng);
        assert!(effects.shimmers().is_empty());
        assert_eq!(effects.footprints().count(), 0);
    }

    #[test]
    fn notices_count_down() {
        let mut effects = Effects::new();
        let mut rng = StdRng::seed_from_u64(2);
        effects.trigger_full_notice();
        effects.trigger_token_popup(1);

        effects.tick(1.5, &context(false, 0.0, false), &mut rng);
        assert!(effects.full_notice().is_running());
        assert!(!effects.token_popup().timer.is_running());
        assert_eq!(effects.token_popup().delta, 1);

        effects.tick(0.5, &context(false, 0.0, false), &mut rng);
        assert!(!effects.full_notice().is_running());
    }

    #[test]
    fn wind_lines_only_during_storms_and_sparser_at_night() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut calm = Effects::new();
        let mut day = Effects::new();
        let mut night = Effects::new();
        for _ in 0..20 {
            calm.tick(0.02, &context(false, 0.0, false), &mut rng);
            day.tick(0.02, &context(false, 1.0, false), &mut rng);
            night.tick(0.02, &context(false, 1.0, true), &mut rng);
        }
        assert_eq!(calm.wind_lines().count(), 0);
        assert!(day.wind_lines().count() > night.wind_lines().count());
        assert!(night.wind_lines().count() > 0);
    }
}
