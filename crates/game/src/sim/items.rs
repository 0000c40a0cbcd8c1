use engine::Vec2;
use rand::Rng;
use serde::Serialize;

use super::catalog::ItemTypeId;
use super::layout::{WorldLayout, CENTER_EXCLUSION_HALF_SIZE};
use super::timer::Countdown;

pub const SPAWN_CONDITION_MIN: f32 = 0.3;
pub const SPAWN_CONDITION_MAX: f32 = 0.9;
pub const RESPAWN_BASE_SECONDS: f32 = 60.0;
pub const RESPAWN_JITTER_SECONDS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorldItem {
    pub type_id: ItemTypeId,
    pub condition: f32,
    pub position: Vec2,
    pub active: bool,
    respawn: Countdown,
}

impl WorldItem {
    #[cfg(test)]
    pub(crate) fn respawn_timer(&self) -> f32 {
        self.respawn.remaining()
    }
}

/// Fixed pool of scavengable items. Items are never added or removed after creation;
/// pickups only toggle them inactive until their respawn timer runs out.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItemField {
    items: Vec<WorldItem>,
    spawn_area: SpawnArea,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SpawnArea {
    min: Vec2,
    max: Vec2,
    center: Vec2,
    exclusion: f32,
}

impl WorldItemField {
    pub fn new(count: usize, layout: &WorldLayout, rng: &mut impl Rng) -> Self {
        let spawn_area = SpawnArea::from_layout(layout);
        let items = (0..count)
            .map(|_| WorldItem {
                type_id: ItemTypeId::random(rng),
                condition: random_condition(rng),
                position: spawn_area.sample(rng),
                active: true,
                respawn: Countdown::IDLE,
            })
            .collect();
        Self { items, spawn_area }
    }

    pub fn items(&self) -> &[WorldItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lowest-index active item within `radius` of `point`.
    pub fn first_in_range(&self, point: Vec2, radius: f32) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.active && item.position.within(point, radius))
    }

    pub fn peek_active(&self, index: usize) -> Option<(ItemTypeId, f32)> {
        self.items
            .get(index)
            .filter(|item| item.active)
            .map(|item| (item.type_id, item.condition))
    }

    pub fn pick_up(&mut self, index: usize, rng: &mut impl Rng) -> Option<(ItemTypeId, f32)> {
        let item = self.items.get_mut(index).filter(|item| item.active)?;
        item.active = false;
        item.respawn
            .start(RESPAWN_BASE_SECONDS + rng.gen_range(0.0..=RESPAWN_JITTER_SECONDS));
        Some((item.type_id, item.condition))
    }

    /// Counts down pending respawns; every item that comes back is relocated, re-rolled,
    /// and reported through `on_respawn` with its index and new position.
    pub fn tick(
        &mut self,
        dt: f32,
        rng: &mut impl Rng,
        mut on_respawn: impl FnMut(usize, Vec2),
    ) {
        let spawn_area = self.spawn_area;
        for (index, item) in self.items.iter_mut().enumerate() {
            if item.active {
                continue;
            }
            if item.respawn.tick(dt) {
                item.position = spawn_area.sample(rng);
                item.type_id = ItemTypeId::random(rng);
                item.condition = random_condition(rng);
                item.active = true;
                on_respawn(index, item.position);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn place_for_test(&mut self, index: usize, position: Vec2) {
        if let Some(item) = self.items.get_mut(index) {
            item.position = position;
        }
    }
}

fn random_condition(rng: &mut impl Rng) -> f32 {
    rng.gen_range(SPAWN_CONDITION_MIN..=SPAWN_CONDITION_MAX)
}

impl SpawnArea {
    fn from_layout(layout: &WorldLayout) -> Self {
        let margin = layout.spawn_margin;
        Self {
            min: Vec2::new(margin, margin),
            max: Vec2::new(
                (layout.width - margin).max(margin),
                (layout.height - margin).max(margin),
            ),
            center: layout.center,
            exclusion: CENTER_EXCLUSION_HALF_SIZE,
        }
    }

    /// Picks x freely; when x falls inside the central band, y is drawn only from the
    /// parts of the y range outside the band. Terminates without rejection loops.
    fn sample(&self, rng: &mut impl Rng) -> Vec2 {
        let x = sample_span(rng, self.min.x, self.max.x);
        if (x - self.center.x).abs() >= self.exclusion {
            return Vec2::new(x, sample_span(rng, self.min.y, self.max.y));
        }
        let below = (self.min.y, (self.center.y - self.exclusion).max(self.min.y));
        let above = ((self.center.y + self.exclusion).min(self.max.y), self.max.y);
        match sample_two_spans(rng, below, above) {
            Some(y) => Vec2::new(x, y),
            // No room above or below the band; move onto its nearest vertical edge.
            None => Vec2::new(
                self.band_edge_x(x),
                sample_span(rng, self.min.y, self.max.y),
            ),
        }
    }

    fn band_edge_x(&self, x: f32) -> f32 {
        let left = self.center.x - self.exclusion;
        let right = self.center.x + self.exclusion;
        if x < self.center.x {
            left
        } else {
            right
        }
    }
}

fn sample_span(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

fn sample_two_spans(rng: &mut impl Rng, first: (f32, f32), second: (f32, f32)) -> Option<f32> {
    let first_len = (first.1 - first.0).max(0.0);
    let second_len = (second.1 - second.0).max(0.0);
    let total = first_len + second_len;
    if total <= 0.0 {
        return None;
    }
    let pick = rng.gen_range(0.0..total);
    if pick < first_len {
        Some(first.0 + pick)
    } else {
        Some(second.0 + (pick - first_len))
    }
}
