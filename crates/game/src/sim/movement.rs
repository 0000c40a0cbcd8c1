use engine::Vec2;
use serde::Serialize;

use super::layout::WorldLayout;

pub const BASE_SPEED: f32 = 180.0;
const BOB_RATE: f32 = 10.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// Unit vector for the held keys, or zero. Opposing keys cancel.
    pub fn direction(self) -> Vec2 {
        let mut direction = Vec2::ZERO;
        if self.up {
            direction.y -= 1.0;
        }
        if self.down {
            direction.y += 1.0;
        }
        if self.left {
            direction.x -= 1.0;
        }
        if self.right {
            direction.x += 1.0;
        }
        direction.normalized_or_zero()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Player {
    pub position: Vec2,
    pub facing: Vec2,
    pub bob_phase: f32,
    pub moving: bool,
}

impl Player {
    pub fn spawn_at(position: Vec2) -> Self {
        Self {
            position,
            facing: Vec2::new(0.0, 1.0),
            bob_phase: 0.0,
            moving: false,
        }
    }

    /// Advances the player by one frame. Returns the distance actually covered, which is
    /// zero when no key is held or when pushing against the world edge.
    pub fn step(
        &mut self,
        intent: MoveIntent,
        speed_multiplier: f32,
        dt: f32,
        layout: &WorldLayout,
    ) -> f32 {
        let direction = intent.direction();
        if direction == Vec2::ZERO || dt <= 0.0 {
            self.moving = false;
            return 0.0;
        }
        let before = self.position;
        self.position =
            layout.clamp_to_world(self.position + direction * (BASE_SPEED * speed_multiplier * dt));
        self.facing = direction;
        self.moving = true;
        self.bob_phase = (self.bob_phase + dt * BOB_RATE) % std::f32::consts::TAU;
        self.position.distance(before)
    }

    /// Keeps the pose but drops the walking flag, used while a screen blocks movement.
    pub fn halt(&mut self) {
        self.moving = false;
    }
}
