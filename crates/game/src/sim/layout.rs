use engine::Vec2;
use serde::Serialize;

pub const PICKUP_RADIUS: f32 = 50.0;
pub const WORKBENCH_RADIUS: f32 = 60.0;
pub const GATE_RADIUS: f32 = 70.0;
/// Items never (re)spawn inside the square of this half-size around world center.
pub const CENTER_EXCLUSION_HALF_SIZE: f32 = 200.0;
const SPAWN_EDGE_MARGIN: f32 = 40.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn bottom_center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height)
    }
}

/// Static world geometry, derived once from the world size when the world is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldLayout {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    pub player_spawn: Vec2,
    pub workshop: Rect,
    pub workbench_anchor: Vec2,
    pub gate_wall: Rect,
    pub gate_anchor: Vec2,
    pub spawn_margin: f32,
}

impl WorldLayout {
    pub fn new(width: f32, height: f32) -> Self {
        let center = Vec2::new(width * 0.5, height * 0.5);
        let workshop = Rect::new(center.x - 190.0, center.y - 110.0, 140.0, 96.0);
        let gate_wall = Rect::new(center.x + 30.0, center.y - 180.0, 170.0, 110.0);
        Self {
            width,
            height,
            center,
            player_spawn: Vec2::new(center.x, center.y + 60.0),
            workshop,
            workbench_anchor: workshop.bottom_center() + Vec2::new(0.0, 22.0),
            gate_wall,
            gate_anchor: gate_wall.bottom_center() + Vec2::new(0.0, 18.0),
            spawn_margin: SPAWN_EDGE_MARGIN,
        }
    }

    pub fn clamp_to_world(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(0.0, self.width),
            point.y.clamp(0.0, self.height),
        )
    }

    pub fn in_gate_range(&self, point: Vec2) -> bool {
        point.within(self.gate_anchor, GATE_RADIUS)
    }

    pub fn in_workbench_range(&self, point: Vec2) -> bool {
        point.within(self.workbench_anchor, WORKBENCH_RADIUS)
    }

    /// True when `point` sits inside the central square on both axes at once.
    pub fn in_center_exclusion(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() < CENTER_EXCLUSION_HALF_SIZE
            && (point.y - self.center.y).abs() < CENTER_EXCLUSION_HALF_SIZE
    }
}
