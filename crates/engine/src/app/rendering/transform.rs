use serde::Serialize;

use crate::app::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// World point shown at the center of the viewport. World and screen share the same
/// orientation (y grows downward) and scale (one world unit per pixel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Camera2D {
    pub position: Vec2,
}

pub fn world_to_screen(world: Vec2, camera: &Camera2D, viewport: Viewport) -> (i32, i32) {
    let x = world.x - camera.position.x + viewport.width as f32 * 0.5;
    let y = world.y - camera.position.y + viewport.height as f32 * 0.5;
    (x.round() as i32, y.round() as i32)
}
