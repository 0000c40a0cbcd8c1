use engine::{Camera2D, Vec2};

use super::layout::WorldLayout;

/// Higher is snappier; the camera closes `1 - e^(-rate * dt)` of the gap each frame.
pub const FOLLOW_RATE: f32 = 6.0;

/// Eases `camera` toward `target` and keeps the view inside the world when the world is
/// larger than the view on that axis.
pub fn follow(camera: &mut Camera2D, target: Vec2, dt: f32, layout: &WorldLayout, view: Vec2) {
    let t = 1.0 - (-FOLLOW_RATE * dt.max(0.0)).exp();
    let eased = camera.position.lerp(target, t);
    camera.position = Vec2::new(
        clamp_axis(eased.x, view.x * 0.5, layout.width),
        clamp_axis(eased.y, view.y * 0.5, layout.height),
    );
}

fn clamp_axis(value: f32, half_view: f32, extent: f32) -> f32 {
    if extent <= half_view * 2.0 {
        return extent * 0.5;
    }
    value.clamp(half_view, extent - half_view)
}
