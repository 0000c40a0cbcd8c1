use std::ops::{Add, AddAssign, Mul, Sub};

use serde::Serialize;

use super::draw::DrawList;
use super::input::{ActionStates, InputAction};

/// Everything a scene may read about input for one tick. Pressed flags are edges and are
/// only ever true for the single tick that follows the physical press.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    interact_pressed: bool,
    toggle_inventory_pressed: bool,
    cancel_pressed: bool,
    primary_click_pressed: bool,
    debug_dump_pressed: bool,
    cursor_position_px: Option<Vec2>,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct InputEdges {
    pub interact: bool,
    pub toggle_inventory: bool,
    pub cancel: bool,
    pub primary_click: bool,
    pub debug_dump: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        actions: ActionStates,
        edges: InputEdges,
        cursor_position_px: Option<Vec2>,
    ) -> Self {
        Self {
            actions,
            interact_pressed: edges.interact,
            toggle_inventory_pressed: edges.toggle_inventory,
            cancel_pressed: edges.cancel,
            primary_click_pressed: edges.primary_click,
            debug_dump_pressed: edges.debug_dump,
            cursor_position_px,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.actions.set(action, is_down);
        self
    }

    pub fn with_interact_pressed(mut self, pressed: bool) -> Self {
        self.interact_pressed = pressed;
        self
    }

    pub fn with_toggle_inventory_pressed(mut self, pressed: bool) -> Self {
        self.toggle_inventory_pressed = pressed;
        self
    }

    pub fn with_cancel_pressed(mut self, pressed: bool) -> Self {
        self.cancel_pressed = pressed;
        self
    }

    pub fn with_primary_click_pressed(mut self, pressed: bool) -> Self {
        self.primary_click_pressed = pressed;
        self
    }

    pub fn with_debug_dump_pressed(mut self, pressed: bool) -> Self {
        self.debug_dump_pressed = pressed;
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn interact_pressed(&self) -> bool {
        self.interact_pressed
    }

    pub fn toggle_inventory_pressed(&self) -> bool {
        self.toggle_inventory_pressed
    }

    pub fn cancel_pressed(&self) -> bool {
        self.cancel_pressed
    }

    pub fn primary_click_pressed(&self) -> bool {
        self.primary_click_pressed
    }

    pub fn debug_dump_pressed(&self) -> bool {
        self.debug_dump_pressed
    }

    /// Cursor in view pixels (the fixed render buffer), not window pixels.
    pub fn cursor_position_px(&self) -> Option<Vec2> {
        self.cursor_position_px
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    pub fn within(self, other: Vec2, radius: f32) -> bool {
        (other - self).length_squared() <= radius * radius
    }

    /// Unit vector in the same direction, or zero for a zero-length input.
    pub fn normalized_or_zero(self) -> Vec2 {
        let len_sq = self.length_squared();
        if len_sq > 0.0 {
            self * len_sq.sqrt().recip()
        } else {
            Vec2::ZERO
        }
    }

    pub fn lerp(self, target: Vec2, t: f32) -> Vec2 {
        self + (target - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

pub trait Scene {
    fn load(&mut self);
    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot);
    fn render(&self, draw: &mut DrawList);
    fn unload(&mut self) {}
    fn debug_title(&self) -> Option<String> {
        None
    }
}

/// Owns the single active scene and tracks whether it has been loaded.
pub(crate) struct SceneHost {
    scene: Box<dyn Scene>,
    is_loaded: bool,
}

impl SceneHost {
    pub(crate) fn new(scene: Box<dyn Scene>) -> Self {
        Self {
            scene,
            is_loaded: false,
        }
    }

    pub(crate) fn load(&mut self) {
        if self.is_loaded {
            return;
        }
        self.scene.load();
        self.is_loaded = true;
    }

    pub(crate) fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        if self.is_loaded {
            self.scene.update(dt_seconds, input);
        }
    }

    pub(crate) fn render(&self, draw: &mut DrawList) {
        if self.is_loaded {
            self.scene.render(draw);
        }
    }

    pub(crate) fn debug_title(&self) -> Option<String> {
        self.scene.debug_title()
    }

    pub(crate) fn shutdown(&mut self) {
        if self.is_loaded {
            self.scene.unload();
            self.is_loaded = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct CountingScene {
        loads: Rc<Cell<u32>>,
        updates: Rc<Cell<u32>>,
        unloads: Rc<Cell<u32>>,
    }

    impl Scene for CountingScene {
        fn load(&mut self) {
            self.loads.set(self.loads.get() + 1);
        }

        fn update(&mut self, _dt_seconds: f32, _input: &InputSnapshot) {
            self.updates.set(self.updates.get() + 1);
        }

        fn render(&self, _draw: &mut DrawList) {}

        fn unload(&mut self) {
            self.unloads.set(self.unloads.get() + 1);
        }
    }

    #[test]
    fn host_loads_once_and_skips_updates_before_load() {
        let loads = Rc::new(Cell::new(0));
        let updates = Rc::new(Cell::new(0));
        let unloads = Rc::new(Cell::new(0));
        let mut host = SceneHost::new(Box::new(CountingScene {
            loads: Rc::clone(&loads),
            updates: Rc::clone(&updates),
            unloads: Rc::clone(&unloads),
        }));

        host.update(0.016, &InputSnapshot::empty());
        host.load();
        host.load();
        host.update(0.016, &InputSnapshot::empty());
        host.shutdown();
        host.shutdown();

        assert_eq!(loads.get(), 1);
        assert_eq!(updates.get(), 1);
        assert_eq!(unloads.get(), 1);
    }

    #[test]
    fn normalized_diagonal_has_unit_length() {
        let diagonal = Vec2::new(1.0, -1.0).normalized_or_zero();
        assert!((diagonal.length() - 1.0).abs() < 1e-6);
        assert_eq!(Vec2::ZERO.normalized_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn within_is_inclusive_at_the_radius() {
        let origin = Vec2::new(10.0, 10.0);
        assert!(origin.within(Vec2::new(13.0, 14.0), 5.0));
        assert!(!origin.within(Vec2::new(13.0, 14.1), 5.0));
    }

    #[test]
    fn snapshot_builders_round_trip_edges() {
        let snapshot = InputSnapshot::empty()
            .with_interact_pressed(true)
            .with_cancel_pressed(true)
            .with_cursor_position_px(Some(Vec2::new(4.0, 5.0)));

        assert!(snapshot.interact_pressed());
        assert!(snapshot.cancel_pressed());
        assert!(!snapshot.toggle_inventory_pressed());
        assert_eq!(snapshot.cursor_position_px(), Some(Vec2::new(4.0, 5.0)));
    }
}
