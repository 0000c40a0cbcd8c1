use engine::{DrawList, InputAction, InputSnapshot, Scene};
use tracing::{info, warn};

use crate::sim::movement::MoveIntent;
use crate::sim::{FrameInput, GameState, WorldSettings};

use super::render::draw_snapshot;

/// Adapts the simulation to the engine's scene contract: input snapshots become frame
/// intents, and each render pulls a fresh snapshot.
pub(crate) struct GameplayScene {
    settings: WorldSettings,
    state: GameState,
}

impl GameplayScene {
    pub(crate) fn new(settings: WorldSettings) -> Self {
        Self {
            state: GameState::new(&settings),
            settings,
        }
    }

    fn dump_snapshot(&self) {
        match serde_json::to_string(&self.state.snapshot()) {
            Ok(json) => info!(snapshot = %json, "snapshot_dump"),
            Err(err) => warn!(error = %err, "snapshot_dump_failed"),
        }
    }
}

pub(crate) fn frame_input(input: &InputSnapshot) -> FrameInput {
    FrameInput {
        movement: MoveIntent {
            up: input.is_down(InputAction::MoveUp),
            down: input.is_down(InputAction::MoveDown),
            left: input.is_down(InputAction::MoveLeft),
            right: input.is_down(InputAction::MoveRight),
        },
        interact: input.interact_pressed(),
        toggle_inventory: input.toggle_inventory_pressed(),
        cancel: input.cancel_pressed(),
        pointer: input.cursor_position_px(),
        primary_click: input.primary_click_pressed(),
    }
}

impl Scene for GameplayScene {
    fn load(&mut self) {
        self.state = GameState::new(&self.settings);
        info!(
            world_width = self.settings.width,
            world_height = self.settings.height,
            items = self.settings.item_count,
            seed = ?self.settings.seed,
            "scene_loaded"
        );
    }

    fn update(&mut self, dt_seconds: f32, input: &InputSnapshot) {
        self.state.update(dt_seconds, &frame_input(input));
        if input.debug_dump_pressed() {
            self.dump_snapshot();
        }
    }

    fn render(&self, draw: &mut DrawList) {
        draw_snapshot(&self.state.snapshot(), draw);
    }

    fn unload(&mut self) {
        info!(
            tokens = self.state.economy().tokens(),
            logs = self.state.economy().data_logs_purchased(),
            "scene_unloaded"
        );
    }

    fn debug_title(&self) -> Option<String> {
        let economy = self.state.economy();
        Some(format!(
            "Above the Clouds | tokens {} | bag {}/{} | {}",
            economy.tokens(),
            self.state.inventory().count(),
            self.state.inventory().capacity(),
            self.state.screen().label(),
        ))
    }
}
