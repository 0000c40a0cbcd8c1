use engine::{Camera2D, Rgba, Vec2};
use serde::Serialize;

use super::economy::ShopItem;
use super::effects::Effects;
use super::environment::StormState;
use super::inventory::Inventory;
use super::items::WorldItem;
use super::layout::WorldLayout;
use super::modal::Screen;
use super::movement::Player;
use super::workbench::WorkbenchState;

/// Read-only view of one frame, produced after every mutation for that frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub player: Player,
    pub items: Vec<WorldItem>,
    pub layout: WorldLayout,
    pub ambient: AmbientView,
    pub ui: UiView,
    pub effects: Effects,
    pub camera: Camera2D,
    pub hint: Option<InteractHint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientView {
    pub day_phase: f32,
    pub is_night: bool,
    pub tint: Rgba,
    pub shadow_offset: Vec2,
    pub storm_state: StormState,
    pub storm_phase: f32,
    pub storm_intensity: f32,
    pub storm_remaining: f32,
    pub storm_state_duration: f32,
    pub speed_multiplier: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiView {
    pub screen: Screen,
    pub inventory: Inventory,
    pub tokens: u32,
    pub workbench: WorkbenchView,
    pub shop: Vec<ShopEntry>,
    pub data_logs_purchased: u32,
    pub base_repair_bonus: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorkbenchView {
    pub state: WorkbenchState,
    pub repair_slot: Option<usize>,
    pub sacrifice_slot: Option<usize>,
    pub progress: f32,
    pub can_repair: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShopEntry {
    pub item: ShopItem,
    /// `None` once sold out.
    pub cost: Option<u32>,
    pub affordable: bool,
}

/// What an interact press would do right now, for the on-screen prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractHint {
    Trade,
    Workbench,
    PickUp,
}

impl InteractHint {
    pub fn label(self) -> &'static str {
        match self {
            Self::Trade => "E: TRADE",
            Self::Workbench => "E: WORKBENCH",
            Self::PickUp => "E: PICK UP",
        }
    }
}
