//! Screen-space rectangles for the modal panels, in view pixels. The same rects drive
//! pointer hit-testing in the simulation and panel drawing in the renderer.

use engine::Vec2;

use super::economy::ShopItem;
use super::inventory::MAX_SLOTS;
use super::layout::Rect;
use super::modal::Screen;

pub const VIEW_WIDTH: f32 = 1280.0;
pub const VIEW_HEIGHT: f32 = 720.0;

pub const PANEL: Rect = Rect::new(240.0, 110.0, 800.0, 500.0);
pub const CLOSE_BUTTON: Rect = Rect::new(904.0, 126.0, 120.0, 36.0);
pub const REPAIR_BUTTON: Rect = Rect::new(560.0, 480.0, 160.0, 44.0);
pub const LOGS_BUTTON: Rect = Rect::new(368.0, 540.0, 120.0, 36.0);
pub const PREV_LOG_BUTTON: Rect = Rect::new(368.0, 540.0, 120.0, 36.0);
pub const NEXT_LOG_BUTTON: Rect = Rect::new(792.0, 540.0, 120.0, 36.0);

const SLOT_SIZE: f32 = 96.0;
const SLOT_GAP: f32 = 16.0;
const SLOT_COLUMNS: usize = 5;
const SLOT_ORIGIN: Vec2 = Vec2 { x: 368.0, y: 190.0 };
const SHOP_ORIGIN: Vec2 = Vec2 { x: 368.0, y: 470.0 };
const SHOP_BUTTON_WIDTH: f32 = 176.0;
const SHOP_BUTTON_HEIGHT: f32 = 44.0;
const SHOP_BUTTON_STRIDE: f32 = 184.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiHit {
    Slot(usize),
    Close,
    Repair,
    Shop(ShopItem),
    Logs,
    PrevLog,
    NextLog,
}

pub fn slot_rect(slot: usize) -> Rect {
    let column = (slot % SLOT_COLUMNS) as f32;
    let row = (slot / SLOT_COLUMNS) as f32;
    Rect::new(
        SLOT_ORIGIN.x + column * (SLOT_SIZE + SLOT_GAP),
        SLOT_ORIGIN.y + row * (SLOT_SIZE + SLOT_GAP),
        SLOT_SIZE,
        SLOT_SIZE,
    )
}

pub fn shop_button_rect(item: ShopItem) -> Rect {
    let index = ShopItem::ALL
        .iter()
        .position(|candidate| *candidate == item)
        .unwrap_or(0) as f32;
    Rect::new(
        SHOP_ORIGIN.x + index * SHOP_BUTTON_STRIDE,
        SHOP_ORIGIN.y,
        SHOP_BUTTON_WIDTH,
        SHOP_BUTTON_HEIGHT,
    )
}

/// Control under `cursor` for the open screen. Only slots inside `capacity` respond.
pub fn hit_test(screen: Screen, cursor: Vec2, capacity: usize) -> Option<UiHit> {
    if CLOSE_BUTTON.contains(cursor) && screen.is_open() {
        return Some(UiHit::Close);
    }
    let slot_hit = || {
        (0..capacity.min(MAX_SLOTS))
            .find(|slot| slot_rect(*slot).contains(cursor))
            .map(UiHit::Slot)
    };
    match screen {
        Screen::None => None,
        Screen::Inventory => slot_hit(),
        Screen::Workbench => {
            if REPAIR_BUTTON.contains(cursor) {
                Some(UiHit::Repair)
            } else {
                slot_hit()
            }
        }
        Screen::Trade => {
            if let Some(item) = ShopItem::ALL
                .into_iter()
                .find(|item| shop_button_rect(*item).contains(cursor))
            {
                return Some(UiHit::Shop(item));
            }
            if LOGS_BUTTON.contains(cursor) {
                return Some(UiHit::Logs);
            }
            slot_hit()
        }
        Screen::LogViewer { .. } => {
            if PREV_LOG_BUTTON.contains(cursor) {
                Some(UiHit::PrevLog)
            } else if NEXT_LOG_BUTTON.contains(cursor) {
                Some(UiHit::NextLog)
            } else {
                None
            }
        }
    }
}
