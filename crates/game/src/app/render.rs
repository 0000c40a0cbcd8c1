use engine::{text_width_px, with_alpha, world_to_screen, DrawList, Rgba, Vec2, Viewport};

use crate::sim::catalog::{is_trade_eligible, ItemShape};
use crate::sim::economy::ShopItem;
use crate::sim::environment::StormState;
use crate::sim::inventory::InventorySlot;
use crate::sim::layout::Rect;
use crate::sim::logs::data_log;
use crate::sim::modal::Screen;
use crate::sim::snapshot::RenderSnapshot;
use crate::sim::ui;

const SAND: Rgba = [244, 218, 165, 255];
const SAND_RIPPLE: Rgba = [226, 196, 140, 255];
const SHADOW: Rgba = [90, 60, 30, 70];
const FOOTPRINT: Rgba = [170, 132, 86, 150];
const DUST: Rgba = [214, 186, 138, 160];
const WORKSHOP: Rgba = [150, 104, 66, 255];
const WORKSHOP_ROOF: Rgba = [112, 72, 44, 255];
const GATE_WALL: Rgba = [176, 168, 160, 255];
const GATE_OPENING: Rgba = [60, 54, 64, 255];
const BENCH: Rgba = [96, 70, 48, 255];
const PLAYER_BODY: Rgba = [54, 92, 140, 255];
const PLAYER_HEAD: Rgba = [236, 200, 160, 255];
const STORM_HAZE: Rgba = [206, 164, 104, 255];
const WIND: Rgba = [255, 244, 220, 200];
const SHIMMER: Rgba = [255, 255, 220, 255];
const HUD_TEXT: Rgba = [40, 28, 20, 255];
const PANEL_BG: Rgba = [36, 30, 28, 235];
const PANEL_EDGE: Rgba = [220, 190, 130, 255];
const PANEL_TEXT: Rgba = [245, 235, 215, 255];
const SLOT_BG: Rgba = [70, 60, 54, 255];
const SLOT_REPAIR: Rgba = [90, 200, 120, 255];
const SLOT_SACRIFICE: Rgba = [220, 90, 70, 255];
const BUTTON_ON: Rgba = [200, 160, 90, 255];
const BUTTON_OFF: Rgba = [90, 80, 72, 255];
const NOTICE: Rgba = [200, 50, 40, 255];
const SUN: Rgba = [250, 200, 60, 255];
const MOON: Rgba = [220, 224, 240, 255];

const VIEWPORT: Viewport = Viewport {
    width: ui::VIEW_WIDTH as u32,
    height: ui::VIEW_HEIGHT as u32,
};
const RIPPLE_SPACING: f32 = 96.0;

pub(crate) fn draw_snapshot(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    draw.clear(SAND);
    draw_ground(snapshot, draw);
    draw_trails(snapshot, draw);
    draw_buildings(snapshot, draw);
    draw_items(snapshot, draw);
    draw_player(snapshot, draw);
    draw_weather(snapshot, draw);
    draw.tint(snapshot.ambient.tint);
    draw_hud(snapshot, draw);
    draw_screen(snapshot, draw);
}

fn to_screen(snapshot: &RenderSnapshot, world: Vec2) -> (i32, i32) {
    world_to_screen(world, &snapshot.camera, VIEWPORT)
}

fn draw_ground(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let top = snapshot.camera.position.y - ui::VIEW_HEIGHT * 0.5;
    let first = (top / RIPPLE_SPACING).floor() as i32;
    for row in first..=first + (ui::VIEW_HEIGHT / RIPPLE_SPACING) as i32 + 1 {
        let world_y = row as f32 * RIPPLE_SPACING;
        let (_, y) = to_screen(snapshot, Vec2::new(0.0, world_y));
        let drift = row.rem_euclid(3) * 40;
        let mut x = -drift;
        while x < VIEWPORT.width as i32 {
            draw.line(x, y, x + 60, y - 4, SAND_RIPPLE);
            x += 150;
        }
    }
}

fn draw_trails(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    for footprint in snapshot.effects.footprints() {
        let (x, y) = to_screen(snapshot, footprint.mark.position);
        draw.fill_rect(x - 2, y - 2, 4, 5, with_alpha(FOOTPRINT, footprint.mark.alpha()));
    }
    for puff in snapshot.effects.dust_puffs() {
        let (x, y) = to_screen(snapshot, puff.position);
        let grow = (puff.life.fraction_elapsed() * 6.0) as i32;
        draw.fill_circle(x, y, 3 + grow, with_alpha(DUST, puff.alpha()));
    }
}

fn draw_buildings(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let layout = &snapshot.layout;
    let shadow = snapshot.ambient.shadow_offset;
    for rect in [layout.workshop, layout.gate_wall] {
        draw_world_rect(snapshot, draw, offset_rect(rect, shadow), SHADOW);
    }

    draw_world_rect(snapshot, draw, layout.workshop, WORKSHOP);
    let roof = Rect::new(
        layout.workshop.x - 6.0,
        layout.workshop.y - 10.0,
        layout.workshop.width + 12.0,
        22.0,
    );
    draw_world_rect(snapshot, draw, roof, WORKSHOP_ROOF);
    let (bx, by) = to_screen(snapshot, layout.workbench_anchor);
    draw.fill_rect(bx - 20, by - 8, 40, 14, BENCH);

    draw_world_rect(snapshot, draw, layout.gate_wall, GATE_WALL);
    let opening = Rect::new(
        layout.gate_wall.x + layout.gate_wall.width * 0.5 - 24.0,
        layout.gate_wall.y + layout.gate_wall.height - 56.0,
        48.0,
        56.0,
    );
    draw_world_rect(snapshot, draw, opening, GATE_OPENING);
}

fn draw_items(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let shadow = snapshot.ambient.shadow_offset * 0.4;
    for item in snapshot.items.iter().filter(|item| item.active) {
        let item_type = item.type_id.item_type();
        let (sx, sy) = to_screen(snapshot, item.position + shadow);
        draw.fill_circle(sx, sy + 4, 8, SHADOW);
        let (x, y) = to_screen(snapshot, item.position);
        draw_shape(draw, x, y, item_type.category.shape(), item_type.color);
    }
    for shimmer in snapshot.effects.shimmers() {
        let (x, y) = to_screen(snapshot, shimmer.position);
        let radius = 8 + (shimmer.life.fraction_elapsed() * 18.0) as i32;
        draw.outline_rect(
            x - radius,
            y - radius,
            radius * 2,
            radius * 2,
            with_alpha(SHIMMER, shimmer.alpha()),
        );
    }
    if let Some(flash) = snapshot.effects.pickup_flash() {
        let (x, y) = to_screen(snapshot, flash.position);
        draw.fill_circle(x, y, 22, with_alpha(SHIMMER, flash.alpha() * 0.8));
    }
}

fn draw_shape(draw: &mut DrawList, x: i32, y: i32, shape: ItemShape, color: Rgba) {
    match shape {
        ItemShape::Board { width, height } => {
            let (w, h) = (width as i32, height as i32);
            draw.fill_rect(x - w / 2, y - h / 2, w, h, color);
            draw.line(x - w / 2 + 3, y, x + w / 2 - 3, y, [230, 200, 80, 255]);
        }
        ItemShape::Cell { radius } => {
            draw.fill_circle(x, y, radius as i32, color);
            draw.fill_rect(x - 2, y - radius as i32 - 3, 4, 3, [60, 60, 60, 255]);
        }
        ItemShape::Lens { radius, rim } => {
            draw.fill_circle(x, y, radius as i32, [70, 70, 80, 255]);
            draw.fill_circle(x, y, (radius - rim) as i32, color);
        }
        ItemShape::Strut { length, thickness } => {
            let (l, t) = (length as i32, thickness as i32);
            draw.fill_rect(x - l / 2, y - t / 2, l, t, color);
        }
    }
}

fn draw_player(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let player = &snapshot.player;
    let bob = if player.moving {
        (player.bob_phase.sin() * 2.0).round() as i32
    } else {
        0
    };
    let (sx, sy) = to_screen(snapshot, player.position + snapshot.ambient.shadow_offset);
    draw.fill_circle(sx, sy + 10, 10, SHADOW);
    let (x, y) = to_screen(snapshot, player.position);
    draw.fill_rect(x - 7, y - 10 + bob, 14, 18, PLAYER_BODY);
    draw.fill_circle(x, y - 16 + bob, 6, PLAYER_HEAD);
    let tip = player.position + player.facing * 14.0;
    let (tx, ty) = to_screen(snapshot, tip);
    draw.line(x, y + bob, tx, ty + bob, HUD_TEXT);
}

fn draw_weather(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    for line in snapshot.effects.wind_lines() {
        let (x, y) = to_screen(snapshot, line.origin);
        let travel = (line.life.fraction_elapsed() * 120.0) as i32;
        let alpha = line.life.fraction_remaining();
        draw.line(
            x + travel,
            y,
            x + travel + line.length as i32,
            y - 2,
            with_alpha(WIND, alpha),
        );
    }
    let intensity = snapshot.ambient.storm_intensity;
    if intensity > 0.0 {
        draw.fill_rect(
            0,
            0,
            VIEWPORT.width as i32,
            VIEWPORT.height as i32,
            with_alpha(STORM_HAZE, intensity * 0.45),
        );
    }
}

fn draw_hud(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let ui_view = &snapshot.ui;
    let ambient = &snapshot.ambient;
    draw.text(16, 16, 3, format!("TOKENS: {}", ui_view.tokens), HUD_TEXT);
    draw.text(
        16,
        42,
        2,
        format!(
            "BAG: {}/{}",
            ui_view.inventory.count(),
            ui_view.inventory.capacity()
        ),
        HUD_TEXT,
    );
    if ambient.storm_state != StormState::Calm {
        draw.text(16, 62, 2, ambient.storm_state.label(), NOTICE);
    }

    let (icon, icon_color) = if ambient.is_night {
        (6, MOON)
    } else {
        (8, SUN)
    };
    let dial_x = VIEWPORT.width as i32 - 196;
    draw.fill_rect(dial_x, 22, 160, 4, HUD_TEXT);
    let marker = dial_x + (ambient.day_phase * 160.0) as i32;
    draw.fill_circle(marker, 24, icon, icon_color);

    if let Some(hint) = snapshot.hint {
        let label = hint.label();
        let x = (VIEWPORT.width as i32 - text_width_px(label, 2)) / 2;
        draw.text(x, VIEWPORT.height as i32 - 48, 2, label, HUD_TEXT);
    }

    let notice = snapshot.effects.full_notice();
    if notice.is_running() {
        let label = "INVENTORY FULL";
        let x = (VIEWPORT.width as i32 - text_width_px(label, 3)) / 2;
        draw.text(x, 96, 3, label, with_alpha(NOTICE, notice.remaining().min(1.0)));
    }

    let popup = snapshot.effects.token_popup();
    if popup.timer.is_running() {
        let rise = (popup.timer.fraction_elapsed() * 20.0) as i32;
        let label = format!("{:+}", popup.delta);
        draw.text(
            200,
            16 - rise.min(12) + 12,
            3,
            label,
            with_alpha(HUD_TEXT, popup.timer.fraction_remaining()),
        );
    }

    let flash = snapshot.effects.repair_flash();
    if flash.is_running() {
        draw.fill_rect(
            0,
            0,
            VIEWPORT.width as i32,
            VIEWPORT.height as i32,
            with_alpha([255, 255, 255, 255], flash.fraction_remaining() * 0.35),
        );
    }
}

fn draw_screen(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let screen = snapshot.ui.screen;
    if !screen.is_open() {
        return;
    }
    fill(draw, ui::PANEL, PANEL_BG);
    outline(draw, ui::PANEL, PANEL_EDGE);
    button(draw, ui::CLOSE_BUTTON, "CLOSE", true);
    let title = match screen {
        Screen::None => return,
        Screen::Inventory => "INVENTORY",
        Screen::Workbench => "WORKBENCH",
        Screen::Trade => "CITY GATE",
        Screen::LogViewer { .. } => "DATA LOG",
    };
    draw.text(
        ui::PANEL.x as i32 + 24,
        ui::PANEL.y as i32 + 20,
        3,
        title,
        PANEL_TEXT,
    );

    match screen {
        Screen::None => {}
        Screen::Inventory => draw_slots(snapshot, draw),
        Screen::Workbench => draw_workbench(snapshot, draw),
        Screen::Trade => draw_trade(snapshot, draw),
        Screen::LogViewer { entry } => draw_log(snapshot, draw, entry),
    }
}

fn draw_slots(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    let inventory = &snapshot.ui.inventory;
    for (index, slot) in inventory.usable().iter().enumerate() {
        let rect = ui::slot_rect(index);
        fill(draw, rect, SLOT_BG);
        let workbench = &snapshot.ui.workbench;
        let edge = if workbench.repair_slot == Some(index) {
            SLOT_REPAIR
        } else if workbench.sacrifice_slot == Some(index) {
            SLOT_SACRIFICE
        } else {
            PANEL_EDGE
        };
        outline(draw, rect, edge);
        if slot.occupied {
            draw_slot_item(draw, rect, slot, snapshot.ui.screen == Screen::Trade);
        }
    }
}

fn draw_slot_item(draw: &mut DrawList, rect: Rect, slot: &InventorySlot, show_trade: bool) {
    let item_type = slot.type_id.item_type();
    let center = rect.center();
    draw_shape(
        draw,
        center.x as i32,
        center.y as i32 - 12,
        item_type.category.shape(),
        item_type.color,
    );
    let percent = format!("{}%", (slot.condition * 100.0).round() as i32);
    draw.text(rect.x as i32 + 8, rect.y as i32 + 62, 2, percent, PANEL_TEXT);
    let bar_width = ((rect.width - 16.0) * slot.condition) as i32;
    draw.fill_rect(rect.x as i32 + 8, rect.y as i32 + 82, bar_width, 4, SLOT_REPAIR);
    if show_trade && is_trade_eligible(slot.condition) {
        draw.text(rect.x as i32 + 8, rect.y as i32 + 6, 2, "TRADE", BUTTON_ON);
    }
}

fn draw_workbench(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    draw_slots(snapshot, draw);
    let workbench = &snapshot.ui.workbench;
    let label = if workbench.progress > 0.0 {
        "REPAIRING"
    } else {
        "REPAIR"
    };
    button(draw, ui::REPAIR_BUTTON, label, workbench.can_repair);
    if workbench.progress > 0.0 {
        let bar = Rect::new(
            ui::REPAIR_BUTTON.x,
            ui::REPAIR_BUTTON.y + ui::REPAIR_BUTTON.height + 8.0,
            ui::REPAIR_BUTTON.width * workbench.progress,
            6.0,
        );
        fill(draw, bar, SLOT_REPAIR);
    }
    draw.text(
        ui::PANEL.x as i32 + 24,
        ui::PANEL.y as i32 + 52,
        2,
        format!(
            "BONUS +{}% (+10% SAME TYPE)",
            (snapshot.ui.base_repair_bonus * 100.0).round() as i32
        ),
        PANEL_TEXT,
    );
}

fn draw_trade(snapshot: &RenderSnapshot, draw: &mut DrawList) {
    draw_slots(snapshot, draw);
    for entry in &snapshot.ui.shop {
        let label = match entry.cost {
            Some(cost) => format!("{} ({cost})", entry.item.label()),
            None => format!("{} SOLD", short_label(entry.item)),
        };
        button(draw, ui::shop_button_rect(entry.item), &label, entry.affordable);
    }
    button(
        draw,
        ui::LOGS_BUTTON,
        "LOGS",
        snapshot.ui.data_logs_purchased > 0,
    );
    draw.text(
        ui::PANEL.x as i32 + 24,
        ui::PANEL.y as i32 + 52,
        2,
        format!("TOKENS: {}", snapshot.ui.tokens),
        PANEL_TEXT,
    );
}

fn short_label(item: ShopItem) -> &'static str {
    match item {
        ShopItem::DataLog => "LOGS",
        ShopItem::ToolUpgrade => "TOOL",
        ShopItem::CarryUpgrade => "CARRY",
    }
}

fn draw_log(snapshot: &RenderSnapshot, draw: &mut DrawList, entry: u32) {
    let Some(log) = data_log(entry) else {
        return;
    };
    let x = ui::PANEL.x as i32 + 24;
    draw.text(x, ui::PANEL.y as i32 + 80, 3, log.title, BUTTON_ON);
    for (row, line) in log.lines.iter().enumerate() {
        draw.text(x, ui::PANEL.y as i32 + 130 + row as i32 * 28, 2, *line, PANEL_TEXT);
    }
    let owned = snapshot.ui.data_logs_purchased;
    button(draw, ui::PREV_LOG_BUTTON, "< PREV", entry > 0);
    button(draw, ui::NEXT_LOG_BUTTON, "NEXT >", entry + 1 < owned);
    draw.text(
        ui::PANEL.x as i32 + 360,
        ui::PREV_LOG_BUTTON.y as i32 + 12,
        2,
        format!("{}/{}", entry + 1, owned),
        PANEL_TEXT,
    );
}

fn button(draw: &mut DrawList, rect: Rect, label: &str, enabled: bool) {
    fill(draw, rect, if enabled { BUTTON_ON } else { BUTTON_OFF });
    outline(draw, rect, PANEL_EDGE);
    let width = text_width_px(label, 2);
    let x = rect.x as i32 + (rect.width as i32 - width) / 2;
    let y = rect.y as i32 + (rect.height as i32 - 10) / 2;
    draw.text(x, y, 2, label, PANEL_BG);
}

fn fill(draw: &mut DrawList, rect: Rect, color: Rgba) {
    draw.fill_rect(
        rect.x as i32,
        rect.y as i32,
        rect.width as i32,
        rect.height as i32,
        color,
    );
}

fn outline(draw: &mut DrawList, rect: Rect, color: Rgba) {
    draw.outline_rect(
        rect.x as i32,
        rect.y as i32,
        rect.width as i32,
        rect.height as i32,
        color,
    );
}

fn draw_world_rect(snapshot: &RenderSnapshot, draw: &mut DrawList, rect: Rect, color: Rgba) {
    let (x, y) = to_screen(snapshot, Vec2::new(rect.x, rect.y));
    draw.fill_rect(x, y, rect.width as i32, rect.height as i32, color);
}

fn offset_rect(rect: Rect, offset: Vec2) -> Rect {
    Rect::new(rect.x + offset.x, rect.y + offset.y, rect.width, rect.height)
}

#[cfg(test)]
mod tests {
    use engine::DrawCmd;

    use super::*;
    use crate::sim::{GameState, WorldSettings};

    fn state() -> GameState {
        GameState::new(&WorldSettings {
            seed: Some(3),
            ..WorldSettings::default()
        })
    }

    fn texts(draw: &DrawList) -> Vec<String> {
        draw.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn world_frame_starts_with_sand_and_tints_before_hud() {
        let snapshot = state().snapshot();
        let mut draw = DrawList::new();
        draw_snapshot(&snapshot, &mut draw);

        assert_eq!(draw.commands().first(), Some(&DrawCmd::Clear(SAND)));
        let tint_index = draw
            .commands()
            .iter()
            .position(|cmd| matches!(cmd, DrawCmd::Tint(_)));
        let tokens_index = draw.commands().iter().position(
            |cmd| matches!(cmd, DrawCmd::Text { text, .. } if text.starts_with("TOKENS")),
        );
        if let (Some(tint), Some(tokens)) = (tint_index, tokens_index) {
            assert!(tint < tokens);
        }
        assert!(texts(&draw).iter().any(|text| text == "BAG: 0/8"));
    }

    #[test]
    fn closed_world_draws_no_panel() {
        let snapshot = state().snapshot();
        let mut draw = DrawList::new();
        draw_snapshot(&snapshot, &mut draw);
        assert!(!texts(&draw).iter().any(|text| text == "CLOSE"));
    }

    #[test]
    fn trade_panel_lists_shop_prices() {
        let mut snapshot = state().snapshot();
        snapshot.ui.screen = Screen::Trade;
        let mut draw = DrawList::new();
        draw_snapshot(&snapshot, &mut draw);

        let texts = texts(&draw);
        assert!(texts.iter().any(|text| text == "DATA LOG (2)"));
        assert!(texts.iter().any(|text| text == "CARRY UPGRADE (4)"));
        assert!(texts.iter().any(|text| text == "CLOSE"));
    }

    #[test]
    fn log_viewer_shows_entry_title() {
        let mut snapshot = state().snapshot();
        snapshot.ui.screen = Screen::LogViewer { entry: 2 };
        snapshot.ui.data_logs_purchased = 3;
        let mut draw = DrawList::new();
        draw_snapshot(&snapshot, &mut draw);

        let texts = texts(&draw);
        assert!(texts.iter().any(|text| text == "LOG 3: GATE PROTOCOL"));
        assert!(texts.iter().any(|text| text == "3/3"));
    }
}
