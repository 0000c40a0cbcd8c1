use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::catalog::ItemTypeId;
use super::economy::ShopItem;
use super::workbench::WorkbenchState;
use super::*;

const FRAME: f32 = 1.0 / 60.0;
const GATE: Vec2 = Vec2 {
    x: 1000.0,
    y: 1000.0,
};
const BENCH: Vec2 = Vec2 {
    x: 1040.0,
    y: 1000.0,
};

fn new_state() -> GameState {
    let mut state = GameState::new(&WorldSettings {
        seed: Some(7),
        ..WorldSettings::default()
    });
    state.layout.gate_anchor = GATE;
    state.layout.workbench_anchor = BENCH;
    for index in 0..state.items.len() {
        state.items.place_for_test(index, Vec2::new(20.0, 20.0));
    }
    state
}

fn interact() -> FrameInput {
    FrameInput {
        interact: true,
        ..FrameInput::default()
    }
}

fn click(at: Vec2) -> FrameInput {
    FrameInput {
        pointer: Some(at),
        primary_click: true,
        ..FrameInput::default()
    }
}

fn cancel() -> FrameInput {
    FrameInput {
        cancel: true,
        ..FrameInput::default()
    }
}

fn toggle_inventory() -> FrameInput {
    FrameInput {
        toggle_inventory: true,
        ..FrameInput::default()
    }
}

fn frame(state: &mut GameState, input: FrameInput) {
    state.update(FRAME, &input);
}

fn open_trade(state: &mut GameState) {
    state.player.position = Vec2::new(960.0, 1000.0);
    frame(state, interact());
    assert_eq!(state.screen(), Screen::Trade);
}

fn open_workbench(state: &mut GameState) {
    state.player.position = Vec2::new(1090.0, 1000.0);
    frame(state, interact());
    assert_eq!(state.screen(), Screen::Workbench);
}

#[test]
fn gate_wins_when_gate_and_workbench_both_in_range() {
    let mut state = new_state();
    state.player.position = Vec2::new(1020.0, 1000.0);

    frame(&mut state, interact());

    assert_eq!(state.screen(), Screen::Trade);
    assert_eq!(state.workbench.state(), WorkbenchState::Closed);
}

#[test]
fn pickup_moves_item_into_lowest_slot_and_schedules_respawn() {
    let mut state = new_state();
    state.player.position = Vec2::new(300.0, 300.0);
    state.items.place_for_test(3, Vec2::new(320.0, 300.0));
    let (type_id, condition) = state.items.peek_active(3).expect("active");

    frame(&mut state, interact());

    let slot = state.inventory.occupied(0).expect("picked up");
    assert_eq!(slot.type_id, type_id);
    assert_eq!(slot.condition, condition);
    let item = state.items.items()[3];
    assert!(!item.active);
    assert!(item.respawn_timer() > 59.9 && item.respawn_timer() <= 90.0);
    assert!(state.effects.pickup_flash().is_some());
}

#[test]
fn full_inventory_keeps_item_in_world_and_shows_notice() {
    let mut state = new_state();
    for _ in 0..8 {
        state.inventory.add(ItemTypeId(0), 0.5).expect("room");
    }
    state.player.position = Vec2::new(300.0, 300.0);
    state.items.place_for_test(0, Vec2::new(300.0, 310.0));

    frame(&mut state, interact());

    assert!(state.items.items()[0].active);
    assert_eq!(state.inventory.count(), 8);
    assert!(state.effects.full_notice().is_running());
    assert!(state.snapshot().effects.full_notice().remaining() > 1.9);
}

#[test]
fn only_one_item_is_taken_per_press() {
    let mut state = new_state();
    state.player.position = Vec2::new(300.0, 300.0);
    state.items.place_for_test(1, Vec2::new(310.0, 300.0));
    state.items.place_for_test(2, Vec2::new(290.0, 300.0));

    frame(&mut state, interact());

    assert_eq!(state.inventory.count(), 1);
    assert!(!state.items.items()[1].active);
    assert!(state.items.items()[2].active);
}

#[test]
fn same_category_repair_through_the_workbench_screen() {
    let mut state = new_state();
    state.inventory.add(ItemTypeId(0), 0.5).expect("room");
    state.inventory.add(ItemTypeId(1), 0.4).expect("room");
    open_workbench(&mut state);

    frame(&mut state, click(ui::slot_rect(0).center()));
    frame(&mut state, click(ui::slot_rect(1).center()));
    assert!(state.snapshot().ui.workbench.can_repair);
    frame(&mut state, click(ui::REPAIR_BUTTON.center()));
    assert_eq!(state.workbench.state(), WorkbenchState::Repairing);

    frame(&mut state, cancel());
    assert_eq!(state.screen(), Screen::Workbench);

    state.update(1.0, &FrameInput::default());
    assert_eq!(state.workbench.state(), WorkbenchState::Repairing);
    for _ in 0..120 {
        if state.workbench.state() != WorkbenchState::Repairing {
            break;
        }
        frame(&mut state, FrameInput::default());
    }

    let repaired = state.inventory.occupied(0).expect("kept");
    assert!((repaired.condition - 0.8).abs() < 1e-5);
    assert!(state.inventory.occupied(1).is_none());
    assert_eq!(state.workbench.state(), WorkbenchState::Open);
    assert_eq!(state.workbench.repair_slot(), None);
    assert!(state.effects.repair_flash().is_running());

    frame(&mut state, cancel());
    assert_eq!(state.screen(), Screen::None);
    assert!(state.workbench.is_closed());
}

#[test]
fn cross_category_repair_gets_base_bonus_only() {
    let mut state = new_state();
    state.inventory.add(ItemTypeId(0), 0.5).expect("room");
    state.inventory.add(ItemTypeId(2), 0.4).expect("room");
    open_workbench(&mut state);

    frame(&mut state, click(ui::slot_rect(0).center()));
    frame(&mut state, click(ui::slot_rect(1).center()));
    frame(&mut state, click(ui::REPAIR_BUTTON.center()));
    state.update(2.0, &FrameInput::default());

    let repaired = state.inventory.occupied(0).expect("kept");
    assert!((repaired.condition - 0.7).abs() < 1e-5);
}

#[test]
fn trade_in_only_accepts_high_condition_items() {
    let mut state = new_state();
    state.inventory.add(ItemTypeId(3), 0.85).expect("room");
    state.inventory.add(ItemTypeId(4), 0.5).expect("room");
    open_trade(&mut state);

    frame(&mut state, click(ui::slot_rect(0).center()));
    frame(&mut state, click(ui::slot_rect(1).center()));

    assert_eq!(state.economy.tokens(), 1);
    assert!(state.inventory.occupied(0).is_none());
    assert!(state.inventory.occupied(1).is_some());
    assert_eq!(state.effects.token_popup().delta, 1);
}

#[test]
fn buying_logs_opens_viewer_and_navigation_stays_in_bounds() {
    let mut state = new_state();
    state.economy = Economy::with_tokens(20);
    let buy_log = click(ui::shop_button_rect(ShopItem::DataLog).center());

    open_trade(&mut state);
    frame(&mut state, buy_log);
    assert_eq!(state.screen(), Screen::LogViewer { entry: 0 });
    assert_eq!(state.economy.tokens(), 18);

    frame(&mut state, cancel());
    assert_eq!(state.screen(), Screen::None);
    open_trade(&mut state);
    frame(&mut state, buy_log);
    assert_eq!(state.screen(), Screen::LogViewer { entry: 1 });
    assert_eq!(state.economy.tokens(), 15);

    frame(&mut state, click(ui::PREV_LOG_BUTTON.center()));
    assert_eq!(state.screen(), Screen::LogViewer { entry: 0 });
    frame(&mut state, click(ui::PREV_LOG_BUTTON.center()));
    assert_eq!(state.screen(), Screen::LogViewer { entry: 0 });
    frame(&mut state, click(ui::NEXT_LOG_BUTTON.center()));
    frame(&mut state, click(ui::NEXT_LOG_BUTTON.center()));
    assert_eq!(state.screen(), Screen::LogViewer { entry: 1 });

    frame(&mut state, click(ui::CLOSE_BUTTON.center()));
    open_trade(&mut state);
    frame(&mut state, click(ui::LOGS_BUTTON.center()));
    assert_eq!(state.screen(), Screen::LogViewer { entry: 1 });
}

#[test]
fn logs_button_needs_an_owned_log() {
    let mut state = new_state();
    open_trade(&mut state);
    frame(&mut state, click(ui::LOGS_BUTTON.center()));
    assert_eq!(state.screen(), Screen::Trade);
}

#[test]
fn unaffordable_purchase_changes_nothing() {
    let mut state = new_state();
    state.economy = Economy::with_tokens(3);
    open_trade(&mut state);

    frame(&mut state, click(ui::shop_button_rect(ShopItem::CarryUpgrade).center()));

    assert_eq!(state.economy.tokens(), 3);
    assert_eq!(state.inventory.capacity(), 8);
    assert_eq!(state.screen(), Screen::Trade);
}

#[test]
fn carry_upgrade_unlocks_two_more_slots() {
    let mut state = new_state();
    state.economy = Economy::with_tokens(4);
    open_trade(&mut state);

    frame(&mut state, click(ui::shop_button_rect(ShopItem::CarryUpgrade).center()));

    assert_eq!(state.inventory.capacity(), 10);
    assert_eq!(state.inventory.count(), 0);
    assert_eq!(state.economy.tokens(), 0);
    assert_eq!(state.effects.token_popup().delta, -4);
}

#[test]
fn open_screen_suspends_movement_and_footprints() {
    let mut state = new_state();
    let start = state.player.position;
    frame(&mut state, toggle_inventory());
    assert_eq!(state.screen(), Screen::Inventory);

    let walk_right = FrameInput {
        movement: MoveIntent {
            right: true,
            ..MoveIntent::default()
        },
        ..FrameInput::default()
    };
    for _ in 0..60 {
        frame(&mut state, walk_right);
    }

    assert_eq!(state.player.position, start);
    assert_eq!(state.effects.footprints().count(), 0);

    frame(&mut state, toggle_inventory());
    for _ in 0..60 {
        frame(&mut state, walk_right);
    }
    assert!(state.player.position.x > start.x);
    assert!(state.effects.footprints().count() > 0);
}

#[test]
fn buildings_replace_inventory_screen_but_pickups_wait() {
    let mut state = new_state();
    frame(&mut state, toggle_inventory());
    open_workbench(&mut state);
    assert_eq!(state.workbench.state(), WorkbenchState::Open);

    frame(&mut state, toggle_inventory());
    assert_eq!(state.screen(), Screen::Workbench);
    frame(&mut state, cancel());

    frame(&mut state, toggle_inventory());
    state.player.position = Vec2::new(300.0, 300.0);
    state.items.place_for_test(0, Vec2::new(300.0, 300.0));
    frame(&mut state, interact());
    assert_eq!(state.inventory.count(), 0);
    assert!(state.items.items()[0].active);
}

#[test]
fn interact_in_the_same_frame_as_a_screen_change_is_ignored() {
    let mut state = new_state();
    open_trade(&mut state);

    frame(
        &mut state,
        FrameInput {
            cancel: true,
            interact: true,
            ..FrameInput::default()
        },
    );
    assert_eq!(state.screen(), Screen::None);

    frame(
        &mut state,
        FrameInput {
            toggle_inventory: true,
            interact: true,
            ..FrameInput::default()
        },
    );
    assert_eq!(state.screen(), Screen::Inventory);

    frame(&mut state, toggle_inventory());
    frame(&mut state, interact());
    assert_eq!(state.screen(), Screen::Trade);
}

#[test]
fn picked_item_respawns_outside_center() {
    let mut state = new_state();
    state.player.position = Vec2::new(300.0, 300.0);
    state.items.place_for_test(0, Vec2::new(300.0, 300.0));
    frame(&mut state, interact());
    assert!(!state.items.items()[0].active);

    for _ in 0..200 {
        state.update(0.5, &FrameInput::default());
    }

    let item = state.items.items()[0];
    assert!(item.active);
    assert_eq!(item.respawn_timer(), 0.0);
    assert!(!state.layout.in_center_exclusion(item.position));
}

#[test]
fn invariants_hold_under_random_play() {
    let mut state = GameState::new(&WorldSettings {
        seed: Some(99),
        ..WorldSettings::default()
    });
    let mut input_rng = StdRng::seed_from_u64(100);
    for _ in 0..20_000 {
        let input = FrameInput {
            movement: MoveIntent {
                up: input_rng.gen_bool(0.3),
                down: input_rng.gen_bool(0.3),
                left: input_rng.gen_bool(0.3),
                right: input_rng.gen_bool(0.3),
            },
            interact: input_rng.gen_bool(0.05),
            toggle_inventory: input_rng.gen_bool(0.01),
            cancel: input_rng.gen_bool(0.01),
            pointer: Some(Vec2::new(
                input_rng.gen_range(0.0..1280.0),
                input_rng.gen_range(0.0..720.0),
            )),
            primary_click: input_rng.gen_bool(0.05),
        };
        state.update(input_rng.gen_range(0.0..0.05), &input);

        assert!(state.inventory.count() <= state.inventory.capacity());
        for item in state.items.items() {
            if item.active {
                assert_eq!(item.respawn_timer(), 0.0);
            }
        }
        let multiplier = state.environment.speed_multiplier();
        assert!((0.7..=1.0).contains(&multiplier));
        assert!(state.economy.data_logs_purchased() <= 5);
        let position = state.player.position;
        assert!(position.x >= 0.0 && position.x <= state.layout.width);
        assert!(position.y >= 0.0 && position.y <= state.layout.height);
        if state.workbench.state() != WorkbenchState::Closed {
            assert_eq!(state.screen(), Screen::Workbench);
        }
    }
}

#[test]
fn snapshot_serializes_for_the_debug_dump() {
    let mut state = new_state();
    frame(&mut state, FrameInput::default());

    let value = serde_json::to_value(state.snapshot()).expect("serializable");

    assert_eq!(value["ui"]["screen"]["screen"], "none");
    assert_eq!(value["ui"]["shop"].as_array().map(Vec::len), Some(3));
    assert!(value["items"].as_array().is_some_and(|items| !items.is_empty()));
}
