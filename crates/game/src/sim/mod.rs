//! Frame-stepped world state: environment, scavenging, repair, trading, and the modal
//! screens that gate them. Everything advances through [`GameState::update`].

pub mod camera;
pub mod catalog;
pub mod economy;
pub mod effects;
pub mod environment;
pub mod interaction;
pub mod inventory;
pub mod items;
pub mod layout;
pub mod logs;
pub mod modal;
pub mod movement;
pub mod snapshot;
pub mod timer;
pub mod ui;
pub mod workbench;

use engine::{Camera2D, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use economy::{Economy, Purchase, ShopItem};
use effects::{EffectContext, Effects};
use environment::Environment;
use interaction::InteractTarget;
use inventory::Inventory;
use items::WorldItemField;
use layout::WorldLayout;
use modal::{ModalUi, Screen};
use movement::{MoveIntent, Player};
use snapshot::{AmbientView, InteractHint, RenderSnapshot, ShopEntry, UiView, WorkbenchView};
use ui::UiHit;
use workbench::Workbench;

/// Intents polled from the input collaborator once per frame. Every flag except the
/// movement keys is a single-frame edge.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MoveIntent,
    pub interact: bool,
    pub toggle_inventory: bool,
    pub cancel: bool,
    /// Pointer in view pixels.
    pub pointer: Option<Vec2>,
    pub primary_click: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldSettings {
    pub width: f32,
    pub height: f32,
    pub item_count: usize,
    pub seed: Option<u64>,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            width: 2400.0,
            height: 1800.0,
            item_count: 24,
            seed: None,
        }
    }
}

pub struct GameState {
    layout: WorldLayout,
    rng: StdRng,
    environment: Environment,
    items: WorldItemField,
    inventory: Inventory,
    player: Player,
    workbench: Workbench,
    economy: Economy,
    modal: ModalUi,
    effects: Effects,
    camera: Camera2D,
    view_size: Vec2,
}

impl GameState {
    pub fn new(settings: &WorldSettings) -> Self {
        let mut rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let layout = WorldLayout::new(settings.width.max(1.0), settings.height.max(1.0));
        let environment = Environment::new(&mut rng);
        let items = WorldItemField::new(settings.item_count, &layout, &mut rng);
        let player = Player::spawn_at(layout.player_spawn);
        let camera = Camera2D {
            position: player.position,
        };
        let mut state = Self {
            layout,
            rng,
            environment,
            items,
            inventory: Inventory::new(),
            player,
            workbench: Workbench::default(),
            economy: Economy::new(),
            modal: ModalUi::default(),
            effects: Effects::new(),
            camera,
            view_size: Vec2::new(ui::VIEW_WIDTH, ui::VIEW_HEIGHT),
        };
        camera::follow(
            &mut state.camera,
            state.player.position,
            0.0,
            &state.layout,
            state.view_size,
        );
        state
    }

    pub fn layout(&self) -> &WorldLayout {
        &self.layout
    }

    pub fn screen(&self) -> Screen {
        self.modal.screen()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// One frame, in fixed order: environment, workbench timer, screen input, movement
    /// and interaction, world items and effects, camera.
    pub fn update(&mut self, dt: f32, input: &FrameInput) {
        let dt = dt.max(0.0);
        self.environment.tick(dt, &mut self.rng);
        self.tick_workbench(dt);
        let screen_before = self.modal.screen();
        self.handle_screen_input(input);
        // A press that already changed the screen this frame does not also interact.
        let screen_changed = self.modal.screen() != screen_before;

        if self.modal.any_open() {
            self.player.halt();
        } else {
            let moved = self.player.step(
                input.movement,
                self.environment.speed_multiplier(),
                dt,
                &self.layout,
            );
            if moved > 0.0 {
                self.effects
                    .record_walk(dt, self.player.position, self.player.facing);
            }
        }
        if input.interact && !screen_changed {
            self.interact();
        }

        let effects = &mut self.effects;
        let layout = &self.layout;
        self.items.tick(dt, &mut self.rng, |index, position| {
            debug_assert!(!layout.in_center_exclusion(position));
            debug!(index, x = position.x, y = position.y, "item_respawned");
            effects.spawn_shimmer(position);
        });
        let context = EffectContext {
            player_moving: self.player.moving,
            storm_intensity: self.environment.storm.intensity(),
            is_night: self.environment.day.is_night(),
            view_center: self.camera.position,
            view_size: self.view_size,
        };
        self.effects.tick(dt, &context, &mut self.rng);
        camera::follow(
            &mut self.camera,
            self.player.position,
            dt,
            &self.layout,
            self.view_size,
        );
    }

    fn tick_workbench(&mut self, dt: f32) {
        match self
            .workbench
            .tick(dt, &mut self.inventory, self.economy.base_repair_bonus())
        {
            Ok(Some(outcome)) => {
                self.effects.trigger_repair_flash();
                info!(
                    slot = outcome.repaired_slot,
                    sacrificed = outcome.sacrificed_slot,
                    bonus = outcome.bonus,
                    condition = outcome.condition,
                    category_match = outcome.category_match,
                    "repair_completed"
                );
            }
            Ok(None) => {}
            Err(err) => debug!(error = %err, "repair_aborted"),
        }
    }

    fn handle_screen_input(&mut self, input: &FrameInput) {
        if input.cancel && self.modal.any_open() {
            self.close_screen();
            return;
        }
        if input.toggle_inventory {
            match self.modal.screen() {
                Screen::None => {
                    self.modal.open_inventory();
                }
                Screen::Inventory => {
                    self.modal.close();
                }
                _ => {}
            }
            return;
        }
        if !input.primary_click {
            return;
        }
        let Some(pointer) = input.pointer else {
            return;
        };
        if let Some(hit) = ui::hit_test(self.modal.screen(), pointer, self.inventory.capacity())
        {
            self.apply_click(hit);
        }
    }

    fn apply_click(&mut self, hit: UiHit) {
        match (self.modal.screen(), hit) {
            (_, UiHit::Close) => self.close_screen(),
            (Screen::Workbench, UiHit::Slot(slot)) => {
                self.workbench.select_slot(slot, &self.inventory);
            }
            (Screen::Workbench, UiHit::Repair) => {
                match self.workbench.start_repair(&self.inventory) {
                    Ok(()) => info!(
                        slot = ?self.workbench.repair_slot(),
                        sacrifice = ?self.workbench.sacrifice_slot(),
                        "repair_started"
                    ),
                    Err(err) => debug!(error = %err, "repair_refused"),
                }
            }
            (Screen::Trade, UiHit::Slot(slot)) => {
                match self.economy.trade_in(slot, &mut self.inventory) {
                    Ok(gained) => {
                        self.effects.trigger_token_popup(gained as i32);
                        info!(slot, tokens = self.economy.tokens(), "item_traded_in");
                    }
                    Err(err) => debug!(error = %err, "trade_refused"),
                }
            }
            (Screen::Trade, UiHit::Shop(item)) => self.purchase(item),
            (Screen::Trade, UiHit::Logs) => {
                let owned = self.economy.data_logs_purchased();
                if owned > 0 {
                    self.modal.open_log_viewer(owned - 1);
                }
            }
            (Screen::LogViewer { entry }, UiHit::PrevLog) => {
                if entry > 0 {
                    self.modal.open_log_viewer(entry - 1);
                }
            }
            (Screen::LogViewer { entry }, UiHit::NextLog) => {
                if entry + 1 < self.economy.data_logs_purchased() {
                    self.modal.open_log_viewer(entry + 1);
                }
            }
            _ => {}
        }
    }

    fn purchase(&mut self, item: ShopItem) {
        let cost = self.economy.cost(item).unwrap_or(0);
        match self.economy.purchase(item, &mut self.inventory) {
            Ok(purchase) => {
                self.effects.trigger_token_popup(-(cost as i32));
                info!(
                    item = item.label(),
                    cost,
                    tokens = self.economy.tokens(),
                    "purchase_completed"
                );
                if let Purchase::DataLog { entry } = purchase {
                    self.modal.open_log_viewer(entry);
                }
            }
            Err(err) => debug!(error = %err, "purchase_refused"),
        }
    }

    fn close_screen(&mut self) {
        if self.modal.screen() == Screen::Workbench {
            if let Err(err) = self.workbench.close() {
                debug!(error = %err, "workbench_close_refused");
                return;
            }
        }
        let closed = self.modal.close();
        debug!(screen = closed.label(), "screen_closed");
    }

    /// Buildings can replace the inventory screen; pickups need the world to be live.
    fn interact(&mut self) {
        let screen = self.modal.screen();
        if !matches!(screen, Screen::None | Screen::Inventory) {
            return;
        }
        let target = interaction::resolve(
            self.player.position,
            &self.layout,
            &self.items,
            self.workbench.is_closed(),
        );
        match target {
            InteractTarget::OpenTrade => {
                if self.modal.open_trade() {
                    info!(tokens = self.economy.tokens(), "trade_opened");
                }
            }
            InteractTarget::OpenWorkbench => {
                if self.modal.open_workbench() {
                    self.workbench.open();
                    info!("workbench_opened");
                }
            }
            InteractTarget::PickUp(index) if screen == Screen::None => self.pick_up(index),
            InteractTarget::PickUp(_) | InteractTarget::Nothing => {}
        }
    }

    fn pick_up(&mut self, index: usize) {
        let Some((type_id, condition)) = self.items.peek_active(index) else {
            return;
        };
        match self.inventory.add(type_id, condition) {
            Ok(slot) => {
                let position = self
                    .items
                    .items()
                    .get(index)
                    .map_or(self.player.position, |item| item.position);
                self.items.pick_up(index, &mut self.rng);
                self.effects.trigger_pickup_flash(position);
                info!(
                    item = type_id.item_type().name,
                    condition,
                    slot,
                    "item_picked_up"
                );
            }
            Err(err) => {
                self.effects.trigger_full_notice();
                debug!(error = %err, "pickup_refused");
            }
        }
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        let day = &self.environment.day;
        let storm = &self.environment.storm;
        let hint = if self.modal.any_open() {
            None
        } else {
            match interaction::resolve(
                self.player.position,
                &self.layout,
                &self.items,
                self.workbench.is_closed(),
            ) {
                InteractTarget::OpenTrade => Some(InteractHint::Trade),
                InteractTarget::OpenWorkbench => Some(InteractHint::Workbench),
                InteractTarget::PickUp(_) => Some(InteractHint::PickUp),
                InteractTarget::Nothing => None,
            }
        };
        RenderSnapshot {
            player: self.player,
            items: self.items.items().to_vec(),
            layout: self.layout.clone(),
            ambient: AmbientView {
                day_phase: day.phase(),
                is_night: day.is_night(),
                tint: day.ambient_tint(),
                shadow_offset: day.shadow_offset(),
                storm_state: storm.state(),
                storm_phase: storm.phase(),
                storm_intensity: storm.intensity(),
                storm_remaining: storm.remaining(),
                storm_state_duration: storm.state_duration(),
                speed_multiplier: storm.speed_multiplier(),
            },
            ui: UiView {
                screen: self.modal.screen(),
                inventory: self.inventory.clone(),
                tokens: self.economy.tokens(),
                workbench: WorkbenchView {
                    state: self.workbench.state(),
                    repair_slot: self.workbench.repair_slot(),
                    sacrifice_slot: self.workbench.sacrifice_slot(),
                    progress: self.workbench.repair_progress(),
                    can_repair: self.workbench.can_repair(&self.inventory),
                },
                shop: ShopItem::ALL
                    .into_iter()
                    .map(|item| ShopEntry {
                        item,
                        cost: self.economy.cost(item),
                        affordable: self.economy.can_afford(item),
                    })
                    .collect(),
                data_logs_purchased: self.economy.data_logs_purchased(),
                base_repair_bonus: self.economy.base_repair_bonus(),
            },
            effects: self.effects.clone(),
            camera: self.camera,
            hint,
        }
    }
}

#[cfg(test)]
mod tests;
