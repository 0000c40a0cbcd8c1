use engine::Vec2;

use super::items::WorldItemField;
use super::layout::{WorldLayout, PICKUP_RADIUS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractTarget {
    OpenTrade,
    OpenWorkbench,
    PickUp(usize),
    Nothing,
}

/// Decides what a single interact press does. Nearby items block both buildings, and the
/// gate wins over the workbench when both are in reach.
pub fn resolve(
    player: Vec2,
    layout: &WorldLayout,
    items: &WorldItemField,
    workbench_closed: bool,
) -> InteractTarget {
    let item_in_reach = items.first_in_range(player, PICKUP_RADIUS);
    if item_in_reach.is_none() && workbench_closed {
        if layout.in_gate_range(player) {
            return InteractTarget::OpenTrade;
        }
        if layout.in_workbench_range(player) {
            return InteractTarget::OpenWorkbench;
        }
    }
    match item_in_reach {
        Some(index) => InteractTarget::PickUp(index),
        None => InteractTarget::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn setup() -> (WorldLayout, WorldItemField) {
        let mut layout = WorldLayout::new(2400.0, 1800.0);
        layout.gate_anchor = Vec2::new(1000.0, 1000.0);
        layout.workbench_anchor = Vec2::new(1040.0, 1000.0);
        let mut rng = StdRng::seed_from_u64(9);
        let mut items = WorldItemField::new(2, &layout, &mut rng);
        items.place_for_test(0, Vec2::new(100.0, 100.0));
        items.place_for_test(1, Vec2::new(120.0, 100.0));
        (layout, items)
    }

    #[test]
    fn gate_beats_workbench_when_both_in_range() {
        let (layout, items) = setup();
        let player = Vec2::new(1020.0, 1000.0);
        assert_eq!(resolve(player, &layout, &items, true), InteractTarget::OpenTrade);
    }

    #[test]
    fn workbench_opens_outside_gate_range() {
        let (layout, items) = setup();
        let player = Vec2::new(1095.0, 1000.0);
        assert_eq!(
            resolve(player, &layout, &items, true),
            InteractTarget::OpenWorkbench
        );
    }

    #[test]
    fn nearby_item_takes_precedence_over_buildings() {
        let (layout, mut items) = setup();
        items.place_for_test(1, Vec2::new(1020.0, 1010.0));
        let player = Vec2::new(1020.0, 1000.0);
        assert_eq!(
            resolve(player, &layout, &items, true),
            InteractTarget::PickUp(1)
        );
    }

    #[test]
    fn buildings_ignored_while_workbench_busy() {
        let (layout, items) = setup();
        let player = Vec2::new(1020.0, 1000.0);
        assert_eq!(resolve(player, &layout, &items, false), InteractTarget::Nothing);
    }

    #[test]
    fn lowest_index_item_is_picked() {
        let (layout, items) = setup();
        let player = Vec2::new(110.0, 100.0);
        assert_eq!(
            resolve(player, &layout, &items, true),
            InteractTarget::PickUp(0)
        );
    }
}
