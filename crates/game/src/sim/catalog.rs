use engine::Rgba;
use rand::Rng;
use serde::Serialize;

/// Items at or above this condition can be traded for a token at the gate.
pub const TRADE_THRESHOLD: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ItemCategory {
    Electronics,
    Power,
    Optics,
    Structural,
}

impl ItemCategory {
    pub const ALL: [ItemCategory; 4] = [
        ItemCategory::Electronics,
        ItemCategory::Power,
        ItemCategory::Optics,
        ItemCategory::Structural,
    ];

    const fn index(self) -> usize {
        match self {
            ItemCategory::Electronics => 0,
            ItemCategory::Power => 1,
            ItemCategory::Optics => 2,
            ItemCategory::Structural => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Electronics => "ELECTRONICS",
            ItemCategory::Power => "POWER",
            ItemCategory::Optics => "OPTICS",
            ItemCategory::Structural => "STRUCTURAL",
        }
    }

    pub fn shape(self) -> ItemShape {
        CATEGORY_SHAPES[self.index()]
    }
}

/// Silhouette used to draw an item, looked up per category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ItemShape {
    Board { width: f32, height: f32 },
    Cell { radius: f32 },
    Lens { radius: f32, rim: f32 },
    Strut { length: f32, thickness: f32 },
}

const CATEGORY_SHAPES: [ItemShape; 4] = [
    ItemShape::Board {
        width: 18.0,
        height: 12.0,
    },
    ItemShape::Cell { radius: 7.0 },
    ItemShape::Lens {
        radius: 8.0,
        rim: 2.0,
    },
    ItemShape::Strut {
        length: 22.0,
        thickness: 5.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemType {
    pub name: &'static str,
    pub category: ItemCategory,
    pub color: Rgba,
}

pub const ITEM_TYPES: [ItemType; 5] = [
    ItemType {
        name: "CIRCUIT BOARD",
        category: ItemCategory::Electronics,
        color: [64, 168, 96, 255],
    },
    ItemType {
        name: "RADIO MODULE",
        category: ItemCategory::Electronics,
        color: [92, 128, 176, 255],
    },
    ItemType {
        name: "BATTERY CELL",
        category: ItemCategory::Power,
        color: [214, 178, 52, 255],
    },
    ItemType {
        name: "LENS ARRAY",
        category: ItemCategory::Optics,
        color: [132, 206, 222, 255],
    },
    ItemType {
        name: "STEEL STRUT",
        category: ItemCategory::Structural,
        color: [150, 140, 132, 255],
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ItemTypeId(pub usize);

impl ItemTypeId {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self(rng.gen_range(0..ITEM_TYPES.len()))
    }

    pub fn item_type(self) -> &'static ItemType {
        &ITEM_TYPES[self.0 % ITEM_TYPES.len()]
    }

    pub fn category(self) -> ItemCategory {
        self.item_type().category
    }
}

pub fn is_trade_eligible(condition: f32) -> bool {
    condition >= TRADE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn trade_threshold_is_inclusive() {
        assert!(is_trade_eligible(0.8));
        assert!(!is_trade_eligible(0.79999));
        assert!(is_trade_eligible(1.0));
    }

    #[test]
    fn every_category_has_at_least_one_item_type() {
        for category in ItemCategory::ALL {
            assert!(
                ITEM_TYPES.iter().any(|item| item.category == category),
                "no item type for {category:?}"
            );
        }
    }

    #[test]
    fn shape_table_is_indexed_by_category() {
        assert!(matches!(
            ItemCategory::Power.shape(),
            ItemShape::Cell { .. }
        ));
        assert!(matches!(
            ItemCategory::Structural.shape(),
            ItemShape::Strut { .. }
        ));
    }

    #[test]
    fn random_ids_stay_inside_the_table() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(ItemTypeId::random(&mut rng).0 < ITEM_TYPES.len());
        }
    }

    #[test]
    fn out_of_range_id_wraps_instead_of_panicking() {
        assert_eq!(ItemTypeId(7).item_type().name, ITEM_TYPES[2].name);
    }
}
