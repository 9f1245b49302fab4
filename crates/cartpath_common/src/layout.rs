//! Physical store layouts: sections on an integer grid.
//!
//! Positions are store-designer-authored; nothing here is computed at
//! runtime. The built-in Target layout forms a connected serpentine so the
//! graph-search route mode can walk it cell by cell.

use serde::{Deserialize, Serialize};

/// Reserved section key for the store entrance.
pub const ENTRANCE_KEY: &str = "Entrance";

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan(&self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Walk distance from the entrance corner, used for aisle ordering.
    pub fn walk_rank(&self) -> i32 {
        self.x + self.y
    }

    /// Grid adjacency: differ by exactly 1 in one axis and 0 in the other.
    pub fn is_adjacent(&self, other: GridPos) -> bool {
        self.manhattan(other) == 1
    }
}

/// A physical area of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSection {
    /// Key the taxonomy's section mapping points at.
    pub key: String,
    pub name: String,
    pub position: GridPos,
}

impl StoreSection {
    pub fn new(key: impl Into<String>, name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            position: GridPos::new(x, y),
        }
    }
}

/// Ordered section list for one store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreLayout {
    pub sections: Vec<StoreSection>,
}

impl StoreLayout {
    pub fn new(sections: Vec<StoreSection>) -> Self {
        Self { sections }
    }

    pub fn section(&self, key: &str) -> Option<&StoreSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// The entrance section if the layout declares one.
    pub fn entrance(&self) -> Option<&StoreSection> {
        self.section(ENTRANCE_KEY)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Store name -> layout, with a default fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutRegistry {
    layouts: std::collections::HashMap<String, StoreLayout>,
    default_layout: StoreLayout,
}

impl LayoutRegistry {
    /// Registry with the built-in Target layout; the default layout mirrors
    /// it until more stores are surveyed.
    pub fn builtin() -> Self {
        let mut layouts = std::collections::HashMap::new();
        layouts.insert("Target".to_string(), target_layout());
        Self {
            layouts,
            default_layout: target_layout(),
        }
    }

    pub fn empty() -> Self {
        Self {
            layouts: std::collections::HashMap::new(),
            default_layout: StoreLayout::default(),
        }
    }

    pub fn insert(&mut self, store: impl Into<String>, layout: StoreLayout) {
        self.layouts.insert(store.into(), layout);
    }

    /// Layout for a store; unrecognized stores get the default layout.
    pub fn layout_for(&self, store: &str) -> &StoreLayout {
        match self.layouts.get(store) {
            Some(layout) => layout,
            None => {
                tracing::debug!(store, "no layout for store, using default");
                &self.default_layout
            }
        }
    }
}

impl Default for LayoutRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Target floor plan: entrance at the origin, aisles 1-7 along the front,
/// then a serpentine back through 8-12 and the non-grocery aisles.
fn target_layout() -> StoreLayout {
    StoreLayout::new(vec![
        StoreSection::new(ENTRANCE_KEY, "Entrance", 0, 0),
        StoreSection::new("Aisle 1: Fresh Produce", "Fresh Produce", 1, 0),
        StoreSection::new("Aisle 2: Dairy Products", "Dairy Products", 2, 0),
        StoreSection::new("Aisle 3: Meats and Seafood", "Meats and Seafood", 3, 0),
        StoreSection::new("Aisle 4: Bakery", "Bakery", 4, 0),
        StoreSection::new("Aisle 5: Frozen Foods", "Frozen Foods", 5, 0),
        StoreSection::new("Aisle 6: Beverages", "Beverages", 6, 0),
        StoreSection::new("Aisle 7: Snacks", "Snacks", 7, 0),
        StoreSection::new("Aisle 8: Breakfast Foods", "Breakfast Foods", 7, 1),
        StoreSection::new("Aisle 9: Baking Supplies", "Baking Supplies", 6, 1),
        StoreSection::new("Aisle 10: Canned Goods", "Canned Goods", 5, 1),
        StoreSection::new("Aisle 11: Pasta and Rice", "Pasta and Rice", 4, 1),
        StoreSection::new("Aisle 12: International Foods", "International Foods", 3, 1),
        StoreSection::new("Aisle 17: Health and Wellness", "Health and Wellness", 3, 2),
        StoreSection::new("Aisle 18: Baby Products", "Baby Products", 4, 2),
        StoreSection::new("Aisle 19: Pet Supplies", "Pet Supplies", 5, 2),
        StoreSection::new("Aisle 20: Household Essentials", "Household Essentials", 6, 2),
        StoreSection::new("Aisle 30: Other", "Other", 7, 2),
    ])
}
