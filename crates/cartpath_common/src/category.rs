//! Two-level category tree produced by each categorization pass.
//!
//! The tree is rebuilt wholesale on every pass; nodes are created lazily on
//! insert and pruned as soon as they hold no items, so consumers never see
//! an empty subcategory.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::item::ShoppingItem;

/// Finer-grained bucket inside a main category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCategory {
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

/// Top-level department grouping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainCategory {
    pub name: String,
    pub subcategories: Vec<SubCategory>,
}

/// Insertion-ordered main -> sub -> items tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub mains: Vec<MainCategory>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item under (main, sub), creating the nodes if absent.
    pub fn insert(&mut self, main: &str, sub: &str, item: ShoppingItem) {
        let main_node = match self.mains.iter_mut().position(|m| m.name == main) {
            Some(idx) => &mut self.mains[idx],
            None => {
                self.mains.push(MainCategory {
                    name: main.to_string(),
                    subcategories: Vec::new(),
                });
                self.mains.last_mut().unwrap()
            }
        };

        let sub_node = match main_node.subcategories.iter_mut().position(|s| s.name == sub) {
            Some(idx) => &mut main_node.subcategories[idx],
            None => {
                main_node.subcategories.push(SubCategory {
                    name: sub.to_string(),
                    items: Vec::new(),
                });
                main_node.subcategories.last_mut().unwrap()
            }
        };

        sub_node.items.push(item);
    }

    /// Remove an item by id, pruning any node left empty.
    pub fn remove(&mut self, item_id: Uuid) -> Option<ShoppingItem> {
        let mut removed = None;
        'outer: for main in &mut self.mains {
            for sub in &mut main.subcategories {
                if let Some(idx) = sub.items.iter().position(|i| i.id == item_id) {
                    removed = Some(sub.items.remove(idx));
                    break 'outer;
                }
            }
        }
        if removed.is_some() {
            for main in &mut self.mains {
                main.subcategories.retain(|s| !s.items.is_empty());
            }
            self.mains.retain(|m| !m.subcategories.is_empty());
        }
        removed
    }

    /// Locate an item, returning its (main, sub) labels.
    pub fn find(&self, item_id: Uuid) -> Option<(&str, &str)> {
        for main in &self.mains {
            for sub in &main.subcategories {
                if sub.items.iter().any(|i| i.id == item_id) {
                    return Some((main.name.as_str(), sub.name.as_str()));
                }
            }
        }
        None
    }

    /// All items in traversal order (mains, then subs, then items).
    pub fn flatten(&self) -> Vec<ShoppingItem> {
        self.mains
            .iter()
            .flat_map(|m| m.subcategories.iter())
            .flat_map(|s| s.items.iter().cloned())
            .collect()
    }

    pub fn item_count(&self) -> usize {
        self.mains
            .iter()
            .flat_map(|m| m.subcategories.iter())
            .map(|s| s.items.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }
}

/// Emoji for a main category.
pub fn main_category_emoji(name: &str) -> &'static str {
    match name {
        "Grocery" => "🛒",
        "Personal Care" => "🧴",
        "Health or Pharmacy" => "💊",
        "Household Essentials" => "🏠",
        "Furniture" => "🛋️",
        "School & Office Supplies" => "✏️",
        "Outdoor Living & Garden" => "🌳",
        "Baby" => "👶",
        "Pets" => "🐶",
        "Sports & Outdoors" => "⚽️",
        _ => "🔖",
    }
}

/// Emoji for a subcategory.
pub fn subcategory_emoji(name: &str) -> &'static str {
    match name {
        "Candy & Confectionery" => "🍬",
        "Dairy" => "🥛",
        "Snacks" | "Popcorn & Puffed Snacks" => "🍿",
        "Produce" => "🍎",
        "Water & Sparkling Water" => "💧",
        "Bakery" => "🥖",
        "Frozen Foods" => "🧊",
        "Meat & Poultry" => "🍗",
        "Spices & Seasonings" => "🧂",
        "Coffee & Tea" => "☕️",
        "Condiments & Sauces" | "Spreads & Syrups" => "🍯",
        "International Foods" | "Prepared Foods" => "🍱",
        "Baking Supplies" => "🥧",
        "Seafood" => "🐟",
        "Pasta, Rice & Grains" => "🍚",
        "Canned & Jarred Goods" => "🥫",
        "Cooking Fats & Oils" => "🧈",
        "Non-Alcoholic Beverages" | "Functional Beverages" => "🧃",
        "Breakfast" => "🥞",
        "Soda & Soft Drinks" | "Protein & Meal Replacements" => "🥤",
        "Desserts" => "🍰",
        "Alcoholic Beverages" => "🍺",
        "Chips & Fries" => "🍟",
        "Soups & Broths" => "🥣",
        "Juices & Smoothies" => "🍹",
        "Drink Mixes & Powders" => "🧋",
        "Jerky & Dried Meats" => "🥓",
        "Beans & Legumes" => "🌮",
        "Granola & Energy Bars" => "🍫",
        "Nuts & Seeds" => "🥜",
        "Health & Wellness" | "Pharmacy" | "Vitamins & Supplements" => "💊",
        "Bath & Body" => "🛀",
        "Household Cleaning" => "🧹",
        "Household Appliances" => "🔌",
        "Furniture" => "🛋️",
        "Office Supplies" => "✏️",
        "Gardening Supplies" => "🌱",
        "Baby Products" => "🍼",
        "Pet Supplies" => "🐶",
        "Sports & Outdoors" => "⚽️",
        _ => "🔖",
    }
}
