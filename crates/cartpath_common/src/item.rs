//! Shopping items as the engine sees them.
//!
//! Items are created, renamed and deleted by the list-editing layer; the
//! engine only reads them and annotates the manual category override.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-chosen (main, sub) assignment that takes precedence over
/// automatic classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    pub main: String,
    pub sub: String,
}

/// One entry on the shopping list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: Uuid,
    pub name: String,
    /// Units to collect, at least 1.
    pub quantity: u32,
    /// Set when the user reassigned the item by hand.
    pub manual_category: Option<CategoryOverride>,
}

impl ShoppingItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: quantity.max(1),
            manual_category: None,
        }
    }

    /// Item pre-assigned to a category, bypassing classification.
    pub fn with_override(
        name: impl Into<String>,
        quantity: u32,
        main: impl Into<String>,
        sub: impl Into<String>,
    ) -> Self {
        let mut item = Self::new(name, quantity);
        item.manual_category = Some(CategoryOverride {
            main: main.into(),
            sub: sub.into(),
        });
        item
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }
}

/// Identity comparison, matching list semantics: renaming an item does not
/// make it a different item.
impl PartialEq for ShoppingItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ShoppingItem {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_is_clamped_to_one() {
        let item = ShoppingItem::new("milk", 0);
        assert_eq!(item.quantity, 1);

        let mut item = ShoppingItem::new("eggs", 12);
        item.set_quantity(0);
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn equality_is_by_id() {
        let a = ShoppingItem::new("milk", 1);
        let mut b = a.clone();
        b.name = "whole milk".to_string();
        assert_eq!(a, b);

        let c = ShoppingItem::new("milk", 1);
        assert_ne!(a, c);
    }

    #[test]
    fn override_constructor_sets_both_fields() {
        let item = ShoppingItem::with_override("soap", 2, "Beauty", "Bath & Body");
        let ov = item.manual_category.unwrap();
        assert_eq!(ov.main, "Beauty");
        assert_eq!(ov.sub, "Bath & Body");
    }
}
