//! Store-keyed taxonomy tables: subcategory -> main category and
//! subcategory -> store section key.
//!
//! Tables are configuration data. Lookups never fail: unknown stores fall
//! back to the generic table and unknown subcategories resolve to "Other".

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reserved label used for every fallback bucket.
pub const OTHER_LABEL: &str = "Other";

/// Store name used for the generic fallback table.
pub const GENERIC_STORE: &str = "Generic Store";

/// Taxonomy for one store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyTable {
    main_for_sub: HashMap<String, String>,
    section_for_sub: HashMap<String, String>,
}

impl TaxonomyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(main_rows: &[(&str, &str)], section_rows: &[(&str, &str)]) -> Self {
        Self {
            main_for_sub: main_rows
                .iter()
                .map(|(sub, main)| (sub.to_string(), main.to_string()))
                .collect(),
            section_for_sub: section_rows
                .iter()
                .map(|(sub, section)| (sub.to_string(), section.to_string()))
                .collect(),
        }
    }

    pub fn set_main(&mut self, sub: impl Into<String>, main: impl Into<String>) {
        self.main_for_sub.insert(sub.into(), main.into());
    }

    pub fn set_section(&mut self, sub: impl Into<String>, section: impl Into<String>) {
        self.section_for_sub.insert(sub.into(), section.into());
    }

    /// Main category for a subcategory, falling back to "Other".
    pub fn main_category_for(&self, sub: &str) -> &str {
        self.main_for_sub
            .get(sub)
            .map(String::as_str)
            .unwrap_or(OTHER_LABEL)
    }

    /// Section key for a subcategory. Unknown subcategories route to the
    /// table's "Other" section when it has one, else the literal "Other".
    pub fn section_key_for(&self, sub: &str) -> &str {
        match self.section_for_sub.get(sub) {
            Some(section) => section.as_str(),
            None => self
                .section_for_sub
                .get(OTHER_LABEL)
                .map(String::as_str)
                .unwrap_or(OTHER_LABEL),
        }
    }

    /// All known subcategory labels, sorted. Feeds category pickers.
    pub fn subcategories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.main_for_sub.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// All known main category labels, sorted and deduplicated.
    pub fn main_categories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.main_for_sub.values().map(String::as_str).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    pub fn is_empty(&self) -> bool {
        self.main_for_sub.is_empty() && self.section_for_sub.is_empty()
    }
}

/// Store name -> taxonomy table, with a generic fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyRegistry {
    tables: HashMap<String, TaxonomyTable>,
}

impl TaxonomyRegistry {
    /// Registry with the built-in Target and generic tables.
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        tables.insert("Target".to_string(), target_table());
        // The generic table mirrors Target until more stores are surveyed.
        tables.insert(GENERIC_STORE.to_string(), target_table());
        Self { tables }
    }

    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn insert(&mut self, store: impl Into<String>, table: TaxonomyTable) {
        self.tables.insert(store.into(), table);
    }

    /// Table for a store; unrecognized stores resolve to the generic table.
    pub fn table_for(&self, store: &str) -> &TaxonomyTable {
        static EMPTY: once_cell::sync::Lazy<TaxonomyTable> =
            once_cell::sync::Lazy::new(TaxonomyTable::new);
        match self.tables.get(store) {
            Some(table) => table,
            None => {
                tracing::debug!(store, "no taxonomy table for store, using generic");
                self.tables.get(GENERIC_STORE).unwrap_or(&EMPTY)
            }
        }
    }

    pub fn stores(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for TaxonomyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Subcategory labels the classifier can produce.
pub const SUBCATEGORY_LABELS: &[&str] = &[
    "Candy & Confectionery",
    "Dairy",
    "Snacks",
    "Produce",
    "Water & Sparkling Water",
    "Bakery",
    "Frozen Foods",
    "Meat & Poultry",
    "Spices & Seasonings",
    "Coffee & Tea",
    "Condiments & Sauces",
    "International Foods",
    "Baking Supplies",
    "Seafood",
    "Health & Wellness",
    "Pasta, Rice & Grains",
    "Canned & Jarred Goods",
    "Cooking Fats & Oils",
    "Non-Alcoholic Beverages",
    "Breakfast",
    "Soda & Soft Drinks",
    "Desserts",
    "Spreads & Syrups",
    "Alcoholic Beverages",
    "Chips & Fries",
    "Soups & Broths",
    "Juices & Smoothies",
    "Drink Mixes & Powders",
    "Prepared Foods",
    "Jerky & Dried Meats",
    "Protein & Meal Replacements",
    "Beans & Legumes",
    "Functional Beverages",
    "Household Cleaning",
    "Popcorn & Puffed Snacks",
    "Granola & Energy Bars",
    "Nuts & Seeds",
    "Pharmacy",
    "Office Supplies",
    "Vitamins & Supplements",
    "Baby Products",
    "Sports & Outdoors",
    "Household Appliances",
    "Bath & Body",
    "Furniture",
    "Pet Supplies",
    "Gardening Supplies",
];

fn target_table() -> TaxonomyTable {
    TaxonomyTable::from_rows(TARGET_MAIN_ROWS, TARGET_SECTION_ROWS)
}

const TARGET_MAIN_ROWS: &[(&str, &str)] = &[
    // Grocery
    ("Candy & Confectionery", "Grocery"),
    ("Dairy", "Grocery"),
    ("Snacks", "Grocery"),
    ("Produce", "Grocery"),
    ("Water & Sparkling Water", "Grocery"),
    ("Bakery", "Grocery"),
    ("Frozen Foods", "Grocery"),
    ("Meat & Poultry", "Grocery"),
    ("Spices & Seasonings", "Grocery"),
    ("Coffee & Tea", "Grocery"),
    ("Condiments & Sauces", "Grocery"),
    ("International Foods", "Grocery"),
    ("Baking Supplies", "Grocery"),
    ("Seafood", "Grocery"),
    ("Pasta, Rice & Grains", "Grocery"),
    ("Canned & Jarred Goods", "Grocery"),
    ("Cooking Fats & Oils", "Grocery"),
    ("Non-Alcoholic Beverages", "Grocery"),
    ("Breakfast", "Grocery"),
    ("Soda & Soft Drinks", "Grocery"),
    ("Desserts", "Grocery"),
    ("Spreads & Syrups", "Grocery"),
    ("Alcoholic Beverages", "Grocery"),
    ("Chips & Fries", "Grocery"),
    ("Soups & Broths", "Grocery"),
    ("Juices & Smoothies", "Grocery"),
    ("Drink Mixes & Powders", "Grocery"),
    ("Prepared Foods", "Grocery"),
    ("Jerky & Dried Meats", "Grocery"),
    ("Beans & Legumes", "Grocery"),
    ("Functional Beverages", "Grocery"),
    ("Popcorn & Puffed Snacks", "Grocery"),
    ("Granola & Energy Bars", "Grocery"),
    ("Nuts & Seeds", "Grocery"),
    // Personal Care
    ("Protein & Meal Replacements", "Personal Care"),
    ("Bath & Body", "Personal Care"),
    // Health or Pharmacy
    ("Health & Wellness", "Health or Pharmacy"),
    ("Pharmacy", "Health or Pharmacy"),
    ("Vitamins & Supplements", "Health or Pharmacy"),
    // Household Essentials and friends
    ("Household Cleaning", "Household Essentials"),
    ("Household Appliances", "Household Essentials"),
    ("Furniture", "Furniture"),
    ("Office Supplies", "School & Office Supplies"),
    ("Gardening Supplies", "Outdoor Living & Garden"),
    // Baby
    ("Baby Products", "Baby"),
    // Pets
    ("Pet Supplies", "Pets"),
    // Sports & Outdoors
    ("Sports & Outdoors", "Sports & Outdoors"),
    // Other
    ("Other", "Other"),
];

const TARGET_SECTION_ROWS: &[(&str, &str)] = &[
    ("Produce", "Aisle 1: Fresh Produce"),
    ("Dairy", "Aisle 2: Dairy Products"),
    ("Meat & Poultry", "Aisle 3: Meats and Seafood"),
    ("Seafood", "Aisle 3: Meats and Seafood"),
    ("Bakery", "Aisle 4: Bakery"),
    ("Desserts", "Aisle 4: Bakery"),
    ("Frozen Foods", "Aisle 5: Frozen Foods"),
    ("Water & Sparkling Water", "Aisle 6: Beverages"),
    ("Juices & Smoothies", "Aisle 6: Beverages"),
    ("Soda & Soft Drinks", "Aisle 6: Beverages"),
    ("Alcoholic Beverages", "Aisle 6: Beverages"),
    ("Non-Alcoholic Beverages", "Aisle 6: Beverages"),
    ("Functional Beverages", "Aisle 6: Beverages"),
    ("Drink Mixes & Powders", "Aisle 6: Beverages"),
    ("Coffee & Tea", "Aisle 6: Beverages"),
    ("Snacks", "Aisle 7: Snacks"),
    ("Candy & Confectionery", "Aisle 7: Snacks"),
    ("Chips & Fries", "Aisle 7: Snacks"),
    ("Popcorn & Puffed Snacks", "Aisle 7: Snacks"),
    ("Granola & Energy Bars", "Aisle 7: Snacks"),
    ("Nuts & Seeds", "Aisle 7: Snacks"),
    ("Jerky & Dried Meats", "Aisle 7: Snacks"),
    ("Breakfast", "Aisle 8: Breakfast Foods"),
    ("Spreads & Syrups", "Aisle 8: Breakfast Foods"),
    ("Baking Supplies", "Aisle 9: Baking Supplies"),
    ("Cooking Fats & Oils", "Aisle 9: Baking Supplies"),
    ("Spices & Seasonings", "Aisle 9: Baking Supplies"),
    ("Canned & Jarred Goods", "Aisle 10: Canned Goods"),
    ("Soups & Broths", "Aisle 10: Canned Goods"),
    ("Beans & Legumes", "Aisle 10: Canned Goods"),
    ("Pasta, Rice & Grains", "Aisle 11: Pasta and Rice"),
    ("Condiments & Sauces", "Aisle 11: Pasta and Rice"),
    ("International Foods", "Aisle 12: International Foods"),
    ("Prepared Foods", "Aisle 12: International Foods"),
    ("Health & Wellness", "Aisle 17: Health and Wellness"),
    ("Vitamins & Supplements", "Aisle 17: Health and Wellness"),
    ("Pharmacy", "Aisle 17: Health and Wellness"),
    ("Protein & Meal Replacements", "Aisle 17: Health and Wellness"),
    ("Bath & Body", "Aisle 17: Health and Wellness"),
    ("Baby Products", "Aisle 18: Baby Products"),
    ("Pet Supplies", "Aisle 19: Pet Supplies"),
    ("Household Cleaning", "Aisle 20: Household Essentials"),
    ("Household Appliances", "Aisle 20: Household Essentials"),
    ("Other", "Aisle 30: Other"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subcategory_maps_to_main() {
        let registry = TaxonomyRegistry::builtin();
        let table = registry.table_for("Target");
        assert_eq!(table.main_category_for("Dairy"), "Grocery");
        assert_eq!(table.main_category_for("Bath & Body"), "Personal Care");
    }

    #[test]
    fn unknown_subcategory_falls_back_to_other() {
        let registry = TaxonomyRegistry::builtin();
        let table = registry.table_for("Target");
        assert_eq!(table.main_category_for("Xyzzy"), OTHER_LABEL);
        assert_eq!(table.section_key_for("Xyzzy"), "Aisle 30: Other");
    }

    #[test]
    fn unknown_store_resolves_to_generic_table() {
        let registry = TaxonomyRegistry::builtin();
        let table = registry.table_for("Corner Bodega");
        assert_eq!(table.main_category_for("Produce"), "Grocery");
    }

    #[test]
    fn empty_registry_still_answers() {
        let registry = TaxonomyRegistry::empty();
        let table = registry.table_for("Target");
        assert_eq!(table.main_category_for("Dairy"), OTHER_LABEL);
        assert_eq!(table.section_key_for("Dairy"), OTHER_LABEL);
    }

    #[test]
    fn every_classifier_label_has_a_main_category() {
        let registry = TaxonomyRegistry::builtin();
        let table = registry.table_for("Target");
        for label in SUBCATEGORY_LABELS {
            assert_ne!(
                table.main_category_for(label),
                OTHER_LABEL,
                "label '{label}' is unmapped"
            );
        }
    }

    #[test]
    fn subcategories_are_sorted() {
        let registry = TaxonomyRegistry::builtin();
        let labels = registry.table_for("Target").subcategories();
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(labels, sorted);
        assert!(labels.contains(&"Dairy"));
    }
}
