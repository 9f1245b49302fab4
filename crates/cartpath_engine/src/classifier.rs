//! Classifier capability: normalized item name in, subcategory label out.
//!
//! The engine only sees the trait, so the keyword table below and a
//! statistical model are interchangeable. Keyword entries are singular
//! lemmas because predict() receives normalizer output.

use std::collections::HashSet;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("no known label for '{0}'")]
    Unrecognized(String),

    #[error("classifier backend unavailable: {0}")]
    Backend(String),
}

/// Text-to-subcategory capability. May be slow (a model call); the engine
/// treats failures as soft and substitutes "Other".
pub trait Classifier {
    fn predict(&self, normalized: &str) -> Result<String, ClassifyError>;
}

/// Deterministic keyword classifier.
///
/// Each subcategory carries a keyword set; the label with the most token
/// hits wins, table order breaking ties. Tokens that miss every set are
/// retried as substring matches so "milkshake" still lands near "milk".
pub struct KeywordClassifier {
    table: Vec<(&'static str, HashSet<&'static str>)>,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        let table = KEYWORD_ROWS
            .iter()
            .map(|(label, words)| (*label, words.iter().copied().collect()))
            .collect();
        Self { table }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.iter().map(|(label, _)| *label)
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for KeywordClassifier {
    fn predict(&self, normalized: &str) -> Result<String, ClassifyError> {
        let tokens: Vec<&str> = normalized.split(' ').filter(|t| !t.is_empty()).collect();
        if tokens.is_empty() {
            return Err(ClassifyError::Unrecognized(normalized.to_string()));
        }

        let mut best: Option<(&'static str, usize)> = None;
        for (label, words) in &self.table {
            let hits = tokens.iter().filter(|t| words.contains(**t)).count();
            if hits > 0 && best.map_or(true, |(_, b)| hits > b) {
                best = Some((label, hits));
            }
        }

        if best.is_none() {
            // Substring pass for compound names the token pass missed.
            for (label, words) in &self.table {
                if words.iter().any(|w| w.len() >= 4 && normalized.contains(w)) {
                    best = Some((label, 1));
                    break;
                }
            }
        }

        match best {
            Some((label, _)) => Ok(label.to_string()),
            None => Err(ClassifyError::Unrecognized(normalized.to_string())),
        }
    }
}

/// Keyword table, ordered by tie-break priority. Labels must exist in the
/// taxonomy tables or classified items would fall through to "Other".
const KEYWORD_ROWS: &[(&str, &[&str])] = &[
    (
        "Produce",
        &[
            "apple", "banana", "carrot", "lettuce", "tomato", "onion", "potato", "broccoli",
            "spinach", "grape", "orange", "lemon", "lime", "avocado", "cucumber", "pepper",
            "celery", "berry", "strawberry", "blueberry", "mushroom", "garlic", "kale",
        ],
    ),
    (
        "Dairy",
        &[
            "milk", "cheese", "yogurt", "butter", "cream", "egg", "cheddar", "mozzarella",
            "parmesan", "kefir",
        ],
    ),
    (
        "Bakery",
        &["bread", "bagel", "muffin", "croissant", "roll", "bun", "baguette", "tortilla"],
    ),
    (
        "Meat & Poultry",
        &["chicken", "beef", "pork", "turkey", "ham", "sausage", "bacon", "steak", "lamb"],
    ),
    (
        "Seafood",
        &["salmon", "shrimp", "tuna", "fish", "crab", "lobster", "tilapia", "cod"],
    ),
    (
        "Frozen Foods",
        &["frozen", "pizza", "waffle", "popsicle"],
    ),
    (
        "Breakfast",
        &["cereal", "oatmeal", "granola", "pancake", "syrup"],
    ),
    (
        "Pasta, Rice & Grains",
        &["pasta", "rice", "spaghetti", "noodle", "macaroni", "quinoa", "grain"],
    ),
    (
        "Canned & Jarred Goods",
        &["canned", "can", "jar", "olive", "pickle"],
    ),
    (
        "Soups & Broths",
        &["soup", "broth", "stock", "ramen"],
    ),
    (
        "Beans & Legumes",
        &["bean", "lentil", "chickpea"],
    ),
    (
        "Baking Supplies",
        &["flour", "sugar", "yeast", "baking", "vanilla", "chocolate-chip"],
    ),
    (
        "Spices & Seasonings",
        &["salt", "spice", "cumin", "paprika", "oregano", "cinnamon", "seasoning"],
    ),
    (
        "Cooking Fats & Oils",
        &["oil", "lard", "shortening", "ghee"],
    ),
    (
        "Condiments & Sauces",
        &["ketchup", "mustard", "mayonnaise", "sauce", "salsa", "dressing", "vinegar"],
    ),
    (
        "Coffee & Tea",
        &["coffee", "tea", "espresso", "matcha"],
    ),
    (
        "Soda & Soft Drinks",
        &["soda", "cola", "pop"],
    ),
    (
        "Juices & Smoothies",
        &["juice", "smoothie", "lemonade"],
    ),
    (
        "Water & Sparkling Water",
        &["water", "sparkling", "seltzer"],
    ),
    (
        "Alcoholic Beverages",
        &["beer", "wine", "vodka", "whiskey", "rum", "cider"],
    ),
    (
        "Snacks",
        &["snack", "cracker", "pretzel", "cookie"],
    ),
    (
        "Chips & Fries",
        &["chip", "crisp"],
    ),
    (
        "Popcorn & Puffed Snacks",
        &["popcorn"],
    ),
    (
        "Candy & Confectionery",
        &["candy", "chocolate", "gum", "gummy", "caramel"],
    ),
    (
        "Nuts & Seeds",
        &["almond", "peanut", "cashew", "walnut", "pistachio", "seed"],
    ),
    (
        "Desserts",
        &["cake", "pie", "brownie", "pudding", "dessert"],
    ),
    (
        "Household Cleaning",
        &[
            "detergent", "bleach", "soap", "sponge", "cleaner", "wipe", "disinfectant",
            "towel", "trash", "dish",
        ],
    ),
    (
        "Bath & Body",
        &[
            "shampoo", "conditioner", "toothpaste", "toothbrush", "lotion", "deodorant",
            "razor", "floss", "bodywash",
        ],
    ),
    (
        "Pharmacy",
        &["aspirin", "ibuprofen", "bandage", "medicine", "antacid"],
    ),
    (
        "Vitamins & Supplements",
        &["vitamin", "supplement", "probiotic"],
    ),
    (
        "Baby Products",
        &["diaper", "formula", "pacifier", "baby"],
    ),
    (
        "Pet Supplies",
        &["dog", "cat", "litter", "kibble", "pet"],
    ),
    (
        "Office Supplies",
        &["pen", "pencil", "notebook", "paper", "stapler", "tape"],
    ),
    (
        "Gardening Supplies",
        &["soil", "fertilizer", "seedling", "planter"],
    ),
    (
        "Household Appliances",
        &["blender", "toaster", "kettle", "microwave"],
    ),
    (
        "Sports & Outdoors",
        &["ball", "tent", "racket", "dumbbell"],
    ),
];
