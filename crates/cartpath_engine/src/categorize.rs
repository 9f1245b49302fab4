//! Item categorization: override first, classifier second, "Other" last.
//!
//! Classification failures never abort a pass; the item lands in
//! ("Other", "Other") and the failure is reported as a warning alongside
//! the tree.

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use cartpath_common::{
    CategoryTree, ShoppingItem, CategoryOverride, TaxonomyRegistry, TextNormalizer, OTHER_LABEL,
};

use crate::classifier::Classifier;

/// Soft diagnostic emitted when an item could not be classified.
#[derive(Debug, Clone)]
pub struct ClassifyWarning {
    pub item_id: Uuid,
    pub item_name: String,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// Result of one categorization pass.
#[derive(Debug, Clone)]
pub struct Categorized {
    pub tree: CategoryTree,
    pub warnings: Vec<ClassifyWarning>,
}

/// Resolves each item to a (main, sub) pair and builds the category tree.
pub struct CategorizationEngine<C: Classifier> {
    classifier: C,
    normalizer: TextNormalizer,
    taxonomies: TaxonomyRegistry,
}

impl<C: Classifier> CategorizationEngine<C> {
    pub fn new(classifier: C, taxonomies: TaxonomyRegistry) -> Self {
        Self {
            classifier,
            normalizer: TextNormalizer::new(),
            taxonomies,
        }
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn taxonomies(&self) -> &TaxonomyRegistry {
        &self.taxonomies
    }

    /// Categorize every item for the given store. Items are processed in
    /// input order, so the output tree is deterministic for a deterministic
    /// classifier.
    pub fn categorize(&self, items: &[ShoppingItem], store: &str) -> Categorized {
        let table = self.taxonomies.table_for(store);
        let mut tree = CategoryTree::new();
        let mut warnings = Vec::new();

        for item in items {
            if let Some(ov) = &item.manual_category {
                tree.insert(&ov.main, &ov.sub, item.clone());
                continue;
            }

            let normalized = self.normalizer.normalize(&item.name);
            let sub = match self.classifier.predict(&normalized) {
                Ok(label) => label,
                Err(err) => {
                    warn!(item = %item.name, %err, "classification failed, using Other");
                    warnings.push(ClassifyWarning {
                        item_id: item.id,
                        item_name: item.name.clone(),
                        reason: err.to_string(),
                        at: Utc::now(),
                    });
                    OTHER_LABEL.to_string()
                }
            };
            let main = table.main_category_for(&sub).to_string();
            tree.insert(&main, &sub, item.clone());
        }

        Categorized { tree, warnings }
    }

    /// Move an item to a user-chosen (main, sub) pair. The override sticks
    /// to the returned item, so later passes honor it. Unknown ids are a
    /// logged no-op.
    pub fn reassign(
        &self,
        tree: &mut CategoryTree,
        item_id: Uuid,
        to_main: &str,
        to_sub: &str,
    ) -> Option<ShoppingItem> {
        let mut item = match tree.remove(item_id) {
            Some(item) => item,
            None => {
                warn!(%item_id, "reassign for item not in tree, ignoring");
                return None;
            }
        };
        item.manual_category = Some(CategoryOverride {
            main: to_main.to_string(),
            sub: to_sub.to_string(),
        });
        tree.insert(to_main, to_sub, item.clone());
        Some(item)
    }
}
