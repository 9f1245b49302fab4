//! One shopper, one store, one route.
//!
//! The session owns the whole pipeline and re-runs it explicitly whenever
//! its inputs change: new items, a reassignment, a different store or
//! strategy. Every re-run replaces the route and resets progress.

use tracing::info;
use uuid::Uuid;

use cartpath_common::{CategoryTree, LayoutRegistry, ShoppingItem, StoreTables};

use crate::categorize::{Categorized, CategorizationEngine, ClassifyWarning};
use crate::classifier::Classifier;
use crate::planner::{PlanStrategy, RoutePlanner, Stop};
use crate::progress::RouteProgress;

pub struct ShoppingSession<C: Classifier> {
    engine: CategorizationEngine<C>,
    layouts: LayoutRegistry,
    planner: RoutePlanner,
    store: String,
    items: Vec<ShoppingItem>,
    categorized: Categorized,
    progress: RouteProgress,
}

impl<C: Classifier> ShoppingSession<C> {
    pub fn new(classifier: C, tables: StoreTables, store: impl Into<String>) -> Self {
        let mut session = Self {
            engine: CategorizationEngine::new(classifier, tables.taxonomies),
            layouts: tables.layouts,
            planner: RoutePlanner::default(),
            store: store.into(),
            items: Vec::new(),
            categorized: Categorized {
                tree: CategoryTree::new(),
                warnings: Vec::new(),
            },
            progress: RouteProgress::default(),
        };
        session.recompute();
        session
    }

    /// Replace the shopping list and re-run the whole pipeline.
    pub fn set_items(&mut self, items: Vec<ShoppingItem>) {
        self.items = items;
        self.recompute();
    }

    /// Switch stores; the same items are re-categorized against the new
    /// store's tables.
    pub fn set_store(&mut self, store: impl Into<String>) {
        self.store = store.into();
        self.recompute();
    }

    pub fn set_strategy(&mut self, strategy: PlanStrategy) {
        self.planner = RoutePlanner::new(strategy);
        self.replan();
    }

    /// Move an item to a user-chosen category and rebuild the route.
    pub fn reassign(&mut self, item_id: Uuid, to_main: &str, to_sub: &str) {
        let moved = self
            .engine
            .reassign(&mut self.categorized.tree, item_id, to_main, to_sub);
        if let Some(moved) = moved {
            // Keep the override on the backing list so later passes honor it.
            if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
                item.manual_category = moved.manual_category.clone();
            }
            self.replan();
        }
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.categorized.tree
    }

    pub fn warnings(&self) -> &[ClassifyWarning] {
        &self.categorized.warnings
    }

    pub fn route(&self) -> &[Stop] {
        self.progress.path()
    }

    pub fn progress(&self) -> &RouteProgress {
        &self.progress
    }

    /// Mutable access for collect/uncollect/navigation.
    pub fn progress_mut(&mut self) -> &mut RouteProgress {
        &mut self.progress
    }

    /// Full pipeline: categorize, then plan, then reset progress.
    fn recompute(&mut self) {
        self.categorized = self.engine.categorize(&self.items, &self.store);
        self.replan();
    }

    /// Re-plan from the current tree and reset progress.
    fn replan(&mut self) {
        let taxonomy = self.engine.taxonomies().table_for(&self.store);
        let layout = self.layouts.layout_for(&self.store);
        let path = self.planner.plan(&self.categorized.tree, taxonomy, layout);
        info!(
            store = %self.store,
            stops = path.len(),
            items = self.categorized.tree.item_count(),
            "route replanned"
        );
        self.progress.replace_path(path);
    }
}
