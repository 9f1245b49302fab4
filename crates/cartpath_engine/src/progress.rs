//! Collection progress over a planned route.
//!
//! Explicit state machine replacing the original's observe-and-react
//! pattern: the auto-advance check runs inside collect/uncollect, so there
//! is no ordering ambiguity between "item toggled" and "index advanced".

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::planner::Stop;

/// Where the shopper is in the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressState {
    /// Nothing collected yet (or no route at all).
    NotStarted,
    InProgress,
    /// Every item across every stop is collected.
    Complete,
}

/// Route plus collection state. Replaced wholesale whenever the underlying
/// item set changes; progress is never reconciled across route changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteProgress {
    path: Vec<Stop>,
    current: usize,
    collected: HashSet<Uuid>,
}

impl RouteProgress {
    pub fn new(path: Vec<Stop>) -> Self {
        Self {
            path,
            current: 0,
            collected: HashSet::new(),
        }
    }

    pub fn path(&self) -> &[Stop] {
        &self.path
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_stop(&self) -> Option<&Stop> {
        self.path.get(self.current)
    }

    pub fn stop_index_of(&self, section_key: &str) -> Option<usize> {
        self.path.iter().position(|s| s.section_key == section_key)
    }

    pub fn is_collected(&self, item_id: Uuid) -> bool {
        self.collected.contains(&item_id)
    }

    pub fn is_complete(&self) -> bool {
        !self.path.is_empty()
            && self
                .path
                .iter()
                .flat_map(|s| s.items.iter())
                .all(|i| self.collected.contains(&i.id))
    }

    pub fn state(&self) -> ProgressState {
        if self.is_complete() {
            ProgressState::Complete
        } else if self.collected.is_empty() {
            ProgressState::NotStarted
        } else {
            ProgressState::InProgress
        }
    }

    /// Mark an item as collected. Ids outside the route are a logged no-op.
    /// Advances the current stop when it becomes fully collected.
    pub fn collect(&mut self, item_id: Uuid) {
        if !self.contains(item_id) {
            debug!(%item_id, "collect for item not on route, ignoring");
            return;
        }
        self.collected.insert(item_id);
        self.auto_advance();
    }

    /// Un-mark an item. Exact inverse of collect: applying both restores
    /// the prior collected set (the index keeps any ground already gained).
    pub fn uncollect(&mut self, item_id: Uuid) {
        if !self.contains(item_id) {
            debug!(%item_id, "uncollect for item not on route, ignoring");
            return;
        }
        self.collected.remove(&item_id);
        self.auto_advance();
    }

    /// Manual navigation, clamped to the path.
    pub fn move_next(&mut self) {
        if self.current + 1 < self.path.len() {
            self.current += 1;
        }
    }

    pub fn move_previous(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    /// Swap in a new route. Progress is reset completely; a changed route
    /// has no meaningful carried-over progress.
    pub fn replace_path(&mut self, path: Vec<Stop>) {
        self.path = path;
        self.current = 0;
        self.collected.clear();
    }

    fn contains(&self, item_id: Uuid) -> bool {
        self.path
            .iter()
            .flat_map(|s| s.items.iter())
            .any(|i| i.id == item_id)
    }

    /// Skip past fully-collected stops, stopping at the last index.
    fn auto_advance(&mut self) {
        while self.current + 1 < self.path.len() && self.stop_cleared(self.current) {
            self.current += 1;
        }
    }

    fn stop_cleared(&self, index: usize) -> bool {
        self.path[index]
            .items
            .iter()
            .all(|i| self.collected.contains(&i.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartpath_common::ShoppingItem;

    fn stop(key: &str, items: &[&ShoppingItem]) -> Stop {
        Stop {
            section_key: key.to_string(),
            name: key.to_string(),
            items: items.iter().map(|i| (*i).clone()).collect(),
        }
    }

    #[test]
    fn auto_advance_waits_for_full_stop() {
        let x = ShoppingItem::new("x", 1);
        let y = ShoppingItem::new("y", 1);
        let z = ShoppingItem::new("z", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&x, &y]), stop("two", &[&z])]);

        progress.collect(x.id);
        assert_eq!(progress.current_index(), 0);

        progress.collect(y.id);
        assert_eq!(progress.current_index(), 1);
        assert!(!progress.is_complete());

        progress.collect(z.id);
        assert!(progress.is_complete());
        assert_eq!(progress.state(), ProgressState::Complete);
    }

    #[test]
    fn advance_skips_already_cleared_stops() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let c = ShoppingItem::new("c", 1);
        let mut progress =
            RouteProgress::new(vec![stop("one", &[&a]), stop("two", &[&b]), stop("three", &[&c])]);

        // Clear the second stop before the first.
        progress.collect(b.id);
        assert_eq!(progress.current_index(), 0);

        // Clearing the first now jumps straight to the third.
        progress.collect(a.id);
        assert_eq!(progress.current_index(), 2);
    }

    #[test]
    fn index_clamps_at_last_stop() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&a]), stop("two", &[&b])]);

        progress.collect(a.id);
        progress.collect(b.id);
        assert_eq!(progress.current_index(), 1);

        progress.move_next();
        assert_eq!(progress.current_index(), 1);
    }

    #[test]
    fn toggle_cancels_out() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&a, &b])]);

        progress.collect(a.id);
        let before: Vec<bool> = [a.id, b.id].iter().map(|id| progress.is_collected(*id)).collect();

        progress.collect(b.id);
        progress.uncollect(b.id);
        let after: Vec<bool> = [a.id, b.id].iter().map(|id| progress.is_collected(*id)).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let a = ShoppingItem::new("a", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&a])]);

        progress.collect(Uuid::new_v4());
        progress.uncollect(Uuid::new_v4());
        assert_eq!(progress.state(), ProgressState::NotStarted);
        assert_eq!(progress.current_index(), 0);
    }

    #[test]
    fn manual_moves_clamp_and_keep_collection() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&a]), stop("two", &[&b])]);

        progress.move_previous();
        assert_eq!(progress.current_index(), 0);
        progress.move_next();
        assert_eq!(progress.current_index(), 1);
        progress.move_next();
        assert_eq!(progress.current_index(), 1);
        assert_eq!(progress.state(), ProgressState::NotStarted);
    }

    #[test]
    fn replace_path_resets_everything() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let mut progress = RouteProgress::new(vec![stop("one", &[&a]), stop("two", &[&b])]);
        progress.collect(a.id);
        assert_eq!(progress.current_index(), 1);

        let c = ShoppingItem::new("c", 1);
        progress.replace_path(vec![stop("fresh", &[&c])]);
        assert_eq!(progress.current_index(), 0);
        assert_eq!(progress.current_stop().unwrap().section_key, "fresh");
        assert!(!progress.is_collected(a.id));
        assert_eq!(progress.state(), ProgressState::NotStarted);
    }

    #[test]
    fn empty_path_is_not_started() {
        let progress = RouteProgress::new(Vec::new());
        assert_eq!(progress.state(), ProgressState::NotStarted);
        assert!(progress.current_stop().is_none());
        assert!(!progress.is_complete());
    }

    #[test]
    fn stop_index_lookup() {
        let a = ShoppingItem::new("a", 1);
        let b = ShoppingItem::new("b", 1);
        let progress = RouteProgress::new(vec![stop("one", &[&a]), stop("two", &[&b])]);
        assert_eq!(progress.stop_index_of("two"), Some(1));
        assert_eq!(progress.stop_index_of("nine"), None);
    }
}
