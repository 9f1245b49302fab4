//! Route planning: category tree + store layout -> ordered stop list.
//!
//! Two strategies. Positional sort is the default: stable, O(n log n),
//! orders item-bearing sections by walk rank. Graph search walks the grid
//! from the entrance, greedily visiting the nearest required section via
//! shortest adjacent-cell paths; it is deliberately not TSP-optimal.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use cartpath_common::{CategoryTree, GridPos, ShoppingItem, StoreLayout, TaxonomyTable};

use crate::pathfind::shortest_path;

/// Section-ordering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStrategy {
    /// Sort item-bearing sections by (x + y), then name.
    #[default]
    PositionalSort,
    /// Greedy nearest-next walk over the grid with A* between sections.
    GraphSearch,
}

/// A section the shopper must visit, with the items to collect there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub section_key: String,
    pub name: String,
    pub items: Vec<ShoppingItem>,
}

/// Orders the required sections into a single traversal path.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoutePlanner {
    strategy: PlanStrategy,
}

impl RoutePlanner {
    pub fn new(strategy: PlanStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> PlanStrategy {
        self.strategy
    }

    /// Plan the route. Deterministic for a given tree and layout; an empty
    /// tree yields an empty route.
    pub fn plan(&self, tree: &CategoryTree, taxonomy: &TaxonomyTable, layout: &StoreLayout) -> Vec<Stop> {
        let groups = group_by_section(tree, taxonomy);
        if groups.is_empty() {
            return Vec::new();
        }
        match self.strategy {
            PlanStrategy::PositionalSort => positional_sort(groups, layout),
            PlanStrategy::GraphSearch => graph_search(groups, layout),
        }
    }
}

/// Items grouped by section key, in tree traversal order.
fn group_by_section(tree: &CategoryTree, taxonomy: &TaxonomyTable) -> Vec<(String, Vec<ShoppingItem>)> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<ShoppingItem>> = HashMap::new();

    for main in &tree.mains {
        for sub in &main.subcategories {
            let key = taxonomy.section_key_for(&sub.name);
            if !groups.contains_key(key) {
                order.push(key.to_string());
            }
            groups
                .entry(key.to_string())
                .or_default()
                .extend(sub.items.iter().cloned());
        }
    }

    order
        .into_iter()
        .map(|key| {
            let items = groups.remove(&key).unwrap_or_default();
            (key, items)
        })
        .collect()
}

fn positional_sort(groups: Vec<(String, Vec<ShoppingItem>)>, layout: &StoreLayout) -> Vec<Stop> {
    let mut placed: Vec<(GridPos, Stop)> = Vec::new();
    let mut unplaced: Vec<Stop> = Vec::new();

    for (key, items) in groups {
        match layout.section(&key) {
            Some(section) => placed.push((
                section.position,
                Stop {
                    section_key: key,
                    name: section.name.clone(),
                    items,
                },
            )),
            None => {
                debug!(section = %key, "section not in layout, appending by name");
                unplaced.push(Stop {
                    section_key: key.clone(),
                    name: key,
                    items,
                });
            }
        }
    }

    placed.sort_by(|(a_pos, a), (b_pos, b)| {
        a_pos
            .walk_rank()
            .cmp(&b_pos.walk_rank())
            .then_with(|| a.name.cmp(&b.name))
    });
    unplaced.sort_by(|a, b| a.name.cmp(&b.name));

    placed
        .into_iter()
        .map(|(_, stop)| stop)
        .chain(unplaced)
        .collect()
}

fn graph_search(groups: Vec<(String, Vec<ShoppingItem>)>, layout: &StoreLayout) -> Vec<Stop> {
    // Without grid data there is nothing to search.
    if layout.is_empty() {
        return positional_sort(groups, layout);
    }

    let cells: HashSet<GridPos> = layout.sections.iter().map(|s| s.position).collect();
    let start = match layout.entrance() {
        Some(section) => section.position,
        None => {
            // No declared entrance: start at the section nearest the origin
            // corner, which is where positional sort starts too.
            let mut positions: Vec<GridPos> = cells.iter().copied().collect();
            positions.sort_by_key(|p| (p.walk_rank(), p.x, p.y));
            positions[0]
        }
    };

    // Split the groups into sections we can walk to and leftovers.
    let mut required: Vec<(GridPos, Stop)> = Vec::new();
    let mut leftovers: Vec<(String, Vec<ShoppingItem>)> = Vec::new();
    for (key, items) in groups {
        match layout.section(&key) {
            Some(section) => required.push((
                section.position,
                Stop {
                    section_key: key,
                    name: section.name.clone(),
                    items,
                },
            )),
            None => leftovers.push((key, items)),
        }
    }

    let mut route: Vec<Stop> = Vec::new();
    let mut unreachable: Vec<(GridPos, Stop)> = Vec::new();
    let mut current = start;

    while !required.is_empty() {
        // Nearest unvisited required section; earlier insertion wins ties.
        let Some(nearest) = required
            .iter()
            .enumerate()
            .min_by_key(|(idx, (pos, _))| (current.manhattan(*pos), *idx))
            .map(|(idx, _)| idx)
        else {
            break;
        };
        let (pos, stop) = required.remove(nearest);

        match shortest_path(&cells, current, pos) {
            Some(_) => {
                route.push(stop);
                current = pos;
            }
            None => {
                debug!(section = %stop.section_key, "no grid path to section, deferring");
                unreachable.push((pos, stop));
            }
        }
    }

    // Unreachable sections fall back to positional ordering at the end of
    // the route; sections missing from the layout entirely come last.
    unreachable.sort_by(|(a_pos, a), (b_pos, b)| {
        a_pos
            .walk_rank()
            .cmp(&b_pos.walk_rank())
            .then_with(|| a.name.cmp(&b.name))
    });
    route.extend(unreachable.into_iter().map(|(_, stop)| stop));

    let mut tail: Vec<Stop> = leftovers
        .into_iter()
        .map(|(key, items)| Stop {
            section_key: key.clone(),
            name: key,
            items,
        })
        .collect();
    tail.sort_by(|a, b| a.name.cmp(&b.name));
    route.extend(tail);

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartpath_common::{StoreSection, TaxonomyTable};

    fn item(name: &str) -> ShoppingItem {
        ShoppingItem::new(name, 1)
    }

    /// A@(1,1), B@(2,1), C@(3,1) with one subcategory bound to each.
    fn line_layout() -> StoreLayout {
        StoreLayout::new(vec![
            StoreSection::new("A", "A", 1, 1),
            StoreSection::new("B", "B", 2, 1),
            StoreSection::new("C", "C", 3, 1),
        ])
    }

    fn line_taxonomy() -> TaxonomyTable {
        TaxonomyTable::from_rows(
            &[("SubA", "Main"), ("SubB", "Main"), ("SubC", "Main")],
            &[("SubA", "A"), ("SubB", "B"), ("SubC", "C")],
        )
    }

    #[test]
    fn empty_tree_gives_empty_route() {
        let planner = RoutePlanner::default();
        let stops = planner.plan(&CategoryTree::new(), &line_taxonomy(), &line_layout());
        assert!(stops.is_empty());
    }

    #[test]
    fn positional_sort_orders_by_walk_rank() {
        // Items only in subcategories mapping to B and C; expect [B, C].
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubC", item("three"));
        tree.insert("Main", "SubB", item("two"));

        let planner = RoutePlanner::new(PlanStrategy::PositionalSort);
        let stops = planner.plan(&tree, &line_taxonomy(), &line_layout());
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        assert_eq!(keys, vec!["B", "C"]);
    }

    #[test]
    fn equal_rank_breaks_ties_by_name() {
        let layout = StoreLayout::new(vec![
            StoreSection::new("Zed", "Zed", 1, 1),
            StoreSection::new("Ack", "Ack", 2, 0),
        ]);
        let taxonomy = TaxonomyTable::from_rows(
            &[("SubZ", "Main"), ("SubA", "Main")],
            &[("SubZ", "Zed"), ("SubA", "Ack")],
        );
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubZ", item("z"));
        tree.insert("Main", "SubA", item("a"));

        let stops = RoutePlanner::default().plan(&tree, &taxonomy, &layout);
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        assert_eq!(keys, vec!["Ack", "Zed"]);
    }

    #[test]
    fn unmapped_sections_go_last_by_name() {
        let taxonomy = TaxonomyTable::from_rows(
            &[("SubA", "Main"), ("Weird", "Main"), ("Odd", "Main")],
            &[("SubA", "A"), ("Weird", "ZZ Annex"), ("Odd", "QQ Annex")],
        );
        let mut tree = CategoryTree::new();
        tree.insert("Main", "Weird", item("w"));
        tree.insert("Main", "SubA", item("a"));
        tree.insert("Main", "Odd", item("o"));

        let stops = RoutePlanner::default().plan(&tree, &taxonomy, &line_layout());
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "QQ Annex", "ZZ Annex"]);
    }

    #[test]
    fn planning_is_deterministic() {
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubA", item("a"));
        tree.insert("Main", "SubB", item("b"));
        tree.insert("Main", "SubC", item("c"));

        let planner = RoutePlanner::default();
        let first = planner.plan(&tree, &line_taxonomy(), &line_layout());
        let second = planner.plan(&tree, &line_taxonomy(), &line_layout());
        assert_eq!(first, second);
    }

    #[test]
    fn stop_items_keep_tree_order() {
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubA", item("first"));
        tree.insert("Main", "SubA", item("second"));

        let stops = RoutePlanner::default().plan(&tree, &line_taxonomy(), &line_layout());
        let names: Vec<&str> = stops[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn graph_search_visits_nearest_first() {
        // Entrance at (0,1); nearest required is A, then B, then C.
        let layout = StoreLayout::new(vec![
            StoreSection::new("Entrance", "Entrance", 0, 1),
            StoreSection::new("A", "A", 1, 1),
            StoreSection::new("B", "B", 2, 1),
            StoreSection::new("C", "C", 3, 1),
        ]);
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubC", item("c"));
        tree.insert("Main", "SubA", item("a"));
        tree.insert("Main", "SubB", item("b"));

        let planner = RoutePlanner::new(PlanStrategy::GraphSearch);
        let stops = planner.plan(&tree, &line_taxonomy(), &layout);
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B", "C"]);
    }

    #[test]
    fn graph_search_defers_unreachable_sections() {
        // "Far" is an island the walk cannot reach.
        let layout = StoreLayout::new(vec![
            StoreSection::new("Entrance", "Entrance", 0, 0),
            StoreSection::new("A", "A", 1, 0),
            StoreSection::new("Far", "Far", 9, 9),
        ]);
        let taxonomy = TaxonomyTable::from_rows(
            &[("SubA", "Main"), ("SubF", "Main")],
            &[("SubA", "A"), ("SubF", "Far")],
        );
        let mut tree = CategoryTree::new();
        tree.insert("Main", "SubF", item("f"));
        tree.insert("Main", "SubA", item("a"));

        let planner = RoutePlanner::new(PlanStrategy::GraphSearch);
        let stops = planner.plan(&tree, &taxonomy, &layout);
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        assert_eq!(keys, vec!["A", "Far"]);
    }

    #[test]
    fn graph_search_on_builtin_target_layout() {
        use cartpath_common::{LayoutRegistry, TaxonomyRegistry};

        let taxonomies = TaxonomyRegistry::builtin();
        let layouts = LayoutRegistry::builtin();
        let mut tree = CategoryTree::new();
        tree.insert("Grocery", "Dairy", item("milk"));
        tree.insert("Grocery", "Breakfast", item("cereal"));
        tree.insert("Grocery", "Produce", item("apple"));

        let planner = RoutePlanner::new(PlanStrategy::GraphSearch);
        let stops = planner.plan(
            &tree,
            taxonomies.table_for("Target"),
            layouts.layout_for("Target"),
        );
        let keys: Vec<&str> = stops.iter().map(|s| s.section_key.as_str()).collect();
        // Produce sits right by the entrance, dairy next door; breakfast is
        // the far corner of the serpentine.
        assert_eq!(
            keys,
            vec![
                "Aisle 1: Fresh Produce",
                "Aisle 2: Dairy Products",
                "Aisle 8: Breakfast Foods",
            ]
        );
    }
}
