//! A* shortest path over the store grid.
//!
//! Cells are section positions; movement is only between adjacent cells
//! (positions differing by exactly 1 in one axis). Costs are integral, the
//! heuristic is Manhattan distance, and ties break on lower cumulative
//! cost, then insertion order, so results are fully deterministic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use cartpath_common::GridPos;

/// Node in the open-set priority queue.
///
/// Uses reverse ordering so BinaryHeap (max-heap) behaves as a min-heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    pos: GridPos,
    /// f(n) = g(n) + h(n).
    f_score: i32,
    /// g(n) = steps from start.
    g_score: i32,
    /// Push counter, final tie-break.
    order: u64,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then(other.g_score.cmp(&self.g_score))
            .then(other.order.cmp(&self.order))
    }
}

/// Shortest path from `start` to `goal` through occupied cells only.
///
/// Returns the inclusive cell sequence, or None when the grid has a gap the
/// walk cannot cross. `start == goal` yields the single-cell path.
pub fn shortest_path(
    cells: &HashSet<GridPos>,
    start: GridPos,
    goal: GridPos,
) -> Option<Vec<GridPos>> {
    if !cells.contains(&start) || !cells.contains(&goal) {
        return None;
    }
    if start == goal {
        return Some(vec![start]);
    }

    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<GridPos, GridPos> = HashMap::new();
    let mut best_g: HashMap<GridPos, i32> = HashMap::new();
    let mut counter = 0u64;

    best_g.insert(start, 0);
    open.push(OpenNode {
        pos: start,
        f_score: start.manhattan(goal),
        g_score: 0,
        order: counter,
    });

    while let Some(node) = open.pop() {
        if node.pos == goal {
            return Some(rebuild(&came_from, goal));
        }
        // Stale entry: a cheaper route to this cell was already expanded.
        if best_g.get(&node.pos).is_some_and(|g| *g < node.g_score) {
            continue;
        }

        for next in neighbors(node.pos) {
            if !cells.contains(&next) {
                continue;
            }
            let g = node.g_score + 1;
            if best_g.get(&next).map_or(true, |best| g < *best) {
                best_g.insert(next, g);
                came_from.insert(next, node.pos);
                counter += 1;
                open.push(OpenNode {
                    pos: next,
                    f_score: g + next.manhattan(goal),
                    g_score: g,
                    order: counter,
                });
            }
        }
    }

    None
}

fn neighbors(pos: GridPos) -> [GridPos; 4] {
    [
        GridPos::new(pos.x + 1, pos.y),
        GridPos::new(pos.x - 1, pos.y),
        GridPos::new(pos.x, pos.y + 1),
        GridPos::new(pos.x, pos.y - 1),
    ]
}

fn rebuild(came_from: &HashMap<GridPos, GridPos>, goal: GridPos) -> Vec<GridPos> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(prev) = came_from.get(&current) {
        path.push(*prev);
        current = *prev;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[(i32, i32)]) -> HashSet<GridPos> {
        cells.iter().map(|(x, y)| GridPos::new(*x, *y)).collect()
    }

    #[test]
    fn straight_line() {
        let cells = grid(&[(0, 0), (1, 0), (2, 0), (3, 0)]);
        let path = shortest_path(&cells, GridPos::new(0, 0), GridPos::new(3, 0)).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], GridPos::new(0, 0));
        assert_eq!(path[3], GridPos::new(3, 0));
    }

    #[test]
    fn routes_around_a_gap() {
        // (1,0) is missing; the walk has to detour through y=1.
        let cells = grid(&[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        let path = shortest_path(&cells, GridPos::new(0, 0), GridPos::new(2, 0)).unwrap();
        assert_eq!(path.len(), 5);
        for pair in path.windows(2) {
            assert!(pair[0].is_adjacent(pair[1]));
        }
    }

    #[test]
    fn disconnected_cells_have_no_path() {
        let cells = grid(&[(0, 0), (5, 5)]);
        assert!(shortest_path(&cells, GridPos::new(0, 0), GridPos::new(5, 5)).is_none());
    }

    #[test]
    fn start_equals_goal() {
        let cells = grid(&[(2, 2)]);
        let path = shortest_path(&cells, GridPos::new(2, 2), GridPos::new(2, 2)).unwrap();
        assert_eq!(path, vec![GridPos::new(2, 2)]);
    }

    #[test]
    fn endpoints_outside_grid_fail() {
        let cells = grid(&[(0, 0), (1, 0)]);
        assert!(shortest_path(&cells, GridPos::new(0, 0), GridPos::new(9, 9)).is_none());
        assert!(shortest_path(&cells, GridPos::new(9, 9), GridPos::new(0, 0)).is_none());
    }
}
