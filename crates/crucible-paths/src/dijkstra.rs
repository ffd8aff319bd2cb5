//! Unconstrained Dijkstra distance maps, the baseline for the run-limited search.

use std::collections::BinaryHeap;

use crucible_core::Point;

use crate::PathRange;
use crate::pathrange::{NodeRef, PathNode, UNREACHABLE};
use crate::traits::WeightedPather;

impl PathRange {
    /// Compute the cheapest entry-cost distance from `sources` to every cell,
    /// ignoring travel direction and run limits.
    ///
    /// Sources cost 0. Cells whose distance would exceed `max_cost` stay
    /// [`UNREACHABLE`]. Returns the settled cells in non-decreasing cost order.
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Point],
        max_cost: i32,
    ) -> &[PathNode] {
        for v in self.dijkstra_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.dijkstra_results.clear();

        self.dijkstra_generation = self.dijkstra_generation.wrapping_add(1);
        let cur_gen = self.dijkstra_generation;

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.dijkstra_nodes[si];
                n.g = 0;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                open.push(NodeRef { idx: si, cost: 0 });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open || current.cost > cn.g {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let cp = self.point(ci);
            self.dijkstra_results.push(PathNode {
                pos: cp,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current_g.saturating_add(pather.cost(cp, np));
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                open.push(NodeRef {
                    idx: ni,
                    cost: tentative,
                });
            }
        }

        self.nbuf = nbuf;
        &self.dijkstra_results
    }

    /// Query the Dijkstra cost at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `dijkstra_map` call.
    pub fn dijkstra_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) => self.dijkstra_map[i],
            None => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CostGrid;

    #[test]
    fn uniform_grid_distance_is_manhattan() {
        let grid: CostGrid = "111\n111\n111".parse().unwrap();
        let mut pr = PathRange::new(grid.range());
        pr.dijkstra_map(&grid, &[Point::ZERO], UNREACHABLE);
        for p in grid.range() {
            assert_eq!(pr.dijkstra_at(p), crate::manhattan(Point::ZERO, p));
        }
    }

    #[test]
    fn source_cell_cost_is_not_paid() {
        let grid: CostGrid = "91\n11".parse().unwrap();
        let mut pr = PathRange::new(grid.range());
        pr.dijkstra_map(&grid, &[Point::ZERO], UNREACHABLE);
        assert_eq!(pr.dijkstra_at(Point::ZERO), 0);
        assert_eq!(pr.dijkstra_at(Point::new(1, 1)), 2);
    }

    #[test]
    fn detours_around_expensive_cells() {
        let grid: CostGrid = "\
1999
1999
1111"
            .parse()
            .unwrap();
        let mut pr = PathRange::new(grid.range());
        pr.dijkstra_map(&grid, &[Point::ZERO], UNREACHABLE);
        assert_eq!(pr.dijkstra_at(Point::new(3, 2)), 5);
    }

    #[test]
    fn max_cost_limits_expansion() {
        let grid: CostGrid = "1111".parse().unwrap();
        let mut pr = PathRange::new(grid.range());
        let settled = pr.dijkstra_map(&grid, &[Point::ZERO], 2).len();
        assert_eq!(settled, 3);
        assert_eq!(pr.dijkstra_at(Point::new(3, 0)), UNREACHABLE);
        assert_eq!(pr.dijkstra_at(Point::new(9, 9)), UNREACHABLE);
    }

    #[test]
    fn results_are_settled_in_cost_order() {
        let grid: CostGrid = "1234\n5678\n9012".parse().unwrap();
        let mut pr = PathRange::new(grid.range());
        let costs: Vec<i32> = pr
            .dijkstra_map(&grid, &[Point::ZERO], UNREACHABLE)
            .iter()
            .map(|n| n.cost)
            .collect();
        assert_eq!(costs.len(), grid.range().len());
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }
}
