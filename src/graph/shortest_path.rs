//! Single-source shortest paths.
//!
//! The frontier is a flat list scanned linearly for its closest member, which
//! makes each extraction linear in the frontier size. This is quadratic in the
//! number of vertices overall but needs no ordering beyond [`PartialOrd`], so
//! floating point weights work as well as integers.
use std::hash::Hash;

use bitvec::prelude::*;
use num_traits::Zero;
use tracing::{debug, trace};

use super::Graph;
use crate::index::{EntityIndex, NodeIndex};

/// Removes and returns the frontier member with the smallest tentative distance.
///
/// Ties go to the member that sits earliest in the frontier.
fn extract_min<W: PartialOrd>(
    frontier: &mut Vec<NodeIndex>,
    dist: &[Option<W>],
) -> Option<NodeIndex> {
    let mut best = 0;
    for (position, node) in frontier.iter().enumerate().skip(1) {
        if dist[node.index()] < dist[frontier[best].index()] {
            best = position;
        }
    }

    if frontier.is_empty() {
        None
    } else {
        Some(frontier.swap_remove(best))
    }
}

impl<V: Clone + Eq + Hash> Graph<V> {
    /// Finds a shortest path from `source` to `target`.
    ///
    /// `weight` is called with every relaxed edge `(u, v)` and must not return
    /// negative values. Returns the vertices of the path from `source` to
    /// `target` inclusive, or `None` when `target` can not be reached. A vertex
    /// always reaches itself through the single-vertex path.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::Graph;
    /// let graph = Graph::from_edges([('a', 'b'), ('b', 'd'), ('a', 'c'), ('c', 'd')]);
    /// let cost = |(u, v): (&char, &char)| if (*u, *v) == ('a', 'b') { 5.0 } else { 1.0 };
    ///
    /// assert_eq!(graph.shortest_path(&'a', &'d', cost), Some(vec![&'a', &'c', &'d']));
    /// assert_eq!(graph.shortest_path(&'d', &'a', cost), None);
    /// ```
    pub fn shortest_path<'a, W, F>(
        &'a self,
        source: &'a V,
        target: &V,
        mut weight: F,
    ) -> Option<Vec<&'a V>>
    where
        W: Copy + PartialOrd + Zero,
        F: FnMut((&'a V, &'a V)) -> W,
    {
        let Some(start) = self.index_of(source) else {
            return (source == target).then(|| vec![source]);
        };
        let goal = self.index_of(target);

        let nodes = self.node_count();
        let mut dist: Vec<Option<W>> = vec![None; nodes];
        let mut prev: Vec<Option<NodeIndex>> = vec![None; nodes];
        let mut queued = bitvec![0; nodes];
        let mut frontier = vec![start];

        dist[start.index()] = Some(W::zero());
        queued.set(start.index(), true);

        while let Some(u) = extract_min(&mut frontier, &dist) {
            queued.set(u.index(), false);
            if Some(u) == goal {
                break;
            }

            let Some(du) = dist[u.index()] else {
                continue;
            };
            trace!(frontier = frontier.len(), "settling vertex");

            for &v in self.successor_indices(u) {
                let alt = du + weight((self.vertex(u), self.vertex(v)));
                let improves = match dist[v.index()] {
                    Some(dv) => alt < dv,
                    None => true,
                };

                if improves {
                    dist[v.index()] = Some(alt);
                    prev[v.index()] = Some(u);
                    if !queued.replace(v.index(), true) {
                        frontier.push(v);
                    }
                }
            }
        }

        let goal = goal.filter(|goal| dist[goal.index()].is_some())?;

        let mut path = vec![self.vertex(goal)];
        let mut cursor = goal;
        while cursor != start {
            cursor = prev[cursor.index()]?;
            path.push(self.vertex(cursor));
        }
        path.reverse();

        debug!(hops = path.len() - 1, "found shortest path");
        Some(path)
    }

    /// Finds a path with the fewest edges from `source` to `target`.
    ///
    /// Equivalent to [`Graph::shortest_path`] with every edge weighing one.
    pub fn shortest_path_by_hops<'a>(&'a self, source: &'a V, target: &V) -> Option<Vec<&'a V>> {
        self.shortest_path(source, target, |_| 1usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::fixture::WIKIPEDIA_SCC;
    use rstest::{fixture, rstest};

    #[fixture]
    fn wikipedia() -> Graph<&'static str> {
        Graph::from_edges(WIKIPEDIA_SCC.iter().copied())
    }

    #[rstest]
    #[case("a", "a", Some(vec!["a"]))]
    #[case("a", "e", Some(vec!["a", "b", "e"]))]
    #[case("a", "h", Some(vec!["a", "b", "c", "d", "h"]))]
    #[case("a", "f", Some(vec!["a", "b", "f"]))]
    #[case("g", "a", None)]
    #[case("a", "z", None)]
    #[case("z", "z", Some(vec!["z"]))]
    #[case("z", "a", None)]
    fn hops(
        wikipedia: Graph<&'static str>,
        #[case] source: &'static str,
        #[case] target: &'static str,
        #[case] expected: Option<Vec<&'static str>>,
    ) {
        let path = wikipedia
            .shortest_path_by_hops(&source, &target)
            .map(|path| path.into_iter().copied().collect::<Vec<_>>());
        assert_eq!(path, expected);
    }

    #[test]
    fn weights_prefer_cheaper_detour() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (1, 3)]);
        let weight = |(u, v): (&u32, &u32)| match (*u, *v) {
            (1, 3) => 10u64,
            _ => 1,
        };

        assert_eq!(graph.shortest_path(&1, &3, weight), Some(vec![&1, &2, &3]));
        assert_eq!(graph.shortest_path_by_hops(&1, &3), Some(vec![&1, &3]));
    }

    #[test]
    fn improved_vertex_is_relaxed_again() {
        // 'd' is first reached expensively through 'b' and later improved via 'c'.
        let graph = Graph::from_edges([('a', 'b'), ('a', 'c'), ('b', 'd'), ('c', 'd'), ('d', 'e')]);
        let weight = |(u, v): (&char, &char)| match (*u, *v) {
            ('a', 'b') => 1.0,
            ('b', 'd') => 10.0,
            ('a', 'c') => 2.0,
            ('c', 'd') => 2.0,
            _ => 0.5,
        };

        assert_eq!(
            graph.shortest_path(&'a', &'e', weight),
            Some(vec![&'a', &'c', &'d', &'e'])
        );
    }

    #[test]
    fn weight_sees_relaxed_edges() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 4)]);
        let mut seen = Vec::new();
        let path = graph.shortest_path(&1, &3, |(u, v)| {
            seen.push((*u, *v));
            1u8
        });

        assert_eq!(path, Some(vec![&1, &2, &3]));
        assert_eq!(seen, [(1, 2), (2, 3)]);
    }

    #[test]
    fn extract_min_takes_first_of_ties() {
        let mut frontier = vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(2)];
        let dist = [Some(3), Some(1), Some(1)];

        assert_eq!(extract_min(&mut frontier, &dist), Some(NodeIndex::new(1)));
        assert_eq!(extract_min(&mut frontier, &dist), Some(NodeIndex::new(2)));
        assert_eq!(extract_min(&mut frontier, &dist), Some(NodeIndex::new(0)));
        assert_eq!(extract_min(&mut frontier, &dist), None);
    }
}
