//! Immutable directed graphs over arbitrary hashable vertices.
//!
//! A [`Graph`] is built once from a list of directed edges and never changes
//! afterwards. Every operation that produces a graph (such as
//! [`Graph::transpose`]) returns a new instance.
//!
//! Internally every distinct vertex is interned to a dense index in order of
//! first appearance, and successor sets are kept as duplicate-free lists in
//! insertion order. All traversals are therefore deterministic for a given
//! edge list.
use std::collections::{HashMap, HashSet};
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter::FusedIterator;
use std::slice;

use crate::index::{EntityIndex, NodeIndex};

mod components;
mod shortest_path;
mod traversal;

pub use components::Component;
pub use traversal::{CycleError, SpanningForest, Visited};

/// A directed graph stored as a mapping from vertices to their successor sets.
///
/// Parallel edges collapse into one and self-loops are stored like any other
/// edge.
///
/// # Vertex enumeration
///
/// [`Graph::vertices`] only enumerates vertices with at least one outgoing
/// edge. A vertex that only ever appears as the target of an edge is still
/// part of the graph ([`Graph::contains`] is `true` and traversals reach it
/// through its predecessors) but is not yielded by [`Graph::vertices`].
#[derive(Clone)]
pub struct Graph<V> {
    /// Interned vertices, in order of first appearance.
    nodes: Vec<V>,
    /// Reverse lookup from vertex to its index in `nodes`.
    lookup: HashMap<V, NodeIndex>,
    /// Successor indices for every interned vertex.
    successors: Vec<Vec<NodeIndex>>,
    edge_count: usize,
}

impl<V: Debug> Debug for Graph<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.nodes
                    .iter()
                    .zip(&self.successors)
                    .filter(|(_, successors)| !successors.is_empty())
                    .map(|(vertex, successors)| {
                        let targets: Vec<_> =
                            successors.iter().map(|ix| &self.nodes[ix.index()]).collect();
                        (vertex, targets)
                    }),
            )
            .finish()
    }
}

impl<V: Clone + Eq + Hash> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + Eq + Hash> FromIterator<(V, V)> for Graph<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<V: Clone + Eq + Hash> Graph<V> {
    /// Creates a graph without any vertices or edges.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            lookup: HashMap::new(),
            successors: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates a graph from a sequence of directed edges `(source, target)`.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::Graph;
    /// let graph = Graph::from_edges([(1, 2), (2, 3), (1, 2), (3, 3)]);
    ///
    /// assert_eq!(graph.edge_count(), 3);
    /// assert!(graph.has_edge(&3, &3));
    /// assert!(graph.neighbors(&1).eq(&[2]));
    /// ```
    ///
    /// # Panics
    ///
    /// Panics when the edges mention more than `u32::MAX + 1` distinct vertices.
    pub fn from_edges(edges: impl IntoIterator<Item = (V, V)>) -> Self {
        let mut graph = Self::new();
        let mut seen = HashSet::new();

        for (source, target) in edges {
            let source = graph.intern(source);
            let target = graph.intern(target);

            if seen.insert((source, target)) {
                graph.successors[source.index()].push(target);
                graph.edge_count += 1;
            }
        }

        graph
    }

    fn intern(&mut self, vertex: V) -> NodeIndex {
        if let Some(&index) = self.lookup.get(&vertex) {
            return index;
        }

        let index = NodeIndex::new(self.nodes.len());
        self.lookup.insert(vertex.clone(), index);
        self.nodes.push(vertex);
        self.successors.push(Vec::new());
        index
    }

    /// Iterator over the vertices that have at least one outgoing edge.
    ///
    /// Vertices are yielded in order of first appearance in the edge list.
    pub fn vertices(&self) -> Vertices<'_, V> {
        Vertices {
            graph: self,
            iter: self.successors.iter().enumerate(),
        }
    }

    /// Iterator over the direct successors of a vertex.
    ///
    /// Unknown vertices have no successors.
    pub fn neighbors(&self, vertex: &V) -> Neighbors<'_, V> {
        let successors = match self.index_of(vertex) {
            Some(index) => self.successor_indices(index),
            None => &[],
        };

        Neighbors {
            graph: self,
            iter: successors.iter(),
        }
    }

    /// Number of outgoing edges of a vertex.
    pub fn outdegree(&self, vertex: &V) -> usize {
        self.index_of(vertex)
            .map_or(0, |index| self.successor_indices(index).len())
    }

    /// Number of incoming edges of a vertex.
    ///
    /// This scans every edge of the graph. Callers that need many in-degrees
    /// should compute [`Graph::transpose`] once and query its
    /// [`Graph::outdegree`].
    pub fn indegree(&self, vertex: &V) -> usize {
        let Some(index) = self.index_of(vertex) else {
            return 0;
        };

        self.successors
            .iter()
            .filter(|successors| successors.contains(&index))
            .count()
    }

    /// Iterator over all edges `(source, target)`, grouped by source vertex.
    pub fn edges(&self) -> Edges<'_, V> {
        Edges {
            graph: self,
            sources: self.successors.iter().enumerate(),
            current: None,
        }
    }

    /// Returns a new graph with every edge reversed.
    pub fn transpose(&self) -> Self {
        Self::from_edges(self.edges().map(|(u, v)| (v.clone(), u.clone())))
    }

    /// Returns a new graph containing the edges of both graphs.
    pub fn union(&self, other: &Self) -> Self {
        Self::from_edges(
            self.edges()
                .chain(other.edges())
                .map(|(u, v)| (u.clone(), v.clone())),
        )
    }

    /// Returns the symmetric closure of the graph: for every edge `(u, v)` the
    /// edge `(v, u)` is present as well.
    pub fn undirected(&self) -> Self {
        self.union(&self.transpose())
    }

    /// Whether the vertex occurs in any edge of the graph.
    #[inline]
    pub fn contains(&self, vertex: &V) -> bool {
        self.lookup.contains_key(vertex)
    }

    /// Whether the graph contains the edge `(source, target)`.
    pub fn has_edge(&self, source: &V, target: &V) -> bool {
        match (self.index_of(source), self.index_of(target)) {
            (Some(source), Some(target)) => self.successor_indices(source).contains(&target),
            _ => false,
        }
    }

    /// Number of vertices occurring in the graph, including vertices without
    /// outgoing edges.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct edges in the graph.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Whether the graph has no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    #[inline]
    pub(crate) fn index_of(&self, vertex: &V) -> Option<NodeIndex> {
        self.lookup.get(vertex).copied()
    }
}

impl<V> Graph<V> {
    #[inline]
    pub(crate) fn vertex(&self, index: NodeIndex) -> &V {
        &self.nodes[index.index()]
    }

    #[inline]
    pub(crate) fn successor_indices(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.successors[index.index()]
    }

    /// The full successor table, indexed by [`NodeIndex`].
    #[inline]
    pub(crate) fn adjacency(&self) -> &[Vec<NodeIndex>] {
        &self.successors
    }

    /// Indices of the vertices yielded by [`Graph::vertices`], in the same order.
    pub(crate) fn vertex_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.successors
            .iter()
            .enumerate()
            .filter(|(_, successors)| !successors.is_empty())
            .map(|(index, _)| NodeIndex::new(index))
    }

    /// Successor table of the transposed graph over the same index space.
    pub(crate) fn transposed_adjacency(&self) -> Vec<Vec<NodeIndex>> {
        let mut predecessors = vec![Vec::new(); self.successors.len()];
        for (source, successors) in self.successors.iter().enumerate() {
            for target in successors {
                predecessors[target.index()].push(NodeIndex::new(source));
            }
        }
        predecessors
    }

    /// Iterator over all edges as index pairs.
    pub(crate) fn edge_indices(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(source, successors)| {
                successors
                    .iter()
                    .map(move |&target| (NodeIndex::new(source), target))
            })
    }
}

/// Iterator created by [`Graph::vertices`].
#[derive(Clone)]
pub struct Vertices<'a, V> {
    graph: &'a Graph<V>,
    iter: std::iter::Enumerate<slice::Iter<'a, Vec<NodeIndex>>>,
}

impl<'a, V> Iterator for Vertices<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .by_ref()
            .find(|(_, successors)| !successors.is_empty())
            .map(|(index, _)| &self.graph.nodes[index])
    }
}

impl<'a, V> FusedIterator for Vertices<'a, V> {}

/// Iterator created by [`Graph::neighbors`].
#[derive(Clone)]
pub struct Neighbors<'a, V> {
    graph: &'a Graph<V>,
    iter: slice::Iter<'a, NodeIndex>,
}

impl<'a, V> Iterator for Neighbors<'a, V> {
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|&index| self.graph.vertex(index))
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, V> ExactSizeIterator for Neighbors<'a, V> {}
impl<'a, V> FusedIterator for Neighbors<'a, V> {}

/// Iterator created by [`Graph::edges`].
#[derive(Clone)]
pub struct Edges<'a, V> {
    graph: &'a Graph<V>,
    sources: std::iter::Enumerate<slice::Iter<'a, Vec<NodeIndex>>>,
    current: Option<(&'a V, slice::Iter<'a, NodeIndex>)>,
}

impl<'a, V> Iterator for Edges<'a, V> {
    type Item = (&'a V, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((source, targets)) = &mut self.current {
                if let Some(&target) = targets.next() {
                    return Some((*source, self.graph.vertex(target)));
                }
            }

            let (index, successors) = self.sources.next()?;
            self.current = Some((&self.graph.nodes[index], successors.iter()));
        }
    }
}

impl<'a, V> FusedIterator for Edges<'a, V> {}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn edge_set<V: Clone + Eq + Hash>(graph: &Graph<V>) -> HashSet<(V, V)> {
        graph
            .edges()
            .map(|(u, v)| (u.clone(), v.clone()))
            .collect()
    }

    #[test]
    fn empty_graph() {
        let graph = Graph::<u8>::new();

        assert!(graph.is_empty());
        assert_eq!(graph.node_count(), 0);
        assert_eq!(graph.vertices().count(), 0);
        assert_eq!(graph.edges().count(), 0);
        assert_eq!(graph.neighbors(&0).count(), 0);
    }

    #[test]
    fn parallel_edges_collapse() {
        let graph = Graph::from_edges([(1, 2), (1, 2), (1, 3), (1, 2)]);

        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.outdegree(&1), 2);
        assert!(graph.neighbors(&1).eq(&[2, 3]));
    }

    #[test]
    fn vertices_skip_sink_only_targets() {
        let graph = Graph::from_edges([('a', 'b'), ('b', 'c'), ('d', 'c')]);

        assert!(graph.vertices().eq(&['a', 'b', 'd']));
        assert!(graph.contains(&'c'));
        assert_eq!(graph.node_count(), 4);
    }

    #[rstest]
    #[case('a', 1, 0)]
    #[case('b', 2, 2)]
    #[case('c', 0, 2)]
    #[case('z', 0, 0)]
    fn degrees(#[case] vertex: char, #[case] outdegree: usize, #[case] indegree: usize) {
        let graph = Graph::from_edges([('a', 'b'), ('b', 'c'), ('b', 'b'), ('a', 'b')]);
        let graph = graph.union(&Graph::from_edges([('d', 'c')]));

        assert_eq!(graph.outdegree(&vertex), outdegree);
        assert_eq!(graph.indegree(&vertex), indegree);
        assert_eq!(graph.transpose().outdegree(&vertex), indegree);
    }

    #[test]
    fn self_loops_are_edges() {
        let graph = Graph::from_edges([(7, 7)]);

        assert!(graph.has_edge(&7, &7));
        assert!(graph.vertices().eq(&[7]));
        assert_eq!(graph.indegree(&7), 1);
    }

    #[test]
    fn edges_grouped_by_source() {
        let graph = Graph::from_edges([(1, 2), (3, 4), (1, 3)]);
        let edges: Vec<_> = graph.edges().map(|(u, v)| (*u, *v)).collect();

        assert_eq!(edges, [(1, 2), (1, 3), (3, 4)]);
    }

    #[test]
    fn transpose_reverses_edges() {
        let graph = Graph::from_edges([(1, 2), (2, 3), (3, 3)]);
        let transposed = graph.transpose();

        assert_eq!(
            edge_set(&transposed),
            HashSet::from([(2, 1), (3, 2), (3, 3)])
        );
        assert_eq!(edge_set(&transposed.transpose()), edge_set(&graph));
    }

    #[test]
    fn union_merges_duplicates() {
        let left = Graph::from_edges([(1, 2), (2, 3)]);
        let right = Graph::from_edges([(2, 3), (3, 1)]);
        let union = left.union(&right);

        assert_eq!(union.edge_count(), 3);
        assert_eq!(
            edge_set(&union),
            HashSet::from([(1, 2), (2, 3), (3, 1)])
        );
    }

    #[test]
    fn undirected_is_symmetric() {
        let graph = Graph::from_edges([("x", "y"), ("y", "z")]);
        let undirected = graph.undirected();

        for (u, v) in undirected.edges() {
            assert!(undirected.has_edge(v, u));
        }
        assert_eq!(undirected.edge_count(), 4);
        assert!(undirected.vertices().any(|v| *v == "z"));
    }

    #[test]
    fn collect_from_iterator() {
        let graph: Graph<_> = vec![("a", "b"), ("b", "a")].into_iter().collect();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn debug_lists_adjacency() {
        let graph = Graph::from_edges([(1, 2), (1, 3)]);
        assert_eq!(format!("{:?}", graph), "{1: [2, 3]}");
    }
}
