//! Depth-first spanning forests and the queries composed from them.
//!
//! Every query here is one or two spanning-forest constructions: forward
//! components, topological order, reachability and the acyclicity test.
use std::collections::HashSet;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::mem::{replace, take};

use bitvec::prelude::*;
use thiserror::Error;
use tracing::{debug, trace};

use super::{Graph, Vertices};
use crate::index::{EntityIndex, NodeIndex};
use crate::tree::Tree;

/// The set of vertices already explored by a sequence of depth-first walks.
///
/// A `Visited` set belongs to the graph it was created for and is threaded
/// through [`Graph::spanning_tree_with`] and [`Graph::spanning_forest_from`] so
/// that no vertex is explored twice across a whole forest.
#[derive(Debug, Clone)]
pub struct Visited<'a, V> {
    graph: &'a Graph<V>,
    marked: BitVec,
    /// Roots that do not occur in the graph.
    foreign: HashSet<&'a V>,
}

impl<'a, V: Clone + Eq + Hash> Visited<'a, V> {
    /// Creates an empty visited set for a graph.
    pub fn new(graph: &'a Graph<V>) -> Self {
        Self {
            graph,
            marked: bitvec![0; graph.node_count()],
            foreign: HashSet::new(),
        }
    }

    /// Whether the vertex has been explored.
    pub fn contains(&self, vertex: &V) -> bool {
        match self.graph.index_of(vertex) {
            Some(index) => self.marked[index.index()],
            None => self.foreign.contains(vertex),
        }
    }

    /// Number of explored vertices.
    pub fn len(&self) -> usize {
        self.marked.count_ones() + self.foreign.len()
    }

    /// Whether no vertex has been explored yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error returned by [`Graph::toposort`] when the graph has a directed cycle.
///
/// Carries an edge that runs against the depth-first order, which always lies
/// on a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the graph contains a directed cycle")]
pub struct CycleError<V> {
    pub from: V,
    pub to: V,
}

struct Frame {
    node: NodeIndex,
    cursor: usize,
    children: Vec<Tree<NodeIndex>>,
}

impl Frame {
    fn new(node: NodeIndex) -> Self {
        Self {
            node,
            cursor: 0,
            children: Vec::new(),
        }
    }
}

/// Builds the depth-first tree rooted at `root`.
///
/// Marks `root` and every vertex reached from it. Successors that are already
/// marked are not descended into.
pub(crate) fn explore(
    adjacency: &[Vec<NodeIndex>],
    root: NodeIndex,
    marked: &mut BitVec,
) -> Tree<NodeIndex> {
    marked.set(root.index(), true);

    let mut current = Frame::new(root);
    let mut stack = Vec::new();

    loop {
        if let Some(&next) = adjacency[current.node.index()].get(current.cursor) {
            current.cursor += 1;
            if !marked.replace(next.index(), true) {
                stack.push(replace(&mut current, Frame::new(next)));
            }
            continue;
        }

        let tree = Tree::new(current.node, take(&mut current.children));

        match stack.pop() {
            Some(parent) => {
                current = parent;
                current.children.push(tree);
            }
            None => return tree,
        }
    }
}

/// Spanning forest over node indices, used by the algorithms internally.
pub(crate) struct IndexForest<'a, I> {
    adjacency: &'a [Vec<NodeIndex>],
    order: I,
    marked: BitVec,
}

impl<'a, I: Iterator<Item = NodeIndex>> IndexForest<'a, I> {
    pub(crate) fn new(
        adjacency: &'a [Vec<NodeIndex>],
        order: impl IntoIterator<IntoIter = I>,
    ) -> Self {
        Self {
            adjacency,
            order: order.into_iter(),
            marked: bitvec![0; adjacency.len()],
        }
    }
}

impl<'a, I: Iterator<Item = NodeIndex>> Iterator for IndexForest<'a, I> {
    type Item = Tree<NodeIndex>;

    fn next(&mut self) -> Option<Self::Item> {
        let root = self
            .order
            .by_ref()
            .find(|index| !self.marked[index.index()])?;
        Some(explore(self.adjacency, root, &mut self.marked))
    }
}

/// Iterator created by [`Graph::spanning_forest`] and [`Graph::spanning_forest_from`].
pub struct SpanningForest<'a, V, I> {
    graph: &'a Graph<V>,
    vertices: I,
    visited: Visited<'a, V>,
}

impl<'a, V, I> SpanningForest<'a, V, I> {
    /// Stops the traversal and returns the visited set built so far.
    pub fn into_visited(self) -> Visited<'a, V> {
        self.visited
    }
}

impl<'a, V, I> Iterator for SpanningForest<'a, V, I>
where
    V: Clone + Eq + Hash,
    I: Iterator<Item = &'a V>,
{
    type Item = Tree<&'a V>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;

        for vertex in self.vertices.by_ref() {
            if !self.visited.contains(vertex) {
                return Some(graph.spanning_tree_with(vertex, &mut self.visited));
            }
        }

        None
    }
}

impl<'a, V, I> FusedIterator for SpanningForest<'a, V, I>
where
    V: Clone + Eq + Hash,
    I: FusedIterator<Item = &'a V>,
{
}

impl<V: Clone + Eq + Hash> Graph<V> {
    /// Builds the depth-first tree rooted at a vertex.
    ///
    /// Successors are explored in insertion order. A vertex that does not
    /// occur in the graph yields a single-vertex tree.
    pub fn spanning_tree<'a>(&'a self, root: &'a V) -> Tree<&'a V> {
        self.spanning_tree_with(root, &mut Visited::new(self))
    }

    /// Builds the depth-first tree rooted at a vertex, skipping and extending
    /// the given visited set.
    ///
    /// The root itself is always explored, even when it was visited before.
    ///
    /// # Panics
    ///
    /// Panics if `visited` was created for a different graph.
    pub fn spanning_tree_with<'a>(
        &'a self,
        root: &'a V,
        visited: &mut Visited<'a, V>,
    ) -> Tree<&'a V> {
        assert!(
            std::ptr::eq(visited.graph, self),
            "visited set belongs to another graph"
        );

        match self.index_of(root) {
            Some(index) => {
                explore(self.adjacency(), index, &mut visited.marked).map(|&ix| self.vertex(ix))
            }
            None => {
                visited.foreign.insert(root);
                Tree::leaf(root)
            }
        }
    }

    /// Lazily builds a depth-first spanning forest over [`Graph::vertices`].
    ///
    /// Every enumerated vertex, and everything reachable from it, appears in
    /// exactly one tree.
    pub fn spanning_forest(&self) -> SpanningForest<'_, V, Vertices<'_, V>> {
        self.spanning_forest_from(self.vertices(), Visited::new(self))
    }

    /// Lazily builds a depth-first spanning forest, starting a new tree at each
    /// vertex of `vertices` that is not yet in `visited`.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::{Graph, Visited};
    /// let graph = Graph::from_edges([(1, 2), (3, 2), (2, 4)]);
    /// let mut forest = graph.spanning_forest_from([&3, &1], Visited::new(&graph));
    ///
    /// assert!(forest.next().unwrap().postorder().eq(&[&4, &2, &3]));
    /// assert!(forest.next().unwrap().postorder().eq(&[&1]));
    /// assert!(forest.next().is_none());
    /// assert_eq!(forest.into_visited().len(), 4);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `visited` was created for a different graph.
    pub fn spanning_forest_from<'a, I>(
        &'a self,
        vertices: I,
        visited: Visited<'a, V>,
    ) -> SpanningForest<'a, V, I::IntoIter>
    where
        I: IntoIterator<Item = &'a V>,
    {
        assert!(
            std::ptr::eq(visited.graph, self),
            "visited set belongs to another graph"
        );

        SpanningForest {
            graph: self,
            vertices: vertices.into_iter(),
            visited,
        }
    }

    /// Postorder of every tree of [`Graph::spanning_forest`].
    ///
    /// Only outgoing edges are followed, so each list holds the vertices first
    /// reached from a forest root; this is weak connectivity only for
    /// symmetric graphs. Use `graph.undirected().ccs()` for the connected
    /// components of the underlying undirected graph.
    pub fn ccs(&self) -> Vec<Vec<&V>> {
        let components: Vec<Vec<&V>> = self
            .spanning_forest()
            .map(|tree| tree.postorder().copied().collect())
            .collect();

        debug!(components = components.len(), "built forward components");
        components
    }

    /// Reverse postorder of a full spanning forest.
    ///
    /// The postorders of all trees of [`Graph::spanning_forest`] are
    /// concatenated in forest order and the result is reversed, so later trees
    /// come first. For an acyclic graph every edge `(u, v)` then has `u` before
    /// `v`, including edges that cross from one tree into an earlier one.
    /// Cyclic graphs still get a total order over all vertices, without that
    /// guarantee.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::Graph;
    /// let graph = Graph::from_edges([("shirt", "tie"), ("tie", "jacket"), ("shirt", "belt")]);
    /// let order: Vec<_> = graph.linearize().copied().collect();
    ///
    /// assert_eq!(order, ["shirt", "belt", "tie", "jacket"]);
    /// ```
    pub fn linearize(&self) -> impl Iterator<Item = &V> + '_ {
        self.linear_order()
            .into_iter()
            .map(move |index| self.vertex(index))
    }

    pub(crate) fn linear_order(&self) -> Vec<NodeIndex> {
        let mut order = Vec::with_capacity(self.node_count());
        for tree in IndexForest::new(self.adjacency(), self.vertex_indices()) {
            order.extend(tree.postorder().copied());
        }
        order.reverse();
        order
    }

    /// Whether `to` can be reached from `from` along directed edges.
    ///
    /// Every vertex reaches itself.
    pub fn reachable(&self, from: &V, to: &V) -> bool {
        self.spanning_tree(from).postorder().any(|vertex| *vertex == to)
    }

    /// Whether the graph has no directed cycle.
    ///
    /// Self-loops count as cycles.
    pub fn acyclic(&self) -> bool {
        self.back_edge(&self.linear_order()).is_none()
    }

    /// Returns a topological order of the vertices, or the edge that closes a
    /// cycle.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::{CycleError, Graph};
    /// let dag = Graph::from_edges([(1, 2), (2, 3)]);
    /// assert_eq!(dag.toposort(), Ok(vec![&1, &2, &3]));
    ///
    /// let cyclic = Graph::from_edges([(1, 2), (2, 1)]);
    /// assert_eq!(cyclic.toposort(), Err(CycleError { from: 2, to: 1 }));
    /// ```
    pub fn toposort(&self) -> Result<Vec<&V>, CycleError<V>> {
        let order = self.linear_order();

        if let Some((from, to)) = self.back_edge(&order) {
            trace!(vertices = order.len(), "linear order has a back edge");
            return Err(CycleError {
                from: self.vertex(from).clone(),
                to: self.vertex(to).clone(),
            });
        }

        Ok(order.into_iter().map(|index| self.vertex(index)).collect())
    }

    /// First edge, in [`Graph::edges`] order, whose source does not precede its
    /// target in `order`.
    fn back_edge(&self, order: &[NodeIndex]) -> Option<(NodeIndex, NodeIndex)> {
        let mut position = vec![usize::MAX; self.node_count()];
        for (offset, index) in order.iter().enumerate() {
            position[index.index()] = offset;
        }

        self.edge_indices()
            .find(|(source, target)| position[source.index()] >= position[target.index()])
    }
}
