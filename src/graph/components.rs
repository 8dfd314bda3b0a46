//! Strongly connected components and the condensation of a graph.
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use tracing::debug;

use super::traversal::IndexForest;
use super::Graph;
use crate::index::{EntityIndex, NodeIndex};

/// A strongly connected component, used as the vertex type of
/// [`Graph::condensation`].
///
/// Components compare and hash as sets: the order in which members were
/// discovered does not matter. Clones share the member set.
#[derive(Clone)]
pub struct Component<V> {
    members: Arc<HashSet<V>>,
    /// Order-independent digest of the members, computed once.
    fingerprint: u64,
}

impl<V: Eq + Hash> Component<V> {
    /// Creates a component from its member vertices.
    pub fn new(members: impl IntoIterator<Item = V>) -> Self {
        let members: HashSet<V> = members.into_iter().collect();
        let fingerprint = members.iter().fold(0u64, |digest, member| {
            let mut hasher = DefaultHasher::new();
            member.hash(&mut hasher);
            digest.wrapping_add(hasher.finish())
        });

        Self {
            members: Arc::new(members),
            fingerprint,
        }
    }

    /// Whether the vertex belongs to the component.
    #[inline]
    pub fn contains(&self, vertex: &V) -> bool {
        self.members.contains(vertex)
    }
}

impl<V> Component<V> {
    /// Number of vertices in the component.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over the members in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.members.iter()
    }
}

impl<V: Eq + Hash> PartialEq for Component<V> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.members, &other.members)
            || (self.fingerprint == other.fingerprint && self.members == other.members)
    }
}

impl<V: Eq + Hash> Eq for Component<V> {}

impl<V> Hash for Component<V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.members.len());
        state.write_u64(self.fingerprint);
    }
}

impl<V: Debug> Debug for Component<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.members.iter()).finish()
    }
}

impl<V: Clone + Eq + Hash> Graph<V> {
    /// Strongly connected components, by Kosaraju's algorithm.
    ///
    /// The graph is first put in the order of [`Graph::linearize`]; a spanning
    /// forest of the transposed graph is then grown in exactly that order and
    /// the postorder of each of its trees is one component. Every vertex of the
    /// graph belongs to exactly one component.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::Graph;
    /// let graph = Graph::from_edges([(1, 2), (2, 1), (2, 3)]);
    /// let mut sccs = graph.sccs();
    /// for scc in &mut sccs {
    ///     scc.sort();
    /// }
    ///
    /// assert_eq!(sccs, [vec![&1, &2], vec![&3]]);
    /// ```
    pub fn sccs(&self) -> Vec<Vec<&V>> {
        let sccs: Vec<Vec<&V>> = self
            .scc_indices()
            .into_iter()
            .map(|scc| scc.into_iter().map(|index| self.vertex(index)).collect())
            .collect();

        debug!(
            vertices = self.node_count(),
            components = sccs.len(),
            "computed strongly connected components"
        );
        sccs
    }

    fn scc_indices(&self) -> Vec<Vec<NodeIndex>> {
        let order = self.linear_order();
        let transposed = self.transposed_adjacency();

        IndexForest::new(&transposed, order)
            .map(|tree| tree.postorder().copied().collect())
            .collect()
    }

    /// Contracts every strongly connected component into a single vertex.
    ///
    /// The result has an edge between two components whenever some edge of
    /// this graph joins their members; edges inside a component are dropped,
    /// so the condensation is always acyclic. As with any [`Graph`], only
    /// components that take part in such an edge occur in the result.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::{Component, Graph};
    /// let graph = Graph::from_edges([(1, 2), (2, 1), (2, 3), (3, 3)]);
    /// let condensed = graph.condensation();
    ///
    /// assert_eq!(condensed.edge_count(), 1);
    /// assert!(condensed.has_edge(&Component::new([1, 2]), &Component::new([3])));
    /// ```
    pub fn condensation(&self) -> Graph<Component<V>> {
        let sccs = self.scc_indices();

        let mut contract = vec![0; self.node_count()];
        let components: Vec<Component<V>> = sccs
            .iter()
            .enumerate()
            .map(|(id, scc)| {
                for index in scc {
                    contract[index.index()] = id;
                }
                Component::new(scc.iter().map(|&index| self.vertex(index).clone()))
            })
            .collect();

        let condensed = Graph::from_edges(
            self.edge_indices()
                .map(|(u, v)| (contract[u.index()], contract[v.index()]))
                .filter(|(cu, cv)| cu != cv)
                .map(|(cu, cv)| (components[cu].clone(), components[cv].clone())),
        );

        debug!(
            components = components.len(),
            edges = condensed.edge_count(),
            "condensed graph"
        );
        condensed
    }
}
