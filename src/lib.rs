//! Directed graphs and the algorithms built on depth-first spanning forests.
//!
//! A [`Graph`] is constructed once from a list of edges between vertices of any
//! hashable type and is immutable afterwards. On top of depth-first
//! [spanning forests](Graph::spanning_forest) it provides forward components,
//! topological ordering, cycle detection, strongly connected components
//! (Kosaraju's algorithm) and the condensation of a graph, plus a single-source
//! shortest path search.
//!
//! # Example
//!
//! ```
//! use digraph::{fixture::WIKIPEDIA_SCC, Graph};
//!
//! let graph = Graph::from_edges(WIKIPEDIA_SCC.iter().copied());
//!
//! assert!(!graph.acyclic());
//! assert_eq!(graph.sccs().len(), 3);
//!
//! let condensed = graph.condensation();
//! assert!(condensed.acyclic());
//! assert_eq!(condensed.node_count(), 3);
//!
//! assert_eq!(
//!     graph.shortest_path_by_hops(&"a", &"h"),
//!     Some(vec![&"a", &"b", &"c", &"d", &"h"]),
//! );
//! ```
pub mod fixture;
pub mod graph;
mod index;
pub mod tree;

pub use crate::graph::{Component, CycleError, Graph, SpanningForest, Visited};
pub use crate::tree::{Postorder, Tree};
