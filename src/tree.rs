//! Rooted trees produced by depth-first exploration.
//!
//! A [`Tree`] owns its subtrees outright, so it is acyclic by construction no
//! matter how cyclic the graph that was explored. Traversal and teardown use
//! explicit stacks, which keeps very deep trees (long paths in the source graph)
//! from exhausting the call stack.
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::mem::{replace, take};

/// A rooted tree with an ordered sequence of child subtrees.
pub struct Tree<V> {
    root: V,
    children: Vec<Tree<V>>,
}

impl<V> Tree<V> {
    /// Creates a tree from a root and its ordered children.
    pub fn new(root: V, children: Vec<Tree<V>>) -> Self {
        Self { root, children }
    }

    /// Creates a tree consisting of a single vertex.
    pub fn leaf(root: V) -> Self {
        Self::new(root, Vec::new())
    }

    /// The root vertex of the tree.
    #[inline]
    pub fn root(&self) -> &V {
        &self.root
    }

    /// The child subtrees, in the order they were attached.
    #[inline]
    pub fn children(&self) -> &[Tree<V>] {
        &self.children
    }

    /// Number of vertices in the tree.
    pub fn len(&self) -> usize {
        self.postorder().count()
    }

    /// Iterates over the vertices of the tree in postorder.
    ///
    /// Every vertex of each child subtree is yielded, in child order, before
    /// the tree's own root. Each call starts a fresh traversal.
    ///
    /// # Example
    ///
    /// ```
    /// # use digraph::Tree;
    /// let tree = Tree::new('a', vec![Tree::new('b', vec![Tree::leaf('c')]), Tree::leaf('d')]);
    /// assert!(tree.postorder().eq(&['c', 'b', 'd', 'a']));
    /// ```
    pub fn postorder(&self) -> Postorder<'_, V> {
        Postorder {
            stack: vec![(self, 0)],
        }
    }

    /// Builds a tree of the same shape with every vertex mapped through `f`.
    ///
    /// `f` is called on the vertices in postorder.
    pub fn map<U, F>(&self, mut f: F) -> Tree<U>
    where
        F: FnMut(&V) -> U,
    {
        let mut current = MapFrame::new(self);
        let mut stack = Vec::new();

        loop {
            if let Some(child) = current.tree.children.get(current.cursor) {
                current.cursor += 1;
                stack.push(replace(&mut current, MapFrame::new(child)));
                continue;
            }

            let mapped = Tree::new(f(&current.tree.root), take(&mut current.mapped));

            match stack.pop() {
                Some(parent) => {
                    current = parent;
                    current.mapped.push(mapped);
                }
                None => return mapped,
            }
        }
    }
}

impl<V: Clone> Clone for Tree<V> {
    fn clone(&self) -> Self {
        self.map(V::clone)
    }
}

impl<V: PartialEq> PartialEq for Tree<V> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            if left.root != right.root || left.children.len() != right.children.len() {
                return false;
            }
            pending.extend(left.children.iter().zip(&right.children));
        }

        true
    }
}

impl<V: Eq> Eq for Tree<V> {}

/// Shows the root and the remaining vertices in postorder, without nesting.
impl<V: Debug> Debug for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let descendants: Vec<&V> = self
            .postorder()
            .take_while(|vertex| !std::ptr::eq(*vertex, &self.root))
            .collect();

        f.debug_struct("Tree")
            .field("root", &self.root)
            .field("descendants", &descendants)
            .finish()
    }
}

impl<V> Drop for Tree<V> {
    fn drop(&mut self) {
        let mut pending = take(&mut self.children);
        while let Some(mut tree) = pending.pop() {
            pending.append(&mut tree.children);
        }
    }
}

struct MapFrame<'a, V, U> {
    tree: &'a Tree<V>,
    cursor: usize,
    mapped: Vec<Tree<U>>,
}

impl<'a, V, U> MapFrame<'a, V, U> {
    fn new(tree: &'a Tree<V>) -> Self {
        Self {
            tree,
            cursor: 0,
            mapped: Vec::new(),
        }
    }
}

/// Iterator created by [`Tree::postorder`].
#[derive(Debug, Clone)]
pub struct Postorder<'a, V> {
    /// Subtrees on the current path together with the next child to descend into.
    stack: Vec<(&'a Tree<V>, usize)>,
}

impl<'a, V> Iterator for Postorder<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((tree, cursor)) = self.stack.last_mut() {
            let tree: &'a Tree<V> = *tree;

            match tree.children.get(*cursor) {
                Some(child) => {
                    *cursor += 1;
                    self.stack.push((child, 0));
                }
                None => {
                    self.stack.pop();
                    return Some(&tree.root);
                }
            }
        }

        None
    }

    /// Every subtree on the current path still has its root to yield.
    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), None)
    }
}

impl<'a, V> FusedIterator for Postorder<'a, V> {}
