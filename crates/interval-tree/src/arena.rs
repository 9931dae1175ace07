//! Index-addressed node store.

use std::ops::{Index, IndexMut};

use crate::node::{IntervalNode, DOMAIN_SIZE};

/// Owns every node of one tree plus the root index.
///
/// Nodes are appended and never removed individually; indices stay valid
/// until [`NodeArena::clear`].
#[derive(Clone, Debug)]
pub struct NodeArena<T> {
    nodes: Vec<IntervalNode<T>>,
    root: Option<u32>,
}

impl<T> Default for NodeArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> NodeArena<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root: None,
        }
    }

    /// Appends `node` and returns its index.
    pub fn allocate(&mut self, node: IntervalNode<T>) -> u32 {
        debug_assert!(self.nodes.len() < DOMAIN_SIZE, "arena is full");
        self.nodes.push(node);
        (self.nodes.len() - 1) as u32
    }

    #[inline]
    pub fn at(&self, idx: u32) -> &IntervalNode<T> {
        &self.nodes[idx as usize]
    }

    #[inline]
    pub fn at_mut(&mut self, idx: u32) -> &mut IntervalNode<T> {
        &mut self.nodes[idx as usize]
    }

    #[inline]
    pub fn root(&self) -> Option<u32> {
        self.root
    }

    #[inline]
    pub fn set_root(&mut self, root: Option<u32>) {
        self.root = root;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[IntervalNode<T>] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [IntervalNode<T>] {
        &mut self.nodes
    }

    /// Replaces the whole store, e.g. with a bulk-loaded node set.
    pub(crate) fn replace(&mut self, nodes: Vec<IntervalNode<T>>, root: Option<u32>) {
        self.nodes = nodes;
        self.root = root;
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }
}

impl<T> Index<u32> for NodeArena<T> {
    type Output = IntervalNode<T>;

    fn index(&self, idx: u32) -> &Self::Output {
        self.at(idx)
    }
}

impl<T> IndexMut<u32> for NodeArena<T> {
    fn index_mut(&mut self, idx: u32) -> &mut Self::Output {
        self.at_mut(idx)
    }
}
