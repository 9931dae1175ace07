//! In-order run iteration.

use std::iter::FusedIterator;

use crate::node::IntervalNode;
use crate::util::{first, next};

/// Yields runs sorted by `start`, independent of arena order.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    nodes: &'a [IntervalNode<T>],
    curr: Option<u32>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a [IntervalNode<T>], root: Option<u32>) -> Self {
        Self {
            nodes,
            curr: first(nodes, root),
            remaining: if root.is_some() { nodes.len() } else { 0 },
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a IntervalNode<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.curr?;
        self.curr = next(self.nodes, idx);
        self.remaining = self.remaining.saturating_sub(1);
        Some(&self.nodes[idx as usize])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.curr {
            Some(_) => (1, Some(self.remaining)),
            None => (0, Some(0)),
        }
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
