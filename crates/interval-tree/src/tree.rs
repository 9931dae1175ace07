use std::fmt::Debug;

use tracing::{debug, trace, warn};

use crate::arena::NodeArena;
use crate::bulk;
use crate::error::{PartitionError, TreeError};
use crate::iter::Iter;
use crate::node::{IntervalNode, LNode, DOMAIN_SIZE};
use crate::red_black::{self, assert_red_black_tree};
use crate::types::Node;
use crate::util::{first, next, size};

/// Run-length compressed array of [`DOMAIN_SIZE`] values.
///
/// Runs are kept in a red-black tree ordered by start offset. Lookups and
/// single-slot writes cost O(log n) in the number of runs.
#[derive(Clone, Debug)]
pub struct IntervalTree<T> {
    arena: NodeArena<T>,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalTree<T> {
    /// Creates an empty, uninitialized tree.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
        }
    }

    /// Creates a tree holding `data` in every slot.
    pub fn single(data: T) -> Self {
        let mut tree = Self::new();
        tree.init_single(data, DOMAIN_SIZE);
        tree
    }

    /// Resets the tree to one black run `[0, length)`.
    ///
    /// Anything other than `length == DOMAIN_SIZE` leaves the domain only
    /// partially covered and fails [`IntervalTree::validate`].
    pub fn init_single(&mut self, data: T, length: usize) {
        debug_assert!((1..=DOMAIN_SIZE).contains(&length));
        self.arena.clear();
        let mut node = IntervalNode::new(data, 0, length as u16);
        node.paint_black();
        node.set_p(None);
        let root = self.arena.allocate(node);
        self.arena.set_root(Some(root));
        debug!(length, "interval tree initialised with a single run");
    }

    /// Bulk-loads an ascending, gap-free partition of the domain.
    ///
    /// The input is not validated; use
    /// [`IntervalTree::try_init_from_sorted_array`] for untrusted data.
    pub fn init_from_sorted_array(&mut self, runs: &[LNode<T>])
    where
        T: Clone,
    {
        self.load(runs.to_vec());
    }

    /// Validates `runs` and bulk-loads them. The tree is left untouched on
    /// error.
    pub fn try_init_from_sorted_array(&mut self, runs: &[LNode<T>]) -> Result<(), PartitionError>
    where
        T: Clone,
    {
        Self::check_partition(runs)?;
        self.init_from_sorted_array(runs);
        Ok(())
    }

    /// Builds a tree from a validated partition, taking ownership of the runs.
    pub fn from_sorted(runs: Vec<LNode<T>>) -> Result<Self, PartitionError> {
        Self::check_partition(&runs)?;
        let mut tree = Self::new();
        tree.load(runs);
        Ok(tree)
    }

    fn check_partition(runs: &[LNode<T>]) -> Result<(), PartitionError> {
        bulk::check_partition(runs).map_err(|err| {
            warn!(%err, runs = runs.len(), "rejected bulk-load partition");
            err
        })
    }

    fn load(&mut self, runs: Vec<LNode<T>>) {
        let count = runs.len();
        let (nodes, root) = bulk::build(runs);
        self.arena.replace(nodes, root);
        debug!(runs = count, "interval tree bulk-loaded");
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        debug!("interval tree cleared");
    }

    /// Number of runs.
    #[inline]
    pub fn size(&self) -> usize {
        self.arena.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    #[inline]
    pub fn root(&self) -> Option<u32> {
        self.arena.root()
    }

    #[inline]
    pub fn node(&self, idx: u32) -> &IntervalNode<T> {
        &self.arena[idx]
    }

    /// Nodes in arena (allocation) order.
    pub fn nodes(&self) -> &[IntervalNode<T>] {
        self.arena.nodes()
    }

    /// Index of the run covering `index`, or `None` if the tree is empty or
    /// `index` lies outside the covered range.
    pub fn find(&self, index: usize) -> Option<u32> {
        let nodes = self.arena.nodes();
        let mut curr = self.arena.root();
        while let Some(i) = curr {
            let node = &nodes[i as usize];
            curr = if index < node.start() as usize {
                node.l()
            } else if index >= node.end() {
                node.r()
            } else {
                return Some(i);
            };
        }
        None
    }

    /// Index of the run covering `index`.
    ///
    /// # Panics
    ///
    /// If `index >= DOMAIN_SIZE` or the tree is empty.
    pub fn get_interval(&self, index: usize) -> u32 {
        match self.find(index) {
            Some(i) => i,
            None => panic!(
                "index {index} is not covered by the interval tree ({} runs)",
                self.size()
            ),
        }
    }

    /// Value stored at `index`.
    ///
    /// # Panics
    ///
    /// If `index >= DOMAIN_SIZE` or the tree is empty.
    pub fn get_data(&self, index: usize) -> &T {
        &self.arena[self.get_interval(index)].data
    }

    /// Value stored at `index`, if covered.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.find(index).map(|i| &self.arena[i].data)
    }

    /// Runs in ascending `start` order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.arena.nodes(), self.arena.root())
    }

    /// Exports the runs as a partition accepted by
    /// [`IntervalTree::init_from_sorted_array`].
    pub fn runs(&self) -> Vec<LNode<T>>
    where
        T: Clone,
    {
        self.iter().map(IntervalNode::to_lnode).collect()
    }

    /// Writes every run into `buffer[start..start + length]`.
    ///
    /// # Panics
    ///
    /// If `buffer` is shorter than the covered range.
    pub fn uncompress_into_buffer(&self, buffer: &mut [T])
    where
        T: Clone,
    {
        for node in self.iter() {
            buffer[node.start() as usize..node.end()].fill(node.data.clone());
        }
    }

    /// Expands the tree into a fresh `DOMAIN_SIZE`-element vector.
    ///
    /// # Panics
    ///
    /// If the tree is empty.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let fill = self.get_data(0).clone();
        let mut out = vec![fill; DOMAIN_SIZE];
        self.uncompress_into_buffer(&mut out);
        out
    }

    /// Checks every structural invariant: full coverage, run lengths,
    /// red-black shape and contiguous in-order runs.
    pub fn validate(&self) -> Result<(), TreeError> {
        let nodes = self.arena.nodes();
        if nodes.is_empty() {
            return Err(TreeError::Empty);
        }

        let mut total = 0usize;
        for (i, node) in nodes.iter().enumerate() {
            if !node.is_linked() {
                return Err(TreeError::Unlinked { node: i as u32 });
            }
            if !(1..=DOMAIN_SIZE).contains(&node.length()) {
                return Err(TreeError::LengthOutOfRange {
                    node: i as u32,
                    length: node.length(),
                });
            }
            total += node.length();
        }
        if total != DOMAIN_SIZE {
            return Err(TreeError::Coverage {
                total,
                expected: DOMAIN_SIZE,
            });
        }

        self.check_rb()?;

        let reachable = size(nodes, self.arena.root());
        if reachable != nodes.len() {
            return Err(TreeError::Unreachable {
                reachable,
                total: nodes.len(),
            });
        }

        let mut expected = 0usize;
        let mut curr = first(nodes, self.arena.root());
        while let Some(i) = curr {
            let node = &nodes[i as usize];
            if node.start() as usize != expected {
                return Err(TreeError::Discontiguous {
                    node: i,
                    expected,
                    found: node.start() as usize,
                });
            }
            expected = node.end();
            curr = next(nodes, i);
        }
        Ok(())
    }

    fn check_rb(&self) -> Result<(), TreeError> {
        let nodes = self.arena.nodes();
        let root = self.arena.root().ok_or(TreeError::Empty)?;
        for (i, node) in nodes.iter().enumerate() {
            let i = i as u32;
            if node.p() == Some(i) || node.l() == Some(i) || node.r() == Some(i) {
                return Err(TreeError::SelfLink { node: i });
            }
            if let Some(p) = node.p() {
                let parent = &nodes[p as usize];
                if parent.l() != Some(i) && parent.r() != Some(i) {
                    return Err(TreeError::BrokenParentLink { node: i });
                }
            } else if i != root {
                return Err(TreeError::Unreachable {
                    reachable: size(nodes, Some(root)),
                    total: nodes.len(),
                });
            }
        }
        assert_red_black_tree(nodes, Some(root))
    }

    /// `true` when [`IntervalTree::validate`] finds no violation.
    pub fn check_tree_validity(&self) -> bool {
        self.validate().is_ok()
    }

    /// `true` when the red-black structure and parent links are consistent.
    pub fn check_valid_rb(&self) -> bool {
        self.check_rb().is_ok()
    }

    /// Renders the tree shape for debugging.
    pub fn print(&self) -> String
    where
        T: Debug,
    {
        red_black::print(self.arena.nodes(), self.arena.root(), "")
    }
}

impl<T: Clone + PartialEq> IntervalTree<T> {
    /// Sets slot `index` to `data`, splitting the covering run.
    ///
    /// Returns the index of the node that now holds `index`. When the slot
    /// already holds `data` the tree is unchanged and the covering run is
    /// returned.
    ///
    /// # Panics
    ///
    /// If `index >= DOMAIN_SIZE` or the tree is empty.
    pub fn insert(&mut self, index: usize, data: T) -> u32 {
        let idx = self.get_interval(index);
        let node = &self.arena[idx];
        if node.data == data {
            return idx;
        }

        let start = node.start() as usize;
        let end = node.end();
        if end - start == 1 {
            self.arena[idx].data = data;
            return idx;
        }

        let root = self.arena.root();
        let unit = self
            .arena
            .allocate(IntervalNode::new(data, index as u16, 1));
        let root = if index == start {
            // Existing node keeps the suffix.
            let node = &mut self.arena[idx];
            node.increment_start();
            node.set_length(end - start - 1);
            trace!(index, start, end, "split run head");
            red_black::insert_before(self.arena.nodes_mut(), root, unit, idx)
        } else if index == end - 1 {
            // Existing node keeps the prefix.
            self.arena[idx].set_length(end - start - 1);
            trace!(index, start, end, "split run tail");
            red_black::insert_after(self.arena.nodes_mut(), root, unit, idx)
        } else {
            let old = self.arena[idx].data.clone();
            self.arena[idx].set_length(index - start);
            let suffix = self.arena.allocate(IntervalNode::new(
                old,
                (index + 1) as u16,
                (end - index - 1) as u16,
            ));
            trace!(index, start, end, "split run in three");
            let root = red_black::insert_after(self.arena.nodes_mut(), root, unit, idx);
            red_black::insert_after(self.arena.nodes_mut(), root, suffix, unit)
        };
        self.arena.set_root(root);
        unit
    }

    /// Merges adjacent runs holding equal values by rebuilding the tree.
    ///
    /// Returns the number of runs removed. Arena indices obtained before the
    /// call are invalidated when anything is merged.
    pub fn compact(&mut self) -> usize {
        let before = self.size();
        let mut merged: Vec<LNode<T>> = Vec::with_capacity(before);
        for node in self.iter() {
            match merged.last_mut() {
                Some(prev) if prev.data == node.data => {
                    prev.length += node.length() as u16;
                }
                _ => merged.push(node.to_lnode()),
            }
        }

        let removed = before - merged.len();
        if removed > 0 {
            self.load(merged);
            debug!(before, after = self.size(), "interval tree compacted");
        }
        removed
    }
}

impl<'a, T> IntoIterator for &'a IntervalTree<T> {
    type Item = &'a IntervalNode<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
