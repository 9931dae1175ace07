//! Error types.

use thiserror::Error;

/// An invariant violation found by [`IntervalTree::validate`].
///
/// [`IntervalTree::validate`]: crate::IntervalTree::validate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Tree is empty")]
    Empty,
    #[error("Runs cover {total} slots, expected {expected}")]
    Coverage { total: usize, expected: usize },
    #[error("Node {node} has length {length}")]
    LengthOutOfRange { node: u32, length: usize },
    #[error("Root is not black")]
    RedRoot,
    #[error("Root has parent")]
    RootHasParent,
    #[error("Node {node} was never linked")]
    Unlinked { node: u32 },
    #[error("Node {node} links to itself")]
    SelfLink { node: u32 },
    #[error("Node {node} is disconnected from parent")]
    BrokenParentLink { node: u32 },
    #[error("Red node {node} has red child")]
    RedRed { node: u32 },
    #[error("Black height mismatch under node {node}")]
    BlackHeight { node: u32 },
    #[error("Only {reachable} of {total} nodes are reachable from the root")]
    Unreachable { reachable: usize, total: usize },
    #[error("Node {node} starts at {found}, expected {expected}")]
    Discontiguous {
        node: u32,
        expected: usize,
        found: usize,
    },
}

/// Malformed bulk-load input rejected by
/// [`IntervalTree::try_init_from_sorted_array`].
///
/// [`IntervalTree::try_init_from_sorted_array`]: crate::IntervalTree::try_init_from_sorted_array
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Partition is empty")]
    Empty,
    #[error("Partition has {count} runs, at most {max} fit the domain")]
    TooManyRuns { count: usize, max: usize },
    #[error("Run {position} has zero length")]
    ZeroLength { position: usize },
    #[error("Run {position} starts at {found}, expected {expected}")]
    Discontiguous {
        position: usize,
        expected: usize,
        found: usize,
    },
    #[error("Runs cover {total} slots, expected {expected}")]
    Coverage { total: usize, expected: usize },
}
