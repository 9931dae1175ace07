//! Balanced one-pass construction from a sorted partition.
//!
//! Node `i` of the arena is run `i` of the input. Each sub-range's median
//! becomes that subtree's root, so every level except the deepest is full.
//! Painting the deepest level red (and everything above it black) then gives
//! every root-to-leaf path the same black height without any rotations.

use crate::error::PartitionError;
use crate::node::{IntervalNode, LNode, DOMAIN_SIZE};
use crate::red_black::RbNodeLike;
use crate::types::Node;

/// Checks that `runs` is an ascending, gap-free partition of the domain.
pub(crate) fn check_partition<T>(runs: &[LNode<T>]) -> Result<(), PartitionError> {
    if runs.is_empty() {
        return Err(PartitionError::Empty);
    }
    if runs.len() > DOMAIN_SIZE {
        return Err(PartitionError::TooManyRuns {
            count: runs.len(),
            max: DOMAIN_SIZE,
        });
    }

    let mut expected = 0usize;
    for (position, run) in runs.iter().enumerate() {
        if run.length == 0 {
            return Err(PartitionError::ZeroLength { position });
        }
        if run.start as usize != expected {
            return Err(PartitionError::Discontiguous {
                position,
                expected,
                found: run.start as usize,
            });
        }
        expected = run.end();
    }

    if expected != DOMAIN_SIZE {
        return Err(PartitionError::Coverage {
            total: expected,
            expected: DOMAIN_SIZE,
        });
    }
    Ok(())
}

/// Builds the node set and root for `runs`. Input is not validated.
pub(crate) fn build<T>(runs: Vec<LNode<T>>) -> (Vec<IntervalNode<T>>, Option<u32>) {
    let n = runs.len();
    let mut nodes: Vec<IntervalNode<T>> = Vec::with_capacity(n);
    nodes.extend(runs.into_iter().map(IntervalNode::from));
    if n == 0 {
        return (nodes, None);
    }

    // Depth of the deepest level of a median-split tree with `n` nodes.
    let red_depth = (usize::BITS - 1 - n.leading_zeros()) as usize;
    let root = array_to_red_black_tree(&mut nodes, 0, n, None, 0, red_depth);
    if let Some(root) = root {
        nodes[root as usize].set_black(true);
    }
    (nodes, root)
}

fn array_to_red_black_tree<T>(
    nodes: &mut [IntervalNode<T>],
    lo: usize,
    hi: usize,
    parent: Option<u32>,
    depth: usize,
    red_depth: usize,
) -> Option<u32> {
    if lo >= hi {
        return None;
    }

    let x = lo + (hi - lo - 1) / 2;
    let left = array_to_red_black_tree(nodes, lo, x, Some(x as u32), depth + 1, red_depth);
    let right = array_to_red_black_tree(nodes, x + 1, hi, Some(x as u32), depth + 1, red_depth);

    let node = &mut nodes[x];
    node.set_p(parent);
    node.set_l(left);
    node.set_r(right);
    node.set_black(depth != red_depth);
    Some(x as u32)
}
