//! Run-length compressed interval tree.
//!
//! An [`IntervalTree`] stores one value per slot of a fixed
//! [`DOMAIN_SIZE`]-slot array, but keeps only the maximal runs of equal
//! values. Runs live in a red-black tree whose nodes sit in a flat arena and
//! refer to each other by `u32`-convertible indices instead of pointers.
//!
//! # Example
//!
//! ```
//! use interval_tree::{IntervalTree, DOMAIN_SIZE};
//!
//! let mut tree = IntervalTree::single(0u16);
//! tree.insert(100, 7);
//!
//! assert_eq!(*tree.get_data(99), 0);
//! assert_eq!(*tree.get_data(100), 7);
//! assert_eq!(*tree.get_data(101), 0);
//! assert_eq!(tree.size(), 3);
//! assert!(tree.check_tree_validity());
//!
//! let mut buffer = vec![0u16; DOMAIN_SIZE];
//! tree.uncompress_into_buffer(&mut buffer);
//! assert_eq!(buffer[100], 7);
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`] link trait |
//! [`node`] | [`IntervalNode`] with packed start/color, [`LNode`] runs |
//! [`arena`] | [`NodeArena`] index-addressed store |
//! [`util`] | `first`, `next`, `prev`, `last`, `size`, `height` |
//! [`red_black`] | insert fixup, rotations, validator, printer |
//! [`iter`] | in-order [`Iter`] |
//! [`error`] | [`TreeError`], [`PartitionError`] |

pub mod arena;
mod bulk;
pub mod error;
pub mod iter;
pub mod node;
pub mod red_black;
mod tree;
pub mod types;
pub mod util;

pub use arena::NodeArena;
pub use error::{PartitionError, TreeError};
pub use iter::Iter;
pub use node::{IntervalNode, LNode, COLOR_BIT, DOMAIN_SIZE, NIL, START_MASK, UNLINKED};
pub use red_black::RbNodeLike;
pub use tree::IntervalTree;
pub use types::Node;
