//! Red-black balancing over index-addressed nodes.

pub mod print;
pub mod types;
pub mod util;

pub use print::print;
pub use types::RbNodeLike;
pub use util::{
    assert_red_black_tree, grandparent, insert_after, insert_before, insert_left, insert_right,
    rotate_left, rotate_right, uncle,
};
