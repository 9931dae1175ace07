//! Node trait definitions.
//!
//! Nodes never hold pointers to each other. Every link is an `Option<u32>`
//! index into a [`Vec`]-backed arena, and all tree-manipulation functions take
//! the arena as `&mut [N]` and work with indices.

/// Binary-tree links (`p`, `l`, `r`).
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}
