use crate::types::Node;

/// Red-black specific node behavior.
pub trait RbNodeLike: Node {
    fn is_black(&self) -> bool;
    fn set_black(&mut self, black: bool);
}
