use std::fmt::Debug;

use crate::node::IntervalNode;
use crate::types::Node;

/// Debug printer for interval trees.
///
/// Each line shows the arena index, the color, the covered half-open range
/// and the payload; children follow indented under `L=` / `R=`.
pub fn print<T: Debug>(arena: &[IntervalNode<T>], node: Option<u32>, tab: &str) -> String {
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_red() { "red" } else { "black" };
            let left = print(arena, n.l(), &format!("{tab}  "));
            let right = print(arena, n.r(), &format!("{tab}  "));
            format!(
                "Node[{i}] {color} [{}, {}) = {:?}\n{tab}L={left}\n{tab}R={right}",
                n.start(),
                n.end(),
                n.data()
            )
        }
    }
}
