use crate::error::TreeError;
use crate::util::{get_l, get_p, get_r, set_l, set_p, set_r};

use super::types::RbNodeLike;

#[inline]
fn is_black<N: RbNodeLike>(arena: &[N], i: u32) -> bool {
    arena[i as usize].is_black()
}

#[inline]
fn is_red_link<N: RbNodeLike>(arena: &[N], i: Option<u32>) -> bool {
    i.map(|i| !is_black(arena, i)).unwrap_or(false)
}

#[inline]
fn set_black<N: RbNodeLike>(arena: &mut [N], i: u32, v: bool) {
    arena[i as usize].set_black(v);
}

pub fn grandparent<N: RbNodeLike>(arena: &[N], n: u32) -> Option<u32> {
    get_p(arena, n).and_then(|p| get_p(arena, p))
}

/// Sibling of `n`'s parent.
pub fn uncle<N: RbNodeLike>(arena: &[N], n: u32) -> Option<u32> {
    let p = get_p(arena, n)?;
    let g = get_p(arena, p)?;
    if get_l(arena, g) == Some(p) {
        get_r(arena, g)
    } else {
        get_l(arena, g)
    }
}

/// Attaches `n` as the left child of `p` and rebalances.
///
/// `p` must not have a left child. Returns the new root.
pub fn insert_left<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32> {
    debug_assert!(get_l(arena, p).is_none());
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_black(arena, n, false);
    fixup(arena, root, n)
}

/// Attaches `n` as the right child of `p` and rebalances.
///
/// `p` must not have a right child. Returns the new root.
pub fn insert_right<N: RbNodeLike>(arena: &mut [N], root: Option<u32>, n: u32, p: u32) -> Option<u32> {
    debug_assert!(get_r(arena, p).is_none());
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    set_l(arena, n, None);
    set_r(arena, n, None);
    set_black(arena, n, false);
    fixup(arena, root, n)
}

/// Links `n` so that it becomes the in-order successor of `anchor`.
pub fn insert_after<N: RbNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    anchor: u32,
) -> Option<u32> {
    match get_r(arena, anchor) {
        None => insert_right(arena, root, n, anchor),
        Some(r) => {
            let mut curr = r;
            while let Some(l) = get_l(arena, curr) {
                curr = l;
            }
            insert_left(arena, root, n, curr)
        }
    }
}

/// Links `n` so that it becomes the in-order predecessor of `anchor`.
pub fn insert_before<N: RbNodeLike>(
    arena: &mut [N],
    root: Option<u32>,
    n: u32,
    anchor: u32,
) -> Option<u32> {
    match get_l(arena, anchor) {
        None => insert_left(arena, root, n, anchor),
        Some(l) => {
            let mut curr = l;
            while let Some(r) = get_r(arena, curr) {
                curr = r;
            }
            insert_right(arena, root, n, curr)
        }
    }
}

/// Restores the red-black invariants after the red node `n` was linked in.
fn fixup<N: RbNodeLike>(arena: &mut [N], mut root: Option<u32>, mut n: u32) -> Option<u32> {
    while let Some(mut p) = get_p(arena, n) {
        if is_black(arena, p) {
            break;
        }
        // A red parent is never the root.
        let Some(g) = get_p(arena, p) else {
            set_black(arena, p, true);
            break;
        };
        let u = uncle(arena, n);
        if is_red_link(arena, u) {
            set_black(arena, p, true);
            if let Some(u) = u {
                set_black(arena, u, true);
            }
            set_black(arena, g, false);
            n = g;
            continue;
        }

        let parent_is_left = get_l(arena, g) == Some(p);
        if parent_is_left && get_r(arena, p) == Some(n) {
            root = rotate_left(arena, root, p);
            std::mem::swap(&mut n, &mut p);
        } else if !parent_is_left && get_l(arena, p) == Some(n) {
            root = rotate_right(arena, root, p);
            std::mem::swap(&mut n, &mut p);
        }

        root = if parent_is_left {
            rotate_right(arena, root, g)
        } else {
            rotate_left(arena, root, g)
        };
        set_black(arena, p, true);
        set_black(arena, g, false);
        break;
    }

    if let Some(r) = root {
        set_black(arena, r, true);
    }
    root
}

/// Rotates `x` down to the left, lifting its right child. Returns the new
/// root.
pub fn rotate_left<N: RbNodeLike>(arena: &mut [N], mut root: Option<u32>, x: u32) -> Option<u32> {
    let Some(y) = get_r(arena, x) else {
        return root;
    };
    let yl = get_l(arena, y);
    set_r(arena, x, yl);
    if let Some(yl) = yl {
        set_p(arena, yl, Some(x));
    }

    let p = get_p(arena, x);
    set_p(arena, y, p);
    match p {
        None => root = Some(y),
        Some(p) => {
            if get_l(arena, p) == Some(x) {
                set_l(arena, p, Some(y));
            } else {
                set_r(arena, p, Some(y));
            }
        }
    }

    set_l(arena, y, Some(x));
    set_p(arena, x, Some(y));
    root
}

/// Rotates `x` down to the right, lifting its left child. Returns the new
/// root.
pub fn rotate_right<N: RbNodeLike>(arena: &mut [N], mut root: Option<u32>, x: u32) -> Option<u32> {
    let Some(y) = get_l(arena, x) else {
        return root;
    };
    let yr = get_r(arena, y);
    set_l(arena, x, yr);
    if let Some(yr) = yr {
        set_p(arena, yr, Some(x));
    }

    let p = get_p(arena, x);
    set_p(arena, y, p);
    match p {
        None => root = Some(y),
        Some(p) => {
            if get_r(arena, p) == Some(x) {
                set_r(arena, p, Some(y));
            } else {
                set_l(arena, p, Some(y));
            }
        }
    }

    set_r(arena, y, Some(x));
    set_p(arena, x, Some(y));
    root
}

/// Checks root color, parent back-links, red-red edges and black height.
pub fn assert_red_black_tree<N: RbNodeLike>(arena: &[N], root: Option<u32>) -> Result<(), TreeError> {
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(TreeError::RootHasParent);
    }
    if !is_black(arena, root) {
        return Err(TreeError::RedRoot);
    }

    fn black_height<N: RbNodeLike>(arena: &[N], node: Option<u32>) -> Result<usize, TreeError> {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = get_l(arena, node);
        let r = get_r(arena, node);

        if l == Some(node) || r == Some(node) || get_p(arena, node) == Some(node) {
            return Err(TreeError::SelfLink { node });
        }
        for child in [l, r].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(TreeError::BrokenParentLink { node: child });
            }
        }

        if !is_black(arena, node) && (is_red_link(arena, l) || is_red_link(arena, r)) {
            return Err(TreeError::RedRed { node });
        }

        let lh = black_height(arena, l)?;
        let rh = black_height(arena, r)?;
        if lh != rh {
            return Err(TreeError::BlackHeight { node });
        }

        Ok(lh + usize::from(is_black(arena, node)))
    }

    black_height(arena, Some(root)).map(|_| ())
}
