//! Run nodes and their packed layout.
//!
//! An [`IntervalNode`] is one run of identical values. Links are stored as
//! signed 16-bit arena indices (every index in a 32768-slot domain fits) and
//! the red/black color lives in the high bit of the start offset, so a node
//! costs four `u16`-sized fields plus the payload.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::red_black::RbNodeLike;
use crate::types::Node;

/// Number of addressable slots in the domain.
pub const DOMAIN_SIZE: usize = 32768;

/// High bit of the packed start field; set when the node is red.
pub const COLOR_BIT: u16 = 0x8000;

/// Low 15 bits of the packed start field; the run's start offset.
pub const START_MASK: u16 = 0x7FFF;

/// Raw link value for "no node".
pub const NIL: i16 = -1;

/// Raw parent value of a node that has been constructed but not yet linked
/// into a tree.
pub const UNLINKED: i16 = -2;

#[inline]
fn link_of(raw: i16) -> Option<u32> {
    if raw < 0 {
        None
    } else {
        Some(raw as u32)
    }
}

#[inline]
fn raw_of(link: Option<u32>) -> i16 {
    match link {
        Some(i) => {
            debug_assert!(i < DOMAIN_SIZE as u32, "arena index {i} exceeds domain");
            i as i16
        }
        None => NIL,
    }
}

/// Lightweight `(start, length, data)` run used for bulk loading and export.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LNode<T> {
    pub start: u16,
    pub length: u16,
    pub data: T,
}

impl<T> LNode<T> {
    pub fn new(start: u16, length: u16, data: T) -> Self {
        Self {
            start,
            length,
            data,
        }
    }

    pub fn set(&mut self, start: u16, length: u16, data: T) {
        self.start = start;
        self.length = length;
        self.data = data;
    }

    /// One past the last slot covered by this run.
    pub fn end(&self) -> usize {
        self.start as usize + self.length as usize
    }
}

/// A run stored in the tree.
#[derive(Clone, Debug)]
pub struct IntervalNode<T> {
    length: u16,
    left: i16,
    right: i16,
    parent: i16,
    // Also stores the color in `COLOR_BIT`.
    start: u16,
    pub(crate) data: T,
}

impl<T> IntervalNode<T> {
    /// Creates a red, unlinked node.
    pub fn new(data: T, start: u16, length: u16) -> Self {
        debug_assert!(start <= START_MASK);
        debug_assert!(length as usize <= DOMAIN_SIZE);
        Self {
            length,
            left: NIL,
            right: NIL,
            parent: UNLINKED,
            start: start | COLOR_BIT,
            data,
        }
    }

    #[inline]
    pub fn start(&self) -> u16 {
        self.start & START_MASK
    }

    #[inline]
    pub fn set_start(&mut self, start: u16) {
        debug_assert!(start <= START_MASK);
        self.start = (self.start & COLOR_BIT) | (start & START_MASK);
    }

    #[inline]
    pub fn increment_start(&mut self) {
        debug_assert!(self.start() < START_MASK, "start would carry into the color bit");
        self.start += 1;
    }

    #[inline]
    pub fn decrement_start(&mut self) {
        debug_assert!(self.start() > 0, "start would borrow from the color bit");
        self.start -= 1;
    }

    #[inline]
    pub fn paint_red(&mut self) {
        self.start |= COLOR_BIT;
    }

    #[inline]
    pub fn paint_black(&mut self) {
        self.start &= START_MASK;
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.start & COLOR_BIT != 0
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length as usize
    }

    #[inline]
    pub fn set_length(&mut self, length: usize) {
        debug_assert!((1..=DOMAIN_SIZE).contains(&length));
        self.length = length as u16;
    }

    /// One past the last slot covered by this run.
    #[inline]
    pub fn end(&self) -> usize {
        self.start() as usize + self.length as usize
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start() as usize && index < self.end()
    }

    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Raw parent link, including the [`NIL`] and [`UNLINKED`] sentinels.
    #[inline]
    pub fn raw_parent(&self) -> i16 {
        self.parent
    }

    /// `false` until the node has been attached to a tree (or made root).
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.parent != UNLINKED
    }

    pub fn to_lnode(&self) -> LNode<T>
    where
        T: Clone,
    {
        LNode::new(self.start(), self.length, self.data.clone())
    }
}

impl<T> From<LNode<T>> for IntervalNode<T> {
    fn from(run: LNode<T>) -> Self {
        IntervalNode::new(run.data, run.start, run.length)
    }
}

impl<T> Node for IntervalNode<T> {
    fn p(&self) -> Option<u32> {
        link_of(self.parent)
    }

    fn l(&self) -> Option<u32> {
        link_of(self.left)
    }

    fn r(&self) -> Option<u32> {
        link_of(self.right)
    }

    fn set_p(&mut self, v: Option<u32>) {
        self.parent = raw_of(v);
    }

    fn set_l(&mut self, v: Option<u32>) {
        self.left = raw_of(v);
    }

    fn set_r(&mut self, v: Option<u32>) {
        self.right = raw_of(v);
    }
}

impl<T> RbNodeLike for IntervalNode<T> {
    fn is_black(&self) -> bool {
        !self.is_red()
    }

    fn set_black(&mut self, black: bool) {
        if black {
            self.paint_black();
        } else {
            self.paint_red();
        }
    }
}
