//! The `k-depth` transformer: caps how deep an alternate-path
//! subtree is allowed to descend, for sampling and tree statistics.
//!
//! Depth only accrues while on an alternate path: taking the first alt at a
//! branch starts a subtree at depth 1; every further step while still on
//! that path (whether `next_ref` or `next_alt`) deepens it by one. Once the
//! bound is reached the whole rest of that subtree is cut — both `next_ref`
//! and `next_alt` return `None` — since a reference step taken while on an
//! alternate path never leaves it.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

#[derive(Clone)]
pub struct KDepthNode<'s, C> {
    inner: ColouredNode<'s, C>,
    max_depth: usize,
    depth: usize,
}

impl<'s, C: Coverage> KDepthNode<'s, C> {
    pub fn new(inner: ColouredNode<'s, C>, max_depth: usize) -> Self {
        KDepthNode { inner, max_depth, depth: 0 }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_sink(&self) -> bool {
        self.inner.is_sink()
    }

    fn on_alternate_path(&self) -> bool {
        self.inner.labelled().base().on_alternate_path()
    }

    fn max_depth_reached(&self, is_alt: bool) -> bool {
        let will_be_on_alt = is_alt || self.on_alternate_path();
        will_be_on_alt && self.depth == self.max_depth
    }

    fn child(&self, inner: ColouredNode<'s, C>, is_alt: bool) -> Self {
        let was_on_alt = self.on_alternate_path();
        let depth = if was_on_alt || is_alt { self.depth + 1 } else { self.depth };
        KDepthNode { inner, max_depth: self.max_depth, depth }
    }

    pub fn next_alt(&self) -> Option<Self> {
        if self.max_depth_reached(true) {
            return None;
        }
        Some(self.child(self.inner.next_alt()?, true))
    }

    pub fn next_ref(&self) -> Option<Self> {
        if self.max_depth_reached(false) {
            return None;
        }
        Some(self.child(self.inner.next_ref()?, false))
    }
}
