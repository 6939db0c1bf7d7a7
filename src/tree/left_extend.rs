//! The `left-extend(k)` transformer: guarantees a node's labelled
//! path carries at least `k - 1` symbols of left context, prepending them
//! from `path_sequence()` when the node's own preceding history is
//! shorter.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

#[derive(Clone)]
pub struct LeftExtendedNode<'s, C> {
    inner: ColouredNode<'s, C>,
    k: u64,
}

impl<'s, C: Coverage> LeftExtendedNode<'s, C> {
    pub fn new(inner: ColouredNode<'s, C>, k: u64) -> Self {
        LeftExtendedNode { inner, k }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    /// This node's own window, prefixed with up to `k - 1` preceding
    /// symbols drawn from the full journaled path.
    pub fn extended_sequence(&self) -> Vec<u8> {
        let path = self.inner.path_sequence();
        let own = self.inner.sequence();
        let own_start = path.len() - own.len();
        let context_start = own_start.saturating_sub((self.k.saturating_sub(1)) as usize);
        path[context_start..].to_vec()
    }

    pub fn next_alt(&self) -> Option<Self> {
        Some(LeftExtendedNode { inner: self.inner.next_alt()?, k: self.k })
    }

    pub fn next_ref(&self) -> Option<Self> {
        Some(LeftExtendedNode { inner: self.inner.next_ref()?, k: self.k })
    }
}
