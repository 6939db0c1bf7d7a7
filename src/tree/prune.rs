//! The `prune` transformer: drops any child whose coverage has
//! become empty, so the traverser never descends into a subtree no
//! haplotype follows.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

#[derive(Clone)]
pub struct PrunedNode<'s, C> {
    inner: ColouredNode<'s, C>,
}

impl<'s, C: Coverage> PrunedNode<'s, C> {
    pub fn new(inner: ColouredNode<'s, C>) -> Self {
        PrunedNode { inner }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    pub fn next_alt(&self) -> Option<Self> {
        let child = self.inner.next_alt()?;
        if child.coverage().is_empty() {
            None
        } else {
            Some(PrunedNode { inner: child })
        }
    }

    pub fn next_ref(&self) -> Option<Self> {
        let child = self.inner.next_ref()?;
        if child.coverage().is_empty() {
            None
        } else {
            Some(PrunedNode { inner: child })
        }
    }
}
