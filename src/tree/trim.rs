//! The `trim(k)` transformer: caps how much of a node's labelled
//! window is exposed once `k` symbols of context have accumulated since the
//! last branch.
//!
//! Branch-cutting (stopping the traversal once no further content can
//! contribute to a width-`k` context) is left to callers via
//! [`TrimmedNode::exhausted`]: this transformer always reports the correct
//! boundary and exhaustion state, but does not itself refuse to descend,
//! since deeper nodes may still start their own, distinct width-`k`
//! windows. A caller building exactly width-`k` windows (the bucket
//! searcher's seed step) stops descending once `exhausted()` is true.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

#[derive(Clone)]
pub struct TrimmedNode<'s, C> {
    inner: ColouredNode<'s, C>,
    k: u64,
    context_len: u64,
}

impl<'s, C: Coverage> TrimmedNode<'s, C> {
    pub fn new(inner: ColouredNode<'s, C>, k: u64) -> Self {
        let context_len = inner.sequence().len() as u64;
        TrimmedNode { inner, k, context_len: context_len.min(k) }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    /// The node's sequence, truncated so the accumulated context since the
    /// last branch never exceeds `k` symbols.
    pub fn sequence(&self) -> Vec<u8> {
        let full = self.inner.sequence();
        let already = self.context_len.saturating_sub(full.len() as u64);
        let budget = self.k.saturating_sub(already) as usize;
        full.into_iter().take(budget).collect()
    }

    /// True once `k` symbols of context have accumulated since the last
    /// branch: further descent cannot extend the *current* window, though a
    /// later branch may start a fresh one.
    pub fn exhausted(&self) -> bool {
        self.context_len >= self.k
    }

    fn child(&self, inner: ColouredNode<'s, C>, reset: bool) -> Self {
        let own_len = inner.sequence().len() as u64;
        let context_len = if reset { own_len } else { self.context_len + own_len };
        TrimmedNode { inner, k: self.k, context_len: context_len.min(self.k) }
    }

    pub fn next_alt(&self) -> Option<Self> {
        Some(self.child(self.inner.next_alt()?, true))
    }

    pub fn next_ref(&self) -> Option<Self> {
        let reset = self.inner.labelled().base().from_variant();
        Some(self.child(self.inner.next_ref()?, reset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::DenseCoverage;
    use crate::store::RcsStore;

    #[test]
    fn sequence_is_truncated_to_k() {
        let store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGTACGT".to_vec(), 1);
        let root = ColouredNode::root(&store);
        let trimmed = TrimmedNode::new(root, 3);
        assert_eq!(trimmed.sequence(), b"ACG".to_vec());
        assert!(trimmed.exhausted());
    }
}
