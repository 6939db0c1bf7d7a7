//! The `merge` transformer: collapses a chain of non-branching
//! nodes into one, so callers see fewer stops without missing any distinct
//! emitted window. Performance-only: it must not change what a traversal
//! without it would eventually emit, only how many steps it takes to get
//! there.

use crate::coverage::Coverage;
use crate::tree::coloured::ColouredNode;

#[derive(Clone)]
pub struct MergedNode<'s, C> {
    inner: ColouredNode<'s, C>,
    sequence: Vec<u8>,
}

impl<'s, C: Coverage> MergedNode<'s, C> {
    pub fn root(store: &'s crate::store::RcsStore<C>) -> Self {
        let inner = ColouredNode::root(store);
        let sequence = inner.sequence();
        MergedNode { inner, sequence }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn is_sink(&self) -> bool {
        self.inner.is_sink()
    }

    pub fn next_alt(&self) -> Option<Self> {
        let inner = self.inner.next_alt()?;
        let sequence = inner.sequence();
        Some(MergedNode { inner, sequence })
    }

    /// Steps to the next branch point (or sink), concatenating the
    /// sequence of every non-branching node skipped along the way.
    pub fn next_ref(&self) -> Option<Self> {
        let mut current = self.inner.next_ref()?;
        let mut sequence = current.sequence();
        while current.labelled().base().pending_candidate().is_none() && !current.is_sink() {
            match current.next_ref() {
                Some(next) => {
                    current = next;
                    sequence.extend(current.sequence());
                }
                None => break,
            }
        }
        Some(MergedNode { inner: current, sequence })
    }
}
