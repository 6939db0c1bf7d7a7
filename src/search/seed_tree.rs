//! The bucket searcher's own seed-phase tree: a pruned, seekable,
//! coloured tree, inlining the `prune` and `seek` transformers directly
//! over [`ColouredNode`] rather than composing the standalone
//! [`crate::tree::prune::PrunedNode`] / [`crate::tree::seek::SeekableNode`]
//! types.
//!
//! The full pipeline composes a "labelled + coloured +
//! trimmed + merged + seekable" tree. `trim` and `merge` are both
//! performance transformers only (merge must not change the set of
//! distinct emitted windows); the seed phase here visits every base-tree
//! node directly instead of merged runs, which changes how many stops the
//! traversal takes but not which q-grams are found or at what tree
//! position — so they are omitted and the seed tree composes only
//! `labelled ∘ coloured ∘ prune ∘ seek`, keeping the per-node bookkeeping
//! the bucket searcher needs direct.

use crate::coverage::Coverage;
use crate::store::RcsStore;
use crate::tree::seek::PathDescriptor;
use crate::tree::ColouredNode;

/// A root-anchored path descriptor for a [`SeedNode`], reusing the same
/// packed-bit-string shape as [`crate::tree::seek::SeekPosition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPosition(PathDescriptor);

impl SeedPosition {
    pub fn descriptor(&self) -> PathDescriptor {
        self.0
    }
}

#[derive(Clone)]
pub struct SeedNode<'s, C> {
    inner: ColouredNode<'s, C>,
    path: PathDescriptor,
}

impl<'s, C: Coverage> SeedNode<'s, C> {
    pub fn root(store: &'s RcsStore<C>) -> Self {
        SeedNode { inner: ColouredNode::root(store), path: PathDescriptor::empty() }
    }

    pub fn inner(&self) -> &ColouredNode<'s, C> {
        &self.inner
    }

    pub fn sequence(&self) -> Vec<u8> {
        self.inner.sequence()
    }

    pub fn path_sequence(&self) -> Vec<u8> {
        self.inner.path_sequence()
    }

    pub fn seed_position(&self) -> SeedPosition {
        SeedPosition(self.path)
    }

    pub fn is_sink(&self) -> bool {
        self.inner.is_sink()
    }

    /// Drops the child whose coverage becomes empty.
    pub fn next_alt(&self) -> Option<Self> {
        let child = self.inner.next_alt()?;
        if child.coverage().is_empty() {
            return None;
        }
        Some(SeedNode { inner: child, path: self.path.push(true) })
    }

    pub fn next_ref(&self) -> Option<Self> {
        let child = self.inner.next_ref()?;
        if child.coverage().is_empty() {
            return None;
        }
        Some(SeedNode { inner: child, path: self.path.push(false) })
    }

    /// Reconstructs the node `position` names by replaying its descriptor
    /// from the root.
    pub fn seek(store: &'s RcsStore<C>, position: &SeedPosition) -> Option<Self> {
        let mut node = Self::root(store);
        for alt in position.descriptor().iter() {
            node = if alt { node.next_alt()? } else { node.next_ref()? };
        }
        Some(node)
    }
}
