//! Sequence tree: a lazy expansion of the RCS store into every
//! distinct haplotype path, wrapped by a fixed pipeline of transformers.
//!
//! The spec this crate implements describes transformers as freely
//! composable (`labelled must precede coloured; seek must be last`, but
//! otherwise order-independent where they commute). Building that as a
//! fully generic node-trait pipeline would mean threading a type parameter
//! for every transformer through every other one. Since the only pipeline
//! this crate (and its bucket searcher) ever actually drives is the
//! canonical one — labelled, then coloured, then trim/prune/merge/
//! left-extend in any order, then seek — each transformer here wraps the
//! concrete type produced by its required predecessor instead of an
//! abstract `TreeNode`. The composition law still holds for the pipeline
//! as built; it is just not enforced by the type system for orderings
//! nobody constructs.
//!
//! [`base::BaseNode`] walks the store directly. [`labelled::LabelledNode`]
//! adds the journaled sequence. [`coloured::ColouredNode`] adds haplotype
//! coverage. The remaining transformers wrap `ColouredNode`.

pub mod base;
pub mod chunk;
pub mod coloured;
pub mod k_depth;
pub mod labelled;
pub mod left_extend;
pub mod merge;
pub mod prune;
pub mod seek;
pub mod stats;
pub mod traverser;
pub mod trim;

pub use base::BaseNode;
pub use coloured::ColouredNode;
pub use k_depth::KDepthNode;
pub use labelled::LabelledNode;
pub use merge::MergedNode;
pub use seek::{PathDescriptor, SeekPosition, SeekableNode};
pub use stats::TreeStats;

/// The common shape every transformer stage in this pipeline exposes,
/// needed only by the traverser so it can drive whichever stage a
/// caller built its pipeline up to, without committing every transformer
/// to it individually.
pub trait TreeNode: Sized + Clone {
    fn next_ref(&self) -> Option<Self>;
    fn next_alt(&self) -> Option<Self>;
    fn is_sink(&self) -> bool;
}

impl<'s, C: crate::coverage::Coverage> TreeNode for base::BaseNode<'s, C> {
    fn next_ref(&self) -> Option<Self> {
        base::BaseNode::next_ref(self)
    }
    fn next_alt(&self) -> Option<Self> {
        base::BaseNode::next_alt(self)
    }
    fn is_sink(&self) -> bool {
        base::BaseNode::is_sink(self)
    }
}

impl<'s, C: crate::coverage::Coverage> TreeNode for coloured::ColouredNode<'s, C> {
    fn next_ref(&self) -> Option<Self> {
        coloured::ColouredNode::next_ref(self)
    }
    fn next_alt(&self) -> Option<Self> {
        coloured::ColouredNode::next_alt(self)
    }
    fn is_sink(&self) -> bool {
        coloured::ColouredNode::is_sink(self)
    }
}

impl<'s, C: crate::coverage::Coverage> TreeNode for merge::MergedNode<'s, C> {
    fn next_ref(&self) -> Option<Self> {
        merge::MergedNode::next_ref(self)
    }
    fn next_alt(&self) -> Option<Self> {
        merge::MergedNode::next_alt(self)
    }
    fn is_sink(&self) -> bool {
        merge::MergedNode::is_sink(self)
    }
}

impl<'s, C: crate::coverage::Coverage> TreeNode for seek::SeekableNode<'s, C> {
    fn next_ref(&self) -> Option<Self> {
        seek::SeekableNode::next_ref(self)
    }
    fn next_alt(&self) -> Option<Self> {
        seek::SeekableNode::next_alt(self)
    }
    fn is_sink(&self) -> bool {
        seek::SeekableNode::is_sink(self)
    }
}

impl<'s, C: crate::coverage::Coverage> TreeNode for k_depth::KDepthNode<'s, C> {
    fn next_ref(&self) -> Option<Self> {
        k_depth::KDepthNode::next_ref(self)
    }
    fn next_alt(&self) -> Option<Self> {
        k_depth::KDepthNode::next_alt(self)
    }
    fn is_sink(&self) -> bool {
        k_depth::KDepthNode::is_sink(self)
    }
}
