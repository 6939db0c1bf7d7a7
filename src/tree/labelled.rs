//! The `labelled` transformer: attaches a journaled sequence to
//! each base-tree node.

use crate::coverage::Coverage;
use crate::errors::Error;
use crate::journal::Journal;
use crate::store::RcsStore;
use crate::tree::base::BaseNode;
use crate::variant::Variant;

fn apply_variant(journal: &mut Journal, at: u64, variant: &Variant) -> Result<(), Error> {
    match variant {
        Variant::Snv { replacement, .. } => journal.record_substitution(at, vec![*replacement]),
        Variant::Indel { deletion_len, insertion, .. } => {
            journal.record_deletion(at, at + deletion_len)?;
            journal.record_insertion(at, insertion.clone())
        }
    }
}

/// A base-tree node with a private journal tracking the journaled-space
/// window `[journal_low, journal_high)` this node occupies.
#[derive(Clone)]
pub struct LabelledNode<'s, C> {
    base: BaseNode<'s, C>,
    journal: Journal<'s>,
    journal_low: u64,
    journal_high: u64,
}

impl<'s, C: Coverage> LabelledNode<'s, C> {
    pub fn root(store: &'s RcsStore<C>) -> Self {
        let base = BaseNode::root(store);
        let len = base.high_boundary().position() - base.low_boundary().position();
        LabelledNode { base, journal: Journal::new(store.source()), journal_low: 0, journal_high: len }
    }

    pub fn base(&self) -> &BaseNode<'s, C> {
        &self.base
    }

    pub fn is_sink(&self) -> bool {
        self.base.is_sink()
    }

    /// The substring of the journaled path between this node's own
    /// boundaries.
    pub fn sequence(&self) -> Vec<u8> {
        self.journal.sequence().slice(self.journal_low..self.journal_high)
    }

    /// The whole journaled path prefix up to and including this node.
    pub fn path_sequence(&self) -> Vec<u8> {
        self.journal.sequence().slice(0..self.journal_high)
    }

    pub fn next_alt(&self) -> Option<Self> {
        let child_base = self.base.next_alt()?;
        let idx = child_base.variant_index().expect("alt node carries a variant index");
        let variant = self.base.store().variants()[idx].variant().clone();
        let mut journal = self.journal.clone();
        apply_variant(&mut journal, self.journal_high, &variant).expect("variant falls within journal domain");
        let journal_low = self.journal_high;
        let journal_high = journal_low + variant.insertion().len() as u64;
        Some(LabelledNode { base: child_base, journal, journal_low, journal_high })
    }

    pub fn next_ref(&self) -> Option<Self> {
        let child_base = self.base.next_ref()?;
        let run_len = child_base.high_boundary().position() - child_base.low_boundary().position();
        let journal_low = self.journal_high;
        let journal_high = journal_low + run_len;
        Some(LabelledNode { base: child_base, journal: self.journal.clone(), journal_low, journal_high })
    }
}
