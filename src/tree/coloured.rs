//! The `coloured` transformer: attaches haplotype coverage to each
//! labelled node.

use crate::coverage::Coverage;
use crate::store::RcsStore;
use crate::tree::labelled::LabelledNode;

/// A labelled node with the coverage of the haplotypes still following this
/// path: `coverage(root) = {0..H}`; an alt-descent intersects with the
/// variant's coverage, a decline difference-subtracts it, and resuming the
/// reference after a taken alt carries the alt's coverage forward
/// unchanged.
#[derive(Clone)]
pub struct ColouredNode<'s, C> {
    labelled: LabelledNode<'s, C>,
    coverage: C,
}

impl<'s, C: Coverage> ColouredNode<'s, C> {
    pub fn root(store: &'s RcsStore<C>) -> Self {
        let domain = crate::coverage::CoverageDomain::new(store.size());
        let coverage = C::from_members(0..store.size(), domain);
        ColouredNode { labelled: LabelledNode::root(store), coverage }
    }

    pub fn labelled(&self) -> &LabelledNode<'s, C> {
        &self.labelled
    }

    pub fn sequence(&self) -> Vec<u8> {
        self.labelled.sequence()
    }

    pub fn path_sequence(&self) -> Vec<u8> {
        self.labelled.path_sequence()
    }

    pub fn coverage(&self) -> &C {
        &self.coverage
    }

    pub fn is_sink(&self) -> bool {
        self.labelled.is_sink()
    }

    pub fn next_alt(&self) -> Option<Self> {
        let idx = self.labelled.base().pending_candidate()?;
        let child_labelled = self.labelled.next_alt()?;
        let variant_coverage = self.labelled.base().store().variants()[idx].coverage();
        let coverage = self.coverage.intersection(variant_coverage).expect("shared haplotype domain");
        Some(ColouredNode { labelled: child_labelled, coverage })
    }

    pub fn next_ref(&self) -> Option<Self> {
        let was_on_variant = self.labelled.base().from_variant();
        let declined_candidate = if was_on_variant { None } else { self.labelled.base().pending_candidate() };

        let child_labelled = self.labelled.next_ref()?;

        let coverage = if was_on_variant {
            // Resuming the reference after a taken alternate: stay within
            // the haplotype set that took it.
            self.coverage.clone()
        } else if let Some(idx) = declined_candidate {
            let variant_coverage = self.labelled.base().store().variants()[idx].coverage();
            self.coverage.difference(variant_coverage).expect("shared haplotype domain")
        } else {
            self.coverage.clone()
        };
        Some(ColouredNode { labelled: child_labelled, coverage })
    }
}
