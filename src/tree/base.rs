//! The base volatile tree: the raw node shape implied by the RCS
//! store, before any labelling, colouring, or other decoration is attached.

use crate::breakend::{Breakend, BreakendSide};
use crate::coverage::Coverage;
use crate::store::RcsStore;

/// Which record, if any, is next in visiting order at a node's high
/// boundary. A `Reference` node's `candidate_cursor` walks the run of
/// records opening at the same position one at a time ("visited in
/// key order" edge case for overlapping variants); it is not materialized
/// up front as a separate node-state tag, the deterministic enumeration
/// simply falls out of advancing this cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Reference { candidate_cursor: usize },
    Alternate { variant_index: usize },
}

/// A node of the base tree: a reference stretch, or the inserted content of
/// one taken variant. Cheap to clone (no heap allocation beyond the store
/// reference it borrows).
#[derive(Debug, Clone)]
pub struct BaseNode<'s, C> {
    store: &'s RcsStore<C>,
    low: u64,
    high: u64,
    kind: Kind,
    on_alternate_path: bool,
}

impl<'s, C: Coverage> BaseNode<'s, C> {
    pub fn root(store: &'s RcsStore<C>) -> Self {
        let (high, cursor) = Self::reference_run(store, 0);
        BaseNode { store, low: 0, high, kind: Kind::Reference { candidate_cursor: cursor }, on_alternate_path: false }
    }

    /// True once this node or any ancestor took an alternate branch;
    /// sticky for the rest of that path, even after the reference resumes.
    pub fn on_alternate_path(&self) -> bool {
        self.on_alternate_path
    }

    /// The reference run starting at `from`: its end (the next record's
    /// opening position, or the end of the source) and the index of the
    /// first candidate record found there.
    fn reference_run(store: &'s RcsStore<C>, from: u64) -> (u64, usize) {
        let cursor = store.lower_bound(Breakend::new(from, BreakendSide::Low));
        let high = store
            .variants()
            .get(cursor)
            .map(|r| r.variant().low_breakend().position())
            .unwrap_or_else(|| store.source().len() as u64);
        (high, cursor)
    }

    pub fn store(&self) -> &'s RcsStore<C> {
        self.store
    }

    pub fn low_boundary(&self) -> Breakend {
        Breakend::new(self.low, BreakendSide::Low)
    }

    pub fn high_boundary(&self) -> Breakend {
        match self.kind {
            Kind::Reference { .. } => Breakend::new(self.high, BreakendSide::Low),
            Kind::Alternate { .. } => Breakend::new(self.high, BreakendSide::High),
        }
    }

    pub fn from_reference(&self) -> bool {
        matches!(self.kind, Kind::Reference { .. })
    }

    pub fn from_variant(&self) -> bool {
        matches!(self.kind, Kind::Alternate { .. })
    }

    /// The record this node is the alternate content of, if any.
    pub fn variant_index(&self) -> Option<usize> {
        match self.kind {
            Kind::Alternate { variant_index } => Some(variant_index),
            Kind::Reference { .. } => None,
        }
    }

    /// The record pending at this node's high boundary that `next_alt()`
    /// would take (or `next_ref()` would step past), if any.
    pub(crate) fn pending_candidate(&self) -> Option<usize> {
        match self.kind {
            Kind::Reference { candidate_cursor } => {
                let rec = self.store.variants().get(candidate_cursor)?;
                if rec.variant().low_breakend().position() == self.high {
                    Some(candidate_cursor)
                } else {
                    None
                }
            }
            Kind::Alternate { .. } => None,
        }
    }

    pub fn is_sink(&self) -> bool {
        self.from_reference() && self.pending_candidate().is_none() && self.high >= self.store.source().len() as u64
    }

    /// Steps to the alternate content of the pending candidate at this
    /// node's high boundary, or `None` ("nil") if there is none.
    pub fn next_alt(&self) -> Option<Self> {
        let idx = self.pending_candidate()?;
        let variant = self.store.variants()[idx].variant();
        Some(BaseNode {
            store: self.store,
            low: self.high,
            high: variant.high_breakend().position(),
            kind: Kind::Alternate { variant_index: idx },
            on_alternate_path: true,
        })
    }

    /// Declines the pending candidate (moving to the next one sharing this
    /// boundary, if any), resumes the reference after a taken alternate, or
    /// advances past a boundary with no candidate at all. Returns `None`
    /// ("nil") at the sink.
    pub fn next_ref(&self) -> Option<Self> {
        match self.kind {
            Kind::Reference { candidate_cursor } => {
                if let Some(idx) = self.pending_candidate() {
                    debug_assert_eq!(idx, candidate_cursor);
                    // A zero-length node sitting at the branch position,
                    // offering the next candidate sharing it ("visited
                    // in key order" collision handling).
                    return Some(BaseNode {
                        store: self.store,
                        low: self.high,
                        high: self.high,
                        kind: Kind::Reference { candidate_cursor: candidate_cursor + 1 },
                        on_alternate_path: self.on_alternate_path,
                    });
                }
                if self.high >= self.store.source().len() as u64 {
                    return None;
                }
                let (high, cursor) = Self::reference_run(self.store, self.high + 1);
                Some(BaseNode {
                    store: self.store,
                    low: self.high,
                    high,
                    kind: Kind::Reference { candidate_cursor: cursor },
                    on_alternate_path: self.on_alternate_path,
                })
            }
            Kind::Alternate { .. } => {
                let resume = self.high;
                if resume >= self.store.source().len() as u64 {
                    return None;
                }
                let (high, cursor) = Self::reference_run(self.store, resume);
                Some(BaseNode {
                    store: self.store,
                    low: resume,
                    high,
                    kind: Kind::Reference { candidate_cursor: cursor },
                    on_alternate_path: self.on_alternate_path,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageDomain, DenseCoverage};
    use crate::variant::Variant;

    fn cov(members: &[usize]) -> DenseCoverage {
        DenseCoverage::from_members(members.iter().copied(), CoverageDomain::new(2))
    }

    #[test]
    fn declining_an_snv_advances_past_its_position() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGT".to_vec(), 2);
        store.add(Variant::snv(4, b'N'), cov(&[0])).unwrap();

        let root = BaseNode::root(&store);
        let declined = root.next_ref().unwrap();
        assert!(declined.from_reference());
        assert_eq!(declined.low_boundary().position(), 4);
        assert_eq!(declined.high_boundary().position(), 4);

        let past_branch = declined.next_ref().unwrap();
        assert_eq!(past_branch.low_boundary().position(), 4);
        assert_eq!(past_branch.high_boundary().position(), 8);
    }

    #[test]
    fn taking_an_alt_then_next_ref_resumes_after_deletion() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGT".to_vec(), 2);
        store.add(Variant::indel(2, 3, vec![]), cov(&[0])).unwrap(); // deletes [2,5)

        let root = BaseNode::root(&store);
        let alt = root.next_alt().unwrap();
        assert!(alt.from_variant());
        assert_eq!(alt.low_boundary().position(), 2);
        assert_eq!(alt.high_boundary().position(), 5);

        let resumed = alt.next_ref().unwrap();
        assert!(resumed.from_reference());
        assert_eq!(resumed.low_boundary().position(), 5);
    }

    #[test]
    fn colliding_variants_at_same_position_are_visited_in_sequence() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGT".to_vec(), 2);
        store.add(Variant::snv(3, b'A'), cov(&[0])).unwrap();
        store.add(Variant::snv(3, b'C'), cov(&[1])).unwrap();

        let root = BaseNode::root(&store);
        let first_alt = root.next_alt().unwrap();
        assert!(first_alt.from_variant());
        let declined_first = root.next_ref().unwrap();
        let second_alt = declined_first.next_alt().unwrap();
        assert!(second_alt.from_variant());
        assert_ne!(first_alt.variant_index(), second_alt.variant_index());
    }

    #[test]
    fn on_alternate_path_is_sticky_after_resuming_reference() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGT".to_vec(), 2);
        store.add(Variant::snv(4, b'N'), cov(&[0])).unwrap();

        let root = BaseNode::root(&store);
        assert!(!root.on_alternate_path());

        let alt = root.next_alt().unwrap();
        assert!(alt.on_alternate_path());

        let resumed = alt.next_ref().unwrap();
        assert!(resumed.on_alternate_path());
    }
}
