//! The `chunk(size, overlap)` transformer: partitions the
//! reference into independent, self-contained partial trees so a caller
//! can drive `N` of them on `N` worker threads.
//!
//! Each chunk is materialized as its own small [`RcsStore`] (rebased to
//! chunk-local coordinates) rather than a view borrowing the parent store,
//! so it owns no shared mutable state with its siblings. Variants whose
//! breakpoint is not fully contained in `[start, start + size + overlap)`
//! are dropped from that chunk rather than clipped; a read whose seed
//! falls near a chunk edge and needs such a variant is expected to also
//! seed-match in the neighbouring (overlapping) chunk instead.

use crate::coverage::Coverage;
use crate::store::RcsStore;
use crate::variant::Variant;

fn rebase(variant: &Variant, start: u64) -> Variant {
    match variant {
        Variant::Snv { position, replacement } => Variant::snv(position - start, *replacement),
        Variant::Indel { position, deletion_len, insertion } => {
            Variant::indel(position - start, *deletion_len, insertion.clone())
        }
    }
}

/// An indexable view producing, for index `i`, a partial store rooted at
/// reference position `i * size` with length `size + overlap`.
pub struct ChunkedView<'s, C> {
    store: &'s RcsStore<C>,
    size: u64,
    overlap: u64,
}

impl<'s, C: Coverage> ChunkedView<'s, C> {
    pub fn new(store: &'s RcsStore<C>, size: u64, overlap: u64) -> Self {
        assert!(size > 0, "chunk size must be positive");
        ChunkedView { store, size, overlap }
    }

    pub fn len(&self) -> usize {
        let source_len = self.store.source().len() as u64;
        ((source_len + self.size - 1) / self.size).max(1) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.store.source().is_empty()
    }

    /// Builds the `index`-th partial store.
    pub fn get(&self, index: usize) -> RcsStore<C> {
        let source_len = self.store.source().len() as u64;
        let start = (index as u64 * self.size).min(source_len);
        let end = (start + self.size + self.overlap).min(source_len);

        let mut chunk = RcsStore::new(self.store.source()[start as usize..end as usize].to_vec(), self.store.size())
            .with_collision_policy(self.store.collision_policy());

        for record in self.store.variants() {
            let low = record.variant().low_breakend().position();
            let high = record.variant().high_breakend().position();
            if low >= start && high <= end {
                chunk
                    .add(rebase(record.variant(), start), record.coverage().clone())
                    .expect("rebased variant stays within the chunk's domain");
            }
        }
        chunk
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageDomain, DenseCoverage};

    #[test]
    fn chunk_contains_only_variants_fully_inside_its_range() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"AAAACCCCGGGGTTTT".to_vec(), 1);
        store.add(Variant::snv(2, b'N'), DenseCoverage::from_members([0], CoverageDomain::new(1))).unwrap();
        store.add(Variant::snv(10, b'N'), DenseCoverage::from_members([0], CoverageDomain::new(1))).unwrap();

        let view = ChunkedView::new(&store, 8, 0);
        assert_eq!(view.len(), 2);

        let first = view.get(0);
        assert_eq!(first.source(), b"AAAACCCC");
        assert_eq!(first.variants().len(), 1);

        let second = view.get(1);
        assert_eq!(second.source(), b"GGGGTTTT");
        assert_eq!(second.variants().len(), 1);
        assert_eq!(second.variants()[0].variant().position(), 2);
    }
}
