//! The bucket searcher: seed with a pigeonhole filter, extend
//! every hit forward (suffix) and backward (prefix) with restorable Myers
//! matchers, and report match positions in the seed tree's own coordinate
//! system.
//!
//! A separate reverse-tree pass over the prefix side is replaced here by a
//! direct backward scan of the seed node's own `path_sequence()`: the
//! root-to-node path is a single resolved haplotype history (this crate's
//! nodes carry no sibling ambiguity about their own ancestry, only about
//! their *descendants*), so there is nothing left to branch over when
//! walking it backwards, and the reversed slice is already materialized.
//! This keeps `tree_position` pinned at the seed node throughout — no
//! second node is ever constructed for the match's begin side.

use rayon::prelude::*;
use typed_builder::TypedBuilder;

use crate::coverage::Coverage;
use crate::matcher::{PigeonholeMatcher, Resumable, RestorableMyersMatcher};
use crate::store::RcsStore;
use crate::tree::chunk::ChunkedView;

use super::seed_tree::{SeedNode, SeedPosition};

/// A match position in the tree's own coordinate space: the
/// node reached by `tree_position` plus an offset into that node's
/// `path_sequence()` where the match begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPosition {
    pub tree_position: SeedPosition,
    pub label_offset: u64,
}

/// `{base_tree, needle_list}`: the unit the bucket searcher is
/// driven against. A caller splits a large store into buckets with
/// [`crate::tree::chunk::ChunkedView`] to search them independently.
pub struct Bucket<'s, C> {
    pub base_tree: &'s RcsStore<C>,
    pub needle_list: Vec<Vec<u8>>,
}

/// Drives seed-and-extend search over one [`Bucket`].
///
/// [`BucketSearcher::builder`] requires all three fields explicitly —
/// unlike [`BucketSearcher::new`], it does not compute a default seed
/// length, since that heuristic belongs to the convenience constructor, not
/// the declarative one.
#[derive(TypedBuilder)]
pub struct BucketSearcher<'s, C> {
    bucket: &'s Bucket<'s, C>,
    error_rate: f64,
    q: usize,
}

impl<'s, C: Coverage> BucketSearcher<'s, C> {
    pub fn new(bucket: &'s Bucket<'s, C>, error_rate: f64) -> Self {
        let q = Self::default_q(&bucket.needle_list);
        BucketSearcher { bucket, error_rate, q }
    }

    pub fn with_seed_length(mut self, q: usize) -> Self {
        self.q = q;
        self
    }

    fn default_q(needle_list: &[Vec<u8>]) -> usize {
        let shortest = needle_list.iter().map(|n| n.len()).min().unwrap_or(4);
        (shortest / 4).max(4)
    }

    fn error_budget(&self, needle_len: usize) -> u32 {
        (self.error_rate * needle_len as f64).floor() as u32
    }

    /// Runs the whole pipeline, invoking `on_match` for
    /// every confirmed hit, in seed-traversal order.
    pub fn search(&self, mut on_match: impl FnMut(usize, MatchPosition)) {
        if self.bucket.needle_list.is_empty() {
            return;
        }
        log::debug!(
            "seeding {} needles (q={}, error_rate={}) over a bucket of {} reference symbols",
            self.bucket.needle_list.len(),
            self.q,
            self.error_rate,
            self.bucket.base_tree.source().len(),
        );
        let mut pigeonhole = PigeonholeMatcher::new(self.bucket.needle_list.clone(), self.q);
        let root = SeedNode::root(self.bucket.base_tree);
        self.visit(&root, &mut pigeonhole, &mut on_match);
    }

    /// Convenience wrapper collecting every match into a `Vec`, in
    /// seed-traversal order; duplicates are not removed.
    pub fn search_all(&self) -> Vec<(usize, MatchPosition)> {
        let mut hits = Vec::new();
        self.search(|needle_index, position| hits.push((needle_index, position)));
        hits
    }

    fn visit(&self, node: &SeedNode<'s, C>, pigeonhole: &mut PigeonholeMatcher, on_match: &mut impl FnMut(usize, MatchPosition)) {
        let segment = node.sequence();
        let own_len = segment.len() as u64;
        let path_len = node.path_sequence().len() as u64;
        let window_start = path_len - own_len;

        let mut hits = Vec::new();
        pigeonhole.feed(&segment, |hit| hits.push(hit));
        for hit in hits {
            self.extend_seed(node, window_start + hit.end_in_segment as u64, &hit, on_match);
        }

        let base_state = pigeonhole.capture();
        if let Some(ref_child) = node.next_ref() {
            self.visit(&ref_child, pigeonhole, on_match);
            pigeonhole.restore(base_state.clone());
        }
        if let Some(alt_child) = node.next_alt() {
            self.visit(&alt_child, pigeonhole, on_match);
            pigeonhole.restore(base_state);
        }
    }

    /// From a seed hit ending at `abs_end` in the seed node's
    /// own path-sequence coordinates, extend forward (suffix) and then
    /// backward (prefix), emitting one [`MatchPosition`] per confirmed
    /// combination within the needle's error budget.
    fn extend_seed(
        &self,
        node: &SeedNode<'s, C>,
        abs_end: u64,
        hit: &crate::matcher::PigeonholeHit,
        on_match: &mut impl FnMut(usize, MatchPosition),
    ) {
        let needle = pigeonhole_needle(&self.bucket.needle_list, hit.needle_index);
        let budget = self.error_budget(needle.len());
        let gram_start = abs_end - hit.count as u64;
        let suffix = &needle[hit.offset + hit.count..];

        let mut suffix_hits: Vec<u32> = Vec::new();
        if suffix.is_empty() {
            suffix_hits.push(0);
        } else {
            let mut extender = RestorableMyersMatcher::new(suffix, budget);
            let window_size = extender.window_size() as u64;
            self.extend_suffix(node, abs_end, &mut extender, window_size, 0, &mut suffix_hits);
        }

        for e_s in suffix_hits {
            if e_s > budget {
                continue;
            }
            let prefix_budget = budget - e_s;
            let prefix = &needle[..hit.offset];
            if prefix.is_empty() {
                on_match(
                    hit.needle_index,
                    MatchPosition { tree_position: node.seed_position(), label_offset: gram_start },
                );
                continue;
            }

            let reversed_prefix: Vec<u8> = prefix.iter().rev().copied().collect();
            let mut extender = RestorableMyersMatcher::new(&reversed_prefix, prefix_budget);
            let window = extender.window_size() as u64;
            let take_from = gram_start.saturating_sub(window);
            let path_sequence = node.path_sequence();
            let preceding = &path_sequence[take_from as usize..gram_start as usize];
            let reversed_text: Vec<u8> = preceding.iter().rev().copied().collect();

            let mut begins = Vec::new();
            extender.feed(&reversed_text, |prefix_hit| {
                if prefix_hit.errors <= prefix_budget {
                    begins.push(gram_start - prefix_hit.end);
                }
            });
            for begin in begins {
                on_match(hit.needle_index, MatchPosition { tree_position: node.seed_position(), label_offset: begin });
            }
        }
    }

    /// Walks forward from `node`, starting at `start_in_path` (a position
    /// within `node`'s own path-sequence window), feeding `extender` and
    /// collecting every residual-error count it reports within its
    /// window. Stops descending once `consumed` reaches the matcher's
    /// window size, applied inline here rather than through a standalone
    /// `trim` node — see module docs.
    fn extend_suffix(
        &self,
        node: &SeedNode<'s, C>,
        start_in_path: u64,
        extender: &mut RestorableMyersMatcher,
        window_size: u64,
        consumed: u64,
        hits: &mut Vec<u32>,
    ) {
        let own_len = node.sequence().len() as u64;
        let path_len = node.path_sequence().len() as u64;
        let window_start = path_len - own_len;
        let local_start = (start_in_path.saturating_sub(window_start)) as usize;
        let remainder = &node.sequence()[local_start.min(node.sequence().len())..];

        let mut local_hits = Vec::new();
        extender.feed(remainder, |h| local_hits.push(h));
        hits.extend(local_hits.iter().map(|h| h.errors));
        let consumed = consumed + remainder.len() as u64;
        if consumed >= window_size {
            return;
        }

        let base_state = extender.capture();
        if let Some(ref_child) = node.next_ref() {
            self.extend_suffix(&ref_child, ref_child.path_sequence().len() as u64 - ref_child.sequence().len() as u64, extender, window_size, consumed, hits);
            extender.restore(base_state.clone());
        }
        if let Some(alt_child) = node.next_alt() {
            self.extend_suffix(&alt_child, alt_child.path_sequence().len() as u64 - alt_child.sequence().len() as u64, extender, window_size, consumed, hits);
            extender.restore(base_state);
        }
    }
}

fn pigeonhole_needle<'a>(needle_list: &'a [Vec<u8>], index: usize) -> &'a [u8] {
    &needle_list[index]
}

/// Searches every chunk of
/// `chunked` independently on the global rayon pool and concatenates the
/// per-chunk match streams. Additive convenience over [`BucketSearcher::search`];
/// a match in the overlap region of two adjacent chunks is reported by
/// both, left for callers to deduplicate by position.
pub fn par_search<C: Coverage + Send + Sync>(
    chunked: &ChunkedView<'_, C>,
    needle_list: Vec<Vec<u8>>,
    error_rate: f64,
) -> Vec<(usize, MatchPosition)> {
    (0..chunked.len())
        .into_par_iter()
        .flat_map(|i| {
            let store = chunked.get(i);
            let bucket = Bucket { base_tree: &store, needle_list: needle_list.clone() };
            let searcher = BucketSearcher::new(&bucket, error_rate);
            searcher.search_all()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{CoverageDomain, DenseCoverage};
    use crate::variant::Variant;

    #[test]
    fn exact_needle_matches_on_an_unvaried_reference() {
        let store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGTACGTACGTACGT".to_vec(), 1);
        let bucket = Bucket { base_tree: &store, needle_list: vec![b"GTACGTAC".to_vec()] };
        let searcher = BucketSearcher::new(&bucket, 0.0).with_seed_length(4);

        let hits = searcher.search_all();
        assert!(!hits.is_empty());
        for (needle_index, position) in &hits {
            let node = SeedNode::seek(&store, &position.tree_position).unwrap();
            let path = node.path_sequence();
            let begin = position.label_offset as usize;
            let needle = &bucket.needle_list[*needle_index];
            assert_eq!(&path[begin..begin + needle.len()], needle.as_slice());
        }
    }

    #[test]
    fn builder_requires_every_field_and_matches_new() {
        let store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGTACGTACGTACGT".to_vec(), 1);
        let bucket = Bucket { base_tree: &store, needle_list: vec![b"GTACGTAC".to_vec()] };
        let via_builder = BucketSearcher::builder().bucket(&bucket).error_rate(0.0).q(4).build();
        let via_new = BucketSearcher::new(&bucket, 0.0).with_seed_length(4);

        assert_eq!(via_builder.search_all(), via_new.search_all());
    }

    #[test]
    fn needle_spanning_an_alt_branch_matches_with_zero_errors() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"AAAACCCCGGGGTTTT".to_vec(), 1);
        store
            .add(Variant::indel(4, 4, b"NNNN".to_vec()), DenseCoverage::from_members([0], CoverageDomain::new(1)))
            .unwrap();

        // "AAAA" + "NNNN" (alt) + "GGGGTTTT": an 8-mer straddling the branch.
        let needle = b"AANNNNGG".to_vec();
        let bucket = Bucket { base_tree: &store, needle_list: vec![needle.clone()] };
        let searcher = BucketSearcher::new(&bucket, 0.0).with_seed_length(4);

        let hits = searcher.search_all();
        assert!(hits.iter().any(|(_, position)| {
            let node = SeedNode::seek(&store, &position.tree_position).unwrap();
            let path = node.path_sequence();
            let begin = position.label_offset as usize;
            begin + needle.len() <= path.len() && &path[begin..begin + needle.len()] == needle.as_slice()
        }));
    }
}
