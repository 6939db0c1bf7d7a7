//! Bit-parallel Shift-Or exact matching: one machine word of state
//! per needle, each bit tracking whether the needle's prefix of that length
//! is still alive as a suffix of everything seen so far.

use super::Resumable;

/// A hit ending at `end` (exclusive, symbols fed since this matcher's
/// construction or last `restore`), for `needle_index` into the list the
/// matcher was built with. `start = end - needle.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftOrHit {
    pub needle_index: usize,
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftOrState {
    words: Vec<u64>,
    position: u64,
}

/// Exact multi-needle matcher; every needle must fit in one machine word
/// (64 symbols).
pub struct ShiftOrMatcher {
    needles: Vec<Vec<u8>>,
    masks: Vec<[u64; 256]>,
    accept_bit: Vec<u64>,
    words: Vec<u64>,
    position: u64,
}

impl ShiftOrMatcher {
    pub fn new(needles: Vec<Vec<u8>>) -> Self {
        let masks = needles.iter().map(|n| build_mask(n)).collect();
        let accept_bit = needles
            .iter()
            .map(|n| {
                assert!(!n.is_empty() && n.len() <= 64, "Shift-Or needle must fit in one machine word");
                1u64 << (n.len() - 1)
            })
            .collect();
        let words = vec![!0u64; needles.len()];
        ShiftOrMatcher { needles, masks, accept_bit, words, position: 0 }
    }

    /// Feeds `haystack` through the matcher, invoking `on_hit` once per
    /// needle match ending inside this call.
    pub fn feed(&mut self, haystack: &[u8], mut on_hit: impl FnMut(ShiftOrHit)) {
        for &symbol in haystack {
            self.position += 1;
            for i in 0..self.needles.len() {
                let mask = self.masks[i][symbol as usize];
                self.words[i] = (self.words[i] << 1) | mask;
                if self.words[i] & self.accept_bit[i] == 0 {
                    on_hit(ShiftOrHit {
                        needle_index: i,
                        end: self.position,
                        start: self.position - self.needles[i].len() as u64,
                    });
                }
            }
        }
    }
}

fn build_mask(needle: &[u8]) -> [u64; 256] {
    let mut mask = [!0u64; 256];
    for (j, &symbol) in needle.iter().enumerate() {
        mask[symbol as usize] &= !(1u64 << j);
    }
    mask
}

impl Resumable for ShiftOrMatcher {
    type State = ShiftOrState;

    fn window_size(&self) -> usize {
        self.needles.iter().map(|n| n.len()).max().unwrap_or(0)
    }

    fn capture(&self) -> Self::State {
        ShiftOrState { words: self.words.clone(), position: self.position }
    }

    fn restore(&mut self, state: Self::State) {
        self.words = state.words;
        self.position = state.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_needle_reports_one_hit_at_the_expected_position() {
        let mut matcher = ShiftOrMatcher::new(vec![b"ATCACGAT".to_vec()]);
        let haystack = b"ACGTGACTAGCATCTAGCATCACGAT";
        let mut hits = Vec::new();
        matcher.feed(haystack, |hit| hits.push(hit));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].start, 18);
        assert_eq!(hits[0].end, 26);
    }

    #[test]
    fn resuming_after_a_split_yields_the_same_hits_as_one_feed() {
        let haystack = b"ACGTGACTAGCATCTAGCATCACGAT";
        let needle = vec![b"ATCACGAT".to_vec()];

        let mut whole = ShiftOrMatcher::new(needle.clone());
        let mut whole_hits = Vec::new();
        whole.feed(haystack, |hit| whole_hits.push(hit));

        for split in 0..haystack.len() {
            let mut split_matcher = ShiftOrMatcher::new(needle.clone());
            let mut split_hits = Vec::new();
            split_matcher.feed(&haystack[..split], |hit| split_hits.push(hit));
            let state = split_matcher.capture();
            split_matcher.restore(state);
            split_matcher.feed(&haystack[split..], |hit| split_hits.push(hit));
            assert_eq!(split_hits, whole_hits, "split at {} diverged", split);
        }
    }

    #[test]
    fn multiple_needles_are_tracked_independently() {
        let mut matcher = ShiftOrMatcher::new(vec![b"ACGT".to_vec(), b"CGTT".to_vec()]);
        let mut hits = Vec::new();
        matcher.feed(b"ACGTT", |hit| hits.push(hit));
        hits.sort_by_key(|h| h.needle_index);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].needle_index, 0);
        assert_eq!(hits[0].end, 4);
        assert_eq!(hits[1].needle_index, 1);
        assert_eq!(hits[1].end, 5);
    }
}
