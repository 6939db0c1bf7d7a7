//! Restorable Myers prefix matcher: edit-distance matching with an
//! error budget, used by the bucket searcher to extend a seed hit
//! forward (on the suffix) and, mirrored, backward (on the reversed prefix).
//!
//! Tracks one dynamic-programming row of length `m + 1` (`m` the needle
//! length), updated one haystack symbol at a time. `row[i]` is the edit
//! distance of aligning the needle's first `i` symbols against a suffix of
//! everything fed so far that ends at the current position — free start,
//! needle-end anchored, exactly the "prefix" semantics this matcher needs
//! since a haystack segment may begin anywhere relative to the true
//! alignment. `row[m]` after each symbol is the distance reported to
//! `on_hit` whenever it falls inside the error budget.

use super::Resumable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MyersHit {
    pub end: u64,
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyersState {
    row: Vec<u32>,
    position: u64,
}

pub struct RestorableMyersMatcher {
    needle: Vec<u8>,
    error_budget: u32,
    row: Vec<u32>,
    scratch: Vec<u32>,
    position: u64,
}

impl RestorableMyersMatcher {
    pub fn new(needle: &[u8], error_budget: u32) -> Self {
        assert!(!needle.is_empty(), "Myers needle must not be empty");
        let m = needle.len();
        RestorableMyersMatcher {
            needle: needle.to_vec(),
            error_budget,
            row: (0..=m as u32).collect(),
            scratch: vec![0; m + 1],
            position: 0,
        }
    }

    /// Feeds `haystack`, invoking `on_hit` every time the running edit
    /// distance of the whole needle against a suffix ending here falls
    /// within the error budget.
    pub fn feed(&mut self, haystack: &[u8], mut on_hit: impl FnMut(MyersHit)) {
        let m = self.needle.len();
        for &symbol in haystack {
            self.position += 1;
            self.scratch[0] = 0;
            for i in 1..=m {
                let cost = if self.needle[i - 1] == symbol { 0 } else { 1 };
                let diagonal = self.row[i - 1] + cost;
                let up = self.row[i] + 1;
                let left = self.scratch[i - 1] + 1;
                self.scratch[i] = diagonal.min(up).min(left);
            }
            std::mem::swap(&mut self.row, &mut self.scratch);

            let errors = self.row[m];
            if errors <= self.error_budget {
                on_hit(MyersHit { end: self.position, errors });
            }
        }
    }
}

impl Resumable for RestorableMyersMatcher {
    type State = MyersState;

    fn window_size(&self) -> usize {
        self.needle.len() + self.error_budget as usize
    }

    fn capture(&self) -> Self::State {
        MyersState { row: self.row.clone(), position: self.position }
    }

    fn restore(&mut self, state: Self::State) {
        self.row = state.row;
        self.position = state.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_has_zero_errors() {
        let mut matcher = RestorableMyersMatcher::new(b"ACGT", 0);
        let mut hits = Vec::new();
        matcher.feed(b"TTACGTTT", |hit| hits.push(hit));
        assert!(hits.iter().any(|h| h.errors == 0 && h.end == 6));
    }

    #[test]
    fn one_substitution_is_within_a_budget_of_one() {
        let mut matcher = RestorableMyersMatcher::new(b"ACGT", 1);
        let mut hits = Vec::new();
        matcher.feed(b"ACTT", |hit| hits.push(hit));
        let best = hits.iter().min_by_key(|h| h.errors).unwrap();
        assert_eq!(best.errors, 1);
        assert_eq!(best.end, 4);
    }

    #[test]
    fn no_hit_reported_when_errors_exceed_budget() {
        let mut matcher = RestorableMyersMatcher::new(b"ACGTACGT", 0);
        let mut hits = Vec::new();
        matcher.feed(b"TTTTTTTT", |hit| hits.push(hit));
        assert!(hits.is_empty());
    }

    #[test]
    fn resuming_after_a_split_yields_the_same_hits_as_one_feed() {
        let needle = b"ACGTACGT";
        let haystack = b"TTACGTACGTTTACGTGCGTTT";

        let mut whole = RestorableMyersMatcher::new(needle, 2);
        let mut whole_hits = Vec::new();
        whole.feed(haystack, |hit| whole_hits.push(hit));

        for split in 0..haystack.len() {
            let mut split_matcher = RestorableMyersMatcher::new(needle, 2);
            let mut split_hits = Vec::new();
            split_matcher.feed(&haystack[..split], |hit| split_hits.push(hit));
            let state = split_matcher.capture();
            split_matcher.restore(state);
            split_matcher.feed(&haystack[split..], |hit| split_hits.push(hit));
            assert_eq!(split_hits, whole_hits, "split at {} diverged", split);
        }
    }
}
