//! Pigeonhole q-gram filter: a multi-needle seed finder backing the
//! bucket searcher's seed-and-extend pipeline. Every needle is
//! decomposed into overlapping q-grams of a fixed length, all registered in
//! one open-addressing index; feeding a haystack reports a candidate hit
//! whenever the trailing `q` symbols fed so far match some needle's q-gram
//! verbatim.
//!
//! The index itself never changes after construction, so only the rolling
//! window of the last `q - 1` symbols (plus how many symbols have been fed
//! in total) needs to be part of the resumable state.

use super::Resumable;

/// A candidate hit: `needle_index`'s q-gram starting at `offset` (length
/// `count`) matched the `count` symbols ending at this call's current
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PigeonholeHit {
    pub needle_index: usize,
    pub offset: usize,
    pub count: usize,
    /// Offset, within the haystack slice passed to the `feed` call that
    /// reported this hit, one past the last symbol of the matched q-gram.
    pub end_in_segment: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PigeonholeState {
    window: Vec<u8>,
    position: u64,
}

/// One slot of the open-addressing q-gram table: a gram key plus every
/// `(needle_index, offset)` it was registered for (distinct needles, or a
/// repeated gram within one needle, can share a key).
#[derive(Clone)]
struct Slot {
    key: u64,
    postings: Vec<(usize, usize)>,
}

/// Open-addressing (linear-probe) index of every length-`q` gram across
/// `needle_list`, using an open-addressing table rather than a chained one.
struct QGramIndex {
    q: usize,
    table: Vec<Option<Slot>>,
}

fn gram_key(gram: &[u8]) -> u64 {
    let mut key = 0xcbf29ce484222325u64; // FNV-1a offset basis
    for &b in gram {
        key ^= b as u64;
        key = key.wrapping_mul(0x100000001b3);
    }
    key
}

impl QGramIndex {
    fn new(needle_list: &[Vec<u8>], q: usize) -> Self {
        let gram_count: usize = needle_list.iter().map(|n| n.len().saturating_sub(q - 1)).sum();
        let capacity = (gram_count.max(1) * 2).next_power_of_two();
        let mut table = vec![None; capacity];
        for (needle_index, needle) in needle_list.iter().enumerate() {
            if needle.len() < q {
                continue;
            }
            for offset in 0..=needle.len() - q {
                let key = gram_key(&needle[offset..offset + q]);
                Self::insert(&mut table, key, needle_index, offset);
            }
        }
        QGramIndex { q, table }
    }

    fn insert(table: &mut [Option<Slot>], key: u64, needle_index: usize, offset: usize) {
        let capacity = table.len();
        let mut probe = key as usize % capacity;
        loop {
            match &mut table[probe] {
                Some(slot) if slot.key == key => {
                    slot.postings.push((needle_index, offset));
                    return;
                }
                None => {
                    table[probe] = Some(Slot { key, postings: vec![(needle_index, offset)] });
                    return;
                }
                Some(_) => probe = (probe + 1) % capacity,
            }
        }
    }

    fn lookup(&self, key: u64) -> &[(usize, usize)] {
        let capacity = self.table.len();
        let mut probe = key as usize % capacity;
        for _ in 0..capacity {
            match &self.table[probe] {
                Some(slot) if slot.key == key => return &slot.postings,
                None => return &[],
                Some(_) => probe = (probe + 1) % capacity,
            }
        }
        &[]
    }
}

/// Multi-needle q-gram seed finder.
pub struct PigeonholeMatcher {
    needle_list: Vec<Vec<u8>>,
    q: usize,
    index: QGramIndex,
    window: Vec<u8>,
    position: u64,
}

impl PigeonholeMatcher {
    pub fn new(needle_list: Vec<Vec<u8>>, q: usize) -> Self {
        assert!(q > 0, "q-gram length must be positive");
        let index = QGramIndex::new(&needle_list, q);
        PigeonholeMatcher { needle_list, q, index, window: Vec::with_capacity(q), position: 0 }
    }

    pub fn needle(&self, index: usize) -> &[u8] {
        &self.needle_list[index]
    }

    pub fn q(&self) -> usize {
        self.q
    }

    /// Feeds `haystack`, invoking `on_hit` once per q-gram match completed
    /// at each position (symbols preceding this call, from earlier `feed`s
    /// or a `restore`d state, are honoured via the carried-over window).
    pub fn feed(&mut self, haystack: &[u8], mut on_hit: impl FnMut(PigeonholeHit)) {
        for (i, &symbol) in haystack.iter().enumerate() {
            self.position += 1;
            self.window.push(symbol);
            if self.window.len() > self.q {
                self.window.remove(0);
            }
            if self.window.len() == self.q {
                let key = gram_key(&self.window);
                for &(needle_index, offset) in self.index.lookup(key) {
                    if self.needle_list[needle_index][offset..offset + self.q] == self.window[..] {
                        on_hit(PigeonholeHit {
                            needle_index,
                            offset,
                            count: self.q,
                            end_in_segment: i + 1,
                        });
                    }
                }
            }
        }
    }
}

impl Resumable for PigeonholeMatcher {
    type State = PigeonholeState;

    fn window_size(&self) -> usize {
        self.q
    }

    fn capture(&self) -> Self::State {
        PigeonholeState { window: self.window.clone(), position: self.position }
    }

    fn restore(&mut self, state: Self::State) {
        self.window = state.window;
        self.position = state.position;
    }
}
