//! Resumable online matchers: the contract every matcher driven by
//! the tree traverser shares, plus the three concrete implementations.
//!
//! Every matcher feeds a haystack segment through some internal bit-vector
//! or index state, reporting hits as it goes. The traverser backtracks
//! through the tree rather than the haystack, so a matcher must be able to
//! hand its whole internal state out as a value (`capture`) and be put back
//! into an earlier state (`restore`) without losing any information a fresh
//! `feed` from that point on would have relied on — the resumable-matcher
//! invariant tested in `tests/matchers.rs`.

pub mod myers;
pub mod pigeonhole;
pub mod shift_or;

pub use myers::{MyersHit, RestorableMyersMatcher};
pub use pigeonhole::{PigeonholeHit, PigeonholeMatcher};
pub use shift_or::{ShiftOrHit, ShiftOrMatcher};

/// Shared state-capture contract. `State` must be an independent
/// value: after `m.capture()` then arbitrary further mutation of `m`,
/// `m.restore(state)` must put `m` back exactly where `capture` found it.
pub trait Resumable {
    type State: Clone;

    /// Context width this matcher needs before it can report a match,
    /// including any edit-distance allowance.
    fn window_size(&self) -> usize;

    fn capture(&self) -> Self::State;
    fn restore(&mut self, state: Self::State);
}
