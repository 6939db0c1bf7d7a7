//! Breakends and breakpoints: the coordinate system shared by the
//! variant map, the tree nodes and the seek positions.

use std::cmp::Ordering;

/// Which side of a node boundary a breakend marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BreakendSide {
    Low,
    High,
}

/// A `(position, side)` pair. Ordered by position, then `High < Low`: a
/// high-end at `p` closes a variant and must be visited before a new one
/// opens at the same `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Breakend {
    position: u64,
    side: BreakendSide,
}

impl Breakend {
    pub fn new(position: u64, side: BreakendSide) -> Self {
        Breakend { position, side }
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn side(&self) -> BreakendSide {
        self.side
    }
}

impl PartialOrd for Breakend {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Breakend {
    fn cmp(&self, other: &Self) -> Ordering {
        self.position.cmp(&other.position).then_with(|| match (self.side, other.side) {
            (BreakendSide::High, BreakendSide::Low) => Ordering::Less,
            (BreakendSide::Low, BreakendSide::High) => Ordering::Greater,
            _ => Ordering::Equal,
        })
    }
}

/// `(low, high)` with `low <= high`; `breakend_span = high - low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    low: u64,
    high: u64,
}

impl Breakpoint {
    /// Constructs a breakpoint; debug-asserts `low <= high` since this is an
    /// internal invariant checked once at variant construction, not a
    /// caller-facing fallible boundary.
    pub fn new(low: u64, high: u64) -> Self {
        debug_assert!(low <= high, "breakpoint low must not exceed high");
        Breakpoint { low, high }
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn high(&self) -> u64 {
        self.high
    }

    pub fn span(&self) -> u64 {
        self.high - self.low
    }

    pub fn low_breakend(&self) -> Breakend {
        Breakend::new(self.low, BreakendSide::Low)
    }

    pub fn high_breakend(&self) -> Breakend {
        Breakend::new(self.high, BreakendSide::High)
    }
}
