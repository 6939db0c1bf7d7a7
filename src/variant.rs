//! Variants and the packed breakend key that orders the variant map.

use derefable::Derefable;

use crate::breakend::{Breakend, BreakendSide, Breakpoint};
use crate::coverage::Coverage;

/// A local edit on the reference: either an SNV or a generic indel
/// (insertion-only, deletion-only, or substitution, per).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Variant {
    Snv { position: u64, replacement: u8 },
    Indel { position: u64, deletion_len: u64, insertion: Vec<u8> },
}

impl Variant {
    pub fn snv(position: u64, replacement: u8) -> Self {
        Variant::Snv { position, replacement }
    }

    pub fn indel(position: u64, deletion_len: u64, insertion: Vec<u8>) -> Self {
        Variant::Indel { position, deletion_len, insertion }
    }

    pub fn position(&self) -> u64 {
        match self {
            Variant::Snv { position, .. } => *position,
            Variant::Indel { position, .. } => *position,
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        match self {
            Variant::Snv { position, .. } => Breakpoint::new(*position, *position + 1),
            Variant::Indel { position, deletion_len, .. } => {
                Breakpoint::new(*position, *position + *deletion_len)
            }
        }
    }

    pub fn low_breakend(&self) -> Breakend {
        self.breakpoint().low_breakend()
    }

    pub fn high_breakend(&self) -> Breakend {
        self.breakpoint().high_breakend()
    }

    pub fn deletion_len(&self) -> u64 {
        match self {
            Variant::Snv { .. } => 1,
            Variant::Indel { deletion_len, .. } => *deletion_len,
        }
    }

    pub fn insertion(&self) -> &[u8] {
        match self {
            Variant::Snv { replacement, .. } => std::slice::from_ref(replacement),
            Variant::Indel { insertion, .. } => insertion,
        }
    }

    /// `|I| - d`, the shift applied to downstream journal entries.
    pub fn effective_length_change(&self) -> i64 {
        self.insertion().len() as i64 - self.deletion_len() as i64
    }

    pub fn alt_kind(&self) -> AltKind {
        match self {
            Variant::Snv { .. } => AltKind::Snv,
            Variant::Indel { deletion_len, insertion, .. } => match (*deletion_len, insertion.is_empty()) {
                (0, _) => AltKind::Insertion,
                (_, true) => AltKind::Deletion,
                (_, false) => AltKind::Substitution,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AltKind {
    Snv,
    Insertion,
    Deletion,
    Substitution,
}

/// A proxy pairing a variant reference with a coverage reference; forwards
/// every [`Variant`] accessor and additionally exposes `coverage()`.
#[derive(Derefable, Debug, Clone, Copy)]
pub struct CoveredVariant<'a, C> {
    #[deref]
    variant: &'a Variant,
    coverage: &'a C,
}

impl<'a, C: Coverage> CoveredVariant<'a, C> {
    pub fn new(variant: &'a Variant, coverage: &'a C) -> Self {
        CoveredVariant { variant, coverage }
    }

    pub fn variant(&self) -> &'a Variant {
        self.variant
    }

    pub fn coverage(&self) -> &'a C {
        self.coverage
    }
}

/// Kind rank used by [`PackedBreakendKey`]'s ordering: closing events (0)
/// sort before SNVs (1..4), which sort before opening insertions (5) and
/// opening deletions (6).
fn acgt_rank(symbol: u8) -> u32 {
    match symbol.to_ascii_uppercase() {
        b'A' => 0,
        b'C' => 1,
        b'G' => 2,
        b'T' => 3,
        _ => 3,
    }
}

/// Compacts `(kind rank: 3 bits, position: 29 bits)` into one `u32` so that
/// plain integer ordering already realizes the `(position asc, kind rank
/// asc)` rule: the kind rank occupies the low bits, the position the
/// high bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct PackedBreakendKey(u32);

impl PackedBreakendKey {
    const KIND_BITS: u32 = 3;
    const KIND_MASK: u32 = (1 << Self::KIND_BITS) - 1;
    pub const MAX_POSITION: u32 = (1 << (32 - Self::KIND_BITS)) - 1;

    pub const DELETION_HIGH_RANK: u32 = 0;
    pub const INSERTION_LOW_RANK: u32 = 5;
    pub const DELETION_LOW_RANK: u32 = 6;

    pub fn new(position: u32, kind_rank: u32) -> Self {
        debug_assert!(position <= Self::MAX_POSITION, "breakend position overflows packed key");
        debug_assert!(kind_rank <= Self::KIND_MASK, "kind rank overflows packed key");
        PackedBreakendKey((position << Self::KIND_BITS) | kind_rank)
    }

    /// Key for a variant's opening (low-breakend) record in the variant map.
    pub fn for_opening(variant: &Variant) -> Self {
        let position = variant.low_breakend().position() as u32;
        let rank = match variant.alt_kind() {
            AltKind::Snv => {
                1 + acgt_rank(match variant {
                    Variant::Snv { replacement, .. } => *replacement,
                    _ => unreachable!(),
                })
            }
            AltKind::Insertion => Self::INSERTION_LOW_RANK,
            AltKind::Deletion | AltKind::Substitution => Self::DELETION_LOW_RANK,
        };
        Self::new(position, rank)
    }

    /// Synthetic key for a variant's closing (high-breakend) event, used by
    /// the base tree to find "what closes here" independent of what opens
    /// at the same position.
    pub fn for_closing(variant: &Variant) -> Self {
        Self::new(variant.high_breakend().position() as u32, Self::DELETION_HIGH_RANK)
    }

    pub fn position(&self) -> u32 {
        self.0 >> Self::KIND_BITS
    }

    pub fn kind_rank(&self) -> u32 {
        self.0 & Self::KIND_MASK
    }

    pub fn breakend(&self, side: BreakendSide) -> Breakend {
        Breakend::new(self.position() as u64, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_key_orders_by_position_then_kind() {
        let earlier = PackedBreakendKey::new(3, PackedBreakendKey::DELETION_LOW_RANK);
        let later_closing = PackedBreakendKey::new(4, PackedBreakendKey::DELETION_HIGH_RANK);
        assert!(earlier < later_closing);

        let closing = PackedBreakendKey::new(5, PackedBreakendKey::DELETION_HIGH_RANK);
        let snv = PackedBreakendKey::new(5, 2);
        let opening_ins = PackedBreakendKey::new(5, PackedBreakendKey::INSERTION_LOW_RANK);
        assert!(closing < snv);
        assert!(snv < opening_ins);
    }

    #[test]
    fn effective_length_change_matches_insertion_minus_deletion() {
        let v = Variant::indel(10, 2, vec![b'A', b'C', b'G']);
        assert_eq!(v.effective_length_change(), 1);
    }

    #[test]
    fn snv_breakpoint_has_unit_span() {
        let v = Variant::snv(7, b'G');
        assert_eq!(v.breakpoint().span(), 1);
    }
}
