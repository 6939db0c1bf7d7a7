//! The referentially compressed sequence store: reference plus a
//! sorted, breakend-keyed variant map, each record carrying a coverage.

use derive_builder::Builder;
use getset::Getters;

use crate::breakend::{Breakend, BreakendSide};
use crate::coverage::Coverage;
use crate::errors::Error;
use crate::variant::{PackedBreakendKey, Variant};

/// What to do when two variants share the same opening breakend and kind
/// rank. `KeepAll` keeps every colliding variant rather than silently
/// discarding one, and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    KeepAll,
    PreferShorterEffect,
    PreferFirst,
}

impl Default for CollisionPolicy {
    fn default() -> Self {
        CollisionPolicy::KeepAll
    }
}

#[derive(Debug, Clone, Getters, serde::Serialize, serde::Deserialize)]
pub struct VariantRecord<C> {
    key: PackedBreakendKey,
    #[getset(get = "pub")]
    variant: Variant,
    #[getset(get = "pub")]
    coverage: C,
}

impl<C> VariantRecord<C> {
    pub fn key(&self) -> PackedBreakendKey {
        self.key
    }
}

/// Owns `(R, H, variant-map)`; constructed once and immutable thereafter.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RcsStore<C> {
    source: Vec<u8>,
    haplotype_count: usize,
    records: Vec<VariantRecord<C>>,
    collision_policy: CollisionPolicy,
}

impl<C: Coverage> RcsStore<C> {
    pub fn new(source: Vec<u8>, haplotype_count: usize) -> Self {
        RcsStore {
            source,
            haplotype_count,
            records: Vec::new(),
            collision_policy: CollisionPolicy::default(),
        }
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Inserts a variant with its coverage, keeping `records` sorted by the
    /// opening [`PackedBreakendKey`].
    pub fn add(&mut self, variant: Variant, coverage: C) -> Result<(), Error> {
        let bp = variant.breakpoint();
        if bp.high() > self.source.len() as u64 {
            return Err(Error::OutOfDomain {
                low: bp.low(),
                high: bp.high(),
                reference_len: self.source.len() as u64,
                coverage_size: coverage.len(),
                haplotype_count: self.haplotype_count,
            });
        }
        if coverage.domain().size() != self.haplotype_count {
            return Err(Error::OutOfDomain {
                low: bp.low(),
                high: bp.high(),
                reference_len: self.source.len() as u64,
                coverage_size: coverage.domain().size(),
                haplotype_count: self.haplotype_count,
            });
        }

        let key = PackedBreakendKey::for_opening(&variant);
        let insert_at = self.records.partition_point(|r| r.key < key);

        if self.collision_policy != CollisionPolicy::KeepAll {
            if let Some(existing) = self.records.get(insert_at) {
                if existing.key == key {
                    let keep_new = match self.collision_policy {
                        CollisionPolicy::PreferFirst => false,
                        CollisionPolicy::PreferShorterEffect => {
                            variant.effective_length_change().abs()
                                < existing.variant.effective_length_change().abs()
                        }
                        CollisionPolicy::KeepAll => unreachable!(),
                    };
                    if !keep_new {
                        return Ok(());
                    }
                    self.records[insert_at] = VariantRecord { key, variant, coverage };
                    return Ok(());
                }
            }
        }

        self.records.insert(insert_at, VariantRecord { key, variant, coverage });
        log::debug!(
            "inserted variant at position {} (kind rank {}), {} records total",
            key.position(),
            key.kind_rank(),
            self.records.len()
        );
        Ok(())
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn variants(&self) -> &[VariantRecord<C>] {
        &self.records
    }

    /// The haplotype count `H`.
    pub fn size(&self) -> usize {
        self.haplotype_count
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    fn probe_key(breakend: Breakend, lower: bool) -> PackedBreakendKey {
        let position = breakend.position() as u32;
        let rank = match (breakend.side(), lower) {
            (BreakendSide::High, true) => PackedBreakendKey::DELETION_HIGH_RANK,
            (BreakendSide::High, false) => 1, // smallest Low-side rank: one past High
            (BreakendSide::Low, true) => 1,
            (BreakendSide::Low, false) => PackedBreakendKey::DELETION_LOW_RANK + 1,
        };
        PackedBreakendKey::new(position, rank)
    }

    /// First record whose key is not ordered before `breakend`.
    pub fn lower_bound(&self, breakend: Breakend) -> usize {
        let probe = Self::probe_key(breakend, true);
        self.records.partition_point(|r| r.key < probe)
    }

    /// One past the last record whose key is ordered at-or-before `breakend`.
    pub fn upper_bound(&self, breakend: Breakend) -> usize {
        let probe = Self::probe_key(breakend, false);
        self.records.partition_point(|r| r.key < probe)
    }

    /// Records whose high breakend lands exactly at `position`: the "what
    /// closes here" query the base tree needs to resume the reference path
    /// after a deletion. Linear in record count; the variant map is
    /// expected to be small enough per locus that this is not a bottleneck.
    pub fn closing_at(&self, position: u64) -> impl Iterator<Item = &VariantRecord<C>> {
        self.records.iter().filter(move |r| r.variant.high_breakend().position() == position)
    }
}

/// Declarative, validating construction of an [`RcsStore`].
///
/// Unlike a plain `#[derive(Builder)]` struct, `build()` is hand-written
/// (`build_fn(skip)`) so every staged variant still passes through
/// [`RcsStore::add`]'s sortedness and domain checks instead of being
/// memcpy'd into place — a generated builder would otherwise let a caller
/// construct a store with out-of-order or out-of-domain records.
#[derive(Builder)]
#[builder(pattern = "owned", name = "RcsStoreBuilder", build_fn(skip))]
pub struct RcsStoreSpec<C> {
    source: Vec<u8>,
    haplotype_count: usize,
    #[builder(default)]
    variants: Vec<(Variant, C)>,
    #[builder(default)]
    collision_policy: CollisionPolicy,
}

impl<C: Coverage> RcsStoreBuilder<C> {
    /// Stages one variant for insertion; staged variants are added to the
    /// store in the order given, each still going through [`RcsStore::add`].
    pub fn variant(mut self, variant: Variant, coverage: C) -> Self {
        self.variants.get_or_insert_with(Vec::new).push((variant, coverage));
        self
    }

    pub fn build(self) -> Result<RcsStore<C>, Error> {
        let source = self.source.unwrap_or_default();
        let haplotype_count = self.haplotype_count.unwrap_or(0);
        let collision_policy = self.collision_policy.unwrap_or_default();
        let variants = self.variants.unwrap_or_default();

        let mut store = RcsStore::new(source, haplotype_count).with_collision_policy(collision_policy);
        for (variant, coverage) in variants {
            store.add(variant, coverage)?;
        }
        Ok(store)
    }
}
