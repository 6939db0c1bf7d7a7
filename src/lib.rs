//! Core search engine for a journaled sequence tree (JST): a referentially
//! compressed store of one reference plus a sorted set of shared variants,
//! and an approximate-search pipeline that runs directly over the implied
//! haplotypes without ever materializing them.
//!
//! The crate is organized bottom-up, mirroring the three subsystems this
//! domain couples together:
//!
//! - [`coverage`], [`breakend`], [`variant`] and [`store`] — the
//!   referentially compressed sequence store: a reference, a sorted
//!   breakend-keyed variant map, and the per-variant haplotype coverages.
//! - [`journal`] and [`tree`] — the lazy DAG-to-tree expansion over the
//!   store, wrapped by a pipeline of composable transformers (label,
//!   colour, trim, left-extend, prune, merge, seek, chunk, k-depth, stats).
//! - [`matcher`] and [`search`] — resumable online matchers (Shift-Or,
//!   Myers, a pigeonhole q-gram filter) and the seed-and-extend bucket
//!   searcher that drives them over the tree.
//!
//! [`ingest`] and [`bam`] are the two pure data transformations this crate
//! owns at its external boundary (VCF record → variant, seek position →
//! BAM tags); everything else at that boundary — file parsing, CLI,
//! logging configuration — is a caller's concern.

pub mod bam;
pub mod breakend;
pub mod coverage;
pub mod errors;
pub mod ingest;
pub mod journal;
pub mod matcher;
pub mod persist;
pub mod search;
pub mod store;
pub mod tree;
pub mod variant;

pub use breakend::{Breakend, BreakendSide, Breakpoint};
pub use coverage::{Coverage, CoverageDomain, DenseCoverage, SparseCoverage};
pub use errors::{Error, Result};
pub use store::{CollisionPolicy, RcsStore, RcsStoreBuilder};
pub use variant::{AltKind, CoveredVariant, Variant};
