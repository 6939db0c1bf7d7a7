// Copyright 2016-2019 Johannes Köster, David Lähnemann.
// Licensed under the GNU GPLv3 license (https://opensource.org/licenses/GPL-3.0)
// This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Result alias used throughout the public API.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("coverage operation on incompatible domains (left size {left}, right size {right})")]
    DomainMismatch { left: usize, right: usize },

    #[error(
        "variant breakpoint [{low}, {high}) exceeds reference length {reference_len}, \
         or coverage size {coverage_size} does not match haplotype count {haplotype_count}"
    )]
    OutOfDomain {
        low: u64,
        high: u64,
        reference_len: u64,
        coverage_size: usize,
        haplotype_count: usize,
    },

    #[error("invalid journal range [{first}, {last}) (journal size {size})")]
    InvariantViolation { first: usize, last: usize, size: usize },

    #[error("malformed persisted store at byte offset {offset}: {msg}")]
    DecodeError { offset: usize, msg: String },

    #[error("malformed VCF record #{record_index}: {msg}")]
    InputError { record_index: usize, msg: String },

    /// Not a failure: a caller's callback asked a running search to stop
    /// early. [`crate::search::BucketSearcher::try_search`]
    /// surfaces this instead of a partial, silently-truncated result.
    #[error("search aborted by caller")]
    SearchAborted,
}

/// A benign, non-fatal ingestion outcome: not an [`Error`], since
/// domain contract calls symbolic-ALT skipping a signal that must not abort
/// the rest of the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolicVariantSkipped {
    pub record_index: usize,
    pub alt: String,
}
