//! VCF ingestion and FASTA contig selection: the pure data
//! transformations this crate owns at its input boundary.
//!
//! The core accepts records already parsed by the caller — it has no VCF
//! or FASTA parser of its own — and turns each ALT allele
//! into a [`Variant`] plus the haplotype bits that carry it.

use crate::coverage::{Coverage, CoverageDomain};
use crate::errors::Error;
use crate::variant::Variant;

/// One input VCF record, already parsed into owned fields by the caller.
#[derive(Debug, Clone)]
pub struct VcfRecord {
    pub chrom: String,
    pub pos_0based: u64,
    pub reference: Vec<u8>,
    pub alts: Vec<Vec<u8>>,
    /// `genotypes[sample][allele]`: the 1-based allele index called at that
    /// haplotype slot (`0` would mean the reference allele, never produced
    /// by a match against a specific ALT), or `None` for a missing call.
    pub genotypes: Vec<[Option<u32>; 2]>,
}

/// The outcome of ingesting one ALT allele of one [`VcfRecord`].
///
/// A symbolic ALT (starting with `<`) is a benign, non-fatal signal —
/// it is reported as `Skipped`, not an `Err`, so the remaining alternates
/// in the same record still ingest.
#[derive(Debug, Clone)]
pub enum IngestOutcome<C> {
    Ingested { variant: Variant, coverage: C },
    Skipped { record_index: usize, alt: String },
}

/// Trims the common prefix and suffix `reference` and `alt` share, as
/// `(offset, ref_rest, alt_rest)`: `offset` is how far into `reference` the
/// remaining (untrimmed) span starts.
fn trim_common<'a>(reference: &'a [u8], alt: &'a [u8]) -> (u64, &'a [u8], &'a [u8]) {
    let max_prefix = reference.len().min(alt.len());
    let mut prefix = 0;
    while prefix < max_prefix && reference[prefix] == alt[prefix] {
        prefix += 1;
    }
    let ref_remaining = reference.len() - prefix;
    let alt_remaining = alt.len() - prefix;
    let max_suffix = ref_remaining.min(alt_remaining);
    let mut suffix = 0;
    while suffix < max_suffix && reference[reference.len() - 1 - suffix] == alt[alt.len() - 1 - suffix] {
        suffix += 1;
    }
    (prefix as u64, &reference[prefix..reference.len() - suffix], &alt[prefix..alt.len() - suffix])
}

/// Converts every ALT allele of `record` into an [`IngestOutcome`].
/// `record_index` is only threaded through for error/skip context; this
/// function itself never fails — a malformed position is caught later,
/// when the resulting variant is `add`ed to an [`crate::store::RcsStore`].
pub fn vcf_record_to_variants<C: Coverage>(
    record: &VcfRecord,
    record_index: usize,
    haplotype_count: usize,
) -> Vec<IngestOutcome<C>> {
    let domain = CoverageDomain::new(haplotype_count);
    record
        .alts
        .iter()
        .enumerate()
        .map(|(a, alt)| {
            if alt.starts_with(b"<") {
                log::debug!("record {}: skipping symbolic ALT {:?}", record_index, alt);
                return IngestOutcome::Skipped {
                    record_index,
                    alt: String::from_utf8_lossy(alt).into_owned(),
                };
            }

            let variant = if record.reference.len() == 1 && alt.len() == 1 {
                Variant::snv(record.pos_0based, alt[0])
            } else {
                let (offset, ref_rest, alt_rest) = trim_common(&record.reference, alt);
                Variant::indel(record.pos_0based + offset, ref_rest.len() as u64, alt_rest.to_vec())
            };

            let allele = a as u32 + 1;
            let haplotype_bits = record.genotypes.iter().enumerate().flat_map(|(sample, gt)| {
                gt.iter()
                    .enumerate()
                    .filter(move |(_, called)| **called == Some(allele))
                    .map(move |(slot, _)| 2 * sample + slot)
            });
            let coverage = C::from_members(haplotype_bits, domain);
            IngestOutcome::Ingested { variant, coverage }
        })
        .collect()
}

/// Selects the single contig whose name the VCF `chrom` value prefix-matches.
/// Fails with `InputError` if no contig matches.
pub fn select_contig<'a>(contigs: &'a [(String, Vec<u8>)], chrom: &str) -> Result<&'a [u8], Error> {
    contigs
        .iter()
        .find(|(name, _)| name.starts_with(chrom) || chrom.starts_with(name.as_str()))
        .map(|(_, seq)| seq.as_slice())
        .ok_or_else(|| Error::InputError {
            record_index: 0,
            msg: format!("no contig matching chrom '{}' by prefix", chrom),
        })
}
