//! Portable binary persistence for an [`RcsStore`].
//!
//! The wire format is specified byte-for-byte, so this writes/reads it
//! directly with `byteorder` rather than deriving it through a generic
//! serialization crate, which would not guarantee the exact on-disk layout
//! the format names.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::coverage::{Coverage, CoverageDomain};
use crate::errors::Error;
use crate::store::{CollisionPolicy, RcsStore};
use crate::variant::Variant;

const SNV_TAG: u8 = 0;
const INDEL_TAG: u8 = 1;

impl<C: Coverage> RcsStore<C> {
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        out.write_u64::<LittleEndian>(self.source().len() as u64)?;
        out.write_all(self.source())?;
        out.write_u64::<LittleEndian>(self.size() as u64)?;
        out.write_u64::<LittleEndian>(self.variants().len() as u64)?;

        for record in self.variants() {
            out.write_u32::<LittleEndian>(record.key().position() << 3 | record.key().kind_rank())?;
            match record.variant() {
                Variant::Snv { replacement, .. } => {
                    out.write_u8(SNV_TAG)?;
                    out.write_u8(*replacement)?;
                }
                Variant::Indel { deletion_len, insertion, .. } => {
                    out.write_u8(INDEL_TAG)?;
                    out.write_u32::<LittleEndian>(*deletion_len as u32)?;
                    out.write_u32::<LittleEndian>(insertion.len() as u32)?;
                    out.write_all(insertion)?;
                }
            }
            write_coverage(&mut out, record.coverage(), self.size())?;
        }
        Ok(())
    }

    pub fn read_from<R: Read>(mut input: R) -> Result<Self, Error> {
        let mut offset = 0usize;

        let source_len = input
            .read_u64::<LittleEndian>()
            .map_err(|e| decode_err(offset, &e))? as usize;
        offset += 8;
        let mut source = vec![0u8; source_len];
        input.read_exact(&mut source).map_err(|e| decode_err(offset, &e))?;
        offset += source_len;

        let haplotype_count = input.read_u64::<LittleEndian>().map_err(|e| decode_err(offset, &e))? as usize;
        offset += 8;
        let record_count = input.read_u64::<LittleEndian>().map_err(|e| decode_err(offset, &e))? as usize;
        offset += 8;

        let mut store = RcsStore::new(source, haplotype_count).with_collision_policy(CollisionPolicy::KeepAll);

        for _ in 0..record_count {
            let packed = input.read_u32::<LittleEndian>().map_err(|e| decode_err(offset, &e))?;
            offset += 4;
            let position = (packed >> 3) as u64;
            let tag = input.read_u8().map_err(|e| decode_err(offset, &e))?;
            offset += 1;

            let variant = match tag {
                SNV_TAG => {
                    let replacement = input.read_u8().map_err(|e| decode_err(offset, &e))?;
                    offset += 1;
                    Variant::snv(position, replacement)
                }
                INDEL_TAG => {
                    let deletion_len = input.read_u32::<LittleEndian>().map_err(|e| decode_err(offset, &e))? as u64;
                    offset += 4;
                    let insertion_len =
                        input.read_u32::<LittleEndian>().map_err(|e| decode_err(offset, &e))? as usize;
                    offset += 4;
                    let mut insertion = vec![0u8; insertion_len];
                    input.read_exact(&mut insertion).map_err(|e| decode_err(offset, &e))?;
                    offset += insertion_len;
                    Variant::indel(position, deletion_len, insertion)
                }
                other => {
                    return Err(Error::DecodeError {
                        offset,
                        msg: format!("unknown variant kind tag {}", other),
                    })
                }
            };

            let coverage = read_coverage::<R, C>(&mut input, haplotype_count, &mut offset)?;
            store.add(variant, coverage).map_err(|_| Error::DecodeError {
                offset,
                msg: "decoded variant violates store invariants".to_owned(),
            })?;
        }

        Ok(store)
    }
}

fn write_coverage<W: Write, C: Coverage>(out: &mut W, coverage: &C, haplotype_count: usize) -> io::Result<()> {
    let word_count = (haplotype_count + 7) / 8;
    let mut words = vec![0u8; word_count];
    for member in coverage.iter() {
        words[member / 8] |= 1 << (member % 8);
    }
    out.write_all(&words)
}

fn read_coverage<R: Read, C: Coverage>(input: &mut R, haplotype_count: usize, offset: &mut usize) -> Result<C, Error> {
    let word_count = (haplotype_count + 7) / 8;
    let mut words = vec![0u8; word_count];
    input.read_exact(&mut words).map_err(|e| decode_err(*offset, &e))?;
    *offset += word_count;

    let domain = CoverageDomain::new(haplotype_count);
    let members = (0..haplotype_count).filter(|i| (words[i / 8] >> (i % 8)) & 1 == 1);
    Ok(C::from_members(members, domain))
}

fn decode_err(offset: usize, e: &io::Error) -> Error {
    Error::DecodeError { offset, msg: e.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::DenseCoverage;

    #[test]
    fn roundtrips_store_with_mixed_variants() {
        let mut store: RcsStore<DenseCoverage> = RcsStore::new(b"ACGTACGTAC".to_vec(), 3);
        store
            .add(
                Variant::snv(2, b'T'),
                DenseCoverage::from_members([0, 2], CoverageDomain::new(3)),
            )
            .unwrap();
        store
            .add(
                Variant::indel(5, 2, vec![b'A', b'A']),
                DenseCoverage::from_members([1], CoverageDomain::new(3)),
            )
            .unwrap();

        let mut bytes = Vec::new();
        store.write_to(&mut bytes).unwrap();

        let decoded: RcsStore<DenseCoverage> = RcsStore::read_from(&bytes[..]).unwrap();
        assert_eq!(decoded.source(), store.source());
        assert_eq!(decoded.size(), store.size());
        assert_eq!(decoded.variants().len(), store.variants().len());
        for (a, b) in decoded.variants().iter().zip(store.variants().iter()) {
            assert_eq!(a.variant(), b.variant());
        }
    }
}
