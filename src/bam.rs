//! Seek position ↔ BAM auxiliary tag encoding.
//!
//! A read aligned against the implied haplotype tree is re-anchored to the
//! tree by stashing its [`SeekPosition`] in optional BAM tags at alignment
//! time, so a later pass can replay straight back to the node it matched
//! without re-walking the tree from the root. The spec names two tags for
//! this, `ad`/`rd`, mirroring the two descriptor shapes it separately names
//! for alternate-path and reference-break positions; since [`SeekPosition`]
//! already unifies both shapes into one root-anchored bit-string (see
//! `tree::seek`), this crate writes that single descriptor under `ad` and
//! leaves `rd` empty rather than splitting one value across two tags.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::tree::{PathDescriptor, SeekPosition};

/// The three BAM auxiliary tags a seek position round-trips through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeekPositionTags {
    /// `ad`: the alternate-path descriptor, LSB-first bit-packed.
    pub ad: Vec<u8>,
    /// `rd`: the reference-break descriptor. Always empty here; kept as a
    /// field so callers that inspect both tags still compile.
    pub rd: Vec<u8>,
    /// `lo`: the label offset within the node's path sequence.
    pub lo: i32,
}

/// LSB-first bit-packs a [`PathDescriptor`] into bytes, one bit per ref/alt
/// choice, padded to a whole byte ("packed in a machine word" made
/// portable across byte order).
pub fn pack_descriptor(descriptor: PathDescriptor) -> Vec<u8> {
    let byte_count = (descriptor.len() as usize + 7) / 8;
    let mut bytes = vec![0u8; byte_count];
    for (i, alt) in descriptor.iter().enumerate() {
        if alt {
            bytes[i / 8] |= 1 << (i % 8);
        }
    }
    bytes
}

/// Unpacks bytes written by [`pack_descriptor`] back into a [`PathDescriptor`]
/// of the given bit length.
pub fn unpack_descriptor(bytes: &[u8], len: u8) -> PathDescriptor {
    let mut descriptor = PathDescriptor::empty();
    for i in 0..len {
        let alt = (bytes[(i / 8) as usize] >> (i % 8)) & 1 == 1;
        descriptor = descriptor.push(alt);
    }
    descriptor
}

/// Encodes a matched position (tree seek position plus in-label offset) as
/// the BAM tag triple a caller would attach to the alignment record.
pub fn encode_seek_position(position: &SeekPosition, label_offset: u64) -> SeekPositionTags {
    let mut ad = Vec::with_capacity(9);
    ad.write_u8(position.descriptor().len()).expect("writing to a Vec never fails");
    ad.extend_from_slice(&pack_descriptor(position.descriptor()));

    SeekPositionTags { ad, rd: Vec::new(), lo: label_offset as i32 }
}

/// Recovers the descriptor written by [`encode_seek_position`]'s `ad` tag.
/// Fails with `None` if `ad` is truncated relative to its own length prefix.
pub fn decode_ad_tag(ad: &[u8]) -> Option<PathDescriptor> {
    let len = *ad.first()?;
    let payload = &ad[1..];
    if payload.len() < (len as usize + 7) / 8 {
        return None;
    }
    Some(unpack_descriptor(payload, len))
}
