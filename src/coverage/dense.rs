use bv::{BitVec, BitsMut, Bits};

use super::{Coverage, CoverageDomain};
use crate::errors::Error;

/// Packed bit-vector coverage; word-parallel AND / AND-NOT via `bv`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DenseCoverage {
    data: BitVec<u8>,
    domain: CoverageDomain,
}

impl PartialEq for DenseCoverage {
    fn eq(&self, other: &Self) -> bool {
        self.domain == other.domain && self.data == other.data
    }
}

impl DenseCoverage {
    /// Underlying storage, used by the store's binary persistence format.
    pub fn as_bits(&self) -> &BitVec<u8> {
        &self.data
    }
}

impl Coverage for DenseCoverage {
    fn with_domain(domain: CoverageDomain) -> Self {
        DenseCoverage {
            data: BitVec::new_fill(false, domain.size() as u64),
            domain,
        }
    }

    fn from_members(members: impl IntoIterator<Item = usize>, domain: CoverageDomain) -> Self {
        let mut cov = Self::with_domain(domain);
        for m in members {
            cov.insert(m);
        }
        cov
    }

    fn domain(&self) -> CoverageDomain {
        self.domain
    }

    fn contains(&self, i: usize) -> bool {
        self.domain.is_member(i) && self.data.get_bit(i as u64)
    }

    fn insert(&mut self, i: usize) {
        debug_assert!(self.domain.is_member(i), "haplotype index out of domain");
        self.data.set_bit(i as u64, true);
    }

    fn erase(&mut self, i: usize) {
        debug_assert!(self.domain.is_member(i), "haplotype index out of domain");
        self.data.set_bit(i as u64, false);
    }

    fn any(&self) -> bool {
        self.data.iter().any(|b| b)
    }

    fn len(&self) -> usize {
        self.data.iter().filter(|b| *b).count()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(
            self.data
                .iter()
                .enumerate()
                .filter_map(|(i, b)| if b { Some(i) } else { None }),
        )
    }

    fn intersection(&self, other: &Self) -> Result<Self, Error> {
        self.check_domain(other)?;
        let mut data = self.data.clone();
        and_not_assign(&mut data, &other.data, false);
        Ok(DenseCoverage { data, domain: self.domain })
    }

    fn difference(&self, other: &Self) -> Result<Self, Error> {
        self.check_domain(other)?;
        let mut data = self.data.clone();
        and_not_assign(&mut data, &other.data, true);
        Ok(DenseCoverage { data, domain: self.domain })
    }
}

/// `data[i] = data[i] & (complement ? !other[i] : other[i])`, word at a time
/// would be the production version; `bv`'s public API only exposes bit-level
/// indexing, so this stays a straightforward bitwise sweep instead of hand
/// rolled word-parallel AND.
fn and_not_assign(data: &mut BitVec<u8>, other: &BitVec<u8>, complement: bool) {
    for i in 0..data.len() {
        let rhs = other.get_bit(i);
        let rhs = if complement { !rhs } else { rhs };
        let lhs = data.get_bit(i);
        data.set_bit(i, lhs & rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::tests::roundtrip_set_ops;

    #[test]
    fn set_ops_roundtrip() {
        roundtrip_set_ops::<DenseCoverage>();
    }

    #[test]
    fn empty_domain_has_no_members() {
        let cov = DenseCoverage::with_domain(CoverageDomain::new(4));
        assert!(!cov.any());
        assert!(cov.is_empty());
    }
}
