//! Bit-coverage sets over a haplotype domain `[0, H)`.
//!
//! Two concrete representations share one contract: [`DenseCoverage`]
//! is a packed bit-vector, good when most haplotypes carry the variant;
//! [`SparseCoverage`] is a sorted integer list, good for rare variants. The
//! store picks one representation as a static parameter; nothing downstream
//! of [`Coverage`] needs to know which.

mod dense;
mod sparse;

pub use dense::DenseCoverage;
pub use sparse::SparseCoverage;

use crate::errors::Error;

/// The domain a coverage set is defined over: haplotype indices `0..size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CoverageDomain {
    size: usize,
}

impl CoverageDomain {
    pub fn new(size: usize) -> Self {
        CoverageDomain { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_member(&self, elem: usize) -> bool {
        elem < self.size
    }
}

/// Shared contract for both coverage representations.
///
/// `intersection`/`difference` return `Err(DomainMismatch)` when `self` and
/// `other` were built over differing domains; everything else is infallible
/// because construction already validated membership.
pub trait Coverage: Sized + Clone + PartialEq {
    fn with_domain(domain: CoverageDomain) -> Self;
    fn from_members(members: impl IntoIterator<Item = usize>, domain: CoverageDomain) -> Self;

    fn domain(&self) -> CoverageDomain;
    fn contains(&self, i: usize) -> bool;
    fn insert(&mut self, i: usize);
    fn erase(&mut self, i: usize);
    fn any(&self) -> bool;
    fn is_empty(&self) -> bool {
        !self.any()
    }
    fn len(&self) -> usize;
    fn iter(&self) -> Box<dyn Iterator<Item = usize> + '_>;

    fn intersection(&self, other: &Self) -> Result<Self, Error>;
    fn difference(&self, other: &Self) -> Result<Self, Error>;

    fn check_domain(&self, other: &Self) -> Result<(), Error> {
        if self.domain() != other.domain() {
            Err(Error::DomainMismatch {
                left: self.domain().size(),
                right: other.domain().size(),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn roundtrip_set_ops<C: Coverage>() {
        let domain = CoverageDomain::new(8);
        let a = C::from_members([0, 2, 4, 6], domain);
        let b = C::from_members([2, 3, 4, 5], domain);

        let inter = a.intersection(&b).unwrap();
        let mut inter_members: Vec<_> = inter.iter().collect();
        inter_members.sort_unstable();
        assert_eq!(inter_members, vec![2, 4]);

        let diff = a.difference(&b).unwrap();
        let mut diff_members: Vec<_> = diff.iter().collect();
        diff_members.sort_unstable();
        assert_eq!(diff_members, vec![0, 6]);

        let other_domain = C::with_domain(CoverageDomain::new(4));
        assert!(a.intersection(&other_domain).is_err());
    }
}
