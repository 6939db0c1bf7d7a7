use super::{Coverage, CoverageDomain};
use crate::errors::Error;

/// Sorted-vector coverage; merge/diff sweep for intersection/difference.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SparseCoverage {
    data: Vec<usize>,
    domain: CoverageDomain,
}

impl SparseCoverage {
    pub fn as_slice(&self) -> &[usize] {
        &self.data
    }

    fn insert_sorted(&mut self, elem: usize) {
        match self.data.binary_search(&elem) {
            Ok(_) => {}
            Err(hint) => self.data.insert(hint, elem),
        }
    }
}

impl Coverage for SparseCoverage {
    fn with_domain(domain: CoverageDomain) -> Self {
        SparseCoverage { data: Vec::new(), domain }
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
        self.data.binary_search(&i).is_ok()
    }

    fn insert(&mut self, i: usize) {
        debug_assert!(self.domain.is_member(i), "haplotype index out of domain");
        self.insert_sorted(i);
    }

    fn erase(&mut self, i: usize) {
        if let Ok(idx) = self.data.binary_search(&i) {
            self.data.remove(idx);
        }
    }

    fn any(&self) -> bool {
        !self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        Box::new(self.data.iter().copied())
    }

    fn intersection(&self, other: &Self) -> Result<Self, Error> {
        self.check_domain(other)?;
        let (mut i, mut j) = (0, 0);
        let mut result = Vec::with_capacity(self.data.len().min(other.data.len()));
        while i < self.data.len() && j < other.data.len() {
            match self.data[i].cmp(&other.data[j]) {
                std::cmp::Ordering::Equal => {
                    result.push(self.data[i]);
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        Ok(SparseCoverage { data: result, domain: self.domain })
    }

    fn difference(&self, other: &Self) -> Result<Self, Error> {
        self.check_domain(other)?;
        let (mut i, mut j) = (0, 0);
        let mut result = Vec::with_capacity(self.data.len());
        while i < self.data.len() {
            if j >= other.data.len() || self.data[i] < other.data[j] {
                result.push(self.data[i]);
                i += 1;
            } else if self.data[i] == other.data[j] {
                i += 1;
                j += 1;
            } else {
                j += 1;
            }
        }
        Ok(SparseCoverage { data: result, domain: self.domain })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::tests::roundtrip_set_ops;

    #[test]
    fn set_ops_roundtrip() {
        roundtrip_set_ops::<SparseCoverage>();
    }

    #[test]
    fn insert_keeps_sorted_order() {
        let domain = CoverageDomain::new(10);
        let mut cov = SparseCoverage::with_domain(domain);
        for i in [5, 1, 9, 3] {
            cov.insert(i);
        }
        assert_eq!(cov.as_slice(), &[1, 3, 5, 9]);
    }
}
