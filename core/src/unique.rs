//! Per-sample counts of private singleton symbols.

use crate::{matrix::NUCLEOTIDES, Matrix, SiteFrequencies};

/// The number of sites at which each sample carries a symbol found in no other sample.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Uniqueness(Vec<usize>);

impl Uniqueness {
    /// Counts the sites at which each sample is the sole carrier of a symbol.
    ///
    /// For binary data, only the derived `1` symbol is considered. For nucleotide data, each of
    /// the four symbols is considered separately, so that at a site with two samples and two
    /// distinct symbols, both samples are counted.
    ///
    /// # Panics
    ///
    /// If the dimensions of the site frequencies do not match those of the matrix.
    pub fn from_matrix(matrix: &Matrix, frequencies: &SiteFrequencies) -> Self {
        assert_eq!(matrix.samples(), frequencies.samples(), "sample mismatch");
        assert_eq!(matrix.sites(), frequencies.sites(), "site mismatch");

        let mut unique = vec![0; matrix.samples()];

        let mut add_carrier = |site: usize, symbol: u8| {
            if let Some(sample) = matrix.column(site).position(|x| x == symbol) {
                unique[sample] += 1;
            }
        };

        match frequencies {
            SiteFrequencies::Binary { counts, .. } => counts
                .iter()
                .enumerate()
                .filter(|(_, &count)| count == 1)
                .for_each(|(site, _)| add_carrier(site, b'1')),
            SiteFrequencies::Nucleotide { counts, .. } => {
                for (site, site_counts) in counts.iter().enumerate() {
                    site_counts
                        .iter()
                        .zip(NUCLEOTIDES)
                        .filter(|(&count, _)| count == 1)
                        .for_each(|(_, symbol)| add_carrier(site, symbol));
                }
            }
        }

        Self(unique)
    }

    /// Returns the number of samples.
    pub fn samples(&self) -> usize {
        self.0.len()
    }

    /// Returns the counts, one per sample.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for Uniqueness {
    fn from(counts: Vec<usize>) -> Self {
        Self(counts)
    }
}
