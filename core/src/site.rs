//! Site frequencies.

use crate::matrix::{Alphabet, Matrix, NUCLEOTIDES};

/// Per-site symbol counts of a matrix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SiteFrequencies {
    /// The number of derived `1` symbols at each site.
    Binary {
        /// The number of samples.
        samples: usize,
        /// The counts, one per site.
        counts: Vec<usize>,
    },
    /// The number of `A`, `G`, `C`, and `T` symbols at each site, in that order.
    Nucleotide {
        /// The number of samples.
        samples: usize,
        /// The counts, one array per site.
        counts: Vec<[usize; 4]>,
    },
}

impl SiteFrequencies {
    /// Counts the symbols at each site of a matrix.
    ///
    /// Symbols outside the alphabet are not counted.
    pub fn from_matrix(matrix: &Matrix, alphabet: Alphabet) -> Self {
        let samples = matrix.samples();
        let sites = 0..matrix.sites();

        match alphabet {
            Alphabet::Binary => Self::Binary {
                samples,
                counts: sites.map(|site| matrix.count(site, b'1')).collect(),
            },
            Alphabet::Nucleotide => Self::Nucleotide {
                samples,
                counts: sites
                    .map(|site| NUCLEOTIDES.map(|symbol| matrix.count(site, symbol)))
                    .collect(),
            },
        }
    }

    /// Returns the alphabet of the counts.
    pub fn alphabet(&self) -> Alphabet {
        match self {
            SiteFrequencies::Binary { .. } => Alphabet::Binary,
            SiteFrequencies::Nucleotide { .. } => Alphabet::Nucleotide,
        }
    }

    /// Returns the number of samples.
    pub fn samples(&self) -> usize {
        match self {
            SiteFrequencies::Binary { samples, .. }
            | SiteFrequencies::Nucleotide { samples, .. } => *samples,
        }
    }

    /// Returns the number of sites.
    pub fn sites(&self) -> usize {
        match self {
            SiteFrequencies::Binary { counts, .. } => counts.len(),
            SiteFrequencies::Nucleotide { counts, .. } => counts.len(),
        }
    }

    /// Returns the number of segregating sites.
    ///
    /// A site is segregating if some symbol count is neither zero nor the number of samples.
    pub fn segregating_sites(&self) -> usize {
        let n = self.samples();
        let is_polymorphic = |count: usize| count != 0 && count != n;

        match self {
            SiteFrequencies::Binary { counts, .. } => {
                counts.iter().filter(|&&count| is_polymorphic(count)).count()
            }
            SiteFrequencies::Nucleotide { counts, .. } => counts
                .iter()
                .filter(|site| site.iter().any(|&count| is_polymorphic(count)))
                .count(),
        }
    }

    /// Returns the number of singleton sites.
    ///
    /// For binary data, these are sites where the derived symbol occurs exactly once. For
    /// nucleotide data, these are biallelic sites where one of the two symbols occurs exactly once.
    pub fn singleton_sites(&self) -> usize {
        match self {
            SiteFrequencies::Binary { counts, .. } => {
                counts.iter().filter(|&&count| count == 1).count()
            }
            SiteFrequencies::Nucleotide { counts, .. } => counts
                .iter()
                .filter(|site| {
                    let ones = site.iter().filter(|&&count| count == 1).count();
                    let present = site.iter().filter(|&&count| count > 0).count();
                    ones == 1 && present == 2
                })
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_from_matrix() {
        let matrix = Matrix::from_rows(["0000001000", "0100100000"]).unwrap();

        assert_eq!(
            SiteFrequencies::from_matrix(&matrix, Alphabet::Binary),
            SiteFrequencies::Binary {
                samples: 2,
                counts: vec![0, 1, 0, 0, 1, 0, 1, 0, 0, 0],
            }
        );
    }

    #[test]
    fn test_nucleotide_from_matrix() {
        let matrix = Matrix::from_rows(["AAAG", "AGAA"]).unwrap();

        assert_eq!(
            SiteFrequencies::from_matrix(&matrix, Alphabet::Nucleotide),
            SiteFrequencies::Nucleotide {
                samples: 2,
                counts: vec![[2, 0, 0, 0], [1, 1, 0, 0], [2, 0, 0, 0], [1, 1, 0, 0]],
            }
        );
    }

    #[test]
    fn test_nucleotide_counts_sum_to_samples() {
        let matrix = Matrix::from_rows(["ACGTTA", "AGGTCA", "TCGACA", "ACCTCA"]).unwrap();

        match SiteFrequencies::from_matrix(&matrix, Alphabet::Nucleotide) {
            SiteFrequencies::Nucleotide { counts, .. } => {
                assert!(counts.iter().all(|site| site.iter().sum::<usize>() == 4))
            }
            SiteFrequencies::Binary { .. } => panic!("expected nucleotide counts"),
        }
    }

    #[test]
    fn test_segregating_sites() {
        let binary = SiteFrequencies::Binary {
            samples: 4,
            counts: vec![0, 1, 4, 3, 2],
        };
        assert_eq!(binary.segregating_sites(), 3);

        let nucleotide = SiteFrequencies::Nucleotide {
            samples: 3,
            counts: vec![[3, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 3], [0, 2, 1, 0]],
        };
        assert_eq!(nucleotide.segregating_sites(), 2);
    }

    #[test]
    fn test_singleton_sites() {
        let binary = SiteFrequencies::Binary {
            samples: 4,
            counts: vec![1, 1, 3, 2, 1],
        };
        assert_eq!(binary.singleton_sites(), 3);

        let nucleotide = SiteFrequencies::Nucleotide {
            samples: 4,
            counts: vec![[3, 1, 0, 0], [1, 1, 2, 0], [0, 0, 4, 0], [2, 2, 0, 0], [0, 0, 1, 3]],
        };
        assert_eq!(nucleotide.singleton_sites(), 2);
    }

    #[test]
    fn test_no_sites() {
        let matrix = Matrix::without_sites(3).unwrap();
        let frequencies = SiteFrequencies::from_matrix(&matrix, Alphabet::Binary);

        assert_eq!(frequencies.sites(), 0);
        assert_eq!(frequencies.segregating_sites(), 0);
    }
}
