//! Estimators of the population mutation rate θ.

use std::marker::PhantomData;

use crate::{utils::harmonic, SiteFrequencies};

use super::StatisticError;

mod private {
    use super::*;

    pub trait Estimator {
        const NAME: &'static str;

        /// Returns `None` if the estimator is undefined for the alphabet of the frequencies.
        fn estimate_unchecked(frequencies: &SiteFrequencies) -> Option<f64>;
    }
}

/// An estimator of θ.
pub trait ThetaEstimator: private::Estimator {}
impl<T> ThetaEstimator for T where T: private::Estimator {}

/// Tajima's estimator, the average number of pairwise differences, also known as π.
#[non_exhaustive]
pub struct Tajima;

impl private::Estimator for Tajima {
    const NAME: &'static str = "pi";

    fn estimate_unchecked(frequencies: &SiteFrequencies) -> Option<f64> {
        Some(pi(frequencies))
    }
}

/// Watterson's estimator, based on the number of segregating sites.
#[non_exhaustive]
pub struct Watterson;

impl private::Estimator for Watterson {
    const NAME: &'static str = "theta";

    fn estimate_unchecked(frequencies: &SiteFrequencies) -> Option<f64> {
        Some(watterson(
            frequencies.samples(),
            frequencies.segregating_sites(),
        ))
    }
}

/// Fay and Wu's estimator θ_H, which weights derived alleles by the square of their count.
///
/// This requires the derived state to be known, and so is only defined for binary data.
#[non_exhaustive]
pub struct FayWu;

impl private::Estimator for FayWu {
    const NAME: &'static str = "theta_h";

    fn estimate_unchecked(frequencies: &SiteFrequencies) -> Option<f64> {
        match frequencies {
            SiteFrequencies::Binary { samples, counts } => {
                let n = *samples as f64;

                let squares = counts.iter().fold(0.0, |acc, &count| {
                    let count = count as f64;
                    acc + count * count
                });

                Some(squares * 2.0 / (n * (n - 1.0)))
            }
            SiteFrequencies::Nucleotide { .. } => None,
        }
    }
}

/// Returns the average number of pairwise differences.
///
/// For binary data, this is the sum over sites of the unbiased heterozygosity of the derived
/// allele. For nucleotide data, it is the sum over sites of one minus the probability that two
/// distinct samples share a symbol.
pub fn pi(frequencies: &SiteFrequencies) -> f64 {
    let n = frequencies.samples() as f64;

    match frequencies {
        SiteFrequencies::Binary { counts, .. } => {
            let correction = n / (n - 1.0);

            counts.iter().fold(0.0, |pi, &count| {
                let p = count as f64 / n;
                pi + 2.0 * p * (1.0 - p) * correction
            })
        }
        SiteFrequencies::Nucleotide { counts, .. } => {
            let pairs = n * (n - 1.0);

            counts.iter().fold(0.0, |pi, site| {
                let homozygosity = site.iter().fold(0.0, |acc, &count| {
                    let count = count as f64;
                    acc + (count * (count - 1.0)) / pairs
                });
                pi + (1.0 - homozygosity)
            })
        }
    }
}

/// Returns Watterson's θ from the number of samples and segregating sites.
pub fn watterson(samples: usize, segregating_sites: usize) -> f64 {
    segregating_sites as f64 / harmonic(samples as u64)
}

/// An estimate of θ based on a particular estimator.
///
/// Estimates are per replicate rather than per base. None of the estimators are defined for fewer
/// than two samples.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Theta<E>(pub f64, PhantomData<E>)
where
    E: ThetaEstimator;

impl<E> Theta<E>
where
    E: ThetaEstimator,
{
    /// Estimates θ from site frequencies.
    ///
    /// Returns an error if the estimator is undefined for the alphabet of the frequencies.
    pub fn from_frequencies(frequencies: &SiteFrequencies) -> Result<Self, StatisticError> {
        E::estimate_unchecked(frequencies)
            .map(|estimate| Self(estimate, PhantomData))
            .ok_or(StatisticError::Alphabet {
                statistic: E::NAME,
                alphabet: frequencies.alphabet(),
            })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    use crate::{Alphabet, Matrix};

    pub fn binary_frequencies() -> SiteFrequencies {
        let matrix = Matrix::from_rows(binary_rows()).unwrap();
        SiteFrequencies::from_matrix(&matrix, Alphabet::Binary)
    }

    pub fn binary_rows() -> [&'static str; 6] {
        [
            "01001001", "00101000", "01001001", "10010010", "00101100", "01001001",
        ]
    }

    pub fn nucleotide_frequencies() -> SiteFrequencies {
        let matrix = Matrix::from_rows(nucleotide_rows()).unwrap();
        SiteFrequencies::from_matrix(&matrix, Alphabet::Nucleotide)
    }

    pub fn nucleotide_rows() -> [&'static str; 5] {
        [
            "ACGTACGTAA",
            "ACGTACGTAA",
            "ACCTACGAAA",
            "TCGTACGTAG",
            "ACGTTCGTAA",
        ]
    }

    #[test]
    fn test_pi_binary() {
        assert_approx_eq!(
            Theta::<Tajima>::from_frequencies(&binary_frequencies())
                .unwrap()
                .0,
            3.4
        );
    }

    #[test]
    fn test_pi_nucleotide() {
        assert_approx_eq!(
            Theta::<Tajima>::from_frequencies(&nucleotide_frequencies())
                .unwrap()
                .0,
            2.0
        );
    }

    #[test]
    fn test_pi_monomorphic_sites_contribute_nothing() {
        let frequencies = SiteFrequencies::Nucleotide {
            samples: 4,
            counts: vec![[4, 0, 0, 0], [0, 0, 0, 4]],
        };

        assert_eq!(pi(&frequencies), 0.0);
    }

    #[test]
    fn test_pi_pair_of_samples() {
        let frequencies = SiteFrequencies::Binary {
            samples: 2,
            counts: vec![0, 1, 0, 0, 1, 0, 1, 0, 0, 0],
        };

        assert_approx_eq!(pi(&frequencies), 3.0);
    }

    #[test]
    fn test_theta_watterson() {
        assert_approx_eq!(
            Theta::<Watterson>::from_frequencies(&binary_frequencies())
                .unwrap()
                .0,
            3.503650
        );
        assert_approx_eq!(
            Theta::<Watterson>::from_frequencies(&nucleotide_frequencies())
                .unwrap()
                .0,
            2.4
        );
    }

    #[test]
    fn test_watterson_no_segregating_sites() {
        assert_eq!(watterson(10, 0), 0.0);
    }

    #[test]
    fn test_theta_fay_wu() {
        assert_approx_eq!(
            Theta::<FayWu>::from_frequencies(&binary_frequencies())
                .unwrap()
                .0,
            3.4
        );
    }

    #[test]
    fn test_theta_fay_wu_nucleotide_is_error() {
        assert!(matches!(
            Theta::<FayWu>::from_frequencies(&nucleotide_frequencies()),
            Err(StatisticError::Alphabet {
                statistic: "theta_h",
                alphabet: Alphabet::Nucleotide
            })
        ));
    }
}
