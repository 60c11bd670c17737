//! Per-replicate summaries.

use std::cell::OnceCell;

use crate::{
    stat::{
        theta::{self, FayWu},
        Fs, StatisticError, TajimaD, Theta, R2,
    },
    Alphabet, Haplotypes, Matrix, SiteFrequencies, Uniqueness,
};

/// Summary statistics of a single replicate.
///
/// The site frequencies, haplotype counts, per-sample singleton counts, and π are shared between
/// several statistics. Each is computed the first time it is needed and then reused.
#[derive(Debug)]
pub struct Summary<'a> {
    matrix: &'a Matrix,
    alphabet: Alphabet,
    frequencies: OnceCell<SiteFrequencies>,
    haplotypes: OnceCell<Haplotypes>,
    unique: OnceCell<Uniqueness>,
    pi: OnceCell<f64>,
}

impl<'a> Summary<'a> {
    /// Creates a new summary of a matrix with symbols from the provided alphabet.
    pub fn new(matrix: &'a Matrix, alphabet: Alphabet) -> Self {
        Self {
            matrix,
            alphabet,
            frequencies: OnceCell::new(),
            haplotypes: OnceCell::new(),
            unique: OnceCell::new(),
            pi: OnceCell::new(),
        }
    }

    /// Returns the alphabet.
    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Returns the number of samples.
    pub fn samples(&self) -> usize {
        self.matrix.samples()
    }

    /// Returns the number of sites.
    pub fn sites(&self) -> usize {
        self.matrix.sites()
    }

    /// Returns the site frequencies.
    pub fn site_frequencies(&self) -> &SiteFrequencies {
        self.frequencies
            .get_or_init(|| SiteFrequencies::from_matrix(self.matrix, self.alphabet))
    }

    /// Returns the haplotype counts.
    pub fn haplotypes(&self) -> &Haplotypes {
        self.haplotypes
            .get_or_init(|| Haplotypes::from_matrix(self.matrix))
    }

    /// Returns the per-sample singleton counts.
    pub fn uniqueness(&self) -> &Uniqueness {
        self.unique
            .get_or_init(|| Uniqueness::from_matrix(self.matrix, self.site_frequencies()))
    }

    /// Returns the average number of pairwise differences, π.
    pub fn pi(&self) -> f64 {
        *self.pi.get_or_init(|| theta::pi(self.site_frequencies()))
    }

    /// Returns the number of segregating sites.
    ///
    /// Sites are counted from the matrix, not taken from the `segsites:` line of `ms` output. A
    /// binary site where every sample carries the derived allele is therefore not segregating,
    /// although `ms` would include it.
    pub fn segregating_sites(&self) -> usize {
        self.site_frequencies().segregating_sites()
    }

    /// Returns the number of singleton sites.
    pub fn singleton_sites(&self) -> usize {
        self.site_frequencies().singleton_sites()
    }

    /// Returns Watterson's estimator of θ.
    pub fn theta_watterson(&self) -> f64 {
        theta::watterson(self.samples(), self.segregating_sites())
    }

    /// Returns Fay and Wu's estimator θ_H.
    ///
    /// This is an error for nucleotide data.
    pub fn theta_h(&self) -> Result<f64, StatisticError> {
        Theta::<FayWu>::from_frequencies(self.site_frequencies()).map(|theta| theta.0)
    }

    /// Returns Fay and Wu's H, the difference between π and θ_H.
    ///
    /// This is an error for nucleotide data.
    pub fn h_fay_wu(&self) -> Result<f64, StatisticError> {
        self.theta_h().map(|theta_h| self.pi() - theta_h)
    }

    /// Returns Tajima's D.
    pub fn d_tajima(&self) -> f64 {
        TajimaD::from_parts(self.samples(), self.segregating_sites(), self.pi()).0
    }

    /// Returns the number of distinct haplotypes.
    pub fn haplotype_count(&self) -> usize {
        self.haplotypes().distinct()
    }

    /// Returns the number of haplotypes found in a single sample.
    pub fn singleton_haplotypes(&self) -> usize {
        self.haplotypes().singletons()
    }

    /// Returns the number of samples carrying the most common haplotype.
    pub fn max_haplotype_count(&self) -> usize {
        self.haplotypes().max_count()
    }

    /// Returns the mean number of samples per distinct haplotype.
    pub fn mean_haplotype_count(&self) -> f64 {
        self.haplotypes().mean_count()
    }

    /// Returns the haplotype homozygosity.
    pub fn homozygosity(&self) -> f64 {
        self.haplotypes().homozygosity()
    }

    /// Returns Ramos-Onsins and Rozas' R₂.
    ///
    /// See [`R2::from_parts`] for the undefined cases.
    pub fn r2(&self) -> f64 {
        R2::from_parts(self.uniqueness(), self.pi(), self.segregating_sites()).0
    }

    /// Returns Fu's Fs.
    ///
    /// See [`Fs::from_parts`] for the undefined cases.
    pub fn fs(&self) -> f64 {
        Fs::from_parts(self.samples(), self.pi(), self.haplotype_count()).0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stat::{
        theta::tests::{binary_rows, nucleotide_rows},
        UNDEFINED,
    };

    #[test]
    fn test_binary_summary() {
        let matrix = Matrix::from_rows(binary_rows()).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Binary);

        assert_approx_eq!(summary.pi(), 3.4);
        assert_eq!(summary.segregating_sites(), 8);
        assert_eq!(summary.singleton_sites(), 4);
        assert_approx_eq!(summary.theta_watterson(), 3.503650);
        assert_approx_eq!(summary.theta_h().unwrap(), 3.4);
        assert_approx_eq!(summary.h_fay_wu().unwrap(), 0.0);
        assert_approx_eq!(summary.d_tajima(), -0.174403);
        assert_eq!(summary.haplotype_count(), 4);
        assert_eq!(summary.singleton_haplotypes(), 3);
        assert_eq!(summary.max_haplotype_count(), 3);
        assert_approx_eq!(summary.mean_haplotype_count(), 1.5);
        assert_approx_eq!(summary.homozygosity(), 0.333333);
        assert_eq!(summary.uniqueness().as_slice(), [0, 0, 0, 3, 1, 0]);
        assert_approx_eq!(summary.r2(), 0.189159);
        assert_approx_eq!(summary.fs(), 0.462367);
    }

    #[test]
    fn test_nucleotide_summary() {
        let matrix = Matrix::from_rows(nucleotide_rows()).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Nucleotide);

        assert_approx_eq!(summary.pi(), 2.0);
        assert_eq!(summary.segregating_sites(), 5);
        assert_eq!(summary.singleton_sites(), 5);
        assert_approx_eq!(summary.d_tajima(), -1.123974);
        assert_eq!(summary.haplotype_count(), 4);
        assert_approx_eq!(summary.homozygosity(), 0.28);
        assert_approx_eq!(summary.r2(), 0.178885);
        assert_approx_eq!(summary.fs(), -1.011601);
        assert!(summary.theta_h().is_err());
        assert!(summary.h_fay_wu().is_err());
    }

    #[test]
    fn test_identical_samples() {
        let matrix = Matrix::from_rows(["0000", "0000", "0000", "0000"]).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Binary);

        assert_eq!(summary.haplotypes().to_table(), [4, -9, -9, -9]);
        assert_eq!(summary.haplotype_count(), 1);
        assert_eq!(summary.homozygosity(), 1.0);
        assert_eq!(summary.pi(), 0.0);
        assert_eq!(summary.d_tajima(), 0.0);
        assert_eq!(summary.r2(), UNDEFINED);
        assert_eq!(summary.fs(), UNDEFINED);
    }

    #[test]
    fn test_fixed_derived_site_is_not_segregating() {
        let matrix = Matrix::from_rows(["011", "010", "011"]).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Binary);

        assert_eq!(summary.sites(), 3);
        assert_eq!(summary.segregating_sites(), 1);
        assert_eq!(summary.haplotype_count(), 2);
    }

    #[test]
    fn test_without_sites() {
        let matrix = Matrix::without_sites(6).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Binary);

        assert_eq!(summary.segregating_sites(), 0);
        assert_eq!(summary.haplotype_count(), 1);
        assert_eq!(summary.theta_watterson(), 0.0);
        assert_eq!(summary.r2(), UNDEFINED);
        assert_eq!(summary.fs(), UNDEFINED);
    }

    #[test]
    fn test_single_sample() {
        let matrix = Matrix::from_rows(["0110"]).unwrap();
        let summary = Summary::new(&matrix, Alphabet::Binary);

        assert_eq!(summary.fs(), UNDEFINED);
        assert_eq!(summary.haplotype_count(), 1);
    }
}
