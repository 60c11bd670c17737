//! Haplotype counting.
//!
//! Identical rows of a [`Matrix`] are grouped into haplotypes. Each group is represented by its
//! first row in sample order, which carries the multiplicity of the group, while every later
//! member of the group refers back to it.

use crate::Matrix;

/// The value used for absorbed rows in the flat table representation.
///
/// See [`Haplotypes::to_table`].
pub const ABSORBED: i64 = -9;

/// The haplotype status of a single row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Haplotype {
    /// The row is the first occurrence of its haplotype, which occurs the given number of times.
    Counted(usize),
    /// The row is identical to the earlier row with the given index.
    AbsorbedInto(usize),
}

impl Haplotype {
    /// Returns the multiplicity if the row is the first occurrence of its haplotype.
    pub fn count(&self) -> Option<usize> {
        match self {
            Haplotype::Counted(count) => Some(*count),
            Haplotype::AbsorbedInto(_) => None,
        }
    }
}

/// Haplotype counts of a matrix, one status per row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Haplotypes(Vec<Haplotype>);

impl Haplotypes {
    /// Groups the identical rows of a matrix.
    ///
    /// Rows are compared pairwise, so this is quadratic in the number of samples. A matrix without
    /// sites has a single haplotype shared by all samples.
    pub fn from_matrix(matrix: &Matrix) -> Self {
        let samples = matrix.samples();

        if matrix.sites() == 0 {
            let rows = (0..samples)
                .map(|i| match i {
                    0 => Haplotype::Counted(samples),
                    _ => Haplotype::AbsorbedInto(0),
                })
                .collect();

            return Self(rows);
        }

        // Rows not yet visited are `None`
        let mut rows: Vec<Option<Haplotype>> = vec![None; samples];

        for i in 0..samples {
            if rows[i].is_some() {
                continue;
            }

            let mut count = 1;
            for j in (i + 1)..samples {
                if rows[j].is_none() && matrix.row(i) == matrix.row(j) {
                    rows[j] = Some(Haplotype::AbsorbedInto(i));
                    count += 1;
                }
            }
            rows[i] = Some(Haplotype::Counted(count));
        }

        Self(rows.into_iter().flatten().collect())
    }

    /// Returns the number of samples.
    pub fn samples(&self) -> usize {
        self.0.len()
    }

    /// Returns the status of each row.
    pub fn as_slice(&self) -> &[Haplotype] {
        &self.0
    }

    /// Returns an iterator over the multiplicities of the distinct haplotypes, in order of first
    /// occurrence.
    pub fn counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().filter_map(Haplotype::count)
    }

    /// Returns the number of distinct haplotypes.
    pub fn distinct(&self) -> usize {
        self.counts().count()
    }

    /// Returns the number of haplotypes occurring exactly once.
    pub fn singletons(&self) -> usize {
        self.counts().filter(|&count| count == 1).count()
    }

    /// Returns the multiplicity of the most common haplotype.
    pub fn max_count(&self) -> usize {
        self.counts().max().unwrap_or(0)
    }

    /// Returns the haplotype homozygosity, the sum of squared haplotype frequencies.
    pub fn homozygosity(&self) -> f64 {
        let n = self.samples() as f64;

        self.counts()
            .map(|count| {
                let p = count as f64 / n;
                p * p
            })
            .sum()
    }

    /// Returns the mean number of samples per distinct haplotype.
    pub fn mean_count(&self) -> f64 {
        self.samples() as f64 / self.distinct() as f64
    }

    /// Returns the flat table representation, with one entry per row.
    ///
    /// The entry is the multiplicity for the first occurrence of a haplotype, and [`ABSORBED`]
    /// otherwise.
    pub fn to_table(&self) -> Vec<i64> {
        self.0
            .iter()
            .map(|haplotype| match haplotype {
                Haplotype::Counted(count) => *count as i64,
                Haplotype::AbsorbedInto(_) => ABSORBED,
            })
            .collect()
    }
}
