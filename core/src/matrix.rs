//! Sample matrices.
//!
//! A [`Matrix`] holds one replicate of polymorphism data: one row per sample, one column per
//! site. Rows are stored contiguously in row-major order.

use std::fmt;

/// The alphabet of the symbols in a matrix.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Alphabet {
    /// Ancestral `0` and derived `1` states, as produced by `ms`.
    Binary,
    /// Nucleotides `A`, `G`, `C`, and `T`, as produced by `seq-gen`.
    Nucleotide,
}

impl Alphabet {
    /// The symbols of the alphabet.
    ///
    /// For nucleotides, the order is `A`, `G`, `C`, `T`, which is also the order of the counts in
    /// [`SiteFrequencies::Nucleotide`](crate::SiteFrequencies::Nucleotide).
    pub fn symbols(&self) -> &'static [u8] {
        match self {
            Alphabet::Binary => b"01",
            Alphabet::Nucleotide => &NUCLEOTIDES,
        }
    }

    /// Returns `true` if the symbol belongs to the alphabet.
    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols().contains(&symbol)
    }
}

/// The nucleotides in the order used throughout the crate.
pub const NUCLEOTIDES: [u8; 4] = *b"AGCT";

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alphabet::Binary => f.write_str("binary"),
            Alphabet::Nucleotide => f.write_str("nucleotide"),
        }
    }
}

/// A samples × sites matrix of symbols.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Matrix {
    data: Vec<u8>,
    samples: usize,
    sites: usize,
}

impl Matrix {
    /// Creates a new matrix from rows.
    ///
    /// All rows must have the same length, and there must be at least one row. A matrix with rows
    /// of length zero is valid, and corresponds to a replicate without segregating sites.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, MatrixError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut rows = rows.into_iter();

        let first = rows.next().ok_or(MatrixError::Empty)?;
        let sites = first.as_ref().len();
        let mut data = first.as_ref().to_vec();
        let mut samples = 1;

        for row in rows {
            let row = row.as_ref();

            if row.len() != sites {
                return Err(MatrixError::RaggedRow {
                    row: samples,
                    expected: sites,
                    actual: row.len(),
                });
            }

            data.extend_from_slice(row);
            samples += 1;
        }

        Ok(Self {
            data,
            samples,
            sites,
        })
    }

    /// Creates a matrix with the provided number of samples and no sites.
    pub fn without_sites(samples: usize) -> Result<Self, MatrixError> {
        if samples == 0 {
            Err(MatrixError::Empty)
        } else {
            Ok(Self {
                data: Vec::new(),
                samples,
                sites: 0,
            })
        }
    }

    /// Checks that all symbols belong to the alphabet.
    pub fn check_alphabet(&self, alphabet: Alphabet) -> Result<(), MatrixError> {
        match self.data.iter().position(|&x| !alphabet.contains(x)) {
            Some(i) => Err(MatrixError::InvalidSymbol {
                row: i / self.sites,
                site: i % self.sites,
                symbol: self.data[i],
                alphabet,
            }),
            None => Ok(()),
        }
    }

    /// Returns the number of samples, i.e. rows.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the number of sites, i.e. columns.
    pub fn sites(&self) -> usize {
        self.sites
    }

    /// Returns the row of a sample.
    ///
    /// # Panics
    ///
    /// If the sample is out of bounds.
    pub fn row(&self, sample: usize) -> &[u8] {
        assert!(sample < self.samples, "sample index out of bounds");

        let start = sample * self.sites;
        &self.data[start..start + self.sites]
    }

    /// Returns an iterator over rows.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[u8]> + '_ {
        (0..self.samples).map(move |i| self.row(i))
    }

    /// Returns an iterator over the symbols at a site, in sample order.
    pub fn column(&self, site: usize) -> impl ExactSizeIterator<Item = u8> + '_ {
        assert!(site < self.sites, "site index out of bounds");

        (0..self.samples).map(move |i| self.data[i * self.sites + site])
    }

    /// Returns the number of samples carrying a symbol at a site.
    pub fn count(&self, site: usize, symbol: u8) -> usize {
        self.column(site).filter(|&x| x == symbol).count()
    }
}

/// An error associated with constructing a matrix.
#[derive(Debug, Eq, PartialEq)]
pub enum MatrixError {
    /// The matrix has no rows.
    Empty,
    /// A row has a different length than the first row.
    RaggedRow {
        /// The index of the offending row.
        row: usize,
        /// The length of the first row.
        expected: usize,
        /// The length of the offending row.
        actual: usize,
    },
    /// A symbol does not belong to the alphabet.
    InvalidSymbol {
        /// The row of the symbol.
        row: usize,
        /// The site of the symbol.
        site: usize,
        /// The symbol.
        symbol: u8,
        /// The expected alphabet.
        alphabet: Alphabet,
    },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixError::Empty => f.write_str("matrix contains no samples"),
            MatrixError::RaggedRow {
                row,
                expected,
                actual,
            } => write!(
                f,
                "expected row {row} to contain {expected} sites, found {actual} sites"
            ),
            MatrixError::InvalidSymbol {
                row,
                site,
                symbol,
                alphabet,
            } => write!(
                f,
                "invalid {alphabet} symbol '{}' at row {row}, site {site}",
                symbol.escape_ascii()
            ),
        }
    }
}

impl std::error::Error for MatrixError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows() {
        let matrix = Matrix::from_rows(["0010", "0110", "1000"]).unwrap();

        assert_eq!(matrix.samples(), 3);
        assert_eq!(matrix.sites(), 4);
        assert_eq!(matrix.row(1), b"0110");
        assert_eq!(matrix.column(1).collect::<Vec<_>>(), b"010");
        assert_eq!(matrix.count(2, b'1'), 2);
    }

    #[test]
    fn test_from_rows_ragged() {
        assert_eq!(
            Matrix::from_rows(["AGC", "AG", "AGT"]),
            Err(MatrixError::RaggedRow {
                row: 1,
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(
            Matrix::from_rows(Vec::<&str>::new()),
            Err(MatrixError::Empty)
        );
        assert_eq!(Matrix::without_sites(0), Err(MatrixError::Empty));
    }

    #[test]
    fn test_without_sites() {
        let matrix = Matrix::without_sites(5).unwrap();

        assert_eq!(matrix.samples(), 5);
        assert_eq!(matrix.sites(), 0);
        assert!(matrix.rows().all(|row| row.is_empty()));
    }

    #[test]
    fn test_check_alphabet() {
        let matrix = Matrix::from_rows(["AGCT", "AGNT"]).unwrap();

        assert_eq!(
            matrix.check_alphabet(Alphabet::Nucleotide),
            Err(MatrixError::InvalidSymbol {
                row: 1,
                site: 2,
                symbol: b'N',
                alphabet: Alphabet::Nucleotide
            })
        );
        assert!(Matrix::from_rows(["01", "10"])
            .unwrap()
            .check_alphabet(Alphabet::Binary)
            .is_ok());
    }
}
