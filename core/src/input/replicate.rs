//! Simulated replicates.

use crate::{Alphabet, Matrix, Summary};

pub mod reader;
pub use reader::Reader;

/// A single replicate of simulated data.
#[derive(Clone, Debug, PartialEq)]
pub struct Replicate {
    /// The samples × sites matrix.
    pub matrix: Matrix,
    /// The alphabet of the matrix.
    pub alphabet: Alphabet,
    /// The probability of the segregating sites given θ, as reported by `ms -s S -t θ`.
    pub prob: Option<f64>,
}

impl Replicate {
    /// Creates a new replicate.
    pub fn new(matrix: Matrix, alphabet: Alphabet) -> Self {
        Self {
            matrix,
            alphabet,
            prob: None,
        }
    }

    /// Sets the probability reported for the replicate.
    pub fn with_prob(mut self, prob: f64) -> Self {
        self.prob = Some(prob);
        self
    }

    /// Returns a summary of the replicate.
    pub fn summary(&self) -> Summary<'_> {
        Summary::new(&self.matrix, self.alphabet)
    }
}
