//! Ewens' sampling distribution of the number of alleles.
//!
//! For a sample of size n and mutation parameter θ, the probability q(n, k) of observing exactly
//! k alleles satisfies, for 1 < k < n,
//!
//! ```text
//! q(n, k) = q(n - 1, k) (n - 1) / (θ + n - 1) + q(n - 1, k - 1) θ / (θ + n - 1),
//! ```
//!
//! with closed forms for k = 1 and k = n. See Ewens (1972) and Fu (1997), eqs. 19-21.
//!
//! The table is filled row by row in order of increasing sample size, so that every cell depends
//! only on cells of the previous row. Each cell is written exactly once.

/// A triangular table of the Ewens probabilities q(n, k) for all 1 ≤ k ≤ n ≤ N.
#[derive(Clone, Debug, PartialEq)]
pub struct Ewens {
    theta: f64,
    samples: usize,
    cells: Vec<f64>,
}

impl Ewens {
    /// Creates a new table for samples of size up to `samples` with mutation parameter `theta`.
    ///
    /// The parameter is expected to be positive.
    pub fn new(samples: usize, theta: f64) -> Self {
        let mut cells = Vec::with_capacity(samples * (samples + 1) / 2);

        let ln_theta = theta.ln();

        // ln (n - 1)! and ln θ(θ + 1)...(θ + n - 1), accumulated term by term as n increases
        let mut ln_factorial = 0.0;
        let mut ln_rising = 0.0;

        for n in 1..=samples {
            ln_rising += (theta + (n - 1) as f64).ln();
            if n > 2 {
                ln_factorial += ((n - 1) as f64).ln();
            }

            let denominator = theta + n as f64 - 1.0;
            let previous = n.saturating_sub(1) * n.saturating_sub(2) / 2;

            for k in 1..=n {
                let q = if k == n {
                    (ln_theta * n as f64 - ln_rising).exp()
                } else if k == 1 {
                    (ln_factorial + ln_theta - ln_rising).exp()
                } else {
                    let same = cells[previous + k - 1];
                    let fewer = cells[previous + k - 2];

                    same * ((n - 1) as f64 / denominator) + fewer * (theta / denominator)
                };

                cells.push(q);
            }
        }

        Self {
            theta,
            samples,
            cells,
        }
    }

    /// Returns the mutation parameter.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Returns the largest sample size in the table.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the probability of observing exactly `alleles` alleles in a sample of size `n`.
    ///
    /// # Panics
    ///
    /// Unless 1 ≤ `alleles` ≤ `n` ≤ [`Ewens::samples`].
    pub fn probability(&self, n: usize, alleles: usize) -> f64 {
        assert!(
            n <= self.samples && (1..=n).contains(&alleles),
            "no Ewens probability for {alleles} alleles in sample of size {n}"
        );

        self.cells[n * (n - 1) / 2 + alleles - 1]
    }

    /// Returns the probabilities of observing each number of alleles in a sample of size `n`.
    pub fn row(&self, n: usize) -> &[f64] {
        assert!(n <= self.samples, "no Ewens probabilities for sample of size {n}");

        let start = n * n.saturating_sub(1) / 2;
        &self.cells[start..start + n]
    }
}
