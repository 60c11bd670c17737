//! Fu's Fs.

use crate::utils::snap_to_zero;

use super::{SATURATED, UNDEFINED};

pub mod ewens;
pub use ewens::Ewens;

/// Probabilities below this are treated as zero.
const MIN_PROBABILITY: f64 = 1e-37;

/// Fu's Fs statistic.
///
/// The log-odds of observing at least as many haplotypes as were observed, under the Ewens
/// sampling distribution with θ estimated by π. See Fu (1997).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Fs(pub f64);

impl Fs {
    /// Calculates Fs from the number of samples, π, and the number of distinct haplotypes.
    ///
    /// Returns [`UNDEFINED`] if π is zero, if there are fewer than two samples, or if the
    /// probability of observing at least the given number of haplotypes is indistinguishable from
    /// zero in the upper tail. Returns [`SATURATED`] if the probability of observing fewer
    /// haplotypes is indistinguishable from zero.
    ///
    /// # Panics
    ///
    /// If there are more haplotypes than samples.
    pub fn from_parts(samples: usize, pi: f64, haplotypes: usize) -> Self {
        if pi == 0.0 || samples < 2 {
            return Self(UNDEFINED);
        }

        assert!(
            haplotypes <= samples,
            "found {haplotypes} haplotypes in {samples} samples"
        );

        let ewens = Ewens::new(samples, pi);
        let probabilities = ewens.row(samples);

        let below = probabilities[..haplotypes.saturating_sub(1)]
            .iter()
            .fold(0.0, |acc, q| acc + q);

        // The threshold is one in double precision
        let fs = if below > 1.0 - MIN_PROBABILITY {
            let above = probabilities[haplotypes.saturating_sub(1)..]
                .iter()
                .fold(0.0, |acc, q| acc + q);

            if above < MIN_PROBABILITY {
                return Self(UNDEFINED);
            }

            above.ln() - (1.0 - above).ln()
        } else if below < MIN_PROBABILITY {
            return Self(SATURATED);
        } else {
            (1.0 - below).ln() - below.ln()
        };

        Self(snap_to_zero(fs, 1e-15))
    }
}
