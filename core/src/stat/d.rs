//! Tajima's D.

use crate::utils::{harmonic, p_harmonic};

/// Tajima's D statistic.
///
/// The difference between π and Watterson's θ, scaled by the square root of its variance under
/// neutrality.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TajimaD(pub f64);

impl TajimaD {
    /// Calculates Tajima's D from the number of samples, the number of segregating sites, and π.
    ///
    /// Without segregating sites, D is taken to be zero. D is undefined for fewer than two
    /// samples.
    pub fn from_parts(samples: usize, segregating_sites: usize, pi: f64) -> Self {
        if segregating_sites == 0 {
            return Self(0.0);
        }

        let s = segregating_sites as f64;
        let a1 = harmonic(samples as u64);

        Self((pi - s / a1) / variance(samples, s).sqrt())
    }
}

fn variance(samples: usize, s: f64) -> f64 {
    // Notation from Tajima (1989), see also Durrett (2008), pp. 65-66
    let n = samples as f64;

    let a1 = harmonic(samples as u64);
    let a2 = p_harmonic(samples as u64, 2);

    let b1 = (n + 1.0) / (3.0 * (n - 1.0));
    let b2 = (2.0 * (n * n + n + 3.0)) / (9.0 * n * (n - 1.0));

    let c1 = b1 - 1.0 / a1;
    let c2 = b2 - (n + 2.0) / (a1 * n) + a2 / (a1 * a1);

    let e1 = c1 / a1;
    let e2 = c2 / (a1 * a1 + a2);

    e1 * s + e2 * s * (s - 1.0)
}
