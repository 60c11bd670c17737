//! Ramos-Onsins and Rozas' R₂.

use crate::{utils::snap_to_zero, Uniqueness};

use super::UNDEFINED;

/// Ramos-Onsins and Rozas' R₂ statistic.
///
/// Based on the deviation of the number of singletons carried by each sample from half the
/// average number of pairwise differences. See Ramos-Onsins and Rozas (2002).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct R2(pub f64);

impl R2 {
    /// Calculates R₂ from per-sample singleton counts, π, and the number of segregating sites.
    ///
    /// Returns [`UNDEFINED`] if there are no segregating sites or no samples.
    pub fn from_parts(unique: &Uniqueness, pi: f64, segregating_sites: usize) -> Self {
        let samples = unique.samples();

        if segregating_sites == 0 || samples == 0 {
            return Self(UNDEFINED);
        }

        let half_pi = pi / 2.0;
        let squares = unique.as_slice().iter().fold(0.0, |acc, &count| {
            let deviation = count as f64 - half_pi;
            acc + deviation * deviation
        });

        let r2 = (squares / samples as f64).sqrt() / segregating_sites as f64;

        Self(snap_to_zero(r2, 1e-15))
    }
}
