//! Summary statistics.
//!
//! Some statistics are undefined or uninformative for particular replicates, for instance R₂
//! without segregating sites. Rather than failing, these return one of the out-of-range values
//! [`UNDEFINED`] or [`SATURATED`], which downstream tools conventionally special-case.

use std::fmt;

use crate::Alphabet;

pub mod d;
pub use d::TajimaD;

pub mod fs;
pub use fs::Fs;

pub mod r2;
pub use r2::R2;

pub mod theta;
pub use theta::Theta;

/// The value of a statistic that is undefined for a replicate.
pub const UNDEFINED: f64 = -10_000.0;

/// The value of Fu's Fs when the probability of observing fewer haplotypes vanishes.
pub const SATURATED: f64 = 10_000.0;

/// Returns `true` if the value is one of [`UNDEFINED`] or [`SATURATED`].
pub fn is_sentinel(value: f64) -> bool {
    value == UNDEFINED || value == SATURATED
}

/// An error associated with calculating a statistic.
#[derive(Debug, Eq, PartialEq)]
pub enum StatisticError {
    /// The statistic is not defined for the alphabet of the data.
    Alphabet {
        /// The name of the statistic.
        statistic: &'static str,
        /// The alphabet of the data.
        alphabet: Alphabet,
    },
}

impl fmt::Display for StatisticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatisticError::Alphabet {
                statistic,
                alphabet,
            } => write!(
                f,
                "statistic '{statistic}' requires known derived states and is undefined for \
                {alphabet} data"
            ),
        }
    }
}

impl std::error::Error for StatisticError {}
