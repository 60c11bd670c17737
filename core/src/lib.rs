#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Population genetic summary statistics for simulated replicates.
//!
//! This serves as the core library implementation for the `sstats` CLI, but can also be used as
//! a free-standing library for summarising samples of haplotypes.
//!
//! # Overview
//!
//! A single replicate is represented by a [`Matrix`] of symbols, with samples in rows and sites in
//! columns, drawn from an [`Alphabet`]. Matrices are reduced to [`SiteFrequencies`],
//! [`Haplotypes`], and [`Uniqueness`] counts, from which the statistics in [`stat`] are
//! calculated. A [`Summary`] ties these together, computing each reduction at most once.
//!
//! # Example
//!
//! ```
//! use sstats_core::{Alphabet, Matrix, Summary};
//!
//! // Four samples at three sites, with derived alleles coded as '1'
//! let matrix = Matrix::from_rows(["010", "100", "011", "010"]).expect("rows of equal length");
//!
//! let summary = Summary::new(&matrix, Alphabet::Binary);
//!
//! assert_eq!(summary.segregating_sites(), 3);
//! assert_eq!(summary.haplotype_count(), 3);
//! assert!((summary.pi() - 1.5).abs() < 1e-12);
//! ```

#[cfg(test)]
#[macro_use]
pub(crate) mod approx;

pub mod haplotype;
pub use haplotype::{Haplotype, Haplotypes};

pub mod input;
pub use input::Input;

pub mod matrix;
pub use matrix::{Alphabet, Matrix, MatrixError};

pub mod site;
pub use site::SiteFrequencies;

pub mod stat;

pub mod summary;
pub use summary::Summary;

pub mod unique;
pub use unique::Uniqueness;

pub mod utils;
