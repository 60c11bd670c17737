//! Numerical helpers.

/// Returns the sum of the first n - 1 terms of the harmonic series
pub fn harmonic(n: u64) -> f64 {
    p_harmonic(n, 1)
}

/// Returns the sum of the first n - 1 terms of the p-harmonic series
pub fn p_harmonic(n: u64, p: u32) -> f64 {
    (1..n).map(|i| 1.0 / (i.pow(p) as f64)).fold(0.0, |acc, x| acc + x)
}

/// Returns zero if the absolute value is below the threshold, and the value otherwise.
pub fn snap_to_zero(x: f64, threshold: f64) -> f64 {
    if x.abs() < threshold {
        0.0
    } else {
        x
    }
}
