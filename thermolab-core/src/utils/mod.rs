//! Module containing miscellaneous utility functions.

use crate::imports::*;

pub mod interp;

/// Returns true if `val1` and `val2` are within a relative/absolute error of `epsilon` of each other.
/// Default `epsilon` is 1e-8.
pub fn almost_eq(val1: f64, val2: f64, epsilon: Option<f64>) -> bool {
    let epsilon = epsilon.unwrap_or(1e-8);
    ((val2 - val1) / (val1 + val2)).abs() < epsilon || (val2 - val1).abs() < epsilon
}

pub fn is_sorted<T: std::cmp::PartialOrd>(data: &[T]) -> bool {
    data.windows(2).all(|w| w[0] <= w[1])
}

pub fn check_monotonicity(data: &[f64]) -> anyhow::Result<()> {
    ensure!(
        data.windows(2).all(|w| w[0] < w[1]),
        format_dbg!("`data` must be monotonically increasing")
    );
    Ok(())
}

/// `n` evenly spaced samples from `start` to `end`, both ends included
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    Array1::linspace(start, end, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_almost_eq_relative_and_absolute() {
        assert!(almost_eq(1.0, 1.0 + 1e-10, None));
        assert!(almost_eq(0.0, 1e-9, None));
        assert!(!almost_eq(1.0, 1.001, None));
        assert!(almost_eq(1.0, 1.001, Some(1e-2)));
    }

    #[test]
    fn test_check_monotonicity() {
        assert!(check_monotonicity(&[0.0, 1.0, 2.5]).is_ok());
        assert!(check_monotonicity(&[0.0, 1.0, 1.0]).is_err());
        assert!(check_monotonicity(&[2.0, 1.0]).is_err());
        assert!(is_sorted(&[0.0, 1.0, 1.0]));
    }

    #[test]
    fn test_linspace_includes_both_ends() {
        let xs = linspace(298.0, 3000.0, 150);
        assert_eq!(xs.len(), 150);
        assert_eq!(xs[0], 298.0);
        assert_almost_eq!(xs[149], 3000.0);
    }
}
