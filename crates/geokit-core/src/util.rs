//! Small numeric helpers

/// Default relative tolerance used by [`is_close_default`]
pub const DEFAULT_REL_TOL: f64 = 1e-9;

/// Check whether two floats are close enough to be considered equal.
///
/// Uses the symmetric rule `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)`.
/// Comparisons against exactly zero need a non-zero `abs_tol`.
pub fn is_close(a: f64, b: f64, rel_tol: f64, abs_tol: f64) -> bool {
    (a - b).abs() <= f64::max(rel_tol * f64::max(a.abs(), b.abs()), abs_tol)
}

/// [`is_close`] with `rel_tol = 1e-9` and `abs_tol = 0`
pub fn is_close_default(a: f64, b: f64) -> bool {
    is_close(a, b, DEFAULT_REL_TOL, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values() {
        assert!(is_close_default(1.5, 1.5));
        assert!(is_close_default(0.0, 0.0));
    }

    #[test]
    fn test_relative_tolerance() {
        assert!(is_close_default(1_000_000.0, 1_000_000.000_1));
        assert!(!is_close_default(1.0, 1.001));
        assert!(is_close(1.0, 1.001, 1e-2, 0.0));
    }

    #[test]
    fn test_near_zero_needs_abs_tol() {
        assert!(!is_close_default(0.0, 1e-12));
        assert!(is_close(0.0, 1e-12, DEFAULT_REL_TOL, 1e-10));
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(is_close(3.0, 3.1, 0.05, 0.0), is_close(3.1, 3.0, 0.05, 0.0));
    }
}
