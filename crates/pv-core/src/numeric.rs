use crate::PvError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PvError::NonFinite { what, value: v })
    }
}

/// Returns `v` when finite, otherwise `fallback`.
#[inline]
pub fn finite_or(v: Real, fallback: Real) -> Real {
    if v.is_finite() { v } else { fallback }
}

/// Divides `num / den`, yielding 0 when the denominator is not strictly positive
/// or the quotient is not finite.
#[inline]
pub fn guarded_div(num: Real, den: Real) -> Real {
    if den > 0.0 {
        finite_or(num / den, 0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn finite_or_substitutes() {
        assert_eq!(finite_or(Real::NAN, 4.0), 4.0);
        assert_eq!(finite_or(Real::INFINITY, 0.0), 0.0);
        assert_eq!(finite_or(2.5, 4.0), 2.5);
    }

    #[test]
    fn guarded_div_zero_and_negative_denominators() {
        assert_eq!(guarded_div(10.0, 0.0), 0.0);
        assert_eq!(guarded_div(10.0, -2.0), 0.0);
        assert_eq!(guarded_div(10.0, Real::NAN), 0.0);
        assert_eq!(guarded_div(10.0, 4.0), 2.5);
    }
}
