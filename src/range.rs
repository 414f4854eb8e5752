//! Angular range normalization.
//!
//! Callers may pass any finite angles. Both endpoints are folded into
//! `[0, domain)`; a range whose end then falls at or before its start is
//! taken to wrap, and its end moves up by one domain. The result is always a
//! non-empty, non-decreasing interval `lo < hi <= lo + domain`, which the
//! angle tables resolve through their shifted copies.

use crate::error::{Result, SphereError};
use crate::table::{FULL_CIRCLE, HALF_CIRCLE};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    pub lo: f64,
    pub hi: f64,
}

impl AngleRange {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// The whole azimuth domain.
    pub fn full_theta() -> Self {
        Self::new(0.0, FULL_CIRCLE)
    }

    /// The whole inclination domain.
    pub fn full_phi() -> Self {
        Self::new(0.0, HALF_CIRCLE)
    }

    /// Canonical form of this range over a domain of size `domain`.
    pub fn normalized(self, domain: f64) -> Result<Self> {
        if !self.lo.is_finite() || !self.hi.is_finite() {
            return Err(SphereError::argument(format!(
                "angle range endpoints must be finite, got ({}, {})",
                self.lo, self.hi
            )));
        }

        let lo = fold(self.lo, domain);
        let mut hi = fold(self.hi, domain);
        if hi <= lo {
            hi += domain;
        }
        Ok(Self { lo, hi })
    }
}

impl From<(f64, f64)> for AngleRange {
    fn from((lo, hi): (f64, f64)) -> Self {
        Self::new(lo, hi)
    }
}

/// Fold `value` into `[0, domain)`.
fn fold(value: f64, domain: f64) -> f64 {
    let folded = value - domain * (value / domain).floor();
    // rounding can land exactly on the domain end for tiny negative inputs
    if folded >= domain || folded < 0.0 {
        0.0
    } else {
        folded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(lo: f64, hi: f64, domain: f64) -> (f64, f64) {
        let r = AngleRange::new(lo, hi).normalized(domain).unwrap();
        (r.lo, r.hi)
    }

    #[test]
    fn test_plain_range_unchanged() {
        assert_eq!(norm(10.0, 20.0, 360.0), (10.0, 20.0));
        assert_eq!(norm(0.0, 180.0, 360.0), (0.0, 180.0));
    }

    #[test]
    fn test_full_domain_wraps_to_one_turn() {
        assert_eq!(norm(0.0, 360.0, 360.0), (0.0, 360.0));
        assert_eq!(norm(0.0, 180.0, 180.0), (0.0, 180.0));
    }

    #[test]
    fn test_wrapping_range() {
        assert_eq!(norm(350.0, 10.0, 360.0), (350.0, 370.0));
        assert_eq!(norm(170.0, 10.0, 180.0), (170.0, 190.0));
    }

    #[test]
    fn test_out_of_domain_inputs() {
        assert_eq!(norm(-10.0, 10.0, 360.0), (350.0, 370.0));
        assert_eq!(norm(370.0, 380.0, 360.0), (10.0, 20.0));
        assert_eq!(norm(-720.0, 45.0, 360.0), (0.0, 45.0));
        assert_eq!(norm(200.0, 250.0, 180.0), (20.0, 70.0));
    }

    #[test]
    fn test_empty_range_becomes_full_turn() {
        assert_eq!(norm(90.0, 90.0, 360.0), (90.0, 450.0));
    }

    #[test]
    fn test_tiny_negative_folds_to_zero() {
        let (lo, hi) = norm(-1e-17, 90.0, 360.0);
        assert!(lo >= 0.0 && lo < 360.0, "lo {} should be in the domain", lo);
        assert_eq!(hi, 90.0);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            AngleRange::new(f64::NAN, 10.0).normalized(360.0),
            Err(SphereError::Argument(_))
        ));
        assert!(matches!(
            AngleRange::new(0.0, f64::INFINITY).normalized(180.0),
            Err(SphereError::Argument(_))
        ));
    }
}
