use crate::RgError;

/// Floating point type used throughout system
pub type Real = f64;

/// Slack used when comparing configuration bounds (composition limits etc.).
pub const FLOAT_ACCURACY: Real = 1e-5;

/// Universal gas constant [J/(mol·K)].
pub const GAS_CONSTANT: Real = 8.314_51;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
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

/// Sign of `v` as `1.0`, `-1.0` or `0.0`.
#[inline]
pub fn sign(v: Real) -> Real {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, RgError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(RgError::NonFinite { what, value: v })
    }
}

/// Check `v` is finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, RgError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(RgError::InvalidArg { what })
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
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "pressure").is_err());
        assert!(ensure_positive(-1.0, "pressure").is_err());
        assert_eq!(ensure_positive(2.0, "pressure").unwrap(), 2.0);
    }

    #[test]
    fn sign_of_tiny_values() {
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(1e-300), 1.0);
    }
}
