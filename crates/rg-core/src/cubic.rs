//! Closed-form cubic solver (Cardano/Vieta).
//!
//! Solves `a·x³ + b·x² + c·x + d = 0`. The discriminant `S = Q³ − R²` of the
//! normalized equation selects the branch:
//! - `S > 0`: three real roots (trigonometric form),
//! - `S < 0`: one real root plus a complex pair (hyperbolic form),
//! - `S ≈ 0`: one real root plus a double root.
//!
//! Every cubic equation of state and the binodal calculator go through
//! [`solve_cubic`].

use crate::error::{RgError, RgResult};
use crate::numeric::{Real, sign};
use std::f64::consts::PI;

/// Band around zero treated as "zero" for `S` and `Q`.
const DISCRIMINANT_EPS: Real = 1e-5;

/// Imaginary part below which a root counts as real.
const IMAGINARY_EPS: Real = 1e-5;

/// Newton iteration cap of [`refine`].
const NEWTON_MAX_ITERATIONS: usize = 100;

/// A root of the cubic, possibly complex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    pub re: Real,
    pub im: Real,
}

impl Root {
    fn real(re: Real) -> Self {
        Self { re, im: 0.0 }
    }
}

/// Raw Cardano output: `[x0, x1, x2]` where `x0` is always real.
pub fn cardano(coefs: [Real; 4]) -> RgResult<[Root; 3]> {
    let [a, b, c, d] = coefs;
    if coefs.iter().any(|v| !v.is_finite()) {
        return Err(RgError::NonFinite {
            what: "cubic coefficient",
            value: coefs.iter().copied().find(|v| !v.is_finite()).unwrap_or(Real::NAN),
        });
    }
    if a == 0.0 {
        return Err(RgError::InvalidArg {
            what: "leading cubic coefficient is zero",
        });
    }
    let (b, c, d) = (b / a, c / a, d / a);

    let q = (b * b - 3.0 * c) / 9.0;
    let r = (2.0 * b * b * b - 9.0 * b * c + 27.0 * d) / 54.0;
    let s = q * q * q - r * r;
    let shift = b / 3.0;

    if s > DISCRIMINANT_EPS {
        let ratio = (r / q.powf(1.5)).clamp(-1.0, 1.0);
        let theta = ratio.acos() / 3.0;
        let amp = -2.0 * q.sqrt();
        return Ok([
            Root::real(amp * theta.cos() - shift),
            Root::real(amp * (theta + 2.0 * PI / 3.0).cos() - shift),
            Root::real(amp * (theta - 2.0 * PI / 3.0).cos() - shift),
        ]);
    }

    if s < -DISCRIMINANT_EPS {
        let sr = sign(r);
        if q > DISCRIMINANT_EPS {
            let x = (r / q.powf(1.5)).abs();
            let phi = x.acosh() / 3.0;
            let x0 = -2.0 * sr * q.sqrt() * phi.cosh() - shift;
            let re = sr * q.sqrt() * phi.cosh() - shift;
            let im = (3.0 * q).sqrt() * phi.sinh();
            return Ok([Root::real(x0), Root { re, im }, Root { re, im: -im }]);
        }
        if q < -DISCRIMINANT_EPS {
            let x = (r / (-q).powf(1.5)).abs();
            let phi = x.asinh() / 3.0;
            let x0 = -2.0 * sr * (-q).sqrt() * phi.sinh() - shift;
            let re = sr * (-q).sqrt() * phi.sinh() - shift;
            let im = (-3.0 * q).sqrt() * phi.cosh();
            return Ok([Root::real(x0), Root { re, im }, Root { re, im: -im }]);
        }
        let x0 = -(d - b * b * b / 27.0).cbrt() - shift;
        let re = -(b + x0) / 2.0;
        let im = ((b - 3.0 * x0) * (b + x0) - 4.0 * c).abs().sqrt() / 2.0;
        return Ok([Root::real(x0), Root { re, im }, Root { re, im: -im }]);
    }

    let sq = q.abs().sqrt();
    let sr = sign(r);
    let x0 = -2.0 * sr * sq - shift;
    let x1 = sr * sq - shift;
    Ok([Root::real(x0), Root::real(x1), Root::real(x1)])
}

/// Real roots of a cubic, as seen by the equation-of-state code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CubicRoots {
    /// One real root (the other two are a complex pair).
    One(Real),
    /// Three real roots sorted ascending (duplicates possible).
    Three([Real; 3]),
}

impl CubicRoots {
    /// Number of real roots reported: 1 or 3.
    pub fn count(&self) -> usize {
        match self {
            CubicRoots::One(_) => 1,
            CubicRoots::Three(_) => 3,
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(self, CubicRoots::One(_))
    }

    pub fn smallest(&self) -> Real {
        match self {
            CubicRoots::One(x) => *x,
            CubicRoots::Three(xs) => xs[0],
        }
    }

    pub fn largest(&self) -> Real {
        match self {
            CubicRoots::One(x) => *x,
            CubicRoots::Three(xs) => xs[2],
        }
    }

    pub fn real_roots(&self) -> Vec<Real> {
        match self {
            CubicRoots::One(x) => vec![*x],
            CubicRoots::Three(xs) => xs.to_vec(),
        }
    }
}

/// Solve the cubic and classify its real roots.
///
/// Three roots are returned sorted ascending so callers can take the smallest
/// (liquid-like) or largest (vapour-like) root directly.
pub fn solve_cubic(coefs: [Real; 4]) -> RgResult<CubicRoots> {
    let roots = cardano(coefs)?;
    if roots[1].im.abs() < IMAGINARY_EPS {
        let mut xs = [roots[0].re, roots[1].re, roots[2].re];
        xs.sort_by(|l, r| l.total_cmp(r));
        Ok(CubicRoots::Three(xs))
    } else {
        Ok(CubicRoots::One(roots[0].re))
    }
}

fn eval(c: &[Real; 4], x: Real) -> (Real, Real) {
    let f = ((c[0] * x + c[1]) * x + c[2]) * x + c[3];
    let df = (3.0 * c[0] * x + 2.0 * c[1]) * x + c[2];
    (f, df)
}

/// Rounding-level size of `f(x)`: a residual below this is a root.
fn residual_floor(c: &[Real; 4], x: Real) -> Real {
    let magnitude = (c[0] * x * x * x).abs() + (c[1] * x * x).abs() + (c[2] * x).abs() + c[3].abs();
    4.0 * Real::EPSILON * magnitude
}

/// Newton iteration on a monic cubic, `None` when it stalls or diverges.
fn newton(c: &[Real; 4], mut x: Real, max_iterations: usize) -> Option<Real> {
    for _ in 0..max_iterations {
        let (f, df) = eval(c, x);
        if f.abs() <= residual_floor(c, x) {
            return Some(x);
        }
        if df == 0.0 || !df.is_finite() {
            return None;
        }
        let step = f / df;
        x -= step;
        if !x.is_finite() {
            return None;
        }
        if step.abs() <= 4.0 * Real::EPSILON * x.abs().max(1.0) {
            return Some(x);
        }
    }
    (eval(c, x).0.abs() <= 1e-12).then_some(x)
}

/// Polish the closed-form roots to machine precision.
///
/// Inside the `S ≈ 0` band the closed form reports a double root that is
/// only an approximation, and close root pairs can be missed altogether. One
/// seed is driven to an exact root by Newton's method, the cubic is deflated
/// by it, and the remaining quadratic decides whether there are one or three
/// real roots.
pub fn refine(coefs: [Real; 4], roots: CubicRoots) -> RgResult<CubicRoots> {
    let [a, b, c, d] = coefs;
    if a == 0.0 {
        return Err(RgError::InvalidArg {
            what: "leading cubic coefficient is zero",
        });
    }
    let monic = [1.0, b / a, c / a, d / a];
    let mut seeds = roots.real_roots();
    seeds.reverse();
    let Some(root) = seeds
        .into_iter()
        .find_map(|seed| newton(&monic, seed, NEWTON_MAX_ITERATIONS))
    else {
        return Err(RgError::NoConvergence {
            what: "cubic root polishing",
            iterations: NEWTON_MAX_ITERATIONS,
        });
    };

    // x² + p·x + q = cubic / (x − root)
    let p = monic[1] + root;
    let q = monic[2] + root * p;
    let mut disc = p * p - 4.0 * q;
    if disc < 0.0 && -disc <= 16.0 * Real::EPSILON * (p * p + 4.0 * q.abs()) {
        // a double root lost to rounding
        disc = 0.0;
    }
    if disc < 0.0 {
        return Ok(CubicRoots::One(root));
    }
    let t = -(p + p.signum() * disc.sqrt()) / 2.0;
    let (x1, x2) = if t == 0.0 { (0.0, -p) } else { (t, q / t) };
    let polish = |x: Real| newton(&monic, x, 8).unwrap_or(x);
    let mut xs = [root, polish(x1), polish(x2)];
    xs.sort_by(|l, r| l.total_cmp(r));
    Ok(CubicRoots::Three(xs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_roots(r1: Real, r2: Real, r3: Real) -> [Real; 4] {
        [
            1.0,
            -(r1 + r2 + r3),
            r1 * r2 + r1 * r3 + r2 * r3,
            -r1 * r2 * r3,
        ]
    }

    #[test]
    fn three_distinct_roots() {
        let roots = solve_cubic(from_roots(2.0, -1.0, 0.0)).unwrap();
        let CubicRoots::Three(xs) = roots else {
            panic!("expected three roots, got {roots:?}");
        };
        assert!((xs[0] + 1.0).abs() < 1e-9);
        assert!(xs[1].abs() < 1e-9);
        assert!((xs[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn hyperbolic_branch_with_positive_q() {
        // (x - 3)(x² + 1)
        let roots = solve_cubic([1.0, -3.0, 1.0, -3.0]).unwrap();
        assert_eq!(roots.count(), 1);
        assert!((roots.smallest() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn hyperbolic_branch_with_negative_q() {
        // x³ + 3x − 4 has the single real root 1
        let raw = cardano([1.0, 0.0, 3.0, -4.0]).unwrap();
        assert!((raw[0].re - 1.0).abs() < 1e-9);
        assert!((raw[1].re + 0.5).abs() < 1e-9);
        assert!((raw[1].im.abs() - 15.0_f64.sqrt() / 2.0).abs() < 1e-9);
        assert_eq!(solve_cubic([1.0, 0.0, 3.0, -4.0]).unwrap().count(), 1);
    }

    #[test]
    fn hyperbolic_branch_with_vanishing_q() {
        // x³ − 1
        let raw = cardano([1.0, 0.0, 0.0, -1.0]).unwrap();
        assert!((raw[0].re - 1.0).abs() < 1e-12);
        assert!((raw[1].re + 0.5).abs() < 1e-12);
        assert!((raw[1].im.abs() - 3.0_f64.sqrt() / 2.0).abs() < 1e-12);
        assert_eq!(solve_cubic([1.0, 0.0, 0.0, -1.0]).unwrap().count(), 1);
    }

    #[test]
    fn degenerate_double_root() {
        // (x − 1)²(x − 2)
        let roots = solve_cubic([1.0, -4.0, 5.0, -2.0]).unwrap();
        let CubicRoots::Three(xs) = roots else {
            panic!("expected three roots, got {roots:?}");
        };
        assert!((xs[0] - 1.0).abs() < 1e-9);
        assert!((xs[1] - 1.0).abs() < 1e-9);
        assert!((xs[2] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn scaled_leading_coefficient() {
        let c = from_roots(0.5, 1.5, 4.0).map(|v| v * -3.0);
        let roots = solve_cubic(c).unwrap();
        assert!((roots.smallest() - 0.5).abs() < 1e-9);
        assert!((roots.largest() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn refine_repairs_the_degenerate_band() {
        // roots 0.3, 0.31, 0.9: S falls inside the band and the closed form
        // reports a double root near 0.305 that solves nothing
        let coefs = from_roots(0.3, 0.31, 0.9);
        let raw = solve_cubic(coefs).unwrap();
        assert!((raw.largest() - 0.9).abs() > 1e-5);

        let CubicRoots::Three(xs) = refine(coefs, raw).unwrap() else {
            panic!("expected three roots");
        };
        assert!((xs[0] - 0.3).abs() < 1e-9);
        assert!((xs[1] - 0.31).abs() < 1e-9);
        assert!((xs[2] - 0.9).abs() < 1e-12);
    }

    #[test]
    fn refine_keeps_a_single_root_single() {
        // (x − 1)(x² + 0.01): one real root and a complex pair
        let coefs = [1.0, -1.0, 0.01, -0.01];
        let roots = refine(coefs, solve_cubic(coefs).unwrap()).unwrap();
        assert_eq!(roots.count(), 1);
        assert!((roots.largest() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_leading_coefficient_is_rejected() {
        let err = solve_cubic([0.0, 1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, RgError::InvalidArg { .. }));
    }

    #[test]
    fn non_finite_coefficient_is_rejected() {
        let err = solve_cubic([1.0, Real::NAN, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, RgError::NonFinite { .. }));
    }
}
