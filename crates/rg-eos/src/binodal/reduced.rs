//! Reduced isotherms `π(ω, τ)` of the cubic families.

use rg_core::numeric::Real;
use std::f64::consts::SQRT_2;

/// Critical compressibility used to reduce the Peng-Robinson equation.
const PR_ZC: Real = 0.3074;

/// Reduced equation of one cubic family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReducedEquation {
    /// `π = 3τ/(ω−b) − A/(√τ·ω(ω+b))`.
    RedlichKwong,
    /// `π = 3τ/(ω−b) − A·α(τ)/(ω(ω+b))`.
    Soave { m: Real },
    /// `π = (τ/Zc)/(ω−b) − A·α(τ)/(ω²+2bω−b²)`.
    PengRobinson { kappa: Real },
}

impl ReducedEquation {
    pub fn soave(acentric: Real) -> Self {
        ReducedEquation::Soave {
            m: 0.48 + 1.574 * acentric - 0.176 * acentric * acentric,
        }
    }

    pub fn peng_robinson(acentric: Real) -> Self {
        ReducedEquation::PengRobinson {
            kappa: 0.37464 + 1.54226 * acentric - 0.26992 * acentric * acentric,
        }
    }

    /// Reduced co-volume.
    pub fn b(&self) -> Real {
        match self {
            ReducedEquation::RedlichKwong | ReducedEquation::Soave { .. } => 0.08664 * 3.0,
            ReducedEquation::PengRobinson { .. } => 0.0778 / PR_ZC,
        }
    }

    /// Temperature-dependent attraction in reduced units.
    fn attraction(&self, tau: Real) -> Real {
        match *self {
            ReducedEquation::RedlichKwong => 0.42748 * 9.0 / tau.sqrt(),
            ReducedEquation::Soave { m } => {
                let f = 1.0 + m * (1.0 - tau.sqrt());
                0.42747 * 9.0 * f * f
            }
            ReducedEquation::PengRobinson { kappa } => {
                let f = 1.0 + kappa * (1.0 - tau.sqrt());
                0.45724 / (PR_ZC * PR_ZC) * f * f
            }
        }
    }

    /// Coefficient of the repulsive term, `RT/(pc·vc)` in reduced form.
    fn thermal(&self, tau: Real) -> Real {
        match self {
            ReducedEquation::PengRobinson { .. } => tau / PR_ZC,
            _ => 3.0 * tau,
        }
    }

    /// Volume cubic of the isotherm at `(π, τ)`.
    pub fn isotherm_cubic(&self, pi: Real, tau: Real) -> [Real; 4] {
        let a = self.attraction(tau);
        let b = self.b();
        let r = self.thermal(tau);
        match self {
            ReducedEquation::PengRobinson { .. } => [
                pi,
                pi * b - r,
                -3.0 * pi * b * b - 2.0 * b * r + a,
                pi * b * b * b + b * b * r - a * b,
            ],
            _ => [pi, -r, a - pi * b * b - r * b, -a * b],
        }
    }

    /// Reduced pressure on the isotherm.
    pub fn pressure(&self, omega: Real, tau: Real) -> Real {
        let a = self.attraction(tau);
        let b = self.b();
        let den = match self {
            ReducedEquation::PengRobinson { .. } => omega * omega + 2.0 * b * omega - b * b,
            _ => omega * (omega + b),
        };
        self.thermal(tau) / (omega - b) - a / den
    }

    /// `∫ π dω` between two volumes on the isotherm.
    pub fn integral(&self, tau: Real, v1: Real, v2: Real) -> Real {
        let a = self.attraction(tau);
        let b = self.b();
        let repulsive = self.thermal(tau) * ((v2 - b) / (v1 - b)).ln();
        match self {
            ReducedEquation::PengRobinson { .. } => {
                let log_pr = |v: Real| {
                    ((v + (1.0 - SQRT_2) * b) / (v + (1.0 + SQRT_2) * b)).ln() / (2.0 * SQRT_2 * b)
                };
                repulsive - a * (log_pr(v2) - log_pr(v1))
            }
            _ => repulsive - a / b * (v2 * (v1 + b) / (v1 * (v2 + b))).ln(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rg_core::cubic::solve_cubic;

    fn numeric_integral(eq: &ReducedEquation, tau: Real, v1: Real, v2: Real) -> Real {
        let n = 20_000;
        let h = (v2 - v1) / n as Real;
        let mut acc = 0.5 * (eq.pressure(v1, tau) + eq.pressure(v2, tau));
        for i in 1..n {
            acc += eq.pressure(v1 + h * i as Real, tau);
        }
        acc * h
    }

    #[test]
    fn closed_form_integrals_match_quadrature() {
        for eq in [
            ReducedEquation::RedlichKwong,
            ReducedEquation::soave(0.1),
            ReducedEquation::peng_robinson(0.1),
        ] {
            let exact = eq.integral(0.8, 0.8, 3.0);
            let approx = numeric_integral(&eq, 0.8, 0.8, 3.0);
            assert!(
                ((exact - approx) / approx).abs() < 1e-6,
                "{eq:?}: {exact} vs {approx}"
            );
        }
    }

    #[test]
    fn isotherm_cubic_roots_lie_on_isotherm() {
        for eq in [
            ReducedEquation::RedlichKwong,
            ReducedEquation::soave(0.2),
            ReducedEquation::peng_robinson(0.2),
        ] {
            let pi = 0.5;
            let roots = solve_cubic(eq.isotherm_cubic(pi, 0.9)).unwrap();
            let v = roots.largest();
            assert!((eq.pressure(v, 0.9) - pi).abs() < 1e-6, "{eq:?}");
        }
    }

    #[test]
    fn near_unit_critical_point() {
        // the families are reduced so that π(1, 1) is close to 1
        let rk = ReducedEquation::RedlichKwong;
        assert!((rk.pressure(1.0, 1.0) - 1.0).abs() < 1e-3);
        let pr = ReducedEquation::peng_robinson(0.0);
        assert!((pr.pressure(1.0, 1.0) - 1.0).abs() < 1e-2);
    }
}
