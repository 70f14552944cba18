//! Saturation envelope of the cubic equations by Maxwell's equal-area rule.
//!
//! Envelopes are computed in reduced coordinates `(τ, π, ω)` once per
//! model family and acentric factor, then cached process-wide (see
//! [`cache`]). The first point of every envelope is the critical point
//! `(1, 1, 1, 1)`; the rest follow [`REDUCED_TEMPERATURES`].

pub mod cache;
pub mod reduced;

pub use cache::{BinodalFamily, BinodalKey, clear, contains, get_or_compute};
pub use reduced::ReducedEquation;

use rg_core::cubic::{CubicRoots, solve_cubic};
use rg_core::numeric::Real;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Sampled reduced temperatures, descending.
pub const REDUCED_TEMPERATURES: [Real; 11] =
    [0.97, 0.95, 0.92, 0.9, 0.87, 0.85, 0.8, 0.75, 0.7, 0.6, 0.5];

const MAX_ITERATIONS: usize = 3000;
const MAXWELL_TOLERANCE: Real = 0.005;
const STEP_FRACTION: Real = 0.002;
/// Samples closer to the critical point take smaller pressure steps.
const FINE_STEP_SAMPLES: usize = 4;
const DEGENERATE_WIDTH: Real = 1e-4;

/// Parallel vectors describing a binodal envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BinodalPoints {
    pub t: Vec<Real>,
    pub p: Vec<Real>,
    pub v_left: Vec<Real>,
    pub v_right: Vec<Real>,
}

impl BinodalPoints {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    fn push(&mut self, t: Real, p: Real, v_left: Real, v_right: Real) {
        self.t.push(t);
        self.p.push(p);
        self.v_left.push(v_left);
        self.v_right.push(v_right);
    }

    /// Absolute envelope for a gas with the given critical point.
    pub fn scaled(&self, vc: Real, pc: Real, tc: Real) -> BinodalPoints {
        BinodalPoints {
            t: self.t.iter().map(|t| t * tc).collect(),
            p: self.p.iter().map(|p| p * pc).collect(),
            v_left: self.v_left.iter().map(|v| v * vc).collect(),
            v_right: self.v_right.iter().map(|v| v * vc).collect(),
        }
    }

    /// Rows as `(t, p, v_left, v_right)`.
    pub fn rows(&self) -> impl Iterator<Item = (Real, Real, Real, Real)> + '_ {
        (0..self.len()).map(|i| (self.t[i], self.p[i], self.v_left[i], self.v_right[i]))
    }
}

/// One accepted saturation sample.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Sample {
    pi: Real,
    v_left: Real,
    v_right: Real,
}

/// Temperatures too close to the critical point have a single inflection
/// root and no loop to balance.
fn has_pressure_loop(tau: Real) -> bool {
    let gate = [1.0, -9.0 / (4.0 * tau), 6.0 / (4.0 * tau), -1.0 / (4.0 * tau)];
    matches!(solve_cubic(gate), Ok(CubicRoots::Three(_)))
}

/// Search the saturation pressure of one isotherm.
fn saturation_sample(eq: &ReducedEquation, index: usize, tau: Real) -> Option<Sample> {
    let b = eq.b();
    let mut pi = tau.powi(3);
    if pi <= 0.0 {
        pi = 0.01;
    }
    let mut dpi = -STEP_FRACTION * pi;

    for iteration in 0..MAX_ITERATIONS {
        if index < FINE_STEP_SAMPLES {
            dpi *= 0.1;
        }
        pi += dpi;
        let roots = solve_cubic(eq.isotherm_cubic(pi, tau)).ok()?;
        let [v_left, _, v_right] = match roots {
            CubicRoots::One(root) => {
                dpi = STEP_FRACTION * pi;
                if root <= 1.0 {
                    pi -= 2.0 * dpi;
                } else {
                    pi += 2.0 * dpi;
                }
                continue;
            }
            CubicRoots::Three(xs) => xs,
        };
        if v_left <= b {
            dpi = STEP_FRACTION * pi;
            pi -= 2.0 * dpi;
            continue;
        }
        if (v_right - v_left).abs() < DEGENERATE_WIDTH {
            trace!(tau, pi, "degenerate roots");
            return None;
        }

        let rect = (v_right - v_left) * pi;
        let diff = (rect - eq.integral(tau, v_left, v_right)) / rect;
        if diff.abs() < MAXWELL_TOLERANCE {
            debug!(tau, pi, v_left, v_right, iterations = iteration + 1, "binodal sample");
            return Some(Sample {
                pi,
                v_left,
                v_right,
            });
        }
        if diff > 0.0 {
            pi -= 2.0 * dpi;
        } else {
            pi += 3.0 * dpi;
        }
        dpi = STEP_FRACTION * pi;
    }
    debug!(tau, "binodal sample did not converge");
    None
}

/// Reduced envelope of one equation.
pub fn calculate(eq: &ReducedEquation) -> BinodalPoints {
    let mut points = BinodalPoints::default();
    points.push(1.0, 1.0, 1.0, 1.0);
    for (index, &tau) in REDUCED_TEMPERATURES.iter().enumerate() {
        if !has_pressure_loop(tau) {
            continue;
        }
        let Some(sample) = saturation_sample(eq, index, tau) else {
            continue;
        };
        if sample.pi > 0.0 && sample.v_left > 0.0 && sample.v_right > 0.0 {
            points.push(tau, sample.pi, sample.v_left, sample.v_right);
        }
    }
    points
}
