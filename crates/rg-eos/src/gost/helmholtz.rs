//! Reduced functions of the correlation.
//!
//! GOST 30319.3 works with the compressibility functions `A0..A3` of the
//! reduced density `σ` and temperature `τ = T/(1 K)`. ISO 20765 uses the
//! reduced Helmholtz energy `φ(τ, σ)` with `τ = (1 K)/T` and its partial
//! derivatives.

use super::MixtureCoefficients;
use super::tables::{IdealGasTerms, TERMS, VIRIAL_TERMS};
use rg_core::numeric::Real;

/// `A0..A3` at one `(T, σ)`; `z = 1 + A0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompressibilityTerms {
    pub a0: Real,
    pub a1: Real,
    pub a2: Real,
    pub a3: Real,
}

pub fn compressibility_terms(coef: &MixtureCoefficients, t: Real, sigma: Real) -> CompressibilityTerms {
    let mut terms = CompressibilityTerms::default();
    for (n, row) in TERMS.iter().enumerate() {
        let (dn, un) = (coef.dn(n), coef.un(n));
        let sk = sigma.powf(row.k);
        let ck = row.c * row.k * sk;
        let decay = (-row.c * sk).exp();
        let base = row.a * sigma.powf(row.b) * t.powf(-row.u);
        let first = row.b * dn + (row.b - ck) * un * decay;

        terms.a0 += base * first;
        terms.a1 += base
            * ((row.b + 1.0) * row.b * dn
                + ((row.b - ck) * (row.b - ck + 1.0) - row.c * row.k * row.k * sk) * un * decay);
        terms.a2 += base * (1.0 - row.u) * first;
        terms.a3 += base * (1.0 - row.u) * row.u * (dn + un * decay);
    }
    terms
}

fn planck_sinh(c: Real, d: Real, theta: Real) -> Real {
    if d == 0.0 {
        0.0
    } else {
        let x = d * theta;
        c * (x / x.sinh()).powi(2)
    }
}

fn planck_cosh(c: Real, d: Real, theta: Real) -> Real {
    let x = d * theta;
    c * (x / x.cosh()).powi(2)
}

/// Reduced ideal-gas isobaric heat capacity `cp0/R` of one component.
pub fn reduced_cp0(terms: &IdealGasTerms, t: Real) -> Real {
    let theta = 1.0 / t;
    terms.b
        + planck_sinh(terms.c, terms.d, theta)
        + planck_cosh(terms.e, terms.f, theta)
        + planck_sinh(terms.g, terms.h, theta)
        + planck_cosh(terms.i, terms.j, theta)
}

/// Ideal part of `φ` and its first two `τ` derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IdealPart {
    pub fi: Real,
    pub fi_t: Real,
    pub fi_tt: Real,
}

/// Mole-weighted ideal part at `τ = 1/T`, without the density reference
/// term (see [`IdealPart::with_reference`]).
pub fn ideal_part<'a>(components: impl Iterator<Item = (Real, &'a IdealGasTerms)>, t: Real) -> IdealPart {
    let tau = 1.0 / t;
    let ln_sinh = |c: Real, d: Real| if d == 0.0 { 0.0 } else { c * (d * tau).sinh().ln() };
    let ln_cosh = |c: Real, d: Real| c * (d * tau).cosh().ln();
    let tanh = |c: Real, d: Real| c * d * (d * tau).tanh();
    let coth = |c: Real, d: Real| if d == 0.0 { 0.0 } else { c * d / (d * tau).tanh() };
    let sinh2 = |c: Real, d: Real| if d == 0.0 { 0.0 } else { c * (d / (d * tau).sinh()).powi(2) };
    let cosh2 = |c: Real, d: Real| c * (d / (d * tau).cosh()).powi(2);

    let mut part = IdealPart::default();
    for (x, p) in components {
        part.fi += x
            * (p.a1 + p.a2 * tau + p.b * tau.ln() + ln_sinh(p.c, p.d) - ln_cosh(p.e, p.f)
                + ln_sinh(p.g, p.h)
                - ln_cosh(p.i, p.j)
                + x.ln());
        part.fi_t += x
            * (p.a2 + (p.b - 1.0) / tau + coth(p.c, p.d) - tanh(p.e, p.f) + coth(p.g, p.h)
                - tanh(p.i, p.j));
        part.fi_tt += x
            * (-(p.b - 1.0) / (tau * tau)
                - sinh2(p.c, p.d)
                - cosh2(p.e, p.f)
                - sinh2(p.g, p.h)
                - cosh2(p.i, p.j));
    }
    part
}

impl IdealPart {
    /// Add `ln(τ_ref/τ) + ln(σ/σ_ref)` for the reference state
    /// (298.15 K, 101.325 kPa).
    pub fn with_reference(mut self, t: Real, sigma: Real, t_ref: Real, sigma_ref: Real) -> Self {
        self.fi += (t / t_ref).ln() + (sigma / sigma_ref).ln();
        self
    }
}

/// `φ` and the derivative groups used by ISO 20765:
/// `φ_τ`, `φ_ττ`, `φ_σ`, `φ_1 = 1 + 2σφ_σ^r + σ²φ_σσ^r`,
/// `φ_2 = 1 + σφ_σ^r − στφ_στ^r`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Helmholtz {
    pub fi: Real,
    pub fi_t: Real,
    pub fi_tt: Real,
    pub fi_d: Real,
    pub fi_1: Real,
    pub fi_2: Real,
}

pub fn helmholtz(coef: &MixtureCoefficients, ideal: IdealPart, t: Real, sigma: Real) -> Helmholtz {
    let tau = 1.0 / t;
    let kx3 = coef.kx.powi(3);
    let sk = sigma / kx3;

    let second_virial: Real = TERMS[..VIRIAL_TERMS]
        .iter()
        .zip(coef.bn.iter())
        .map(|(row, bn)| row.a * bn * tau.powf(row.u))
        .sum();

    let mut out = Helmholtz {
        fi: ideal.fi + second_virial * sk,
        fi_t: tau * ideal.fi_t,
        fi_tt: tau * tau * ideal.fi_tt,
        fi_d: 1.0 + second_virial * sk,
        fi_1: 1.0 + 2.0 * second_virial * sk,
        fi_2: 1.0,
    };

    let (mut dt, mut dtt, mut d2) = (0.0, 0.0, 0.0);
    for (row, bn) in TERMS[..VIRIAL_TERMS].iter().zip(coef.bn.iter()) {
        let d1 = row.a * bn * tau.powf(row.u);
        let du = (row.u - 1.0) * d1;
        dt += row.u * d1;
        dtt += row.u * du;
        d2 -= du;
    }
    out.fi_t += sk * dt;
    out.fi_tt += sk * dtt;
    out.fi_2 += sk * d2;

    // rows 13..=18 enter both the virial and the density-series sum
    let (mut dt, mut dtt, mut dd, mut d2) = (0.0, 0.0, 0.0, 0.0);
    for (n, row) in TERMS.iter().enumerate().take(VIRIAL_TERMS).skip(12) {
        let d1 = row.a * coef.cn[n] * tau.powf(row.u);
        let du = (row.u - 1.0) * d1;
        dt += row.u * d1;
        dtt += row.u * du;
        dd += d1;
        d2 -= du;
    }
    out.fi -= sigma * dd;
    out.fi_t -= sigma * dt;
    out.fi_tt -= sigma * dtt;
    out.fi_d -= sigma * dd;
    out.fi_1 -= 2.0 * sigma * dd;
    out.fi_2 -= sigma * d2;

    let (mut f, mut dt, mut dtt, mut dd, mut d1s, mut d2) = (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    for (n, row) in TERMS.iter().enumerate().skip(12) {
        let sigma_k = sigma.powf(row.k);
        let d1 = row.a * coef.cn[n] * tau.powf(row.u) * sigma.powf(row.b) * (-row.c * sigma_k).exp();
        let k3 = row.b - row.c * row.k * sigma_k;
        let d3 = d1 * k3;
        f += d1;
        dt += row.u * d1;
        dtt += row.u * (row.u - 1.0) * d1;
        dd += d3;
        d1s += d1 * (k3 - row.k * row.k * row.c * sigma_k + k3 * k3);
        d2 += d3 * (1.0 - row.u);
    }
    out.fi += f;
    out.fi_t += dt;
    out.fi_tt += dtt;
    out.fi_d += dd;
    out.fi_1 += d1s;
    out.fi_2 += d2;

    out.fi_t /= tau;
    out.fi_tt /= tau * tau;
    out.fi_d /= sigma;
    out
}
