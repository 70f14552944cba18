//! Natural-gas correlation of GOST 30319.3-2015 and its ISO 20765-1
//! extension.
//!
//! A [`GostMixture`] is built once per composition: the limits are
//! checked, the mixture coefficients (`Kx`, `V`, `Q`, `F`, `G`, `Bn`, `Cn`)
//! and the pseudo-critical point are computed. [`GostMixture::evaluate`]
//! then solves the reduced density at `(p, T)` and derives the state.
//!
//! The GOST branch yields `z`, `cp`, `cv`, the isentropic exponent and the
//! speed of sound. The ISO branch additionally yields `u`, `h`, `s` from
//! the reduced Helmholtz energy.

pub mod helmholtz;
pub mod limits;
pub mod tables;

pub use limits::check_limits;
pub use tables::{BinaryParameters, Characteristics};

use crate::composition::Composition;
use crate::error::{CalculateError, EosResult, GasMixError};
use crate::gas::GasKind;
use crate::parameters::{ConstParameters, UNIVERSAL_R};
use helmholtz::{CompressibilityTerms, compressibility_terms, ideal_part, reduced_cp0};
use rg_core::numeric::{GAS_CONSTANT, Real};
use tables::{IdealGasTerms, TERMS, VIRIAL_TERMS};
use tracing::{debug, trace};

/// Certified pressure range [Pa].
pub const PRESSURE_RANGE: (Real, Real) = (1e5, 3e7);
/// Certified temperature range [K].
pub const TEMPERATURE_RANGE: (Real, Real) = (250.0, 350.0);

const MAX_ITERATIONS: usize = 3000;
const CONVERGENCE: Real = 1e-6;

/// Reference state of the ISO entropy.
const REFERENCE_T: Real = 298.15;
const REFERENCE_P: Real = 101_325.0;

pub fn within_domain(p: Real, t: Real) -> bool {
    (PRESSURE_RANGE.0..=PRESSURE_RANGE.1).contains(&p)
        && (TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&t)
}

pub fn check_domain(p: Real, t: Real) -> EosResult<()> {
    if !(PRESSURE_RANGE.0..=PRESSURE_RANGE.1).contains(&p) {
        return Err(CalculateError::Domain {
            what: "pressure outside 0.1..30 MPa",
        }
        .into());
    }
    if !(TEMPERATURE_RANGE.0..=TEMPERATURE_RANGE.1).contains(&t) {
        return Err(CalculateError::Domain {
            what: "temperature outside 250..350 K",
        }
        .into());
    }
    Ok(())
}

/// Composition-dependent coefficients of the correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct MixtureCoefficients {
    /// Size parameter `Kx`.
    pub kx: Real,
    /// Energy parameter `V`.
    pub v: Real,
    pub q: Real,
    pub f: Real,
    pub g: Real,
    /// Second-virial coefficients, rows 1..=18.
    pub bn: [Real; VIRIAL_TERMS],
    pub cn: [Real; 58],
}

impl MixtureCoefficients {
    fn new(components: &[(&Characteristics, Real)]) -> Self {
        let pairs = || {
            components.iter().enumerate().flat_map(move |(i, a)| {
                components[i + 1..].iter().map(move |b| (a, b))
            })
        };
        let fifth_root_mix = |param: fn(&Characteristics) -> Real,
                              binary: fn(&BinaryParameters) -> Real| {
            let linear: Real = components.iter().map(|(c, x)| x * param(c).powf(2.5)).sum();
            let cross: Real = pairs()
                .map(|((a, xa), (b, xb))| {
                    let bin = tables::binary_parameters(a.gas, b.gas);
                    xa * xb * (binary(&bin).powi(5) - 1.0) * (param(a) * param(b)).powf(2.5)
                })
                .sum();
            (linear * linear + 2.0 * cross).powf(0.2)
        };

        let kx = fifth_root_mix(|c| c.size, |b| b.size);
        let v = fifth_root_mix(|c| c.energy, |b| b.volume);
        let q: Real = components.iter().map(|(c, x)| x * c.quadrupole).sum();
        let f: Real = components.iter().map(|(c, x)| x * x * c.high_temperature).sum();
        let g: Real = components.iter().map(|(c, x)| x * c.orientation).sum::<Real>()
            + pairs()
                .map(|((a, xa), (b, xb))| {
                    let bin = tables::binary_parameters(a.gas, b.gas);
                    xa * xb * (bin.orientation - 1.0) * (a.orientation + b.orientation)
                })
                .sum::<Real>();

        let mut bn = [0.0; VIRIAL_TERMS];
        for (n, row) in TERMS[..VIRIAL_TERMS].iter().enumerate() {
            for (a, xa) in components {
                for (b, xb) in components {
                    let bin = tables::binary_parameters(a.gas, b.gas);
                    let gij = bin.orientation * (a.orientation + b.orientation) / 2.0;
                    let bnij = (gij + 1.0 - row.g).powf(row.g)
                        * (a.quadrupole * b.quadrupole + 1.0 - row.q).powf(row.q)
                        * ((a.high_temperature * b.high_temperature).sqrt() + 1.0 - row.f).powf(row.f)
                        * (a.dipole * b.dipole + 1.0 - row.s).powf(row.s)
                        * (a.association * b.association + 1.0 - row.w).powf(row.w);
                    let eij = bin.energy * (a.energy * b.energy).sqrt();
                    bn[n] += xa * xb * bnij * eij.powf(row.u) * (a.size * b.size).powf(1.5);
                }
            }
        }

        let mut cn = [0.0; 58];
        for (c, row) in cn.iter_mut().zip(TERMS.iter()) {
            *c = (g + 1.0 - row.g).powf(row.g)
                * (q * q + 1.0 - row.q).powf(row.q)
                * (f + 1.0 - row.f).powf(row.f)
                * v.powf(row.u);
        }

        Self {
            kx,
            v,
            q,
            f,
            g,
            bn,
            cn,
        }
    }

    /// `Dn` of row `n` (0-based): the density-independent part.
    pub fn dn(&self, n: usize) -> Real {
        let kx3 = self.kx.powi(3);
        match n {
            0..12 => self.bn[n] / kx3,
            12..VIRIAL_TERMS => self.bn[n] / kx3 - self.cn[n],
            _ => 0.0,
        }
    }

    /// `Un` of row `n` (0-based): the exponential part.
    pub fn un(&self, n: usize) -> Real {
        if n < 12 { 0.0 } else { self.cn[n] }
    }
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GostState {
    /// Reduced density `σ`.
    pub sigma: Real,
    /// Compressibility factor.
    pub z: Real,
    /// Specific volume [m³/kg].
    pub v: Real,
    pub cv: Real,
    pub cp: Real,
    /// Isentropic exponent.
    pub k: Real,
    /// Speed of sound [m/s].
    pub w: Real,
    /// ISO only: internal energy, enthalpy [J/kg] and entropy [J/(kg·K)].
    pub u: Option<Real>,
    pub h: Option<Real>,
    pub s: Option<Real>,
}

/// Natural-gas mixture prepared for the correlation.
#[derive(Debug, Clone, PartialEq)]
pub struct GostMixture {
    components: Vec<(GasKind, Real)>,
    iso: bool,
    coefficients: MixtureCoefficients,
    molar_mass: Real,
    pseudo_critical: ConstParameters,
    sigma_ref: Option<Real>,
}

impl GostMixture {
    /// Check the limits and compute the mixture coefficients.
    pub fn new(composition: &Composition, iso: bool) -> EosResult<Self> {
        if composition.is_empty() {
            return Err(GasMixError::EmptyComponents.into());
        }
        check_limits(composition, iso)?;
        Self::build(composition, iso)
    }

    fn build(composition: &Composition, iso: bool) -> EosResult<Self> {
        let mut resolved = Vec::with_capacity(composition.len());
        for (gas, x) in composition.iter() {
            let characteristics = tables::characteristics_of(gas, iso).ok_or_else(|| {
                GasMixError::UnsupportedComponent {
                    component: gas.key().to_string(),
                }
            })?;
            resolved.push((characteristics, x));
        }
        let coefficients = MixtureCoefficients::new(&resolved);
        let molar_mass: Real = resolved.iter().map(|(c, x)| x * c.molar_mass).sum();
        let pseudo_critical = pseudo_critical(&resolved, molar_mass)?;

        let mut mixture = Self {
            components: composition.iter().collect(),
            iso,
            coefficients,
            molar_mass,
            pseudo_critical,
            sigma_ref: None,
        };
        if iso {
            mixture.sigma_ref = Some(mixture.sigma(REFERENCE_P, REFERENCE_T)?);
        }
        debug!(
            components = mixture.components.len(),
            iso,
            kx = mixture.coefficients.kx,
            molar_mass,
            "natural gas mixture prepared"
        );
        Ok(mixture)
    }

    pub fn is_iso(&self) -> bool {
        self.iso
    }

    pub fn components(&self) -> &[(GasKind, Real)] {
        &self.components
    }

    pub fn coefficients(&self) -> &MixtureCoefficients {
        &self.coefficients
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> Real {
        self.molar_mass
    }

    /// Specific gas constant [J/(kg·K)].
    pub fn r(&self) -> Real {
        UNIVERSAL_R / self.molar_mass
    }

    /// Pseudo-critical constants of the mixture (gas `Mix`).
    pub fn pseudo_critical(&self) -> &ConstParameters {
        &self.pseudo_critical
    }

    /// Solve the reduced density at `(p, t)` by the correlation's
    /// fixed-point iteration.
    pub fn sigma(&self, p: Real, t: Real) -> EosResult<Real> {
        let kx3 = self.coefficients.kx.powi(3);
        let p0m = 1e-3 * GAS_CONSTANT / kx3;
        let pi = 1e-6 * p / p0m;
        let mut sigma = 1e-3 * p * kx3 / (GAS_CONSTANT * t);

        for iteration in 0..MAX_ITERATIONS {
            let terms = compressibility_terms(&self.coefficients, t, sigma);
            let residual = (sigma * t * (1.0 + terms.a0) - pi).abs() / pi;
            trace!(iteration, sigma, residual, "gost density step");
            if residual < CONVERGENCE {
                debug!(iterations = iteration, sigma, "gost density converged");
                return if sigma.is_finite() && sigma > 0.0 {
                    Ok(sigma)
                } else {
                    Err(CalculateError::NonPhysicalRoot {
                        what: "reduced density is not positive",
                    }
                    .into())
                };
            }
            sigma += (pi / t - (1.0 + terms.a0) * sigma) / (1.0 + terms.a1);
            if !sigma.is_finite() {
                break;
            }
        }
        Err(CalculateError::NoConvergence {
            what: "gost reduced density",
            iterations: MAX_ITERATIONS,
        }
        .into())
    }

    fn ideal_terms(&self) -> impl Iterator<Item = (Real, &'static IdealGasTerms)> + '_ {
        self.components
            .iter()
            .filter_map(|(gas, x)| tables::ideal_gas_terms(*gas).map(|terms| (*x, terms)))
    }

    /// Mole-weighted reduced ideal-gas heat capacity `cp0/R`.
    pub fn reduced_cp0(&self, t: Real) -> Real {
        self.ideal_terms().map(|(x, terms)| x * reduced_cp0(terms, t)).sum()
    }

    /// Evaluate the state at `(p, t)` inside the certified domain.
    pub fn evaluate(&self, p: Real, t: Real) -> EosResult<GostState> {
        check_domain(p, t)?;
        let sigma = self.sigma(p, t)?;
        let rm = self.r();
        let v = self.coefficients.kx.powi(3) / (self.molar_mass * sigma);

        if let (true, Some(sigma_ref)) = (self.iso, self.sigma_ref) {
            let ideal = ideal_part(self.ideal_terms(), t).with_reference(t, sigma, REFERENCE_T, sigma_ref);
            let fi = helmholtz::helmholtz(&self.coefficients, ideal, t, sigma);
            let tau = 1.0 / t;
            let z = sigma * fi.fi_d;
            let u = fi.fi_t * rm;
            let cv = -tau * tau * fi.fi_tt * rm;
            let cp = cv + fi.fi_2 * fi.fi_2 * rm / fi.fi_1;
            let k = fi.fi_1 * cp / (z * cv);
            return Ok(GostState {
                sigma,
                z,
                v,
                cv,
                cp,
                k,
                w: (z * k * t * rm).sqrt(),
                u: Some(u),
                h: Some(u + z * rm * t),
                s: Some((tau * fi.fi_t - fi.fi) * rm),
            });
        }

        let CompressibilityTerms { a0, a1, a2, a3 } = compressibility_terms(&self.coefficients, t, sigma);
        let z = 1.0 + a0;
        let cp0r = self.reduced_cp0(t);
        let kz = 1.0 + a1 + (1.0 + a2).powi(2) / (cp0r - 1.0 + a3);
        let cv = rm * (cp0r - 1.0 + a3);
        Ok(GostState {
            sigma,
            z,
            v,
            cv,
            cp: cv + rm * (1.0 + a2).powi(2) / (1.0 + a1),
            k: kz / z,
            w: (rm * kz * t).sqrt(),
            u: None,
            h: None,
            s: None,
        })
    }
}

/// Pseudo-critical point from the critical data of the GOST components:
/// `Vc = Σ Σ xᵢxⱼ(Vcᵢ^⅓ + Vcⱼ^⅓)³/8`, `Tc` the matching volume-weighted
/// `√(TcᵢTcⱼ)`, `Pc = R·Tc·(0.291 − 0.08·Σxω)/Vc`.
fn pseudo_critical(components: &[(&Characteristics, Real)], molar_mass: Real) -> EosResult<ConstParameters> {
    let critical: Vec<_> = components
        .iter()
        .filter_map(|(c, x)| {
            tables::critical_data(c.gas).map(|data| (data, x, (c.molar_mass / data.density).cbrt()))
        })
        .collect();

    let (mut volume, mut temperature, mut acentric) = (0.0, 0.0, 0.0);
    for (a, xa, va) in &critical {
        for (b, xb, vb) in &critical {
            let weight = *xa * *xb * (va + vb).powi(3);
            volume += weight;
            temperature += weight * (a.tc * b.tc).sqrt();
        }
        acentric += *xa * a.acentric;
    }
    if volume <= 0.0 {
        return Err(GasMixError::UnsupportedComponent {
            component: "mixture without critical data".to_string(),
        }
        .into());
    }
    let tc = temperature / volume;
    // m³/kmol
    let vc = 0.125 * volume;
    let pc = UNIVERSAL_R * tc * (0.291 - 0.08 * acentric) / vc;
    ConstParameters::new(GasKind::Mix, Some(vc / molar_mass), None, pc, tc, molar_mass, acentric)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn converges_across_the_domain(p in 1e5_f64..3e7, t in 250.0_f64..350.0, x_n2 in 0.0_f64..0.1) {
            let composition = Composition::new_mole_fractions(vec![
                (GasKind::Methane, 0.95 - x_n2),
                (GasKind::Ethane, 0.05),
                (GasKind::Nitrogen, x_n2),
            ])
            .unwrap();
            let gas = GostMixture::new(&composition, false).unwrap();
            let state = gas.evaluate(p, t).unwrap();
            prop_assert!(state.z > 0.6 && state.z < 1.1, "z = {}", state.z);
            prop_assert!((p * state.v / (gas.r() * t) - state.z).abs() < 1e-5 * state.z);
            prop_assert!(state.cp > state.cv && state.k > 1.0 && state.w > 0.0);
        }
    }
}
