//! Shared machinery of the cubic equations of state.
//!
//! Every cubic model here has the form
//!
//! ```text
//! p = R·T/(v − b) − A(T)/den(v)
//! ```
//!
//! where `den` is `v(v+b)` for the Redlich-Kwong shape and `v²+2bv−b²` for
//! Peng-Robinson. The residual integrals are closed-form through
//! `I(v) = ∫_∞^v dv/den`, so only `A`, `A'` and `A''` differ between models.

use super::validation::check_state_input;
use super::{EquationOfState, ModelIdentity};
use crate::binodal::{self, BinodalPoints};
use crate::composition::{ResolvedComponent, ideal_cv0};
use crate::error::{CalculateError, EosError, EosResult};
use crate::gas::GasKind;
use crate::parameters::{ConstParameters, DynParameters, DynSetup, StateParams};
use crate::phase::{self, PhaseState};
use rg_core::cubic::{refine, solve_cubic};
use rg_core::numeric::Real;
use std::f64::consts::SQRT_2;
use std::sync::Arc;
use tracing::trace;

/// Reference temperature of the state functions [K].
pub const T_REF: Real = 273.15;
/// Reference pressure of the state functions [Pa].
pub const P_REF: Real = 101_325.0;

/// Denominator family of the attractive term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `v(v+b)`
    RedlichKwong,
    /// `v² + 2bv − b²`
    PengRobinson,
}

impl Shape {
    fn den(&self, v: Real, b: Real) -> Real {
        match self {
            Shape::RedlichKwong => v * (v + b),
            Shape::PengRobinson => v * v + 2.0 * b * v - b * b,
        }
    }

    fn den_dv(&self, v: Real, b: Real) -> Real {
        match self {
            Shape::RedlichKwong => 2.0 * v + b,
            Shape::PengRobinson => 2.0 * v + 2.0 * b,
        }
    }

    /// `∫_∞^v dv/den`.
    fn integral(&self, v: Real, b: Real) -> Real {
        match self {
            Shape::RedlichKwong => (v / (v + b)).ln() / b,
            Shape::PengRobinson => {
                (log_pr(v, b, false) / log_pr(v, b, true)).ln() / (2.0 * SQRT_2 * b)
            }
        }
    }

    /// Volume cubic `[1, c2, c1, c0]` of the isotherm at `(p, t)`.
    fn volume_cubic(&self, r: Real, b: Real, a: Real, p: Real, t: Real) -> [Real; 4] {
        let rt = r * t;
        match self {
            Shape::RedlichKwong => [1.0, -rt / p, a / p - rt * b / p - b * b, -a * b / p],
            Shape::PengRobinson => [
                1.0,
                b - rt / p,
                (a - 2.0 * b * rt) / p - 3.0 * b * b,
                b * b * b + (rt * b * b - a * b) / p,
            ],
        }
    }
}

/// `v + (1 ± √2)·b`, the two linear factors of the Peng-Robinson denominator.
pub fn log_pr(v: Real, b: Real, plus: bool) -> Real {
    if plus {
        v + (1.0 + SQRT_2) * b
    } else {
        v + (1.0 - SQRT_2) * b
    }
}

/// `a·f(T)²` with `f = 1 + κ(1 − √(T/Tc))`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlphaTerm {
    pub a: Real,
    pub kappa: Real,
    pub tc: Real,
}

impl AlphaTerm {
    /// `(f, f', f'')` at `t`.
    fn factor(&self, t: Real) -> (Real, Real, Real) {
        let f = 1.0 + self.kappa * (1.0 - (t / self.tc).sqrt());
        let df = -self.kappa / (2.0 * (t * self.tc).sqrt());
        let d2f = self.kappa / (4.0 * t.powf(1.5) * self.tc.sqrt());
        (f, df, d2f)
    }

    fn eval(&self, t: Real) -> AttractionValue {
        let (f, df, d2f) = self.factor(t);
        AttractionValue {
            a: self.a * f * f,
            da: self.a * 2.0 * f * df,
            d2a: self.a * (2.0 * df * df + 2.0 * f * d2f),
        }
    }

    fn scaled(self, factor: Real) -> Self {
        Self {
            a: self.a * factor,
            ..self
        }
    }
}

/// `A` and its first two temperature derivatives.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AttractionValue {
    pub a: Real,
    pub da: Real,
    pub d2a: Real,
}

/// One component of a quadratic mixing sum, in molar units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticTerm {
    pub gas: GasKind,
    pub fraction: Real,
    pub term: AlphaTerm,
}

/// Temperature dependence of the attractive term.
#[derive(Debug, Clone, PartialEq)]
pub enum Attraction {
    /// Ideal gas.
    None,
    /// Classic Redlich-Kwong `a/√T`.
    InverseSqrtT { a: Real },
    /// Soave or Peng-Robinson `a·α(T)`.
    Alpha(AlphaTerm),
    /// `ΣΣ xᵢxⱼ(1−kᵢⱼ)√(aᵢαᵢ·aⱼαⱼ)`, computed in molar units and
    /// multiplied by `scale` to bring it back per kilogram.
    Quadratic {
        terms: Vec<QuadraticTerm>,
        kij: Vec<Vec<Real>>,
        scale: Real,
    },
}

impl Attraction {
    pub fn eval(&self, t: Real) -> AttractionValue {
        match self {
            Attraction::None => AttractionValue::default(),
            Attraction::InverseSqrtT { a } => {
                let value = a / t.sqrt();
                AttractionValue {
                    a: value,
                    da: -value / (2.0 * t),
                    d2a: 3.0 * value / (4.0 * t * t),
                }
            }
            Attraction::Alpha(term) => term.eval(t),
            Attraction::Quadratic { terms, kij, scale } => {
                let factors: Vec<_> = terms.iter().map(|c| c.term.factor(t)).collect();
                let mut acc = AttractionValue::default();
                for (i, ci) in terms.iter().enumerate() {
                    let (fi, dfi, d2fi) = factors[i];
                    for (j, cj) in terms.iter().enumerate() {
                        let (fj, dfj, d2fj) = factors[j];
                        let w = ci.fraction * cj.fraction * (1.0 - kij[i][j])
                            * (ci.term.a * cj.term.a).sqrt();
                        acc.a += w * fi * fj;
                        acc.da += w * (dfi * fj + fi * dfj);
                        acc.d2a += w * (d2fi * fj + 2.0 * dfi * dfj + fi * d2fj);
                    }
                }
                AttractionValue {
                    a: acc.a * scale,
                    da: acc.da * scale,
                    d2a: acc.d2a * scale,
                }
            }
        }
    }
}

/// Properties of one `(v, t)` point. `u` and `s` are absolute, referenced to
/// the ideal gas at `T_REF` and the normal specific volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Properties {
    pub p: Real,
    pub cv: Real,
    pub cp: Real,
    pub u: Real,
    pub s: Real,
}

/// Everything needed to evaluate one cubic equation.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicForm {
    pub shape: Shape,
    /// Specific gas constant [J/(kg·K)].
    pub r: Real,
    /// Co-volume [m³/kg].
    pub b: Real,
    /// Ideal-gas heat capacity at constant volume [J/(kg·K)].
    pub cv0: Real,
    pub attraction: Attraction,
}

impl CubicForm {
    fn is_ideal(&self) -> bool {
        matches!(self.attraction, Attraction::None)
    }

    pub fn pressure(&self, v: Real, t: Real) -> EosResult<Real> {
        check_state_input(v, t, "volume must be positive and finite")?;
        if v <= self.b {
            return Err(CalculateError::NonPhysicalRoot {
                what: "volume at or below the co-volume",
            }
            .into());
        }
        let a = self.attraction.eval(t).a;
        let p = self.r * t / (v - self.b) - a / self.shape.den(v, self.b);
        if p > 0.0 {
            Ok(p)
        } else {
            Err(CalculateError::NonPhysicalRoot {
                what: "non-positive pressure inside the two-phase loop",
            }
            .into())
        }
    }

    /// Largest real root of the volume cubic.
    pub fn volume(&self, p: Real, t: Real) -> EosResult<Real> {
        check_state_input(p, t, "pressure must be positive and finite")?;
        if self.is_ideal() {
            return Ok(self.r * t / p);
        }
        let a = self.attraction.eval(t).a;
        // solved for z = v·p/(RT) so the solver's absolute thresholds see O(1) values
        let scale = self.r * t / p;
        let [c3, c2, c1, c0] = self.shape.volume_cubic(self.r, self.b, a, p, t);
        let z_cubic = [c3, c2 / scale, c1 / (scale * scale), c0 / (scale * scale * scale)];
        let roots = refine(z_cubic, solve_cubic(z_cubic)?)?;
        let v = roots.largest() * scale;
        trace!(p, t, v, roots = roots.count(), "cubic volume");
        if v.is_finite() && v > self.b {
            Ok(v)
        } else {
            Err(CalculateError::NonPhysicalRoot {
                what: "largest volume root at or below the co-volume",
            }
            .into())
        }
    }

    /// Fill in whichever of `v` and `p` is missing.
    pub fn complete_state(&self, state: StateParams) -> EosResult<StateParams> {
        if !state.has_volume() {
            let v = self.volume(state.p, state.t)?;
            return Ok(StateParams::new(v, state.p, state.t));
        }
        if state.p.is_finite() && state.p > 0.0 {
            Ok(state)
        } else {
            let p = self.pressure(state.v, state.t)?;
            Ok(StateParams::new(state.v, p, state.t))
        }
    }

    pub fn properties(&self, v: Real, t: Real) -> EosResult<Properties> {
        let p = self.pressure(v, t)?;
        let v_ref = self.r * T_REF / P_REF;
        let ideal_u = self.cv0 * (t - T_REF);
        let ideal_s = self.cv0 * (t / T_REF).ln() + self.r * (v / v_ref).ln();
        if self.is_ideal() {
            return Ok(Properties {
                p,
                cv: self.cv0,
                cp: self.cv0 + self.r,
                u: ideal_u,
                s: ideal_s,
            });
        }

        let b = self.b;
        let at = self.attraction.eval(t);
        let den = self.shape.den(v, b);
        let integral = self.shape.integral(v, b);

        let cv = self.cv0 - t * at.d2a * integral;
        let dp_dt = self.r / (v - b) - at.da / den;
        let dp_dv = -self.r * t / ((v - b) * (v - b)) + at.a * self.shape.den_dv(v, b) / (den * den);
        if dp_dv >= 0.0 {
            return Err(CalculateError::NonPhysicalRoot {
                what: "mechanically unstable state (dp/dv >= 0)",
            }
            .into());
        }
        let cp = cv - t * dp_dt * dp_dt / dp_dv;
        let u = ideal_u + (at.a - t * at.da) * integral;
        let s = ideal_s + self.r * ((v - b) / v).ln() - at.da * integral;
        Ok(Properties { p, cv, cp, u, s })
    }

    /// Move `prev` to `new_state`. Energies and entropy advance by the
    /// difference of the state functions so caller-chosen offsets survive;
    /// unset fields take the absolute value.
    pub fn update_dyn_params(&self, prev: &mut DynParameters, new_state: StateParams) -> EosResult<()> {
        let state = self.complete_state(new_state)?;
        let next = self.properties(state.v, state.t)?;
        let before = if prev.state.has_volume() && prev.state.t > 0.0 {
            self.properties(prev.state.v, prev.state.t).ok()
        } else {
            None
        };
        let advance = |old: Option<Real>, from: Option<Real>, to: Real| match (old, from) {
            (Some(old), Some(from)) => old + (to - from),
            _ => to,
        };
        let u = advance(prev.get(DynSetup::INTERNAL_ENERGY), before.map(|b| b.u), next.u);
        let s = advance(prev.get(DynSetup::ENTROPY), before.map(|b| b.s), next.s);

        prev.state = state;
        prev.setup.insert(DynSetup::STATE);
        prev.set_heat_capacities(next.cv, next.cp);
        prev.set_internal_energy(u);
        prev.set_entropy(s);
        Ok(())
    }
}

/// Which constants correlation builds a [`CubicForm`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubicFamily {
    Ideal,
    RedlichKwong,
    Soave,
    PengRobinson,
}

impl CubicFamily {
    pub fn shape(&self) -> Shape {
        match self {
            CubicFamily::PengRobinson => Shape::PengRobinson,
            _ => Shape::RedlichKwong,
        }
    }

    /// Per-kilogram co-volume of a pure gas.
    pub fn co_volume(&self, constants: &ConstParameters) -> Real {
        let rtp = constants.r() * constants.tc() / constants.pc();
        match self {
            CubicFamily::Ideal => 0.0,
            CubicFamily::RedlichKwong | CubicFamily::Soave => 0.08664 * rtp,
            CubicFamily::PengRobinson => 0.0778 * rtp,
        }
    }

    /// Per-kilogram `a·α(T)` of a pure gas for the α-families.
    pub fn alpha_term(&self, constants: &ConstParameters) -> Option<AlphaTerm> {
        let r = constants.r();
        let (tc, pc, w) = (constants.tc(), constants.pc(), constants.acentric());
        match self {
            CubicFamily::Soave => Some(AlphaTerm {
                a: 0.42747 * r * r * tc * tc / pc,
                kappa: 0.48 + 1.574 * w - 0.176 * w * w,
                tc,
            }),
            CubicFamily::PengRobinson => Some(AlphaTerm {
                a: 0.45724 * r * r * tc * tc / pc,
                kappa: 0.37464 + 1.54226 * w - 0.26992 * w * w,
                tc,
            }),
            CubicFamily::Ideal | CubicFamily::RedlichKwong => None,
        }
    }

    /// Form of a pure gas (or of a pseudo-critical parameter set).
    pub fn form(&self, constants: &ConstParameters, cv0: Real) -> CubicForm {
        let r = constants.r();
        let attraction = match self {
            CubicFamily::Ideal => Attraction::None,
            CubicFamily::RedlichKwong => Attraction::InverseSqrtT {
                a: 0.42748 * r * r * constants.tc().powf(2.5) / constants.pc(),
            },
            CubicFamily::Soave | CubicFamily::PengRobinson => match self.alpha_term(constants) {
                Some(term) => Attraction::Alpha(term),
                None => Attraction::None,
            },
        };
        CubicForm {
            shape: self.shape(),
            r,
            b: self.co_volume(constants),
            cv0,
            attraction,
        }
    }

    /// Form of a mixture by pairwise mixing of `aᵢαᵢ` and `bᵢ`.
    ///
    /// Terms are mixed per kmol (`aᵢ·Mᵢ²`, `bᵢ·Mᵢ`) and converted back per
    /// kilogram of mixture. Falls back to [`CubicFamily::form`] for families
    /// without an α-function.
    pub fn quadratic_form(
        &self,
        components: &[ResolvedComponent],
        mixture: &ConstParameters,
        cv0: Real,
        kij: fn(GasKind, GasKind) -> Real,
    ) -> CubicForm {
        let mut terms = Vec::with_capacity(components.len());
        let mut b_molar = 0.0;
        for c in components {
            let m = c.constants.molar_mass();
            b_molar += c.fraction * self.co_volume(&c.constants) * m;
            if let Some(term) = self.alpha_term(&c.constants) {
                terms.push(QuadraticTerm {
                    gas: c.constants.gas(),
                    fraction: c.fraction,
                    term: term.scaled(m * m),
                });
            }
        }
        if terms.len() != components.len() {
            return self.form(mixture, cv0);
        }
        let table = terms
            .iter()
            .map(|ti| terms.iter().map(|tj| kij(ti.gas, tj.gas)).collect())
            .collect();
        let m_mix = mixture.molar_mass();
        CubicForm {
            shape: self.shape(),
            r: mixture.r(),
            b: b_molar / m_mix,
            cv0,
            attraction: Attraction::Quadratic {
                terms,
                kij: table,
                scale: 1.0 / (m_mix * m_mix),
            },
        }
    }
}

/// Domain rule of a cubic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validity {
    /// Only gas-phase states.
    GasPhase,
    /// `p/Pc < 0.5·T/Tc`.
    ReducedPressureBound,
    /// Anything but compressed liquid.
    NotLiquid,
}

impl Validity {
    pub fn holds(&self, state: StateParams, phase: PhaseState, constants: &ConstParameters) -> bool {
        match self {
            Validity::GasPhase => phase == PhaseState::Gas,
            Validity::ReducedPressureBound => {
                state.p / constants.pc() < 0.5 * state.t / constants.tc()
            }
            Validity::NotLiquid => phase != PhaseState::Liquid,
        }
    }
}

/// State, constants and envelope of one cubic model instance.
#[derive(Debug, Clone)]
pub struct CubicGas {
    identity: ModelIdentity,
    family: CubicFamily,
    constants: ConstParameters,
    form: CubicForm,
    validity: Validity,
    binodal: Option<Arc<BinodalPoints>>,
    dyn_params: DynParameters,
    phase: PhaseState,
    error: Option<EosError>,
}

impl CubicGas {
    /// Build and move to `(p, t)`.
    pub fn new(
        identity: ModelIdentity,
        family: CubicFamily,
        constants: ConstParameters,
        form: CubicForm,
        validity: Validity,
        p: Real,
        t: Real,
    ) -> EosResult<Self> {
        let binodal = binodal::get_or_compute(identity, constants.gas(), constants.acentric());
        let mut gas = Self {
            identity,
            family,
            constants,
            form,
            validity,
            binodal,
            dyn_params: DynParameters::default(),
            phase: PhaseState::NotSet,
            error: None,
        };
        gas.set_volume(p, t)?;
        Ok(gas)
    }

    pub fn form(&self) -> &CubicForm {
        &self.form
    }

    /// Reduced envelope shared through the binodal cache.
    pub fn binodal(&self) -> Option<&BinodalPoints> {
        self.binodal.as_deref()
    }

    /// Envelope in absolute units for this gas.
    pub fn scaled_binodal(&self) -> Option<BinodalPoints> {
        self.binodal().map(|points| {
            points.scaled(self.constants.vc(), self.constants.pc(), self.constants.tc())
        })
    }

    pub fn classify(&self, state: StateParams) -> PhaseState {
        phase::classify(
            self.binodal(),
            StateParams::new(1.0, 1.0, 1.0),
            state.reduced(self.constants.critical_point()),
        )
    }

    /// Like [`EquationOfState::update_dyn_params`], with the equation built
    /// from other constants of the same family.
    pub fn update_dyn_params_with(
        &self,
        prev: &mut DynParameters,
        new_state: StateParams,
        constants: &ConstParameters,
    ) -> EosResult<()> {
        self.family
            .form(constants, ideal_cv0(constants))
            .update_dyn_params(prev, new_state)
    }

    fn move_to(&mut self, state: EosResult<StateParams>) -> EosResult<()> {
        let mut next = self.dyn_params;
        let result = state.and_then(|state| self.form.update_dyn_params(&mut next, state));
        match result {
            Ok(()) => {
                self.phase = self.classify(next.state);
                self.dyn_params = next;
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }
}

impl EquationOfState for CubicGas {
    fn identity(&self) -> ModelIdentity {
        self.identity
    }

    fn set_volume(&mut self, p: Real, t: Real) -> EosResult<()> {
        let state = self.form.volume(p, t).map(|v| StateParams::new(v, p, t));
        self.move_to(state)
    }

    fn set_pressure(&mut self, v: Real, t: Real) -> EosResult<()> {
        let state = self.form.pressure(v, t).map(|p| StateParams::new(v, p, t));
        self.move_to(state)
    }

    fn volume(&self, p: Real, t: Real) -> EosResult<Real> {
        self.form.volume(p, t)
    }

    fn pressure(&self, v: Real, t: Real) -> EosResult<Real> {
        self.form.pressure(v, t)
    }

    fn is_valid(&self) -> bool {
        self.dyn_params.is_set(DynSetup::STATE)
            && self
                .validity
                .holds(self.dyn_params.state, self.phase, &self.constants)
    }

    fn is_valid_at(&self, state: StateParams) -> bool {
        match self.form.complete_state(state) {
            Ok(state) => self
                .validity
                .holds(state, self.classify(state), &self.constants),
            Err(_) => false,
        }
    }

    fn update_dyn_params(&self, prev: &mut DynParameters, new_state: StateParams) -> EosResult<()> {
        self.form.update_dyn_params(prev, new_state)
    }

    fn const_parameters(&self) -> &ConstParameters {
        &self.constants
    }

    fn dyn_parameters(&self) -> &DynParameters {
        &self.dyn_params
    }

    fn phase(&self) -> PhaseState {
        self.phase
    }

    fn last_error(&self) -> Option<&EosError> {
        self.error.as_ref()
    }
}

/// Implement [`EquationOfState`] for a newtype around [`CubicGas`].
macro_rules! delegate_to_core {
    ($ty:ty) => {
        impl $crate::model::EquationOfState for $ty {
            fn identity(&self) -> $crate::model::ModelIdentity {
                self.core.identity()
            }

            fn set_volume(&mut self, p: ::rg_core::numeric::Real, t: ::rg_core::numeric::Real) -> $crate::error::EosResult<()> {
                self.core.set_volume(p, t)
            }

            fn set_pressure(&mut self, v: ::rg_core::numeric::Real, t: ::rg_core::numeric::Real) -> $crate::error::EosResult<()> {
                self.core.set_pressure(v, t)
            }

            fn volume(&self, p: ::rg_core::numeric::Real, t: ::rg_core::numeric::Real) -> $crate::error::EosResult<::rg_core::numeric::Real> {
                self.core.volume(p, t)
            }

            fn pressure(&self, v: ::rg_core::numeric::Real, t: ::rg_core::numeric::Real) -> $crate::error::EosResult<::rg_core::numeric::Real> {
                self.core.pressure(v, t)
            }

            fn is_valid(&self) -> bool {
                self.core.is_valid()
            }

            fn is_valid_at(&self, state: $crate::parameters::StateParams) -> bool {
                self.core.is_valid_at(state)
            }

            fn update_dyn_params(
                &self,
                prev: &mut $crate::parameters::DynParameters,
                new_state: $crate::parameters::StateParams,
            ) -> $crate::error::EosResult<()> {
                self.core.update_dyn_params(prev, new_state)
            }

            fn const_parameters(&self) -> &$crate::parameters::ConstParameters {
                self.core.const_parameters()
            }

            fn dyn_parameters(&self) -> &$crate::parameters::DynParameters {
                self.core.dyn_parameters()
            }

            fn phase(&self) -> $crate::phase::PhaseState {
                self.core.phase()
            }

            fn last_error(&self) -> Option<&$crate::error::EosError> {
                self.core.last_error()
            }
        }
    };
}

pub(crate) use delegate_to_core;
