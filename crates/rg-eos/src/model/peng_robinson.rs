//! Peng-Robinson, `p = RT/(v−b) − aα(T)/(v²+2bv−b²)`.
//!
//! The plain variant works on one set of (pseudo-)critical constants. The
//! binary variant mixes `aᵢαᵢ` and `bᵢ` pairwise with the PR interaction
//! table.

use super::cubic::{CubicFamily, CubicForm, CubicGas, Validity, delegate_to_core};
use super::ModelIdentity;
use crate::composition::{ResolvedComponent, ideal_cv0, mixture_cv0};
use crate::error::EosResult;
use crate::interaction::pr_kij;
use crate::parameters::{ConstParameters, DynParameters, StateParams};
use rg_core::numeric::Real;

pub use super::cubic::log_pr;

#[derive(Debug, Clone)]
pub struct PengRobinson {
    core: CubicGas,
    binary: bool,
}

impl PengRobinson {
    pub fn new(constants: ConstParameters, p: Real, t: Real) -> EosResult<Self> {
        Self::with_cv0(constants, ideal_cv0(&constants), p, t)
    }

    pub fn with_cv0(constants: ConstParameters, cv0: Real, p: Real, t: Real) -> EosResult<Self> {
        let form = CubicFamily::PengRobinson.form(&constants, cv0);
        Self::build(ModelIdentity::PENG_ROBINSON, constants, form, p, t)
    }

    /// Binary-coefficient mixture. `mixture` is the pseudo-critical set used
    /// for phase classification.
    pub fn binary(
        components: &[ResolvedComponent],
        mixture: ConstParameters,
        p: Real,
        t: Real,
    ) -> EosResult<Self> {
        let cv0 = mixture_cv0(components);
        let form = CubicFamily::PengRobinson.quadratic_form(components, &mixture, cv0, pr_kij);
        Self::build(ModelIdentity::PENG_ROBINSON_BINARY, mixture, form, p, t)
    }

    fn build(
        identity: ModelIdentity,
        constants: ConstParameters,
        form: CubicForm,
        p: Real,
        t: Real,
    ) -> EosResult<Self> {
        let core = CubicGas::new(
            identity,
            CubicFamily::PengRobinson,
            constants,
            form,
            Validity::NotLiquid,
            p,
            t,
        )?;
        Ok(Self {
            core,
            binary: identity == ModelIdentity::PENG_ROBINSON_BINARY,
        })
    }

    pub fn is_binary(&self) -> bool {
        self.binary
    }

    pub fn core(&self) -> &CubicGas {
        &self.core
    }

    pub fn update_dyn_params_with(
        &self,
        prev: &mut DynParameters,
        new_state: StateParams,
        constants: &ConstParameters,
    ) -> EosResult<()> {
        self.core.update_dyn_params_with(prev, new_state, constants)
    }
}

delegate_to_core!(PengRobinson);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::composition::{MixtureComponent, resolve_components};
    use crate::gas::GasKind;
    use crate::mixing::MixingRule;
    use crate::model::{EquationOfState, ModelIdentity};
    use approx::assert_relative_eq;
    use std::f64::consts::SQRT_2;

    fn constants(gas: GasKind) -> ConstParameters {
        catalog::lookup(gas).unwrap().const_parameters().unwrap()
    }

    #[test]
    fn volume_pressure_round_trip() {
        let gas = PengRobinson::new(constants(GasKind::CarbonDioxide), 2e6, 320.0).unwrap();
        for (p, t) in [(1e5, 300.0), (5e6, 320.0), (2e7, 450.0)] {
            let v = gas.volume(p, t).unwrap();
            let back = gas.pressure(v, t).unwrap();
            assert!(((back - p) / p).abs() < 1e-3, "{p} -> {v} -> {back}");
        }
    }

    #[test]
    fn negative_pressure_keeps_the_last_state() {
        let mut gas = PengRobinson::new(constants(GasKind::Propane), 1e5, 300.0).unwrap();
        let before = *gas.dyn_parameters();
        assert!(gas.set_pressure(0.002, 200.0).is_err());
        assert_eq!(*gas.dyn_parameters(), before);
        assert!(gas.last_error().is_some());
        assert!(!gas.is_valid_at(StateParams::new(0.002, -4e7, 200.0)));
    }

    #[test]
    fn closed_form_energy_difference() {
        // Δu at constant T is (aα − T·d(aα)/dT)/(2√2·b)·ln(...) through log_pr
        let c = constants(GasKind::Methane);
        let t: Real = 250.0;
        let mut gas = PengRobinson::new(c, 1e6, t).unwrap();
        let v1 = gas.dyn_parameters().state.v;
        let u1 = gas.dyn_parameters().u;
        gas.set_volume(6e6, t).unwrap();
        let v2 = gas.dyn_parameters().state.v;

        let r = c.r();
        let a = 0.45724 * r * r * c.tc() * c.tc() / c.pc();
        let b = 0.0778 * r * c.tc() / c.pc();
        let w = c.acentric();
        let kappa = 0.37464 + 1.54226 * w - 0.26992 * w * w;
        let f = 1.0 + kappa * (1.0 - (t / c.tc()).sqrt());
        let aa = a * f * f;
        let daa = -a * f * kappa / (t * c.tc()).sqrt();
        let branch = |v: Real| (log_pr(v, b, false) / log_pr(v, b, true)).ln();
        let expected = (aa - t * daa) / (2.0 * SQRT_2 * b) * (branch(v2) - branch(v1));
        assert_relative_eq!(gas.dyn_parameters().u - u1, expected, max_relative = 1e-9);
    }

    #[test]
    fn binary_mixture_with_interaction_table() {
        let components = resolve_components(&[
            MixtureComponent::catalog(GasKind::Methane, 0.9),
            MixtureComponent::catalog(GasKind::Nitrogen, 0.05),
            MixtureComponent::catalog(GasKind::CarbonDioxide, 0.05),
        ])
        .unwrap();
        let pseudo = MixingRule::ChuehPrausnitz.pseudo_critical(&components).unwrap();
        let gas = PengRobinson::binary(&components, pseudo, 5e6, 300.0).unwrap();
        assert!(gas.is_binary());
        assert_eq!(gas.identity(), ModelIdentity::PENG_ROBINSON_BINARY);
        let plain = PengRobinson::with_cv0(pseudo, mixture_cv0(&components), 5e6, 300.0).unwrap();
        let (vb, vp) = (gas.dyn_parameters().state.v, plain.dyn_parameters().state.v);
        // both mixing routes land within a few percent of each other
        assert!(((vb - vp) / vp).abs() < 0.05, "{vb} vs {vp}");
        assert!(gas.is_valid());
    }
}
