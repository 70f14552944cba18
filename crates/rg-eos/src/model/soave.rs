//! Redlich-Kwong with Soave's temperature function.

use super::cubic::{CubicFamily, CubicGas, Validity, delegate_to_core};
use super::ModelIdentity;
use crate::composition::{ResolvedComponent, ideal_cv0, mixture_cv0};
use crate::error::EosResult;
use crate::interaction::srk_kij;
use crate::parameters::{ConstParameters, DynParameters, StateParams};
use rg_core::numeric::Real;

#[derive(Debug, Clone)]
pub struct RedlichKwongSoave {
    core: CubicGas,
}

impl RedlichKwongSoave {
    pub fn new(constants: ConstParameters, p: Real, t: Real) -> EosResult<Self> {
        Self::with_cv0(constants, ideal_cv0(&constants), p, t)
    }

    pub fn with_cv0(constants: ConstParameters, cv0: Real, p: Real, t: Real) -> EosResult<Self> {
        let form = CubicFamily::Soave.form(&constants, cv0);
        Self::build(constants, form, p, t)
    }

    /// Mixture with pairwise `aα` mixing and SRK interaction parameters.
    /// `mixture` supplies the pseudo-critical point used for phase
    /// classification and the validity checks.
    pub fn mixture(
        components: &[ResolvedComponent],
        mixture: ConstParameters,
        p: Real,
        t: Real,
    ) -> EosResult<Self> {
        let cv0 = mixture_cv0(components);
        let form = CubicFamily::Soave.quadratic_form(components, &mixture, cv0, srk_kij);
        Self::build(mixture, form, p, t)
    }

    fn build(
        constants: ConstParameters,
        form: super::CubicForm,
        p: Real,
        t: Real,
    ) -> EosResult<Self> {
        let core = CubicGas::new(
            ModelIdentity::REDLICH_KWONG_SOAVE,
            CubicFamily::Soave,
            constants,
            form,
            Validity::NotLiquid,
            p,
            t,
        )?;
        Ok(Self { core })
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

delegate_to_core!(RedlichKwongSoave);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::composition::{MixtureComponent, resolve_components};
    use crate::gas::GasKind;
    use crate::mixing::MixingRule;
    use crate::model::EquationOfState;
    use crate::phase::PhaseState;
    use approx::assert_relative_eq;

    fn constants(gas: GasKind) -> ConstParameters {
        catalog::lookup(gas).unwrap().const_parameters().unwrap()
    }

    #[test]
    fn volume_pressure_round_trip() {
        let gas = RedlichKwongSoave::new(constants(GasKind::Propane), 1e6, 350.0).unwrap();
        let v = gas.dyn_parameters().state.v;
        assert_relative_eq!(gas.pressure(v, 350.0).unwrap(), 1e6, max_relative = 1e-6);
    }

    #[test]
    fn compressed_liquid_is_invalid() {
        let mut gas = RedlichKwongSoave::new(constants(GasKind::Propane), 3e5, 300.0).unwrap();
        assert_eq!(gas.phase(), PhaseState::Gas);
        assert!(gas.is_valid());
        // well above the saturation pressure at 250 K only the liquid root is left
        gas.set_volume(3e6, 250.0).unwrap();
        assert_eq!(gas.phase(), PhaseState::Liquid);
        assert!(!gas.is_valid());
    }

    #[test]
    fn mixture_departs_from_ideal_mixing_with_interaction() {
        let components = resolve_components(&[
            MixtureComponent::catalog(GasKind::Methane, 0.8),
            MixtureComponent::catalog(GasKind::CarbonDioxide, 0.2),
        ])
        .unwrap();
        let pseudo = MixingRule::RedlichKwong2.pseudo_critical(&components).unwrap();
        let gas = RedlichKwongSoave::mixture(&components, pseudo, 5e6, 300.0).unwrap();
        let state = gas.dyn_parameters().state;
        let z = state.p * state.v / (pseudo.r() * state.t);
        assert!(z > 0.8 && z < 1.0, "z = {z}");

        // kᵢⱼ > 0 weakens attraction, so the volume grows
        let no_kij = CubicFamily::Soave.quadratic_form(&components, &pseudo, 1.0, |_, _| 0.0);
        assert!(no_kij.volume(5e6, 300.0).unwrap() < state.v);
    }
}
