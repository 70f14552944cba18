//! Natural gas by GOST 30319.3 (optionally ISO 20765).
//!
//! The state is always solved from `(p, t)`; the inverse direction is not
//! offered by the correlation.

use super::{EquationOfState, ModelIdentity};
use crate::composition::Composition;
use crate::error::{CalculateError, EosError, EosResult};
use crate::gost::{self, GostMixture, GostState};
use crate::parameters::{ConstParameters, DynParameters, DynSetup, StateParams};
use crate::phase::PhaseState;
use rg_core::numeric::Real;

#[derive(Debug, Clone)]
pub struct NgGost {
    mixture: GostMixture,
    dyn_params: DynParameters,
    state: Option<GostState>,
    error: Option<EosError>,
}

impl NgGost {
    pub fn new(composition: &Composition, iso: bool, p: Real, t: Real) -> EosResult<Self> {
        Self::from_mixture(GostMixture::new(composition, iso)?, p, t)
    }

    pub fn from_mixture(mixture: GostMixture, p: Real, t: Real) -> EosResult<Self> {
        let mut gas = Self {
            mixture,
            dyn_params: DynParameters::default(),
            state: None,
            error: None,
        };
        gas.set_volume(p, t)?;
        Ok(gas)
    }

    pub fn is_iso(&self) -> bool {
        self.mixture.is_iso()
    }

    pub fn mixture(&self) -> &GostMixture {
        &self.mixture
    }

    /// Last evaluated correlation output.
    pub fn gost_state(&self) -> Option<&GostState> {
        self.state.as_ref()
    }

    /// Speed of sound [m/s] at the current state.
    pub fn speed_of_sound(&self) -> Option<Real> {
        self.state.map(|state| state.w)
    }

    fn fill(&self, params: &mut DynParameters, p: Real, t: Real) -> EosResult<GostState> {
        let state = self.mixture.evaluate(p, t)?;
        let mut next = DynParameters::at_state(StateParams::new(state.v, p, t));
        next.set_heat_capacities(state.cv, state.cp);
        // isentropic exponent, not cp/cv
        next.set_adiabatic(state.k);
        if let Some(u) = state.u {
            next.set_internal_energy(u);
        }
        if let Some(s) = state.s {
            next.set_entropy(s);
        }
        *params = next;
        Ok(state)
    }
}

impl EquationOfState for NgGost {
    fn identity(&self) -> ModelIdentity {
        if self.is_iso() {
            ModelIdentity::NG_ISO_20765
        } else {
            ModelIdentity::NG_GOST
        }
    }

    fn set_volume(&mut self, p: Real, t: Real) -> EosResult<()> {
        let mut next = self.dyn_params;
        match self.fill(&mut next, p, t) {
            Ok(state) => {
                self.dyn_params = next;
                self.state = Some(state);
                self.error = None;
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn set_pressure(&mut self, _v: Real, _t: Real) -> EosResult<()> {
        let err: EosError = CalculateError::Unsupported {
            what: "pressure from volume is not available for the GOST correlation",
        }
        .into();
        self.error = Some(err.clone());
        Err(err)
    }

    fn volume(&self, p: Real, t: Real) -> EosResult<Real> {
        self.mixture.evaluate(p, t).map(|state| state.v)
    }

    fn pressure(&self, _v: Real, _t: Real) -> EosResult<Real> {
        Err(CalculateError::Unsupported {
            what: "pressure from volume is not available for the GOST correlation",
        }
        .into())
    }

    fn is_valid(&self) -> bool {
        let state = self.dyn_params.state;
        self.dyn_params.is_set(DynSetup::STATE) && gost::within_domain(state.p, state.t)
    }

    fn is_valid_at(&self, state: StateParams) -> bool {
        gost::within_domain(state.p, state.t)
    }

    /// Absolute values at `new_state` (`p`, `t`); `prev` is replaced.
    fn update_dyn_params(&self, prev: &mut DynParameters, new_state: StateParams) -> EosResult<()> {
        self.fill(prev, new_state.p, new_state.t).map(|_| ())
    }

    fn const_parameters(&self) -> &ConstParameters {
        self.mixture.pseudo_critical()
    }

    fn dyn_parameters(&self) -> &DynParameters {
        &self.dyn_params
    }

    fn phase(&self) -> PhaseState {
        PhaseState::NotSet
    }

    fn last_error(&self) -> Option<&EosError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::GasKind;
    use approx::assert_relative_eq;

    fn pipeline_gas() -> Composition {
        Composition::new_mole_fractions(vec![
            (GasKind::Methane, 0.965),
            (GasKind::Ethane, 0.018),
            (GasKind::Propane, 0.0045),
            (GasKind::Nitrogen, 0.003),
            (GasKind::CarbonDioxide, 0.0095),
        ])
        .unwrap()
    }

    #[test]
    fn gost_fills_heat_capacities_but_not_energies() {
        let gas = NgGost::new(&pipeline_gas(), false, 5e6, 300.0).unwrap();
        assert_eq!(gas.identity(), ModelIdentity::NG_GOST);
        let params = gas.dyn_parameters();
        assert!(params.is_set(DynSetup::HEAT_CAP_VOL | DynSetup::ADIABATIC));
        assert!(!params.is_set(DynSetup::INTERNAL_ENERGY));
        assert!(!params.is_set(DynSetup::ENTROPY));
        assert_relative_eq!(params.k, 1.34183, max_relative = 1e-4);
        assert_relative_eq!(params.state.v, 0.0272544, max_relative = 1e-4);
        assert_relative_eq!(gas.speed_of_sound().unwrap(), 427.61, max_relative = 1e-4);
        assert_eq!(gas.phase(), PhaseState::NotSet);
    }

    #[test]
    fn iso_fills_energies() {
        let gas = NgGost::new(&pipeline_gas(), true, 5e6, 300.0).unwrap();
        assert_eq!(gas.identity(), ModelIdentity::NG_ISO_20765);
        let params = gas.dyn_parameters();
        assert!(params.is_set(DynSetup::INTERNAL_ENERGY | DynSetup::ENTHALPY | DynSetup::ENTROPY));
        assert_relative_eq!(params.h - params.u, 5e6 * params.state.v, max_relative = 1e-9);
    }

    #[test]
    fn pressure_is_unsupported() {
        let mut gas = NgGost::new(&pipeline_gas(), false, 5e6, 300.0).unwrap();
        assert!(matches!(
            gas.pressure(0.03, 300.0),
            Err(EosError::Calculate(CalculateError::Unsupported { .. }))
        ));
        assert!(gas.set_pressure(0.03, 300.0).is_err());
        assert!(gas.last_error().is_some());
    }

    #[test]
    fn out_of_domain_keeps_last_state() {
        let mut gas = NgGost::new(&pipeline_gas(), false, 5e6, 300.0).unwrap();
        let before = *gas.dyn_parameters();
        let err = gas.set_volume(5e7, 300.0).unwrap_err();
        assert!(matches!(err, EosError::Calculate(CalculateError::Domain { .. })));
        assert_eq!(*gas.dyn_parameters(), before);
        assert!(gas.is_valid());
        assert!(!gas.is_valid_at(StateParams::at_pt(5e6, 400.0)));
        gas.set_volume(2e6, 280.0).unwrap();
        assert!(gas.last_error().is_none());
    }

    #[test]
    fn pseudo_critical_constants() {
        let gas = NgGost::new(&pipeline_gas(), false, 1e6, 300.0).unwrap();
        assert_eq!(gas.const_parameters().gas(), GasKind::Mix);
        assert_relative_eq!(gas.const_parameters().molar_mass(), gas.mixture().molar_mass());
    }
}
