//! Serializable snapshot of a model's current state.

use crate::model::ModelInfo;
use crate::parameters::{DynParameters, DynSetup};
use crate::phase::PhaseState;
use rg_core::numeric::Real;
use rg_core::units::{Pressure, SpecEnergy, SpecHeat, SpecVolume, Temperature, jpkg, jpkgk, k, m3pkg, pa};
use serde::{Deserialize, Serialize};

/// One evaluated state. Quantities the model did not populate are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateLog {
    pub phase: String,
    pub v: Real,
    pub p: Real,
    pub t: Real,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cp: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta_kr: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<Real>,
    pub model: ModelInfo,
}

impl StateLog {
    pub fn new(params: &DynParameters, phase: PhaseState, model: ModelInfo) -> Self {
        Self {
            phase: phase.as_str().to_string(),
            v: params.state.v,
            p: params.state.p,
            t: params.state.t,
            cv: params.get(DynSetup::HEAT_CAP_VOL),
            cp: params.get(DynSetup::HEAT_CAP_PRES),
            u: params.get(DynSetup::INTERNAL_ENERGY),
            h: params.get(DynSetup::ENTHALPY),
            k: params.get(DynSetup::ADIABATIC),
            beta_kr: params.get(DynSetup::BETA_KR),
            s: params.get(DynSetup::ENTROPY),
            model,
        }
    }

    pub fn pressure(&self) -> Pressure {
        pa(self.p)
    }

    pub fn temperature(&self) -> Temperature {
        k(self.t)
    }

    pub fn specific_volume(&self) -> SpecVolume {
        m3pkg(self.v)
    }

    pub fn enthalpy(&self) -> Option<SpecEnergy> {
        self.h.map(jpkg)
    }

    pub fn entropy(&self) -> Option<SpecHeat> {
        self.s.map(jpkgk)
    }

    /// Isobaric heat capacity.
    pub fn heat_capacity(&self) -> Option<SpecHeat> {
        self.cp.map(jpkgk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelIdentity;
    use crate::parameters::StateParams;

    #[test]
    fn unset_fields_are_omitted() {
        let mut params = DynParameters::at_state(StateParams::new(0.02, 5e6, 300.0));
        params.set_heat_capacities(1760.0, 2570.0);
        let log = StateLog::new(&params, PhaseState::NotSet, ModelIdentity::NG_GOST.into());
        assert_eq!(log.u, None);
        assert!(log.k.is_some());

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["phase"], "NOT_SET");
        assert_eq!(json["model"]["identity"], "ng_gost");
        assert!(json.get("u").is_none());
        assert!(json.get("cp").is_some());

        let back: StateLog = serde_json::from_value(json).unwrap();
        assert_eq!(back, log);
    }

    #[test]
    fn typed_accessors_convert_units() {
        use uom::si::pressure::megapascal;
        use uom::si::thermodynamic_temperature::degree_celsius;

        let mut params = DynParameters::at_state(StateParams::new(0.02, 5e6, 300.0));
        params.set_heat_capacities(1760.0, 2570.0);
        let log = StateLog::new(&params, PhaseState::NotSet, ModelIdentity::NG_GOST.into());
        assert!((log.pressure().get::<megapascal>() - 5.0).abs() < 1e-12);
        assert!((log.temperature().get::<degree_celsius>() - 26.85).abs() < 1e-9);
        assert_eq!(log.specific_volume().value, 0.02);
        assert_eq!(log.heat_capacity().map(|c| c.value), Some(2570.0));
        assert!(log.enthalpy().is_none() && log.entropy().is_none());
    }
}
