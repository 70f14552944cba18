//! Equation-of-state models.
//!
//! Every model owns its constants and current state and implements
//! [`EquationOfState`]. [`Model`] is the closed set handed out by the
//! factory; it dispatches with a single `match`.

pub mod cubic;
pub mod ideal;
pub mod ng_gost;
pub mod peng_robinson;
pub mod redlich_kwong;
pub mod soave;

pub use cubic::{AlphaTerm, Attraction, CubicFamily, CubicForm, CubicGas, Shape, Validity};
pub use ideal::IdealGas;
pub use ng_gost::NgGost;
pub use peng_robinson::PengRobinson;
pub use redlich_kwong::RedlichKwong;
pub use soave::RedlichKwongSoave;

use crate::error::{EosError, EosResult};
use crate::parameters::{ConstParameters, DynParameters, StateParams};
use crate::phase::PhaseState;
use crate::state_log::StateLog;
use rg_core::numeric::Real;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    IdealGas,
    RedlichKwong,
    PengRobinson,
    NgGost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSubtype {
    Default,
    /// Redlich-Kwong with Soave's α(T).
    Soave,
    /// Peng-Robinson with pairwise `a, b` mixing.
    BinaryCoefficients,
    /// GOST 30319.3 extended with the ISO 20765 Helmholtz derivatives.
    Iso20765,
}

/// Which equation of state, and which variant of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct ModelIdentity {
    pub kind: ModelKind,
    pub subtype: ModelSubtype,
}

impl ModelIdentity {
    pub const IDEAL_GAS: ModelIdentity = ModelIdentity::of(ModelKind::IdealGas, ModelSubtype::Default);
    pub const REDLICH_KWONG: ModelIdentity =
        ModelIdentity::of(ModelKind::RedlichKwong, ModelSubtype::Default);
    pub const REDLICH_KWONG_SOAVE: ModelIdentity =
        ModelIdentity::of(ModelKind::RedlichKwong, ModelSubtype::Soave);
    pub const PENG_ROBINSON: ModelIdentity =
        ModelIdentity::of(ModelKind::PengRobinson, ModelSubtype::Default);
    pub const PENG_ROBINSON_BINARY: ModelIdentity =
        ModelIdentity::of(ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients);
    pub const NG_GOST: ModelIdentity = ModelIdentity::of(ModelKind::NgGost, ModelSubtype::Default);
    pub const NG_ISO_20765: ModelIdentity =
        ModelIdentity::of(ModelKind::NgGost, ModelSubtype::Iso20765);

    pub const ALL: [ModelIdentity; 7] = [
        ModelIdentity::IDEAL_GAS,
        ModelIdentity::REDLICH_KWONG,
        ModelIdentity::REDLICH_KWONG_SOAVE,
        ModelIdentity::PENG_ROBINSON,
        ModelIdentity::PENG_ROBINSON_BINARY,
        ModelIdentity::NG_GOST,
        ModelIdentity::NG_ISO_20765,
    ];

    const fn of(kind: ModelKind, subtype: ModelSubtype) -> Self {
        Self { kind, subtype }
    }

    /// Checked constructor: each subtype belongs to one kind.
    pub fn new(kind: ModelKind, subtype: ModelSubtype) -> Option<Self> {
        let identity = Self::of(kind, subtype);
        Self::ALL.contains(&identity).then_some(identity)
    }

    /// Default priority used when several models could serve one state.
    pub fn priority(&self) -> i32 {
        match (self.kind, self.subtype) {
            (ModelKind::IdealGas, _) => 0,
            (ModelKind::RedlichKwong, ModelSubtype::Soave) => 75,
            (ModelKind::RedlichKwong, _) => 50,
            (ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients) => 75,
            (ModelKind::PengRobinson, _) => 60,
            (ModelKind::NgGost, ModelSubtype::Iso20765) => 110,
            (ModelKind::NgGost, _) => 100,
        }
    }

    pub fn version(&self) -> u32 {
        1
    }

    pub fn short_name(&self) -> &'static str {
        match (self.kind, self.subtype) {
            (ModelKind::IdealGas, _) => "Ideal gas",
            (ModelKind::RedlichKwong, ModelSubtype::Soave) => "Redlich-Kwong-Soave",
            (ModelKind::RedlichKwong, _) => "Redlich-Kwong",
            (ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients) => {
                "Peng-Robinson (binary coefficients)"
            }
            (ModelKind::PengRobinson, _) => "Peng-Robinson",
            (ModelKind::NgGost, ModelSubtype::Iso20765) => "ISO 20765",
            (ModelKind::NgGost, _) => "GOST 30319.3",
        }
    }

    /// Stable snake_case key used in run files and on the command line.
    pub fn key(&self) -> &'static str {
        match (self.kind, self.subtype) {
            (ModelKind::IdealGas, _) => "ideal_gas",
            (ModelKind::RedlichKwong, ModelSubtype::Soave) => "redlich_kwong_soave",
            (ModelKind::RedlichKwong, _) => "redlich_kwong",
            (ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients) => "peng_robinson_binary",
            (ModelKind::PengRobinson, _) => "peng_robinson",
            (ModelKind::NgGost, ModelSubtype::Iso20765) => "ng_iso_20765",
            (ModelKind::NgGost, _) => "ng_gost",
        }
    }

    pub fn is_gost(&self) -> bool {
        self.kind == ModelKind::NgGost
    }
}

impl fmt::Display for ModelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ModelIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        let identity = match normalized.as_str() {
            "ideal" | "ideal_gas" => ModelIdentity::IDEAL_GAS,
            "rk" | "redlich_kwong" => ModelIdentity::REDLICH_KWONG,
            "rks" | "srk" | "soave" | "redlich_kwong_soave" => ModelIdentity::REDLICH_KWONG_SOAVE,
            "pr" | "peng_robinson" => ModelIdentity::PENG_ROBINSON,
            "pr_binary" | "peng_robinson_binary" => ModelIdentity::PENG_ROBINSON_BINARY,
            "gost" | "ng_gost" | "gost_30319" => ModelIdentity::NG_GOST,
            "iso" | "ng_iso" | "iso_20765" | "ng_iso_20765" => ModelIdentity::NG_ISO_20765,
            _ => return Err(format!("Unknown model: {s}")),
        };
        Ok(identity)
    }
}

impl From<ModelIdentity> for String {
    fn from(identity: ModelIdentity) -> Self {
        identity.key().to_string()
    }
}

impl TryFrom<String> for ModelIdentity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Identity plus the descriptive fields carried into state logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub identity: ModelIdentity,
    pub short_name: String,
    pub version: u32,
    pub priority: i32,
}

impl From<ModelIdentity> for ModelInfo {
    fn from(identity: ModelIdentity) -> Self {
        Self {
            identity,
            short_name: identity.short_name().to_string(),
            version: identity.version(),
            priority: identity.priority(),
        }
    }
}

/// Common contract of every equation of state.
///
/// `set_*` move the model to a new state and record any failure in the
/// model's error slot; on failure the dynamic parameters keep their last
/// valid value. `volume`/`pressure` evaluate without touching the state.
pub trait EquationOfState: Send + Sync {
    fn identity(&self) -> ModelIdentity;

    fn info(&self) -> ModelInfo {
        ModelInfo::from(self.identity())
    }

    /// Solve for the volume at `(p, t)` and move there.
    fn set_volume(&mut self, p: Real, t: Real) -> EosResult<()>;

    /// Solve for the pressure at `(v, t)` and move there.
    fn set_pressure(&mut self, v: Real, t: Real) -> EosResult<()>;

    fn volume(&self, p: Real, t: Real) -> EosResult<Real>;

    fn pressure(&self, v: Real, t: Real) -> EosResult<Real>;

    /// Whether the current state lies inside the model's domain.
    fn is_valid(&self) -> bool;

    /// Whether a hypothetical state lies inside the model's domain. A
    /// missing volume is solved from `(p, t)` first.
    fn is_valid_at(&self, state: StateParams) -> bool;

    /// Move `prev` to `new_state` with the model's closed-form integrals.
    fn update_dyn_params(&self, prev: &mut DynParameters, new_state: StateParams) -> EosResult<()>;

    fn const_parameters(&self) -> &ConstParameters;

    fn dyn_parameters(&self) -> &DynParameters;

    fn phase(&self) -> PhaseState;

    fn last_error(&self) -> Option<&EosError>;

    fn state_log(&self) -> StateLog {
        StateLog::new(self.dyn_parameters(), self.phase(), self.info())
    }
}

/// Any of the supported models.
#[derive(Debug, Clone)]
pub enum Model {
    IdealGas(IdealGas),
    RedlichKwong(RedlichKwong),
    RedlichKwongSoave(RedlichKwongSoave),
    PengRobinson(PengRobinson),
    NgGost(NgGost),
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            Model::IdealGas($m) => $body,
            Model::RedlichKwong($m) => $body,
            Model::RedlichKwongSoave($m) => $body,
            Model::PengRobinson($m) => $body,
            Model::NgGost($m) => $body,
        }
    };
}

impl EquationOfState for Model {
    fn identity(&self) -> ModelIdentity {
        dispatch!(self, m => m.identity())
    }

    fn set_volume(&mut self, p: Real, t: Real) -> EosResult<()> {
        dispatch!(self, m => m.set_volume(p, t))
    }

    fn set_pressure(&mut self, v: Real, t: Real) -> EosResult<()> {
        dispatch!(self, m => m.set_pressure(v, t))
    }

    fn volume(&self, p: Real, t: Real) -> EosResult<Real> {
        dispatch!(self, m => m.volume(p, t))
    }

    fn pressure(&self, v: Real, t: Real) -> EosResult<Real> {
        dispatch!(self, m => m.pressure(v, t))
    }

    fn is_valid(&self) -> bool {
        dispatch!(self, m => m.is_valid())
    }

    fn is_valid_at(&self, state: StateParams) -> bool {
        dispatch!(self, m => m.is_valid_at(state))
    }

    fn update_dyn_params(&self, prev: &mut DynParameters, new_state: StateParams) -> EosResult<()> {
        dispatch!(self, m => m.update_dyn_params(prev, new_state))
    }

    fn const_parameters(&self) -> &ConstParameters {
        dispatch!(self, m => m.const_parameters())
    }

    fn dyn_parameters(&self) -> &DynParameters {
        dispatch!(self, m => m.dyn_parameters())
    }

    fn phase(&self) -> PhaseState {
        dispatch!(self, m => m.phase())
    }

    fn last_error(&self) -> Option<&EosError> {
        dispatch!(self, m => m.last_error())
    }
}

/// Input checks shared by the models.
pub mod validation {
    use crate::error::{CalculateError, EosResult};
    use rg_core::numeric::Real;

    pub fn check_state_input(a: Real, t: Real, what: &'static str) -> EosResult<()> {
        if !(a.is_finite() && a > 0.0) {
            return Err(CalculateError::Domain { what }.into());
        }
        if !(t.is_finite() && t > 0.0) {
            return Err(CalculateError::Domain {
                what: "temperature must be positive and finite",
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities() {
        assert_eq!(ModelIdentity::IDEAL_GAS.priority(), 0);
        assert_eq!(ModelIdentity::REDLICH_KWONG.priority(), 50);
        assert_eq!(ModelIdentity::REDLICH_KWONG_SOAVE.priority(), 75);
        assert_eq!(ModelIdentity::PENG_ROBINSON.priority(), 60);
        assert_eq!(ModelIdentity::PENG_ROBINSON_BINARY.priority(), 75);
        assert_eq!(ModelIdentity::NG_GOST.priority(), 100);
        assert_eq!(ModelIdentity::NG_ISO_20765.priority(), 110);
    }

    #[test]
    fn checked_constructor_rejects_foreign_subtypes() {
        assert_eq!(
            ModelIdentity::new(ModelKind::RedlichKwong, ModelSubtype::Soave),
            Some(ModelIdentity::REDLICH_KWONG_SOAVE)
        );
        assert_eq!(ModelIdentity::new(ModelKind::IdealGas, ModelSubtype::Iso20765), None);
        assert_eq!(
            ModelIdentity::new(ModelKind::PengRobinson, ModelSubtype::Soave),
            None
        );
    }

    #[test]
    fn keys_round_trip_and_aliases() {
        for identity in ModelIdentity::ALL {
            assert_eq!(identity.key().parse::<ModelIdentity>(), Ok(identity));
        }
        assert_eq!("SRK".parse(), Ok(ModelIdentity::REDLICH_KWONG_SOAVE));
        assert_eq!("iso-20765".parse(), Ok(ModelIdentity::NG_ISO_20765));
        assert!("van_der_waals".parse::<ModelIdentity>().is_err());
    }

    #[test]
    fn identity_serializes_as_key() {
        let json = serde_json::to_string(&ModelIdentity::PENG_ROBINSON_BINARY).unwrap();
        assert_eq!(json, "\"peng_robinson_binary\"");
        let back: ModelIdentity = serde_json::from_str("\"ng_gost\"").unwrap();
        assert_eq!(back, ModelIdentity::NG_GOST);
    }

    #[test]
    fn identity_is_a_hash_key() {
        let set: std::collections::HashSet<_> = ModelIdentity::ALL.into_iter().collect();
        assert_eq!(set.len(), 7);
    }
}
