//! Model construction from a tagged input.
//!
//! [`create_model`] validates the gas payload against the requested
//! identity, resolves mixtures to pseudo-critical constants and hands back
//! a [`Model`] already moved to the requested `(p, t)`.

use crate::composition::{
    Composition, MixtureComponent, check_fraction_sum, components_sum, mixture_cv0, resolve_components,
};
use crate::error::{EosResult, GasMixError};
use crate::mixing::MixingRule;
use crate::model::{
    IdealGas, Model, ModelIdentity, ModelKind, ModelSubtype, NgGost, PengRobinson, RedlichKwong,
    RedlichKwongSoave,
};
use crate::parameters::{ConstParameters, check_positive};
use rg_core::numeric::Real;
use tracing::{debug, warn};

/// Gas description accepted by the factory.
#[derive(Debug, Clone, PartialEq)]
pub enum GasInput {
    /// One gas given by its critical constants.
    Pure(ConstParameters),
    /// Mixture for the cubic models; custom constants allowed per component.
    Mixture(Vec<MixtureComponent>),
    /// Natural gas for the GOST/ISO correlation.
    GostMixture(Composition),
}

impl GasInput {
    fn kind_name(&self) -> &'static str {
        match self {
            GasInput::Pure(_) => "pure",
            GasInput::Mixture(_) => "mixture",
            GasInput::GostMixture(_) => "gost_mixture",
        }
    }
}

/// Everything needed to build one model instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelInput {
    pub identity: ModelIdentity,
    pub gas: GasInput,
    pub p: Real,
    pub t: Real,
    /// Pseudo-critical rule for cubic mixtures; the model's default when unset.
    pub mixing_rule: Option<MixingRule>,
}

impl ModelInput {
    pub fn new(identity: ModelIdentity, gas: GasInput, p: Real, t: Real) -> Self {
        Self {
            identity,
            gas,
            p,
            t,
            mixing_rule: None,
        }
    }

    pub fn with_mixing_rule(mut self, rule: MixingRule) -> Self {
        self.mixing_rule = Some(rule);
        self
    }

    /// Same gas and model at another state.
    pub fn at(&self, p: Real, t: Real) -> Self {
        Self {
            p,
            t,
            ..self.clone()
        }
    }
}

/// Build a model, or return why the input was rejected.
pub fn create_model(input: &ModelInput) -> EosResult<Model> {
    check_positive(input.p, "pressure")?;
    check_positive(input.t, "temperature")?;
    let identity = input.identity;
    match (&input.gas, identity.is_gost()) {
        (GasInput::GostMixture(_), false) | (GasInput::Pure(_) | GasInput::Mixture(_), true) => {
            return Err(GasMixError::IncompatibleFlags.into());
        }
        _ => {}
    }
    debug!(model = %identity, gas = input.gas.kind_name(), p = input.p, t = input.t, "creating model");

    match &input.gas {
        GasInput::Pure(constants) => pure_model(identity, *constants, input.p, input.t),
        GasInput::Mixture(components) => {
            mixture_model(identity, components, input.mixing_rule, input.p, input.t)
        }
        GasInput::GostMixture(composition) => {
            check_fraction_sum(composition.input_sum())?;
            let iso = identity.subtype == ModelSubtype::Iso20765;
            Ok(Model::NgGost(NgGost::new(composition, iso, input.p, input.t)?))
        }
    }
}

/// Like [`create_model`], logging the failure instead of returning it.
pub fn try_create_model(input: &ModelInput) -> Option<Model> {
    match create_model(input) {
        Ok(model) => Some(model),
        Err(err) => {
            warn!(model = %input.identity, gas = input.gas.kind_name(), error = %err, "model rejected");
            None
        }
    }
}

fn pure_model(identity: ModelIdentity, constants: ConstParameters, p: Real, t: Real) -> EosResult<Model> {
    let model = match (identity.kind, identity.subtype) {
        (ModelKind::IdealGas, _) => Model::IdealGas(IdealGas::new(constants, p, t)?),
        (ModelKind::RedlichKwong, ModelSubtype::Soave) => {
            Model::RedlichKwongSoave(RedlichKwongSoave::new(constants, p, t)?)
        }
        (ModelKind::RedlichKwong, _) => Model::RedlichKwong(RedlichKwong::new(constants, p, t)?),
        (ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients) => {
            let components = resolve_components(&[MixtureComponent::custom(constants, 1.0)])?;
            Model::PengRobinson(PengRobinson::binary(&components, constants, p, t)?)
        }
        (ModelKind::PengRobinson, _) => Model::PengRobinson(PengRobinson::new(constants, p, t)?),
        (ModelKind::NgGost, _) => return Err(GasMixError::IncompatibleFlags.into()),
    };
    Ok(model)
}

fn mixture_model(
    identity: ModelIdentity,
    components: &[MixtureComponent],
    rule: Option<MixingRule>,
    p: Real,
    t: Real,
) -> EosResult<Model> {
    if components.is_empty() {
        return Err(GasMixError::EmptyComponents.into());
    }
    check_fraction_sum(components_sum(components))?;
    let resolved = resolve_components(components)?;
    let rule = rule.unwrap_or_else(|| MixingRule::default_for(identity));
    let pseudo = rule.pseudo_critical(&resolved)?;
    let cv0 = mixture_cv0(&resolved);
    debug!(
        rule = rule.key(),
        tc = pseudo.tc(),
        pc = pseudo.pc(),
        "mixture pseudo-critical point"
    );

    let model = match (identity.kind, identity.subtype) {
        (ModelKind::IdealGas, _) => Model::IdealGas(IdealGas::with_cv0(pseudo, cv0, p, t)?),
        (ModelKind::RedlichKwong, ModelSubtype::Soave) => {
            Model::RedlichKwongSoave(RedlichKwongSoave::mixture(&resolved, pseudo, p, t)?)
        }
        (ModelKind::RedlichKwong, _) => {
            Model::RedlichKwong(RedlichKwong::with_cv0(pseudo, cv0, p, t)?)
        }
        (ModelKind::PengRobinson, ModelSubtype::BinaryCoefficients) => {
            Model::PengRobinson(PengRobinson::binary(&resolved, pseudo, p, t)?)
        }
        (ModelKind::PengRobinson, _) => {
            Model::PengRobinson(PengRobinson::with_cv0(pseudo, cv0, p, t)?)
        }
        (ModelKind::NgGost, _) => return Err(GasMixError::IncompatibleFlags.into()),
    };
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::error::{EosError, InitError};
    use crate::gas::GasKind;
    use crate::model::EquationOfState;

    fn methane() -> ConstParameters {
        catalog::lookup(GasKind::Methane)
            .unwrap()
            .const_parameters()
            .unwrap()
    }

    fn natural_gas() -> Composition {
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
    fn every_cubic_identity_builds_for_a_pure_gas() {
        for identity in ModelIdentity::ALL.into_iter().filter(|id| !id.is_gost()) {
            let input = ModelInput::new(identity, GasInput::Pure(methane()), 1e6, 300.0);
            let model = create_model(&input).unwrap();
            assert_eq!(model.identity(), identity);
            assert!(model.dyn_parameters().state.v > 0.0);
        }
    }

    #[test]
    fn gost_identity_needs_gost_payload() {
        let input = ModelInput::new(ModelIdentity::NG_GOST, GasInput::Pure(methane()), 1e6, 300.0);
        assert_eq!(
            create_model(&input).unwrap_err(),
            EosError::GasMix(GasMixError::IncompatibleFlags)
        );
        let input = ModelInput::new(
            ModelIdentity::PENG_ROBINSON,
            GasInput::GostMixture(natural_gas()),
            1e6,
            300.0,
        );
        assert_eq!(
            create_model(&input).unwrap_err(),
            EosError::GasMix(GasMixError::IncompatibleFlags)
        );
    }

    #[test]
    fn gost_and_iso_from_one_payload() {
        for identity in [ModelIdentity::NG_GOST, ModelIdentity::NG_ISO_20765] {
            let input = ModelInput::new(identity, GasInput::GostMixture(natural_gas()), 5e6, 300.0);
            assert_eq!(create_model(&input).unwrap().identity(), identity);
        }
    }

    #[test]
    fn mixture_sum_gate() {
        let mix = |ethane: Real| {
            GasInput::Mixture(vec![
                MixtureComponent::catalog(GasKind::Methane, 0.85),
                MixtureComponent::catalog(GasKind::Ethane, ethane),
            ])
        };
        let rejected = ModelInput::new(ModelIdentity::PENG_ROBINSON, mix(0.05), 1e6, 300.0);
        assert!(matches!(
            create_model(&rejected).unwrap_err(),
            EosError::Init(InitError::CompositionSum { .. })
        ));
        let accepted = ModelInput::new(ModelIdentity::PENG_ROBINSON, mix(0.125), 1e6, 300.0);
        assert!(create_model(&accepted).is_ok());
    }

    #[test]
    fn empty_mixture_and_bad_state_are_rejected() {
        let input = ModelInput::new(ModelIdentity::IDEAL_GAS, GasInput::Mixture(vec![]), 1e6, 300.0);
        assert_eq!(
            create_model(&input).unwrap_err(),
            EosError::GasMix(GasMixError::EmptyComponents)
        );
        let input = ModelInput::new(ModelIdentity::IDEAL_GAS, GasInput::Pure(methane()), -1.0, 300.0);
        assert!(matches!(
            create_model(&input).unwrap_err(),
            EosError::Init(InitError::NonPositive { .. })
        ));
        assert!(try_create_model(&input).is_none());
    }

    #[test]
    fn explicit_mixing_rule_changes_the_pseudo_critical_point() {
        let gas = GasInput::Mixture(vec![
            MixtureComponent::catalog(GasKind::Methane, 0.7),
            MixtureComponent::catalog(GasKind::CarbonDioxide, 0.3),
        ]);
        let default = create_model(&ModelInput::new(ModelIdentity::PENG_ROBINSON, gas.clone(), 1e6, 300.0)).unwrap();
        let lee = create_model(
            &ModelInput::new(ModelIdentity::PENG_ROBINSON, gas, 1e6, 300.0).with_mixing_rule(MixingRule::Lee),
        )
        .unwrap();
        assert_eq!(default.const_parameters().gas(), GasKind::Mix);
        assert_ne!(default.const_parameters().tc(), lee.const_parameters().tc());
    }
}
