//! A set of models for one gas, queried by priority.

use crate::error::{CalculateError, EosResult};
use crate::factory::{ModelInput, create_model, try_create_model};
use crate::model::{EquationOfState, Model, ModelIdentity};
use crate::parameters::StateParams;
use crate::state_log::StateLog;
use rg_core::numeric::Real;
use tracing::{debug, info};

/// Models ordered by descending priority, one of them current.
#[derive(Debug, Clone, Default)]
pub struct CalculationSetup {
    models: Vec<(i32, Model)>,
    current: Option<usize>,
}

impl CalculationSetup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a model with its identity's default priority.
    pub fn push(&mut self, model: Model) {
        let priority = model.identity().priority();
        self.push_with_priority(model, priority);
    }

    pub fn push_with_priority(&mut self, model: Model, priority: i32) {
        let at = self
            .models
            .iter()
            .position(|(p, _)| *p < priority)
            .unwrap_or(self.models.len());
        self.models.insert(at, (priority, model));
        // insertion shifts indices
        self.current = None;
    }

    /// Build every input; rejected ones are logged and skipped.
    pub fn from_inputs<'a>(inputs: impl IntoIterator<Item = (&'a ModelInput, Option<i32>)>) -> Self {
        let mut setup = Self::new();
        for (input, priority) in inputs {
            if let Some(model) = try_create_model(input) {
                let priority = priority.unwrap_or_else(|| input.identity.priority());
                setup.push_with_priority(model, priority);
            }
        }
        setup
    }

    /// Build one input, failing on rejection.
    pub fn add_input(&mut self, input: &ModelInput) -> EosResult<()> {
        self.push(create_model(input)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn identities(&self) -> Vec<ModelIdentity> {
        self.models.iter().map(|(_, m)| m.identity()).collect()
    }

    pub fn current(&self) -> Option<&Model> {
        self.current.map(|i| &self.models[i].1)
    }

    /// Move to `(p, t)` with the highest-priority model valid there and
    /// return its state log.
    pub fn select(&mut self, p: Real, t: Real) -> EosResult<StateLog> {
        let state = StateParams::at_pt(p, t);
        let previous = self.current().map(|m| m.identity());
        for (index, (priority, model)) in self.models.iter_mut().enumerate() {
            if !model.is_valid_at(state) {
                debug!(model = %model.identity(), p, t, "model not valid at state");
                continue;
            }
            if let Err(err) = model.set_volume(p, t) {
                debug!(model = %model.identity(), error = %err, "model failed at state");
                continue;
            }
            let identity = model.identity();
            if previous != Some(identity) {
                info!(model = %identity, priority = *priority, p, t, "switched current model");
            }
            self.current = Some(index);
            return Ok(model.state_log());
        }
        self.current = None;
        Err(CalculateError::Domain {
            what: "no model of the setup is valid at this state",
        }
        .into())
    }

    /// Evaluate a list of `(p, t)` points; failures stay in place.
    pub fn select_all(&mut self, points: &[(Real, Real)]) -> Vec<EosResult<StateLog>> {
        points.iter().map(|&(p, t)| self.select(p, t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;
    use crate::factory::GasInput;
    use crate::gas::GasKind;

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

    fn methane_mixture() -> GasInput {
        GasInput::Mixture(vec![
            crate::composition::MixtureComponent::catalog(GasKind::Methane, 0.965),
            crate::composition::MixtureComponent::catalog(GasKind::Ethane, 0.018),
            crate::composition::MixtureComponent::catalog(GasKind::Propane, 0.0045),
            crate::composition::MixtureComponent::catalog(GasKind::Nitrogen, 0.003),
            crate::composition::MixtureComponent::catalog(GasKind::CarbonDioxide, 0.0095),
        ])
    }

    #[test]
    fn gost_wins_inside_its_domain_and_cubic_outside() {
        let gost = ModelInput::new(ModelIdentity::NG_GOST, GasInput::GostMixture(natural_gas()), 5e6, 300.0);
        let pr = ModelInput::new(ModelIdentity::PENG_ROBINSON, methane_mixture(), 5e6, 300.0);
        let mut setup = CalculationSetup::from_inputs([(&pr, None), (&gost, None)]);
        assert_eq!(
            setup.identities(),
            vec![ModelIdentity::NG_GOST, ModelIdentity::PENG_ROBINSON]
        );

        let log = setup.select(5e6, 300.0).unwrap();
        assert_eq!(log.model.identity, ModelIdentity::NG_GOST);
        assert_eq!(log.phase, "NOT_SET");

        // 400 K is outside the correlation's range
        let log = setup.select(5e6, 400.0).unwrap();
        assert_eq!(log.model.identity, ModelIdentity::PENG_ROBINSON);
        assert_eq!(setup.current().unwrap().identity(), ModelIdentity::PENG_ROBINSON);
    }

    #[test]
    fn explicit_priority_overrides_default() {
        let gost = ModelInput::new(ModelIdentity::NG_GOST, GasInput::GostMixture(natural_gas()), 5e6, 300.0);
        let pr = ModelInput::new(ModelIdentity::PENG_ROBINSON, methane_mixture(), 5e6, 300.0);
        let mut setup = CalculationSetup::from_inputs([(&gost, None), (&pr, Some(500))]);
        let log = setup.select(5e6, 300.0).unwrap();
        assert_eq!(log.model.identity, ModelIdentity::PENG_ROBINSON);
    }

    #[test]
    fn nothing_valid_is_a_domain_error() {
        let gost = ModelInput::new(ModelIdentity::NG_GOST, GasInput::GostMixture(natural_gas()), 5e6, 300.0);
        let mut setup = CalculationSetup::new();
        setup.add_input(&gost).unwrap();
        assert!(setup.select(5e7, 300.0).is_err());
        assert!(setup.current().is_none());
        let results = setup.select_all(&[(5e6, 300.0), (5e6, 500.0)]);
        assert!(results[0].is_ok() && results[1].is_err());
    }

    #[test]
    fn rejected_inputs_are_skipped() {
        let bad = ModelInput::new(ModelIdentity::NG_GOST, methane_mixture(), 5e6, 300.0);
        let setup = CalculationSetup::from_inputs([(&bad, None)]);
        assert!(setup.is_empty());
    }
}
