//! Running sweeps through the model factory.
//!
//! Every point gets a fresh model built from a [`ModelInput`] template, so
//! a failed point never disturbs the next one. Independent templates run in
//! parallel on rayon's pool.

use crate::factory::{ModelInput, create_model};
use crate::model::{EquationOfState, ModelIdentity};
use crate::state_log::StateLog;
use crate::sweeps::SweepDefinition;
use crate::units::Quantity;
use rayon::prelude::*;
use rg_core::numeric::Real;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    #[error("Expected a {expected} sweep, got {actual}")]
    WrongQuantity { expected: Quantity, actual: Quantity },
}

/// States along one sweep; failed points are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub identity: ModelIdentity,
    pub quantity: Quantity,
    /// The fixed temperature of an isotherm or pressure of an isobar.
    pub fixed_value: Real,
    pub independent_values: Vec<Real>,
    pub states: Vec<Option<StateLog>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    pub fn specific_volume(&self) -> Vec<Real> {
        self.states.iter().flatten().map(|s| s.v).collect()
    }

    pub fn successful_independent_values(&self) -> Vec<Real> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(value, state)| state.as_ref().map(|_| *value))
            .collect()
    }
}

fn evaluate(template: &ModelInput, p: Real, t: Real) -> Option<StateLog> {
    match create_model(&template.at(p, t)) {
        Ok(model) => Some(model.state_log()),
        Err(err) => {
            debug!(model = %template.identity, p, t, error = %err, "sweep point failed");
            None
        }
    }
}

fn run(template: &ModelInput, sweep: &SweepDefinition, fixed_value: Real) -> SweepResult {
    let values = sweep.generate_points();
    let states: Vec<Option<StateLog>> = values
        .iter()
        .map(|&x| match sweep.quantity {
            Quantity::Temperature => evaluate(template, fixed_value, x),
            _ => evaluate(template, x, fixed_value),
        })
        .collect();
    let num_successful = states.iter().filter(|s| s.is_some()).count();
    SweepResult {
        identity: template.identity,
        quantity: sweep.quantity,
        fixed_value,
        num_failed: states.len() - num_successful,
        independent_values: values,
        states,
        num_successful,
    }
}

/// Pressure sweep at fixed temperature.
pub fn execute_isotherm(template: &ModelInput, sweep: &SweepDefinition, t: Real) -> Result<SweepResult, SweepError> {
    if sweep.quantity != Quantity::Pressure {
        return Err(SweepError::WrongQuantity {
            expected: Quantity::Pressure,
            actual: sweep.quantity,
        });
    }
    Ok(run(template, sweep, t))
}

/// Temperature sweep at fixed pressure.
pub fn execute_isobar(template: &ModelInput, sweep: &SweepDefinition, p: Real) -> Result<SweepResult, SweepError> {
    if sweep.quantity != Quantity::Temperature {
        return Err(SweepError::WrongQuantity {
            expected: Quantity::Temperature,
            actual: sweep.quantity,
        });
    }
    Ok(run(template, sweep, p))
}

/// Isotherm or isobar depending on the swept quantity; `fixed_value` is the
/// other state variable.
pub fn execute_sweep(template: &ModelInput, sweep: &SweepDefinition, fixed_value: Real) -> Result<SweepResult, SweepError> {
    match sweep.quantity {
        Quantity::Temperature => execute_isobar(template, sweep, fixed_value),
        _ => execute_isotherm(template, sweep, fixed_value),
    }
}

/// The same sweep for several independent templates, one rayon task each.
pub fn execute_many(
    templates: &[ModelInput],
    sweep: &SweepDefinition,
    fixed_value: Real,
) -> Vec<Result<SweepResult, SweepError>> {
    templates
        .par_iter()
        .map(|template| execute_sweep(template, sweep, fixed_value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::composition::Composition;
    use crate::factory::GasInput;
    use crate::gas::GasKind;
    use crate::sweeps::SweepType;

    fn methane_input(identity: ModelIdentity) -> ModelInput {
        let constants = catalog::lookup(GasKind::Methane)
            .unwrap()
            .const_parameters()
            .unwrap();
        ModelInput::new(identity, GasInput::Pure(constants), 1e5, 300.0)
    }

    #[test]
    fn isotherm_volumes_decrease_with_pressure() {
        let sweep = SweepDefinition::from_text("1 bar", "50 bar", Quantity::Pressure, 5, SweepType::Linear).unwrap();
        let result = execute_isotherm(&methane_input(ModelIdentity::PENG_ROBINSON), &sweep, 300.0).unwrap();
        assert_eq!(result.num_successful, 5);
        let v = result.specific_volume();
        assert!(v.windows(2).all(|w| w[1] < w[0]));
        assert!(result.states.iter().flatten().all(|s| s.t == 300.0));
    }

    #[test]
    fn failed_points_are_kept_as_none() {
        let gas = Composition::new_mole_fractions(vec![
            (GasKind::Methane, 0.95),
            (GasKind::Nitrogen, 0.05),
        ])
        .unwrap();
        let template = ModelInput::new(ModelIdentity::NG_GOST, GasInput::GostMixture(gas), 1e6, 300.0);
        // 360 K and up leave the correlation's range
        let sweep = SweepDefinition::from_text("300 K", "400 K", Quantity::Temperature, 6, SweepType::Linear).unwrap();
        let result = execute_isobar(&template, &sweep, 1e6).unwrap();
        assert_eq!(result.num_successful, 3);
        assert_eq!(result.num_failed, 3);
        assert_eq!(result.successful_independent_values(), vec![300.0, 320.0, 340.0]);
        assert!(result.states[5].is_none());
    }

    #[test]
    fn wrong_quantity_is_rejected() {
        let sweep = SweepDefinition::from_text("300 K", "310 K", Quantity::Temperature, 2, SweepType::Linear).unwrap();
        assert!(matches!(
            execute_isotherm(&methane_input(ModelIdentity::IDEAL_GAS), &sweep, 300.0),
            Err(SweepError::WrongQuantity { .. })
        ));
    }

    #[test]
    fn many_templates_in_parallel() {
        let templates: Vec<_> = [
            ModelIdentity::IDEAL_GAS,
            ModelIdentity::REDLICH_KWONG,
            ModelIdentity::REDLICH_KWONG_SOAVE,
            ModelIdentity::PENG_ROBINSON,
        ]
        .into_iter()
        .map(methane_input)
        .collect();
        let sweep = SweepDefinition::from_text("1 MPa", "5 MPa", Quantity::Pressure, 3, SweepType::Linear).unwrap();
        let results = execute_many(&templates, &sweep, 300.0);
        assert_eq!(results.len(), 4);
        for (result, template) in results.iter().zip(&templates) {
            let result = result.as_ref().unwrap();
            assert_eq!(result.identity, template.identity);
            assert_eq!(result.num_successful, 3);
        }
    }
}
