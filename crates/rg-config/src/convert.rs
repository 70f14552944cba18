//! Turning a run file into factory input.

use crate::ConfigResult;
use crate::schema::{ComponentDef, ConstantsDef, GasDef, PointDef, RunFile, SweepDef, ValueDef};
use rg_eos::{
    CalculationSetup, Composition, ConstParameters, EosResult, GasInput, GasKind, InitError, MixtureComponent,
    ModelInput, Quantity, SweepDefinition, SweepDefinitionError, UnitError, catalog, parse_quantity,
};
use tracing::debug;

/// Initial state of models built for a run file without points.
pub const DEFAULT_STATE: (f64, f64) = (101_325.0, 293.15);

impl ValueDef {
    pub fn to_si(&self, quantity: Quantity) -> Result<f64, UnitError> {
        match self {
            ValueDef::Number(value) => parse_quantity(&value.to_string(), quantity),
            ValueDef::Text(text) => parse_quantity(text, quantity),
        }
    }
}

impl PointDef {
    /// `(p, t)` in Pa and K.
    pub fn to_si(&self) -> Result<(f64, f64), UnitError> {
        Ok((self.p.to_si(Quantity::Pressure)?, self.t.to_si(Quantity::Temperature)?))
    }
}

impl SweepDef {
    pub fn definition(&self) -> Result<SweepDefinition, SweepDefinitionError> {
        SweepDefinition::from_text(self.start.clone(), self.end.clone(), self.quantity, self.points, self.spacing)
    }

    /// The quantity held fixed along the sweep.
    pub fn fixed_quantity(&self) -> Quantity {
        match self.quantity {
            Quantity::Temperature => Quantity::Pressure,
            _ => Quantity::Temperature,
        }
    }

    pub fn fixed_si(&self) -> Result<f64, UnitError> {
        self.fixed.to_si(self.fixed_quantity())
    }
}

impl ConstantsDef {
    pub fn to_const_parameters(&self, gas: GasKind) -> EosResult<ConstParameters> {
        ConstParameters::new(gas, self.vc, self.zc, self.pc, self.tc, self.molar_mass, self.acentric)
    }
}

fn catalog_constants(gas: GasKind) -> EosResult<ConstParameters> {
    match catalog::lookup(gas) {
        Some(entry) => entry.const_parameters(),
        None => Err(InitError::UnknownGas {
            name: gas.key().to_string(),
        }
        .into()),
    }
}

fn mixture_component(component: &ComponentDef) -> EosResult<MixtureComponent> {
    Ok(match &component.constants {
        Some(constants) => MixtureComponent::custom(constants.to_const_parameters(component.gas)?, component.fraction),
        None => MixtureComponent::catalog(component.gas, component.fraction),
    })
}

impl GasDef {
    pub fn to_gas_input(&self) -> EosResult<GasInput> {
        match self {
            GasDef::Pure { gas, constants } => {
                let constants = match constants {
                    Some(constants) => constants.to_const_parameters(*gas)?,
                    None => catalog_constants(*gas)?,
                };
                Ok(GasInput::Pure(constants))
            }
            GasDef::Mixture { components } => Ok(GasInput::Mixture(
                components.iter().map(mixture_component).collect::<EosResult<_>>()?,
            )),
            GasDef::GostMixture { components } => Ok(GasInput::GostMixture(Composition::new_mole_fractions(
                components.iter().map(|c| (c.gas, c.fraction)).collect(),
            )?)),
        }
    }
}

impl RunFile {
    /// State points in SI, in file order.
    pub fn state_points(&self) -> ConfigResult<Vec<(f64, f64)>> {
        Ok(self.points.iter().map(PointDef::to_si).collect::<Result<_, _>>()?)
    }

    /// One factory input per listed model, with the configuration flags
    /// applied. Models start at the first point.
    pub fn model_inputs(&self) -> ConfigResult<Vec<(ModelInput, Option<i32>)>> {
        let gas = self.gas.to_gas_input()?;
        let (p, t) = match self.points.first() {
            Some(point) => point.to_si()?,
            None => DEFAULT_STATE,
        };
        let inputs = self
            .models
            .iter()
            .map(|entry| {
                let identity = self.configuration.resolve(entry.model);
                if identity != entry.model {
                    debug!(listed = %entry.model, runs_as = %identity, "model upgraded by configuration");
                }
                let mut input = ModelInput::new(identity, gas.clone(), p, t);
                input.mixing_rule = self.configuration.mixing_rule;
                (input, entry.priority)
            })
            .collect();
        Ok(inputs)
    }

    /// Calculation setup over every model that accepts the gas.
    pub fn calculation_setup(&self) -> ConfigResult<CalculationSetup> {
        let inputs = self.model_inputs()?;
        Ok(CalculationSetup::from_inputs(
            inputs.iter().map(|(input, priority)| (input, *priority)),
        ))
    }

    /// Parsed sweeps with their fixed value in SI.
    pub fn sweep_definitions(&self) -> ConfigResult<Vec<(SweepDefinition, f64)>> {
        self.sweeps
            .iter()
            .map(|sweep| -> ConfigResult<(SweepDefinition, f64)> { Ok((sweep.definition()?, sweep.fixed_si()?)) })
            .collect()
    }
}
