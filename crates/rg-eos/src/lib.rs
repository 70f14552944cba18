//! rg-eos: real-gas equations of state.
//!
//! Provides:
//! - the gas catalog and composition handling (pure gases and mixtures)
//! - constant and state-dependent parameters of a model instance
//! - ideal gas, Redlich-Kwong (classic and Soave), Peng-Robinson (plain and
//!   binary-coefficient) and the GOST 30319.3 / ISO 20765 natural-gas
//!   correlation behind the [`EquationOfState`] trait
//! - pseudo-critical mixing rules
//! - binodal envelopes by Maxwell's rule, cached process-wide
//! - a factory, a priority-ordered calculation setup and sweeps
//!
//! # Example
//!
//! ```no_run
//! use rg_eos::{EquationOfState, GasInput, GasKind, ModelIdentity, ModelInput, catalog, create_model};
//!
//! let methane = catalog::lookup(GasKind::Methane).unwrap().const_parameters().unwrap();
//! let input = ModelInput::new(ModelIdentity::PENG_ROBINSON, GasInput::Pure(methane), 5e6, 300.0);
//! let model = create_model(&input).unwrap();
//! let log = model.state_log();
//! println!("v = {} m³/kg, phase {}", log.v, log.phase);
//! ```

pub mod binodal;
pub mod catalog;
pub mod composition;
pub mod error;
pub mod factory;
pub mod gas;
pub mod gost;
pub mod interaction;
pub mod mixing;
pub mod model;
pub mod parameters;
pub mod phase;
pub mod setup;
pub mod state_log;
pub mod sweep_executor;
pub mod sweeps;
pub mod units;

pub use binodal::BinodalPoints;
pub use catalog::{CatalogEntry, filter_catalog, gas_catalog};
pub use composition::{Composition, MixtureComponent};
pub use error::{CalculateError, EosError, EosResult, GasMixError, InitError};
pub use factory::{GasInput, ModelInput, create_model, try_create_model};
pub use gas::GasKind;
pub use gost::GostMixture;
pub use mixing::MixingRule;
pub use model::{EquationOfState, Model, ModelIdentity, ModelInfo, ModelKind, ModelSubtype};
pub use parameters::{ConstParameters, DynParameters, DynSetup, StateParams};
pub use phase::PhaseState;
pub use setup::CalculationSetup;
pub use state_log::StateLog;
pub use sweep_executor::{
    SweepError, SweepResult, execute_isobar, execute_isotherm, execute_many, execute_sweep,
};
pub use sweeps::{SweepDefinition, SweepDefinitionError, SweepType};
pub use units::{Quantity, UnitError, UnitValue, parse_quantity};
