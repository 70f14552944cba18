//! Equation-of-state errors.

use rg_core::RgError;
use thiserror::Error;

/// Result type for engine operations.
pub type EosResult<T> = Result<T, EosError>;

/// Construction-time failures: the model cannot be built from its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InitError {
    /// Mixture fractions do not sum to 1 within tolerance.
    #[error("Mixture fractions sum to {sum}, expected 1 ± 0.03")]
    CompositionSum { sum: f64 },

    /// A value that must be strictly positive and finite is not.
    #[error("Non-positive or non-finite value for {what}")]
    NonPositive { what: &'static str },

    /// Gas name not present in the catalog.
    #[error("Unknown gas: {name}")]
    UnknownGas { name: String },

    /// Exactly one of critical volume and critical compressibility must be given.
    #[error("Exactly one of critical volume and critical compressibility must be set")]
    CriticalVolumeOrZ,

    /// Other invalid input.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}

/// Run-time failures while evaluating a state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculateError {
    /// State lies outside the model's certified domain.
    #[error("Outside of model domain: {what}")]
    Domain { what: &'static str },

    /// Iteration cap reached.
    #[error("No convergence for {what} after {iterations} iterations")]
    NoConvergence {
        what: &'static str,
        iterations: usize,
    },

    /// Root found but physically meaningless (v <= b, negative pressure ...).
    #[error("Non-physical root: {what}")]
    NonPhysicalRoot { what: &'static str },

    /// The model has no implementation for this operation.
    #[error("Unsupported operation: {what}")]
    Unsupported { what: &'static str },

    /// Cubic solver failure.
    #[error("Cubic solver: {0}")]
    Cubic(#[from] RgError),
}

/// Mixture-specific failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasMixError {
    /// Model identity and gas payload do not fit together.
    #[error("Incompatible model and gas input (GOST payload requires a GOST model and vice versa)")]
    IncompatibleFlags,

    /// Empty component list.
    #[error("Empty component list")]
    EmptyComponents,

    /// Component fraction outside the correlation's limits.
    #[error("Fraction {fraction} of {component} is outside the allowed range")]
    CompositionLimit { component: String, fraction: f64 },

    /// Component not covered by the correlation tables.
    #[error("Component {component} is not supported by this model")]
    UnsupportedComponent { component: String },
}

/// Top-level engine error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    #[error("Init error: {0}")]
    Init(#[from] InitError),

    #[error("Calculate error: {0}")]
    Calculate(#[from] CalculateError),

    #[error("Gas mixture error: {0}")]
    GasMix(#[from] GasMixError),
}

impl From<RgError> for EosError {
    fn from(err: RgError) -> Self {
        EosError::Calculate(CalculateError::Cubic(err))
    }
}

impl From<EosError> for RgError {
    fn from(err: EosError) -> Self {
        match err {
            EosError::Calculate(CalculateError::Cubic(inner)) => inner,
            other => RgError::Invariant {
                what: other.to_string(),
            },
        }
    }
}

impl EosError {
    pub fn is_init(&self) -> bool {
        matches!(self, EosError::Init(_) | EosError::GasMix(_))
    }

    pub fn is_calculate(&self) -> bool {
        matches!(self, EosError::Calculate(_))
    }
}
